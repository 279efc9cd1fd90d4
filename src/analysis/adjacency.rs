use crate::ir::IntermediateRepresentation;
use ahash::AHashMap;

/// Dense, index-based view of the flow graph.
///
/// Every declared node gets an index in declaration order, followed by any edge
/// endpoint that was never declared as a node. Out-sets hold each successor once;
/// indegree counts every edge, duplicates included.
#[derive(Debug)]
pub(crate) struct FlowGraph<'a> {
    ids: Vec<&'a str>,
    successors: Vec<Vec<usize>>,
    indegree: Vec<usize>,
}

impl<'a> FlowGraph<'a> {
    pub(crate) fn build(ir: &'a IntermediateRepresentation) -> Self {
        let mut graph = Self {
            ids: Vec::with_capacity(ir.nodes().len()),
            successors: Vec::with_capacity(ir.nodes().len()),
            indegree: Vec::with_capacity(ir.nodes().len()),
        };
        let mut index: AHashMap<&'a str, usize> = AHashMap::with_capacity(ir.nodes().len());

        for node in ir.nodes() {
            graph.intern(&mut index, node.id());
        }
        for edge in ir.edges() {
            let source = graph.intern(&mut index, edge.source());
            let target = graph.intern(&mut index, edge.target());
            graph.successors[source].push(target);
            graph.indegree[target] += 1;
        }
        for targets in &mut graph.successors {
            targets.sort_unstable();
            targets.dedup();
        }
        graph
    }

    fn intern(&mut self, index: &mut AHashMap<&'a str, usize>, id: &'a str) -> usize {
        *index.entry(id).or_insert_with(|| {
            self.ids.push(id);
            self.successors.push(Vec::new());
            self.indegree.push(0);
            self.ids.len() - 1
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn id(&self, index: usize) -> &'a str {
        self.ids[index]
    }

    pub(crate) fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    pub(crate) fn indegree(&self, index: usize) -> usize {
        self.indegree[index]
    }

    /// True when any node fans out to more than one target or is fed by more
    /// than one edge.
    pub(crate) fn has_branching(&self) -> bool {
        (0..self.len()).any(|i| self.successors(i).len() > 1 || self.indegree(i) > 1)
    }
}
