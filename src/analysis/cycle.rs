use super::adjacency::FlowGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Not yet visited.
    White,
    /// On the current exploration path.
    Gray,
    /// Fully explored; cannot lead back into the current path.
    Black,
}

/// Searches the whole graph for a directed cycle.
///
/// Iterative depth-first search with an explicit work stack of
/// `(node, next successor position)` frames, started from every unvisited node
/// so disconnected components are covered. Returns the index of the node whose
/// revisit closed the cycle.
pub(crate) fn find_cycle(graph: &FlowGraph<'_>) -> Option<usize> {
    let mut marks = vec![Mark::White; graph.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..graph.len() {
        if marks[root] != Mark::White {
            continue;
        }
        marks[root] = Mark::Gray;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            match graph.successors(node).get(cursor) {
                Some(&next) => {
                    frame.1 += 1;
                    match marks[next] {
                        Mark::Gray => return Some(next),
                        Mark::White => {
                            marks[next] = Mark::Gray;
                            stack.push((next, 0));
                        }
                        Mark::Black => {}
                    }
                }
                None => {
                    marks[node] = Mark::Black;
                    stack.pop();
                }
            }
        }
    }
    None
}
