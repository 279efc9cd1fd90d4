use super::shared::{common_files, package_path, py_str, pyproject, readme};
use super::{GenerationContext, ProjectGenerator};
use crate::analysis::{FlowPattern, TargetRecommendation};
use crate::error::ScaffoldError;
use crate::ir::IntermediateRepresentation;
use crate::naming::slugify;
use crate::scaffold::GeneratedFile;
use ahash::AHashSet;
use itertools::Itertools;
use std::path::PathBuf;

/// Generates a graph-execution project for branching or cyclic flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphGenerator;

impl ProjectGenerator for GraphGenerator {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn target(&self) -> TargetRecommendation {
        TargetRecommendation::Graph
    }

    fn supports(&self, pattern: FlowPattern) -> bool {
        matches!(pattern, FlowPattern::Branching | FlowPattern::Cyclic)
    }

    fn default_slug(&self) -> &'static str {
        "flowcast_graph"
    }

    /// Graph projects are named after the display name rather than the id.
    fn package_name(&self, ir: &IntermediateRepresentation) -> String {
        slugify(ir.display_name(), self.default_slug())
    }

    fn generate(
        &self,
        ir: &IntermediateRepresentation,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<GeneratedFile>, ScaffoldError> {
        let package = context.package_name.as_str();
        let mut files = vec![
            GeneratedFile::new(
                "pyproject.toml",
                pyproject(package, "Auto-generated graph project", "langgraph>=0.0.40"),
            )?,
            GeneratedFile::new(
                package_path(package, &["__init__.py"]),
                "__all__ = ['build_graph', 'iter_edges']\n",
            )?,
            GeneratedFile::new(
                package_path(package, &["graphs", "__init__.py"]),
                "from .main_graph import build_graph, iter_edges\n",
            )?,
            GeneratedFile::new(
                package_path(package, &["graphs", "main_graph.py"]),
                main_graph(ir),
            )?,
            GeneratedFile::new(
                package_path(package, &["nodes", "__init__.py"]),
                "\"\"\"Node handlers for the generated graph.\"\"\"\n\n__all__: list[str] = []\n",
            )?
            .with_todos(["Implement node-level handlers for the graph"]),
            GeneratedFile::new(package_path(package, &["state.py"]), STATE_MODULE)?
                .with_todos(["Define structured state for graph execution"]),
            GeneratedFile::new(
                PathBuf::from("tests").join("smoke").join("test_flow.py"),
                smoke_test(package),
            )?,
            GeneratedFile::new(
                "README.md",
                readme(
                    ir,
                    "graph",
                    &[
                        "`graphs/`: node and edge wiring for the flow",
                        "`nodes/`: per-node handlers",
                        "`state.py`: shared execution state",
                        "`tools/`: wrappers for external integrations",
                        "`config/`: environment-driven settings",
                    ],
                ),
            )?,
        ];
        files.extend(common_files(ir, package, context.secrets, "graph")?);
        Ok(files)
    }
}

const STATE_MODULE: &str = r#""""Execution state shared between graph nodes."""

from typing import Any, TypedDict


class GraphState(TypedDict, total=False):
    """Mutable state passed along the graph edges."""

    message: str
    context: dict[str, Any]
"#;

fn main_graph(ir: &IntermediateRepresentation) -> String {
    let nodes = ir
        .nodes()
        .iter()
        .map(|node| format!("    ({}, {}),", py_str(node.id()), py_str(node.node_type())))
        .join("\n");
    let edges = ir
        .edges()
        .iter()
        .map(|edge| format!("    ({}, {}),", py_str(edge.source()), py_str(edge.target())))
        .join("\n");

    let targets: AHashSet<&str> = ir.edges().iter().map(|e| e.target()).collect();
    let entry_points = ir
        .nodes()
        .iter()
        .map(|n| n.id())
        .filter(|id| !targets.contains(id))
        .map(py_str)
        .join(", ");

    format!(
        r#""""Graph wiring generated from flow {flow_id}."""

from collections.abc import Iterator

NODES: list[tuple[str, str]] = [
{nodes}
]

EDGES: list[tuple[str, str]] = [
{edges}
]

ENTRY_POINTS: list[str] = [{entry_points}]


def build_graph() -> dict[str, list[str]]:
    """Return the adjacency list of the flow."""

    graph: dict[str, list[str]] = {{node_id: [] for node_id, _ in NODES}}
    for source, target in EDGES:
        graph.setdefault(source, []).append(target)
    return graph


def iter_edges() -> Iterator[tuple[str, str]]:
    """Yield every edge of the flow in declaration order."""

    yield from EDGES
"#,
        flow_id = ir.flow_id(),
        nodes = nodes,
        edges = edges,
        entry_points = entry_points
    )
}

fn smoke_test(package: &str) -> String {
    format!(
        r#"from {package}.graphs.main_graph import build_graph, iter_edges


def test_build_graph_covers_edges() -> None:
    graph = build_graph()
    for source, target in iter_edges():
        assert target in graph[source]
"#
    )
}
