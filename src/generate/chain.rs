use super::shared::{common_files, package_path, py_str, pyproject, readme};
use super::{GenerationContext, ProjectGenerator};
use crate::analysis::{FlowPattern, TargetRecommendation};
use crate::error::ScaffoldError;
use crate::ir::IntermediateRepresentation;
use crate::scaffold::GeneratedFile;
use itertools::Itertools;
use std::path::PathBuf;

/// Generates a sequential chain project. Only linear flows are supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainGenerator;

impl ProjectGenerator for ChainGenerator {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn target(&self) -> TargetRecommendation {
        TargetRecommendation::Chain
    }

    fn supports(&self, pattern: FlowPattern) -> bool {
        pattern == FlowPattern::Linear
    }

    fn default_slug(&self) -> &'static str {
        "flowcast_chain"
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
                pyproject(package, "Auto-generated chain project", "langchain>=0.1"),
            )?,
            GeneratedFile::new(
                package_path(package, &["__init__.py"]),
                "__all__ = ['build_chain', 'run_chain']\n",
            )?,
            GeneratedFile::new(
                package_path(package, &["chains", "__init__.py"]),
                "from .main_chain import build_chain, run_chain\n",
            )?,
            GeneratedFile::new(
                package_path(package, &["chains", "main_chain.py"]),
                main_chain(ir),
            )?,
            GeneratedFile::new(
                package_path(package, &["prompts", "system_prompt.txt"]),
                format!(
                    "You are the orchestrator for the exported flow \"{}\".\nTailor this prompt to steer the chain behaviour.\n",
                    ir.display_name()
                ),
            )?
            .with_todos(["Author the system prompt for this flow"]),
            GeneratedFile::new(
                PathBuf::from("tests").join("smoke").join("test_flow.py"),
                smoke_test(package, ir),
            )?,
            GeneratedFile::new(
                "README.md",
                readme(
                    ir,
                    "chain",
                    &[
                        "`chains/`: sequential orchestration logic",
                        "`prompts/`: text assets powering the chain",
                        "`tools/`: wrappers for external integrations",
                        "`config/`: environment-driven settings",
                        "`.env.example`: template for environment secrets",
                    ],
                ),
            )?,
        ];
        files.extend(common_files(ir, package, context.secrets, "chain")?);
        Ok(files)
    }
}

fn main_chain(ir: &IntermediateRepresentation) -> String {
    let nodes = ir
        .nodes()
        .iter()
        .map(|node| format!("    {},", py_str(node.id())))
        .join("\n");
    format!(
        r#""""Chain stub generated from flow {flow_id}."""

from typing import Any

NODES: list[str] = [
{nodes}
]


def build_chain() -> list[str]:
    """Return the ordered list of node identifiers for this flow."""

    return NODES.copy()


def run_chain(message: str, *, debug: bool = False) -> dict[str, Any]:
    """Placeholder execution stub for the generated chain."""

    if debug:
        print("Running chain with message:", message)
    return {{"message": message}}
"#,
        flow_id = ir.flow_id(),
        nodes = nodes
    )
}

fn smoke_test(package: &str, ir: &IntermediateRepresentation) -> String {
    let first_node = ir.nodes().first().map(|n| n.id()).unwrap_or_default();
    format!(
        r#"from {package}.chains.main_chain import build_chain, run_chain


def test_build_chain_returns_nodes() -> None:
    chain = build_chain()
    assert {first} in chain or not chain


def test_run_chain_returns_payload() -> None:
    result = run_chain("hello")
    assert result["message"] == "hello"
"#,
        first = py_str(first_node)
    )
}
