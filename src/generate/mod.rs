//! Project generators that turn an analyzed flow into file descriptors.
//!
//! Generators never touch disk; they return `GeneratedFile`s for the scaffold
//! writer to persist.

mod chain;
mod graph;
mod shared;

pub use chain::ChainGenerator;
pub use graph::GraphGenerator;

use crate::analysis::{FlowPattern, TargetRecommendation};
use crate::error::ScaffoldError;
use crate::ir::IntermediateRepresentation;
use crate::naming::slugify;
use crate::secrets::DetectedSecret;

/// Everything a generator needs besides the IR itself.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub package_name: String,
    pub secrets: &'a [DetectedSecret],
}

/// Defines the contract for producing a scaffold for one target.
pub trait ProjectGenerator {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn target(&self) -> TargetRecommendation;

    fn supports(&self, pattern: FlowPattern) -> bool;

    /// Slug used for package and directory names when the flow provides none.
    fn default_slug(&self) -> &'static str;

    /// Package name derived from the flow.
    fn package_name(&self, ir: &IntermediateRepresentation) -> String {
        slugify(ir.flow_id(), self.default_slug())
    }

    /// Produces the ordered file list for the project.
    fn generate(
        &self,
        ir: &IntermediateRepresentation,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<crate::scaffold::GeneratedFile>, ScaffoldError>;
}

/// Maps a target recommendation to its generator.
pub fn generator_for(target: TargetRecommendation) -> Box<dyn ProjectGenerator> {
    match target {
        TargetRecommendation::Chain => Box::new(ChainGenerator),
        TargetRecommendation::Graph => Box::new(GraphGenerator),
    }
}
