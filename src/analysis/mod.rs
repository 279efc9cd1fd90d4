//! Structural classification of a flow graph.
//!
//! The classifier decides which code-generation strategy a flow needs: a plain
//! chain for linear flows, or a graph runtime once the flow branches or loops.

mod adjacency;
mod cycle;

use crate::ir::IntermediateRepresentation;
use adjacency::FlowGraph;
use serde::Serialize;
use std::fmt;

/// High-level shape of a flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPattern {
    Linear,
    Branching,
    Cyclic,
}

/// Downstream target suggested by the flow shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRecommendation {
    /// Sequential chain / pipeline project.
    Chain,
    /// Graph-execution project with explicit nodes and edges.
    Graph,
}

/// Summary of the structural characteristics of a flow.
///
/// `has_cycles` and `has_branching` are kept for diagnostics even when
/// `pattern` already implies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowAnalysis {
    pub pattern: FlowPattern,
    pub recommended_target: TargetRecommendation,
    pub has_cycles: bool,
    pub has_branching: bool,
}

impl FlowPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowPattern::Linear => "linear",
            FlowPattern::Branching => "branching",
            FlowPattern::Cyclic => "cyclic",
        }
    }
}

impl fmt::Display for FlowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TargetRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetRecommendation::Chain => "chain",
            TargetRecommendation::Graph => "graph",
        }
    }
}

impl fmt::Display for TargetRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FlowAnalysis {
    /// Applies the decision precedence: cycles, then branching, then linear.
    fn classify(has_cycles: bool, has_branching: bool) -> Self {
        let (pattern, recommended_target) = if has_cycles {
            (FlowPattern::Cyclic, TargetRecommendation::Graph)
        } else if has_branching {
            (FlowPattern::Branching, TargetRecommendation::Graph)
        } else {
            (FlowPattern::Linear, TargetRecommendation::Chain)
        };
        Self {
            pattern,
            recommended_target,
            has_cycles,
            has_branching,
        }
    }
}

/// Analyzes an IR and classifies its flow pattern. Total and side-effect free.
pub fn analyze_flow(ir: &IntermediateRepresentation) -> FlowAnalysis {
    let graph = FlowGraph::build(ir);
    let has_branching = graph.has_branching();
    let cycle_at = cycle::find_cycle(&graph);

    if let Some(index) = cycle_at {
        tracing::debug!(flow_id = %ir.flow_id(), node = %graph.id(index), "cycle detected");
    }

    let analysis = FlowAnalysis::classify(cycle_at.is_some(), has_branching);
    tracing::debug!(
        flow_id = %ir.flow_id(),
        pattern = %analysis.pattern,
        target = %analysis.recommended_target,
        "classified flow"
    );
    analysis
}
