//! Heuristic detection of secret-like values in node configuration.

use crate::ir::IntermediateRepresentation;
use crate::naming::slugify;
use ahash::AHashSet;
use itertools::Itertools;

/// Field-name fragments that mark a configuration value as a secret.
const SECRET_HINTS: &[&str] = &["api_key", "apikey", "token", "secret", "password", "auth", "key"];

/// A secret value found in a node's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSecret {
    /// Environment variable the generated project reads the value from.
    pub env_var: String,
    /// Settings attribute name derived from `env_var`.
    pub attribute: String,
    pub source_node: String,
    pub field: String,
    pub raw_value: String,
}

/// Returns the secrets detected in the IR, in node order and then field name order.
pub fn detect_secrets(ir: &IntermediateRepresentation) -> Vec<DetectedSecret> {
    let mut seen = AHashSet::new();
    let mut secrets = Vec::new();

    for node in ir.nodes() {
        let fields = node
            .config()
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b));
        for (field, value) in fields {
            let Some(raw_value) = value.as_str() else {
                continue;
            };
            if !looks_like_secret(field, raw_value) {
                continue;
            }
            let env_var = slugify(
                &format!("{}_{}_{}", ir.flow_id(), node.id(), field),
                "flowcast_secret",
            )
            .to_uppercase();
            if !seen.insert(env_var.clone()) {
                continue;
            }
            secrets.push(DetectedSecret {
                attribute: slugify(&env_var.to_lowercase(), "secret"),
                env_var,
                source_node: node.id().to_string(),
                field: field.clone(),
                raw_value: raw_value.to_string(),
            });
        }
    }

    if !secrets.is_empty() {
        tracing::debug!(flow_id = %ir.flow_id(), count = secrets.len(), "detected secrets");
    }
    secrets
}

fn looks_like_secret(field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    let field = field.to_lowercase();
    SECRET_HINTS.iter().any(|hint| field.contains(hint))
}
