//! Templates shared by the chain and graph generators.

use crate::error::ScaffoldError;
use crate::ir::IntermediateRepresentation;
use crate::scaffold::GeneratedFile;
use crate::secrets::DetectedSecret;
use itertools::Itertools;
use std::path::PathBuf;

/// Quotes a string as a Python literal.
pub(super) fn py_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

pub(super) fn package_path(package_name: &str, parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from("src");
    path.push(package_name);
    path.extend(parts);
    path
}

pub(super) fn pyproject(package_name: &str, description: &str, dependency: &str) -> String {
    format!(
        r#"[build-system]
requires = ["setuptools>=68"]
build-backend = "setuptools.build_meta"

[project]
name = "{}"
version = "0.0.0"
description = "{}"
requires-python = ">=3.11"
dependencies = ["{}"]
"#,
        package_name.replace('_', "-"),
        description,
        dependency
    )
}

pub(super) fn tools_init() -> &'static str {
    r#""""Tool adapters for the generated project."""

from typing import Any


def list_tools() -> list[str]:
    """Return the available tool identifiers."""

    return []


def resolve_tool(name: str) -> Any:
    """Resolve a tool by name."""

    raise KeyError(name)
"#
}

pub(super) fn tool_stub() -> &'static str {
    r#""""Base class for custom tool implementations."""

from abc import ABC, abstractmethod
from typing import Any


class GeneratedTool(ABC):
    """Extend this class to wrap exported tool nodes."""

    name: str = "flowcast_tool"

    @abstractmethod
    def run(self, *args: Any, **kwargs: Any) -> Any:
        """Execute the tool."""

        raise NotImplementedError
"#
}

pub(super) fn config_settings(secrets: &[DetectedSecret]) -> String {
    let (fields, assignments) = if secrets.is_empty() {
        (
            "    example_api_key: str | None".to_string(),
            "        example_api_key=os.getenv(\"EXAMPLE_API_KEY\"),".to_string(),
        )
    } else {
        (
            secrets
                .iter()
                .map(|s| format!("    {}: str | None", s.attribute))
                .join("\n"),
            secrets
                .iter()
                .map(|s| format!("        {}=os.getenv(\"{}\"),", s.attribute, s.env_var))
                .join("\n"),
        )
    };
    format!(
        r#""""Runtime settings for the generated project."""

from __future__ import annotations

import os
from dataclasses import dataclass


@dataclass(slots=True)
class Settings:
    """Container for environment-driven configuration."""

{fields}


def load_settings() -> Settings:
    """Load configuration from environment variables."""

    return Settings(
{assignments}
    )


settings = load_settings()
"#
    )
}

pub(super) fn env_example(secrets: &[DetectedSecret]) -> String {
    if secrets.is_empty() {
        return "# No secrets detected in the flow. Add environment variables as needed.\n"
            .to_string();
    }
    let mut lines = vec!["# Populate these secrets before deploying.".to_string()];
    for secret in secrets {
        lines.push(format!(
            "# Source: node {}, field {}",
            secret.source_node, secret.field
        ));
        lines.push(format!("{}=", secret.env_var));
    }
    lines.join("\n") + "\n"
}

pub(super) fn unit_test_config(package_name: &str, secrets: &[DetectedSecret]) -> String {
    let mut body = format!(
        r#"from {package_name}.config import settings


def test_settings_exposes_expected_attributes() -> None:
    assert settings is not None
"#
    );
    for secret in secrets {
        body.push_str(&format!(
            "    assert hasattr(settings, {})\n",
            py_str(&secret.attribute)
        ));
    }
    body
}

pub(super) fn readme(ir: &IntermediateRepresentation, kind: &str, structure: &[&str]) -> String {
    format!(
        "# {}\n\nAuto-generated {} project for flow `{}`.\n\n## Structure\n{}\n",
        ir.display_name(),
        kind,
        ir.flow_id(),
        structure.iter().map(|line| format!("- {}", line)).join("\n")
    )
}

/// Files both project layouts carry: tools, config, README and secrets template.
pub(super) fn common_files(
    ir: &IntermediateRepresentation,
    package_name: &str,
    secrets: &[DetectedSecret],
    todo_prefix: &str,
) -> Result<Vec<GeneratedFile>, ScaffoldError> {
    Ok(vec![
        GeneratedFile::new(package_path(package_name, &["tools", "__init__.py"]), tools_init())?
            .with_todos([format!("Wire exported {} tools into executable adapters", todo_prefix)]),
        GeneratedFile::new(package_path(package_name, &["tools", "base_tool.py"]), tool_stub())?,
        GeneratedFile::new(
            package_path(package_name, &["config", "__init__.py"]),
            "from .settings import settings\n",
        )?,
        GeneratedFile::new(
            package_path(package_name, &["config", "settings.py"]),
            config_settings(secrets),
        )?
        .with_todos([format!("Map {} configuration to real deployment values", todo_prefix)]),
        GeneratedFile::new(
            PathBuf::from("tests").join("unit").join("test_config.py"),
            unit_test_config(package_name, secrets),
        )?,
        GeneratedFile::new(".env.example", env_example(secrets))?
            .with_todos([format!("Set real {} secret values for deployment", todo_prefix)]),
        GeneratedFile::new(
            "flow_summary.md",
            format!(
                "Flow `{}` version {} with {} node(s) and {} edge(s).\n",
                ir.flow_id(),
                ir.version(),
                ir.nodes().len(),
                ir.edges().len()
            ),
        )?,
    ])
}
