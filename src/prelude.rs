//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! flowcast crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowcast::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = parse_export_file(
//!     Path::new("flows/basic_prompting.json"),
//!     &Settings::default(),
//!     &ParseOptions::default(),
//! )?;
//! let ir = build_intermediate_representation(&document);
//! let analysis = analyze_flow(&ir);
//! println!("{} flow, recommended target: {}", analysis.pattern, analysis.recommended_target);
//! # Ok(())
//! # }
//! ```

// Pipeline stages
pub use crate::analysis::{FlowAnalysis, FlowPattern, TargetRecommendation, analyze_flow};
pub use crate::convert::{ConversionPlan, ConversionResult, Converter};
pub use crate::export::{
    ConfigMap, DocumentEdge, DocumentMetadata, DocumentNode, FlowDocument, IntoDocument,
    ParseOptions, parse_export_file, parse_export_str,
};
pub use crate::ir::{
    IntermediateRepresentation, IrEdge, IrMetadata, IrNode, build_intermediate_representation,
};

// Scaffolding
pub use crate::generate::{ChainGenerator, GraphGenerator, ProjectGenerator};
pub use crate::scaffold::{
    GeneratedFile, ProjectScaffoldWriter, ScaffoldWriter, WriteResult, WriteStatus,
};

// Settings and reporting
pub use crate::config::{EndpointPolicy, Settings, SettingsSources};
pub use crate::report::ConversionReport;

// Error types
pub use crate::error::{
    BatchProgress, ConfigError, ConvertError, ParseError, ReportError, ScaffoldError,
    ValidationError,
};

// Standard library re-exports commonly used with this crate
pub use std::path::{Path, PathBuf};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
