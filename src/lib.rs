//! # Flowcast - Flow Classification and Project Scaffolding
//!
//! **Flowcast** takes a dataflow graph export (nodes, directed edges and
//! per-node configuration), classifies its structure, and scaffolds a source
//! project for it. Generated files are written idempotently: re-running a
//! conversion against its own output is a no-op, and diverging files are never
//! replaced without explicit permission.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: Read an export into a `FlowDocument`, either with
//!     `export::parse_export_file` or through your own `IntoDocument` impl.
//! 2.  **Build the IR**: `build_intermediate_representation` normalizes the
//!     document into immutable graph entities.
//! 3.  **Analyze**: `analyze_flow` detects cycles and branching and recommends a
//!     target (a chain project for linear flows, a graph project otherwise).
//! 4.  **Generate & Write**: the matching `ProjectGenerator` yields file
//!     descriptors, and a `ScaffoldWriter` persists them, reporting one
//!     `WriteStatus` per file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowcast::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let settings = Settings::default().with_output_dir("dist");
//!     let converter = Converter::builder(settings).overwrite(false).build();
//!
//!     let result = converter.convert_file(Path::new("flows/basic_prompting.json"))?;
//!     println!("{} -> {}", result.flow_id, result.analysis.pattern);
//!     for write in &result.writes {
//!         println!("  {:<12} {}", write.status, write.path.display());
//!     }
//!
//!     let artifacts = ConversionReport::from_result(&result).write(None)?;
//!     println!("Report: {}", artifacts.markdown.display());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod generate;
pub mod ir;
pub mod naming;
pub mod prelude;
pub mod report;
pub mod scaffold;
pub mod secrets;
