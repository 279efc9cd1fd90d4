//! End-to-end conversion: document → IR → analysis → generator → writer.

use crate::analysis::{FlowAnalysis, analyze_flow};
use crate::config::{EndpointPolicy, Settings};
use crate::error::ConvertError;
use crate::export::{FlowDocument, ParseOptions, parse_export_file};
use crate::generate::{GenerationContext, ProjectGenerator, generator_for};
use crate::ir::{IntermediateRepresentation, build_intermediate_representation};
use crate::naming::slugify;
use crate::scaffold::{GeneratedFile, ProjectScaffoldWriter, ScaffoldWriter, WriteResult};
use crate::secrets::detect_secrets;
use std::path::{Path, PathBuf};

/// Everything decided about a conversion before any file is written.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub flow_id: String,
    pub analysis: FlowAnalysis,
    pub generator: &'static str,
    pub project_root: PathBuf,
    pub package_name: String,
    pub files: Vec<GeneratedFile>,
}

/// Summary of a single flow conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub flow_id: String,
    pub analysis: FlowAnalysis,
    pub project_root: PathBuf,
    pub package_name: String,
    pub writes: Vec<WriteResult>,
}

/// Runs conversions with a fixed set of settings and writer options.
#[derive(Debug, Clone)]
pub struct Converter {
    settings: Settings,
    parse_options: ParseOptions,
    overwrite: bool,
    dry_run: bool,
}

pub struct ConverterBuilder {
    settings: Settings,
    parse_options: ParseOptions,
    overwrite: bool,
    dry_run: bool,
}

impl ConverterBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            parse_options: ParseOptions::default(),
            overwrite: false,
            dry_run: false,
        }
    }
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
    pub fn build(self) -> Converter {
        Converter {
            settings: self.settings,
            parse_options: self.parse_options,
            overwrite: self.overwrite,
            dry_run: self.dry_run,
        }
    }
}

impl Converter {
    pub fn builder(settings: Settings) -> ConverterBuilder {
        ConverterBuilder::new(settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses an export file and converts it.
    pub fn convert_file(&self, source: &Path) -> Result<ConversionResult, ConvertError> {
        let document = parse_export_file(source, &self.settings, &self.parse_options)?;
        self.convert_document(&document)
    }

    /// Converts an already parsed document, writing with a `ProjectScaffoldWriter`.
    pub fn convert_document(&self, document: &FlowDocument) -> Result<ConversionResult, ConvertError> {
        let ir = build_intermediate_representation(document);
        let plan = self.plan(&ir)?;
        let writer = ProjectScaffoldWriter::new(&plan.project_root)
            .overwrite(self.overwrite)
            .dry_run(self.dry_run);
        execute(plan, &writer)
    }

    /// Validates, analyzes and generates without touching the filesystem.
    pub fn plan(&self, ir: &IntermediateRepresentation) -> Result<ConversionPlan, ConvertError> {
        if self.settings.endpoint_policy == EndpointPolicy::Strict {
            ir.validate_endpoints()?;
        }

        let analysis = analyze_flow(ir);
        let generator = generator_for(analysis.recommended_target);
        plan_with(ir, analysis, generator.as_ref())
    }
}

/// Builds a plan for `ir` using a specific generator.
pub fn plan_with(
    ir: &IntermediateRepresentation,
    analysis: FlowAnalysis,
    generator: &dyn ProjectGenerator,
) -> Result<ConversionPlan, ConvertError> {
    if !generator.supports(analysis.pattern) {
        return Err(ConvertError::UnsupportedPattern {
            generator: generator.name(),
            pattern: analysis.pattern,
        });
    }

    let project_root = ir
        .metadata()
        .output_dir()
        .join(slugify(ir.flow_id(), generator.default_slug()));
    let package_name = generator.package_name(ir);
    let secrets = detect_secrets(ir);
    let context = GenerationContext {
        package_name: package_name.clone(),
        secrets: &secrets,
    };
    let files = generator.generate(ir, &context)?;

    tracing::info!(
        flow_id = %ir.flow_id(),
        pattern = %analysis.pattern,
        generator = generator.name(),
        files = files.len(),
        "planned conversion"
    );

    Ok(ConversionPlan {
        flow_id: ir.flow_id().to_string(),
        analysis,
        generator: generator.name(),
        project_root,
        package_name,
        files,
    })
}

/// Persists a plan through the given writer.
pub fn execute(
    plan: ConversionPlan,
    writer: &dyn ScaffoldWriter,
) -> Result<ConversionResult, ConvertError> {
    let writes = writer.write_files(&plan.files)?;
    tracing::info!(
        flow_id = %plan.flow_id,
        root = %writer.root().display(),
        files = writes.len(),
        "conversion written"
    );
    Ok(ConversionResult {
        flow_id: plan.flow_id,
        analysis: plan.analysis,
        project_root: writer.root().to_path_buf(),
        package_name: plan.package_name,
        writes,
    })
}
