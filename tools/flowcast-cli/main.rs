use clap::{Parser, Subcommand};
use flowcast::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Classifies dataflow graph exports and scaffolds projects from them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every command that resolves settings.
#[derive(clap::Args, Debug, Clone)]
struct SettingsArgs {
    /// Directory for generated artifacts
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to a flowcast.yaml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject edges whose endpoints reference undeclared nodes
    #[arg(long)]
    strict_endpoints: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an export into a scaffolded project
    Convert {
        /// Path to the exported flow JSON file
        source: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Replace existing files whose content differs
        #[arg(long)]
        overwrite: bool,

        /// Report what would change without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Accept exports of any schema version
        #[arg(long)]
        any_version: bool,

        /// Skip writing conversion_report.md / conversion_report.json
        #[arg(long)]
        no_report: bool,
    },
    /// Classify an export without generating anything
    Analyze {
        /// Path to the exported flow JSON file
        source: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Show the resolved configuration for the current invocation
    Configure {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            source,
            settings,
            overwrite,
            dry_run,
            any_version,
            no_report,
        } => run_convert(&source, &settings, overwrite, dry_run, any_version, no_report),
        Command::Analyze { source, settings } => run_analyze(&source, &settings),
        Command::Configure { settings } => run_configure(&settings),
    }
}

fn resolve_settings(args: &SettingsArgs) -> Settings {
    // An explicit config path wins; otherwise look next to the working directory.
    let search_paths = match &args.config {
        Some(_) => Vec::new(),
        None => std::env::current_dir().map(|dir| vec![dir]).unwrap_or_default(),
    };
    Settings::from_sources(SettingsSources {
        output_dir: args.output_dir.clone(),
        config_file: args.config.clone(),
        search_paths,
        strict_endpoints: args.strict_endpoints.then_some(true),
    })
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e)))
}

fn run_convert(
    source: &Path,
    settings_args: &SettingsArgs,
    overwrite: bool,
    dry_run: bool,
    any_version: bool,
    no_report: bool,
) {
    let start = Instant::now();
    let settings = resolve_settings(settings_args);
    let parse_options = if any_version {
        ParseOptions::any_version()
    } else {
        ParseOptions::default()
    };

    let converter = Converter::builder(settings)
        .with_parse_options(parse_options)
        .overwrite(overwrite)
        .dry_run(dry_run)
        .build();

    let result = match converter.convert_file(source) {
        Ok(result) => result,
        Err(ConvertError::Scaffold(error)) => {
            eprintln!("\nError: {}", error);
            if let Some(progress) = error.progress() {
                print_progress(progress);
            }
            std::process::exit(1);
        }
        Err(e) => exit_with_error(&format!("Conversion failed: {}", e)),
    };

    println!(
        "Flow '{}' classified as {} -> {} project",
        result.flow_id, result.analysis.pattern, result.analysis.recommended_target
    );
    println!("Project root: {}", result.project_root.display());
    for write in &result.writes {
        println!("  {:<12} {}", write.status, write.path.display());
    }

    let report = ConversionReport::from_result(&result);
    if !no_report && !dry_run {
        match report.write(None) {
            Ok(artifacts) => println!(
                "\nReports written to '{}' and '{}'",
                artifacts.markdown.display(),
                artifacts.json.display()
            ),
            Err(e) => exit_with_error(&format!("Failed to write report: {}", e)),
        }
    }

    println!("\n--- Summary ---");
    for (status, count) in report.counts() {
        println!("{:<14}{}", status, count);
    }
    println!("Total time:   {:?}", start.elapsed());
}

fn run_analyze(source: &Path, settings_args: &SettingsArgs) {
    let settings = resolve_settings(settings_args);
    let document = parse_export_file(source, &settings, &ParseOptions::default())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse export: {}", e)));
    let ir = build_intermediate_representation(&document);

    if settings.endpoint_policy == EndpointPolicy::Strict {
        if let Err(e) = ir.validate_endpoints() {
            exit_with_error(&e.to_string());
        }
    }

    let analysis = analyze_flow(&ir);
    println!("Flow:          {} ({})", ir.display_name(), ir.flow_id());
    println!("Nodes / edges: {} / {}", ir.nodes().len(), ir.edges().len());
    println!("Pattern:       {}", analysis.pattern);
    println!("Target:        {}", analysis.recommended_target);
    println!("Has cycles:    {}", analysis.has_cycles);
    println!("Has branching: {}", analysis.has_branching);
}

fn run_configure(settings_args: &SettingsArgs) {
    let settings = resolve_settings(settings_args);
    println!("output_dir={}", settings.resolve_output_dir(None).display());
    match &settings.config_file {
        Some(path) => println!("config_file={}", path.display()),
        None => println!("config_file=<none>"),
    }
    println!("strict_endpoints={}", settings.endpoint_policy == EndpointPolicy::Strict);
}

fn print_progress(progress: &BatchProgress) {
    let changed: Vec<_> = progress.changed_on_disk().collect();
    if !changed.is_empty() {
        eprintln!("Already changed on disk:");
        for write in changed {
            eprintln!("  {:<12} {}", write.status, write.path.display());
        }
    }
    if !progress.not_reached.is_empty() {
        eprintln!("Not processed:");
        for path in &progress.not_reached {
            eprintln!("  {}", path.display());
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
