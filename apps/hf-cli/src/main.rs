use clap::{Args, Parser, Subcommand};
use hf_core::UnitSystem;
use hf_translate::{
    AppError, AppResult, Severity, Translation, load_project, resolve_options, translate_project,
    validate_project,
};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "hvacflow CLI - HVAC topology translation tool", long_about = None)]
struct Cli {
    /// Log every diagnostic and per-system progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List systems in a project
    Systems {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Translate a project and report diagnostics
    Translate {
        #[command(flatten)]
        run: RunArgs,
        /// Write the model summary as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Translate a project and print the model summary as JSON
    Summary {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to the project YAML or JSON file
    project_path: PathBuf,
    /// Leave every capacity and flow autosized
    #[arg(long)]
    autosize: bool,
    /// Units of the input numbers (IP or SI); defaults to the document's
    #[arg(long, value_parser = parse_units)]
    units: Option<UnitSystem>,
}

fn parse_units(text: &str) -> Result<UnitSystem, String> {
    UnitSystem::parse(text).ok_or_else(|| format!("unknown unit system '{text}', expected IP or SI"))
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Systems { project_path } => cmd_systems(&project_path),
        Commands::Translate { run, output } => cmd_translate(&run, output.as_deref()),
        Commands::Summary { run } => cmd_summary(&run),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let findings = validate_project(project_path)?;
    for finding in &findings {
        println!("  warning: {finding}");
    }
    println!("✓ Project is valid ({} warning(s))", findings.len());
    Ok(())
}

fn cmd_systems(project_path: &Path) -> AppResult<()> {
    let root = load_project(project_path)?;
    let systems: Vec<_> = root
        .children
        .iter()
        .filter(|c| matches!(c.tag.as_str(), "FluidSys" | "AirSys" | "ZnSys"))
        .collect();

    if systems.is_empty() {
        println!("No systems found in project");
    } else {
        println!("Systems in project:");
        for sys in systems {
            println!(
                "  {} - {} ({}, {} sub-records)",
                sys.tag,
                sys.label(),
                sys.get_string("Type").unwrap_or("no type"),
                sys.children.len()
            );
        }
    }
    Ok(())
}

fn run(args: &RunArgs) -> AppResult<Translation> {
    let root = load_project(&args.project_path)?;
    let options = resolve_options(&root, args.autosize.then_some(true), args.units);
    Ok(translate_project(&root, options))
}

fn cmd_translate(args: &RunArgs, output: Option<&Path>) -> AppResult<()> {
    println!("Translating project: {}", args.project_path.display());
    let translation = run(args)?;

    for d in translation.diagnostics.entries() {
        let tag = match d.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("  {tag}: {}: {}", d.subject, d.message);
    }

    let model = &translation.model;
    println!("  Plant loops: {}", model.plant_loops.len());
    println!("  Air loops:   {}", model.air_loops.len());
    println!("  Zones:       {}", model.zones.len());
    println!("  Nodes:       {}", model.graph.nodes().len());
    println!("  Setpoint managers: {}", model.overlays.len());

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&translation.summary())?;
        std::fs::write(path, json)?;
        println!("  Summary written to {}", path.display());
    }

    let errors = translation.diagnostics.count(Severity::Error);
    if errors > 0 {
        return Err(AppError::TranslationFailed { count: errors });
    }
    println!(
        "✓ Translation completed ({} warning(s))",
        translation.diagnostics.count(Severity::Warning)
    );
    Ok(())
}

fn cmd_summary(args: &RunArgs) -> AppResult<()> {
    let translation = run(args)?;
    let json = serde_json::to_string_pretty(&translation.summary())?;
    println!("{json}");
    Ok(())
}
