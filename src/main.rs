//! pathpost CLI - G-code from toolpath descriptors

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pathpost::{
    init_logging, load_gcode_config, parse_toolpaths, GcodeConfig, GenerateJob, Settings,
    Validation,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pathpost")]
#[command(about = "Turn laser and CNC toolpath descriptors into G-code", long_about = None)]
#[command(version = LONG_VERSION)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate G-code from one or more toolpath files
    Generate(GenerateArgs),
    /// Print the settings in effect and where they came from
    Settings {
        /// Settings file (default: platform config dir)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Toolpath JSON files, generated in order
    #[arg(short, long = "toolpath", required = true)]
    toolpaths: Vec<PathBuf>,

    /// G-code config file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settings file (default: platform config dir)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Machine profile from the settings file
    #[arg(short, long)]
    profile: Option<String>,

    /// Reject descriptors instead of writing best-effort output
    #[arg(long)]
    strict: bool,

    /// Prepend the fixed power preamble when the config enables it
    #[arg(long)]
    fixed_power: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(level, cli.log_json)?;

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Settings { settings } => show_settings(settings.as_deref()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => {
            let path = Settings::default_path()?;
            Ok(Settings::load_or_default(&path)?)
        }
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let mut options = settings.generator_options(args.profile.as_deref())?;
    if args.strict {
        options.validation = Validation::Strict;
    }

    let config = match &args.config {
        Some(path) => load_gcode_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GcodeConfig::new(),
    };

    let mut toolpaths = Vec::new();
    for path in &args.toolpaths {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed = parse_toolpaths(&json)
            .with_context(|| format!("Invalid toolpath file {}", path.display()))?;
        tracing::debug!(path = %path.display(), descriptors = parsed.len(), "Read toolpaths");
        toolpaths.extend(parsed);
    }

    let job = GenerateJob {
        toolpaths,
        config,
        options,
        fixed_power: args.fixed_power,
    };
    let gcode = job.run()?;

    match &args.output {
        Some(path) => std::fs::write(path, format!("{}\n", gcode))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", gcode)?;
        }
    }
    Ok(())
}

fn show_settings(path: Option<&Path>) -> Result<()> {
    let settings = load_settings(path)?;
    let source = match path {
        Some(path) => path.to_path_buf(),
        None => Settings::default_path()?,
    };
    println!("# {}", source.display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
