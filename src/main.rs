// ABOUTME: Main entry point for the revealprez program.
// ABOUTME: Provides CLI interface and runs one build or a watch session.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;

use revealprez::{BuildConfig, BuildOrchestrator, PrezError, WatchConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds your presentation
    Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Input directory
    #[arg(long)]
    input_dir: PathBuf,

    /// Output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Separator for slides in presentation
    #[arg(long)]
    separator: Option<String>,

    /// Regex whose single capture group names a file to embed
    #[arg(long)]
    embed_pattern: Option<String>,

    /// Presentation filename
    #[arg(long)]
    filename: Option<String>,

    /// Directory containing all the assets to include
    #[arg(long)]
    assets_dir: Option<String>,

    /// Watch the input directory and rebuild on changes
    #[arg(long)]
    watcher: bool,

    /// What version of reveal.js to grab
    #[arg(long)]
    revealjs_version: Option<String>,

    /// Minimum milliseconds between two rebuilds in watch mode
    #[arg(long)]
    debounce_ms: Option<u64>,
}

impl BuildArgs {
    fn into_config(self) -> BuildConfig {
        let defaults = BuildConfig::from_env();
        BuildConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            separator: self.separator.unwrap_or(defaults.separator),
            embed_pattern: self.embed_pattern.unwrap_or(defaults.embed_pattern),
            filename: self.filename.unwrap_or(defaults.filename),
            assets_dir: self.assets_dir.unwrap_or(defaults.assets_dir),
            revealjs_version: self.revealjs_version.unwrap_or(defaults.revealjs_version),
            debounce_ms: self.debounce_ms.unwrap_or(defaults.debounce_ms),
            watch: self.watcher,
            ..defaults
        }
    }
}

fn run_build(args: BuildArgs) -> anyhow::Result<()> {
    let config = args.into_config().resolve()?;
    println!("Input directory: {}", config.input_dir.display());
    println!("Output directory: {}", config.output_dir.display());

    let orchestrator = BuildOrchestrator::remote(config)?;

    if orchestrator.config().watch {
        let watch_config = WatchConfig::for_orchestrator(&orchestrator);
        revealprez::watch(&orchestrator, watch_config).context("watch mode stopped")?;
    } else {
        let report = orchestrator.build().context("build failed")?;
        println!(
            "Presentation generated successfully: {} slides in {}",
            report.slides,
            report.index_path.display()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build(args)) => run_build(args),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        let config_error = e
            .downcast_ref::<PrezError>()
            .map(PrezError::is_config_error)
            .unwrap_or(false);
        std::process::exit(if config_error { 2 } else { 1 });
    }
}
