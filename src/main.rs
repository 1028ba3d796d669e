// LogLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading (platform default or --config) and port resolution
// 3. Logging initialisation (debug mode support)
// 4. Either the HTTP service or a one-shot analysis of a local file

use clap::{Args, Parser, Subcommand};
use loglens::app::server;
use loglens::app::state::AppState;
use loglens::core::aggregate::aggregate;
use loglens::core::analysis::Analyzer;
use loglens::core::export::{export, ExportFormat};
use loglens::core::filter::{filter_entries, CategoryFilter};
use loglens::core::level::LogLevel;
use loglens::core::model::CategorizerMode;
use loglens::platform::config::{self, AppConfig, PlatformPaths};
use loglens::platform::fs::{create_export_file, read_log_file};
use loglens::platform::storage::FsUploadStore;
use loglens::util;
use loglens::util::error::LogLensError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

/// LogLens - Categorise game-engine logs by their `Log<Category>:` prefix.
///
/// Serve an upload/filter web UI, or analyse a single file from the shell.
#[derive(Parser, Debug)]
#[command(name = "LogLens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Config file to load instead of the platform default. Must exist.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),

    /// Categorise a local log file and print per-category counts.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on (overrides PORT and the config file).
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,

    /// Address to bind.
    #[arg(short = 'b', long = "bind")]
    bind: Option<IpAddr>,

    /// Directory uploads are kept in.
    #[arg(short = 'u', long = "upload-dir")]
    upload_dir: Option<PathBuf>,

    /// Categorisation mode.
    #[arg(short = 'm', long = "mode")]
    mode: Option<CategorizerMode>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Log file to analyse.
    file: PathBuf,

    /// Categorisation mode.
    #[arg(short = 'm', long = "mode")]
    mode: Option<CategorizerMode>,

    /// Keep only this category (repeatable). Default: all.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Keep only entries at this level: Display, Warning or Error (repeatable).
    #[arg(short = 'l', long = "level")]
    levels: Vec<LogLevel>,

    /// Keep only entries whose content contains this text (case-insensitive).
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Write the kept entries to a .csv or .json file.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let defaults = AppConfig::for_platform(&platform_paths);

    let (app_config, config_warnings) = match cli.config.as_deref() {
        Some(path) => match config::load_config_strict(path, defaults) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {}", LogLensError::from(e));
                std::process::exit(2);
            }
        },
        None => config::load_config(&platform_paths.config_file(), defaults),
    };

    // Initialise logging subsystem
    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogLens starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let result = match cli.command {
        Command::Serve(args) => run_serve(args, app_config),
        Command::Analyze(args) => run_analyze(args, app_config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "LogLens exited with an error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_serve(args: ServeArgs, mut app_config: AppConfig) -> Result<(), LogLensError> {
    let env_port = std::env::var(util::constants::PORT_ENV_VAR).ok();
    let (port, port_warning) = config::resolve_port(args.port, env_port.as_deref(), app_config.port);
    if let Some(warning) = port_warning {
        tracing::warn!("{}", warning);
    }
    app_config.port = port;

    if let Some(bind) = args.bind {
        app_config.bind = bind;
    }
    if let Some(dir) = args.upload_dir {
        app_config.upload_dir = dir;
    }
    if let Some(mode) = args.mode {
        app_config.mode = mode;
    }

    let store = FsUploadStore::open(&app_config.upload_dir)?;
    tracing::info!(
        upload_dir = %store.dir().display(),
        mode = %app_config.mode,
        "Upload store opened"
    );

    let state = AppState::new(
        Analyzer::for_mode(app_config.mode),
        Arc::new(store),
        app_config.max_upload_bytes,
    );
    let addr = SocketAddr::new(app_config.bind, app_config.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| LogLensError::Server {
            addr: addr.to_string(),
            source: e,
        })?;

    runtime.block_on(server::serve(state, addr))
}

fn run_analyze(args: AnalyzeArgs, app_config: AppConfig) -> Result<(), LogLensError> {
    let mode = args.mode.unwrap_or(app_config.mode);
    let analyzer = Analyzer::for_mode(mode);

    // Reject a bad export path before doing any work.
    let export_format = args
        .export
        .as_deref()
        .map(ExportFormat::from_path)
        .transpose()?;

    let raw = read_log_file(&args.file)?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let report = analyzer.upload(&raw, &name);
    let filter = CategoryFilter::new(args.categories)
        .with_levels(args.levels)
        .with_search(args.search.as_deref().unwrap_or_default());
    let kept = filter_entries(report.entries, &filter);

    println!(
        "{}: {} lines, {} categorised entries ({} mode)",
        report.filename,
        report.lines_processed,
        report.log_types.iter().map(|c| c.count).sum::<usize>(),
        mode
    );
    for count in &report.log_types {
        println!("  {:<32} {:>8}", count.category, count.count);
    }
    println!(
        "Levels: Display {}, Warning {}, Error {}",
        report.log_levels.display, report.log_levels.warning, report.log_levels.error
    );
    if !filter.is_empty() {
        let selected = aggregate(&kept);
        println!("Selected: {} entries across {} categories", kept.len(), selected.len());
    }

    if let (Some(path), Some(format)) = (args.export.as_deref(), export_format) {
        let writer = create_export_file(path)?;
        let written = export(&kept, format, writer, path)?;
        tracing::info!(path = %path.display(), written, "Export complete");
        println!("Exported {written} entries to {}", path.display());
    }

    Ok(())
}
