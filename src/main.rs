mod fetch;
mod pipeline;
mod predict;
mod registry;
mod scene;
mod web;

use askama::Template;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::pipeline::{build_scene, parse_start, SceneRequest, DEFAULT_DAYS, DEFAULT_STEP_MINUTES};
use crate::predict::ReferenceFrame;
use crate::registry::SatelliteRegistry;
use crate::web::ui::templates::StandaloneTemplate;
use crate::web::{AppState, Config};

#[derive(Parser)]
#[command(name = "gati")]
#[command(about = "Animated 3D satellite orbits from the latest TLEs")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive visualization
    Serve,
    /// Check the configuration and list the satellites
    Validate,
    /// Render one scene to a standalone HTML file
    Export {
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u32,
        #[arg(long, default_value_t = DEFAULT_STEP_MINUTES)]
        step_minutes: u32,
        /// Start date (YYYY-MM-DD, UTC); defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Reference frame: inertial or earth_fixed
        #[arg(long, value_enum, default_value_t = ReferenceFrame::Inertial)]
        frame: ReferenceFrame,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve(&cli.config).await,
        Commands::Validate => validate(&cli.config),
        Commands::Export {
            out,
            days,
            step_minutes,
            start,
            frame,
        } => export(&cli.config, &out, days, step_minutes, start, frame).await,
    }
}

fn load_state(path: &Path) -> Option<AppState> {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path.display(), e);
            return None;
        }
    };
    match AppState::from_config(config) {
        Ok(state) => Some(state),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

async fn serve(path: &Path) -> ExitCode {
    let Some(state) = load_state(path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match SatelliteRegistry::from_file(&config.satellites_file) {
        Ok(registry) => {
            println!("Configuration is valid ({} satellites)", registry.len());
            for (i, sat) in registry.satellites().iter().enumerate() {
                println!("  {}: {} (CATNR {})", i + 1, sat.name, sat.norad_id);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "Error in satellites file {}: {}",
                config.satellites_file.display(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

async fn export(
    path: &Path,
    out: &Path,
    days: u32,
    step_minutes: u32,
    start: Option<String>,
    frame: ReferenceFrame,
) -> ExitCode {
    let Some(state) = load_state(path) else {
        return ExitCode::FAILURE;
    };

    let mut request = SceneRequest {
        days,
        step_minutes,
        frame,
        ..SceneRequest::default()
    };
    if let Some(start) = start {
        match parse_start(&start) {
            Ok(s) => request.start = s,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut fetcher = state.fetcher.lock().await;
    let outcome = match build_scene(&state.registry, &mut *fetcher, &request).await {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for warning in &outcome.warnings {
        eprintln!("Warning: {}: {}", warning.satellite, warning.message);
    }

    let figure_json = match serde_json::to_string(&outcome.figure) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing figure: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let page = StandaloneTemplate {
        title: format!("GATI: {} satellites", outcome.satellites.len()),
        figure_json,
        notice: outcome.notice.clone(),
        warnings: outcome
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.satellite, w.message))
            .collect(),
    };

    let html = match page.render() {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error rendering page: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(out, html) {
        eprintln!("Error writing {}: {}", out.display(), e);
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} frames for {} to {}",
        outcome.frame_count(),
        outcome.satellites.join(", "),
        out.display()
    );
    ExitCode::SUCCESS
}
