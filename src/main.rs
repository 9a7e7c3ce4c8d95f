//! ProjDash report: prints the dashboard view and risk board for the seed
//! portfolio as JSON.
//!
//! Usage: `projdash [--config PATH]`. Without `--config`, reads
//! `~/.projdash/config.json` and falls back to defaults when it is missing.

use std::path::PathBuf;

use serde::Serialize;

use projdash_lib::insights::default_engine;
use projdash_lib::risk::{risk_board, RiskBoardView};
use projdash_lib::state::{load_config, load_config_from_home};
use projdash_lib::{seed, Config, DashboardState, DashboardView, ViewCache};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    dashboard: &'a DashboardView,
    risk_board: RiskBoardView,
}

fn config_arg() -> anyhow::Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--config") => args
            .next()
            .map(|p| Some(PathBuf::from(p)))
            .ok_or_else(|| anyhow::anyhow!("--config needs a path")),
        Some(other) => Err(anyhow::anyhow!("Unknown argument: {other}")),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // An explicit path must load; the home config is optional.
    let config = match config_arg()? {
        Some(path) => load_config(&path)?,
        None => load_config_from_home().unwrap_or_else(|e| {
            log::warn!("{e}. Using default config.");
            Config::default()
        }),
    };

    let state = DashboardState::new(seed::projects(), config.default_filters.clone());
    let mut cache = ViewCache::new();
    let view = cache.view(&state, &config);

    let engine = default_engine();
    let board = risk_board(&view.projects, &config, &engine);

    let report = Report {
        dashboard: &view,
        risk_board: board,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!(
        "Reported {} of {} projects",
        view.projects.len(),
        state.projects().len()
    );
    Ok(())
}
