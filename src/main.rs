mod api;
mod cache;
mod cli;
mod dashboard;
mod data;
mod detail;
mod error;
mod export;
mod fetch;
mod filter;
mod float;
mod freshness;
mod hint;
mod loader;
mod loading;
mod paginator;
mod quit;
mod render;
mod state;
mod terminal_check;
mod theme;

use crate::{
    api::Api,
    cache::{BULMA_CSS, CachedFetch, OfflineCache, default_assets},
    cli::{Args, RunMode},
    dashboard::Dashboard,
    fetch::{Fetch, HttpFetch},
    state::App,
};
use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{fs, io::stdout, path::Path, sync::Arc, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log ke file; terminal dipakai penuh oleh TUI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = <Args as clap::Parser>::parse();
    let mode = match args.resolve_mode() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("\n{}", e);
            std::process::exit(1);
        }
    };
    init_logging(&args.log_file)?;
    info!(base_url = %args.base_url, ?mode, "starting");

    let cache = OfflineCache::new(&args.cache_dir, &args.cache_name);
    let http = Arc::new(HttpFetch::new(args.timeout())?);

    if mode == RunMode::InstallCache {
        let assets = if args.assets.is_empty() {
            default_assets(&args.base_url)
        } else {
            args.assets.clone()
        };
        let count = cache.install(http.as_ref(), &assets).await?;
        println!("{} aset tersimpan di {}", count, cache.dir().display());
        return Ok(());
    }

    if args.offline {
        let fetcher = Arc::new(CachedFetch::new(cache.clone(), http));
        dispatch(&args, mode, Api::new(&args.base_url, fetcher), &cache).await
    } else {
        dispatch(&args, mode, Api::new(&args.base_url, http), &cache).await
    }
}

async fn dispatch<F: Fetch>(args: &Args, mode: RunMode, api: Api<F>, cache: &OfflineCache) -> Result<()> {
    let mut dashboard = Dashboard::new(&args.dataset);
    match mode {
        RunMode::Export(plan) => {
            let stylesheet = cache
                .lookup(BULMA_CSS)
                .await
                .and_then(|css| String::from_utf8(css).ok());
            if let Err(e) = export::run_export(&api, &mut dashboard, &plan, stylesheet).await {
                tracing::error!(error = %e, "export failed");
                eprintln!("\n{}", e);
                std::process::exit(1);
            }
            println!("{}", plan.path.display());
            Ok(())
        }
        RunMode::InstallCache => Ok(()),
        RunMode::Interactive => run_tui(App::new(api, dashboard)),
    }
}

fn run_tui<F: Fetch>(mut app: App<F>) -> Result<()> {
    // --- setup terminal
    let mut out = stdout();
    out.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut term = Terminal::new(CrosstermBackend::new(out))?;
    term.clear()?;

    let res = app.run(&mut term);

    // restore terminal
    disable_raw_mode()?;
    let backend = term.backend_mut();
    backend.execute(LeaveAlternateScreen)?;
    term.show_cursor()?;

    res
}
