use crate::{api::DEFAULT_BASE_URL, cache::DEFAULT_CACHE_NAME, dashboard::DEFAULT_DATASET};
use anyhow::{Result, bail};
use clap::Parser;
use ratatui::crossterm::style::Stylize;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Parser, Clone)]
#[command(version, about = "Dasbor data warga bantu warga di terminal")]
pub struct Args {
    /// Base URL of the data API
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Dataset selected after the catalog loads (name or sheet id)
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Render once and write to this file (.html, .csv or .csv.gz) instead of opening the TUI
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Search query applied before exporting
    #[arg(short, long)]
    pub query: Option<String>,

    /// Page to export as HTML (0 = all filtered rows)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Download the static asset list into the offline cache and exit
    #[arg(long)]
    pub install_cache: bool,

    /// Asset URL for --install-cache (repeatable, replaces the default list)
    #[arg(long = "asset")]
    pub assets: Vec<String>,

    /// Serve requests from the offline cache before hitting the network
    #[arg(long)]
    pub offline: bool,

    /// Directory holding the offline cache
    #[arg(long, default_value = ".cache")]
    pub cache_dir: PathBuf,

    /// Name of the offline cache
    #[arg(long, default_value = DEFAULT_CACHE_NAME)]
    pub cache_name: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Log file (the terminal is owned by the TUI)
    #[arg(long, default_value = "logs/wbw-dashboard.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Csv,
    CsvGz,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub query: String,
    /// 0 = semua baris terfilter.
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Export(ExportPlan),
    InstallCache,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn resolve_mode(&self) -> Result<RunMode> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!(
                "{} --base-url must start with http:// or https:// (found {})",
                "[ERROR]".red().bold(),
                self.base_url
            );
        }
        if self.timeout == 0 {
            bail!("{} --timeout must be at least 1 second", "[ERROR]".red().bold());
        }
        if !self.assets.is_empty() && !self.install_cache {
            bail!(
                "{} --asset can only be used together with --install-cache",
                "[PROHIBITED]".red().bold()
            );
        }

        match (&self.export, self.install_cache) {
            (Some(_), true) => bail!(
                "{} Cannot use both --export and --install-cache. Choose one.",
                "[PROHIBITED]".red().bold()
            ),
            (None, true) | (None, false) if self.query.is_some() || self.page.is_some() => bail!(
                "{} --query and --page require --export",
                "[PROHIBITED]".red().bold()
            ),
            (None, true) => Ok(RunMode::InstallCache),
            (None, false) => Ok(RunMode::Interactive),
            (Some(path), false) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                let format = if name.ends_with(".csv.gz") {
                    ExportFormat::CsvGz
                } else if name.ends_with(".csv") {
                    ExportFormat::Csv
                } else if name.ends_with(".html") || name.ends_with(".htm") {
                    ExportFormat::Html
                } else {
                    bail!(
                        "{} --export must be a .html, .csv or .csv.gz file (found {})",
                        "[ERROR]".red().bold(),
                        path.display()
                    );
                };
                if format != ExportFormat::Html && self.page.is_some() {
                    bail!(
                        "{} --page only applies to HTML exports; CSV always contains every filtered row",
                        "[PROHIBITED]".red().bold()
                    );
                }
                Ok(RunMode::Export(ExportPlan {
                    path: path.clone(),
                    format,
                    query: self.query.clone().unwrap_or_default(),
                    page: self.page.unwrap_or(1),
                }))
            }
        }
    }
}
