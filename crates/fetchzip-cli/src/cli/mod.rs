//! CLI for fetchzip.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fetchzip_core::config::{self, FetchzipConfig};
use std::path::PathBuf;

use commands::{run_get, run_resolve, run_unzip};

/// Top-level CLI for fetchzip.
#[derive(Debug, Parser)]
#[command(name = "fetchzip")]
#[command(
    about = "fetchzip: download a URL under its server-suggested name and unzip archives",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe a URL (HEAD) and show the file name and size it would be saved with.
    Resolve {
        /// HTTP/HTTPS URL to probe.
        url: String,
        /// Output directory (default: `download_dir` from config, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Download a URL into a directory, optionally extracting it afterwards.
    Get {
        /// HTTP/HTTPS URL to download.
        url: String,
        /// Output directory (default: `download_dir` from config, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Treat the downloaded file as a zip archive and extract it.
        #[arg(long)]
        extract: bool,
        /// Where to extract to (default: the output directory).
        #[arg(long, value_name = "DIR", requires = "extract")]
        extract_dir: Option<PathBuf>,
    },

    /// Extract a zip archive, or the concatenation of its part files in the given order.
    Unzip {
        /// Archive, or part files in order.
        #[arg(required = true, num_args = 1..)]
        parts: Vec<PathBuf>,
        /// Output directory (default: `download_dir` from config, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

/// `--output`, else the configured download dir, else the current directory.
fn output_dir(cfg: &FetchzipConfig, output: Option<PathBuf>) -> Result<PathBuf> {
    match output.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let http = cfg.http_options();

        match cli.command {
            CliCommand::Resolve { url, output } => {
                run_resolve(&url, output_dir(&cfg, output)?, &http)?
            }
            CliCommand::Get {
                url,
                output,
                extract,
                extract_dir,
            } => {
                let dir = output_dir(&cfg, output)?;
                let extract_to = extract.then(|| extract_dir.unwrap_or_else(|| dir.clone()));
                run_get(&url, dir, extract_to, &http)?;
            }
            CliCommand::Unzip { parts, output } => run_unzip(&parts, &output_dir(&cfg, output)?)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
