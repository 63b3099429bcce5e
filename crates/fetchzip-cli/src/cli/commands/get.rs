//! `fetchzip get <url>` – resolve, download, and optionally extract.

use anyhow::{Context, Result};
use fetchzip_core::unzip;
use fetchzip_core::{Download, HttpOptions};
use std::path::PathBuf;

pub fn run_get(
    url: &str,
    output_dir: PathBuf,
    extract_to: Option<PathBuf>,
    http: &HttpOptions,
) -> Result<()> {
    let dl = Download::resolve_with(url, output_dir, http)
        .with_context(|| format!("resolve {}", url))?;
    let expected = dl.file_size();
    let path = dl.run().with_context(|| format!("download {}", url))?;
    if expected > 0 {
        println!("Downloaded {} ({} bytes)", path.display(), expected);
    } else {
        println!("Downloaded {}", path.display());
    }

    if let Some(dir) = extract_to {
        unzip::extract_single(&path, &dir)
            .with_context(|| format!("extract {}", path.display()))?;
        println!("Extracted into {}", dir.display());
    }
    Ok(())
}
