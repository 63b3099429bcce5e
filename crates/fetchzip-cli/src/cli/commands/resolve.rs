//! `fetchzip resolve <url>` – show where a download would land.

use anyhow::{Context, Result};
use fetchzip_core::{Download, HttpOptions};
use std::path::PathBuf;

pub fn run_resolve(url: &str, output_dir: PathBuf, http: &HttpOptions) -> Result<()> {
    let dl = Download::resolve_with(url, output_dir, http)
        .with_context(|| format!("resolve {}", url))?;
    println!("name: {}", dl.file_name());
    if dl.file_size() == 0 {
        println!("size: unknown");
    } else {
        println!("size: {} bytes", dl.file_size());
    }
    println!("dest: {}", dl.destination().display());
    Ok(())
}
