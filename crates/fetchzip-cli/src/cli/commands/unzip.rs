//! `fetchzip unzip <part>...` – extract an archive or its concatenated parts.

use anyhow::{Context, Result};
use fetchzip_core::unzip;
use std::path::{Path, PathBuf};

pub fn run_unzip(parts: &[PathBuf], output_dir: &Path) -> Result<()> {
    unzip::extract_multiple(parts, output_dir).with_context(|| match parts {
        [single] => format!("extract {}", single.display()),
        [first, ..] => format!("extract {} parts starting at {}", parts.len(), first.display()),
        [] => "extract: no parts given".to_string(),
    })?;
    println!("Extracted into {}", output_dir.display());
    Ok(())
}
