use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use dspreset::Preset;

/// Backup target for an in-place save: `<original>.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Write the preset to `output`, or over `original` after copying the
/// on-disk file byte-for-byte to its backup path.
pub fn save_preset(preset: &Preset, original: &Path, output: Option<&Path>) -> Result<()> {
    if output.is_none() {
        let backup = backup_path(original);
        std::fs::copy(original, &backup)
            .with_context(|| format!("Failed to create backup: {:?}", backup))?;
        println!("Created backup at: {}", backup.display());
    }

    let target = output.unwrap_or(original);
    std::fs::write(target, preset.to_xml())
        .with_context(|| format!("Failed to save file: {:?}", target))?;
    println!("{} Saved to: {}", "✓".green(), target.display());
    Ok(())
}
