use crate::errors::FlattenError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reserved name of the flattened output directory. An output path already
/// ending in this name is used directly; anything else gets it appended.
pub const OUTPUT_DIR_NAME: &str = "knowledge";

/// Resolves the target directory for a run and resets it: existing contents
/// are removed, missing parents are created. Guaranteed to exist and be
/// empty on return.
pub fn prepare_output_dir(output_dir: &Path) -> Result<PathBuf, FlattenError> {
    let target_dir = if output_dir
        .file_name()
        .map_or(false, |name| name == OUTPUT_DIR_NAME)
    {
        output_dir.to_path_buf()
    } else {
        output_dir.join(OUTPUT_DIR_NAME)
    };

    if target_dir.exists() {
        debug!("Clearing target directory: {}", target_dir.display());
        let entries = fs::read_dir(&target_dir)
            .map_err(|e| FlattenError::OutputPrepError(e.to_string()))?;
        for entry in entries {
            let path = entry
                .map_err(|e| FlattenError::OutputPrepError(e.to_string()))?
                .path();
            let removal = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removal.map_err(|e| {
                FlattenError::OutputPrepError(format!("{}: {}", path.display(), e))
            })?;
        }
    } else {
        debug!("Creating target directory: {}", target_dir.display());
        fs::create_dir_all(&target_dir)
            .map_err(|e| FlattenError::OutputPrepError(e.to_string()))?;
    }

    Ok(target_dir)
}
