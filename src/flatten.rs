use crate::errors::FlattenError;
use crate::ignore::ExclusionRules;
use crate::output::prepare_output_dir;
use crate::tree::render_tree;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// Fixed name of the tree artifact written into the target directory
/// ("directory structure").
pub const TREE_FILE_NAME: &str = "ディレクトリ構造.txt";

pub struct Flattener {
    source_dir: PathBuf,
    output_dir: PathBuf,
    rules: ExclusionRules,
}

impl Flattener {
    /// Builds a flattener for one run. All exclusion patterns are compiled
    /// here, so an invalid one fails before anything is written.
    pub fn new(
        source_dir: &Path,
        output_dir: &Path,
        exclude_patterns: &[String],
    ) -> Result<Self, FlattenError> {
        let rules = ExclusionRules::load(source_dir, exclude_patterns)?;
        Ok(Flattener {
            source_dir: source_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            rules,
        })
    }

    /// Runs the full flatten pass: reset the target directory, write the
    /// tree artifact, then copy every non-excluded file into the target
    /// under its flattened name. Name collisions are silent; the last file
    /// copied in walk order wins.
    pub fn flatten(&self) -> Result<(), FlattenError> {
        let target_dir = prepare_output_dir(&self.output_dir)?;

        let mut tree_lines = vec![".".to_owned()];
        tree_lines.extend(render_tree(&self.source_dir, &self.rules)?);
        let tree_file_path = target_dir.join(TREE_FILE_NAME);
        fs::write(&tree_file_path, tree_lines.join("\n"))
            .map_err(|e| FlattenError::TreeError(format!("{}: {}", tree_file_path.display(), e)))?;
        debug!("Wrote tree listing to {}", tree_file_path.display());

        for entry in WalkDir::new(&self.source_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| FlattenError::IoError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_path = entry.path();
            let relative = file_path.strip_prefix(&self.source_dir).map_err(|e| {
                FlattenError::IoError(format!("{}: {}", file_path.display(), e))
            })?;

            // An excluded directory only suppresses the files at its own
            // level; the walk still descends, and each subdirectory's
            // relative path is checked independently. Known quirk, kept
            // as-is.
            if self.rules.is_ignored(parent_relative(relative)) {
                trace!("Skipping file in excluded directory: {}", relative.display());
                continue;
            }
            if self.rules.is_ignored(relative) {
                trace!("Skipping excluded file: {}", relative.display());
                continue;
            }

            let target_filename = target_filename(file_path);
            let target_path = target_dir.join(&target_filename);
            copy_with_times(file_path, &target_path)?;
            info!("Copied: {} -> {}", relative.display(), target_filename);
        }

        Ok(())
    }
}

/// Relative path of a file's parent directory; files at the source root map
/// to `.` so rules see the same string the rendering pass would.
fn parent_relative(relative: &Path) -> &Path {
    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Destination name for a source file. Files named `index.*` take their
/// parent directory's name with the original extension; everything else
/// keeps its base name. Two plain files with the same base name collide.
fn target_filename(file_path: &Path) -> String {
    let name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !name.starts_with("index.") {
        return name;
    }

    let parent = file_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_path.extension().filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("{}.{}", parent, ext.to_string_lossy()),
        None => parent,
    }
}

/// Copies file contents and carries the modification timestamp over.
fn copy_with_times(source: &Path, target: &Path) -> Result<(), FlattenError> {
    fs::copy(source, target)
        .map_err(|e| FlattenError::CopyError(format!("{}: {}", source.display(), e)))?;

    let modified = fs::metadata(source)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| FlattenError::CopyError(format!("{}: {}", source.display(), e)))?;
    fs::OpenOptions::new()
        .write(true)
        .open(target)
        .and_then(|file| file.set_modified(modified))
        .map_err(|e| FlattenError::CopyError(format!("{}: {}", target.display(), e)))?;

    Ok(())
}
