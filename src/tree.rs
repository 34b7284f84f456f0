use crate::errors::FlattenError;
use crate::ignore::ExclusionRules;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Renders the source tree as indentation-annotated display lines, omitting
/// excluded entries and their subtrees. The root itself is not listed; the
/// caller prepends its own marker.
pub fn render_tree(source_dir: &Path, rules: &ExclusionRules) -> Result<Vec<String>, FlattenError> {
    debug!("Rendering directory tree for {}", source_dir.display());
    let mut lines = Vec::new();
    render_level(source_dir, source_dir, rules, "", &mut lines)?;
    Ok(lines)
}

fn render_level(
    dir: &Path,
    source_dir: &Path,
    rules: &ExclusionRules,
    prefix: &str,
    lines: &mut Vec<String>,
) -> Result<(), FlattenError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| FlattenError::TreeError(format!("{}: {}", dir.display(), e)))?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for (i, entry) in entries.iter().enumerate() {
        // "last" is decided by the unfiltered position: an excluded final
        // sibling leaves the last visible entry drawn with the middle
        // connector. Known quirk, kept as-is.
        let is_last = i == entries.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let child_prefix = if is_last { "    " } else { "│   " };

        let path = entry.path();
        let relative = path.strip_prefix(source_dir).map_err(|e| {
            FlattenError::TreeError(format!("{}: {}", path.display(), e))
        })?;
        if rules.is_ignored(relative) {
            continue;
        }

        lines.push(format!(
            "{}{}{}",
            prefix,
            connector,
            entry.file_name().to_string_lossy()
        ));

        if path.is_dir() {
            let next_prefix = format!("{}{}", prefix, child_prefix);
            render_level(&path, source_dir, rules, &next_prefix, lines)?;
        }
    }

    Ok(())
}
