use crate::errors::FlattenError;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// A compiled exclusion rule: either derived from a `.gitignore` line or
/// supplied by the caller as a raw regular expression.
#[derive(Debug)]
pub enum ExclusionRule {
    GlobDerived(Regex),
    Raw(Regex),
}

impl ExclusionRule {
    fn regex(&self) -> &Regex {
        match self {
            ExclusionRule::GlobDerived(regex) | ExclusionRule::Raw(regex) => regex,
        }
    }
}

/// The full set of exclusion rules for a run. Rules are immutable once
/// loaded; matching any single rule excludes a path.
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    /// Loads `.gitignore` rules from the source root (if the file exists)
    /// and compiles the caller-supplied patterns. Every pattern is compiled
    /// here, so an invalid one fails before anything touches the filesystem.
    pub fn load(source_dir: &Path, exclude_patterns: &[String]) -> Result<Self, FlattenError> {
        let mut rules = Vec::new();

        for line in read_gitignore_lines(source_dir)? {
            let pattern = gitignore_line_to_regex(&line);
            let regex = Regex::new(&pattern).map_err(|e| {
                FlattenError::PatternError(format!("gitignore line '{}': {}", line, e))
            })?;
            rules.push(ExclusionRule::GlobDerived(regex));
        }

        for pattern in exclude_patterns {
            let regex = Regex::new(pattern)?;
            rules.push(ExclusionRule::Raw(regex));
        }

        debug!("Loaded {} exclusion rules", rules.len());
        Ok(ExclusionRules { rules })
    }

    /// Returns true if any rule matches anywhere within the given relative
    /// path (unanchored search, first hit wins).
    pub fn is_ignored<P: AsRef<Path>>(&self, path: P) -> bool {
        let path_str = path.as_ref().to_string_lossy().replace('\\', "/");
        let ignored = self.rules.iter().any(|rule| rule.regex().is_match(&path_str));
        if ignored {
            trace!("Excluded path: {}", path_str);
        }
        ignored
    }
}

/// Converts one `.gitignore` line into a regex pattern: `**/` becomes a
/// wildcard path prefix (`.*/`) and each remaining `*` becomes `.*`. Other
/// metacharacters are left untouched; this is a deliberately simplified
/// approximation of glob semantics, not a full implementation.
fn gitignore_line_to_regex(line: &str) -> String {
    let mut pattern = String::new();
    let mut rest = line;
    while let Some(idx) = rest.find("**/") {
        pattern.push_str(&rest[..idx].replace('*', ".*"));
        pattern.push_str(".*/");
        rest = &rest[idx + 3..];
    }
    pattern.push_str(&rest.replace('*', ".*"));
    pattern
}

fn read_gitignore_lines(source_dir: &Path) -> Result<Vec<String>, FlattenError> {
    let gitignore_path = source_dir.join(".gitignore");
    if !gitignore_path.exists() {
        trace!("No .gitignore at {}", gitignore_path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&gitignore_path)
        .map_err(|e| FlattenError::GitignoreError(e.to_string()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}
