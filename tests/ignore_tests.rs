use flatsnap::errors::FlattenError;
use flatsnap::ExclusionRules;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_user_patterns_match_anywhere_in_path() {
    let source_dir = tempdir().unwrap();
    let rules = ExclusionRules::load(source_dir.path(), &["node_modules".to_owned()]).unwrap();

    assert!(rules.is_ignored("node_modules"));
    assert!(rules.is_ignored("packages/app/node_modules/lodash/index.js"));
    assert!(!rules.is_ignored("src/main.rs"));
}

#[test]
fn test_any_matching_rule_excludes() {
    let source_dir = tempdir().unwrap();
    fs::write(source_dir.path().join(".gitignore"), "*.log\n").unwrap();
    let rules = ExclusionRules::load(source_dir.path(), &["^target/".to_owned()]).unwrap();

    assert!(rules.is_ignored("build.log"), "gitignore rule should match");
    assert!(rules.is_ignored("target/debug/app"), "user rule should match");
    assert!(!rules.is_ignored("src/lib.rs"), "unmatched path should pass");
}

#[test]
fn test_gitignore_comments_and_blank_lines_are_skipped() {
    let source_dir = tempdir().unwrap();
    fs::write(
        source_dir.path().join(".gitignore"),
        "# build artifacts\n\n*.log\n   \n# editor state\n",
    )
    .unwrap();
    let rules = ExclusionRules::load(source_dir.path(), &[]).unwrap();

    assert!(rules.is_ignored("debug.log"));
    assert!(
        !rules.is_ignored("# build artifacts"),
        "comment lines must not become rules"
    );
}

#[test]
fn test_gitignore_double_star_slash_matches_any_prefix() {
    let source_dir = tempdir().unwrap();
    fs::write(source_dir.path().join(".gitignore"), "**/dist\n").unwrap();
    let rules = ExclusionRules::load(source_dir.path(), &[]).unwrap();

    assert!(rules.is_ignored("packages/app/dist"));
    assert!(rules.is_ignored("a/b/c/dist/bundle.js"));
    assert!(
        !rules.is_ignored("dist"),
        "`**/` requires a path separator before the name"
    );
}

#[test]
fn test_missing_gitignore_loads_no_rules() {
    let source_dir = tempdir().unwrap();
    let rules = ExclusionRules::load(source_dir.path(), &[]).unwrap();

    assert!(!rules.is_ignored("anything/at/all.txt"));
}

#[test]
fn test_invalid_user_pattern_is_a_load_time_error() {
    let source_dir = tempdir().unwrap();
    let result = ExclusionRules::load(source_dir.path(), &["[unclosed".to_owned()]);

    match result {
        Err(FlattenError::PatternError(_)) => {}
        other => panic!("Expected PatternError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invalid_gitignore_derived_pattern_is_a_load_time_error() {
    let source_dir = tempdir().unwrap();
    fs::write(source_dir.path().join(".gitignore"), "[broken\n").unwrap();
    let result = ExclusionRules::load(source_dir.path(), &[]);

    match result {
        Err(FlattenError::PatternError(_)) => {}
        other => panic!("Expected PatternError, got {:?}", other.map(|_| ())),
    }
}
