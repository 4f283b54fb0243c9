use std::fs;
use std::path::Path;

use llemming::ignore::{IgnoreSet, PatternMode};
use llemming::tree::{build_tree, render_tree, ExtensionFilter, TreeOptions};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn render(root: &Path, options: &TreeOptions) -> String {
    let tree = build_tree(root, options).unwrap();
    render_tree(&tree, root)
}

#[test]
fn every_entry_appears_exactly_once_without_filters() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    for rel in ["alpha.rs", "src/beta.rs", "src/inner/gamma.rs", "docs/delta.md"] {
        touch(root, rel);
    }
    fs::create_dir(root.join("empty_dir")).unwrap();

    let out = render(root, &TreeOptions::default());
    for name in ["alpha.rs", "beta.rs", "gamma.rs", "delta.md"] {
        assert_eq!(out.matches(&format!("|- {name}")).count(), 1, "{name} in\n{out}");
    }
    for dir in ["src", "src/inner", "docs", "empty_dir"] {
        let shown = format!("{}{}", root.join(dir).display(), std::path::MAIN_SEPARATOR);
        let lines = out
            .lines()
            .filter(|line| line.trim_start_matches(['|', ' ']) == shown)
            .count();
        assert_eq!(lines, 1, "{dir} in\n{out}");
    }
}

#[test]
fn ignored_directory_disappears_with_its_subtree() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    touch(root, "a.py");
    touch(root, "secret/b.py");
    touch(root, "secret/deeper/c.py");

    let options = TreeOptions {
        ignores: [root.join("secret")].into_iter().collect(),
        ..Default::default()
    };
    let out = render(root, &options);
    assert!(out.contains("|- a.py"));
    assert!(!out.contains("secret"));
    assert!(!out.contains("b.py"));
    assert!(!out.contains("c.py"));
}

#[test]
fn relative_ignore_entries_match_absolute_walk_paths() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    touch(root, "keep/x.py");
    touch(root, "drop/y.py");

    // Walk an absolute root, ignore via a path with `..` in it.
    let roundabout = root.join("keep").join("..").join("drop");
    let options = TreeOptions {
        ignores: [roundabout].into_iter().collect(),
        ..Default::default()
    };
    let out = render(root, &options);
    assert!(out.contains("x.py"));
    assert!(!out.contains("y.py"));
}

#[test]
fn extension_filter_keeps_only_matching_files() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    touch(root, "a.py");
    touch(root, "b.txt");

    let bare = TreeOptions { extensions: Some(ExtensionFilter::new(["py"])), ..Default::default() };
    let dotted = TreeOptions { extensions: Some(ExtensionFilter::new([".py"])), ..Default::default() };

    let out = render(root, &bare);
    assert!(out.contains("|- a.py"));
    assert!(!out.contains("b.txt"));
    assert_eq!(build_tree(root, &bare).unwrap(), build_tree(root, &dotted).unwrap());
}

#[test]
fn rendering_is_deterministic() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    for i in 0..20 {
        touch(root, &format!("d{}/f{}.txt", i % 4, i));
    }
    let tree = build_tree(root, &TreeOptions::default()).unwrap();
    assert_eq!(render_tree(&tree, root), render_tree(&tree, root));
}

#[test]
fn sorted_walk_is_stable_across_builds() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    for name in ["zeta.rs", "alpha.rs", "mid/beta.rs", "mid/aardvark.rs"] {
        touch(root, name);
    }
    let options = TreeOptions { sort: true, ..Default::default() };
    let first = render(root, &options);
    let second = render(root, &options);
    assert_eq!(first, second);
    assert!(first.find("alpha.rs").unwrap() < first.find("zeta.rs").unwrap());
    assert!(first.find("aardvark.rs").unwrap() < first.find("beta.rs").unwrap());
}

#[test]
fn ignore_file_patterns_and_git_dir_are_excluded() {
    let td = TempDir::new().unwrap();
    let root = td.path();
    touch(root, ".git/config");
    touch(root, "src/main.rs");
    touch(root, "src/target/debug.o");
    touch(root, "target/release.o");
    touch(root, "run.log");
    let ignore_file = td.path().join("patterns.ignore");
    fs::write(&ignore_file, "# build output\ntarget\n\n*.log\npatterns.ignore\n").unwrap();

    let ignores = IgnoreSet::load(root, Some(ignore_file.as_path()), &[], PatternMode::Recursive, false).unwrap();
    let out = render(root, &TreeOptions { ignores, ..Default::default() });
    assert!(out.contains("|- main.rs"));
    for gone in [".git", "config", "target", ".o", "run.log", "patterns.ignore"] {
        assert!(!out.contains(gone), "{gone} should be ignored:\n{out}");
    }
}

#[cfg(unix)]
#[test]
fn ignore_file_patterns_apply_through_followed_links() {
    let td = TempDir::new().unwrap();
    let root = td.path().join("repo");
    touch(&root, "real/node_modules/x.js");
    touch(&root, "real/app.js");
    std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
    let ignore_file = td.path().join("patterns.ignore");
    fs::write(&ignore_file, "node_modules\n").unwrap();

    let ignores = IgnoreSet::load(&root, Some(ignore_file.as_path()), &[], PatternMode::Recursive, true).unwrap();
    let out = render(&root, &TreeOptions { ignores, follow_symlinks: true, ..Default::default() });
    assert_eq!(out.matches("|- app.js").count(), 2, "{out}");
    assert!(!out.contains("node_modules"), "{out}");
    assert!(!out.contains("x.js"), "{out}");
}
