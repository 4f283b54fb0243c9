use std::fs;
use std::process::{Command, Output};

fn llemming(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_llemming"))
        .current_dir(dir)
        .args(args)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn llemming")
}

#[test]
fn e2e_analyzedir_prints_tree() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("pkg")).unwrap();
    fs::write(root.join("pkg/mod.py"), "").unwrap();
    fs::write(root.join("notes.txt"), "").unwrap();

    let out = llemming(root, &["analyzedir", "-d", ".", "-e", "py", "--sort"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "./\n|\n|  ./pkg/\n|  |\n|  |- mod.py\n");
}

#[test]
fn e2e_hone_fails_on_missing_credential_before_walking() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["hone", "-d", "does-not-exist"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("OPENAI_API_KEY environment variable not set"), "stderr: {stderr}");
    assert!(!stderr.contains("does-not-exist"), "walked before checking config: {stderr}");
}

#[test]
fn e2e_describe_fails_on_missing_credential() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["analyzedir", "-d", ".", "--describe"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("OPENAI_API_KEY"));
}

#[test]
fn e2e_hone_prompt_only_needs_no_credential() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("main.rs"), "").unwrap();
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(".git/HEAD"), "").unwrap();

    let out = llemming(root, &["hone", "-d", ".", "--prompt-only"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("We have to analyze a codebase"));
    assert!(stdout.contains("|- main.rs"));
    assert!(!stdout.contains("HEAD"));
}

#[test]
fn e2e_unknown_model_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["hone", "-d", ".", "-m", "not-a-model", "--prompt-only"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown model 'not-a-model'"));
}

#[test]
fn e2e_invalid_root_reports_path() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["analyzedir", "-d", "missing-dir"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing-dir"));
}

#[test]
fn e2e_version_flag() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["-v"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn e2e_models_lists_builtin_catalog() {
    let temp = tempfile::tempdir().unwrap();
    let out = llemming(temp.path(), &["models"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.lines().any(|l| l == "gpt-3.5-turbo-instruct"));
}
