//! Shared git fixtures for tests. Real repositories in tempdirs, with
//! pinned author/committer dates so collection windows are deterministic.

use std::path::Path;
use std::process::Command;

pub(crate) fn run_git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "git {args:?}: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

pub(crate) fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-q", "-b", "main"]);
    run_git(dir, &["config", "user.email", "test@test.com"]);
    run_git(dir, &["config", "user.name", "Test"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
}

pub(crate) fn commit_at(dir: &Path, file: &str, content: &[u8], msg: &str, date: &str) {
    std::fs::write(dir.join(file), content).unwrap();
    run_git(dir, &["add", "."]);
    let out = Command::new("git")
        .args(["commit", "-q", "-m", msg])
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "git commit: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

pub(crate) fn merge_at(dir: &Path, branch: &str, msg: &str, date: &str) {
    let out = Command::new("git")
        .args(["merge", "--no-ff", "-q", "-m", msg, branch])
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "git merge: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

pub(crate) fn rev_list(dir: &Path) -> Vec<String> {
    let out = Command::new("git")
        .args(["rev-list", "--reverse", "HEAD"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(out.status.success());
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
