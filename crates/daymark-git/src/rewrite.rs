use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Error;
use crate::run::git;

/// Environment variable naming the timestamp queue consumed by the hook.
pub const TIMES_ENV: &str = "DAYMARK_TIMES";

/// Lower boundary of the replay: either the parent of the first rewritten
/// commit, or the whole history when that commit is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayBase {
    Root,
    Commit(String),
}

impl ReplayBase {
    /// Resolve the parent of `first`. A failing `rev-parse <first>^` means
    /// the commit has no parent and the replay starts from the beginning of
    /// history.
    pub fn resolve(repo: &Path, first: &str) -> Self {
        match git(repo, &["rev-parse", &format!("{first}^")]) {
            Ok(out) => ReplayBase::Commit(out.trim().to_string()),
            Err(_) => ReplayBase::Root,
        }
    }
}

/// Ordered, file-backed FIFO of target timestamps: one RFC 3339 line per
/// commit, consumed from the top, one line per hook invocation.
///
/// The queue lives outside process memory because every consumption happens
/// in a separate subprocess with nothing shared but this file. The hook
/// fails loudly when the queue is empty instead of reusing or skipping a
/// timestamp.
pub struct RewriteQueue {
    path: PathBuf,
    len: usize,
}

impl RewriteQueue {
    pub fn create(dir: &Path, times: &[OffsetDateTime]) -> Result<Self, Error> {
        let mut lines = String::new();
        for ts in times {
            lines.push_str(&ts.format(&Rfc3339)?);
            lines.push('\n');
        }
        let path = dir.join("times.txt");
        fs::write(&path, lines)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        Ok(Self {
            path,
            len: times.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// Pops the first queue line (rewrite-then-rename keeps the pop atomic within
// one invocation), then re-stamps the commit the replay just applied. An
// exhausted queue is a hard stop: it means the commit count and timestamp
// count drifted apart.
const HOOK_SCRIPT: &str = r#"#!/bin/sh
set -e
list="$DAYMARK_TIMES"
if [ ! -f "$list" ]; then
  echo "daymark: missing times file" >&2
  exit 1
fi
ts=$(sed -n '1p' "$list")
if [ -z "$ts" ]; then
  echo "daymark: no more timestamps" >&2
  exit 1
fi
tmp="${list}.tmp"
tail -n +2 "$list" > "$tmp"
mv "$tmp" "$list"
GIT_AUTHOR_DATE="$ts" GIT_COMMITTER_DATE="$ts" git commit --amend --no-edit --date "$ts" >/dev/null
"#;

/// Write the per-commit re-stamp hook into `dir`, owner-executable only.
pub fn write_hook(dir: &Path) -> Result<PathBuf, Error> {
    let path = dir.join("restamp.sh");
    fs::write(&path, HOOK_SCRIPT)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o700))?;
    Ok(path)
}

/// Rewrite the author/committer timestamps of `hashes` (oldest first) to
/// `times` in one `git rebase --rebase-merges --exec` pass.
///
/// Both sequences must be non-empty and of equal length; that precondition
/// is checked before any git invocation. A failed rebase is surfaced with
/// git's diagnostics and left in git's own intermediate state for the
/// operator to `--continue` or `--abort`; the queue and hook are removed on
/// every path when the temp dir drops.
pub fn rewrite_history(
    repo: &Path,
    hashes: &[String],
    times: &[OffsetDateTime],
) -> Result<(), Error> {
    if hashes.is_empty() {
        return Err(Error::NoCommits);
    }
    if hashes.len() != times.len() {
        return Err(Error::CountMismatch {
            hashes: hashes.len(),
            times: times.len(),
        });
    }

    let dir = tempfile::Builder::new().prefix("daymark-").tempdir()?;
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o700))?;
    let queue = RewriteQueue::create(dir.path(), times)?;
    let hook = write_hook(dir.path())?;

    let base = ReplayBase::resolve(repo, &hashes[0]);
    tracing::debug!(?base, queued = queue.len(), "starting rebase");

    let mut cmd = Command::new("git");
    cmd.args(["rebase", "--rebase-merges", "--exec"])
        .arg(&hook)
        .current_dir(repo)
        .env(TIMES_ENV, queue.path());
    match &base {
        ReplayBase::Root => {
            cmd.arg("--root");
        }
        ReplayBase::Commit(hash) => {
            cmd.arg(hash);
        }
    }

    let output = cmd
        .output()
        .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            return Err(Error::Git(format!("git rebase exited with {}", output.status)));
        }
        return Err(Error::Git(stderr));
    }
    Ok(())
}
