use thiserror::Error;

/// Failures while collecting commits or rewriting history.
#[derive(Debug, Error)]
pub enum Error {
    /// git exited non-zero; carries the tool's diagnostic text verbatim.
    #[error("git: {0}")]
    Git(String),
    /// git succeeded but produced output we could not parse.
    #[error("unexpected git output: {0}")]
    Parse(String),
    /// The requested base is not an ancestor of the current branch tip.
    #[error("{0} is not an ancestor of HEAD")]
    Ancestry(String),
    /// Hash and timestamp sequences disagree in length. Checked before any
    /// git invocation.
    #[error("commit and time counts do not match ({hashes} commits, {times} times)")]
    CountMismatch { hashes: usize, times: usize },
    #[error("no commits to rewrite")]
    NoCommits,
    #[error("format timestamp: {0}")]
    Format(#[from] time::error::Format),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
