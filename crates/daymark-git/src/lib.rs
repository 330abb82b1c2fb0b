//! Git subprocess layer: commit collection (today's commits or an ancestry
//! range) and the sequential history-rewrite protocol built on
//! `git rebase --rebase-merges --exec`. Git is driven strictly as a black
//! box; nothing here reads the repository format directly.

pub mod collect;
pub mod error;
pub mod rewrite;
mod run;
#[cfg(test)]
pub(crate) mod testutil;

pub use collect::{collect_from_ancestor, collect_today};
pub use error::Error;
pub use rewrite::{rewrite_history, ReplayBase, RewriteQueue, TIMES_ENV};
