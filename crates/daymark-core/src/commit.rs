use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A commit as observed at collection time.
///
/// Rewriting history produces new commits with new hashes; this record is
/// superseded by the rewrite, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    #[serde(with = "time::serde::rfc3339")]
    pub author_date: OffsetDateTime,
    pub added: i64,
    pub deleted: i64,
    /// Cached `added + deleted`, computed once per collection pass.
    pub effort: i64,
}

impl Commit {
    pub fn new(
        hash: String,
        subject: String,
        author_date: OffsetDateTime,
        added: i64,
        deleted: i64,
    ) -> Self {
        Self {
            hash,
            subject,
            author_date,
            added,
            deleted,
            effort: added + deleted,
        }
    }

    /// Abbreviated hash for display.
    pub fn short_hash(&self) -> &str {
        if self.hash.len() <= 7 {
            &self.hash
        } else {
            &self.hash[..7]
        }
    }
}
