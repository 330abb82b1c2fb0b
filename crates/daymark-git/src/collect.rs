use std::path::Path;

use daymark_core::Commit;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, Time};

use crate::error::Error;
use crate::run::{git, git_check};

// %x1f / %x1e: unit and record separators, so subjects cannot collide with
// the field layout.
const LOG_FORMAT: &str = "%H%x1f%ad%x1f%s%x1e";
const UNIT_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

/// Commits whose author date falls within `now`'s calendar day (midnight to
/// midnight in `now`'s offset), oldest first. No matching commits is an
/// empty result, not an error.
pub fn collect_today(repo: &Path, now: OffsetDateTime) -> Result<Vec<Commit>, Error> {
    let start_of_day = now.replace_time(Time::MIDNIGHT);
    let end_of_day = start_of_day + Duration::hours(24);
    let out = git(
        repo,
        &[
            "log",
            &format!("--since={}", start_of_day.format(&Rfc3339)?),
            &format!("--until={}", end_of_day.format(&Rfc3339)?),
            "--reverse",
            "--date=iso-strict",
            &format!("--pretty=format:{LOG_FORMAT}"),
        ],
    )?;
    parse_log(repo, &out)
}

/// The resolved ancestor plus every commit on the ancestry path from it to
/// HEAD, oldest first, both endpoints inclusive. A ref that is not an
/// ancestor of the tip is `Error::Ancestry`.
pub fn collect_from_ancestor(repo: &Path, ancestor_ref: &str) -> Result<Vec<Commit>, Error> {
    let hash = git(
        repo,
        &["rev-parse", "--verify", &format!("{ancestor_ref}^{{commit}}")],
    )?
    .trim()
    .to_string();

    if !git_check(repo, &["merge-base", "--is-ancestor", &hash, "HEAD"])? {
        return Err(Error::Ancestry(ancestor_ref.to_string()));
    }

    let list = git(
        repo,
        &["rev-list", "--reverse", "--ancestry-path", &format!("{hash}..HEAD")],
    )?;
    let mut hashes = vec![hash];
    hashes.extend(
        list.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from),
    );

    let mut commits = Vec::with_capacity(hashes.len());
    for hash in &hashes {
        commits.push(lookup(repo, hash)?);
    }
    Ok(commits)
}

fn lookup(repo: &Path, hash: &str) -> Result<Commit, Error> {
    let out = git(
        repo,
        &[
            "show",
            "-s",
            "--date=iso-strict",
            &format!("--pretty=format:{LOG_FORMAT}"),
            hash,
        ],
    )?;
    let mut commits = parse_log(repo, &out)?;
    match (commits.pop(), commits.is_empty()) {
        (Some(commit), true) => Ok(commit),
        _ => Err(Error::Parse(format!("expected exactly one commit for {hash}"))),
    }
}

fn parse_log(repo: &Path, out: &str) -> Result<Vec<Commit>, Error> {
    let mut commits = Vec::new();
    for entry in out.split(RECORD_SEP) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let fields: Vec<&str> = entry.split(UNIT_SEP).collect();
        let &[hash, date, subject] = fields.as_slice() else {
            return Err(Error::Parse(format!(
                "log entry has {} fields, expected 3",
                fields.len()
            )));
        };
        let author_date = OffsetDateTime::parse(date.trim(), &Rfc3339)
            .map_err(|e| Error::Parse(format!("author date {:?}: {e}", date.trim())))?;
        let hash = hash.trim().to_string();
        let (added, deleted) = effort_stats(repo, &hash)?;
        commits.push(Commit::new(
            hash,
            subject.trim().to_string(),
            author_date,
            added,
            deleted,
        ));
    }
    Ok(commits)
}

/// Added/deleted line totals across every file the commit touched, relative
/// to its diff baseline. Binary files have no numeric stat and count zero.
fn effort_stats(repo: &Path, hash: &str) -> Result<(i64, i64), Error> {
    let out = git(repo, &["show", "--numstat", "--format=", hash])?;
    let mut added = 0;
    let mut deleted = 0;
    for line in out.lines() {
        let mut cols = line.trim().split('\t');
        let (Some(a), Some(d)) = (cols.next(), cols.next()) else {
            continue;
        };
        added += numstat(a);
        deleted += numstat(d);
    }
    Ok((added, deleted))
}

fn numstat(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}
