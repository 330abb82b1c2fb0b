use daymark_core::{Commit, TimeWindow};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

/// One row of the review table.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub hash: String,
    pub subject: String,
    pub effort: i64,
    pub percent: f64,
}

/// Build review rows (short hash, effort share) and the effort total.
/// With zero total effort every commit shows an equal share, mirroring the
/// allocator's degenerate case.
pub fn display_rows(commits: &[Commit]) -> (Vec<DisplayRow>, i64) {
    let total: i64 = commits.iter().map(|c| c.effort).sum();
    let rows = commits
        .iter()
        .map(|c| DisplayRow {
            hash: c.short_hash().to_string(),
            subject: c.subject.clone(),
            effort: c.effort,
            percent: share(c.effort, total, commits.len()),
        })
        .collect();
    (rows, total)
}

fn share(effort: i64, total: i64, count: usize) -> f64 {
    if total > 0 {
        effort as f64 / total as f64
    } else if count > 0 {
        1.0 / count as f64
    } else {
        0.0
    }
}

/// The planned timeline, one line per commit, oldest first.
pub fn preview(commits: &[Commit], times: &[OffsetDateTime], start: OffsetDateTime) -> String {
    let total: i64 = commits.iter().map(|c| c.effort).sum();
    let mut out = String::from("Planned commit timeline:\n");
    out.push_str("End Time          Duration  Effort  Percent  Hash     Subject\n");
    let mut prev = start;
    for (commit, &end) in commits.iter().zip(times) {
        let duration = end - prev;
        prev = end;
        let percent = share(commit.effort, total, commits.len());
        out.push_str(&format!(
            "{:<16}  {:<8}  {:<6}  {:<7}  {:<7}  {}\n",
            minute_stamp(end),
            format_duration(duration),
            commit.effort,
            format!("{:.1}%", percent * 100.0),
            commit.short_hash(),
            commit.subject,
        ));
    }
    out
}

fn minute_stamp(ts: OffsetDateTime) -> String {
    ts.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute]"
    ))
    .unwrap_or_default()
}

/// `XhYYm` above an hour, `Xm` below; rounded to the nearest minute.
pub fn format_duration(value: Duration) -> String {
    let total_minutes = ((value.whole_seconds() + 30) / 60).max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h{minutes:02}m")
    }
}

#[derive(Serialize)]
struct PlanCommit<'a> {
    hash: &'a str,
    subject: &'a str,
    added: i64,
    deleted: i64,
    effort: i64,
    scheduled_at: String,
}

#[derive(Serialize)]
struct Plan<'a> {
    window_start: String,
    window_end: String,
    commits: Vec<PlanCommit<'a>>,
}

/// The plan as pretty-printed JSON for machine consumers.
pub fn to_json(
    commits: &[Commit],
    times: &[OffsetDateTime],
    window: &TimeWindow,
) -> anyhow::Result<String> {
    let plan = Plan {
        window_start: window.start().format(&Rfc3339)?,
        window_end: window.end().format(&Rfc3339)?,
        commits: commits
            .iter()
            .zip(times)
            .map(|(c, t)| {
                Ok(PlanCommit {
                    hash: &c.hash,
                    subject: &c.subject,
                    added: c.added,
                    deleted: c.deleted,
                    effort: c.effort,
                    scheduled_at: t.format(&Rfc3339)?,
                })
            })
            .collect::<anyhow::Result<_>>()?,
    };
    Ok(serde_json::to_string_pretty(&plan)?)
}
