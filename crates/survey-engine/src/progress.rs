//! Creator-facing progress rows projected from persisted response records.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::responses::ResponseMap;

/// Status stored on a persisted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ResponseStatus {
    InProgress,
    Completed,
}

/// Navigation bookkeeping saved alongside a response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page_index: Option<i64>,
    /// Seconds.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub pages_visited: Vec<usize>,
}

/// Persisted response for one respondent of one survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    #[serde(default)]
    pub survey_id: String,
    pub respondent_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub metadata: ResponseMetadata,
    #[serde(default)]
    pub responses: ResponseMap,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub last_updated: Option<OffsetDateTime>,
}

impl ResponseRecord {
    pub fn new(survey_id: impl Into<String>, respondent_email: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            respondent_email: respondent_email.into(),
            status: None,
            metadata: ResponseMetadata::default(),
            responses: ResponseMap::new(),
            last_updated: None,
        }
    }
}

/// Dashboard-facing status, including respondents with no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ProgressStatus {
    Completed,
    InProgress,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl ProgressStatus {
    pub fn rank(self) -> u8 {
        match self {
            ProgressStatus::Completed => 3,
            ProgressStatus::InProgress => 2,
            ProgressStatus::NotStarted => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRow {
    pub email: String,
    pub status: ProgressStatus,
    pub progress: usize,
    pub total_pages: usize,
    pub completion_percentage: u32,
    pub time_spent: u64,
    pub pages_visited: Vec<usize>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub last_updated: Option<OffsetDateTime>,
}

/// Projects one respondent's record onto a progress row. Never mutates the record.
pub fn project(email: &str, total_pages: usize, record: Option<&ResponseRecord>) -> ProgressRow {
    let status = match record.and_then(|record| record.status) {
        Some(ResponseStatus::Completed) => ProgressStatus::Completed,
        Some(ResponseStatus::InProgress) => ProgressStatus::InProgress,
        None => ProgressStatus::NotStarted,
    };

    let (progress, completion_percentage) = match status {
        ProgressStatus::Completed => (total_pages, 100),
        ProgressStatus::InProgress => {
            let last_page = record
                .and_then(|record| record.metadata.last_page_index)
                .unwrap_or(0)
                .max(0);
            let progress = usize::try_from(last_page)
                .map_or(total_pages, |index| index.saturating_add(1))
                .min(total_pages);
            (progress, percentage(progress, total_pages))
        }
        ProgressStatus::NotStarted => (0, 0),
    };

    ProgressRow {
        email: email.to_string(),
        status,
        progress,
        total_pages,
        completion_percentage,
        time_spent: record.map_or(0, |record| record.metadata.time_spent),
        pages_visited: record
            .map(|record| record.metadata.pages_visited.clone())
            .unwrap_or_default(),
        last_updated: record.and_then(|record| record.last_updated),
    }
}

fn percentage(progress: usize, total_pages: usize) -> u32 {
    if total_pages == 0 {
        return 0;
    }
    ((progress as f64 / total_pages as f64) * 100.0).round() as u32
}

/// Dashboard ordering: higher status rank first, then most recent activity;
/// rows without any activity go last within their rank.
pub fn dashboard_order(left: &ProgressRow, right: &ProgressRow) -> Ordering {
    right
        .status
        .rank()
        .cmp(&left.status.rank())
        .then_with(|| match (left.last_updated, right.last_updated) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Joins invited respondents with their records (emails match case-insensitively)
/// and returns the sorted progress rows. Records from respondents missing from
/// `respondents` are included as well.
pub fn build_dashboard(
    total_pages: usize,
    respondents: &[String],
    records: &[ResponseRecord],
) -> Vec<ProgressRow> {
    let find = |email: &str| {
        records
            .iter()
            .find(|record| record.respondent_email.trim().eq_ignore_ascii_case(email.trim()))
    };

    let mut rows: Vec<ProgressRow> = respondents
        .iter()
        .map(|email| project(email, total_pages, find(email)))
        .collect();

    for record in records {
        let seen = rows.iter().any(|row| {
            row.email
                .trim()
                .eq_ignore_ascii_case(record.respondent_email.trim())
        });
        if !seen {
            rows.push(project(&record.respondent_email, total_pages, Some(record)));
        }
    }

    rows.sort_by(dashboard_order);
    rows
}

/// 1-based page of rows; `per_page` of zero is treated as one.
pub fn paginate(rows: &[ProgressRow], page: usize, per_page: usize) -> &[ProgressRow] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}
