//! Deficit Analyzer
//!
//! Maps a birth date and time onto three branch keys (year, month, hour),
//! tallies their elements, and reports the two least-represented elements.
//! Element interactions (productive/destructive cycles) are not modelled.

use crate::reference::ReferenceData;
use crate::types::{DeficitList, Element, Outcome, SurveyData};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Why birth data could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid birth date: {0:?}")]
    InvalidDate(String),

    #[error("invalid birth time: {0:?}")]
    InvalidTime(String),

    #[error("birth hour {0} is outside 0-23")]
    HourOutOfRange(u32),

    #[error("year branch table is empty")]
    EmptyYearTable,
}

/// Occurrences of one element among the three branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    pub element: Element,
    pub count: u8,
}

/// Branch keys and the element tally behind a deficit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaziChart {
    pub year_branch: String,
    pub month_branch: Option<String>,
    pub hour_bucket: &'static str,
    pub hour_branch: Option<String>,
    /// Canonical element order
    pub element_counts: Vec<ElementCount>,
}

/// Successful analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaziReading {
    pub chart: BaziChart,
    pub deficits: DeficitList,
}

pub struct DeficitAnalyzer {
    reference: Arc<ReferenceData>,
}

impl DeficitAnalyzer {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    /// Two least-represented elements; `[wood, fire]` when birth data is unreadable
    pub fn analyze_deficits(&self, survey: &SurveyData) -> DeficitList {
        match self.analyze(survey).into_value() {
            Some(reading) => reading.deficits,
            None => DeficitList::FALLBACK,
        }
    }

    /// Like `analyze_deficits`, but keeps the chart and reports fallbacks
    ///
    /// `value` is `None` exactly when the fallback pair applies.
    pub fn analyze(&self, survey: &SurveyData) -> Outcome<Option<BaziReading>> {
        match self.try_analyze(survey) {
            Ok(reading) => Outcome::computed(Some(reading)),
            Err(e) => {
                tracing::warn!("Bazi analysis failed, using fallback deficits: {}", e);
                Outcome::fallback(None, e.to_string())
            }
        }
    }

    pub fn try_analyze(&self, survey: &SurveyData) -> Result<BaziReading, AnalysisError> {
        let date = parse_birth_date(&survey.birth_date)?;
        let hour = parse_birth_hour(&survey.birth_time)?;

        let year_branch = self
            .reference
            .year_branch(date.year())
            .ok_or(AnalysisError::EmptyYearTable)?;
        let month_branch = self.reference.month_branch(date.month());
        let bucket = hour_bucket(hour);
        let hour_branch = self.reference.hour_branch(bucket);

        let mut counts = [0u8; 5];
        for branch in [Some(year_branch), month_branch, hour_branch].into_iter().flatten() {
            // Unmapped branches are not counted
            if let Some(element) = self.reference.branch_element(branch) {
                counts[element.index()] += 1;
            }
        }

        let deficits = lowest_two(&counts);

        tracing::debug!(
            "Bazi chart {}-{:02} {}h: year={} month={:?} hour={:?} counts={:?} deficits={:?}",
            date.year(),
            date.month(),
            hour,
            year_branch,
            month_branch,
            hour_branch,
            counts,
            deficits
        );

        Ok(BaziReading {
            chart: BaziChart {
                year_branch: year_branch.to_string(),
                month_branch: month_branch.map(str::to_string),
                hour_bucket: bucket,
                hour_branch: hour_branch.map(str::to_string),
                element_counts: Element::ALL
                    .iter()
                    .map(|&element| ElementCount { element, count: counts[element.index()] })
                    .collect(),
            },
            deficits,
        })
    }
}

/// Stable ascending sort over the canonical order, first two kept
fn lowest_two(counts: &[u8; 5]) -> DeficitList {
    let mut ranked = Element::ALL;
    ranked.sort_by_key(|element| counts[element.index()]);
    // ALL holds five distinct values, so the first two differ
    DeficitList::new(ranked[0], ranked[1]).unwrap_or(DeficitList::FALLBACK)
}

/// Two-hour bucket key for an hour in 0..=23
pub fn hour_bucket(hour: u32) -> &'static str {
    match hour {
        23 | 0 => "23-01",
        1..=2 => "01-03",
        3..=4 => "03-05",
        5..=6 => "05-07",
        7..=8 => "07-09",
        9..=10 => "09-11",
        11..=12 => "11-13",
        13..=14 => "13-15",
        15..=16 => "15-17",
        17..=18 => "17-19",
        19..=20 => "19-21",
        _ => "21-23",
    }
}

fn parse_birth_date(raw: &str) -> Result<NaiveDate, AnalysisError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| AnalysisError::InvalidDate(raw.to_string()))
}

/// Hour component: the text before the first ':'
fn parse_birth_hour(raw: &str) -> Result<u32, AnalysisError> {
    let hour: u32 = raw
        .split(':')
        .next()
        .map(str::trim)
        .and_then(|h| h.parse().ok())
        .ok_or_else(|| AnalysisError::InvalidTime(raw.to_string()))?;

    if hour > 23 {
        return Err(AnalysisError::HourOutOfRange(hour));
    }
    Ok(hour)
}
