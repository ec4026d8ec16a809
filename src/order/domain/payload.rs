//! Request payload accompanying status updates and manual moves.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional fields a caller may supply alongside a status change.
///
/// Date fields are carried as raw text and parsed leniently at stamping
/// time: a date-only or date-time form yields a stamp, anything else yields
/// `None`. Absent or malformed dates are never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPayload {
    /// Site-visit date, textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    /// Person responsible for the site visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_responsible: Option<String>,
    /// Production entry date, textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_entry: Option<String>,
    /// Production deadline date, textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_deadline: Option<String>,
    /// Installation date, textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<String>,
    /// Person responsible for the installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_responsible: Option<String>,
    /// Which installation phase was completed ("Stage 1" / "Stage 2").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_phase: Option<String>,
}

impl TransitionPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site-visit date.
    #[must_use]
    pub fn with_visit_date(mut self, value: impl Into<String>) -> Self {
        self.visit_date = Some(value.into());
        self
    }

    /// Sets the site-visit responsible person.
    #[must_use]
    pub fn with_visit_responsible(mut self, value: impl Into<String>) -> Self {
        self.visit_responsible = Some(value.into());
        self
    }

    /// Sets the production entry date.
    #[must_use]
    pub fn with_production_entry(mut self, value: impl Into<String>) -> Self {
        self.production_entry = Some(value.into());
        self
    }

    /// Sets the production deadline date.
    #[must_use]
    pub fn with_production_deadline(mut self, value: impl Into<String>) -> Self {
        self.production_deadline = Some(value.into());
        self
    }

    /// Sets the installation date.
    #[must_use]
    pub fn with_installation_date(mut self, value: impl Into<String>) -> Self {
        self.installation_date = Some(value.into());
        self
    }

    /// Sets the installation responsible person.
    #[must_use]
    pub fn with_installation_responsible(mut self, value: impl Into<String>) -> Self {
        self.installation_responsible = Some(value.into());
        self
    }

    /// Sets the completed installation phase.
    #[must_use]
    pub fn with_installed_phase(mut self, value: impl Into<String>) -> Self {
        self.installed_phase = Some(value.into());
        self
    }

    /// Parsed site-visit stamp.
    #[must_use]
    pub fn visit_stamp(&self) -> Option<DateTime<Utc>> {
        parse_stamp(self.visit_date.as_deref())
    }

    /// Parsed production entry stamp.
    #[must_use]
    pub fn production_entry_stamp(&self) -> Option<DateTime<Utc>> {
        parse_stamp(self.production_entry.as_deref())
    }

    /// Parsed production deadline stamp.
    #[must_use]
    pub fn production_deadline_stamp(&self) -> Option<DateTime<Utc>> {
        parse_stamp(self.production_deadline.as_deref())
    }

    /// Parsed installation stamp.
    #[must_use]
    pub fn installation_stamp(&self) -> Option<DateTime<Utc>> {
        parse_stamp(self.installation_date.as_deref())
    }

    /// Parsed installation phase, when recognisable.
    #[must_use]
    pub fn installed_phase(&self) -> Option<InstalledPhase> {
        self.installed_phase
            .as_deref()
            .and_then(InstalledPhase::parse)
    }
}

/// Which half of a two-phase installation was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstalledPhase {
    /// First fitting done; a second visit remains.
    First,
    /// Final fitting done; the order is fully installed.
    Second,
}

impl InstalledPhase {
    /// Parses a phase designator such as `"Stage 1"` or `"2"`.
    ///
    /// Returns `None` for anything unrecognisable; callers treat that the
    /// same as an absent phase.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "stage 1" | "phase 1" | "1" => Some(Self::First),
            "stage 2" | "phase 2" | "2" => Some(Self::Second),
            _ => None,
        }
    }
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a textual date leniently.
///
/// Accepts a date-time in ISO or space-separated form, or a bare date
/// (midnight). Anything else, including `None`, yields `None`.
#[must_use]
pub fn parse_stamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
