//! Pipeline stage catalogue.

use super::ParseStageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named pipeline position an order occupies.
///
/// The first five variants plus [`Stage::Installed`] form the production
/// pipeline in display order. [`Stage::Standby`] is an out-of-band holding
/// stage reachable from, and returning to, any pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Order intake and triage.
    Intake,
    /// Site visit and measurement.
    SiteVisit,
    /// Design and engineering.
    Design,
    /// Fabrication floor.
    Production,
    /// Fabricated and awaiting installation.
    Ready,
    /// Suspended out of band.
    Standby,
    /// Installation complete; terminal for the pipeline.
    Installed,
}

/// All stages in board display order.
pub const PIPELINE: [Stage; 7] = [
    Stage::Intake,
    Stage::SiteVisit,
    Stage::Design,
    Stage::Production,
    Stage::Ready,
    Stage::Standby,
    Stage::Installed,
];

impl Stage {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::SiteVisit => "site_visit",
            Self::Design => "design",
            Self::Production => "production",
            Self::Ready => "ready",
            Self::Standby => "standby",
            Self::Installed => "installed",
        }
    }

    /// Returns the human-readable stage title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::SiteVisit => "Site Visit",
            Self::Design => "Design",
            Self::Production => "Production",
            Self::Ready => "Ready",
            Self::Standby => "Standby",
            Self::Installed => "Installed",
        }
    }

    /// Returns the board display position. Sort order drives display only,
    /// never transition eligibility.
    #[must_use]
    pub const fn sort_order(self) -> i16 {
        match self {
            Self::Intake => 1,
            Self::SiteVisit => 2,
            Self::Design => 3,
            Self::Production => 4,
            Self::Ready => 5,
            Self::Standby => 6,
            Self::Installed => 7,
        }
    }
}

impl TryFrom<&str> for Stage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "intake" => Ok(Self::Intake),
            "site_visit" => Ok(Self::SiteVisit),
            "design" => Ok(Self::Design),
            "production" => Ok(Self::Production),
            "ready" => Ok(Self::Ready),
            "standby" => Ok(Self::Standby),
            "installed" => Ok(Self::Installed),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
