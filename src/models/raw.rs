//! Raw record structures, mirroring scraped markup as strings.
//!
//! Fields hold the page text verbatim (or `None` when the markup omitted
//! them); every typed interpretation happens later in the cleaning stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The four record kinds the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Events,
    Results,
    Fighters,
    Rounds,
}

impl RecordKind {
    /// Every kind, in pipeline processing order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Events,
        RecordKind::Results,
        RecordKind::Fighters,
        RecordKind::Rounds,
    ];

    /// Stable lowercase name, used in paths and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Events => "events",
            RecordKind::Results => "results",
            RecordKind::Fighters => "fighters",
            RecordKind::Rounds => "rounds",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "events" => Ok(RecordKind::Events),
            "results" => Ok(RecordKind::Results),
            "fighters" => Ok(RecordKind::Fighters),
            "rounds" => Ok(RecordKind::Rounds),
            other => Err(AppError::validation(format!(
                "Unknown record kind '{other}'"
            ))),
        }
    }
}

/// One row of the completed-events listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    /// Event name as displayed
    pub event: String,

    /// URL of the event detail page
    pub event_url: String,

    /// Event date as displayed, e.g. "March 30, 2024"
    pub date: String,

    /// Venue location as displayed, e.g. "Las Vegas, Nevada, USA"
    pub location: String,
}

/// One fight row of an event detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawResult {
    /// URL of the fight detail page
    pub fight_url: String,

    /// URL of the event page this row was scraped from
    #[serde(default)]
    pub event_url: Option<String>,

    /// Outcome flag of the first listed fighter: "win", "draw" or "nc"
    pub winner: String,

    /// Profile URLs of both fighters, first listed first
    pub fighters_urls: Vec<String>,

    /// Weight class as displayed
    pub weight_class: String,

    /// Method text, short code and detail separated by a newline
    pub method: String,

    /// Round the fight ended in, as displayed
    pub round: String,

    /// Time into that round the fight ended, as displayed ("M:SS")
    pub time: String,

    /// Title bout marker (belt icon)
    #[serde(default)]
    pub title_fight: bool,

    /// Performance of the night bonus marker
    #[serde(default)]
    pub perf_bonus: bool,

    /// Fight of the night bonus marker
    #[serde(default)]
    pub fight_of_the_night: bool,
}

/// A fighter profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFighter {
    /// Fighter name as displayed
    pub full_name: String,

    /// URL of the profile page this record was scraped from
    #[serde(default)]
    pub fighter_url: Option<String>,

    /// Nickname without surrounding quotes, when present
    #[serde(default)]
    pub nickname: Option<String>,

    /// Height as displayed, e.g. "5' 10\""
    #[serde(default)]
    pub height: Option<String>,

    /// Reach as displayed, e.g. "71\""
    #[serde(default)]
    pub reach: Option<String>,

    /// Stance as displayed, e.g. "Orthodox"
    #[serde(default)]
    pub stance: Option<String>,

    /// Date of birth as displayed, e.g. "Jul 19, 1987"
    #[serde(default)]
    pub date_of_birth: Option<String>,

    /// Win-loss-draw record as displayed, e.g. "22-3-0"
    pub record: String,
}

/// One fighter's statistics for one round of one fight.
///
/// The general and significant-strikes tables of a fight page are merged
/// into a single record; rows are interleaved round by round, first listed
/// fighter first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRound {
    /// Round number, starting at 1
    pub round: u32,

    /// URL of the fight detail page this row was scraped from
    pub fight_url: String,

    /// Profile URL of the fighter this row belongs to
    pub fighter: String,

    /// Knockdowns scored
    #[serde(default)]
    pub kd: Option<String>,

    /// Significant strikes, "landed of attempted"
    #[serde(default)]
    pub sig_str: Option<String>,

    /// Significant strike accuracy, e.g. "41%"
    #[serde(default)]
    pub sig_str_pct: Option<String>,

    /// Total strikes, "landed of attempted"
    #[serde(default)]
    pub total_str: Option<String>,

    /// Takedowns, "landed of attempted"
    #[serde(default)]
    pub td: Option<String>,

    /// Takedown accuracy, e.g. "33%"
    #[serde(default)]
    pub td_pct: Option<String>,

    /// Submission attempts
    #[serde(default)]
    pub sub_att: Option<String>,

    /// Reversals
    #[serde(default)]
    pub rev: Option<String>,

    /// Control time, "M:SS"
    #[serde(default)]
    pub ctrl: Option<String>,

    /// Significant strikes to the head, "landed of attempted"
    #[serde(default)]
    pub head: Option<String>,

    /// Significant strikes to the body
    #[serde(default)]
    pub body: Option<String>,

    /// Significant strikes to the legs
    #[serde(default)]
    pub leg: Option<String>,

    /// Significant strikes at distance
    #[serde(default)]
    pub distance: Option<String>,

    /// Significant strikes in the clinch
    #[serde(default)]
    pub clinch: Option<String>,

    /// Significant strikes on the ground
    #[serde(default)]
    pub ground: Option<String>,
}
