//! Cleaned, typed row structures produced by the cleaning stage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical finish method categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    KoTko,
    Submission,
    DecisionUnanimous,
    DecisionSplit,
    DecisionMajority,
    Dq,
    Nc,
    Other,
}

impl MethodKind {
    /// Categorize a method string from a results row.
    ///
    /// Accepts both the short codes ufcstats uses in result tables
    /// ("KO/TKO", "SUB", "U-DEC", "S-DEC", "M-DEC", "CNC") and the longer
    /// phrasings seen on fight pages ("Submission", "Decision - Split").
    /// Anything unrecognized maps to [`MethodKind::Other`].
    pub fn parse(method: &str) -> Self {
        let m = method.trim().to_uppercase();
        if m.starts_with("U-DEC") || m.contains("UNANIMOUS") {
            MethodKind::DecisionUnanimous
        } else if m.starts_with("S-DEC") || m.contains("SPLIT") {
            MethodKind::DecisionSplit
        } else if m.starts_with("M-DEC") || m.contains("MAJORITY") {
            MethodKind::DecisionMajority
        } else if m.starts_with("SUB") || m.contains("SUBMISSION") {
            MethodKind::Submission
        } else if m.contains("KO") {
            MethodKind::KoTko
        } else if m.starts_with("DQ") || m.contains("DISQUALIFICATION") {
            MethodKind::Dq
        } else if m.starts_with("CNC") || m == "NC" || m.contains("NO CONTEST") {
            MethodKind::Nc
        } else {
            MethodKind::Other
        }
    }

    /// Stable uppercase name stored in the cleaned table.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::KoTko => "KO_TKO",
            MethodKind::Submission => "SUBMISSION",
            MethodKind::DecisionUnanimous => "DECISION_UNANIMOUS",
            MethodKind::DecisionSplit => "DECISION_SPLIT",
            MethodKind::DecisionMajority => "DECISION_MAJORITY",
            MethodKind::Dq => "DQ",
            MethodKind::Nc => "NC",
            MethodKind::Other => "OTHER",
        }
    }
}

/// A cleaned event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Identifier from the tail of the event detail URL
    pub event_id: String,

    /// Event name
    pub name: String,

    /// Event date
    pub date: NaiveDate,

    /// Full location string as scraped
    pub location: String,

    /// City component of the location
    pub city: String,

    /// State/region component, when the location has three parts
    pub state: Option<String>,

    /// Country component
    pub country: Option<String>,
}

/// A cleaned fight result.
#[derive(Debug, Clone, PartialEq)]
pub struct FightResult {
    /// Identifier from the tail of the fight detail URL
    pub fight_id: String,

    /// Event this fight belongs to
    pub event_id: String,

    /// First listed fighter
    pub fighter_a_id: String,

    /// Second listed fighter
    pub fighter_b_id: String,

    /// Winning fighter, `None` for draws and no contests
    pub winner_id: Option<String>,

    /// Canonical finish method
    pub method: MethodKind,

    /// Free-text method detail, e.g. "Rear Naked Choke"
    pub method_detail: Option<String>,

    /// Round the fight ended in
    pub round_ended: u32,

    /// Seconds into the final round at the stoppage
    pub time_ended_secs: u32,

    /// Total fight length in seconds, assuming five-minute rounds
    pub fight_duration_secs: u32,

    /// Weight class as displayed
    pub weight_class: String,

    /// Title bout
    pub title_fight: bool,

    /// Performance of the night bonus
    pub perf_bonus: bool,

    /// Fight of the night bonus
    pub fight_of_the_night: bool,
}

/// A cleaned fighter profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    /// Identifier from the tail of the profile URL
    pub fighter_id: String,

    /// Fighter name
    pub name: String,

    /// Nickname, when present
    pub nickname: Option<String>,

    /// Height in centimeters
    pub height_cm: Option<f64>,

    /// Reach in centimeters
    pub reach_cm: Option<f64>,

    /// Stance as displayed
    pub stance: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,

    /// Record string as displayed, e.g. "22-3-0"
    pub record: String,

    /// Wins parsed out of the record string
    pub wins: Option<u32>,

    /// Losses parsed out of the record string
    pub losses: Option<u32>,

    /// Draws parsed out of the record string
    pub draws: Option<u32>,
}

/// One fighter's cleaned statistics for one round of one fight.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStat {
    /// Fight this round belongs to
    pub fight_id: String,

    /// Round number, starting at 1
    pub round_number: u32,

    /// Fighter these statistics belong to
    pub fighter_id: String,

    /// Knockdowns scored
    pub knockdowns: u32,

    /// Significant strikes landed
    pub sig_strikes_landed: u32,

    /// Significant strikes attempted
    pub sig_strikes_attempted: u32,

    /// Significant strike accuracy in percent, when displayed
    pub sig_strike_pct: Option<f64>,

    /// Total strikes landed
    pub total_strikes_landed: u32,

    /// Total strikes attempted
    pub total_strikes_attempted: u32,

    /// Takedowns landed
    pub takedowns_landed: u32,

    /// Takedowns attempted
    pub takedowns_attempted: u32,

    /// Takedown accuracy in percent, when displayed
    pub takedown_pct: Option<f64>,

    /// Submission attempts
    pub submission_attempts: u32,

    /// Reversals
    pub reversals: u32,

    /// Control time in seconds, when displayed
    pub control_secs: Option<u32>,

    /// Head strikes landed/attempted, from the breakdown table
    pub head_landed: Option<u32>,
    pub head_attempted: Option<u32>,

    /// Body strikes landed/attempted
    pub body_landed: Option<u32>,
    pub body_attempted: Option<u32>,

    /// Leg strikes landed/attempted
    pub leg_landed: Option<u32>,
    pub leg_attempted: Option<u32>,

    /// Strikes at distance landed/attempted
    pub distance_landed: Option<u32>,
    pub distance_attempted: Option<u32>,

    /// Clinch strikes landed/attempted
    pub clinch_landed: Option<u32>,
    pub clinch_attempted: Option<u32>,

    /// Ground strikes landed/attempted
    pub ground_landed: Option<u32>,
    pub ground_attempted: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_kind_categorizes_short_codes() {
        assert_eq!(MethodKind::parse("KO/TKO"), MethodKind::KoTko);
        assert_eq!(MethodKind::parse("SUB"), MethodKind::Submission);
        assert_eq!(MethodKind::parse("U-DEC"), MethodKind::DecisionUnanimous);
        assert_eq!(MethodKind::parse("S-DEC"), MethodKind::DecisionSplit);
        assert_eq!(MethodKind::parse("M-DEC"), MethodKind::DecisionMajority);
        assert_eq!(MethodKind::parse("DQ"), MethodKind::Dq);
        assert_eq!(MethodKind::parse("CNC"), MethodKind::Nc);
    }

    #[test]
    fn method_kind_categorizes_long_phrasings() {
        assert_eq!(
            MethodKind::parse("Submission (Rear Naked Choke)"),
            MethodKind::Submission
        );
        assert_eq!(
            MethodKind::parse("Decision - Unanimous"),
            MethodKind::DecisionUnanimous
        );
        assert_eq!(MethodKind::parse("TKO - Doctor's Stoppage"), MethodKind::KoTko);
        assert_eq!(MethodKind::parse("Could Not Continue"), MethodKind::Other);
        assert_eq!(MethodKind::parse("Overturned"), MethodKind::Other);
    }
}
