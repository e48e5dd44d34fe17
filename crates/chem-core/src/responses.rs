//! CLI response types returned as JSON by `cclab` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CompoundEntry, Prediction, ScanResult};
use crate::enums::{Medal, Phase};
use crate::leaderboard::RankedEntry;

/// An owned leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Standing {
    pub position: usize,
    pub medal: Option<Medal>,
    #[serde(flatten)]
    pub entry: CompoundEntry,
}

impl From<RankedEntry<'_>> for Standing {
    fn from(ranked: RankedEntry<'_>) -> Self {
        Self {
            position: ranked.position,
            medal: ranked.medal,
            entry: ranked.entry.clone(),
        }
    }
}

/// Response from `cclab leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LeaderboardResponse {
    pub total: usize,
    pub standings: Vec<Standing>,
}

impl LeaderboardResponse {
    /// Rank `entries` and keep at most `limit` rows. `total` always counts
    /// every entry.
    #[must_use]
    pub fn from_entries(entries: &[CompoundEntry], limit: Option<usize>) -> Self {
        let standings = crate::leaderboard::rank(entries)
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(Standing::from)
            .collect();
        Self {
            total: entries.len(),
            standings,
        }
    }
}

/// Response from `cclab predict`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PredictResponse {
    pub phase: Phase,
    pub prediction: Prediction,
}

/// Response from `cclab scan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScanResponse {
    pub phase: Phase,
    pub scan: ScanResult,
}

/// Response from `cclab submit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubmitResponse {
    pub submitted: CompoundEntry,
    /// Position of the submitted entry in the refreshed leaderboard.
    pub position: Option<usize>,
    pub leaderboard: LeaderboardResponse,
}
