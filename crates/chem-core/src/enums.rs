//! Workflow phase, medal, and structure format enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Phase of the submission workflow, derived from which pieces of session
/// state are present.
///
/// ```text
/// empty → drafted → scored → empty (after submission)
///           ↑  └──────┘ │
///           └───────────┘ (structure changed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No structure drawn.
    Empty,
    /// Structure present, no score yet.
    Drafted,
    /// Structure and score present; ready to submit.
    Scored,
}

impl Phase {
    /// Derive the phase from the presence of notation and score.
    ///
    /// A score without a structure is not a reachable state and reads as
    /// `Empty`.
    #[must_use]
    pub const fn derive(has_structure: bool, has_score: bool) -> Self {
        match (has_structure, has_score) {
            (false, _) => Self::Empty,
            (true, false) => Self::Drafted,
            (true, true) => Self::Scored,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Drafted => "drafted",
            Self::Scored => "scored",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Medal
// ---------------------------------------------------------------------------

/// Display badge for the three best-ranked compounds. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based leaderboard position.
    #[must_use]
    pub const fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }

    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StructureFormat
// ---------------------------------------------------------------------------

/// Interchange format between the workflow and the drawing editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StructureFormat {
    /// MDL molfile block, what the editor exports.
    Mol,
    /// SMILES line notation, what the predictor returns.
    Smiles,
}

impl StructureFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mol => "mol",
            Self::Smiles => "smiles",
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
