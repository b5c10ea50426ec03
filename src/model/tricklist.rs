//! Trick list entries and pro videos.

use serde::{Deserialize, Serialize};

use super::entities::Stance;
use crate::core::Identified;
use crate::core::constants::MAX_TRICK_SCORE;

/// One trick on a user's trick list with the scores of their attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickListEntry {
    /// Trick identifier.
    pub id: String,
    /// Trick display name.
    #[serde(default)]
    pub name: String,
    /// Scores of recorded attempts, each `0..=3`.
    #[serde(default)]
    pub attempts: Vec<u8>,
}

impl TrickListEntry {
    /// Best attempt score, clamped to the score range.
    ///
    /// `None` when nothing has been attempted yet.
    pub fn rating(&self) -> Option<u8> {
        self.attempts
            .iter()
            .copied()
            .max()
            .map(|s| s.min(MAX_TRICK_SCORE))
    }
}

impl Identified for TrickListEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A professional skater's video of a trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProVideo {
    /// Video id.
    pub id: String,
    /// Trick identifier.
    pub trick_id: String,
    /// Skater name.
    pub pro_name: String,
    /// Video location.
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ProVideo {
    /// Stance encoded in the trick identifier.
    pub fn stance(&self) -> Option<Stance> {
        Stance::from_trick_id(&self.trick_id)
    }
}

impl Identified for ProVideo {
    fn id(&self) -> &str {
        &self.id
    }
}
