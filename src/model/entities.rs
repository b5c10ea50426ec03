//! Entities resolved by point lookups.

use serde::{Deserialize, Serialize};

use crate::core::constants::collections;
use crate::core::{Entity, Identified};

/// Riding orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Natural stance.
    Regular,
    /// Natural stance, rolling backwards.
    Fakie,
    /// Opposite stance.
    Switch,
    /// Opposite stance, popping off the nose.
    Nollie,
}

impl Stance {
    /// All stances in display order.
    pub const ALL: [Stance; 4] = [Self::Regular, Self::Fakie, Self::Switch, Self::Nollie];

    /// Derive the stance from a trick identifier.
    ///
    /// Identifiers are fixed-width digit strings; the count of leading zeros
    /// selects the stance (0 regular, 1 fakie, 2 switch, 3 or more nollie).
    /// Returns `None` for anything that is not a non-empty digit string.
    pub fn from_trick_id(trick_id: &str) -> Option<Self> {
        if trick_id.is_empty() || !trick_id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let zeros = trick_id.bytes().take_while(|&b| b == b'0').count();
        Some(match zeros {
            0 => Self::Regular,
            1 => Self::Fakie,
            2 => Self::Switch,
            _ => Self::Nollie,
        })
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Fakie => "Fakie",
            Self::Switch => "Switch",
            Self::Nollie => "Nollie",
        }
    }
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: String,
    /// Public handle.
    pub username: String,
    /// Display name, if set.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Default riding stance.
    #[serde(default)]
    pub stance: Option<Stance>,
    /// Profile picture location.
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl Entity for User {
    const COLLECTION: &'static str = collections::USERS;
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A community video post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post id.
    pub id: String,
    /// Author's user id.
    pub author_id: String,
    /// Trick shown in the video, if tagged.
    #[serde(default)]
    pub trick_id: Option<String>,
    /// Caption text.
    #[serde(default)]
    pub caption: String,
    /// Video location.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl Entity for Post {
    const COLLECTION: &'static str = collections::POSTS;
}

/// A comment on a post, or a reply to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: String,
    /// Post the comment belongs to.
    pub post_id: String,
    /// Author's user id.
    pub author_id: String,
    /// Comment text.
    pub body: String,
    /// Comment this one replies to.
    #[serde(default)]
    pub base_comment_id: Option<String>,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl Entity for Comment {
    const COLLECTION: &'static str = collections::COMMENTS;
}

/// A trick from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    /// Trick identifier (fixed-width digit string).
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Trick {
    /// Stance encoded in the identifier.
    pub fn stance(&self) -> Option<Stance> {
        Stance::from_trick_id(&self.id)
    }
}

impl Entity for Trick {
    const COLLECTION: &'static str = collections::TRICKS;
}

/// A direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Sender's user id.
    pub sender_id: String,
    /// Message text.
    pub body: String,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl Entity for Message {
    const COLLECTION: &'static str = collections::MESSAGES;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_from_trick_id() {
        assert_eq!(Stance::from_trick_id("1203"), Some(Stance::Regular));
        assert_eq!(Stance::from_trick_id("0203"), Some(Stance::Fakie));
        assert_eq!(Stance::from_trick_id("0013"), Some(Stance::Switch));
        assert_eq!(Stance::from_trick_id("0003"), Some(Stance::Nollie));
        assert_eq!(Stance::from_trick_id("0000"), Some(Stance::Nollie));
    }

    #[test]
    fn test_stance_rejects_non_digits() {
        assert_eq!(Stance::from_trick_id(""), None);
        assert_eq!(Stance::from_trick_id("kickflip"), None);
        assert_eq!(Stance::from_trick_id("01a3"), None);
    }

    #[test]
    fn test_trick_stance() {
        let trick = Trick {
            id: "0042".into(),
            name: "Switch heelflip".into(),
        };
        assert_eq!(trick.stance(), Some(Stance::Switch));
    }

    #[test]
    fn test_user_optional_fields_default() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "username": "tony",
        }))
        .unwrap();
        assert_eq!(user.display_name, None);
        assert_eq!(user.stance, None);
    }

    #[test]
    fn test_stance_serde_lowercase() {
        let value = serde_json::to_value(Stance::Nollie).unwrap();
        assert_eq!(value, serde_json::json!("nollie"));
    }
}
