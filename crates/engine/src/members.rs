//! Trip members.
//!
//! A [`Member`] is an identity record supplied by the surrounding application.
//! The engine reads members to know which ids are valid balance holders and
//! never mutates them.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accent colors handed out to new members, cycled by roster position.
pub const MEMBER_COLORS: [&str; 12] = [
    "#FF5252", "#FF4081", "#E040FB", "#7C4DFF", "#536DFE", "#448AFF", "#40C4FF", "#18FFFF",
    "#69F0AE", "#EEFF41", "#FFD740", "#FF6E40",
];

/// Avatar glyphs handed out to new members, cycled by roster position.
pub const AVATARS: [&str; 14] = [
    "👽", "👾", "🤖", "👻", "🦄", "🐯", "🐙", "🦖", "🥑", "🍕", "🚀", "💎", "🔥", "⚡️",
];

/// Opaque member identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for MemberId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub color: String,
    pub avatar: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: &str, color: &str, avatar: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            color: color.to_string(),
            avatar: avatar.to_string(),
        }
    }

    /// Member with a generated id and the palette defaults for the given
    /// roster position.
    pub fn with_defaults(name: &str, position: usize) -> Self {
        Self::new(
            MemberId::generate(),
            name,
            MEMBER_COLORS[position % MEMBER_COLORS.len()],
            AVATARS[position % AVATARS.len()],
        )
    }
}
