//! Per-username display colors.
//!
//! Every username renders in the same color for the whole session: the tag
//! is a pure function of the name (sum of character codes into the non-white
//! palette). White is reserved for message bodies and the System tag is
//! fixed, so notices are always visually distinct from users.

use std::collections::HashMap;

use parlor_proto::SYSTEM_USERNAME;

/// A named display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// `#FF6B6B`
    Red,
    /// `#4AFF65`
    Green,
    /// `#63B8FF`
    Blue,
    /// `#FFF07C`
    Yellow,
    /// `#FF5DC8`
    Magenta,
    /// `#00FFFF`
    Cyan,
    /// `#FFFFFF` — reserved, never assigned to a user by the hash.
    White,
}

/// Hash palette, in hashing order. White is excluded.
pub const USER_COLORS: [ColorToken; 6] = [
    ColorToken::Red,
    ColorToken::Green,
    ColorToken::Blue,
    ColorToken::Yellow,
    ColorToken::Magenta,
    ColorToken::Cyan,
];

impl ColorToken {
    /// Hex rendering of this color.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#FF6B6B",
            Self::Green => "#4AFF65",
            Self::Blue => "#63B8FF",
            Self::Yellow => "#FFF07C",
            Self::Magenta => "#FF5DC8",
            Self::Cyan => "#00FFFF",
            Self::White => "#FFFFFF",
        }
    }

    /// Lowercase color name, as announced in recolor notices.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    /// Parse a color name. White is parseable but never hash-assigned.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "yellow" => Some(Self::Yellow),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            _ => None,
        }
    }
}

/// Display tag for a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTag {
    /// Fixed tag for system notices.
    System,
    /// Per-username color.
    User(ColorToken),
}

/// Deterministic username-to-tag mapping with a configurable exception
/// table.
///
/// The exception table exists for deployments that pin specific usernames to
/// fixed colors; the default table is empty.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    overrides: HashMap<String, ColorToken>,
}

impl Palette {
    /// Palette with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `username` to a fixed color, bypassing the hash.
    pub fn with_override(mut self, username: impl Into<String>, color: ColorToken) -> Self {
        self.overrides.insert(username.into(), color);
        self
    }

    /// Display tag for a username.
    ///
    /// `"System"` always maps to [`DisplayTag::System`], overrides included.
    pub fn tag_for(&self, username: &str) -> DisplayTag {
        if username == SYSTEM_USERNAME {
            return DisplayTag::System;
        }
        if let Some(color) = self.overrides.get(username) {
            return DisplayTag::User(*color);
        }
        let index = username.chars().map(|c| c as usize).sum::<usize>() % USER_COLORS.len();
        DisplayTag::User(USER_COLORS[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_username_same_tag() {
        let palette = Palette::new();
        assert_eq!(palette.tag_for("bob"), palette.tag_for("bob"));
    }

    #[test]
    fn bob_hashes_to_green() {
        // 'b' + 'o' + 'b' = 307; 307 % 6 = 1 -> green
        assert_eq!(Palette::new().tag_for("bob"), DisplayTag::User(ColorToken::Green));
    }

    #[test]
    fn system_tag_is_fixed_even_with_override() {
        let palette = Palette::new().with_override(SYSTEM_USERNAME, ColorToken::Red);
        assert_eq!(palette.tag_for(SYSTEM_USERNAME), DisplayTag::System);
    }

    #[test]
    fn override_beats_hash() {
        let palette = Palette::new().with_override("jack", ColorToken::Red);
        assert_eq!(palette.tag_for("jack"), DisplayTag::User(ColorToken::Red));
        // Unrelated users still hash.
        assert_eq!(palette.tag_for("bob"), DisplayTag::User(ColorToken::Green));
    }

    #[test]
    fn hash_never_yields_white() {
        let palette = Palette::new();
        for name in ["a", "ab", "abc", "abcd", "abcde", "abcdef", "zzzzzz"] {
            assert_ne!(palette.tag_for(name), DisplayTag::User(ColorToken::White));
        }
    }
}
