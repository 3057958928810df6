//! Validated value types shared across the MBS crates.
//!
//! Each type here can only be constructed through a checking constructor, so holding one is
//! proof that the input was validated once at the edge.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing an MBS item code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemCodeError {
    #[error("item code cannot be empty")]
    Empty,
    #[error("'{0}' is not an MBS item code (expected 1-5 digits and an optional letter)")]
    Malformed(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// An MBS item number, e.g. `30175` or `105A`.
///
/// Item codes are one to five ASCII digits optionally followed by a single letter. The
/// letter is matched case-insensitively and stored upper-cased, which is how the schedule
/// itself publishes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemCode(String);

impl ItemCode {
    pub const MAX_DIGITS: usize = 5;

    /// Parses and normalises an item code.
    ///
    /// Surrounding whitespace is ignored. Anything else that does not fit the
    /// digits-then-optional-letter shape is rejected.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ItemCodeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ItemCodeError::Empty);
        }
        if !Self::looks_like_item_code(trimmed) {
            return Err(ItemCodeError::Malformed(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns true if `candidate` has the shape of an item code.
    ///
    /// No trimming is done here; callers decide how to treat whitespace.
    pub fn looks_like_item_code(candidate: &str) -> bool {
        let bytes = candidate.as_bytes();
        let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || digits > Self::MAX_DIGITS {
            return false;
        }
        match &bytes[digits..] {
            [] => true,
            [letter] => letter.is_ascii_alphabetic(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ItemCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ItemCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ItemCode::parse(&s).map_err(serde::de::Error::custom)
    }
}
