//! Character groups used for password generation.

use serde::{Deserialize, Serialize};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "&€#/\\)($*!<>+-=";

/// Shortest password the generator will produce
pub const MIN_LENGTH: usize = 2;
/// Longest password the generator will produce
pub const MAX_LENGTH: usize = 128;

/// Which character classes the user has ticked, plus the requested length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub use_symbols: bool,
    pub use_uppercase: bool,
    pub use_digits: bool,
    pub use_lowercase: bool,
    /// Raw length as typed; see [`GenerationOptions::length`]
    pub length: i64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            use_symbols: true,
            use_uppercase: true,
            use_digits: true,
            use_lowercase: true,
            length: 16,
        }
    }
}

impl GenerationOptions {
    /// Requested length clamped to `[MIN_LENGTH, MAX_LENGTH]`
    pub fn length(&self) -> usize {
        clamp_length(self.length)
    }
}

/// Coerce any typed length into the supported range.
///
/// Negative or too-small values become `MIN_LENGTH`, anything above
/// `MAX_LENGTH` becomes `MAX_LENGTH`.
pub fn clamp_length(raw: i64) -> usize {
    raw.clamp(MIN_LENGTH as i64, MAX_LENGTH as i64) as usize
}

/// One bucket of characters drawn from as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGroup(Vec<char>);

impl CharGroup {
    fn new(chars: &str) -> Self {
        Self(chars.chars().collect())
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }
}

/// Ordered, never-empty list of character groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    groups: Vec<CharGroup>,
}

impl Charset {
    pub fn groups(&self) -> &[CharGroup] {
        &self.groups
    }

    /// True if `c` belongs to one of the groups
    pub fn contains(&self, c: char) -> bool {
        self.groups.iter().any(|g| g.contains(c))
    }
}

/// Assemble the active groups in the order symbols, uppercase, digits,
/// lowercase. Lowercase is used when nothing else was selected.
pub fn build_charset(options: &GenerationOptions) -> Charset {
    let mut groups = Vec::new();

    if options.use_symbols {
        groups.push(CharGroup::new(SYMBOLS));
    }
    if options.use_uppercase {
        groups.push(CharGroup::new(UPPERCASE));
    }
    if options.use_digits {
        groups.push(CharGroup::new(DIGITS));
    }
    if options.use_lowercase || groups.is_empty() {
        groups.push(CharGroup::new(LOWERCASE));
    }

    Charset { groups }
}
