//! Exhibitor records and booth codes
//!
//! Records are immutable once loaded. The loader converts the loosely shaped
//! hall data files into [`ExhibitorRecord`] values and the index builder
//! validates them before anything is served.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to records that do not declare one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Floor-plan coordinates of a booth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A single exhibitor in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitorRecord {
    pub code: String,
    /// Primary-language display name (Arabic in the hall data files)
    pub name_primary: String,
    /// Secondary-language display name (English in the hall data files)
    pub name_secondary: String,
    pub hall: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ExhibitorRecord {
    pub fn new(
        code: impl Into<String>,
        name_primary: impl Into<String>,
        name_secondary: impl Into<String>,
        hall: u32,
    ) -> Self {
        Self {
            code: code.into(),
            name_primary: name_primary.into(),
            name_secondary: name_secondary.into(),
            hall,
            section: None,
            category: DEFAULT_CATEGORY.to_string(),
            categories: Vec::new(),
            events: Vec::new(),
            position: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    /// Name shown to visitors: the primary name, or the secondary one when
    /// the primary is missing
    pub fn display_name(&self) -> &str {
        if self.name_primary.trim().is_empty() {
            &self.name_secondary
        } else {
            &self.name_primary
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name_primary.trim().is_empty() || !self.name_secondary.trim().is_empty()
    }

    /// Structured form of the booth code, if it follows `<letters><digits>`
    pub fn booth_code(&self) -> Option<BoothCode> {
        BoothCode::parse(&self.code)
    }
}

/// A booth code split into its letter prefix and number, e.g. `B29`
///
/// `width` is the number of digits as written, so that zero-padded codes
/// such as `A07` can be reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoothCode {
    letters: String,
    number: u32,
    width: usize,
}

impl BoothCode {
    /// Parse `<letters><digits>`; whitespace anywhere is ignored
    pub fn parse(code: &str) -> Option<Self> {
        let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        let split = compact.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = compact.split_at(split);

        if letters.is_empty() || !letters.chars().all(char::is_alphabetic) {
            return None;
        }
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let number = digits.parse::<u32>().ok()?;
        Some(Self {
            letters: letters.to_string(),
            number,
            width: digits.len(),
        })
    }

    pub fn letters(&self) -> &str {
        &self.letters
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Case-folded letters and number; `A08`, `a8` and `A8` share one identity
    pub fn identity(&self) -> (String, u32) {
        (self.letters.to_lowercase(), self.number)
    }
}

impl fmt::Display for BoothCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.letters, self.number, width = self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_booth_code() {
        let code = BoothCode::parse("B29").unwrap();
        assert_eq!(code.letters(), "B");
        assert_eq!(code.number(), 29);
        assert_eq!(code.to_string(), "B29");

        let spaced = BoothCode::parse(" ab 7 ").unwrap();
        assert_eq!(spaced.letters(), "ab");
        assert_eq!(spaced.number(), 7);
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        assert!(BoothCode::parse("").is_none());
        assert!(BoothCode::parse("29").is_none());
        assert!(BoothCode::parse("B").is_none());
        assert!(BoothCode::parse("B2C").is_none());
        assert!(BoothCode::parse("B-29").is_none());
        assert!(BoothCode::parse("B99999999999").is_none());
    }

    #[test]
    fn test_padded_code_keeps_its_spelling() {
        let code = BoothCode::parse("A08").unwrap();
        assert_eq!(code.number(), 8);
        assert_eq!(code.to_string(), "A08");
        assert_eq!(BoothCode::parse("a8").unwrap().identity(), code.identity());
    }

    #[test]
    fn test_display_name_falls_back_to_secondary() {
        let record = ExhibitorRecord::new("C3", "", "Sunrise Books", 2);
        assert_eq!(record.display_name(), "Sunrise Books");

        let record = ExhibitorRecord::new("C3", "دار الشروق", "Dar Al-Shorouk", 2);
        assert_eq!(record.display_name(), "دار الشروق");
    }

    #[test]
    fn test_record_defaults_category() {
        let record = ExhibitorRecord::new("A1", "x", "", 1);
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert!(record.events.is_empty());
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
