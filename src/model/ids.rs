// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

/// Numeric identity of an individual, extracted from a GEDCOM reference token.
///
/// `@I13@` carries the id `13`: the delimiters are stripped, the alphabetic
/// type prefix is skipped, and the remaining digits are the id. Individuals
/// are keyed and sorted by this number everywhere (lookup tables, `list`
/// output, ambiguity reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(u32);

impl IndividualId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Extracts the numeric id from a delimited reference token such as `@I13@`.
    pub fn from_reference(reference: &str) -> Result<Self, InvalidReferenceError> {
        let inner = reference.trim_matches('@');
        let digits = inner.trim_start_matches(|ch: char| ch.is_ascii_alphabetic());
        if digits.is_empty() {
            return Err(InvalidReferenceError { reference: reference.to_owned() });
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| InvalidReferenceError { reference: reference.to_owned() })?;

        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IndividualId {
    type Err = InvalidReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.parse::<u32>() {
            return Ok(Self(value));
        }
        Self::from_reference(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReferenceError {
    pub reference: String,
}

impl fmt::Display for InvalidReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reference token carries no numeric id: {:?}", self.reference)
    }
}

impl std::error::Error for InvalidReferenceError {}

/// Index of a record inside its [`RecordTree`](crate::model::RecordTree) arena.
///
/// Record ids are only meaningful against the tree that issued them; the tree
/// owns every record and hands out ids instead of pointers, so parent/child
/// and resolved-reference links stay cycle-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::IndividualId;

    #[test]
    fn from_reference_extracts_numeric_id() {
        let id = IndividualId::from_reference("@I13@").expect("individual id");
        assert_eq!(id.value(), 13);
        assert_eq!(id.to_string(), "13");
    }

    #[test]
    fn from_reference_rejects_non_numeric_tokens() {
        IndividualId::from_reference("@SUBM@").unwrap_err();
        IndividualId::from_reference("@@").unwrap_err();
        IndividualId::from_reference("@I@").unwrap_err();
    }

    #[test]
    fn from_str_accepts_bare_numbers_and_reference_tokens() {
        let bare: IndividualId = "42".parse().expect("bare id");
        let token: IndividualId = "@I42@".parse().expect("token id");
        assert_eq!(bare, token);
    }
}
