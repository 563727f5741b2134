// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! Parser for the level-numbered genealogical exchange format.
//!
//! Parsing runs in four stages over the whole input: scan lines, group them
//! into nested blocks by level, build the record arena, then resolve
//! `@`-delimited cross-references. Malformed structure is a hard error;
//! references that point nowhere are collected and handed back to the caller
//! instead.

pub(crate) mod blocks;
mod export;
pub(crate) mod records;
mod resolve;

use std::fmt;

pub use export::export_gedcom;
pub use resolve::DanglingReference;

use crate::model::RecordTree;

/// A fully parsed file: the record arena plus every dangling reference the
/// resolver found.
#[derive(Debug, Clone)]
pub struct ParsedGed {
    tree: RecordTree,
    dangling: Vec<DanglingReference>,
}

impl ParsedGed {
    pub fn tree(&self) -> &RecordTree {
        &self.tree
    }

    pub fn into_tree(self) -> RecordTree {
        self.tree
    }

    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }
}

/// Parses a complete file body.
///
/// The body must open with a level-zero `HEAD` record. A leading byte order
/// mark is tolerated; blank lines are skipped everywhere.
pub fn parse_gedcom(text: &str) -> Result<ParsedGed, GedParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if !text.starts_with("0 HEAD") {
        return Err(GedParseError::MissingHeader);
    }

    let lines = blocks::scan_lines(text)?;
    let grouped = blocks::group_blocks(&lines);
    let mut tree = records::build_records(&grouped)?;
    let dangling = resolve::resolve_references(&mut tree)?;

    Ok(ParsedGed { tree, dangling })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GedParseError {
    MissingHeader,
    InvalidLevel { line_no: usize, line: String },
    MissingTag { line_no: usize, line: String },
    DuplicateReference { reference: String },
}

impl fmt::Display for GedParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => {
                write!(f, "file does not start with a level-zero HEAD record")
            }
            Self::InvalidLevel { line_no, line } => {
                write!(f, "line {line_no} does not start with an integer level: {line:?}")
            }
            Self::MissingTag { line_no, line } => {
                write!(f, "line {line_no} has no tag after its level: {line:?}")
            }
            Self::DuplicateReference { reference } => {
                write!(f, "reference id {reference} is declared by more than one record")
            }
        }
    }
}

impl std::error::Error for GedParseError {}
