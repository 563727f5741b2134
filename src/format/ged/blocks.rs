// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use super::GedParseError;

/// One non-blank source line with its declared level already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'a> {
    pub(crate) line_no: usize,
    pub(crate) level: u32,
    pub(crate) text: &'a str,
}

/// One level-grouped block: a header line plus the blocks of every line
/// declared deeper than it. A terminal record has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawBlock<'a> {
    pub(crate) header: SourceLine<'a>,
    pub(crate) children: Vec<RawBlock<'a>>,
}

/// Scans the body into `(line_no, level, text)` triples, skipping blank
/// lines entirely so they never count toward grouping.
pub(crate) fn scan_lines(text: &str) -> Result<Vec<SourceLine<'_>>, GedParseError> {
    let mut lines = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let line_no = index + 1;
        let level_token = line.split(' ').next().unwrap_or("");
        let level: u32 = level_token.parse().map_err(|_| GedParseError::InvalidLevel {
            line_no,
            line: line.to_owned(),
        })?;

        lines.push(SourceLine { line_no, level, text: line });
    }

    Ok(lines)
}

/// Groups lines recursively by declared level.
///
/// A line whose level is greater than the current header's belongs to that
/// header's sub-block; a level less than or equal to it starts a new sibling
/// group. Sub-blocks are grouped the same way in turn.
pub(crate) fn group_blocks<'a>(lines: &[SourceLine<'a>]) -> Vec<RawBlock<'a>> {
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let header = lines[index];
        let mut end = index + 1;
        while end < lines.len() && lines[end].level > header.level {
            end += 1;
        }

        blocks.push(RawBlock {
            header,
            children: group_blocks(&lines[index + 1..end]),
        });
        index = end;
    }

    blocks
}
