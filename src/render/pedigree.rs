// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use super::layout::{spaced_points, LineTransition, SpacingOverflow, TransitionDirection};
use crate::model::{Genealogy, IndividualId, NameDisposition};

/// Label for an unknown ancestor slot.
const PLACEHOLDER: &str = "???";

/// Renders the pedigree chart around `root`.
///
/// A non-negative `depth` charts ancestors: generations `0..=depth` upward,
/// oldest on top, every row padded to `2^g` slots. A negative `depth` charts
/// descendants downward with true fan-out rows. `width` is the column count
/// of every row; a generation whose slots do not fit reports
/// [`PedigreeError::DepthUnsatisfiable`] so the caller can retry shallower.
pub fn render_pedigree(
    genealogy: &Genealogy,
    root: IndividualId,
    depth: i32,
    width: usize,
) -> Result<String, PedigreeError> {
    if genealogy.get(root).is_none() {
        return Err(PedigreeError::UnknownIndividual { id: root });
    }

    let rows = if depth >= 0 {
        draw_upward(genealogy, root, depth as u32, width)?
    } else {
        draw_downward(genealogy, root, depth.unsigned_abs(), width)?
    };

    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut chart = rows.join("\n");
    chart.push('\n');
    Ok(chart)
}

/// Ancestor chart: name rows interleaved with upward connector blocks,
/// generation `depth` first, the root last.
fn draw_upward(
    genealogy: &Genealogy,
    root: IndividualId,
    depth: u32,
    width: usize,
) -> Result<Vec<String>, PedigreeError> {
    // The widest row decides feasibility up front; everything below is
    // bounded by it, so later allocations stay proportional to the width.
    let widest = 1u64
        .checked_shl(depth)
        .filter(|points| points + 1 <= width as u64)
        .ok_or(PedigreeError::DepthUnsatisfiable {
            generation: depth as i32,
            points: 1usize.checked_shl(depth).unwrap_or(usize::MAX),
            width,
        })?;
    debug_assert!(widest <= width as u64);

    let mut rows = Vec::new();
    for generation in (0..=depth).rev() {
        let slots = genealogy.ancestor_slots(root, generation);
        let expected = 1usize << generation;
        if slots.len() != expected {
            return Err(PedigreeError::RowWidthMismatch {
                generation: generation as i32,
                expected,
                actual: slots.len(),
            });
        }

        rows.extend(
            name_rows(genealogy, &slots, width)
                .map_err(|overflow| unsatisfiable(generation as i32, overflow))?,
        );

        if generation > 0 {
            let below = genealogy.ancestor_slots(root, generation - 1);
            let transition = LineTransition::between_parents(genealogy, &below);
            // An all-placeholder boundary has nothing to draw; skip the grid.
            if transition.has_links() {
                rows.extend(
                    transition
                        .render(width, TransitionDirection::Upward)
                        .map_err(|overflow| unsatisfiable(generation as i32, overflow))?,
                );
            }
        }
    }

    Ok(rows)
}

/// Descendant chart: natural order, the root first.
///
/// The chart stops at the first generation with no children. An immediately
/// childless root yields no chart at all rather than a lone name row.
fn draw_downward(
    genealogy: &Genealogy,
    root: IndividualId,
    generations: u32,
    width: usize,
) -> Result<Vec<String>, PedigreeError> {
    let mut current = vec![root];
    let mut rows = name_rows(genealogy, &as_slots(&current), width)
        .map_err(|overflow| unsatisfiable(0, overflow))?;

    for generation in 1..=generations {
        let (transition, next) = LineTransition::between_children(genealogy, &current);
        if next.is_empty() {
            if generation == 1 {
                return Ok(Vec::new());
            }
            break;
        }

        let signed = -(generation as i32);
        rows.extend(
            transition
                .render(width, TransitionDirection::Downward)
                .map_err(|overflow| unsatisfiable(signed, overflow))?,
        );
        rows.extend(
            name_rows(genealogy, &as_slots(&next), width)
                .map_err(|overflow| unsatisfiable(signed, overflow))?,
        );
        current = next;
    }

    Ok(rows)
}

fn as_slots(row: &[IndividualId]) -> Vec<Option<IndividualId>> {
    row.iter().copied().map(Some).collect()
}

fn unsatisfiable(generation: i32, overflow: SpacingOverflow) -> PedigreeError {
    PedigreeError::DepthUnsatisfiable {
        generation,
        points: overflow.points,
        width: overflow.width,
    }
}

/// The two text lines of one generation's name row.
fn name_rows(
    genealogy: &Genealogy,
    slots: &[Option<IndividualId>],
    width: usize,
) -> Result<Vec<String>, SpacingOverflow> {
    let points = spaced_points(slots.len(), width)?;
    let dispositions: Vec<NameDisposition> = slots
        .iter()
        .map(|slot| match slot.and_then(|id| genealogy.get(id)) {
            Some(individual) => individual.name_disposition(),
            None => NameDisposition {
                top: PLACEHOLDER.to_owned(),
                bottom: PLACEHOLDER.to_owned(),
            },
        })
        .collect();

    let line = |pick: fn(&NameDisposition) -> &str| {
        let entries: Vec<(usize, &str)> = points
            .iter()
            .zip(&dispositions)
            .map(|(point, disposition)| (*point, pick(disposition)))
            .collect();
        centered_line(&entries, width)
    };

    Ok(vec![
        line(|disposition| disposition.top.as_str()),
        line(|disposition| disposition.bottom.as_str()),
    ])
}

/// Writes each label centered on its point (`point - len / 2`), clipping at
/// the row edges. Labels of crowded neighboring points may overwrite each
/// other; dense layouts degrade by overlap, not by error. Underscores read
/// as spaces.
fn centered_line(entries: &[(usize, &str)], width: usize) -> String {
    let mut cells = vec![' '; width];
    for (point, text) in entries {
        let label = text.replace('_', " ");
        let len = label.chars().count();
        let start = point.saturating_sub(len / 2);
        for (offset, ch) in label.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + offset) {
                *cell = ch;
            }
        }
    }
    cells.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PedigreeError {
    /// A generation needs more points than the width can space out.
    DepthUnsatisfiable { generation: i32, points: usize, width: usize },
    /// An ancestor row came back with the wrong slot count.
    RowWidthMismatch { generation: i32, expected: usize, actual: usize },
    UnknownIndividual { id: IndividualId },
}

impl fmt::Display for PedigreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthUnsatisfiable { generation, points, width } => {
                write!(
                    f,
                    "generation {generation} needs {points} slots, more than {width} columns can hold"
                )
            }
            Self::RowWidthMismatch { generation, expected, actual } => {
                write!(
                    f,
                    "ancestor row {generation} has {actual} slots instead of {expected}"
                )
            }
            Self::UnknownIndividual { id } => {
                write!(f, "no individual with id {id} in this file")
            }
        }
    }
}

impl std::error::Error for PedigreeError {}
