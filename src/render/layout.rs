// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use super::{line_char_from_edges, Grid, LineEdges, LINE_VERTICAL};
use crate::model::{Genealogy, IndividualId};

/// Rows of one connector block between two adjacent name rows.
pub(crate) const TRANSITION_HEIGHT: usize = 5;

/// The row inside a connector block where lines turn sideways.
const TURN_ROW: usize = TRANSITION_HEIGHT / 2;

/// Evenly spaces `count` points over `width` columns: the gap is
/// `width / (count + 1)` and point `i` sits at `gap * (i + 1)`. Name rows and
/// connector rows use the same placement so columns line up exactly.
pub fn spaced_points(count: usize, width: usize) -> Result<Vec<usize>, SpacingOverflow> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let gap = width / (count + 1);
    if gap == 0 {
        return Err(SpacingOverflow { points: count, width });
    }

    Ok((1..=count).map(|i| gap * i).collect())
}

/// Too many points for the available columns; the row cannot be laid out at
/// this width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingOverflow {
    pub points: usize,
    pub width: usize,
}

impl fmt::Display for SpacingOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points do not fit into {} columns", self.points, self.width)
    }
}

impl std::error::Error for SpacingOverflow {}

/// Which way a connector block points on the finished chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Targets are ancestors: they sit above the sources.
    Upward,
    /// Targets are descendants: they sit below the sources.
    Downward,
}

/// The connector block between one generation's name row and the next.
///
/// Sources are the slots of the nearer generation, targets the slots of the
/// farther one; `links[i]` lists the target slots source `i` connects to. A
/// person reachable from two sources keeps the target slot of the first
/// source that claimed them, so shared ancestors and shared children are
/// drawn once with two lines leading in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTransition {
    nb_source_points: usize,
    nb_target_points: usize,
    links: Vec<Vec<usize>>,
}

impl LineTransition {
    /// Links an ancestor row to the padded parent row above it.
    ///
    /// Source slot `i` owns target slots `2i` (father) and `2i + 1` (mother);
    /// the target row is always twice as wide, matching the exponential
    /// padding of ancestor rows. Unknown parents get no link, placeholder
    /// sources get none at all.
    pub fn between_parents(genealogy: &Genealogy, row: &[Option<IndividualId>]) -> Self {
        let mut claimed: BTreeMap<IndividualId, usize> = BTreeMap::new();
        let mut links = Vec::with_capacity(row.len());

        for (i, slot) in row.iter().enumerate() {
            let mut targets = Vec::new();
            if let Some(individual) = slot.and_then(|id| genealogy.get(id)) {
                if let Some(father) = individual.father() {
                    targets.push(*claimed.entry(father).or_insert(2 * i));
                }
                if let Some(mother) = individual.mother() {
                    targets.push(*claimed.entry(mother).or_insert(2 * i + 1));
                }
            }
            links.push(targets);
        }

        Self { nb_source_points: row.len(), nb_target_points: 2 * row.len(), links }
    }

    /// Links a descendant row to the row of its children below.
    ///
    /// The target row is built while scanning sources left-to-right: every
    /// child not seen before takes the next slot. Returns the transition and
    /// that target row, which is also the next generation's name row.
    pub fn between_children(
        genealogy: &Genealogy,
        row: &[IndividualId],
    ) -> (Self, Vec<IndividualId>) {
        let mut targets: Vec<IndividualId> = Vec::new();
        let mut slots: BTreeMap<IndividualId, usize> = BTreeMap::new();
        let mut links = Vec::with_capacity(row.len());

        for id in row {
            let mut link = Vec::new();
            if let Some(individual) = genealogy.get(*id) {
                for child in individual.children() {
                    let slot = *slots.entry(*child).or_insert_with(|| {
                        targets.push(*child);
                        targets.len() - 1
                    });
                    link.push(slot);
                }
            }
            links.push(link);
        }

        let transition =
            Self { nb_source_points: row.len(), nb_target_points: targets.len(), links };
        (transition, targets)
    }

    pub fn has_links(&self) -> bool {
        self.links.iter().any(|link| !link.is_empty())
    }

    /// Draws the connector block at `width` columns in its final orientation.
    ///
    /// Each linked source gets a vertical stub on its own side of the turning
    /// row; each link turns at the turning row and runs vertically to its
    /// target column on the other side. Targets are drawn farthest-first per
    /// source, and every cell collision goes through the symbol merge, so
    /// crossing and branching runs settle into tee and cross glyphs. Rows
    /// that end up entirely blank are dropped.
    pub fn render(
        &self,
        width: usize,
        direction: TransitionDirection,
    ) -> Result<Vec<String>, SpacingOverflow> {
        let sources = spaced_points(self.nb_source_points, width)?;
        let targets = spaced_points(self.nb_target_points, width)?;

        // Vertical edge each corner keeps toward its own name row.
        let (source_edge, target_edge) = match direction {
            TransitionDirection::Upward => (LineEdges::DOWN, LineEdges::UP),
            TransitionDirection::Downward => (LineEdges::UP, LineEdges::DOWN),
        };
        // Stub rows hug the source's name row, runs hug the target's.
        let (stub_rows, run_rows) = match direction {
            TransitionDirection::Upward => {
                ((TURN_ROW + 1, TRANSITION_HEIGHT - 1), (0, TURN_ROW - 1))
            }
            TransitionDirection::Downward => {
                ((0, TURN_ROW - 1), (TURN_ROW + 1, TRANSITION_HEIGHT - 1))
            }
        };

        let mut grid = Grid::new(width, TRANSITION_HEIGHT);

        for (i, link) in self.links.iter().enumerate() {
            if link.is_empty() {
                continue;
            }

            let sx = sources[i];
            grid.vline(sx, stub_rows.0, stub_rows.1);

            let mut order = link.clone();
            order.sort_by_key(|slot| std::cmp::Reverse(targets[*slot].abs_diff(sx)));

            for slot in order {
                let tx = targets[slot];
                grid.vline(tx, run_rows.0, run_rows.1);

                if tx == sx {
                    grid.put(sx, TURN_ROW, LINE_VERTICAL);
                    continue;
                }

                let toward_left = tx < sx;
                let (horizontal_to_target, horizontal_to_source) = if toward_left {
                    (LineEdges::LEFT, LineEdges::RIGHT)
                } else {
                    (LineEdges::RIGHT, LineEdges::LEFT)
                };

                grid.put(sx, TURN_ROW, line_char_from_edges(source_edge.union(horizontal_to_target)));
                grid.put(tx, TURN_ROW, line_char_from_edges(target_edge.union(horizontal_to_source)));
                if sx.abs_diff(tx) > 1 {
                    grid.hline(sx.min(tx) + 1, sx.max(tx) - 1, TURN_ROW);
                }
            }
        }

        Ok(grid.visible_rows())
    }
}
