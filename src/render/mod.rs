// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! Pedigree chart rendering.
//!
//! Charts are built on a character grid whose collision rule is the whole
//! trick: single-line box-drawing characters merge by edge union instead of
//! overwriting, so two connector runs crossing a cell produce the right
//! junction (`┬`, `┴`, `┼`) no matter which was drawn first.

pub mod layout;
pub mod pedigree;

pub use layout::{LineTransition, TransitionDirection};
pub use pedigree::{render_pedigree, PedigreeError};

pub const LINE_HORIZONTAL: char = '─';
pub const LINE_VERTICAL: char = '│';
pub const LINE_TOP_LEFT: char = '┌';
pub const LINE_TOP_RIGHT: char = '┐';
pub const LINE_BOTTOM_LEFT: char = '└';
pub const LINE_BOTTOM_RIGHT: char = '┘';
pub const LINE_TEE_RIGHT: char = '├';
pub const LINE_TEE_LEFT: char = '┤';
pub const LINE_TEE_DOWN: char = '┬';
pub const LINE_TEE_UP: char = '┴';
pub const LINE_CROSS: char = '┼';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineEdges(u8);

impl LineEdges {
    pub(crate) const NONE: Self = Self(0);
    pub(crate) const LEFT: Self = Self(1 << 0);
    pub(crate) const RIGHT: Self = Self(1 << 1);
    pub(crate) const UP: Self = Self(1 << 2);
    pub(crate) const DOWN: Self = Self(1 << 3);

    pub(crate) fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

pub(crate) fn line_edges_from_char(ch: char) -> Option<LineEdges> {
    match ch {
        LINE_HORIZONTAL => Some(LineEdges::LEFT.union(LineEdges::RIGHT)),
        LINE_VERTICAL => Some(LineEdges::UP.union(LineEdges::DOWN)),
        LINE_TOP_LEFT => Some(LineEdges::RIGHT.union(LineEdges::DOWN)),
        LINE_TOP_RIGHT => Some(LineEdges::LEFT.union(LineEdges::DOWN)),
        LINE_BOTTOM_LEFT => Some(LineEdges::RIGHT.union(LineEdges::UP)),
        LINE_BOTTOM_RIGHT => Some(LineEdges::LEFT.union(LineEdges::UP)),
        LINE_TEE_RIGHT => Some(LineEdges::UP.union(LineEdges::DOWN).union(LineEdges::RIGHT)),
        LINE_TEE_LEFT => Some(LineEdges::UP.union(LineEdges::DOWN).union(LineEdges::LEFT)),
        LINE_TEE_DOWN => Some(LineEdges::LEFT.union(LineEdges::RIGHT).union(LineEdges::DOWN)),
        LINE_TEE_UP => Some(LineEdges::LEFT.union(LineEdges::RIGHT).union(LineEdges::UP)),
        LINE_CROSS => Some(
            LineEdges::LEFT
                .union(LineEdges::RIGHT)
                .union(LineEdges::UP)
                .union(LineEdges::DOWN),
        ),
        _ => None,
    }
}

pub(crate) fn line_char_from_edges(edges: LineEdges) -> char {
    match edges.0 {
        0 => ' ',
        // Straight segments (including endpoints).
        1..=3 => LINE_HORIZONTAL,
        4 | 8 | 12 => LINE_VERTICAL,
        // Corners.
        10 => LINE_TOP_LEFT,
        9 => LINE_TOP_RIGHT,
        6 => LINE_BOTTOM_LEFT,
        5 => LINE_BOTTOM_RIGHT,
        // Tees.
        14 => LINE_TEE_RIGHT,
        13 => LINE_TEE_LEFT,
        11 => LINE_TEE_DOWN,
        7 => LINE_TEE_UP,
        // Cross.
        15 => LINE_CROSS,
        // Unreachable with 4 bits; keep a deterministic fallback.
        _ => LINE_CROSS,
    }
}

/// Merges two drawing symbols into one cell.
///
/// Over the blank plus the eleven single-line characters this is total,
/// commutative and idempotent, with blank as identity: two line characters
/// combine into the character carrying the union of their edges. A non-line
/// character paired with anything but blank keeps the newer symbol.
pub fn merge_symbols(current: char, incoming: char) -> char {
    if current == incoming {
        return current;
    }
    if current == ' ' {
        return incoming;
    }
    if incoming == ' ' {
        return current;
    }

    match (line_edges_from_char(current), line_edges_from_char(incoming)) {
        (Some(a), Some(b)) => line_char_from_edges(a.union(b)),
        _ => incoming,
    }
}

/// A fixed-size character grid with merge-on-write cells.
///
/// Writes outside the grid are clipped, never errors: connector layout
/// arithmetic already guarantees in-bounds points, and a clipped cell is a
/// better failure mode for a terminal chart than a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![' '; width * height] }
    }

    pub(crate) fn put(&mut self, x: usize, y: usize, ch: char) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.cells[idx] = merge_symbols(self.cells[idx], ch);
        }
    }

    pub(crate) fn hline(&mut self, x0: usize, x1: usize, y: usize) {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        for x in min_x..=max_x {
            self.put(x, y, LINE_HORIZONTAL);
        }
    }

    pub(crate) fn vline(&mut self, x: usize, y0: usize, y1: usize) {
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in min_y..=max_y {
            self.put(x, y, LINE_VERTICAL);
        }
    }

    pub(crate) fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width].iter().collect()
    }

    pub(crate) fn is_blank_row(&self, y: usize) -> bool {
        self.cells[y * self.width..(y + 1) * self.width].iter().all(|ch| *ch == ' ')
    }

    /// Every non-blank row, top to bottom, each exactly `width` characters.
    pub(crate) fn visible_rows(&self) -> Vec<String> {
        (0..self.height).filter(|y| !self.is_blank_row(*y)).map(|y| self.row(y)).collect()
    }
}
