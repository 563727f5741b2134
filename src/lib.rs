// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! gedtree — terminal pedigree charts from genealogical exchange files.
//!
//! The pipeline is linear: raw text is parsed into a record arena
//! ([`format::ged`]), the arena is distilled into an individual graph
//! ([`model`]), and the graph is charted as box-drawing text ([`render`]).
//! [`query`] finds the individual to center a chart on.

pub mod format;
pub mod model;
pub mod query;
pub mod render;
