// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! Wire formats. Only the level-numbered genealogical text format lives here
//! today; the module boundary keeps parsing concerns out of the data model.

pub mod ged;
