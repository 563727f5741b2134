// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! Core data model: the parsed record arena and the derived individual graph.

pub mod genealogy;
pub mod ids;
pub mod individual;
pub mod record;

pub use genealogy::{Genealogy, GenealogyBuildError};
pub use ids::{IndividualId, InvalidReferenceError, RecordId};
pub use individual::{Individual, NameDisposition, Sex};
pub use record::{Record, RecordTree};
