// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use super::records::is_reference_token;
use super::GedParseError;
use crate::model::{RecordId, RecordTree};

/// A value that looks like a reference token but names no record.
///
/// The resolver never drops these silently; callers decide whether to warn or
/// abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub record: RecordId,
    pub tag: String,
    pub value: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dangling reference {} in {} record", self.value, self.tag)
    }
}

/// Resolves cross-references across the whole arena.
///
/// Pass one collects every record with a reference into an id-to-record map,
/// rejecting duplicate reference ids outright. Pass two visits every record
/// and links values that exactly equal a known reference id. Resolution is a
/// pure lookup; visit order does not affect the result.
pub(crate) fn resolve_references(
    tree: &mut RecordTree,
) -> Result<Vec<DanglingReference>, GedParseError> {
    let mut updates: Vec<(RecordId, RecordId)> = Vec::new();
    let mut dangling: Vec<DanglingReference> = Vec::new();

    {
        let mut references: BTreeMap<&str, RecordId> = BTreeMap::new();
        for (id, record) in tree.iter() {
            if let Some(reference) = record.reference() {
                if references.insert(reference, id).is_some() {
                    return Err(GedParseError::DuplicateReference {
                        reference: reference.to_owned(),
                    });
                }
            }
        }

        for (id, record) in tree.iter() {
            let Some(value) = record.value() else {
                continue;
            };

            if let Some(target) = references.get(value) {
                updates.push((id, *target));
            } else if is_reference_token(value) {
                dangling.push(DanglingReference {
                    record: id,
                    tag: record.tag().to_owned(),
                    value: value.to_owned(),
                });
            }
        }
    }

    for (id, target) in updates {
        tree.get_mut(id).set_resolved(target);
    }

    Ok(dangling)
}
