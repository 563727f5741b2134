// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use crate::model::{RecordId, RecordTree};

/// Serializes the record arena back into its line-oriented text form.
///
/// Records are written depth-first in arena order, one line each, with a
/// trailing newline. Parsing the output again yields an equal tree; only
/// blank lines and carriage returns of the original input are normalized
/// away.
pub fn export_gedcom(tree: &RecordTree) -> String {
    let mut lines = Vec::with_capacity(tree.len());
    for root in tree.roots() {
        export_record(tree, *root, &mut lines);
    }
    lines.push(String::new());
    lines.join("\n")
}

fn export_record(tree: &RecordTree, id: RecordId, lines: &mut Vec<String>) {
    let record = tree.get(id);
    let mut line = record.level().to_string();

    if let Some(reference) = record.reference() {
        line.push(' ');
        line.push_str(reference);
    }
    line.push(' ');
    line.push_str(record.tag());
    if let Some(value) = record.value() {
        line.push(' ');
        line.push_str(value);
    }

    lines.push(line);
    for child in record.children() {
        export_record(tree, *child, lines);
    }
}
