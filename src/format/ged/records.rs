// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use super::blocks::RawBlock;
use super::GedParseError;
use crate::model::{Record, RecordId, RecordTree};

/// A reference token is delimited by `@` on both ends, e.g. `@I1@`.
pub(crate) fn is_reference_token(token: &str) -> bool {
    token.len() >= 3 && token.starts_with('@') && token.ends_with('@')
}

/// Converts the grouped blocks into the record arena.
///
/// Header tokenization: the first token is the level (already parsed); if the
/// second token is `@`-delimited it is the record's reference and the third
/// token its tag, with no value. Otherwise the second token is the tag and
/// the remaining tokens, rejoined on single spaces, are the value.
pub(crate) fn build_records(blocks: &[RawBlock<'_>]) -> Result<RecordTree, GedParseError> {
    let mut tree = RecordTree::default();
    for block in blocks {
        let id = build_record(&mut tree, block)?;
        tree.push_root(id);
    }
    Ok(tree)
}

fn build_record(tree: &mut RecordTree, block: &RawBlock<'_>) -> Result<RecordId, GedParseError> {
    let header = block.header;
    let mut tokens = header.text.split(' ');
    tokens.next(); // level, already parsed during scanning

    let second = tokens.next().filter(|token| !token.is_empty()).ok_or_else(|| {
        GedParseError::MissingTag { line_no: header.line_no, line: header.text.to_owned() }
    })?;

    let record = if is_reference_token(second) {
        let tag = tokens.next().filter(|token| !token.is_empty()).ok_or_else(|| {
            GedParseError::MissingTag { line_no: header.line_no, line: header.text.to_owned() }
        })?;
        Record::new(header.level, tag, Some(second.to_owned()), None)
    } else {
        let value = tokens.collect::<Vec<_>>().join(" ");
        let value = (!value.is_empty()).then_some(value);
        Record::new(header.level, second, None, value)
    };

    let id = tree.insert(record);
    for child_block in &block.children {
        let child = build_record(tree, child_block)?;
        tree.get_mut(id).push_child(child);
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::{build_records, is_reference_token};
    use crate::format::ged::blocks::{group_blocks, scan_lines};
    use crate::format::ged::GedParseError;
    use crate::model::RecordTree;

    fn records_of(text: &str) -> RecordTree {
        let lines = scan_lines(text).expect("scan");
        build_records(&group_blocks(&lines)).expect("records")
    }

    #[test]
    fn reference_token_shape() {
        assert!(is_reference_token("@I1@"));
        assert!(is_reference_token("@F12@"));
        assert!(!is_reference_token("@@"));
        assert!(!is_reference_token("NAME"));
        assert!(!is_reference_token("@open"));
    }

    #[test]
    fn referenced_records_carry_no_value() {
        let tree = records_of("0 @I1@ INDI\n");
        let record = tree.get(tree.roots()[0]);
        assert_eq!(record.reference(), Some("@I1@"));
        assert_eq!(record.tag(), "INDI");
        assert_eq!(record.value(), None);
    }

    #[test]
    fn multi_word_values_are_rejoined_on_single_spaces() {
        let tree = records_of("0 @I1@ INDI\n1 NAME John Jacob /Smith/\n");
        let indi = tree.roots()[0];
        assert_eq!(tree.value_of(indi, "NAME"), Some("John Jacob /Smith/"));
    }

    #[test]
    fn value_free_records_have_none() {
        let tree = records_of("0 TRLR\n");
        let record = tree.get(tree.roots()[0]);
        assert_eq!(record.tag(), "TRLR");
        assert_eq!(record.value(), None);
    }

    #[test]
    fn missing_tag_is_a_parse_error() {
        let lines = scan_lines("0 @I1@\n").expect("scan");
        let err = build_records(&group_blocks(&lines)).unwrap_err();
        assert_eq!(err, GedParseError::MissingTag { line_no: 1, line: "0 @I1@".to_owned() });
    }

    #[test]
    fn every_child_level_is_parent_level_plus_one_on_valid_input() {
        let tree = records_of("0 @I1@ INDI\n1 BIRT\n2 DATE 1 JAN 1900\n2 PLAC Here\n1 SEX M\n");

        fn check(tree: &RecordTree, id: crate::model::RecordId) {
            let parent_level = tree.get(id).level();
            for child in tree.get(id).children() {
                assert_eq!(tree.get(*child).level(), parent_level + 1);
                check(tree, *child);
            }
        }

        for root in tree.roots() {
            check(&tree, *root);
        }
    }
}
