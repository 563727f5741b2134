// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use super::ids::RecordId;

/// One node of the parsed GEDCOM hierarchy.
///
/// A record either carries a `reference` (it is a pointer target, e.g.
/// `0 @I1@ INDI`) or a `value` (e.g. `1 NAME John /Smith/`); never both.
/// After reference resolution, a value that names another record also carries
/// `resolved` with that record's arena id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    level: u32,
    tag: String,
    reference: Option<String>,
    value: Option<String>,
    resolved: Option<RecordId>,
    children: Vec<RecordId>,
}

impl Record {
    pub(crate) fn new(
        level: u32,
        tag: impl Into<String>,
        reference: Option<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            level,
            tag: tag.into(),
            reference,
            value,
            resolved: None,
            children: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn resolved(&self) -> Option<RecordId> {
        self.resolved
    }

    pub fn children(&self) -> &[RecordId] {
        &self.children
    }

    pub(crate) fn set_resolved(&mut self, target: RecordId) {
        self.resolved = Some(target);
    }

    pub(crate) fn push_child(&mut self, child: RecordId) {
        self.children.push(child);
    }
}

/// Arena of all records parsed from one file, with the top-level records
/// (individuals, families, header, trailer) listed as roots in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordTree {
    records: Vec<Record>,
    roots: Vec<RecordId>,
}

impl RecordTree {
    pub(crate) fn insert(&mut self, record: Record) -> RecordId {
        let id = RecordId(self.records.len());
        self.records.push(record);
        id
    }

    pub(crate) fn push_root(&mut self, id: RecordId) {
        self.roots.push(id);
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> &mut Record {
        &mut self.records[id.0]
    }

    pub fn get(&self, id: RecordId) -> &Record {
        &self.records[id.0]
    }

    pub fn roots(&self) -> &[RecordId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates every record in the arena in creation (source) order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (RecordId(index), record))
    }

    /// First child of `id` carrying `tag`, if any. Repeated tags resolve to
    /// the first occurrence.
    pub fn child_with_tag(&self, id: RecordId, tag: &str) -> Option<RecordId> {
        self.get(id)
            .children()
            .iter()
            .copied()
            .find(|child| self.get(*child).tag() == tag)
    }

    /// Every child of `id` carrying `tag`, in source order.
    pub fn children_with_tag(&self, id: RecordId, tag: &str) -> Vec<RecordId> {
        self.get(id)
            .children()
            .iter()
            .copied()
            .filter(|child| self.get(*child).tag() == tag)
            .collect()
    }

    /// Value of the first child of `id` carrying `tag`.
    pub fn value_of(&self, id: RecordId, tag: &str) -> Option<&str> {
        self.child_with_tag(id, tag)
            .and_then(|child| self.get(child).value())
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordTree};

    fn fixture_tree() -> RecordTree {
        let mut tree = RecordTree::default();
        let indi = tree.insert(Record::new(0, "INDI", Some("@I1@".to_owned()), None));
        tree.push_root(indi);

        let name = tree.insert(Record::new(
            1,
            "NAME",
            None,
            Some("John /Smith/".to_owned()),
        ));
        tree.get_mut(indi).push_child(name);

        let second_name = tree.insert(Record::new(
            1,
            "NAME",
            None,
            Some("Johnny /Smith/".to_owned()),
        ));
        tree.get_mut(indi).push_child(second_name);

        tree
    }

    #[test]
    fn child_with_tag_returns_first_occurrence() {
        let tree = fixture_tree();
        let indi = tree.roots()[0];
        assert_eq!(tree.value_of(indi, "NAME"), Some("John /Smith/"));
    }

    #[test]
    fn children_with_tag_returns_all_in_order() {
        let tree = fixture_tree();
        let indi = tree.roots()[0];
        let names = tree.children_with_tag(indi, "NAME");
        assert_eq!(names.len(), 2);
        assert_eq!(tree.get(names[1]).value(), Some("Johnny /Smith/"));
    }

    #[test]
    fn missing_tag_resolves_to_none() {
        let tree = fixture_tree();
        let indi = tree.roots()[0];
        assert_eq!(tree.child_with_tag(indi, "BIRT"), None);
        assert_eq!(tree.value_of(indi, "SEX"), None);
    }
}
