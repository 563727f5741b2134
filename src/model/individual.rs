// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use serde::Serialize;

use super::ids::{IndividualId, InvalidReferenceError, RecordId};
use super::record::RecordTree;

/// Recorded sex of an individual (`SEX` tag); anything but `M`/`F` is kept as
/// unknown rather than rejected, since files in the wild carry `U`, `X` or
/// nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "U",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a name is laid out in the two text lines of a pedigree name row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDisposition {
    pub top: String,
    pub bottom: String,
}

/// One person, derived from an `INDI` record.
///
/// Father/mother/children are id lookups into the owning
/// [`Genealogy`](crate::model::Genealogy) table, never owned values; they are
/// wired in the second construction phase and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    id: IndividualId,
    raw_name: String,
    first_name: Option<String>,
    last_name: Option<String>,
    given_name: Option<String>,
    surname: Option<String>,
    sex: Sex,
    birth_date: Option<String>,
    birth_place: Option<String>,
    death_date: Option<String>,
    death_place: Option<String>,
    father: Option<IndividualId>,
    mother: Option<IndividualId>,
    children: Vec<IndividualId>,
}

/// Family links extracted from an `INDI` record in phase one, consumed by the
/// genealogy builder's phase two. `famc` is the family this individual is a
/// child of; `fams` are the families this individual is a spouse in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FamilyLinks {
    pub(crate) famc: Option<RecordId>,
    pub(crate) fams: Vec<RecordId>,
}

impl Individual {
    /// Builds an individual from an `INDI` record (construction phase one).
    ///
    /// Name, sex, birth and death come from the first matching child tag.
    /// Family links are gathered by following the records' `resolved`
    /// pointers only; an unresolved `FAMC`/`FAMS` (already surfaced as a
    /// dangling reference by the parser) is treated as absent.
    pub(crate) fn from_record(
        tree: &RecordTree,
        record_id: RecordId,
    ) -> Result<(Self, FamilyLinks), InvalidReferenceError> {
        let record = tree.get(record_id);
        let reference = record.reference().ok_or_else(|| InvalidReferenceError {
            reference: String::new(),
        })?;
        let id = IndividualId::from_reference(reference)?;

        let name_record = tree.child_with_tag(record_id, "NAME");
        let raw_name = tree.value_of(record_id, "NAME").unwrap_or("").to_owned();
        let (first_name, last_name) = separate_names(&raw_name);

        let sex = tree.value_of(record_id, "SEX").map(Sex::parse).unwrap_or_default();

        let (birth_date, birth_place) = event_fields(tree, record_id, "BIRT");
        let (death_date, death_place) = event_fields(tree, record_id, "DEAT");

        let famc = tree
            .child_with_tag(record_id, "FAMC")
            .and_then(|child| tree.get(child).resolved());
        let fams = tree
            .children_with_tag(record_id, "FAMS")
            .into_iter()
            .filter_map(|child| tree.get(child).resolved())
            .collect();

        let individual = Self {
            id,
            first_name,
            last_name,
            given_name: name_record
                .and_then(|name| tree.value_of(name, "GIVN"))
                .map(str::to_owned),
            surname: name_record
                .and_then(|name| tree.value_of(name, "SURN"))
                .map(str::to_owned),
            raw_name,
            sex,
            birth_date,
            birth_place,
            death_date,
            death_place,
            father: None,
            mother: None,
            children: Vec::new(),
        };

        Ok((individual, FamilyLinks { famc, fams }))
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    /// Name exactly as recorded, e.g. `John /Smith/`.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Recorded name with the `/` markers removed and `_` read as spaces.
    pub fn display_name(&self) -> String {
        self.raw_name.replace('/', "").replace('_', " ").trim().to_owned()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn birth_place(&self) -> Option<&str> {
        self.birth_place.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.death_date.as_deref()
    }

    pub fn death_place(&self) -> Option<&str> {
        self.death_place.as_deref()
    }

    pub fn father(&self) -> Option<IndividualId> {
        self.father
    }

    pub fn mother(&self) -> Option<IndividualId> {
        self.mother
    }

    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }

    pub(crate) fn set_father(&mut self, father: IndividualId) {
        self.father = Some(father);
    }

    pub(crate) fn set_mother(&mut self, mother: IndividualId) {
        self.mother = Some(mother);
    }

    pub(crate) fn add_child(&mut self, child: IndividualId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Splits the name into the two lines of a pedigree name row.
    ///
    /// Structured `GIVN`/`SURN` parts win when both are recorded, then the
    /// first/last split of the composite name. A name without either
    /// convention splits its words into two roughly equal halves.
    pub fn name_disposition(&self) -> NameDisposition {
        if let (Some(given), Some(surname)) = (self.given_name.as_deref(), self.surname.as_deref())
        {
            return NameDisposition { top: given.to_owned(), bottom: surname.to_owned() };
        }

        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => NameDisposition {
                top: first.to_owned(),
                bottom: last.to_owned(),
            },
            (Some(first), None) => halved_words(first),
            _ => halved_words(&self.display_name()),
        }
    }
}

fn event_fields(
    tree: &RecordTree,
    record_id: RecordId,
    tag: &str,
) -> (Option<String>, Option<String>) {
    match tree.child_with_tag(record_id, tag) {
        Some(event) => (
            tree.value_of(event, "DATE").map(str::to_owned),
            tree.value_of(event, "PLAC").map(str::to_owned),
        ),
        None => (None, None),
    }
}

/// Splits `first /last/` into its components; a name without the `/`
/// convention keeps everything in the first component.
fn separate_names(raw: &str) -> (Option<String>, Option<String>) {
    let mut parts = raw.splitn(3, '/');
    let first = parts.next().unwrap_or("").trim();
    let last = parts.next().map(str::trim);

    let first = (!first.is_empty()).then(|| first.to_owned());
    let last = last.filter(|value| !value.is_empty()).map(str::to_owned);
    (first, last)
}

fn halved_words(name: &str) -> NameDisposition {
    let words: Vec<&str> = name.split_whitespace().collect();
    let middle = words.len() / 2;
    NameDisposition {
        top: words[..middle].join(" "),
        bottom: words[middle..].join(" "),
    }
}
