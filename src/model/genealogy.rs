// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use super::ids::{IndividualId, RecordId};
use super::individual::{FamilyLinks, Individual};
use super::record::RecordTree;

/// All individuals of one parsed file, keyed by numeric id.
///
/// Construction is two-phase by design: individuals reference families which
/// reference individuals, so the graph is cyclic in general shape. Phase one
/// creates every individual into the table; phase two wires father, mother
/// and children through id lookups. Building relations eagerly during phase
/// one would recurse through those cycles, which is exactly what this layout
/// avoids. The table is read-only after phase two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Genealogy {
    individuals: BTreeMap<IndividualId, Individual>,
}

impl Genealogy {
    /// Builds the genealogy from a resolved record tree.
    pub fn from_records(tree: &RecordTree) -> Result<Self, GenealogyBuildError> {
        let mut individuals: BTreeMap<IndividualId, Individual> = BTreeMap::new();
        let mut links: Vec<(IndividualId, FamilyLinks)> = Vec::new();

        // Phase one: create every individual before any relation is wired.
        for root in tree.roots() {
            if tree.get(*root).tag() != "INDI" {
                continue;
            }

            let (individual, family_links) =
                Individual::from_record(tree, *root).map_err(|err| {
                    GenealogyBuildError::InvalidIndividualReference { reference: err.reference }
                })?;

            let id = individual.id();
            if individuals.insert(id, individual).is_some() {
                return Err(GenealogyBuildError::DuplicateIndividualId { id });
            }
            links.push((id, family_links));
        }

        // Phase two: resolve relations through the completed table. Links
        // whose target never became an individual stay absent; the parser
        // already surfaced those as dangling references.
        for (id, family_links) in links {
            if let Some(famc) = family_links.famc {
                let father = spouse_id(tree, famc, "HUSB");
                let mother = spouse_id(tree, famc, "WIFE");

                if let Some(father) = father.filter(|father| individuals.contains_key(father)) {
                    if let Some(individual) = individuals.get_mut(&id) {
                        individual.set_father(father);
                    }
                }
                if let Some(mother) = mother.filter(|mother| individuals.contains_key(mother)) {
                    if let Some(individual) = individuals.get_mut(&id) {
                        individual.set_mother(mother);
                    }
                }
            }

            for fams in family_links.fams {
                for child_record in tree.children_with_tag(fams, "CHIL") {
                    let child = tree
                        .get(child_record)
                        .value()
                        .and_then(|value| IndividualId::from_reference(value).ok());

                    if let Some(child) = child.filter(|child| individuals.contains_key(child)) {
                        if let Some(individual) = individuals.get_mut(&id) {
                            individual.add_child(child);
                        }
                    }
                }
            }
        }

        Ok(Self { individuals })
    }

    pub fn individuals(&self) -> &BTreeMap<IndividualId, Individual> {
        &self.individuals
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Ancestor slots of `root` at `generation`, always exactly
    /// `2^generation` entries wide.
    ///
    /// Generation 0 is the root itself. Each further generation halves into
    /// father-then-mother recursively; an unknown parent contributes
    /// `2^(generation-1)` placeholder slots so the exponential width
    /// invariant holds through gaps. The renderer's layout relies on that
    /// fixed width.
    pub fn ancestor_slots(&self, root: IndividualId, generation: u32) -> Vec<Option<IndividualId>> {
        self.ancestor_slots_of(Some(root), generation)
    }

    fn ancestor_slots_of(
        &self,
        slot: Option<IndividualId>,
        generation: u32,
    ) -> Vec<Option<IndividualId>> {
        if generation == 0 {
            return vec![slot];
        }

        let (father, mother) = match slot.and_then(|id| self.individuals.get(&id)) {
            Some(individual) => (individual.father(), individual.mother()),
            None => (None, None),
        };

        let mut slots = self.ancestor_slots_of(father, generation - 1);
        slots.extend(self.ancestor_slots_of(mother, generation - 1));
        slots
    }

    /// Descendants of `root`, `generations_below` levels down.
    ///
    /// Unlike ancestor rows this is the true fan-out: no placeholder padding,
    /// width is exactly the number of people in that generation.
    pub fn descendant_row(&self, root: IndividualId, generations_below: u32) -> Vec<IndividualId> {
        if generations_below == 0 {
            return vec![root];
        }

        let children: Vec<IndividualId> = match self.individuals.get(&root) {
            Some(individual) => individual.children().to_vec(),
            None => Vec::new(),
        };

        if generations_below == 1 {
            return children;
        }

        children
            .into_iter()
            .flat_map(|child| self.descendant_row(child, generations_below - 1))
            .collect()
    }
}

fn spouse_id(tree: &RecordTree, family: RecordId, tag: &str) -> Option<IndividualId> {
    tree.value_of(family, tag)
        .and_then(|value| IndividualId::from_reference(value).ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenealogyBuildError {
    InvalidIndividualReference { reference: String },
    DuplicateIndividualId { id: IndividualId },
}

impl fmt::Display for GenealogyBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndividualReference { reference } => {
                write!(f, "individual record has no usable numeric reference: {reference:?}")
            }
            Self::DuplicateIndividualId { id } => {
                write!(f, "two individual records share the numeric id {id}")
            }
        }
    }
}

impl std::error::Error for GenealogyBuildError {}

#[cfg(test)]
mod tests {
    use super::Genealogy;
    use crate::format::ged::parse_gedcom;
    use crate::model::IndividualId;

    const THREE_GENERATIONS: &str = "\
0 HEAD
1 SOUR gedtree
0 @I1@ INDI
1 NAME Arthur /Dent/
1 SEX M
1 BIRT
2 DATE 1 JAN 1952
2 PLAC Cottington
1 FAMC @F1@
1 FAMS @F4@
0 @I2@ INDI
1 NAME Hugo /Dent/
1 SEX M
1 FAMC @F2@
1 FAMS @F1@
0 @I3@ INDI
1 NAME Mary /Holloway/
1 SEX F
1 FAMS @F1@
0 @I4@ INDI
1 NAME Edwin /Dent/
1 SEX M
1 FAMS @F2@
0 @I5@ INDI
1 NAME Rose /Tiller/
1 SEX F
1 FAMS @F2@
0 @I8@ INDI
1 NAME Random /Dent/
1 SEX F
1 FAMC @F4@
0 @F1@ FAM
1 HUSB @I2@
1 WIFE @I3@
1 CHIL @I1@
0 @F2@ FAM
1 HUSB @I4@
1 WIFE @I5@
1 CHIL @I2@
0 @F4@ FAM
1 HUSB @I1@
1 CHIL @I8@
0 TRLR
";

    fn fixture() -> Genealogy {
        let parsed = parse_gedcom(THREE_GENERATIONS).expect("parse");
        assert!(parsed.dangling().is_empty());
        Genealogy::from_records(parsed.tree()).expect("genealogy")
    }

    fn id(value: u32) -> IndividualId {
        IndividualId::new(value)
    }

    #[test]
    fn phase_two_wires_parents_and_children() {
        let genealogy = fixture();

        let root = genealogy.get(id(1)).expect("root");
        assert_eq!(root.father(), Some(id(2)));
        assert_eq!(root.mother(), Some(id(3)));
        assert_eq!(root.children(), &[id(8)]);

        let father = genealogy.get(id(2)).expect("father");
        assert_eq!(father.father(), Some(id(4)));
        assert_eq!(father.mother(), Some(id(5)));
        assert_eq!(father.children(), &[id(1)]);
    }

    #[test]
    fn individual_fields_come_from_first_matching_child_tags() {
        let genealogy = fixture();
        let root = genealogy.get(id(1)).expect("root");

        assert_eq!(root.first_name(), Some("Arthur"));
        assert_eq!(root.last_name(), Some("Dent"));
        assert_eq!(root.birth_date(), Some("1 JAN 1952"));
        assert_eq!(root.birth_place(), Some("Cottington"));
        assert_eq!(root.death_date(), None);
    }

    #[test]
    fn ancestor_slots_generation_zero_is_the_root() {
        let genealogy = fixture();
        assert_eq!(genealogy.ancestor_slots(id(1), 0), vec![Some(id(1))]);
    }

    #[test]
    fn ancestor_slots_pad_to_power_of_two_through_gaps() {
        let genealogy = fixture();

        let parents = genealogy.ancestor_slots(id(1), 1);
        assert_eq!(parents, vec![Some(id(2)), Some(id(3))]);

        // I3 has no recorded parents: her half pads with placeholders.
        let grandparents = genealogy.ancestor_slots(id(1), 2);
        assert_eq!(grandparents, vec![Some(id(4)), Some(id(5)), None, None]);

        for generation in 0..6 {
            let slots = genealogy.ancestor_slots(id(1), generation);
            assert_eq!(slots.len(), 1 << generation, "generation {generation}");
        }
    }

    #[test]
    fn descendant_rows_are_true_fan_out_without_padding() {
        let genealogy = fixture();

        assert_eq!(genealogy.descendant_row(id(1), 0), vec![id(1)]);
        assert_eq!(genealogy.descendant_row(id(1), 1), vec![id(8)]);
        // I8 is childless: the row below her is empty, not padded.
        assert_eq!(genealogy.descendant_row(id(1), 2), Vec::<IndividualId>::new());

        let childless = genealogy.descendant_row(id(8), 1);
        assert!(childless.is_empty());
    }

    #[test]
    fn structured_name_parts_back_the_name_disposition() {
        let parsed = parse_gedcom(
            "0 HEAD\n0 @I1@ INDI\n1 NAME Johann Bach\n2 GIVN Johann\n2 SURN Bach\n0 TRLR\n",
        )
        .expect("parse");
        let genealogy = Genealogy::from_records(parsed.tree()).expect("genealogy");

        let individual = genealogy.get(id(1)).expect("individual");
        assert_eq!(individual.given_name(), Some("Johann"));
        assert_eq!(individual.surname(), Some("Bach"));

        let disposition = individual.name_disposition();
        assert_eq!(disposition.top, "Johann");
        assert_eq!(disposition.bottom, "Bach");
    }

    #[test]
    fn missing_links_stay_absent_without_error() {
        let genealogy = fixture();
        let grandmother = genealogy.get(id(5)).expect("grandmother");
        assert_eq!(grandmother.father(), None);
        assert_eq!(grandmother.mother(), None);

        // F4 has no WIFE entry: mother of I8 stays unknown.
        let child = genealogy.get(id(8)).expect("child");
        assert_eq!(child.father(), Some(id(1)));
        assert_eq!(child.mother(), None);
    }
}
