// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};

use gedtree::format::ged::{export_gedcom, parse_gedcom};
use gedtree::model::{Genealogy, IndividualId};
use gedtree::query::resolve_individual;
use gedtree::render::render_pedigree;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn genealogy_of(name: &str) -> Genealogy {
    let text = read_fixture(name);
    let parsed = parse_gedcom(&text)
        .unwrap_or_else(|err| panic!("expected {name} to parse, got error: {err}"));
    assert!(parsed.dangling().is_empty(), "{name} has no dangling references");
    Genealogy::from_records(parsed.tree())
        .unwrap_or_else(|err| panic!("expected {name} to build a genealogy, got error: {err}"))
}

#[test]
fn three_generation_ancestor_chart_has_the_full_interleaved_shape() {
    let genealogy = genealogy_of("three_generations.ged");
    let chart = render_pedigree(&genealogy, IndividualId::new(1), 2, 80).expect("chart");

    // Three name rows of two lines each, two connector blocks of five.
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 3 * 2 + 2 * 5, "chart:\n{chart}");

    for grandparent in ["Edwin", "Rose", "Giles", "Iris"] {
        assert!(lines[0].contains(grandparent), "grandparents on top:\n{chart}");
    }
    assert!(lines[7].contains("Hugo") && lines[7].contains("Mary"), "parents:\n{chart}");
    assert!(lines[14].contains("Arthur"), "root at the bottom:\n{chart}");

    let connector_chars = ['─', '│', '┌', '┐', '└', '┘', '┬', '┴'];
    assert!(
        lines[9].chars().any(|ch| connector_chars.contains(&ch)),
        "connector between parents and root:\n{chart}"
    );
    assert!(!chart.contains("???"), "every ancestor is known:\n{chart}");
}

#[test]
fn missing_mother_renders_one_placeholder_cell_on_both_lines() {
    let genealogy = genealogy_of("partial.ged");
    let chart = render_pedigree(&genealogy, IndividualId::new(1), 1, 40).expect("chart");

    // A single unknown parent: one placeholder cell, top and bottom line.
    assert_eq!(chart.matches("???").count(), 2, "chart:\n{chart}");
    assert!(chart.contains("Father"), "chart:\n{chart}");
}

#[test]
fn descendant_chart_runs_top_down() {
    let genealogy = genealogy_of("three_generations.ged");
    let chart = render_pedigree(&genealogy, IndividualId::new(1), -1, 40).expect("chart");

    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 2 + 5 + 2, "chart:\n{chart}");
    assert!(lines[0].contains("Arthur"), "root first:\n{chart}");
    assert!(lines[7].contains("Random"), "child below:\n{chart}");
}

#[test]
fn childless_root_yields_an_empty_descendant_chart() {
    let genealogy = genealogy_of("three_generations.ged");
    let chart = render_pedigree(&genealogy, IndividualId::new(8), -1, 40).expect("chart");
    assert_eq!(chart, "");
}

#[test]
fn root_queries_resolve_by_id_and_name() {
    let genealogy = genealogy_of("three_generations.ged");

    assert_eq!(resolve_individual(&genealogy, "8"), Ok(IndividualId::new(8)));
    assert_eq!(resolve_individual(&genealogy, "@I8@"), Ok(IndividualId::new(8)));
    assert_eq!(resolve_individual(&genealogy, "arthur"), Ok(IndividualId::new(1)));
    resolve_individual(&genealogy, "Dent").unwrap_err();
}

#[test]
fn export_reproduces_the_fixture_byte_for_byte() {
    let text = read_fixture("three_generations.ged");
    let parsed = parse_gedcom(&text).expect("parse");
    assert_eq!(export_gedcom(parsed.tree()), text);
}
