// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! gedtree CLI entrypoint.
//!
//! `list` prints every individual of a file; `tree` draws the pedigree chart
//! around one of them, ancestors for non-negative `--depth` and descendants
//! for negative.

use std::error::Error;

use gedtree::format::ged::parse_gedcom;
use gedtree::model::Genealogy;
use gedtree::query::{self, IndividualSummary, NameSearchMode};
use gedtree::render::{render_pedigree, PedigreeError};

const DEFAULT_DEPTH: i32 = 2;
const FALLBACK_WIDTH: usize = 80;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} list [--json] [--search <pattern> [--regex]] <file>\n  {program} tree --root <id|name> [--depth <n>] [--width <cols>] <file>\n\nlist prints id, name and birth date of every individual, sorted by id.\n--search narrows the listing to matching names (substring, or a regular\nexpression with --regex); --json prints the listing as a JSON array.\n\ntree draws the pedigree chart around the individual named by --root (a\nnumeric id like 13 or @I13@, or a unique name fragment).\n--depth selects the generations to chart: positive or zero for ancestors\n(default {DEFAULT_DEPTH}), negative for descendants.\n--width overrides the detected terminal width (fallback {FALLBACK_WIDTH})."
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Tree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    mode: Mode,
    file: String,
    json: bool,
    search: Option<String>,
    regex: bool,
    root: Option<String>,
    depth: Option<i32>,
    width: Option<usize>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mode = match args.next().ok_or(())?.as_str() {
        "list" => Mode::List,
        "tree" => Mode::Tree,
        _ => return Err(()),
    };

    let mut json = false;
    let mut search = None;
    let mut regex = false;
    let mut root = None;
    let mut depth = None;
    let mut width = None;
    let mut file = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => {
                if json {
                    return Err(());
                }
                json = true;
            }
            "--search" => {
                if search.is_some() {
                    return Err(());
                }
                search = Some(args.next().ok_or(())?);
            }
            "--regex" => {
                if regex {
                    return Err(());
                }
                regex = true;
            }
            "--root" => {
                if root.is_some() {
                    return Err(());
                }
                root = Some(args.next().ok_or(())?);
            }
            "--depth" => {
                if depth.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let value: i32 = raw.parse().map_err(|_| ())?;
                depth = Some(value);
            }
            "--width" => {
                if width.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let value: usize = raw.parse().map_err(|_| ())?;
                if value == 0 {
                    return Err(());
                }
                width = Some(value);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if file.is_some() {
                    return Err(());
                }
                file = Some(arg);
            }
        }
    }

    let file = file.ok_or(())?;

    match mode {
        Mode::List => {
            if root.is_some() || depth.is_some() || width.is_some() {
                return Err(());
            }
            if regex && search.is_none() {
                return Err(());
            }
        }
        Mode::Tree => {
            if json || search.is_some() || regex {
                return Err(());
            }
            if root.is_none() {
                return Err(());
            }
        }
    }

    Ok(CliOptions { mode, file, json, search, regex, root, depth, width })
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "gedtree".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let text = std::fs::read_to_string(&options.file)?;
        let parsed = parse_gedcom(&text)?;
        for dangling in parsed.dangling() {
            eprintln!("{program}: warning: {dangling}");
        }
        let genealogy = Genealogy::from_records(parsed.tree())?;

        match options.mode {
            Mode::List => run_list(&genealogy, &options),
            Mode::Tree => run_tree(&genealogy, &options, &program),
        }
    })();

    if let Err(err) = result {
        eprintln!("gedtree: {err}");
        std::process::exit(1);
    }
}

fn run_list(genealogy: &Genealogy, options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let summaries: Vec<IndividualSummary> = match &options.search {
        Some(needle) => {
            let mode = if options.regex {
                NameSearchMode::Regex
            } else {
                NameSearchMode::Substring
            };
            query::search_individuals(genealogy, needle, mode, true)?
                .into_iter()
                .map(IndividualSummary::of)
                .collect()
        }
        None => query::individuals_by_id(genealogy),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for line in listing_lines(&summaries) {
        println!("{line}");
    }
    Ok(())
}

/// Plain listing: a header row, then one aligned row per individual.
fn listing_lines(summaries: &[IndividualSummary]) -> Vec<String> {
    let mut lines = vec![format!("{:>5}  {:<30} {}", "id", "name", "birth date")];
    for summary in summaries {
        lines.push(format!(
            "{:>5}  {:<30} {}",
            summary.id,
            summary.name,
            summary.birth_date.as_deref().unwrap_or("")
        ));
    }
    lines
}

fn run_tree(
    genealogy: &Genealogy,
    options: &CliOptions,
    program: &str,
) -> Result<(), Box<dyn Error>> {
    let root_query = options.root.as_deref().ok_or("tree mode needs --root")?;
    let root = query::resolve_individual(genealogy, root_query)?;

    let width = options.width.unwrap_or_else(detected_width);
    let requested = options.depth.unwrap_or(DEFAULT_DEPTH);

    // Retry toward depth 0 when the width cannot hold a generation; a
    // shallower chart beats no chart, but the degradation is never silent.
    let mut depth = requested;
    loop {
        match render_pedigree(genealogy, root, depth, width) {
            Ok(chart) => {
                if depth != requested {
                    eprintln!(
                        "{program}: warning: depth {requested} does not fit in {width} columns, rendered depth {depth} instead"
                    );
                }
                print!("{chart}");
                return Ok(());
            }
            Err(PedigreeError::DepthUnsatisfiable { .. }) if depth > 0 => depth -= 1,
            Err(PedigreeError::DepthUnsatisfiable { .. }) if depth < 0 => depth += 1,
            Err(err @ PedigreeError::DepthUnsatisfiable { .. }) => {
                return Err(format!("diagram unavailable at any depth: {err}").into());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn detected_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::{listing_lines, parse_options, Mode};
    use gedtree::query::IndividualSummary;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_plain_list() {
        let options = parse_options(args(&["list", "family.ged"])).expect("parse options");
        assert_eq!(options.mode, Mode::List);
        assert_eq!(options.file, "family.ged");
        assert!(!options.json);
        assert_eq!(options.search, None);
    }

    #[test]
    fn parses_list_with_json_and_search() {
        let options =
            parse_options(args(&["list", "--json", "--search", "Dent", "family.ged"]))
                .expect("parse options");
        assert!(options.json);
        assert_eq!(options.search.as_deref(), Some("Dent"));
        assert!(!options.regex);
    }

    #[test]
    fn parses_regex_search() {
        let options =
            parse_options(args(&["list", "--search", "^D", "--regex", "family.ged"]))
                .expect("parse options");
        assert!(options.regex);
    }

    #[test]
    fn rejects_regex_without_search() {
        parse_options(args(&["list", "--regex", "family.ged"])).unwrap_err();
    }

    #[test]
    fn parses_tree_with_defaults() {
        let options =
            parse_options(args(&["tree", "--root", "13", "family.ged"])).expect("parse options");
        assert_eq!(options.mode, Mode::Tree);
        assert_eq!(options.root.as_deref(), Some("13"));
        assert_eq!(options.depth, None);
        assert_eq!(options.width, None);
    }

    #[test]
    fn parses_negative_depth() {
        let options =
            parse_options(args(&["tree", "--root", "@I1@", "--depth", "-3", "family.ged"]))
                .expect("parse options");
        assert_eq!(options.depth, Some(-3));
    }

    #[test]
    fn parses_width_override() {
        let options =
            parse_options(args(&["tree", "--root", "1", "--width", "120", "family.ged"]))
                .expect("parse options");
        assert_eq!(options.width, Some(120));
    }

    #[test]
    fn rejects_zero_width() {
        parse_options(args(&["tree", "--root", "1", "--width", "0", "family.ged"])).unwrap_err();
    }

    #[test]
    fn rejects_tree_without_root() {
        parse_options(args(&["tree", "family.ged"])).unwrap_err();
    }

    #[test]
    fn rejects_list_with_tree_flags() {
        parse_options(args(&["list", "--root", "1", "family.ged"])).unwrap_err();
        parse_options(args(&["list", "--depth", "2", "family.ged"])).unwrap_err();
    }

    #[test]
    fn rejects_tree_with_list_flags() {
        parse_options(args(&["tree", "--root", "1", "--json", "family.ged"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_file() {
        parse_options(args(&["list"])).unwrap_err();
        parse_options(args(&["tree", "--root", "1"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_mode_and_flags() {
        parse_options(args(&["serve", "family.ged"])).unwrap_err();
        parse_options(args(&["list", "--nope", "family.ged"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags_and_files() {
        parse_options(args(&["list", "--json", "--json", "family.ged"])).unwrap_err();
        parse_options(args(&["list", "one.ged", "two.ged"])).unwrap_err();
        parse_options(args(&["tree", "--root", "1", "--root", "2", "family.ged"])).unwrap_err();
    }

    #[test]
    fn listing_starts_with_a_header_row() {
        let summaries = vec![
            IndividualSummary {
                id: 1,
                name: "Arthur Dent".to_owned(),
                birth_date: Some("1 JAN 1952".to_owned()),
            },
            IndividualSummary { id: 8, name: "Random Dent".to_owned(), birth_date: None },
        ];

        let lines = listing_lines(&summaries);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("id"), "header: {}", lines[0]);
        assert!(lines[0].contains("name"), "header: {}", lines[0]);
        assert!(lines[0].contains("birth date"), "header: {}", lines[0]);
        assert!(lines[1].contains("Arthur Dent") && lines[1].contains("1 JAN 1952"));
        assert!(lines[2].trim_end().ends_with("Random Dent"));
    }

    #[test]
    fn rejects_non_numeric_depth() {
        parse_options(args(&["tree", "--root", "1", "--depth", "two", "family.ged"]))
            .unwrap_err();
    }
}
