// SPDX-FileCopyrightText: 2026 gedtree contributors
// SPDX-License-Identifier: MIT

//! Lookups over a built genealogy: listings, name search, and resolving the
//! user's root argument to a single individual.

use std::fmt;

use rapidfuzz::fuzz;
use regex::RegexBuilder;
use serde::Serialize;

use crate::model::{Genealogy, Individual, IndividualId};

/// How a name query string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSearchMode {
    #[default]
    Substring,
    Regex,
}

/// One row of the `list` output. Serialized as-is for the JSON variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndividualSummary {
    pub id: u32,
    pub name: String,
    pub birth_date: Option<String>,
}

impl IndividualSummary {
    pub fn of(individual: &Individual) -> Self {
        Self {
            id: individual.id().value(),
            name: individual.display_name(),
            birth_date: individual.birth_date().map(str::to_owned),
        }
    }
}

pub fn individual_by_id(genealogy: &Genealogy, id: IndividualId) -> Option<&Individual> {
    genealogy.get(id)
}

/// Summaries of every individual, ascending by numeric id.
pub fn individuals_by_id(genealogy: &Genealogy) -> Vec<IndividualSummary> {
    genealogy.individuals().values().map(IndividualSummary::of).collect()
}

/// Finds individuals whose name matches `needle`.
///
/// The raw recorded name, the cleaned display name and the `first last`
/// combination are all tried, so both `/Smith/` and `John Smith` queries hit.
/// Substring mode escapes the needle; regex errors only surface in
/// [`NameSearchMode::Regex`].
pub fn search_individuals<'a>(
    genealogy: &'a Genealogy,
    needle: &str,
    mode: NameSearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a Individual>, regex::Error> {
    let pattern = match mode {
        NameSearchMode::Substring => regex::escape(needle),
        NameSearchMode::Regex => needle.to_owned(),
    };
    let matcher = RegexBuilder::new(&pattern).case_insensitive(case_insensitive).build()?;

    Ok(genealogy
        .individuals()
        .values()
        .filter(|individual| {
            matcher.is_match(individual.raw_name())
                || matcher.is_match(&individual.display_name())
                || matcher.is_match(&first_last(individual))
        })
        .collect())
}

fn first_last(individual: &Individual) -> String {
    match (individual.first_name(), individual.last_name()) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_owned(),
        (None, Some(last)) => last.to_owned(),
        (None, None) => String::new(),
    }
}

/// Resolves the user's root query to exactly one individual.
///
/// A query that parses as a numeric id (bare or `@`-delimited) is an id
/// lookup; anything else is a case-insensitive substring name search. Zero
/// matches report the closest recorded names as suggestions; more than one
/// match lists every candidate so the user can re-run with an id.
pub fn resolve_individual(
    genealogy: &Genealogy,
    query: &str,
) -> Result<IndividualId, RootQueryError> {
    if let Ok(id) = query.parse::<IndividualId>() {
        return match individual_by_id(genealogy, id) {
            Some(individual) => Ok(individual.id()),
            None => Err(RootQueryError::NotFound {
                query: query.to_owned(),
                suggestions: closest_names(genealogy, query),
            }),
        };
    }

    let matches = search_individuals(genealogy, query, NameSearchMode::Substring, true)
        .unwrap_or_default();

    match matches.as_slice() {
        [] => Err(RootQueryError::NotFound {
            query: query.to_owned(),
            suggestions: closest_names(genealogy, query),
        }),
        [individual] => Ok(individual.id()),
        _ => Err(RootQueryError::Ambiguous {
            matches: matches
                .iter()
                .map(|individual| (individual.id(), individual.display_name()))
                .collect(),
        }),
    }
}

const SUGGESTION_LIMIT: usize = 3;
const SUGGESTION_CUTOFF: f64 = 50.0;

/// The recorded names closest to `query`, best first, for did-you-mean
/// output. Scores below the cutoff are not worth suggesting.
pub fn closest_names(genealogy: &Genealogy, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let mut scored: Vec<(f64, String)> = genealogy
        .individuals()
        .values()
        .map(|individual| {
            let name = individual.display_name();
            let score = fuzz::ratio(query.chars(), name.to_lowercase().chars());
            (score, name)
        })
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(SUGGESTION_LIMIT);
    scored.into_iter().map(|(_, name)| name).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootQueryError {
    NotFound { query: String, suggestions: Vec<String> },
    Ambiguous { matches: Vec<(IndividualId, String)> },
}

impl fmt::Display for RootQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { query, suggestions } => {
                write!(f, "no individual matches {query:?}")?;
                if !suggestions.is_empty() {
                    write!(f, "; closest names: {}", suggestions.join(", "))?;
                }
                Ok(())
            }
            Self::Ambiguous { matches } => {
                write!(f, "{} individuals match; pick one by id:", matches.len())?;
                for (id, name) in matches {
                    write!(f, " [{id}] {name}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RootQueryError {}
