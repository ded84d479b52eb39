//! Listing filters
//!
//! Search, category and branch filtering as offered on the public results
//! page, plus the distinct labels used to populate its filter choices.

use serde::{Deserialize, Serialize};
use staku_common::db::Runner;
use std::collections::HashSet;

/// Filter over the ranked listing; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerFilter {
    /// Case-insensitive substring of name, bib or club
    pub search: String,
    /// Exact category label
    pub category: String,
    /// Exact branch label
    pub branch: String,
}

impl RunnerFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_empty() && self.branch.is_empty()
    }

    pub fn matches(&self, runner: &Runner) -> bool {
        self.matches_search(runner)
            && (self.category.is_empty() || runner.category == self.category)
            && (self.branch.is_empty() || runner.branch == self.branch)
    }

    fn matches_search(&self, runner: &Runner) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&runner.name, &runner.bib, &runner.club]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Keep matching rows, preserving their order
    pub fn apply(&self, runners: Vec<Runner>) -> Vec<Runner> {
        if self.is_empty() {
            return runners;
        }
        runners.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct non-empty labels available for filtering, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub branches: Vec<String>,
}

pub fn facets(runners: &[Runner]) -> Facets {
    Facets {
        categories: distinct(runners.iter().map(|r| r.category.as_str())),
        branches: distinct(runners.iter().map(|r| r.branch.as_str())),
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .filter(|label| !label.is_empty() && seen.insert(*label))
        .map(str::to_string)
        .collect()
}
