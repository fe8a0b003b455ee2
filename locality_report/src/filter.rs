use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{FilterMode, Locality, ReportErrors};

#[derive(Debug, Clone)]
enum Matcher {
    Everything,
    // Lowercased query.
    Substring(String),
    Pattern(Regex),
}

/// A query typed by the reader, ready to be matched against locality names.
///
/// Matching is always case-insensitive and unanchored. An empty query matches every name.
#[derive(Debug, Clone)]
pub struct LocalityFilter {
    query: String,
    matcher: Matcher,
}

impl LocalityFilter {
    pub fn new(query: &str, mode: FilterMode) -> Result<LocalityFilter, ReportErrors> {
        let matcher = match mode {
            _ if query.is_empty() => Matcher::Everything,
            FilterMode::Substring => Matcher::Substring(query.to_lowercase()),
            FilterMode::Pattern => {
                let re = RegexBuilder::new(query)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ReportErrors::InvalidPattern(e.to_string()))?;
                Matcher::Pattern(re)
            }
        };
        debug!("LocalityFilter::new: query: {:?} mode: {:?}", query, mode);
        Ok(LocalityFilter {
            query: query.to_string(),
            matcher,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Substring(q) => name.to_lowercase().contains(q.as_str()),
            Matcher::Pattern(re) => re.is_match(name),
        }
    }

    /// The matching localities, in their original order.
    pub fn apply(&self, localities: &[Locality]) -> Vec<Locality> {
        localities
            .iter()
            .filter(|l| self.matches(&l.name))
            .cloned()
            .collect()
    }
}

/// Keeps the localities whose name matches the query.
pub fn filter(
    localities: &[Locality],
    query: &str,
    mode: FilterMode,
) -> Result<Vec<Locality>, ReportErrors> {
    let f = LocalityFilter::new(query, mode)?;
    Ok(f.apply(localities))
}
