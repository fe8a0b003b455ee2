use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate};

pub use crate::config::*;

/// A builder for assembling a report without going through a document.
///
/// ```
/// use chrono::{DateTime, NaiveDate};
/// pub use locality_report::builder::ReportBuilder;
/// # use locality_report::ReportErrors;
///
/// let mut builder = ReportBuilder::new(
///     "Virginia Election Night Results",
///     "General Election",
///     NaiveDate::from_ymd_opt(2020, 11, 3).unwrap(),
///     DateTime::parse_from_rfc3339("2020-11-04T02:00:00Z").unwrap(),
/// );
///
/// builder.add_locality("51059", "Fairfax County", 120_000, 600_000)?;
/// builder.add_locality("51013", "Arlington County", 80_000, 130_000)?;
///
/// let report = builder.build();
/// assert_eq!(report.localities.len(), 2);
///
/// # Ok::<(), ReportErrors>(())
/// ```
pub struct ReportBuilder {
    pub(crate) _name: String,
    pub(crate) _election: Election,
    pub(crate) _last_updated: DateTime<FixedOffset>,
    pub(crate) _localities: Vec<Locality>,
    _ids: HashSet<String>,
}

impl ReportBuilder {
    pub fn new(
        name: &str,
        election_name: &str,
        election_date: NaiveDate,
        last_updated: DateTime<FixedOffset>,
    ) -> ReportBuilder {
        ReportBuilder {
            _name: name.to_string(),
            _election: Election {
                name: election_name.to_string(),
                date: election_date,
            },
            _last_updated: last_updated,
            _localities: Vec::new(),
            _ids: HashSet::new(),
        }
    }

    /// Adds a locality to the report.
    ///
    /// Colors are keyed by id, so an id may only be used once. The id of the
    /// aggregate entry is reserved as well.
    pub fn add_locality(
        &mut self,
        id: &str,
        name: &str,
        ballots_counted: u64,
        ballots_expected: u64,
    ) -> Result<(), ReportErrors> {
        self.add_locality_2(&Locality {
            id: id.to_string(),
            name: name.to_string(),
            ballots_counted,
            ballots_expected,
        })
    }

    pub fn add_locality_2(&mut self, locality: &Locality) -> Result<(), ReportErrors> {
        if locality.is_total() || !self._ids.insert(locality.id.clone()) {
            return Err(ReportErrors::DuplicateLocality(locality.id.clone()));
        }
        self._localities.push(locality.clone());
        Ok(())
    }

    pub fn build(self) -> Report {
        Report {
            name: self._name,
            election: self._election,
            last_updated: self._last_updated,
            localities: self._localities,
        }
    }
}
