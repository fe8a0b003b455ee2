// Reading the published report document.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use crate::enr::*;

pub fn read_report_document(path: &str) -> EnrResult<ReportDocument> {
    info!("Attempting to read report file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let doc: ReportDocument =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!(
        "read_report_document: {:?}: {:?} localities",
        doc.name,
        doc.localities.len()
    );
    Ok(doc)
}

/// Turns the document into a report. The content is trusted: only the dates are checked.
pub fn validate_report(doc: &ReportDocument) -> EnrResult<Report> {
    let mut seen: HashSet<&str> = HashSet::new();
    for l in doc.localities.iter() {
        if !seen.insert(l.id.as_str()) {
            warn!(
                "validate_report: locality id {:?} appears more than once, colors will be shared",
                l.id
            );
        }
    }

    let localities: Vec<Locality> = doc
        .localities
        .iter()
        .map(|l| Locality {
            id: l.id.clone(),
            name: l.name.clone(),
            ballots_counted: l.ballots_counted,
            ballots_expected: l.ballots_expected,
        })
        .collect();

    Ok(Report {
        name: doc.name.clone(),
        election: Election {
            name: doc.election.name.clone(),
            date: parse_election_date(&doc.election.date)?,
        },
        last_updated: parse_timestamp(&doc.last_updated)?,
        localities,
    })
}

/// Accepts a plain date or a full timestamp, of which only the date is kept.
pub fn parse_election_date(value: &str) -> EnrResult<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").context(ParsingDateSnafu { value })
}

/// RFC 3339 timestamps. Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> EnrResult<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .context(ParsingDateSnafu { value })?;
    match FixedOffset::east_opt(0) {
        Some(utc) => Ok(utc.from_utc_datetime(&naive)),
        None => whatever!("Could not build the UTC offset"),
    }
}
