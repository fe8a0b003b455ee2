//! Text shown next to the numbers: labels, dates, counts and the summary line.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::config::{CompletionBar, Election, Locality};

/// The label shown inside a completion bar.
///
/// A true zero is shown as a plain "0%". Non-finite values (nothing expected) are
/// shown as "N/A" instead of leaking "NaN" or "inf" to the reader.
pub fn percent_label(percent: f64) -> String {
    if percent == 0.0 {
        "0%".to_string()
    } else if percent.is_finite() {
        format!("{:.2}%", percent)
    } else {
        "N/A".to_string()
    }
}

pub fn completion_bar(locality: &Locality, percent: f64) -> CompletionBar {
    let width_percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    CompletionBar {
        label: percent_label(percent),
        width_percent,
        visible: locality.ballots_counted != 0,
    }
}

/// Formats a count with English thousands separators: 1234567 -> "1,234,567".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

pub fn format_election_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "Tuesday, November 3, 2020, 9:05:07 PM UTC", in the offset of the timestamp.
pub fn format_last_updated(ts: &DateTime<FixedOffset>) -> String {
    format!(
        "{}, {} {}",
        ts.format("%A, %B %-d, %Y"),
        ts.format("%-I:%M:%S %p"),
        zone_label(ts.offset())
    )
}

fn zone_label(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "UTC".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let hours = secs.abs() / 3600;
    let minutes = (secs.abs() % 3600) / 60;
    if minutes == 0 {
        format!("GMT{}{}", sign, hours)
    } else {
        format!("GMT{}{}:{:02}", sign, hours, minutes)
    }
}

fn plural(word: &str) -> String {
    let consonant_y = word.ends_with('y')
        && !word.ends_with("ay")
        && !word.ends_with("ey")
        && !word.ends_with("oy")
        && !word.ends_with("uy");
    if consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// "1 locality", "3 localities".
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}", count, plural(word))
    }
}

/// The line above the list, describing what is shown.
///
/// `count` is the number of entries displayed, the total entry included.
pub fn search_summary(count: usize, query: &str, election: &Election) -> String {
    let date = format_election_date(election.date);
    if query.is_empty() {
        format!(
            "Showing all {} for {} {}",
            pluralize("locality", count),
            date,
            election.name
        )
    } else {
        format!(
            "Showing {} matching “{}” for {} {}",
            pluralize("locality", count),
            query,
            date,
            election.name
        )
    }
}

pub fn locality_sentence(locality: &Locality) -> String {
    format!(
        "{} has counted {} of {} expected ballots{}.",
        locality.name,
        format_count(locality.ballots_counted),
        format_count(locality.ballots_expected),
        if locality.is_total() { " in total" } else { "" }
    )
}
