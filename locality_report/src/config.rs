// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// The identifier reserved for the aggregate entry.
pub const TOTAL_ID: &str = "total";

/// The label of the aggregate entry when none is configured.
pub const DEFAULT_TOTAL_LABEL: &str = "State of Virginia";

/// An administrative sub-region (county, city, ...) reporting its own ballot counts.
///
/// The number of counted ballots is expected to stay below the number of
/// expected ballots, but this is not checked: the report is trusted input.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Locality {
    pub id: String,
    pub name: String,
    pub ballots_counted: u64,
    pub ballots_expected: u64,
}

impl Locality {
    pub fn is_total(&self) -> bool {
        self.id == TOTAL_ID
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    pub name: String,
    pub date: NaiveDate,
}

/// The root document of an election-night report.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Report {
    pub name: String,
    pub election: Election,
    pub last_updated: DateTime<FixedOffset>,
    /// The order of the localities carries no meaning.
    pub localities: Vec<Locality>,
}

// ******** Output data structures *********

/// A color in the HSL space, as understood by CSS.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
}

impl Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({} {}% {}% / 1)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// How the completion bar of an entry should be drawn.
#[derive(PartialEq, Debug, Clone)]
pub struct CompletionBar {
    pub label: String,
    /// Always within [0, 100].
    pub width_percent: f64,
    /// Hidden when nothing has been counted yet.
    pub visible: bool,
}

/// One line of the rendered list.
#[derive(PartialEq, Debug, Clone)]
pub struct DisplayEntry {
    pub locality: Locality,
    pub is_total: bool,
    /// May be NaN or infinite when no ballots are expected.
    pub percent_complete: f64,
    pub color: Option<Hsl>,
    pub bar: CompletionBar,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ReportView {
    pub title: String,
    pub last_updated_label: String,
    pub summary: String,
    pub query: String,
    /// The aggregate entry comes first, followed by the sorted localities.
    pub entries: Vec<DisplayEntry>,
    /// Set when the query matched nothing and the reader should be offered to reset it.
    pub show_all_hint: bool,
}

/// Errors that prevent a report from being built or viewed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ReportErrors {
    /// The query could not be compiled as a pattern.
    InvalidPattern(String),
    /// Two localities share the same identifier.
    DuplicateLocality(String),
}

impl Error for ReportErrors {}

impl Display for ReportErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportErrors::InvalidPattern(msg) => write!(f, "Invalid filter pattern: {}", msg),
            ReportErrors::DuplicateLocality(id) => write!(f, "Duplicate locality id: {}", id),
        }
    }
}

// ********* Configuration **********

/// How colors are handed out to the localities.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ColorMode {
    /// Shuffled once, when the report is loaded.
    OncePerLoad,
    /// Shuffled again every time a view is produced.
    EveryRender,
    /// Ordered by a hash of the locality id: the same report always gets the same colors.
    StableById(u64),
}

/// How the query typed by the reader is matched against the locality names.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FilterMode {
    /// Case-insensitive literal substring.
    Substring,
    /// Case-insensitive regular expression.
    Pattern,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportRules {
    pub color_mode: ColorMode,
    pub filter_mode: FilterMode,
    pub total_label: String,
    /// Seeds the shuffles of the random color modes. Drawn from the OS when missing.
    pub random_seed: Option<u64>,
}

impl Default for ReportRules {
    fn default() -> Self {
        ReportRules {
            color_mode: ColorMode::OncePerLoad,
            filter_mode: FilterMode::Substring,
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
            random_seed: None,
        }
    }
}
