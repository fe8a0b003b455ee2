use log::{debug, info, warn};

use locality_report::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::enr::config_reader::*;
use crate::enr::io_common::{resolve_path, truncate_query, write_output};
use crate::enr::report_reader::{read_report_document, validate_report};

pub mod config_reader;
mod io_common;
pub mod render;
mod report_reader;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EnrError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Could not understand the date {value:?}"))]
    ParsingDate {
        source: chrono::ParseError,
        value: String,
    },
    #[snafu(display("Unknown value {value:?} for option {name}"))]
    InvalidOption { name: String, value: String },
    #[snafu(display("No report given: use --input or a configuration file with reportPath"))]
    MissingReport {},
    #[snafu(display("Could not find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error producing the JSON output"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("{source}"))]
    Aggregation { source: ReportErrors },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type EnrResult<T> = Result<T, EnrError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything needed for one run, once the command line and the configuration file
/// have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSettings {
    pub report_path: String,
    pub rules: ReportRules,
    pub query: String,
    pub format: OutputFormat,
    pub out: Option<String>,
    pub reference: Option<String>,
}

fn parse_color_mode(value: &str, seed: Option<u64>) -> EnrResult<ColorMode> {
    match value {
        "once" | "oncePerLoad" => Ok(ColorMode::OncePerLoad),
        "every-render" | "everyRender" => Ok(ColorMode::EveryRender),
        "stable" => Ok(ColorMode::StableById(seed.unwrap_or(0))),
        x => InvalidOptionSnafu {
            name: "color mode",
            value: x,
        }
        .fail(),
    }
}

fn parse_filter_mode(value: &str) -> EnrResult<FilterMode> {
    match value {
        "substring" => Ok(FilterMode::Substring),
        "pattern" => Ok(FilterMode::Pattern),
        x => InvalidOptionSnafu {
            name: "filter mode",
            value: x,
        }
        .fail(),
    }
}

fn parse_format(value: &str) -> EnrResult<OutputFormat> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        x => InvalidOptionSnafu {
            name: "format",
            value: x,
        }
        .fail(),
    }
}

/// Merges the command line with the configuration file, if any.
/// The command line takes precedence.
pub fn resolve_settings(args: &Args) -> EnrResult<ReportSettings> {
    let config: Option<(EnrConfig, String)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            Some((config, config_path.clone()))
        }
        None => None,
    };

    let report_path: String = match (&args.input, &config) {
        (Some(p), _) => p.clone(),
        (None, Some((c, config_path))) => {
            let rel = c.report_path.clone().context(MissingReportSnafu {})?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?;
            resolve_path(root, &rel)
        }
        (None, None) => return MissingReportSnafu {}.fail(),
    };

    let c = config.map(|(c, _)| c);
    let config_seed = match &c {
        Some(c) => c.random_seed()?,
        None => None,
    };
    let random_seed = args.seed.or(config_seed);

    let color_mode_s = args
        .color_mode
        .clone()
        .or_else(|| c.as_ref().and_then(|c| c.color_mode.clone()));
    let color_mode = match color_mode_s {
        Some(s) => parse_color_mode(&s, random_seed)?,
        None => ColorMode::OncePerLoad,
    };

    let filter_mode_s = args
        .filter_mode
        .clone()
        .or_else(|| c.as_ref().and_then(|c| c.filter_mode.clone()));
    let filter_mode = match filter_mode_s {
        Some(s) => parse_filter_mode(&s)?,
        None => FilterMode::Substring,
    };

    let total_label = args
        .total_label
        .clone()
        .or_else(|| c.as_ref().and_then(|c| c.total_label.clone()))
        .unwrap_or_else(|| DEFAULT_TOTAL_LABEL.to_string());

    let query = args
        .filter
        .clone()
        .or_else(|| c.as_ref().and_then(|c| c.filter.clone()))
        .unwrap_or_default();

    let format = match &args.format {
        Some(s) => parse_format(s)?,
        None => OutputFormat::Text,
    };

    Ok(ReportSettings {
        report_path,
        rules: ReportRules {
            color_mode,
            filter_mode,
            total_label,
            random_seed,
        },
        query: truncate_query(&query),
        format,
        out: args.out.clone(),
        reference: args.reference.clone(),
    })
}

/// Renders the report and checks it against the reference, if one is given.
/// Returns the rendered output.
pub fn run_report_settings(settings: &ReportSettings) -> EnrResult<String> {
    let doc = read_report_document(&settings.report_path)?;
    let report = validate_report(&doc)?;

    let view = run_report(report, &settings.rules, &settings.query)
        .context(AggregationSnafu {})?;
    debug!("run_report_settings: view: {:?}", view);

    let result_js = render::view_to_json(&view);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    // The reference output, if provided for comparison
    if let Some(reference_p) = &settings.reference {
        let reference_js: JSValue = read_reference(reference_p)?;
        let pretty_js_reference =
            serde_json::to_string_pretty(&reference_js).context(SerializingJsonSnafu {})?;
        if pretty_js_reference != pretty_js {
            warn!("Found differences with the reference output");
            print_diff(pretty_js_reference.as_str(), pretty_js.as_str(), "\n");
            return ReferenceMismatchSnafu {
                path: reference_p.clone(),
            }
            .fail();
        }
    }

    let output = match settings.format {
        OutputFormat::Json => pretty_js,
        OutputFormat::Text => render::view_to_text(&view),
    };
    Ok(output)
}

pub fn run_report_command(args: &Args) -> EnrResult<()> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);
    let output = run_report_settings(&settings)?;
    write_output(&settings.out, &output)
}

/// Prints an error with its chain of causes.
pub fn report_error(e: &EnrError) {
    eprintln!("An error occured: {}", e);
    let mut cause = std::error::Error::source(e);
    while let Some(c) = cause {
        eprintln!("caused by: {}", c);
        cause = c.source();
    }
}
