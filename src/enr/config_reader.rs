use crate::enr::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The optional configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct EnrConfig {
    #[serde(rename = "reportPath")]
    pub report_path: Option<String>,
    #[serde(rename = "totalLabel")]
    pub total_label: Option<String>,
    #[serde(rename = "colorMode")]
    pub color_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
    #[serde(rename = "filterMode")]
    pub filter_mode: Option<String>,
    pub filter: Option<String>,
}

impl EnrConfig {
    pub fn random_seed(&self) -> EnrResult<Option<u64>> {
        read_js_int(&self.random_seed)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionDocument {
    pub name: String,
    pub date: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LocalityDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "ballotsCounted")]
    pub ballots_counted: u64,
    #[serde(rename = "ballotsExpected")]
    pub ballots_expected: u64,
}

/// The static report, as published.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub name: String,
    pub election: ElectionDocument,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub localities: Vec<LocalityDocument>,
}

pub fn read_config(path: &str) -> EnrResult<EnrConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: EnrConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_reference(path: &str) -> EnrResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_reference: {:?}", js["localities"].as_array().map(|l| l.len()));
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> EnrResult<Option<u64>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => match n.as_u64() {
            Some(v) => Ok(Some(v)),
            None => whatever!("randomSeed must be a non-negative integer, got {}", n),
        },
        Some(JSValue::String(s)) => match s.parse::<u64>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => whatever!("randomSeed must be a non-negative integer, got {:?}", s),
        },
        Some(other) => whatever!("randomSeed must be a non-negative integer, got {}", other),
    }
}
