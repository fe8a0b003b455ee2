use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use snafu::prelude::*;

use crate::enr::{EnrResult, WritingOutputSnafu};

/// The longest query accepted from the reader.
pub const MAX_QUERY_CHARS: usize = 30;

pub fn truncate_query(query: &str) -> String {
    if query.chars().count() > MAX_QUERY_CHARS {
        warn!(
            "The filter {:?} is longer than {} characters, it will be truncated",
            query, MAX_QUERY_CHARS
        );
    }
    query.chars().take(MAX_QUERY_CHARS).collect()
}

/// Paths in a configuration file are relative to the directory of the configuration file.
pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

pub fn write_output(out: &Option<String>, content: &str) -> EnrResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
        }
        Some(path) => {
            debug!("write_output: writing {:?} bytes to {:?}", content.len(), path);
            fs::write(path, content).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}
