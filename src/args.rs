use clap::Parser;

/// This is an election-night reporting program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. The path to the report that it contains
    /// is relative to the configuration file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The report document in JSON format. Setting this option overrides the
    /// report path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (text, optional) Only show the localities whose name contains this text. It is
    /// truncated to 30 characters.
    #[clap(short, long, value_parser)]
    pub filter: Option<String>,

    /// (substring or pattern, default substring) How the filter is matched against the names.
    /// With 'pattern', the filter is a case-insensitive regular expression.
    #[clap(long, value_parser)]
    pub filter_mode: Option<String>,

    /// (once, every-render or stable, default once) How colors are assigned to the localities.
    #[clap(long, value_parser)]
    pub color_mode: Option<String>,

    /// (integer, optional) The seed for the color assignment. With the 'stable' color mode,
    /// it selects the palette. With the other modes, it makes the shuffle reproducible.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (text, default 'State of Virginia') The name of the entry that sums all the localities.
    #[clap(long, value_parser)]
    pub total_label: Option<String>,

    /// (text or json, default text) The output format.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (file path, 'stdout' or empty) Where the output is written. Defaults to stdout.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected output in JSON format. If provided,
    /// enr will check that its output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
