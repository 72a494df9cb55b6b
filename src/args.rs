use clap::Parser;

/// Charts of the CTU hotspot surveys (staff and learners), by location.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A configuration file in JSON format that lists the survey files and the output options.
    /// The options passed on the command line take precedence over the ones in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The Excel export of the staff survey (xlsx or xls).
    #[clap(short, long, value_parser)]
    pub staff: Option<String>,

    /// (file path) The Excel export of the learner survey (xlsx or xls).
    #[clap(short, long, value_parser)]
    pub learner: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the chart data of all the tabs will be written in JSON format to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, an HTML page with the charts of every location tab is written to this location.
    #[clap(long, value_parser)]
    pub html: Option<String>,

    /// (file path) A reference file containing the expected chart data in JSON format. If provided, hotspot will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed, an answer that is not part of the scale of its question stops the program
    /// instead of being left out of the percentages.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    /// (default: first worksheet) Indicates the name of the worksheet to use in both Excel files.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
