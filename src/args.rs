use clap::Parser;

/// Creates a form from a spreadsheet: one question per column, the first row
/// holding the titles, the second row the question types and the next rows the choices.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the options of the run. Options given on the
    /// command line take precedence over the ones in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet describing the questions.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. By default, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the first worksheet) When using a spreadsheet file, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The name of the sheet, as written in the title and the description of the form.
    /// By default, the name of the worksheet or of the CSV file.
    #[clap(long, value_parser)]
    pub sheet_name: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the form. By default, a new file is created
    /// next to the input for every run.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference form in JSON format. If provided, sheetform will check that the
    /// description and the fields of the created form match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
