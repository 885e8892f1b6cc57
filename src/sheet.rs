use log::{debug, info, warn};

use form_builder::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::sheet::config_reader::*;
use crate::sheet::io_json::{JsonFormService, OutputTarget};

mod io_common;
mod io_csv;
mod io_excel;
mod io_json;

#[derive(Debug, Snafu)]
pub enum SheetError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The spreadsheet {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Could not find worksheet {worksheet_name:?} in {path}"))]
    MissingWorksheet {
        worksheet_name: String,
        path: String,
    },
    #[snafu(display("Unknown input type {input_type:?} (expected csv or excel)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("No input file: use --input or the inputFile option of the configuration"))]
    MissingInput {},
    #[snafu(display("Error writing the form to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Build { source: BuildError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SheetResult<T> = Result<T, SheetError>;

pub mod config_reader {
    use crate::sheet::*;

    /// The options of a run, as read from a JSON configuration file.
    #[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
    pub struct RunConfig {
        #[serde(rename = "inputFile")]
        pub input_file: Option<String>,
        #[serde(rename = "inputType")]
        pub input_type: Option<String>,
        #[serde(rename = "worksheetName")]
        pub worksheet_name: Option<String>,
        #[serde(rename = "sheetName")]
        pub sheet_name: Option<String>,
        #[serde(rename = "outputFile")]
        pub output_file: Option<String>,
    }

    /// Reads a configuration file. The relative paths it contains are resolved
    /// against the directory of the file.
    pub fn read_config(path: &str) -> SheetResult<RunConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        debug!("read_config: content: {:?}", contents);
        let config: RunConfig =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
        let root_p = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
        Ok(RunConfig {
            input_file: config.input_file.map(|p| resolve(root_p, &p)),
            output_file: config.output_file.map(|p| {
                if p == "stdout" {
                    p
                } else {
                    resolve(root_p, &p)
                }
            }),
            ..config
        })
    }

    fn resolve(root_p: &Path, p: &str) -> String {
        let pb: PathBuf = [root_p, Path::new(p)].iter().collect();
        pb.as_path().display().to_string()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    pub fn parse(input_type: &str) -> SheetResult<InputType> {
        match input_type.to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "excel" | "xlsx" | "xls" | "ods" => Ok(InputType::Excel),
            x => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }

    /// Guesses the type of the file from its extension.
    pub fn guess(path: &str) -> SheetResult<InputType> {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "xlam" | "ods" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu { input_type: ext }.fail(),
        }
    }
}

/// All the settings of a run, after merging the configuration file and the arguments.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input: String,
    pub input_type: InputType,
    pub worksheet_name: Option<String>,
    pub sheet_name: Option<String>,
    pub out: OutputTarget,
    pub reference: Option<String>,
}

pub fn make_settings(args: &Args, created_at: &NaiveDateTime) -> SheetResult<RunSettings> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => RunConfig::default(),
    };
    info!("config: {:?}", config);

    let input = args
        .input
        .clone()
        .or(config.input_file)
        .context(MissingInputSnafu {})?;
    let input_type = match args.input_type.clone().or(config.input_type) {
        Some(t) => InputType::parse(&t)?,
        None => InputType::guess(&input)?,
    };
    let out = match args.out.clone().or(config.output_file) {
        Some(o) => OutputTarget::parse(&o),
        None => OutputTarget::File(io_common::default_output_path(&input, created_at)),
    };
    Ok(RunSettings {
        input,
        input_type,
        worksheet_name: args.excel_worksheet_name.clone().or(config.worksheet_name),
        sheet_name: args.sheet_name.clone().or(config.sheet_name),
        out,
        reference: args.reference.clone(),
    })
}

/// Reads the table and the name of the sheet.
fn read_sheet(settings: &RunSettings) -> SheetResult<(Table, String)> {
    info!(
        "Attempting to read sheet file {:?} ({:?})",
        settings.input, settings.input_type
    );
    let (table, sheet_name) = match settings.input_type {
        InputType::Csv => io_csv::read_csv_sheet(&settings.input)?,
        InputType::Excel => {
            io_excel::read_excel_sheet(&settings.input, settings.worksheet_name.as_deref())?
        }
    };
    debug!(
        "read_sheet: sheet: {:?} rows: {} columns: {}",
        sheet_name,
        table.row_count(),
        table.column_count()
    );
    Ok((table, settings.sheet_name.clone().unwrap_or(sheet_name)))
}

// The title holds the creation time, it is not compared.
fn comparable_form(js: &JSValue) -> JSValue {
    json!({
        "description": js["description"],
        "items": js["items"],
    })
}

fn check_reference(form_js: &JSValue, reference_path: &str) -> SheetResult<()> {
    let contents =
        fs::read_to_string(reference_path).context(OpeningJsonSnafu { path: reference_path })?;
    let reference: JSValue = serde_json::from_str(contents.as_str())
        .context(ParsingJsonSnafu { path: reference_path })?;
    info!("reference: {:?}", reference);

    let pretty_ref = serde_json::to_string_pretty(&comparable_form(&reference))
        .context(ParsingJsonSnafu { path: reference_path })?;
    let pretty_form = serde_json::to_string_pretty(&comparable_form(form_js))
        .context(ParsingJsonSnafu { path: reference_path })?;
    if pretty_ref != pretty_form {
        warn!("Found differences with the reference form");
        print_diff(pretty_ref.as_str(), pretty_form.as_str(), "\n");
        whatever!("Difference detected between the created form and the reference form")
    }
    Ok(())
}

/// Creates the form described by the input sheet and writes it out.
///
/// Returns the edit URL of the new form.
pub fn run_form_creation(settings: &RunSettings, created_at: &NaiveDateTime) -> SheetResult<String> {
    let (table, sheet_name) = read_sheet(settings)?;

    let mut service = JsonFormService::new(settings.out.clone());
    let report =
        form_builder::build_at(&mut service, &table, &sheet_name, created_at).context(BuildSnafu {})?;

    for c in report.warnings() {
        debug!(
            "Column {} ({:?}) not added: {:?}",
            c.index + 1,
            c.title,
            c.outcome
        );
    }

    report.form.save()?;

    if let Some(reference_path) = &settings.reference {
        check_reference(&report.form.to_json(), reference_path)?;
    }

    let edit_url = report.edit_url();
    let notice = format!("Formulário criado! Você pode editá-lo aqui: {}", edit_url);
    if settings.out == OutputTarget::Stdout {
        eprintln!("{}", notice);
    } else {
        println!("{}", notice);
    }
    Ok(edit_url)
}
