/*!
Builds a form out of a sheet describing its questions.

The sheet is read as a [`Table`]: the first row holds the titles of the questions,
the second row their types (see [`QuestionType`]) and the rows below the choices
offered by the multiple choice, checkbox and dropdown questions.

```
use form_builder::{build, FieldSpec, MemoryFormService, Table};

let table = Table::from_strings(&[
    &["Name", "Color"],
    &["texto curto", "múltipla escolha"],
    &["", "Red"],
    &["", "Blue"],
]);
let mut service = MemoryFormService::new();
let report = build(&mut service, &table, "Sheet1")?;

assert_eq!(
    report.form.fields(),
    &[
        FieldSpec::ShortText { title: "Name".to_string() },
        FieldSpec::MultipleChoice {
            title: "Color".to_string(),
            choices: vec!["Red".to_string(), "Blue".to_string()],
        },
    ]
);
# Ok::<(), form_builder::BuildError>(())
```

See the [`manual`] for the layout of the sheet.
*/
mod config;
mod memory;
mod service;

pub mod manual;

use chrono::{Local, NaiveDateTime};
use log::{debug, error, info, warn};
use snafu::prelude::*;

pub use crate::config::*;
pub use crate::memory::*;
pub use crate::service::*;

/// Errors that prevent the creation of the form.
///
/// A failure to add a single field is not one of them: it is reported in the
/// [`ColumnOutcome`] of the column.
#[derive(Debug, Snafu)]
pub enum BuildError {
    #[snafu(display(
        "Erro: A planilha deve conter pelo menos 2 linhas: uma para títulos e uma para tipos de pergunta."
    ))]
    Validation { rows: usize },
    #[snafu(display("Could not create the form {title:?}: {source}"))]
    CreateForm {
        title: String,
        source: FormServiceError,
    },
}

/// What happened to one column of the sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColumnOutcome {
    /// A field was added to the form.
    Added(FieldId),
    /// The column has no title and was ignored.
    EmptyTitle,
    /// The column has no question type and was ignored.
    EmptyType,
    /// A question that needs choices did not have any.
    MissingChoices(QuestionType),
    /// The question type is not known. Holds the type as written in the sheet.
    UnknownType(String),
    /// The form service refused the field.
    Failed(FormServiceError),
}

impl ColumnOutcome {
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ColumnOutcome::MissingChoices(_) | ColumnOutcome::UnknownType(_) | ColumnOutcome::Failed(_)
        )
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnReport {
    /// Position of the column, starting at 0.
    pub index: usize,
    pub title: String,
    pub outcome: ColumnOutcome,
}

/// The created form, and what happened to every column of the sheet.
#[derive(Debug, Clone)]
pub struct FormReport<F> {
    pub form: F,
    pub columns: Vec<ColumnReport>,
}

impl<F: FormHandle> FormReport<F> {
    pub fn edit_url(&self) -> String {
        self.form.edit_url()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ColumnReport> {
        self.columns.iter().filter(|c| c.outcome.is_warning())
    }

    pub fn added(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c.outcome, ColumnOutcome::Added(_)))
            .count()
    }
}

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// The title of a form created from the given sheet.
///
/// The timestamp keeps apart the forms created from the same sheet.
pub fn form_title(sheet_name: &str, created_at: &NaiveDateTime) -> String {
    format!(
        "Formulário criado de: {} ({})",
        sheet_name,
        created_at.format(TIMESTAMP_FORMAT)
    )
}

pub fn form_description(sheet_name: &str) -> String {
    format!(
        "Este formulário foi gerado automaticamente da Planilha Google '{}'.",
        sheet_name
    )
}

/// Creates a new form with one field per column of the table.
///
/// Every call creates a new form, even for the same table.
pub fn build<S: FormService>(
    service: &mut S,
    table: &Table,
    sheet_name: &str,
) -> Result<FormReport<S::Form>, BuildError> {
    build_at(service, table, sheet_name, &Local::now().naive_local())
}

/// Same as [`build`], with the creation time given explicitly.
pub fn build_at<S: FormService>(
    service: &mut S,
    table: &Table,
    sheet_name: &str,
    created_at: &NaiveDateTime,
) -> Result<FormReport<S::Form>, BuildError> {
    if table.row_count() < 2 {
        let err = ValidationSnafu {
            rows: table.row_count(),
        }
        .build();
        error!("{} ({} row(s) found)", err, table.row_count());
        return Err(err);
    }

    let title = form_title(sheet_name, created_at);
    let mut form = service
        .create_form(&title, &form_description(sheet_name))
        .context(CreateFormSnafu {
            title: title.clone(),
        })?;
    info!("Created new form: {:?}", title);
    info!("Edit URL: {}", form.edit_url());

    let num_columns = table.column_count();
    let mut columns: Vec<ColumnReport> = Vec::with_capacity(num_columns);
    for idx in 0..num_columns {
        let column = table.column(idx);
        let outcome = add_column(&mut form, &column);
        columns.push(ColumnReport {
            index: idx,
            title: column.title,
            outcome,
        });
    }

    let report = FormReport { form, columns };
    info!(
        "Form creation complete: {} field(s) added out of {} column(s)",
        report.added(),
        num_columns
    );
    Ok(report)
}

// Column numbers in the messages start at 1, as in the spreadsheet.
fn add_column<F: FormHandle>(form: &mut F, column: &Column) -> ColumnOutcome {
    let colno = column.index + 1;
    if column.title.is_empty() {
        info!("Skipping column {}: the title is empty", colno);
        return ColumnOutcome::EmptyTitle;
    }
    if column.normalized_type.is_empty() {
        info!(
            "Skipping column {} ({:?}): the question type is empty in row 2",
            colno, column.title
        );
        return ColumnOutcome::EmptyType;
    }

    debug!(
        "add_column: column {}: title: {:?} type: {:?} choices: {:?}",
        colno, column.title, column.raw_type, column.choices
    );

    let question_type = match QuestionType::from_tag(&column.normalized_type) {
        Some(qt) => qt,
        None => {
            warn!(
                "Unknown question type in column {}: {:?}. No field added.",
                colno, column.raw_type
            );
            return ColumnOutcome::UnknownType(column.raw_type.clone());
        }
    };

    let spec = match question_type.field_spec(&column.title, &column.choices) {
        Some(spec) => spec,
        None => {
            warn!(
                "Question {:?} ({}) has no choices in the sheet (row 3 and below). No field added.",
                column.title, question_type
            );
            return ColumnOutcome::MissingChoices(question_type);
        }
    };

    match form.add_field(&spec) {
        Ok(field_id) => {
            match spec.choices() {
                Some(choices) => info!(
                    "Added {:?}: {} with {} choice(s)",
                    column.title,
                    question_type,
                    choices.len()
                ),
                None => info!("Added {:?}: {}", column.title, question_type),
            }
            ColumnOutcome::Added(field_id)
        }
        Err(e) => {
            warn!("Error while adding a field for {:?}: {}", column.title, e);
            ColumnOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 7))
            .unwrap()
    }

    fn run(rows: &[&[&str]]) -> Result<FormReport<MemoryForm>, BuildError> {
        init();
        let mut service = MemoryFormService::new();
        build_at(&mut service, &Table::from_strings(rows), "Sheet1", &created_at())
    }

    fn s(l: &[&str]) -> Vec<String> {
        l.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn less_than_two_rows() {
        init();
        let tables: Vec<Table> = vec![
            Table::new(vec![]),
            Table::from_strings(&[&["Name", "Color"]]),
        ];
        for table in tables {
            let mut service = MemoryFormService::new();
            let res = build(&mut service, &table, "Sheet1");
            assert!(matches!(res, Err(BuildError::Validation { .. })));
            assert_eq!(service.created(), 0);
        }
    }

    #[test]
    fn validation_message() {
        let err = run(&[&["Name"]]).unwrap_err();
        assert!(matches!(err, BuildError::Validation { rows: 1 }));
        assert_eq!(
            err.to_string(),
            "Erro: A planilha deve conter pelo menos 2 linhas: uma para títulos e uma para tipos de pergunta."
        );
    }

    #[test]
    fn zero_and_false_titles_and_types_are_blank() {
        init();
        let table = Table::new(vec![
            vec![
                Cell::Int(0),
                Cell::Bool(false),
                Cell::Text("Q".to_string()),
                Cell::Number(0.0),
            ],
            vec![
                Cell::Text("texto curto".to_string()),
                Cell::Text("data".to_string()),
                Cell::Bool(false),
                Cell::Text("hora".to_string()),
            ],
        ]);
        let mut service = MemoryFormService::new();
        let report = build_at(&mut service, &table, "Sheet1", &created_at()).unwrap();
        assert!(report.form.fields().is_empty());
        let outcomes: Vec<ColumnOutcome> =
            report.columns.iter().map(|c| c.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                ColumnOutcome::EmptyTitle,
                ColumnOutcome::EmptyTitle,
                ColumnOutcome::EmptyType,
                ColumnOutcome::EmptyTitle,
            ]
        );
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn title_and_description() {
        let report = run(&[&["Name"], &["texto curto"]]).unwrap();
        assert_eq!(
            report.form.title(),
            "Formulário criado de: Sheet1 (09/03/2024 14:05:07)"
        );
        assert_eq!(
            report.form.description(),
            "Este formulário foi gerado automaticamente da Planilha Google 'Sheet1'."
        );
        assert_eq!(report.form.id(), 1);
        assert_eq!(report.edit_url(), "memory://forms/1/edit");
    }

    #[test]
    fn short_text_and_multiple_choice() {
        let report = run(&[
            &["Name", "Color"],
            &["texto curto", "múltipla escolha"],
            &["", "Red"],
            &["", "Blue"],
        ])
        .unwrap();
        assert_eq!(
            report.form.fields(),
            &[
                FieldSpec::ShortText {
                    title: "Name".to_string()
                },
                FieldSpec::MultipleChoice {
                    title: "Color".to_string(),
                    choices: s(&["Red", "Blue"])
                },
            ]
        );
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn dropdown_without_choices() {
        let report = run(&[&["Q1"], &["lista suspensa"]]).unwrap();
        assert!(report.form.fields().is_empty());
        let warnings: Vec<&ColumnReport> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].outcome,
            ColumnOutcome::MissingChoices(QuestionType::Dropdown)
        );
        assert_eq!(warnings[0].title, "Q1");
    }

    #[test]
    fn scale_and_unknown_type() {
        let report = run(&[&["A", "B"], &["escala linear", "tipo desconhecido"]]).unwrap();
        assert_eq!(
            report.form.fields(),
            &[FieldSpec::LinearScale {
                title: "A".to_string(),
                lower: 1,
                upper: 5
            }]
        );
        assert_eq!(
            report.columns[1].outcome,
            ColumnOutcome::UnknownType("tipo desconhecido".to_string())
        );
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn empty_title_is_skipped() {
        let report = run(&[
            &["", "  ", "Name"],
            &["múltipla escolha", "texto curto", "parágrafo"],
            &["A", "B", ""],
        ])
        .unwrap();
        assert_eq!(
            report.form.fields(),
            &[FieldSpec::Paragraph {
                title: "Name".to_string()
            }]
        );
        assert_eq!(report.columns[0].outcome, ColumnOutcome::EmptyTitle);
        assert_eq!(report.columns[1].outcome, ColumnOutcome::EmptyTitle);
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn empty_type_is_skipped() {
        let report = run(&[&["Name", "Age"], &["", " "], &["x", "y"]]).unwrap();
        assert!(report.form.fields().is_empty());
        assert_eq!(report.columns[0].outcome, ColumnOutcome::EmptyType);
        assert_eq!(report.columns[1].outcome, ColumnOutcome::EmptyType);
    }

    #[test]
    fn type_row_shorter_than_header() {
        let report = run(&[&["Name", "Age"], &["texto curto"]]).unwrap();
        assert_eq!(report.form.fields().len(), 1);
        assert_eq!(report.columns[1].outcome, ColumnOutcome::EmptyType);
    }

    #[test]
    fn choices_keep_order_and_duplicates() {
        let report = run(&[
            &["Fruit"],
            &["caixa de seleção"],
            &["A"],
            &[""],
            &["B"],
            &["C"],
            &["A"],
            &[" "],
        ])
        .unwrap();
        assert_eq!(
            report.form.fields(),
            &[FieldSpec::Checkbox {
                title: "Fruit".to_string(),
                choices: s(&["A", "B", "C", "A", " "])
            }]
        );
    }

    #[test]
    fn choices_from_ragged_rows() {
        let report = run(&[
            &["Q1", "Q2"],
            &["texto curto", "lista suspensa"],
            &["only q1"],
            &["", "B"],
        ])
        .unwrap();
        assert_eq!(
            report.form.fields()[1],
            FieldSpec::Dropdown {
                title: "Q2".to_string(),
                choices: s(&["B"])
            }
        );
    }

    #[test]
    fn case_insensitive_tags() {
        let lower = run(&[&["Q"], &["texto curto"]]).unwrap();
        let mixed = run(&[&["Q"], &["  Texto Curto "]]).unwrap();
        let upper = run(&[&["Q"], &["MÚLTIPLA ESCOLHA"], &["x"]]).unwrap();
        assert_eq!(lower.form.fields(), mixed.form.fields());
        assert_eq!(
            upper.form.fields()[0].question_type(),
            QuestionType::MultipleChoice
        );
    }

    #[test]
    fn accents_are_significant() {
        let report = run(&[&["Q"], &["paragrafo"]]).unwrap();
        assert!(report.form.fields().is_empty());
        assert_eq!(
            report.columns[0].outcome,
            ColumnOutcome::UnknownType("paragrafo".to_string())
        );
    }

    #[test]
    fn all_types() {
        let report = run(&[
            &[
                "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10",
            ],
            &[
                "múltipla escolha",
                "caixa de seleção",
                "lista suspensa",
                "texto curto",
                "parágrafo",
                "escala linear",
                "data",
                "hora",
                "data e hora",
                "duração",
            ],
            &["a", "b", "c", "ignored", "", "", "", "", "", ""],
        ])
        .unwrap();
        let types: Vec<QuestionType> = report
            .form
            .fields()
            .iter()
            .map(|f| f.question_type())
            .collect();
        assert_eq!(
            types,
            vec![
                QuestionType::MultipleChoice,
                QuestionType::Checkbox,
                QuestionType::Dropdown,
                QuestionType::ShortText,
                QuestionType::Paragraph,
                QuestionType::LinearScale,
                QuestionType::Date,
                QuestionType::Time,
                QuestionType::DateTime,
                QuestionType::Duration,
            ]
        );
        assert_eq!(report.form.fields()[3].choices(), None);
    }

    #[test]
    fn order_follows_columns() {
        let report = run(&[
            &["A", "", "B", "C", "D"],
            &["data", "hora", "lista suspensa", "xyz", "hora"],
        ])
        .unwrap();
        let titles: Vec<&str> = report.form.fields().iter().map(|f| f.title()).collect();
        assert_eq!(titles, vec!["A", "D"]);
        let ids: Vec<ColumnOutcome> = report.columns.iter().map(|c| c.outcome.clone()).collect();
        assert_eq!(
            ids,
            vec![
                ColumnOutcome::Added(FieldId(0)),
                ColumnOutcome::EmptyTitle,
                ColumnOutcome::MissingChoices(QuestionType::Dropdown),
                ColumnOutcome::UnknownType("xyz".to_string()),
                ColumnOutcome::Added(FieldId(1)),
            ]
        );
    }

    #[test]
    fn failed_field_does_not_stop() {
        init();
        let mut service = MemoryFormService::new().reject_field("B");
        let table = Table::from_strings(&[&["A", "B", "C"], &["data", "hora", "duração"]]);
        let report = build_at(&mut service, &table, "Sheet1", &created_at()).unwrap();
        let titles: Vec<&str> = report.form.fields().iter().map(|f| f.title()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(matches!(report.columns[1].outcome, ColumnOutcome::Failed(_)));
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.added(), 2);
    }

    #[test]
    fn refused_form() {
        init();
        let mut service = MemoryFormService::new().refuse_forms();
        let table = Table::from_strings(&[&["A"], &["data"]]);
        let res = build(&mut service, &table, "Sheet1");
        assert!(matches!(res, Err(BuildError::CreateForm { .. })));
    }

    #[test]
    fn two_runs_two_forms() {
        init();
        let mut service = MemoryFormService::new();
        let table = Table::from_strings(&[&["A"], &["data"]]);
        let first = build(&mut service, &table, "Sheet1").unwrap();
        let second = build(&mut service, &table, "Sheet1").unwrap();
        assert_eq!(service.created(), 2);
        assert_eq!((first.form.id(), second.form.id()), (1, 2));
        assert_ne!(first.edit_url(), second.edit_url());
        assert_eq!(first.form.fields(), second.form.fields());
    }

    #[test]
    fn numeric_cells() {
        init();
        let table = Table::new(vec![
            vec![Cell::Int(2024)],
            vec![Cell::Text("Lista Suspensa".to_string())],
            vec![Cell::Number(1.5)],
            vec![Cell::Number(3.0)],
            vec![Cell::Bool(false)],
            vec![Cell::Empty],
            vec![Cell::Int(0)],
        ]);
        let mut service = MemoryFormService::new();
        let report = build_at(&mut service, &table, "Sheet1", &created_at()).unwrap();
        assert_eq!(
            report.form.fields(),
            &[FieldSpec::Dropdown {
                title: "2024".to_string(),
                choices: s(&["1.5", "3", "false", "0"])
            }]
        );
    }
}
