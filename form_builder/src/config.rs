// ********* Input data structures ***********

use chrono::{NaiveDateTime, Timelike};
use std::fmt::Display;

/// The content of one cell of the spreadsheet.
///
/// Readers convert whatever their file format provides into one of these values.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// A cell is empty if it has no value or if it holds an empty string.
    /// Cells made of spaces are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Titles and types are blank when empty, and also when they hold zero or false.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Int(0) | Cell::Bool(false) => true,
            Cell::Number(x) => *x == 0.0 || x.is_nan(),
            c => c.is_empty(),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Number(x) => write!(f, "{}", x),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::DateTime(dt) if dt.num_seconds_from_midnight() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// The content of a sheet, row by row.
///
/// The first row holds the titles of the questions, the second row their types
/// and all the following rows the choices offered for each question.
/// Rows do not need to have the same length.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Table {
        Table { rows }
    }

    /// Builds a table out of plain strings. Empty strings become empty cells.
    ///
    /// ```
    /// use form_builder::Table;
    ///
    /// let table = Table::from_strings(&[&["Name", "Color"], &["texto curto", "múltipla escolha"]]);
    /// assert_eq!(table.row_count(), 2);
    /// ```
    pub fn from_strings(rows: &[&[&str]]) -> Table {
        Table {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| Cell::from(*s)).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns is given by the header row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    fn trimmed_text(&self, row: usize, col: usize) -> String {
        self.cell(row, col)
            .filter(|c| !c.is_blank())
            .map(|c| c.to_string().trim().to_string())
            .unwrap_or_default()
    }

    /// Reads the title, the type and the choices of a column.
    pub fn column(&self, col: usize) -> Column {
        let title = self.trimmed_text(0, col);
        let raw_type = self.trimmed_text(1, col);
        let normalized_type = raw_type.to_lowercase();
        let choices: Vec<String> = (2..self.row_count())
            .filter_map(|row| self.cell(row, col))
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .collect();
        Column {
            index: col,
            title,
            raw_type,
            normalized_type,
            choices,
        }
    }
}

/// One column of the table, as read before any interpretation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Column {
    /// Position of the column, starting at 0.
    pub index: usize,
    pub title: String,
    /// The type as written in the sheet (trimmed).
    pub raw_type: String,
    /// The type in lower case, used for matching.
    pub normalized_type: String,
    /// The non-empty values below the type row, in row order.
    pub choices: Vec<String>,
}

// ******** Question types *********

pub const SCALE_LOWER_BOUND: u32 = 1;
pub const SCALE_UPPER_BOUND: u32 = 5;

/// All the kinds of questions that can be declared in the second row of a sheet.
///
/// Grids and checkbox grids are not supported.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionType {
    MultipleChoice,
    Checkbox,
    Dropdown,
    ShortText,
    Paragraph,
    LinearScale,
    Date,
    Time,
    DateTime,
    Duration,
}

// The tags are matched after conversion to lower case.
const TAGS: [(&str, QuestionType); 10] = [
    ("múltipla escolha", QuestionType::MultipleChoice),
    ("caixa de seleção", QuestionType::Checkbox),
    ("lista suspensa", QuestionType::Dropdown),
    ("texto curto", QuestionType::ShortText),
    ("parágrafo", QuestionType::Paragraph),
    ("escala linear", QuestionType::LinearScale),
    ("data", QuestionType::Date),
    ("hora", QuestionType::Time),
    ("data e hora", QuestionType::DateTime),
    ("duração", QuestionType::Duration),
];

impl QuestionType {
    /// Finds the question type for a tag. The comparison ignores case and
    /// surrounding spaces but not accents.
    ///
    /// ```
    /// use form_builder::QuestionType;
    ///
    /// assert_eq!(QuestionType::from_tag("Texto Curto"), Some(QuestionType::ShortText));
    /// assert_eq!(QuestionType::from_tag("duracao"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<QuestionType> {
        let normalized = tag.trim().to_lowercase();
        TAGS.iter()
            .find(|(t, _)| *t == normalized)
            .map(|(_, qt)| *qt)
    }

    /// The canonical (lower case) tag.
    pub fn tag(self) -> &'static str {
        TAGS.iter()
            .find(|(_, qt)| *qt == self)
            .map(|(t, _)| *t)
            .unwrap_or_default()
    }

    /// Choice-bearing questions are not created without at least one choice.
    pub fn requires_choices(self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::Checkbox | QuestionType::Dropdown
        )
    }

    /// Builds the field for a question of this type.
    ///
    /// Returns None for a choice-bearing question without choices.
    pub fn field_spec(self, title: &str, choices: &[String]) -> Option<FieldSpec> {
        let title = title.to_string();
        if self.requires_choices() && choices.is_empty() {
            return None;
        }
        let choices = choices.to_vec();
        let spec = match self {
            QuestionType::MultipleChoice => FieldSpec::MultipleChoice { title, choices },
            QuestionType::Checkbox => FieldSpec::Checkbox { title, choices },
            QuestionType::Dropdown => FieldSpec::Dropdown { title, choices },
            QuestionType::ShortText => FieldSpec::ShortText { title },
            QuestionType::Paragraph => FieldSpec::Paragraph { title },
            QuestionType::LinearScale => FieldSpec::LinearScale {
                title,
                lower: SCALE_LOWER_BOUND,
                upper: SCALE_UPPER_BOUND,
            },
            QuestionType::Date => FieldSpec::Date { title },
            QuestionType::Time => FieldSpec::Time { title },
            QuestionType::DateTime => FieldSpec::DateTime { title },
            QuestionType::Duration => FieldSpec::Duration { title },
        };
        Some(spec)
    }
}

impl Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ******** Output data structures *********

/// A field to add to a form.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum FieldSpec {
    /// Radio buttons: exactly one choice.
    MultipleChoice { title: String, choices: Vec<String> },
    /// Check boxes: any number of choices.
    Checkbox { title: String, choices: Vec<String> },
    /// A drop-down list with one choice.
    Dropdown { title: String, choices: Vec<String> },
    ShortText { title: String },
    Paragraph { title: String },
    LinearScale { title: String, lower: u32, upper: u32 },
    Date { title: String },
    Time { title: String },
    DateTime { title: String },
    Duration { title: String },
}

impl FieldSpec {
    pub fn title(&self) -> &str {
        match self {
            FieldSpec::MultipleChoice { title, .. }
            | FieldSpec::Checkbox { title, .. }
            | FieldSpec::Dropdown { title, .. }
            | FieldSpec::ShortText { title }
            | FieldSpec::Paragraph { title }
            | FieldSpec::LinearScale { title, .. }
            | FieldSpec::Date { title }
            | FieldSpec::Time { title }
            | FieldSpec::DateTime { title }
            | FieldSpec::Duration { title } => title,
        }
    }

    pub fn choices(&self) -> Option<&[String]> {
        match self {
            FieldSpec::MultipleChoice { choices, .. }
            | FieldSpec::Checkbox { choices, .. }
            | FieldSpec::Dropdown { choices, .. } => Some(choices),
            _ => None,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            FieldSpec::MultipleChoice { .. } => QuestionType::MultipleChoice,
            FieldSpec::Checkbox { .. } => QuestionType::Checkbox,
            FieldSpec::Dropdown { .. } => QuestionType::Dropdown,
            FieldSpec::ShortText { .. } => QuestionType::ShortText,
            FieldSpec::Paragraph { .. } => QuestionType::Paragraph,
            FieldSpec::LinearScale { .. } => QuestionType::LinearScale,
            FieldSpec::Date { .. } => QuestionType::Date,
            FieldSpec::Time { .. } => QuestionType::Time,
            FieldSpec::DateTime { .. } => QuestionType::DateTime,
            FieldSpec::Duration { .. } => QuestionType::Duration,
        }
    }
}

/// Position of a field in the form, starting at 0.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct FieldId(pub usize);
