/*!

This is the long-form manual for `form_builder` and `sheetform`.

## Layout of the sheet

The sheet describes one question per column:

| Name        | Color            | Satisfaction  | Comments  |
|-------------|------------------|---------------|-----------|
| texto curto | múltipla escolha | escala linear | parágrafo |
|             | Red              |               |           |
|             | Blue             |               |           |

* the first row holds the titles of the questions. A column without a title is ignored.
* the second row holds the type of each question (see below). A column without
  a type is ignored.
* all the following rows hold the choices of the multiple choice, checkbox and
  dropdown questions. Empty cells are ignored, everything else is kept as written,
  in order, including duplicates. The choices of the other questions are ignored.

The sheet must have at least the first two rows, otherwise no form is created.

The example above gives a form with four fields: a short text question `Name`,
a multiple choice question `Color` offering `Red` and `Blue`, a linear scale from
1 to 5 named `Satisfaction` and a paragraph question `Comments`.

## Question types

The types are compared without regard to case: `Texto Curto` and `texto curto`
are the same type. Accents matter: `paragrafo` is not a known type.

| Type               | Field                      | Choices needed |
|--------------------|----------------------------|----------------|
| `múltipla escolha` | radio buttons (one choice) | yes            |
| `caixa de seleção` | checkboxes                 | yes            |
| `lista suspensa`   | dropdown list              | yes            |
| `texto curto`      | short text                 | no             |
| `parágrafo`        | long text                  | no             |
| `escala linear`    | linear scale from 1 to 5   | no             |
| `data`             | date                       | no             |
| `hora`             | time                       | no             |
| `data e hora`      | date and time              | no             |
| `duração`          | duration                   | no             |

A question of an unknown type, or a question that needs choices but has none, is
skipped with a warning. The other columns are still processed.

Grids and checkbox grids are not supported.

## The created form

Each run creates a new form, titled `Formulário criado de: <sheet> (<date and time>)`.
Running the program twice on the same sheet creates two forms.

`sheetform` writes the form as a JSON document:

```json
{
  "title": "Formulário criado de: Sheet1 (09/03/2024 14:05:07)",
  "description": "Este formulário foi gerado automaticamente da Planilha Google 'Sheet1'.",
  "items": [
    { "type": "TEXT", "title": "Name" },
    { "type": "MULTIPLE_CHOICE", "title": "Color", "choices": ["Red", "Blue"] },
    { "type": "SCALE", "title": "Satisfaction", "lowerBound": 1, "upperBound": 5 },
    { "type": "PARAGRAPH_TEXT", "title": "Comments" }
  ]
}
```

## Input formats

* `csv` Comma Separated Values. The name of the sheet is the name of the file
  without its extension.
* `excel` Excel (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`) and OpenDocument (`.ods`)
  spreadsheets. The first worksheet is used, unless `--excel-worksheet-name` is given.

The format is guessed from the extension of the file when `--input-type` is not given.

## Configuration file

All the options can also be put in a JSON file passed with `--config`. Options
passed on the command line take precedence.

```json
{
  "inputFile": "questions.xlsx",
  "inputType": "excel",
  "worksheetName": "Survey",
  "sheetName": "Survey 2024",
  "outputFile": "survey_form.json"
}
```

Relative paths are relative to the directory of the configuration file.

*/
