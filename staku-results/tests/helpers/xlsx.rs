//! Minimal xlsx writer for fixtures
//!
//! Produces just enough OOXML for a spreadsheet reader: workbook, workbook
//! relationships and one worksheet per sheet, text as inline strings.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One cell of a fixture row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

pub type Row = Vec<Cell>;

/// Row of text cells; "" leaves the cell out entirely
pub fn text_row(cells: &[&str]) -> Row {
    cells
        .iter()
        .map(|c| if c.is_empty() { Cell::Empty } else { Cell::from(*c) })
        .collect()
}

/// Workbook with a single sheet named "Resultados"
pub fn single_sheet(rows: &[Row]) -> Vec<u8> {
    workbook(&[("Resultados", rows)])
}

/// Workbook without any sheet
pub fn no_sheets() -> Vec<u8> {
    workbook(&[])
}

/// Workbook listing a "Resultados" sheet whose worksheet part is absent
pub fn missing_sheet_part() -> Vec<u8> {
    let no_rows: &[Row] = &[];
    write_workbook(&[("Resultados", no_rows)], false)
}

/// Workbook with the given sheets in order
pub fn workbook(sheets: &[(&str, &[Row])]) -> Vec<u8> {
    write_workbook(sheets, true)
}

fn write_workbook(sheets: &[(&str, &[Row])], with_sheet_parts: bool) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut put = |name: &str, content: String| {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    };

    put("[Content_Types].xml", content_types(sheets.len()));
    put("_rels/.rels", ROOT_RELS.to_string());
    put("xl/workbook.xml", workbook_xml(sheets));
    put("xl/_rels/workbook.xml.rels", workbook_rels(sheets.len()));
    for (index, (_, rows)) in sheets.iter().enumerate().filter(|_| with_sheet_parts) {
        put(&format!("xl/worksheets/sheet{}.xml", index + 1), sheet_xml(rows));
    }

    zip.finish().unwrap().into_inner()
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

fn content_types(sheet_count: usize) -> String {
    let overrides: String = (1..=sheet_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                n
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
        overrides
    )
}

fn workbook_xml(sheets: &[(&str, &[Row])]) -> String {
    let entries: String = sheets
        .iter()
        .enumerate()
        .map(|(index, (name, _))| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                index + 1,
                index + 1
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
        entries
    )
}

fn workbook_rels(sheet_count: usize) -> String {
    let entries: String = (1..=sheet_count)
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                n, n
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        entries
    )
}

fn sheet_xml(rows: &[Row]) -> String {
    let mut data = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        let row_number = row_index + 1;
        let cells: String = row
            .iter()
            .enumerate()
            .map(|(col_index, cell)| {
                let reference = format!("{}{}", column_name(col_index), row_number);
                match cell {
                    Cell::Text(text) => format!(
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference,
                        escape(text)
                    ),
                    Cell::Number(value) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value),
                    Cell::Empty => String::new(),
                }
            })
            .collect();
        if !cells.is_empty() {
            data.push_str(&format!(r#"<row r="{}">{}</row>"#, row_number, cells));
        }
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        data
    )
}

/// 0 -> "A", 25 -> "Z", 26 -> "AA"
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
