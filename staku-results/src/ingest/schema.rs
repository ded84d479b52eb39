//! Row schema: spreadsheet record → participant row
//!
//! Race organizers export results with Spanish column headers. Headers are
//! matched exactly (case-sensitive); columns not listed here are ignored.
//!
//! | Header                | Field               | Coercion              |
//! |-----------------------|---------------------|-----------------------|
//! | `Bib`                 | `bib`               | text                  |
//! | `Competidor`          | `name`              | text                  |
//! | `Posición`            | `position`          | integer, 0 on failure |
//! | `Posición Rama`       | `branch_position`   | integer, 0 on failure |
//! | `Posición Categoría`  | `category_position` | integer, 0 on failure |
//! | `Laps`                | `laps`              | integer, 0 on failure |
//! | `Distancia acumulada` | `distance`          | kept as displayed     |
//! | `Modalidad`           | `mode`              | text                  |
//! | `Categoria`           | `category`          | text                  |
//! | `Rama`                | `branch`            | text                  |
//! | `Club`                | `club`              | text                  |

use calamine::Data;
use staku_common::db::NewRunner;
use std::collections::HashMap;

/// One data row of the sheet keyed by its header text
pub type RawRecord = HashMap<String, Data>;

/// Source column headers
pub mod headers {
    pub const BIB: &str = "Bib";
    pub const NAME: &str = "Competidor";
    pub const POSITION: &str = "Posición";
    pub const BRANCH_POSITION: &str = "Posición Rama";
    pub const CATEGORY_POSITION: &str = "Posición Categoría";
    pub const LAPS: &str = "Laps";
    pub const DISTANCE: &str = "Distancia acumulada";
    pub const MODE: &str = "Modalidad";
    pub const CATEGORY: &str = "Categoria";
    pub const BRANCH: &str = "Rama";
    pub const CLUB: &str = "Club";

    /// Every header the schema understands
    pub const ALL: [&str; 11] = [
        BIB,
        NAME,
        POSITION,
        BRANCH_POSITION,
        CATEGORY_POSITION,
        LAPS,
        DISTANCE,
        MODE,
        CATEGORY,
        BRANCH,
        CLUB,
    ];
}

/// Map a header-keyed record onto a participant row
///
/// Never fails: absent or malformed cells degrade to `""` / `0`.
pub fn map_record(record: &RawRecord) -> NewRunner {
    NewRunner {
        bib: text_field(record, headers::BIB),
        name: text_field(record, headers::NAME),
        position: integer_field(record, headers::POSITION),
        branch_position: integer_field(record, headers::BRANCH_POSITION),
        category_position: integer_field(record, headers::CATEGORY_POSITION),
        laps: integer_field(record, headers::LAPS),
        distance: text_field(record, headers::DISTANCE),
        mode: text_field(record, headers::MODE),
        category: text_field(record, headers::CATEGORY),
        branch: text_field(record, headers::BRANCH),
        club: text_field(record, headers::CLUB),
    }
}

fn text_field(record: &RawRecord, header: &str) -> String {
    record.get(header).map(cell_text).unwrap_or_default()
}

fn integer_field(record: &RawRecord, header: &str) -> i64 {
    record.get(header).map(cell_integer).unwrap_or(0)
}

/// Display text of a cell; empty and error cells yield `""`
///
/// Whole floats lose their fraction (`10.0` → `"10"`), matching how the
/// number is shown in the spreadsheet.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

/// Non-negative integer value of a cell, 0 when it holds no usable number
///
/// Booleans and date cells count as non-numeric.
pub fn cell_integer(cell: &Data) -> i64 {
    let value = match cell {
        Data::Int(i) => *i,
        Data::Float(f) => truncate(*f),
        Data::String(s) => parse_integer(s),
        _ => 0,
    };
    value.max(0)
}

/// Parse text such as `" 12 "` or `"7.0"` into an integer, 0 on failure
pub fn parse_integer(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    trimmed.parse::<f64>().map(truncate).unwrap_or(0)
}

fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}
