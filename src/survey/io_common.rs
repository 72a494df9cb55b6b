use std::path::Path;

use calamine::DataType;

use crate::survey::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// The id of a respondent whose id cell is empty: file name and line number.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Converts an Excel column name to a 0-based index: `A` is 0, `Z` is 25, `AA` is 26.
pub fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut idx: usize = 0;
    for c in letters.to_ascii_uppercase().chars() {
        idx = idx.checked_mul(26)?.checked_add((c as usize) - ('A' as usize) + 1)?;
    }
    Some(idx - 1)
}

pub fn column_letters(idx: usize) -> String {
    let mut letters: Vec<char> = Vec::new();
    let mut n = idx + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parses a column selection such as `A:B,H:P` into column indexes.
///
/// The ranges are inclusive and must be given from left to right without
/// overlapping.
pub fn parse_column_ranges(selection: &str) -> SurveyResult<Vec<usize>> {
    let mut res: Vec<usize> = Vec::new();
    for part in selection.split(',') {
        let (start_s, end_s) = match part.split_once(':') {
            Some((s, e)) => (s, e),
            None => (part, part),
        };
        let start = column_index(start_s).context(ParsingColumnRangeSnafu {
            selection,
            reason: format!("{:?} is not a column name", start_s.trim()),
        })?;
        let end = column_index(end_s).context(ParsingColumnRangeSnafu {
            selection,
            reason: format!("{:?} is not a column name", end_s.trim()),
        })?;
        ensure!(
            start <= end,
            ParsingColumnRangeSnafu {
                selection,
                reason: format!("{} ends before it starts", part.trim()),
            }
        );
        if let Some(last) = res.last() {
            ensure!(
                start > *last,
                ParsingColumnRangeSnafu {
                    selection,
                    reason: format!("{} overlaps or precedes column {}", part.trim(), column_letters(*last)),
                }
            );
        }
        res.extend(start..=end);
    }
    Ok(res)
}

/// The content of a cell as text, `None` for an empty cell.
///
/// Whole numbers are written without decimals. Dates are kept as their Excel
/// serial number.
pub fn cell_to_text(cell: &DataType) -> Option<String> {
    #[allow(unreachable_patterns)]
    match cell {
        DataType::Empty => None,
        DataType::String(s) if s.trim().is_empty() => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) | DataType::DateTime(f) => Some(format_number(*f)),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Error(e) => {
            warn!("cell_to_text: ignoring cell in error: {:?}", e);
            None
        }
        other => Some(format!("{:?}", other)),
    }
}

fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
