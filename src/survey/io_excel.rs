// Reading the survey exports from Excel workbooks.

use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::survey::{
    io_common::{cell_to_text, column_letters, make_default_id, parse_column_ranges},
    *,
};

pub fn read_survey(role: Role, source: &SourceSettings) -> SurveyResult<SurveyTable> {
    info!(
        "Attempting to read {} survey file {:?}",
        role.name(),
        source.path
    );
    let wrange = get_range(&source.path, source.worksheet.as_deref())?;
    table_from_range(
        role,
        &source.path,
        &wrange,
        &source.columns,
        &source.field_names,
    )
}

/// Opens the workbook (any format supported by calamine) and returns the
/// content of the requested worksheet, or of the first one.
fn get_range(path: &str, worksheet_name: Option<&str>) -> SurveyResult<Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}

/// Selects the columns of the template from a worksheet and builds the table.
///
/// The first row is the header. The first selected column is the id of the
/// respondent, the other ones are mapped in order onto `field_names`.
pub fn table_from_range(
    role: Role,
    path: &str,
    wrange: &Range<DataType>,
    columns: &str,
    field_names: &[String],
) -> SurveyResult<SurveyTable> {
    let selected = parse_column_ranges(columns)?;
    let (id_col, value_cols) = selected.split_first().context(ParsingColumnRangeSnafu {
        selection: columns,
        reason: "no column selected",
    })?;
    ensure!(
        value_cols.len() == field_names.len(),
        ColumnCountMismatchSnafu {
            path,
            expected: field_names.len(),
            found: value_cols.len(),
        }
    );

    let (first_row, first_col) = wrange.start().context(EmptyExcelSnafu { path })?;
    let (_, last_col) = wrange.end().context(EmptyExcelSnafu { path })?;
    let first_col = first_col as usize;
    // Columns are selected left to right, the last one is the rightmost.
    let rightmost = *value_cols.last().unwrap_or(id_col);
    ensure!(
        rightmost <= last_col as usize,
        SheetTooNarrowSnafu {
            path,
            column: column_letters(rightmost),
            last: column_letters(last_col as usize),
        }
    );

    let cell_at = |row: &[DataType], col: usize| -> Option<String> {
        col.checked_sub(first_col)
            .and_then(|c| row.get(c))
            .and_then(cell_to_text)
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    debug!("table_from_range: header: {:?}", header);

    let default_id = make_default_id(path);
    let mut rows: Vec<SurveyRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Line numbers as shown in Excel, the header being the first line.
        let lineno = first_row as usize + idx + 2;
        let id = cell_at(row, *id_col).unwrap_or_else(|| default_id(lineno));
        let values: Vec<Option<String>> = value_cols.iter().map(|c| cell_at(row, *c)).collect();
        debug!("table_from_range: line {}: id: {:?} values: {:?}", lineno, id, values);
        rows.push(SurveyRow { id, values });
    }

    SurveyTable::new(role, field_names.to_vec(), rows).context(InvalidSurveySnafu {})
}
