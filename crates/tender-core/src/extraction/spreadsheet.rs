use std::io::Cursor;

use calamine::{Data, Range, Reader};

use crate::error::TenderError;

/// Separator placed between the cells of one spreadsheet row.
const CELL_SEPARATOR: &str = " \t ";

/// Read every sheet of an .xlsx/.xls workbook as text, one line per non-empty row.
pub fn read_spreadsheet_text(bytes: &[u8]) -> Result<String, TenderError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        TenderError::Document {
            kind: "spreadsheet",
            reason: e.to_string(),
        }
    })?;

    let mut lines = Vec::new();
    for (name, range) in workbook.worksheets() {
        tracing::debug!(sheet = %name, rows = range.height(), "reading worksheet");
        lines.extend(range_lines(&range));
    }
    Ok(lines.join("\n"))
}

/// Render the non-empty rows of a sheet, skipping empty cells.
fn range_lines(range: &Range<Data>) -> Vec<String> {
    range
        .rows()
        .filter_map(|row| {
            let cells: Vec<String> = row.iter().filter_map(cell_as_string).collect();
            if cells.is_empty() {
                None
            } else {
                Some(cells.join(CELL_SEPARATOR))
            }
        })
        .collect()
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        _ => Some(format!("{cell}")),
    }
}
