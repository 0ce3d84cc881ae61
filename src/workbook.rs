use crate::error::DeskError;
use calamine::{Data, Range, Reader, Sheets, XlsxError, open_workbook_auto};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// One worksheet rendered as text: a header row plus data rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn sheet_names(path: &Path) -> Result<Vec<String>, DeskError> {
    let workbook = open(path)?;
    Ok(workbook.sheet_names())
}

/// Parse `sheet` using its first row as column names.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<SheetTable, DeskError> {
    let mut workbook = open(path)?;
    if !workbook.sheet_names().iter().any(|s| s == sheet) {
        return Err(DeskError::SheetNotFound(sheet.to_string()));
    }
    let range = workbook.worksheet_range(sheet)?;
    let table = range_to_table(&range);
    debug!(
        path = %path.display(),
        sheet,
        columns = table.columns.len(),
        rows = table.rows.len(),
        "sheet parsed"
    );
    Ok(table)
}

/// Filesystem failures stay I/O errors so a vanished file reads as missing
/// rather than as a malformed workbook.
fn open(path: &Path) -> Result<Sheets<BufReader<File>>, DeskError> {
    open_workbook_auto(path).map_err(|e| match e {
        calamine::Error::Io(io) | calamine::Error::Xlsx(XlsxError::Io(io)) => DeskError::Io(io),
        other => {
            warn!(path = %path.display(), error = %other, "unreadable workbook");
            DeskError::Workbook(other)
        }
    })
}

fn range_to_table(range: &Range<Data>) -> SheetTable {
    let mut rows = range.rows();
    let columns = rows
        .next()
        .map(|header| {
            header
                .iter()
                .enumerate()
                .map(|(idx, cell)| match cell_text(cell) {
                    name if name.is_empty() => format!("Unnamed: {idx}"),
                    name => name,
                })
                .collect()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    SheetTable { columns, rows }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
