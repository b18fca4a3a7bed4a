//! Spreadsheet serialization of a [`Grid`].

use std::collections::HashSet;

use rust_xlsxwriter::Workbook;

use crate::config::{sanitize_sheet_name, unique_sheet_name, COLUMN_WIDTH, MAX_CELL_LEN};
use crate::error::Result;
use crate::grid::Grid;

/// Serialize a grid into workbook bytes.
///
/// Sheet names are sanitized and made unique. Cell text longer than
/// [`MAX_CELL_LEN`] characters is cut with a warning. Every column that
/// receives a cell gets the fixed [`COLUMN_WIDTH`].
pub fn write_xlsx(grid: &Grid) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut taken = HashSet::new();

    for (position, sheet) in grid.sheets.iter().enumerate() {
        let name = unique_sheet_name(sanitize_sheet_name(&sheet.name, position), &mut taken);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;

        for (row_index, row) in sheet.rows.iter().enumerate() {
            // Rows beyond u32 are rejected by the writer's own limit check.
            let row_num = u32::try_from(row_index).unwrap_or(u32::MAX);
            for (column, text) in row {
                let text = cell_text(text, &name, row_num, *column);
                worksheet.write_string(row_num, *column, text)?;
            }
        }

        for column in 0..sheet.column_count() {
            worksheet.set_column_width(column, COLUMN_WIDTH)?;
        }

        tracing::debug!(sheet = %name, rows = sheet.rows.len(), "Wrote worksheet");
    }

    Ok(workbook.save_to_buffer()?)
}

/// Cell text cut to [`MAX_CELL_LEN`] characters.
fn cell_text<'a>(text: &'a str, sheet: &str, row: u32, column: u16) -> &'a str {
    match text.char_indices().nth(MAX_CELL_LEN) {
        Some((end, _)) => {
            tracing::warn!(
                sheet,
                row,
                column,
                length = text.chars().count(),
                "Cell text too long, truncating"
            );
            &text[..end]
        }
        None => text,
    }
}
