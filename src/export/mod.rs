use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::borrow::Cow;

use crate::core::types::HEADERS;
use crate::core::{ExportError, OutputRow};

const MIN_COLUMN_WIDTH: usize = 18;
const MAX_COLUMN_WIDTH: usize = 80;
const COLUMN_PADDING: usize = 2;
/// Excel rejects string cells longer than this.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Writes rows into a single-sheet XLSX workbook.
#[derive(Debug, Clone)]
pub struct DatasetExporter {
    sheet_name: String,
    headers: [String; 7],
}

impl Default for DatasetExporter {
    fn default() -> Self {
        Self::new("Listing Pack")
    }
}

impl DatasetExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            headers: HEADERS.map(str::to_string),
        }
    }

    /// Names the store on the description column header.
    pub fn with_store_name(mut self, store_name: &str) -> Self {
        self.headers[6] = format!("{} ({} Template)", HEADERS[6], store_name);
        self
    }

    pub fn headers(&self) -> &[String; 7] {
        &self.headers
    }

    pub fn export(&self, rows: &[OutputRow]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&self.sheet_name)?;
            write_sheet(worksheet, &self.headers, rows)?;
        }

        let bytes = workbook.save_to_buffer()?;
        debug!("Exported {} rows into {} bytes", rows.len(), bytes.len());
        Ok(bytes)
    }

    /// Same as [`export`](Self::export), base64-encoded for JSON transport.
    pub fn export_base64(&self, rows: &[OutputRow]) -> Result<String, ExportError> {
        Ok(STANDARD.encode(self.export(rows)?))
    }
}

fn cells(row: &OutputRow) -> [String; 7] {
    [
        row.source_url.clone(),
        row.seo_title.clone(),
        row.category.clone(),
        row.category_code.clone(),
        row.price.map(|price| price.to_string()).unwrap_or_default(),
        row.specs_text.clone(),
        row.full_html.clone(),
    ]
}

/// Cuts `value` to at most [`MAX_CELL_CHARS`] characters.
fn fit_cell(value: &str) -> Cow<'_, str> {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => Cow::Owned(value[..cut].to_string()),
        None => Cow::Borrowed(value),
    }
}

fn write_sheet(
    worksheet: &mut Worksheet,
    headers: &[String; 7],
    rows: &[OutputRow],
) -> Result<(), ExportError> {
    let bold = Format::new().set_bold();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &bold)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, value) in cells(row).iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
            match (col, row.price) {
                (4, Some(price)) => {
                    worksheet.write_number(row_num, col as u16, price)?;
                }
                (4, None) => {}
                _ => {
                    let cell = fit_cell(value);
                    if let Cow::Owned(_) = cell {
                        warn!(
                            "Truncated column {} of {} to {} characters",
                            col, row.source_url, MAX_CELL_CHARS
                        );
                    }
                    worksheet.write_string(row_num, col as u16, cell.as_ref())?;
                }
            }
        }
    }

    for (col, width) in widths.into_iter().enumerate() {
        worksheet.set_column_width(col as u16, column_width(width) as f64)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    Ok(())
}

fn column_width(content_chars: usize) -> usize {
    (content_chars + COLUMN_PADDING).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(url: &str, price: Option<f64>) -> OutputRow {
        OutputRow {
            source_url: url.to_string(),
            seo_title: "Blue Widget".to_string(),
            category: "Widgets".to_string(),
            category_code: "1234".to_string(),
            price,
            specs_text: "Steel".to_string(),
            full_html: "<div>Blue Widget</div>".to_string(),
        }
    }

    #[test]
    fn test_export_is_xlsx_zip() {
        let exporter = DatasetExporter::default();
        let bytes = exporter
            .export(&[row("https://example.com/a", Some(11.5)), row("https://example.com/b", None)])
            .unwrap();

        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_base64_round_trips() {
        let exporter = DatasetExporter::new("Pack");
        let encoded = exporter.export_base64(&[row("https://example.com/a", None)]).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(&decoded[..2], b"PK");
    }

    #[test]
    fn test_export_empty_rows_still_has_header() {
        let bytes = DatasetExporter::default().export(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_invalid_sheet_name_is_error() {
        let exporter = DatasetExporter::new("bad/name[]");
        assert!(matches!(exporter.export(&[]), Err(ExportError::Xlsx(_))));
    }

    #[test]
    fn test_column_width_bounds() {
        assert_eq!(column_width(0), MIN_COLUMN_WIDTH);
        assert_eq!(column_width(30), 32);
        assert_eq!(column_width(5000), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_oversized_cells_are_truncated() {
        let mut oversized = row("https://example.com/a", None);
        oversized.specs_text = format!("FAILED: {}", "x".repeat(40_000));
        oversized.full_html = "é".repeat(MAX_CELL_CHARS + 1);

        let bytes = DatasetExporter::default()
            .export(&[oversized, row("https://example.com/b", Some(3.0))])
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");

        assert_eq!(fit_cell(&"é".repeat(MAX_CELL_CHARS + 5)).chars().count(), MAX_CELL_CHARS);
        assert!(matches!(fit_cell("short"), Cow::Borrowed("short")));
    }

    #[test]
    fn test_store_name_in_description_header() {
        let exporter = DatasetExporter::default().with_store_name("Shed Finds");
        assert_eq!(exporter.headers()[2], "eBay Category");
        assert_eq!(exporter.headers()[6], "Full HTML Description (Shed Finds Template)");
        assert_eq!(DatasetExporter::default().headers()[6], "Full HTML Description");
    }

    #[test]
    fn test_cells_blank_price() {
        let cells = cells(&row("https://example.com/a", None));
        assert_eq!(cells[4], "");
        assert_eq!(cells[0], "https://example.com/a");
    }
}
