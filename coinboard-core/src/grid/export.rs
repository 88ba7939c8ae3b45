//! CSV export of the selected rows.
//!
//! Output format: one line per record, field values joined by `,`, lines
//! joined by `\n`. No header row and no quoting, so a value containing a comma
//! or a quote is written verbatim.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{Cell, GridError, GridRow};

pub const EXPORT_FILENAME: &str = "Data Stocks.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// An export artifact ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub mime: &'static str,
    pub content: String,
    pub row_count: usize,
}

impl CsvExport {
    /// Write the artifact into `dir` under its fixed filename.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.filename);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Encode `rows` in the order given.
pub(crate) fn encode_rows<'a, R, I>(rows: I) -> Result<CsvExport, GridError>
where
    R: GridRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    let mut row_count = 0;
    for row in rows {
        let fields: Vec<String> = row.cells().iter().map(Cell::render).collect();
        wtr.write_record(&fields)
            .map_err(|e| GridError::Encode(e.to_string()))?;
        row_count += 1;
    }

    if row_count == 0 {
        return Err(GridError::EmptySelection);
    }

    let data = wtr
        .into_inner()
        .map_err(|e| GridError::Encode(e.to_string()))?;
    let mut content = String::from_utf8(data).map_err(|e| GridError::Encode(e.to_string()))?;
    // Rows are joined, not terminated.
    if content.ends_with('\n') {
        content.pop();
    }

    Ok(CsvExport {
        filename: EXPORT_FILENAME,
        mime: EXPORT_MIME,
        content,
        row_count,
    })
}
