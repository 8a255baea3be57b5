//! HTML table extraction.
//!
//! Reads the first `<table>` of a document into rows of `<td>` texts.

use scraper::{ElementRef, Html, Selector};

use super::TableExtractor;
use crate::error::{AppError, Result};
use crate::models::ResultRow;

/// Extracts table rows with `scraper`.
pub struct HtmlTableExtractor {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl HtmlTableExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse_selector("table")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
        })
    }

    fn read_row(&self, row: ElementRef<'_>) -> ResultRow {
        ResultRow::new(
            row.select(&self.cell)
                .map(|cell| cell.text().collect::<String>().trim().to_string()),
        )
    }
}

impl TableExtractor for HtmlTableExtractor {
    fn first_table(&self, html: &str) -> Result<Option<Vec<ResultRow>>> {
        let document = Html::parse_document(html);
        let Some(table) = document.select(&self.table).next() else {
            return Ok(None);
        };
        let rows = table.select(&self.row).map(|row| self.read_row(row)).collect();
        Ok(Some(rows))
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <h1>Results</h1>
          <table id="results">
            <tr><th>#</th><th>Program Code</th><th>Program</th><th>Result Date</th></tr>
            <tr><td>1</td><td> ABC123 </td><td>B.Sc. Physics</td><td>16/10/2026</td></tr>
            <tr><td>2</td><td><a href="/r/xyz">XYZ999</a></td><td>B.A.</td><td>
                01/01/2030
            </td></tr>
          </table>
          <table><tr><td>second</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn test_first_table_rows_in_document_order() {
        let extractor = HtmlTableExtractor::new().unwrap();
        let rows = extractor.first_table(RESULTS_PAGE).unwrap().unwrap();

        assert_eq!(rows.len(), 3);
        // Header cells are <th>, so the header row has no data cells.
        assert!(rows[0].cells.is_empty());
        assert_eq!(rows[1].cells, vec!["1", "ABC123", "B.Sc. Physics", "16/10/2026"]);
        assert_eq!(rows[2].code(), Some("XYZ999"));
        assert_eq!(rows[2].date(), Some("01/01/2030"));
    }

    #[test]
    fn test_no_table_is_none() {
        let extractor = HtmlTableExtractor::new().unwrap();
        let rows = extractor
            .first_table("<html><body><p>Nothing yet</p></body></html>")
            .unwrap();
        assert!(rows.is_none());
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let extractor = HtmlTableExtractor::new().unwrap();
        let rows = extractor.first_table("<table></table>").unwrap().unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }
}
