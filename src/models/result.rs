//! Per-poll data: scraped rows, matches and the outcome of a cycle.

use std::fmt;

/// Column holding the program code.
pub const CODE_COLUMN: usize = 1;
/// Column holding the result date.
pub const DATE_COLUMN: usize = 3;
/// Rows shorter than this are not data rows.
pub const MIN_CELLS: usize = 3;

/// Body template for the notification.
const BODY_TEMPLATE: &str =
    "The following update was detected:\n\nProgram Code: {code}\nResult Date: {date}";

/// One scraped table row, cell texts in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub cells: Vec<String>,
}

impl ResultRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the row has enough cells to be considered at all.
    pub fn is_data_row(&self) -> bool {
        self.cells.len() >= MIN_CELLS
    }

    /// Program code cell, trimmed.
    pub fn code(&self) -> Option<&str> {
        self.cell(CODE_COLUMN)
    }

    /// Result date cell, trimmed.
    pub fn date(&self) -> Option<&str> {
        self.cell(DATE_COLUMN)
    }

    fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.trim())
    }

    /// Match this row against a code and a formatted date.
    ///
    /// Rows that are too short, or that lack a date cell, never match.
    pub fn matches(&self, code: &str, date: &str) -> Option<MatchEvent> {
        if !self.is_data_row() {
            return None;
        }
        // A 3-cell row has no date column: skip it rather than failing the poll.
        let (row_code, row_date) = (self.code()?, self.date()?);
        (row_code == code && row_date == date).then(|| MatchEvent {
            code: row_code.to_string(),
            date: row_date.to_string(),
        })
    }
}

/// A row that carries the watched code and today's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub code: String,
    pub date: String,
}

impl MatchEvent {
    /// Plain-text notification body.
    pub fn body(&self) -> String {
        BODY_TEMPLATE
            .replace("{code}", &self.code)
            .replace("{date}", &self.date)
    }
}

/// Result of a single poll. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The awaited row is on the page. `notified` is false if sending failed.
    MatchFound { event: MatchEvent, notified: bool },
    NoMatch,
    FetchError(String),
    ParseError(String),
}

impl PollOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::MatchFound { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchError(_) | Self::ParseError(_))
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchFound { event, notified } => write!(
                f,
                "Update detected: {} on {} (notification {})",
                event.code,
                event.date,
                if *notified { "sent" } else { "failed" }
            ),
            Self::NoMatch => write!(f, "No new changes detected"),
            Self::FetchError(detail) => write!(f, "Error with the request: {detail}"),
            Self::ParseError(detail) => write!(f, "Error reading the page: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_rows_never_match() {
        let row = ResultRow::new(["_", "ABC123"]);
        assert!(!row.is_data_row());
        assert_eq!(row.matches("ABC123", "16/10/2026"), None);
    }

    #[test]
    fn test_three_cell_row_has_no_date() {
        let row = ResultRow::new(["_", "ABC123", "16/10/2026"]);
        assert!(row.is_data_row());
        assert_eq!(row.date(), None);
        assert_eq!(row.matches("ABC123", "16/10/2026"), None);
    }

    #[test]
    fn test_match_trims_cells() {
        let row = ResultRow::new(["1", "  ABC123\n", "B.Sc.", " 16/10/2026 "]);
        let event = row.matches("ABC123", "16/10/2026").unwrap();
        assert_eq!(event.code, "ABC123");
        assert_eq!(event.date, "16/10/2026");
    }

    #[test]
    fn test_code_match_is_exact() {
        let row = ResultRow::new(["_", "abc123", "_", "16/10/2026"]);
        assert_eq!(row.matches("ABC123", "16/10/2026"), None);
        let row = ResultRow::new(["_", "ABC1234", "_", "16/10/2026"]);
        assert_eq!(row.matches("ABC123", "16/10/2026"), None);
    }

    #[test]
    fn test_body_template() {
        let event = MatchEvent {
            code: "ABC123".to_string(),
            date: "16/10/2026".to_string(),
        };
        assert_eq!(
            event.body(),
            "The following update was detected:\n\nProgram Code: ABC123\nResult Date: 16/10/2026"
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(PollOutcome::NoMatch.to_string(), "No new changes detected");
        let outcome = PollOutcome::FetchError("timed out".to_string());
        assert!(outcome.is_error());
        assert_eq!(outcome.to_string(), "Error with the request: timed out");
    }
}
