//! Service layer for the watcher.
//!
//! The monitor cycle talks to the outside world through three traits:
//! - Page retrieval (`PageFetcher`, implemented by `HttpFetcher`)
//! - Table extraction (`TableExtractor`, implemented by `HtmlTableExtractor`)
//! - Notification delivery (`Notifier`, implemented by `SmtpNotifier`)

mod fetcher;
mod mailer;
mod table;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ResultRow;

pub use fetcher::HttpFetcher;
pub use mailer::SmtpNotifier;
pub use table::HtmlTableExtractor;

/// A retrieved page: status code and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves a page over HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`. Transport failures and timeouts are errors; any status code
    /// the server answers with is returned in the `Page`.
    async fn fetch(&self, url: &str) -> Result<Page>;
}

/// Turns an HTML document into table rows.
pub trait TableExtractor: Send + Sync {
    /// Rows of the first table in document order, header included.
    /// `None` when the document has no table.
    fn first_table(&self, html: &str) -> Result<Option<Vec<ResultRow>>>;
}

/// Delivers a notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}
