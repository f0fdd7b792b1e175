mod details;
pub mod dom;
mod email;
mod listing;
mod paragraph;

pub use details::{
    normalize_city, DetailField, DetailRecord, DetailScraper, PARAGRAPH_LAYOUT,
    REQUIRED_PARAGRAPHS,
};
pub use dom::Document;
pub use email::decode_email;
pub use listing::{HoursPerWeek, ListingRecord, ListingScraper, WorkStudyStatus};
pub use paragraph::extract_text;

use crate::config::ParsingConfig;

/// Switches for the two places where observed portal output disagrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub normalize_city: bool,
    pub decode_emails: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_city: true,
            decode_emails: true,
        }
    }
}

impl From<ParsingConfig> for ParseOptions {
    fn from(config: ParsingConfig) -> Self {
        Self {
            normalize_city: config.normalize_city,
            decode_emails: config.decode_emails,
        }
    }
}

pub struct Scraper {
    document: Document,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Document::parse(html),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn listing(&self) -> ListingScraper {
        ListingScraper::new(&self.document)
    }

    pub fn details(&self, options: ParseOptions) -> DetailScraper {
        DetailScraper::new(&self.document, options)
    }
}

/// Reads a number the way the portal's own pages do: leading whitespace and
/// a `+` are skipped, then digits up to the first non-digit.
pub(crate) fn parse_int_prefix(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
