use super::dom::{Document, Element};
use super::paragraph::extract_text;
use super::{parse_int_prefix, ParseOptions};
use crate::error::ScraperError;
use crate::log_debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Description,
    PayRate,
    BusRoute,
    HowToApply,
    Website,
    Contact,
    ContactEmail,
    ContactPhone,
    StreetAddress,
    City,
    State,
    DepartmentInfo,
}

/// Where each field sits among the `<p>` elements of a detail page. The
/// portal has no other addressing, so this table is the whole contract.
pub const PARAGRAPH_LAYOUT: [(DetailField, usize); 12] = [
    (DetailField::Description, 1),
    (DetailField::PayRate, 2),
    (DetailField::BusRoute, 5),
    (DetailField::HowToApply, 8),
    (DetailField::Website, 9),
    (DetailField::Contact, 10),
    (DetailField::ContactEmail, 11),
    (DetailField::ContactPhone, 12),
    (DetailField::StreetAddress, 13),
    (DetailField::City, 14),
    (DetailField::State, 15),
    (DetailField::DepartmentInfo, 17),
];

/// Fewer paragraphs than this means the layout is not the one above.
pub const REQUIRED_PARAGRAPHS: usize = 18;

/// Text the portal prints in place of a missing optional value.
const SENTINELS: [(DetailField, &str); 5] = [
    (DetailField::Website, "No web site provided"),
    (DetailField::ContactPhone, "No phone number provided"),
    (DetailField::StreetAddress, "No address provided"),
    (DetailField::City, "No city provided"),
    (DetailField::DepartmentInfo, "---"),
];

impl DetailField {
    pub fn paragraph_index(self) -> usize {
        PARAGRAPH_LAYOUT
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, index)| *index)
            .unwrap_or(usize::MAX)
    }

    fn sentinel(self) -> Option<&'static str> {
        SENTINELS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, text)| *text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub description: String,
    pub hourly_pay_rate: u32,
    pub on_bus_route: bool,
    pub how_to_apply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub contact: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_info: Option<String>,
}

pub struct DetailScraper<'a> {
    paragraphs: Vec<&'a Element>,
    options: ParseOptions,
}

impl<'a> DetailScraper<'a> {
    pub(crate) fn new(document: &'a Document, options: ParseOptions) -> Self {
        Self {
            paragraphs: document.find_all("p"),
            options,
        }
    }

    pub fn parse_details(&self) -> Result<DetailRecord, ScraperError> {
        if self.paragraphs.len() < REQUIRED_PARAGRAPHS {
            return Err(ScraperError::MissingParagraphs {
                found: self.paragraphs.len(),
                required: REQUIRED_PARAGRAPHS,
            });
        }

        let pay_text = self.text(DetailField::PayRate)?;
        let hourly_pay_rate = parse_pay_rate(&pay_text)
            .ok_or_else(|| ScraperError::InvalidPayRate(pay_text.clone()))?;

        let city = self.optional(DetailField::City)?.map(|city| {
            if self.options.normalize_city {
                normalize_city(&city)
            } else {
                city
            }
        });

        let record = DetailRecord {
            description: self.text(DetailField::Description)?,
            hourly_pay_rate,
            on_bus_route: self.text(DetailField::BusRoute)?.starts_with('O'),
            how_to_apply: self.text(DetailField::HowToApply)?,
            website: self.optional(DetailField::Website)?,
            contact: self.text(DetailField::Contact)?,
            contact_email: self.text(DetailField::ContactEmail)?,
            contact_phone: self.optional(DetailField::ContactPhone)?,
            street_address: self.optional(DetailField::StreetAddress)?,
            city,
            state: self.text(DetailField::State)?,
            department_info: self.optional(DetailField::DepartmentInfo)?,
        };

        log_debug!("[scraper] Parsed detail page for contact {}", record.contact);
        Ok(record)
    }

    fn text(&self, field: DetailField) -> Result<String, ScraperError> {
        let paragraph = self
            .paragraphs
            .get(field.paragraph_index())
            .ok_or(ScraperError::MissingParagraphs {
                found: self.paragraphs.len(),
                required: REQUIRED_PARAGRAPHS,
            })?;
        Ok(extract_text(paragraph, self.options.decode_emails))
    }

    fn optional(&self, field: DetailField) -> Result<Option<String>, ScraperError> {
        let text = self.text(field)?;
        Ok(match field.sentinel() {
            Some(sentinel) if text == sentinel => None,
            _ => Some(text),
        })
    }
}

/// `"$15.50"` -> 15. The first character is the currency symbol.
fn parse_pay_rate(text: &str) -> Option<u32> {
    let mut chars = text.chars();
    chars.next()?;
    parse_int_prefix(chars.as_str())
}

static STATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+MA$").expect("state suffix pattern"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_ ]").expect("non-word pattern"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("space pattern"));

/// `"AMHERST,  MA"` -> `"Amherst"`.
pub fn normalize_city(raw: &str) -> String {
    let city = STATE_SUFFIX.replace(raw, "");
    let city = NON_WORD.replace_all(&city, "");
    let city = SPACES.replace_all(&city, " ").to_lowercase();

    let mut out = String::with_capacity(city.len());
    let mut at_word_start = true;
    for ch in city.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch == ' ';
    }
    out.trim().to_string()
}
