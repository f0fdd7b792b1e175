use super::dom::{Document, Element};
use super::parse_int_prefix;
use crate::error::ScraperError;
use crate::{log_debug, log_info, log_warn};
use chrono::NaiveDate;
use serde::Serialize;

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Cell positions in a listing row.
mod cell {
    pub const ID: usize = 0;
    pub const DATE: usize = 1;
    pub const TITLE: usize = 2;
    pub const WORK_STUDY: usize = 3;
    pub const ON_CAMPUS: usize = 4;
    pub const HIRING_PERIOD: usize = 5;
    pub const HOURS: usize = 6;

    pub const COUNT: usize = 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkStudyStatus {
    Yes,
    No,
    EitherAllowed,
}

impl WorkStudyStatus {
    fn from_cell(text: &str) -> Self {
        match text.chars().next() {
            Some('E') => Self::EitherAllowed,
            // "Work Study" or "Yes".
            Some('W') | Some('Y') => Self::Yes,
            _ => Self::No,
        }
    }
}

/// Weekly hours: either a fixed count or an inclusive range. Serializes as a
/// number or a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HoursPerWeek {
    Fixed(u32),
    Range(u32, u32),
}

impl HoursPerWeek {
    fn parse(text: &str) -> Option<Self> {
        match text.split_once('-') {
            Some((min, rest)) => {
                let max = rest.split('-').next().unwrap_or(rest);
                Some(Self::Range(parse_int_prefix(min)?, parse_int_prefix(max)?))
            }
            None => parse_int_prefix(text).map(Self::Fixed),
        }
    }

    pub fn min(&self) -> u32 {
        match *self {
            Self::Fixed(hours) => hours,
            Self::Range(min, _) => min,
        }
    }

    pub fn max(&self) -> u32 {
        match *self {
            Self::Fixed(hours) => hours,
            Self::Range(_, max) => max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub work_study: WorkStudyStatus,
    pub on_campus: bool,
    pub hiring_period: String,
    pub hours_per_week: HoursPerWeek,
}

pub struct ListingScraper<'a> {
    document: &'a Document,
}

impl<'a> ListingScraper<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Every data row of the listing table, in document order. The first
    /// `tr` is the header. A row without an id or without all seven cells
    /// fails the whole listing; a row whose date or hours cannot be read is
    /// skipped on its own.
    pub fn parse_table(&self) -> Result<Vec<ListingRecord>, ScraperError> {
        let rows = self.document.find_all("tr");
        log_debug!("[scraper] Found {} listing rows (header included)", rows.len());

        let mut records = Vec::with_capacity(rows.len().saturating_sub(1));
        for (index, row) in rows.into_iter().enumerate().skip(1) {
            if let Some(record) = parse_row(index, row)? {
                records.push(record);
            }
        }

        log_info!("[scraper] Parsed {} listing records", records.len());
        Ok(records)
    }
}

fn parse_row(index: usize, row: &Element) -> Result<Option<ListingRecord>, ScraperError> {
    let malformed = |reason: String| ScraperError::MalformedRow { row: index, reason };

    let cells: Vec<&Element> = row.child_elements().collect();
    if cells.len() < cell::COUNT {
        return Err(malformed(format!(
            "expected {} cells, found {}",
            cell::COUNT,
            cells.len()
        )));
    }

    let id = cells[cell::ID]
        .children
        .first()
        .map(|node| node.text_content().trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| malformed("missing job identifier".to_string()))?;

    let date_text = cells[cell::DATE].rendered_text();
    let date = match NaiveDate::parse_from_str(&date_text, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            log_warn!("[scraper] Skipping listing {}: invalid date {:?}: {}", id, date_text, e);
            return Ok(None);
        }
    };

    let hours_text = cells[cell::HOURS].rendered_text();
    let Some(hours_per_week) = HoursPerWeek::parse(&hours_text) else {
        log_warn!("[scraper] Skipping listing {}: invalid hours per week {:?}", id, hours_text);
        return Ok(None);
    };

    Ok(Some(ListingRecord {
        id,
        title: cells[cell::TITLE].rendered_text(),
        date,
        work_study: WorkStudyStatus::from_cell(&cells[cell::WORK_STUDY].rendered_text()),
        on_campus: cells[cell::ON_CAMPUS].rendered_text().chars().nth(1) == Some('n'),
        hiring_period: cells[cell::HIRING_PERIOD].rendered_text(),
        hours_per_week,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<tr><th>Job #</th><th>Posted</th><th>Title</th><th>Work Study</th>\
        <th>Location</th><th>Hiring For</th><th>Hours</th></tr>";

    fn table(rows: &[&str]) -> Document {
        Document::parse(&format!(
            "<html><body><table>{}{}</table></body></html>",
            HEADER,
            rows.concat()
        ))
    }

    fn parse(doc: &Document) -> Result<Vec<ListingRecord>, ScraperError> {
        ListingScraper::new(doc).parse_table()
    }

    #[test]
    fn parses_single_row() {
        let doc = table(&["<tr><td>12345<span>&bull;</span></td><td>01/15/2024</td>\
            <td>Library Aide</td><td>Yes, work study only</td><td>On campus</td>\
            <td>Spring</td><td>10-15</td></tr>"]);

        let records = parse(&doc).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, "12345");
        assert_eq!(record.title, "Library Aide");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(record.work_study, WorkStudyStatus::Yes);
        assert!(record.on_campus);
        assert_eq!(record.hiring_period, "Spring");
        assert_eq!(record.hours_per_week, HoursPerWeek::Range(10, 15));
    }

    #[test]
    fn header_only_table_is_empty() {
        assert!(parse(&table(&[])).unwrap().is_empty());
    }

    #[test]
    fn keeps_document_order_and_flags() {
        let doc = table(&[
            "<tr><td>2</td><td>02/01/2024</td><td>Cook</td><td>Either</td>\
             <td>Off campus</td><td>Fall</td><td>20</td></tr>",
            "<tr><td>1</td><td>12/31/2023</td><td>Tutor</td><td>No</td>\
             <td>On campus</td><td>Summer</td><td>5 - 8</td></tr>",
        ]);

        let records = parse(&doc).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);

        assert_eq!(records[0].work_study, WorkStudyStatus::EitherAllowed);
        assert!(!records[0].on_campus);
        assert_eq!(records[0].hours_per_week, HoursPerWeek::Fixed(20));

        assert_eq!(records[1].work_study, WorkStudyStatus::No);
        assert_eq!(records[1].hours_per_week, HoursPerWeek::Range(5, 8));
        assert_eq!(records[1].hours_per_week.min(), 5);
        assert_eq!(records[1].hours_per_week.max(), 8);
    }

    #[test]
    fn missing_identifier_fails_the_listing() {
        let doc = table(&[
            "<tr><td>1</td><td>01/01/2024</td><td>A</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>4</td></tr>",
            "<tr><td></td><td>01/01/2024</td><td>B</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>4</td></tr>",
        ]);

        match parse(&doc) {
            Err(ScraperError::MalformedRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let doc = table(&["<tr><td>1</td><td>01/01/2024</td></tr>"]);
        assert!(matches!(parse(&doc), Err(ScraperError::MalformedRow { .. })));
    }

    #[test]
    fn unreadable_date_skips_only_that_row() {
        let doc = table(&[
            "<tr><td>1</td><td>2024-01-01</td><td>A</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>4</td></tr>",
            "<tr><td>2</td><td>01/02/2024</td><td>B</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>4</td></tr>",
        ]);

        let records = parse(&doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
    }

    #[test]
    fn unreadable_hours_skip_only_that_row() {
        let doc = table(&[
            "<tr><td>1</td><td>01/01/2024</td><td>A</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>10</td></tr>",
            "<tr><td>2</td><td>01/01/2024</td><td>B</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>Varies</td></tr>",
            "<tr><td>3</td><td>01/01/2024</td><td>C</td><td>No</td>\
             <td>On campus</td><td>Fall</td><td>4-6</td></tr>",
        ]);

        let ids: Vec<String> = parse(&doc).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn hours_parse_like_the_portal_writes_them() {
        assert_eq!(HoursPerWeek::parse("12"), Some(HoursPerWeek::Fixed(12)));
        assert_eq!(HoursPerWeek::parse("8 hrs"), Some(HoursPerWeek::Fixed(8)));
        assert_eq!(HoursPerWeek::parse("10-15"), Some(HoursPerWeek::Range(10, 15)));
        assert_eq!(HoursPerWeek::parse("varies"), None);
        assert_eq!(HoursPerWeek::parse("10-"), None);
    }

    #[test]
    fn hours_serialize_as_number_or_pair() {
        assert_eq!(
            serde_json::to_string(&HoursPerWeek::Fixed(10)).unwrap(),
            "10"
        );
        assert_eq!(
            serde_json::to_string(&HoursPerWeek::Range(10, 15)).unwrap(),
            "[10,15]"
        );
    }
}
