//! Response rendering for offer sequences.
//!
//! JSON is the default; CSV is rendered locally from the already-filtered
//! offer list with a fixed column set, one offer per row. Both formats emit
//! the same offers in the same order, so the choice is orthogonal to the
//! cursor and filter logic.

use crate::error::{AppError, Result};
use crate::feed::types::Offer;

/// Supported values for the `response_format` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Csv,
}

impl ResponseFormat {
    /// Parse the request parameter. Unsupported values are a format error,
    /// surfaced before any remote call is made.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::Json),
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some(other) => Err(AppError::Format(format!(
                "unsupported response_format '{}', expected 'json' or 'csv'",
                other
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

/// Column set shared by the CSV header and every row. Matches the JSON
/// field declaration order; provider extras are JSON-only.
const CSV_COLUMNS: [&str; 11] = [
    "offer_id",
    "store_id",
    "store_name",
    "category",
    "title",
    "description",
    "code",
    "url",
    "start_date",
    "end_date",
    "status",
];

/// Render offers as CSV with a header row.
pub fn to_csv(offers: &[Offer]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| AppError::Internal(format!("csv write failed: {}", e)))?;

    for offer in offers {
        writer
            .write_record([
                offer.offer_id.as_str(),
                offer.store_id.as_str(),
                offer.store_name.as_str(),
                offer.category.as_str(),
                offer.title.as_deref().unwrap_or(""),
                offer.description.as_deref().unwrap_or(""),
                offer.code.as_deref().unwrap_or(""),
                offer.url.as_deref().unwrap_or(""),
                offer.start_date.as_deref().unwrap_or(""),
                offer.end_date.as_deref().unwrap_or(""),
                offer.status.as_deref().unwrap_or(""),
            ])
            .map_err(|e| AppError::Internal(format!("csv write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("csv flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("csv encoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_json() {
        assert_eq!(ResponseFormat::parse(None).unwrap(), ResponseFormat::Json);
        assert_eq!(
            ResponseFormat::parse(Some("json")).unwrap(),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::parse(Some("csv")).unwrap(),
            ResponseFormat::Csv
        );
    }

    #[test]
    fn parse_rejects_unknown_formats() {
        let err = ResponseFormat::parse(Some("xml")).unwrap_err();
        assert!(matches!(err, AppError::Format(_)));
    }

    #[test]
    fn csv_has_header_and_one_row_per_offer() {
        let mut offer = Offer::test("1", "A", "Acme", "electronics");
        offer.title = Some("10% off".to_string());
        let offers = vec![offer, Offer::test("2", "B", "Bolt", "fashion")];

        let csv = to_csv(&offers).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("offer_id,store_id,store_name,category"));
        assert!(lines[1].starts_with("1,A,Acme,electronics,10% off"));
        assert!(lines[2].starts_with("2,B,Bolt,fashion"));
    }

    #[test]
    fn csv_preserves_input_order() {
        let offers = vec![
            Offer::test("3", "A", "Acme", "x"),
            Offer::test("1", "A", "Acme", "x"),
            Offer::test("2", "A", "Acme", "x"),
        ];
        let csv = to_csv(&offers).unwrap();
        let first_fields: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(first_fields, vec!["3", "1", "2"]);
    }
}
