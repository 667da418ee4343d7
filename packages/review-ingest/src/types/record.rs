//! Review record types - the unified schema every source is coerced into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace a review came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Apple,
    Google,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Apple => "Apple",
            Source::Google => "Google",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Apple" => Ok(Source::Apple),
            "Google" => Ok(Source::Google),
            other => Err(format!("unknown source: {other:?}")),
        }
    }
}

/// One review after normalization.
///
/// `review_text` is never absent: sources that omit it produce an empty
/// string. `bank` stays empty until a bank ingestor stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub source: Source,
    pub author: String,
    pub title: String,
    pub review_text: String,
    /// Star rating in `1..=5`, `None` when the origin omitted it
    pub rating: Option<u8>,
    pub bank: String,
}

impl SourceRecord {
    /// Create an unstamped record with empty fields.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            author: String::new(),
            title: String::new(),
            review_text: String::new(),
            rating: None,
            bank: String::new(),
        }
    }

    /// Set the author, treating a missing value as empty.
    pub fn with_author(mut self, author: Option<impl Into<String>>) -> Self {
        self.author = author.map(Into::into).unwrap_or_default();
        self
    }

    /// Set the title, treating a missing value as empty.
    pub fn with_title(mut self, title: Option<impl Into<String>>) -> Self {
        self.title = title.map(Into::into).unwrap_or_default();
        self
    }

    /// Set the review body, treating a missing value as empty.
    pub fn with_text(mut self, text: Option<impl Into<String>>) -> Self {
        self.review_text = text.map(Into::into).unwrap_or_default();
        self
    }

    pub fn with_rating(mut self, rating: Option<u8>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = bank.into();
        self
    }
}

/// Keep a raw score only if it is a valid star rating.
pub fn normalize_rating(raw: i64) -> Option<u8> {
    if (1..=5).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}

/// Parse a textual rating such as `"4"` from a feed or a persisted row.
pub fn parse_rating(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return normalize_rating(value);
    }
    // Rows written by dataframe tools carry integer ratings as floats ("4.0")
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0)
        .and_then(|v| normalize_rating(v as i64))
}

/// Ordered reviews for one bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankDataset {
    pub bank: String,
    pub records: Vec<SourceRecord>,
}

impl BankDataset {
    /// Build a dataset, stamping every record with `bank`.
    pub fn new(bank: impl Into<String>, records: Vec<SourceRecord>) -> Self {
        let bank = bank.into();
        let records = records
            .into_iter()
            .map(|mut r| {
                r.bank = bank.clone();
                r
            })
            .collect();
        Self { bank, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records from one source.
    pub fn count_source(&self, source: Source) -> usize {
        self.records.iter().filter(|r| r.source == source).count()
    }
}

/// All bank datasets of one campaign, concatenated in ingestion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDataset {
    pub banks: Vec<String>,
    pub records: Vec<SourceRecord>,
}

impl CampaignDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bank's rows after everything already present.
    pub fn push_bank(&mut self, dataset: BankDataset) {
        self.banks.push(dataset.bank);
        self.records.extend(dataset.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<BankDataset> for CampaignDataset {
    fn from_iter<I: IntoIterator<Item = BankDataset>>(iter: I) -> Self {
        let mut campaign = CampaignDataset::new();
        for dataset in iter {
            campaign.push_bank(dataset);
        }
        campaign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_become_empty() {
        let record = SourceRecord::new(Source::Apple)
            .with_author(None::<String>)
            .with_title(None::<String>)
            .with_text(None::<String>);

        assert_eq!(record.author, "");
        assert_eq!(record.title, "");
        assert_eq!(record.review_text, "");
        assert_eq!(record.bank, "");
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(normalize_rating(1), Some(1));
        assert_eq!(normalize_rating(5), Some(5));
        assert_eq!(normalize_rating(0), None);
        assert_eq!(normalize_rating(6), None);
        assert_eq!(parse_rating(" 3 "), Some(3));
        assert_eq!(parse_rating("4.0"), Some(4));
        assert_eq!(parse_rating("4.5"), None);
        assert_eq!(parse_rating(""), None);
    }

    #[test]
    fn test_source_round_trip_through_text() {
        assert_eq!("Apple".parse::<Source>(), Ok(Source::Apple));
        assert_eq!(Source::Google.to_string(), "Google");
        assert!("Huawei".parse::<Source>().is_err());
    }

    #[test]
    fn test_bank_dataset_stamps_every_record() {
        let dataset = BankDataset::new(
            "Bank Muscat",
            vec![
                SourceRecord::new(Source::Apple).with_bank("stale"),
                SourceRecord::new(Source::Google),
            ],
        );

        assert!(dataset.records.iter().all(|r| r.bank == "Bank Muscat"));
        assert_eq!(dataset.count_source(Source::Apple), 1);
        assert_eq!(dataset.count_source(Source::Google), 1);
    }

    #[test]
    fn test_campaign_keeps_bank_order() {
        let a = BankDataset::new("A", vec![SourceRecord::new(Source::Apple); 2]);
        let b = BankDataset::new("B", vec![SourceRecord::new(Source::Google); 3]);

        let campaign: CampaignDataset = vec![a, b].into_iter().collect();

        assert_eq!(campaign.banks, vec!["A", "B"]);
        assert_eq!(campaign.len(), 5);
        let banks: Vec<_> = campaign.records.iter().map(|r| r.bank.as_str()).collect();
        assert_eq!(banks, vec!["A", "A", "B", "B", "B"]);
    }
}
