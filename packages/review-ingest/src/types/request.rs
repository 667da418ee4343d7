//! Per-bank request parameters.

use serde::{Deserialize, Serialize};

/// Default storefront country for both stores.
pub const DEFAULT_COUNTRY: &str = "us";

/// Default Play Store review language.
pub const DEFAULT_LANG: &str = "en";

/// Default number of reviews requested per source.
pub const DEFAULT_MAX_REVIEWS: usize = 100;

/// App Store identifiers for one bank app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleParams {
    pub app_id: String,
    pub country: String,
}

impl AppleParams {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

/// Play Store identifiers for one bank app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayParams {
    pub package_id: String,
    pub lang: String,
    pub country: String,
}

impl PlayParams {
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            lang: DEFAULT_LANG.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

/// Everything needed to ingest one bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRequest {
    pub bank_name: String,
    pub apple: AppleParams,
    pub play: PlayParams,
    /// Reviews requested from each source
    pub max_reviews: usize,
}

impl BankRequest {
    pub fn new(bank_name: impl Into<String>, apple: AppleParams, play: PlayParams) -> Self {
        Self {
            bank_name: bank_name.into(),
            apple,
            play,
            max_reviews: DEFAULT_MAX_REVIEWS,
        }
    }

    pub fn with_max_reviews(mut self, max_reviews: usize) -> Self {
        self.max_reviews = max_reviews;
        self
    }
}

/// File-name friendly form of a bank name: lowercased, spaces to underscores.
pub fn bank_slug(bank_name: &str) -> String {
    bank_name.to_lowercase().replace(' ', "_")
}
