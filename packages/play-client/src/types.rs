use serde::{Deserialize, Serialize};

/// Parameters for one review query against the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewQuery {
    /// Play Store package id, e.g. `com.example.bank`.
    #[serde(rename = "id")]
    pub package_id: String,
    pub lang: String,
    pub country: String,
    /// Number of reviews requested. The service may return fewer.
    pub count: usize,
    /// Only return reviews with this star score. `None` returns every rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_score_with: Option<u8>,
}

impl ReviewQuery {
    pub fn new(package_id: impl Into<String>, count: usize) -> Self {
        Self {
            package_id: package_id.into(),
            lang: "en".to_string(),
            country: "us".to_string(),
            count,
            filter_score_with: None,
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

    /// Query-string pairs in the order the service documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("id", self.package_id.clone()),
            ("lang", self.lang.clone()),
            ("country", self.country.clone()),
            ("count", self.count.to_string()),
        ];
        if let Some(score) = self.filter_score_with {
            pairs.push(("filter_score_with", score.to_string()));
        }
        pairs
    }
}

/// A single review as returned by the service.
///
/// Every field is optional on the wire; the service passes through
/// whatever the store omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    #[serde(rename = "reviewId", default)]
    pub review_id: Option<String>,
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// The service answers either with a bare array or with a `data` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReviewsResponse {
    Items(Vec<ReviewItem>),
    Wrapped { data: Vec<ReviewItem> },
}

impl ReviewsResponse {
    pub fn into_items(self) -> Vec<ReviewItem> {
        match self {
            ReviewsResponse::Items(items) => items,
            ReviewsResponse::Wrapped { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_score_filter() {
        let query = ReviewQuery::new("com.example.bank", 25)
            .with_lang("ar")
            .with_country("om");

        let pairs = query.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("id", "com.example.bank".to_string()),
                ("lang", "ar".to_string()),
                ("country", "om".to_string()),
                ("count", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_with_score_filter() {
        let mut query = ReviewQuery::new("com.example.bank", 10);
        query.filter_score_with = Some(5);

        let pairs = query.query_pairs();
        assert_eq!(pairs.last(), Some(&("filter_score_with", "5".to_string())));
    }

    #[test]
    fn test_decode_bare_array() {
        let json = r#"[
            {"reviewId": "r1", "userName": "Salim", "content": "Works well", "score": 5},
            {"userName": "Aisha", "content": null, "score": 2}
        ]"#;

        let items = serde_json::from_str::<ReviewsResponse>(json)
            .unwrap()
            .into_items();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].user_name.as_deref(), Some("Salim"));
        assert_eq!(items[0].score, Some(5));
        assert_eq!(items[1].content, None);
        assert_eq!(items[1].review_id, None);
    }

    #[test]
    fn test_decode_data_envelope() {
        let json = r#"{"data": [{"userName": "Khalid", "content": "Slow login"}]}"#;

        let items = serde_json::from_str::<ReviewsResponse>(json)
            .unwrap()
            .into_items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].score, None);
    }
}
