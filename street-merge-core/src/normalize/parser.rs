//! Client for the street-name parser service.
//!
//! The service classifies a free-text string into labeled tokens
//! (`street`, `housenumber`, …). The pipeline only ever needs one call
//! shape, so the client is a thin blocking GET behind the
//! [`ParseStreetName`] seam; tests substitute an in-memory stub.

use serde::Deserialize;

use crate::Error;

/// Default endpoint of the classification service.
pub const DEFAULT_PARSER_URL: &str = "http://parser.map4d.vn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Solution {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub classifications: Vec<Classification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Seam to the external name classification service.
pub trait ParseStreetName {
    /// Classifies one normalized name.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and malformed bodies.
    fn parse(&self, text: &str) -> Result<ParseResponse, Error>;
}

/// Blocking HTTP client for the parser service.
pub struct HttpNameParser {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpNameParser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn request_url(&self, text: &str) -> String {
        // Parenthesised alternate names ("Tên 1 (Tên 2)") and stray quote
        // characters confuse the service; send them as blanks.
        let cleaned = text.replace(['(', ')', '\'', '*'], " ");
        format!(
            "{}/parser/parse?text={}",
            self.base_url,
            cleaned.replace(' ', "%20")
        )
    }
}

impl Default for HttpNameParser {
    fn default() -> Self {
        Self::new(DEFAULT_PARSER_URL)
    }
}

impl ParseStreetName for HttpNameParser {
    fn parse(&self, text: &str) -> Result<ParseResponse, Error> {
        let url = self.request_url(text);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::ParserError(e.to_string()))?;

        response
            .json()
            .map_err(|e| Error::ParserResponseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_encodes_spaces_and_strips_specials() {
        let client = HttpNameParser::new("http://parser.test");
        assert_eq!(
            client.request_url("duong le loi"),
            "http://parser.test/parser/parse?text=duong%20le%20loi"
        );
        assert_eq!(
            client.request_url("duong a (b)"),
            "http://parser.test/parser/parse?text=duong%20a%20%20b%20"
        );
    }

    #[test]
    fn response_deserializes_with_missing_fields() {
        let body = r#"{"solutions":[{"score":12,"classifications":[{"value":"Lê Lợi","label":"street"}]}]}"#;
        let response: ParseResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.solutions.len(), 1);
        assert_eq!(response.solutions[0].classifications[0].label, "street");

        let empty: ParseResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.solutions.is_empty());
    }
}
