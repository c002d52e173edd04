//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network; a `Transport` (or the caller) executes the I/O.
//!
//! `Params` is the form-encoded parameter set every Namecheap command sends.
//! It keeps keys sorted so encoded bodies are deterministic.

use std::collections::BTreeMap;

use url::form_urlencoded;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request. The vendor API only accepts these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// For `Get` the parameters are already encoded into `path`'s query string
/// and `body` is `None`. For `Post` they travel in `body`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Decode the parameters this request carries, from the body or the
    /// query string depending on the method.
    pub fn params(&self) -> Params {
        match (&self.method, &self.body) {
            (HttpMethod::Post, Some(body)) => Params::decode(body),
            _ => self
                .path
                .split_once('?')
                .map(|(_, query)| Params::decode(query))
                .unwrap_or_default(),
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Form parameters keyed by name. Setting an existing key replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` serialization.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Inverse of [`Params::encode`]. Later duplicates win.
    pub fn decode(encoded: &str) -> Self {
        form_urlencoded::parse(encoded.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_escapes_reserved_characters() {
        let mut params = Params::new();
        params.set("DomainList", "a.com,b.com");
        params.set("Address1", "8939 S.cross Blvd & Co");
        assert_eq!(
            params.encode(),
            "Address1=8939+S.cross+Blvd+%26+Co&DomainList=a.com%2Cb.com"
        );
    }

    #[test]
    fn encoded_params_parse_back_to_the_same_set() {
        let params: Params = [
            ("ApiUser", "user"),
            ("EmailAddress", "john+test@gmail.com"),
            ("Phone", "+1.6613102107"),
            ("Nameservers", "ns1.test.com,ns2.test.com"),
            ("Empty", ""),
            ("Unicode", "Zürich / 東京"),
        ]
        .into_iter()
        .collect();
        assert_eq!(Params::decode(&params.encode()), params);
    }

    #[test]
    fn set_replaces_existing_value() {
        let mut params = Params::new();
        assert_eq!(params.set("Years", "1"), None);
        assert_eq!(params.set("Years", "2"), Some("1".to_string()));
        assert_eq!(params.get("Years"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn request_params_read_from_query_for_get() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost/xml.response?Command=x&Page=2".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let params = req.params();
        assert_eq!(params.get("Command"), Some("x"));
        assert_eq!(params.get("Page"), Some("2"));
    }
}
