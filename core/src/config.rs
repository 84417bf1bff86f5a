//! Caller-side description of a single HTTP call.
//!
//! # Design
//! `RequestConfig` is a transient value: it is built for one call, turned into
//! an `HttpRequest` by `build`, and dropped. `build` performs no I/O and no
//! validation of the method or URL; anything malformed is left for the
//! transport to reject.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Description of one HTTP call: method, url, headers, JSON body and query
/// parameters.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub params: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
            params: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    /// Set a header. Names are unique regardless of case; a later value
    /// replaces an earlier one.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |config, (name, value)| config.header(name, value))
    }

    /// Add a query parameter. Numbers are accepted through `ToString`.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(self, |config, (name, value)| config.param(name, value))
    }

    /// A JSON `null` body is treated as no body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Use any serializable value as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, FetchError> {
        let body = serde_json::to_value(body).map_err(|e| FetchError::Serialize(e.to_string()))?;
        Ok(self.body(body))
    }

    /// The final URL: `url` with the encoded `params` appended.
    ///
    /// An existing query string is extended with `&` rather than opened a
    /// second time, and a `#fragment` stays last.
    pub fn full_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        append_query(&self.url, &query)
    }

    /// Outgoing headers: `Content-Type: application/json` overlaid with the
    /// caller's headers.
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        for (name, value) in &self.headers {
            insert_header(&mut merged, name.clone(), value.clone());
        }
        merged
    }

    pub fn build(&self) -> Result<HttpRequest, FetchError> {
        let body = self
            .body
            .as_ref()
            .filter(|body| !body.is_null())
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| FetchError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::parse(&self.method),
            url: self.full_url(),
            headers: self.merged_headers(),
            body,
        })
    }
}

fn insert_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
    headers.push((name, value));
}

fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{base}{separator}{query}{fragment}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://api.example.com/items";

    #[test]
    fn params_are_form_encoded_in_order() {
        let config = RequestConfig::get(URL).param("a", "1").param("b", "two words");
        assert_eq!(config.full_url(), "https://api.example.com/items?a=1&b=two+words");
    }

    #[test]
    fn numeric_params_are_stringified() {
        let config = RequestConfig::get(URL).param("limit", 10).param("ratio", 1.5);
        assert_eq!(config.full_url(), format!("{URL}?limit=10&ratio=1.5"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let config = RequestConfig::get(URL).param("q", "a&b=c/d");
        assert_eq!(config.full_url(), format!("{URL}?q=a%26b%3Dc%2Fd"));
    }

    #[test]
    fn no_params_leaves_url_untouched() {
        let config = RequestConfig::get(format!("{URL}?page=2"));
        assert_eq!(config.full_url(), format!("{URL}?page=2"));
    }

    #[test]
    fn existing_query_is_extended() {
        let config = RequestConfig::get(format!("{URL}?page=2")).param("limit", 10);
        assert_eq!(config.full_url(), format!("{URL}?page=2&limit=10"));

        let config = RequestConfig::get(format!("{URL}?")).param("limit", 10);
        assert_eq!(config.full_url(), format!("{URL}?limit=10"));
    }

    #[test]
    fn fragment_stays_last() {
        let config = RequestConfig::get(format!("{URL}#top")).param("limit", 10);
        assert_eq!(config.full_url(), format!("{URL}?limit=10#top"));
    }

    #[test]
    fn content_type_defaults_to_json() {
        let config = RequestConfig::get(URL).header("Authorization", "Bearer t");
        assert_eq!(
            config.merged_headers(),
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer t".to_string()),
            ]
        );
    }

    #[test]
    fn caller_content_type_wins_regardless_of_case() {
        let config = RequestConfig::post(URL).header("content-type", "text/plain");
        assert_eq!(
            config.merged_headers(),
            vec![("content-type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn repeated_header_replaces_earlier_value() {
        let config = RequestConfig::get(URL)
            .headers([("X-Trace", "1"), ("x-trace", "2")]);
        assert_eq!(config.headers, vec![("x-trace".to_string(), "2".to_string())]);
    }

    #[test]
    fn build_without_body_sends_none() {
        let req = RequestConfig::get(URL).build().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, URL);
        assert!(req.body.is_none());
    }

    #[test]
    fn null_body_is_not_sent() {
        let req = RequestConfig::get(URL).body(Value::Null).build().unwrap();
        assert!(req.body.is_none());

        let req = RequestConfig::post(URL).json(&Option::<String>::None).unwrap().build().unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn build_serializes_body_as_json_text() {
        let req = RequestConfig::post(URL).body(json!({"name": "x"})).build().unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn json_accepts_serializable_types() {
        #[derive(Serialize)]
        struct NewItem<'a> {
            name: &'a str,
            tags: Vec<&'a str>,
        }

        let config = RequestConfig::post(URL)
            .json(&NewItem { name: "x", tags: vec!["a"] })
            .unwrap();
        assert_eq!(config.body, Some(json!({"name": "x", "tags": ["a"]})));
    }

    #[test]
    fn json_rejects_non_string_map_keys() {
        let mut body = std::collections::HashMap::new();
        body.insert(vec![1u8], "value");
        let err = RequestConfig::post(URL).json(&body).unwrap_err();
        assert!(matches!(err, FetchError::Serialize(_)));
    }

    #[test]
    fn method_is_not_validated() {
        let req = RequestConfig::new("NOT A VERB", "not a url").build().unwrap();
        assert_eq!(req.method, HttpMethod::Custom("NOT A VERB".to_string()));
        assert_eq!(req.url, "not a url");
    }
}
