use std::str::FromStr;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::Error;
use crate::Result;

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, raw and still percent-encoded.
    pub path: String,
    /// HTTP query parameters, kept as they appear on the wire.
    ///
    /// `k=` is `(k, Some(""))` while a bare `k` is `(k, None)`.
    pub query: Vec<(String, Option<String>)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    ///
    /// `parts` is left untouched, so a signing error never leaves a half
    /// signed request behind. Call [`SigningRequest::apply`] to write the
    /// result back.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let paq = parts
            .uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: parts.uri.scheme().cloned().unwrap_or(Scheme::HTTP),
            authority: parts.uri.authority().cloned().ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    v.split('&')
                        .filter(|pair| !pair.is_empty())
                        .map(|pair| match pair.split_once('=') {
                            Some((k, v)) => (k.to_string(), Some(v.to_string())),
                            None => (pair.to_string(), None),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// `parts` is only modified once the new uri has been built successfully.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        let paq = if self.query.is_empty() {
            self.path
        } else {
            let mut s = self.path;
            s.reserve(query_size + 1);

            s.push('?');
            for (i, (k, v)) in self.query.iter().enumerate() {
                if i > 0 {
                    s.push('&');
                }

                s.push_str(k);
                if let Some(v) = v {
                    s.push('=');
                    s.push_str(v);
                }
            }

            s
        };

        let mut uri_parts = http::uri::Parts::default();
        uri_parts.scheme = Some(self.scheme);
        uri_parts.authority = Some(self.authority);
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
        let uri = Uri::from_parts(uri_parts)?;

        parts.method = self.method;
        parts.uri = uri;
        parts.headers = self.headers;

        Ok(())
    }

    /// Get query size, including separators.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.as_ref().map_or(0, |v| v.len() + 1) + 1)
            .sum::<usize>()
    }

    /// Push a new query pair into query list.
    ///
    /// Both key and value must already be percent-encoded.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), Some(value.into())));
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found, and `RequestInvalid` if the
    /// value is not visible ASCII.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Canonicalize a header value into a single line.
    ///
    /// Every line break (`\r\n`, `\n` or `\r`) is turned into a space, then
    /// runs of two or more spaces are collapsed into one.
    ///
    /// ```shell
    /// "foo  bar\nbaz" => "foo bar baz"
    /// ```
    pub fn header_value_canonicalize(v: &str) -> String {
        let mut s = String::with_capacity(v.len());
        let mut chars = v.chars().peekable();
        while let Some(c) = chars.next() {
            let c = match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    ' '
                }
                '\n' => ' ',
                c => c,
            };

            if c == ' ' && s.ends_with(' ') {
                continue;
            }
            s.push(c);
        }

        s
    }

    /// Get headers whose name starts with given prefix.
    ///
    /// - `prefix` is matched case-insensitively.
    /// - Names are returned in lowercase.
    /// - Values of a repeated header are canonicalized and joined by a single space
    ///   in the order they were inserted.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let prefix = prefix.to_ascii_lowercase();

        let mut headers = Vec::new();
        // `HeaderMap::keys` yields every distinct name exactly once.
        for name in self.headers.keys() {
            let name = name.as_str();
            if !name.starts_with(&prefix) {
                continue;
            }

            let mut values = Vec::new();
            for v in self.headers.get_all(name) {
                values.push(Self::header_value_canonicalize(v.to_str()?));
            }
            headers.push((name.to_ascii_lowercase(), values.join(" ")));
        }

        Ok(headers)
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        // Sort via header name.
        headers.sort();

        headers
            .into_iter()
            .map(|(k, v)| format!("{k}{sep}{v}"))
            .collect::<Vec<_>>()
            .join(join)
    }
}

/// SigningMethod is the method that used in signing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with header.
    Header,
    /// Signing with query.
    Query(std::time::Duration),
}
