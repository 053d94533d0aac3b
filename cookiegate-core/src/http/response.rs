//! HTTP response building and serialization
//!
//! Headers are kept as an ordered list, not a map, so every `Set-Cookie`
//! stays its own header line.

use std::fmt::Write;

use super::constants::{content_types, headers, CRLF, HTTP_1_1};
use super::cookie::ResponseCookie;
use crate::engine::PolicySnapshot;

/// Status line of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    NotFound = 404,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn reason_phrase(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// HTTP response builder with fluent API
///
/// # Example
///
/// ```rust
/// use cookiegate_core::http::{HttpResponse, ResponseCookie};
///
/// let response = HttpResponse::ok()
///     .cookie(&ResponseCookie::new("cookieOne", "cookieOne"))
///     .add_header("Set-Cookie", "cookieTwo=cookieTwo; SameSite=Lax")
///     .text("OK");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: vec![(headers::CONNECTION.to_string(), "close".to_string())], body: Vec::new() }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// Replace every header called `name` with one value (`setHeader`)
    pub fn set_header(mut self, name: &str, value: &str) -> Self {
        self.remove_header(name);
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Add one more header line, keeping existing ones (`addHeader`)
    pub fn add_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a structured cookie
    pub fn cookie(self, cookie: &ResponseCookie) -> Self {
        self.add_header(headers::SET_COOKIE, &cookie.to_string())
    }

    pub fn content_type(self, content_type: &str) -> Self {
        self.set_header(headers::CONTENT_TYPE, content_type)
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.set_header(headers::CONTENT_LENGTH, &length)
    }

    pub fn text(self, text: &str) -> Self {
        self.content_type(content_types::TEXT).body(text.as_bytes().to_vec())
    }

    /// Run every `Set-Cookie` header through the cookie policy of `endpoint`
    ///
    /// All cookies of this response are decided by the same snapshot. The
    /// processed `Set-Cookie` lines follow the other headers.
    pub fn apply_cookie_policy(mut self, snapshot: &PolicySnapshot, endpoint: &str) -> Self {
        let raw: Vec<String> = self.header_values(headers::SET_COOKIE).into_iter().map(str::to_string).collect();
        if raw.is_empty() {
            return self;
        }

        let processed = snapshot.process_all(endpoint, raw.iter().map(String::as_str));
        self.remove_header(headers::SET_COOKIE);
        for value in processed {
            self.headers.push((headers::SET_COOKIE.to_string(), value));
        }
        self
    }

    fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn get_headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header (case-insensitive name)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Every value of a header, in order
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str()).collect()
    }

    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_values(headers::SET_COOKIE)
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Convert the response to raw HTTP bytes for transmission
    ///
    /// CR and LF inside header values are dropped so a value can never start
    /// a header line of its own.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut response = String::new();

        let _ = write!(&mut response, "{} {}{}", HTTP_1_1, self.status, CRLF);

        for (name, value) in &self.headers {
            let value: String = value.chars().filter(|c| *c != '\r' && *c != '\n').collect();
            let _ = write!(&mut response, "{}: {}{}", name, value, CRLF);
        }

        response.push_str(CRLF);

        let mut bytes = response.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::ok()
    }
}
