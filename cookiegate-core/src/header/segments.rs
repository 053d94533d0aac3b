//! `Set-Cookie` tokenizer
//!
//! Splits a header value into its `name=value` pair and `;` separated
//! attribute segments. Nothing is decoded; segments keep their text so
//! attributes the engine does not manage are written back as they came in.

use std::fmt;

/// One attribute segment (`Path=/`, `HttpOnly`, `SameSite=Lax`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Trimmed segment text, CR/LF removed
    raw: String,
    /// Length of the name part within `raw`
    name_len: usize,
}

impl Attribute {
    fn parse(segment: &str) -> Option<Self> {
        let raw: String = segment.chars().filter(|c| *c != '\r' && *c != '\n').collect();
        let raw = raw.trim().to_string();
        if raw.is_empty() {
            return None;
        }

        let name_len = raw.find('=').map(|pos| raw[..pos].trim_end().len()).unwrap_or(raw.len());
        Some(Self { raw, name_len })
    }

    pub fn name(&self) -> &str {
        &self.raw[..self.name_len]
    }

    /// Text after `=`, trimmed; `None` when there is no `=`
    pub fn value(&self) -> Option<&str> {
        self.raw.find('=').map(|pos| self.raw[pos + 1..].trim())
    }

    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A tokenized `Set-Cookie` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookieSegments {
    pair: String,
    attributes: Vec<Attribute>,
}

impl SetCookieSegments {
    /// Tokenize `raw`; CR and LF are deleted, joining the text around them
    pub fn parse(raw: &str) -> Self {
        if raw.contains(|c: char| c == '\r' || c == '\n') {
            log::debug!("Stripped CR/LF from Set-Cookie value for {:?}", cookie_name(raw));
        }

        let mut parts = raw.split(';');
        let pair: String = parts
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();

        Self { pair: pair.trim().to_string(), attributes: parts.filter_map(Attribute::parse).collect() }
    }

    /// Cookie name, or `None` when the pair has no `=`
    pub fn name(&self) -> Option<&str> {
        self.pair.find('=').map(|pos| self.pair[..pos].trim())
    }

    /// The `name=value` text
    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Value of the last `name=...` segment that carries a non-empty value
    pub fn last_value(&self, name: &str) -> Option<&str> {
        self.attributes.iter().rev().filter(|a| a.is(name)).find_map(|a| a.value().filter(|v| !v.is_empty()))
    }

    /// Drop every segment for which `remove` returns true
    pub fn remove_where(&mut self, remove: impl Fn(&Attribute) -> bool) {
        self.attributes.retain(|a| !remove(a));
    }

    pub fn push(&mut self, segment: &str) {
        if let Some(attribute) = Attribute::parse(segment) {
            self.attributes.push(attribute);
        }
    }
}

impl fmt::Display for SetCookieSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pair)?;
        for attribute in &self.attributes {
            write!(f, "; {}", attribute.as_str())?;
        }
        Ok(())
    }
}

/// Name of the cookie a raw `Set-Cookie` value sets
pub fn cookie_name(raw: &str) -> Option<&str> {
    let pair = raw.split(';').next()?;
    let name = pair[..pair.find('=')?].trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let segments = SetCookieSegments::parse("cookieOne=cookieOne; Path=/app ;HttpOnly; SameSite=Lax");

        assert_eq!(segments.name(), Some("cookieOne"));
        assert_eq!(segments.pair(), "cookieOne=cookieOne");
        let names: Vec<&str> = segments.attributes().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Path", "HttpOnly", "SameSite"]);
        assert_eq!(segments.last_value("samesite"), Some("Lax"));
        assert_eq!(segments.to_string(), "cookieOne=cookieOne; Path=/app; HttpOnly; SameSite=Lax");
    }

    #[test]
    fn test_value_with_equals_sign() {
        let segments = SetCookieSegments::parse("token=a=b==; Path=/");
        assert_eq!(segments.name(), Some("token"));
        assert_eq!(segments.pair(), "token=a=b==");
    }

    #[test]
    fn test_last_value_skips_empty() {
        let segments = SetCookieSegments::parse("a=b; SameSite=Strict; SameSite=None; SameSite; SameSite=");
        assert_eq!(segments.last_value("SameSite"), Some("None"));
    }

    #[test]
    fn test_empty_segments_and_crlf_dropped() {
        let segments = SetCookieSegments::parse("a=b;; \r\nSet-Cookie: x=y;");
        assert_eq!(segments.attributes().len(), 1);
        assert_eq!(segments.to_string(), "a=b; Set-Cookie: x=y");
    }

    #[test]
    fn test_line_break_joins_surrounding_text() {
        let segments = SetCookieSegments::parse("a=b\r\nc; Path=/x\ny");
        assert_eq!(segments.pair(), "a=bc");
        assert_eq!(segments.to_string(), "a=bc; Path=/xy");
    }

    #[test]
    fn test_cookie_name() {
        assert_eq!(cookie_name("JSESSIONID=abc; Path=/"), Some("JSESSIONID"));
        assert_eq!(cookie_name(" spaced = v"), Some("spaced"));
        assert_eq!(cookie_name("novalue"), None);
        assert_eq!(cookie_name("=v"), None);
        assert_eq!(cookie_name("a; b=c"), None);
    }
}
