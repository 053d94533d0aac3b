//! Outbound HTTP plumbing
//!
//! - [`ResponseCookie`] - structured cookie values
//! - [`HttpResponse`] - response builder whose `Set-Cookie` headers go through
//!   a [`crate::engine::PolicySnapshot`] before serialization
//!
//! Responses built with the `http` crate are handled by
//! [`crate::engine::PolicySnapshot::apply_to_header_map`].

pub mod cookie;
pub mod response;

pub use cookie::ResponseCookie;
pub use response::{HttpResponse, StatusCode};

/// HTTP/1.1 protocol constants
pub mod constants {
    pub const HTTP_1_1: &str = "HTTP/1.1";

    pub mod headers {
        pub const CONTENT_TYPE: &str = "Content-Type";
        pub const CONTENT_LENGTH: &str = "Content-Length";
        pub const CONNECTION: &str = "Connection";
        pub const SET_COOKIE: &str = "Set-Cookie";
    }

    pub mod content_types {
        pub const TEXT: &str = "text/plain; charset=utf-8";
    }

    /// HTTP line ending
    pub const CRLF: &str = "\r\n";
}
