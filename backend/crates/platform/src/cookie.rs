//! Session Cookie Plumbing
//!
//! Builds `Set-Cookie` header values for the session cookie and reads
//! the cookie back out of request headers. The delete variant carries
//! the same attribute set as the set variant, so browsers match and
//! drop the right cookie.

use axum::http::{HeaderMap, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// Configuration for a session cookie: HttpOnly, site-wide path,
    /// bounded lifetime.
    pub fn session(
        name: impl Into<String>,
        secure: bool,
        same_site: SameSite,
        max_age_secs: i64,
    ) -> Self {
        Self {
            name: name.into(),
            secure,
            http_only: true,
            same_site,
            path: "/".to_string(),
            max_age_secs: Some(max_age_secs),
        }
    }

    /// Build a `Set-Cookie` header value carrying `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        self.assemble(value, self.max_age_secs)
    }

    /// Build a `Set-Cookie` header value that expires the cookie
    ///
    /// Same name and attributes as the set path, empty value,
    /// `Max-Age=0`.
    pub fn build_delete_cookie(&self) -> String {
        self.assemble("", Some(0))
    }

    fn assemble(&self, value: &str, max_age_secs: Option<i64>) -> String {
        let mut parts = vec![format!("{}={}", self.name, value)];

        if let Some(max_age) = max_age_secs {
            parts.push(format!("Max-Age={max_age}"));
        }
        parts.push(format!("Path={}", self.path));
        parts.push(format!("SameSite={}", self.same_site.as_str()));
        if self.secure {
            parts.push("Secure".to_string());
        }
        if self.http_only {
            parts.push("HttpOnly".to_string());
        }

        parts.join("; ")
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in header.split(';') {
        if let Some((key, value)) = pair.trim().split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }

    None
}
