//! Resource path construction
//!
//! Paths are plain `/`-joined segments. Nothing is percent-encoded here;
//! whatever the URL parser does when the request is built is all the
//! encoding a path gets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single entity, numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! identifier_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Identifier {
                fn from(value: $t) -> Self {
                    Identifier(value.to_string())
                }
            }
        )*
    };
}

identifier_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier(value)
    }
}

impl From<&String> for Identifier {
    fn from(value: &String) -> Self {
        Identifier(value.clone())
    }
}

impl From<&Identifier> for Identifier {
    fn from(value: &Identifier) -> Self {
        value.clone()
    }
}

/// Path of a resource relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// `{resource}`
    pub fn collection(resource: &str) -> Self {
        Self {
            segments: vec![resource.to_string()],
        }
    }

    /// `{resource}/{id}`
    pub fn item(resource: &str, id: impl Into<Identifier>) -> Self {
        Self::collection(resource).push(id.into().as_str())
    }

    /// `{resource}/search`
    pub fn search(resource: &str) -> Self {
        Self::collection(resource).push("search")
    }

    /// `{resource}/{id}/{sub_path}`
    pub fn nested(resource: &str, id: impl Into<Identifier>, sub_path: &str) -> Self {
        Self::item(resource, id).push(sub_path)
    }

    /// Append one more segment
    pub fn push(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn as_string(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Join a relative path onto the base URL.
///
/// Exactly one `/` separates them regardless of trailing or leading
/// slashes. An empty base yields the path unchanged.
pub fn join_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(ResourcePath::collection("invoices").to_string(), "invoices");
        assert_eq!(ResourcePath::item("invoices", 42).to_string(), "invoices/42");
        assert_eq!(ResourcePath::item("invoices", "abc-1").to_string(), "invoices/abc-1");
        assert_eq!(ResourcePath::search("invoices").to_string(), "invoices/search");
        assert_eq!(
            ResourcePath::nested("users", 7u32, "avatar").to_string(),
            "users/7/avatar"
        );
    }

    #[test]
    fn test_no_encoding_applied() {
        // segments are joined verbatim
        assert_eq!(ResourcePath::item("files", "a b").to_string(), "files/a b");
        assert_eq!(ResourcePath::item("files", "x/y").to_string(), "files/x/y");
    }

    #[test]
    fn test_identifier_conversions() {
        assert_eq!(Identifier::from(42u64).as_str(), "42");
        assert_eq!(Identifier::from(-3i32).as_str(), "-3");
        assert_eq!(Identifier::from("slug").to_string(), "slug");
        assert_eq!(Identifier::from(String::from("s")), Identifier::from("s"));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://api.example.com/", "invoices/42"), "https://api.example.com/invoices/42");
        assert_eq!(join_url("https://api.example.com", "invoices/42"), "https://api.example.com/invoices/42");
        assert_eq!(join_url("https://api.example.com/v1/", "/login"), "https://api.example.com/v1/login");
        assert_eq!(join_url("", "login"), "login");
    }
}
