//! Path syntax of the content namespace.
//!
//! Every category and article is addressed by an absolute, slash-delimited
//! path. The root category is `/`; every other path is `/` followed by one
//! or more non-empty components joined by `/`. Components name categories
//! (`directory_name`) except possibly the last, which may name an article
//! (`filename`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Path string of the root category.
pub const ROOT_PATH: &str = "/";

/// Path separator.
pub const SEPARATOR: char = '/';

/// Returns whether a directory name or filename token is well formed.
///
/// A token is valid iff it is non-empty and consists solely of ASCII word
/// characters (letters, digits, underscore). Anything that would need
/// URL-encoding, including non-ASCII letters and the separator, is rejected.
pub fn validate_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Like [`validate_token`], but fails with an `InvalidName` error.
pub fn ensure_valid_token(token: &str, what: &str) -> AppResult<()> {
    if validate_token(token) {
        Ok(())
    } else {
        Err(AppError::invalid_name(format!(
            "Invalid {what} '{token}': only ASCII letters, digits and underscores are allowed"
        )))
    }
}

/// Joins a parent path and a token without doubling the leading slash.
pub fn join_path(parent: &str, token: &str) -> String {
    if parent == ROOT_PATH {
        format!("{SEPARATOR}{token}")
    } else {
        format!("{parent}{SEPARATOR}{token}")
    }
}

/// A parsed absolute content path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ContentPath {
    components: Vec<String>,
}

impl ContentPath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a path string into its components.
    ///
    /// The input must start with `/`. `/` alone is the root (no components);
    /// any other input is split on `/` and may not contain empty components,
    /// so `//`, a trailing `/` and the empty string are all rejected.
    pub fn parse(path: &str) -> AppResult<Self> {
        let Some(rest) = path.strip_prefix(SEPARATOR) else {
            return Err(AppError::invalid_path(format!(
                "Paths must start with a leading slash: '{path}'"
            )));
        };

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let components: Vec<String> = rest.split(SEPARATOR).map(str::to_string).collect();
        if components.iter().any(String::is_empty) {
            return Err(AppError::invalid_path(format!(
                "Paths cannot contain empty components: '{path}'"
            )));
        }

        Ok(Self { components })
    }

    /// Builds a path from already-separated components.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// The ordered components, empty for the root.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Splits off the final component, returning the prefix and the last token.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(ContentPath, &str)> {
        let (last, prefix) = self.components.split_last()?;
        Some((
            Self {
                components: prefix.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// The final component, if any.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "{ROOT_PATH}");
        }
        for component in &self.components {
            write!(f, "{SEPARATOR}{component}")?;
        }
        Ok(())
    }
}

impl Serialize for ContentPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| serde::de::Error::custom(e.message))
    }
}

impl std::str::FromStr for ContentPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
