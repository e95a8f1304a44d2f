/// Contains the representation of a UW group ID. Group IDs live in the `u_` and `uw_` namespaces of
/// the Groups Web Service and may only contain lowercase alphanumerics, underscores and hyphens
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static GROUP_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^uw?_[a-z0-9_-]*$").expect("group ID pattern is a valid regex"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid group ID {0:?}: must start with u_ or uw_ followed by lowercase letters, digits, _ or -")]
    InvalidGroupId(String),
}

type Result<T> = std::result::Result<T, ParseError>;

/// Checks the given string against the group ID rules, returning it unchanged if it is valid. The
/// pattern must cover the whole input, so a trailing newline or whitespace is rejected
pub fn validate(id: &str) -> Result<&str> {
    if GROUP_ID_PATTERN.is_match(id) {
        Ok(id)
    } else {
        Err(ParseError::InvalidGroupId(id.to_owned()))
    }
}

/// A validated group ID. Examples of valid IDs include:
/// `uw_testgroup`
/// `u_netid_project-admins`
/// `u_`
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for GroupId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        validate(s).map(|id| GroupId(id.to_owned()))
    }
}

impl TryFrom<String> for GroupId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self> {
        validate(&value)?;
        Ok(GroupId(value))
    }
}

impl TryFrom<&str> for GroupId {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}
