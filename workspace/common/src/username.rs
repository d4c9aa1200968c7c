//! Normalized member usernames.
//!
//! A username is the card number of a member left-padded with zeros to a
//! fixed width. It is stored as `user_user.username` and `pos_client.dni`
//! and is the key every lookup uses.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Width every username is padded to.
pub const USERNAME_WIDTH: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The card number is empty, contains a non-digit or does not fit
    /// into [`USERNAME_WIDTH`] characters.
    #[error("invalid identifier '{0}': CardNo must contain 1 to 10 digits only")]
    InvalidIdentifier(String),
}

/// Ten ASCII digits, zero-padded on the left.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Normalizes a raw card number.
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        if raw.is_empty()
            || raw.len() > USERNAME_WIDTH
            || !raw.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(UsernameError::InvalidIdentifier(raw.to_string()));
        }

        Ok(Self(format!("{:0>width$}", raw, width = USERNAME_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
