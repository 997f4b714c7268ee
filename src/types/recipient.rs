use std::{fmt, result, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{err, Error, ErrorKind};

/// The role a recipient plays on a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecipientType {
    To,
    Cc,
    Bcc,
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecipientType::To => "To",
            RecipientType::Cc => "Cc",
            RecipientType::Bcc => "Bcc",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for RecipientType {
    type Err = Error;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to" => Ok(RecipientType::To),
            "cc" => Ok(RecipientType::Cc),
            "bcc" => Ok(RecipientType::Bcc),
            _ => err!(ErrorKind::InvalidArgument, "Unknown recipient type: {}", s),
        }
    }
}

/// A resolved recipient: an optional display name, the address and an optional role.
///
/// Recipients are produced by the resolver in [`crate::parser`] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recipient {
    name: Option<String>,
    address: String,
    kind: Option<RecipientType>,
}

impl<N: Into<String>, A: Into<String>> From<(N, A)> for Recipient {
    fn from((name, address): (N, A)) -> Self {
        Self::new(Some(name.into()), address.into(), None)
    }
}

impl Recipient {
    pub fn new(name: Option<String>, address: String, kind: Option<RecipientType>) -> Self {
        Self {
            name,
            address,
            kind,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn kind(&self) -> Option<RecipientType> {
        self.kind
    }

    /// A copy of this recipient with a different role.
    pub fn with_kind(self, kind: Option<RecipientType>) -> Self {
        Self { kind, ..self }
    }

    /// The recipient as it would appear in a header, e.g. `Jane Doe <jane@example.com>`.
    pub fn full(&self) -> String {
        match self.name.as_ref() {
            Some(name) => format!("{} <{}>", name, self.address),
            None => self.address.to_string(),
        }
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}
