use core::fmt;
use core::str::FromStr;

use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    static ref ADDRESS: Regex = Regex::new("^0x[a-fA-F0-9]{40}$").unwrap();
}

/// A 20-byte account address in its `0x`-prefixed hexadecimal text form.
///
/// The original spelling (including checksum casing) is preserved, since it is emitted verbatim
/// into generated source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(text: &str) -> bool {
        ADDRESS.is_match(text)
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err("invalid address format, expected 0x followed by 40 hex digits")
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
