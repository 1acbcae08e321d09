//! xAPI protocol versions.
//!
//! Every request carries the negotiated version in the
//! `X-Experience-API-Version` header, and statements may echo it back in
//! their top-level `version` field.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// A supported revision of the xAPI specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
  #[default]
  V103,
  V102,
  V101,
  V100,
}

impl Version {
  /// The most recent revision this crate speaks.
  pub fn latest() -> Self {
    Self::V103
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::V103 => "1.0.3",
      Self::V102 => "1.0.2",
      Self::V101 => "1.0.1",
      Self::V100 => "1.0.0",
    }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Version {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "1.0.3" => Ok(Self::V103),
      "1.0.2" => Ok(Self::V102),
      "1.0.1" => Ok(Self::V101),
      "1.0.0" => Ok(Self::V100),
      other => Err(Error::UnknownVersion(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_and_parse_round_trip() {
    for v in [Version::V100, Version::V101, Version::V102, Version::V103] {
      assert_eq!(v.to_string().parse::<Version>().unwrap(), v);
    }
  }

  #[test]
  fn unknown_version_is_an_error() {
    let r = "2.0.0".parse::<Version>();
    assert!(matches!(r, Err(Error::UnknownVersion(_))));
  }

  #[test]
  fn latest_is_103() {
    assert_eq!(Version::latest().as_str(), "1.0.3");
  }
}
