use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Protocol versions the harness knows how to decode and process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForkName {
    Phase0,
    Altair,
}

impl ForkName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phase0 => "phase0",
            Self::Altair => "altair",
        }
    }
}

impl fmt::Display for ForkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown fork name: {0}")]
pub struct UnknownFork(pub String);

impl FromStr for ForkName {
    type Err = UnknownFork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phase0" => Ok(Self::Phase0),
            "altair" => Ok(Self::Altair),
            _ => Err(UnknownFork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_tags() {
        assert_eq!("PHASE0".parse::<ForkName>(), Ok(ForkName::Phase0));
        assert_eq!("altair".parse::<ForkName>(), Ok(ForkName::Altair));
        assert_eq!(
            "BELLATRIX".parse::<ForkName>(),
            Err(UnknownFork("BELLATRIX".to_string()))
        );
    }

    #[test]
    fn unknown_fork_names_the_tag() {
        let error = "capella".parse::<ForkName>().unwrap_err();
        assert_eq!(error.to_string(), "unknown fork name: capella");
    }

    #[test]
    fn display_round_trips() {
        for fork in [ForkName::Phase0, ForkName::Altair] {
            assert_eq!(fork.to_string().parse::<ForkName>(), Ok(fork));
        }
    }
}
