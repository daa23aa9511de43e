use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Which agent produced an event. Fixed per agent, never derived from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    Browser,
    Obsidian,
    VSCode,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Browser, Source::Obsidian, Source::VSCode];

    /// Tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Browser => "Browser",
            Source::Obsidian => "Obsidian",
            Source::VSCode => "VSCode",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown source '{0}' (expected Browser, Obsidian or VSCode)")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_are_fixed() {
        assert_eq!(Source::Browser.to_string(), "Browser");
        assert_eq!(Source::Obsidian.to_string(), "Obsidian");
        assert_eq!(Source::VSCode.to_string(), "VSCode");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("vscode".parse::<Source>().unwrap(), Source::VSCode);
        assert_eq!(" BROWSER ".parse::<Source>().unwrap(), Source::Browser);
        assert!("emacs".parse::<Source>().is_err());
    }
}
