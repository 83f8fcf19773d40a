//! Cipher profiles: which characters are enciphered and in which radix

use crate::domain::AnonymizeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const ALPHANUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMERIC: &str = "0123456789";

/// Character domain used by format-preserving encryption
///
/// Characters outside the domain are never touched; every maximal run of
/// domain characters is enciphered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherProfile {
    /// Digits, lower-case and upper-case ASCII letters (radix 62)
    #[default]
    Alphanumeric,
    /// ASCII digits only (radix 10)
    Numeric,
}

impl CipherProfile {
    /// Radix of the numeral strings
    pub fn radix(&self) -> u32 {
        self.alphabet().len() as u32
    }

    /// Ordered alphabet; a character's index is its numeral value
    pub fn alphabet(&self) -> &'static str {
        match self {
            Self::Alphanumeric => ALPHANUMERIC,
            Self::Numeric => NUMERIC,
        }
    }

    /// Pattern matching maximal runs of enciphered characters
    pub fn runs(&self) -> &'static Regex {
        static ALPHANUMERIC_RUNS: OnceLock<Regex> = OnceLock::new();
        static NUMERIC_RUNS: OnceLock<Regex> = OnceLock::new();

        match self {
            Self::Alphanumeric => ALPHANUMERIC_RUNS
                .get_or_init(|| Regex::new("[A-Za-z0-9]+").expect("static pattern")),
            Self::Numeric => {
                NUMERIC_RUNS.get_or_init(|| Regex::new("[0-9]+").expect("static pattern"))
            }
        }
    }

    /// Map a run of domain characters to numerals
    pub fn to_numerals(&self, run: &str) -> Result<Vec<u8>, AnonymizeError> {
        let alphabet = self.alphabet().as_bytes();
        run.chars()
            .map(|c| {
                u8::try_from(c)
                    .ok()
                    .and_then(|b| alphabet.iter().position(|&a| a == b))
                    .map(|index| index as u8)
                    .ok_or_else(|| {
                        AnonymizeError::InvalidCipherInput(format!(
                            "character outside the {self} alphabet"
                        ))
                    })
            })
            .collect()
    }

    /// Map numerals back to characters
    pub fn from_numerals(&self, numerals: &[u8]) -> Result<String, AnonymizeError> {
        let alphabet = self.alphabet().as_bytes();
        numerals
            .iter()
            .map(|&n| {
                alphabet.get(usize::from(n)).map(|&b| char::from(b)).ok_or_else(|| {
                    AnonymizeError::InvalidCipherInput(format!(
                        "numeral {n} outside the {self} alphabet"
                    ))
                })
            })
            .collect()
    }
}

impl fmt::Display for CipherProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alphanumeric => write!(f, "alphanumeric"),
            Self::Numeric => write!(f, "numeric"),
        }
    }
}

impl FromStr for CipherProfile {
    type Err = AnonymizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alphanumeric" => Ok(Self::Alphanumeric),
            "numeric" => Ok(Self::Numeric),
            other => Err(AnonymizeError::InvalidCipherInput(format!(
                "unknown cipher profile '{other}'"
            ))),
        }
    }
}
