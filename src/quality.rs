/**
Phred decoding and the mean-quality score reads are ranked by
**/

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TopqError};

/// ASCII offset the quality line was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhredEncoding {
    /// Phred+33 (Sanger, Illumina 1.8+)
    #[default]
    Sanger,
    /// Phred+64 (Illumina 1.3 - 1.7)
    Illumina13,
}

impl PhredEncoding {
    pub fn offset(&self) -> u8 {
        match self {
            PhredEncoding::Sanger => 33,
            PhredEncoding::Illumina13 => 64,
        }
    }
}

impl FromStr for PhredEncoding {
    type Err = TopqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "33" | "sanger" | "phred33" => Ok(PhredEncoding::Sanger),
            "64" | "illumina" | "phred64" => Ok(PhredEncoding::Illumina13),
            other => Err(TopqError::Config(format!(
                "unknown quality encoding '{}' (expected 33 or 64)",
                other
            ))),
        }
    }
}

impl fmt::Display for PhredEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Phred+{}", self.offset())
    }
}

/// Turns an ASCII quality line into integer Phred scores.
pub fn decode_phred(encoded: &[u8], encoding: PhredEncoding) -> Result<Vec<u8>> {
    let offset = encoding.offset();
    encoded
        .iter()
        .map(|&b| {
            b.checked_sub(offset).ok_or(TopqError::InvalidQuality {
                found: b as char,
                offset,
            })
        })
        .collect()
}

/// Arithmetic mean of `scores`; an empty slice scores 0.
pub fn average_quality(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u64 = scores.iter().map(|&q| q as u64).sum();
    total as f64 / scores.len() as f64
}
