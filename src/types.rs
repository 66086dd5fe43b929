//! Closed categorical types used throughout m6apred
//!
//! Every categorical field of a feature record has a fixed set of levels.
//! Parsing is case-sensitive and any value outside the declared set is rejected
//! with [`PredictError::UnrecognizedCategory`] instead of being mapped to a
//! missing level.
//!
//! # Examples
//!
//! ```
//! use m6apred::types::{Nucleotide, RnaRegion, RnaType};
//! use std::str::FromStr;
//!
//! assert_eq!(RnaType::from_str("lincRNA")?, RnaType::LincRna);
//! assert_eq!(RnaRegion::from_str("3'UTR")?, RnaRegion::ThreePrimeUtr);
//! assert_eq!(Nucleotide::try_from('G')?, Nucleotide::G);
//! assert!(RnaType::from_str("snoRNA").is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column name of the transcript biotype field
pub const RNA_TYPE: &str = "RNA_type";
/// Column name of the transcript region field
pub const RNA_REGION: &str = "RNA_region";
/// Column name of the DNA sequence field
pub const DNA_5MER: &str = "DNA_5mer";

fn unrecognized(field: &str, value: &str) -> PredictError {
    tracing::warn!(field, value, "rejecting value outside declared levels");
    PredictError::UnrecognizedCategory {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// A single DNA nucleotide
///
/// Levels are declared in the order A, T, C, G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nucleotide {
    /// Adenine
    A,
    /// Thymine
    T,
    /// Cytosine
    C,
    /// Guanine
    G,
}

impl Nucleotide {
    /// All levels in declaration order
    pub const LEVELS: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::T, Nucleotide::C, Nucleotide::G];

    /// Character representation
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::T => 'T',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
        }
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = PredictError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'A' => Ok(Nucleotide::A),
            'T' => Ok(Nucleotide::T),
            'C' => Ok(Nucleotide::C),
            'G' => Ok(Nucleotide::G),
            other => Err(unrecognized(DNA_5MER, &other.to_string())),
        }
    }
}

impl FromStr for Nucleotide {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Nucleotide::try_from(c),
            _ => Err(unrecognized(DNA_5MER, s)),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Transcript biotype of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RnaType {
    /// Protein-coding transcript (`mRNA`)
    #[serde(rename = "mRNA")]
    MRna,
    /// Long intergenic non-coding RNA (`lincRNA`)
    #[serde(rename = "lincRNA")]
    LincRna,
    /// Long non-coding RNA (`lncRNA`)
    #[serde(rename = "lncRNA")]
    LncRna,
    /// Pseudogene transcript (`pseudogene`)
    #[serde(rename = "pseudogene")]
    Pseudogene,
}

impl RnaType {
    /// All levels in declaration order
    pub const LEVELS: [RnaType; 4] = [
        RnaType::MRna,
        RnaType::LincRna,
        RnaType::LncRna,
        RnaType::Pseudogene,
    ];

    /// Level label as it appears in sample tables
    pub fn as_str(self) -> &'static str {
        match self {
            RnaType::MRna => "mRNA",
            RnaType::LincRna => "lincRNA",
            RnaType::LncRna => "lncRNA",
            RnaType::Pseudogene => "pseudogene",
        }
    }
}

impl FromStr for RnaType {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        RnaType::LEVELS
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| unrecognized(RNA_TYPE, s))
    }
}

impl fmt::Display for RnaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transcript region containing the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RnaRegion {
    /// Coding sequence (`CDS`)
    #[serde(rename = "CDS")]
    Cds,
    /// Intron (`intron`)
    #[serde(rename = "intron")]
    Intron,
    /// 3' untranslated region (`3'UTR`)
    #[serde(rename = "3'UTR")]
    ThreePrimeUtr,
    /// 5' untranslated region (`5'UTR`)
    #[serde(rename = "5'UTR")]
    FivePrimeUtr,
}

impl RnaRegion {
    /// All levels in declaration order
    pub const LEVELS: [RnaRegion; 4] = [
        RnaRegion::Cds,
        RnaRegion::Intron,
        RnaRegion::ThreePrimeUtr,
        RnaRegion::FivePrimeUtr,
    ];

    /// Level label as it appears in sample tables
    pub fn as_str(self) -> &'static str {
        match self {
            RnaRegion::Cds => "CDS",
            RnaRegion::Intron => "intron",
            RnaRegion::ThreePrimeUtr => "3'UTR",
            RnaRegion::FivePrimeUtr => "5'UTR",
        }
    }
}

impl FromStr for RnaRegion {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        RnaRegion::LEVELS
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| unrecognized(RNA_REGION, s))
    }
}

impl fmt::Display for RnaRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholded m6A call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum M6aStatus {
    /// Probability strictly above the threshold
    Positive,
    /// Probability at or below the threshold
    #[default]
    Negative,
}

impl M6aStatus {
    /// Label used in result tables
    pub fn as_str(self) -> &'static str {
        match self {
            M6aStatus::Positive => "Positive",
            M6aStatus::Negative => "Negative",
        }
    }

    /// `Positive` iff `probability > threshold`
    ///
    /// ```
    /// use m6apred::types::M6aStatus;
    ///
    /// assert_eq!(M6aStatus::from_probability(0.5, 0.5), M6aStatus::Negative);
    /// assert_eq!(M6aStatus::from_probability(0.500001, 0.5), M6aStatus::Positive);
    /// ```
    #[inline]
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability > threshold {
            M6aStatus::Positive
        } else {
            M6aStatus::Negative
        }
    }
}

impl FromStr for M6aStatus {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Positive" => Ok(M6aStatus::Positive),
            "Negative" => Ok(M6aStatus::Negative),
            _ => Err(unrecognized("predicted_m6A_status", s)),
        }
    }
}

impl fmt::Display for M6aStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
