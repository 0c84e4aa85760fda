use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LrgaspError;

static FILE_ACC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ENCFF[0-9]{3}[A-Z]{3}$").expect("file accession regex"));

/// Challenge track an entry is submitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Challenge {
    IsoDetectRef,
    IsoQuant,
    IsoDetectDeNovo,
}

impl Challenge {
    pub const ALL: [Challenge; 3] = [
        Challenge::IsoDetectRef,
        Challenge::IsoQuant,
        Challenge::IsoDetectDeNovo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Challenge::IsoDetectRef => "iso_detect_ref",
            Challenge::IsoQuant => "iso_quant",
            Challenge::IsoDetectDeNovo => "iso_detect_de_novo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DataCategory {
    LongOnly,
    ShortOnly,
    LongShort,
    Freestyle,
}

impl DataCategory {
    pub const ALL: [DataCategory; 4] = [
        DataCategory::LongOnly,
        DataCategory::ShortOnly,
        DataCategory::LongShort,
        DataCategory::Freestyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::LongOnly => "long_only",
            DataCategory::ShortOnly => "short_only",
            DataCategory::LongShort => "long_short",
            DataCategory::Freestyle => "freestyle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
    PacBio,
    #[serde(rename = "ONT")]
    Ont,
    Illumina,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::PacBio, Platform::Ont, Platform::Illumina];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::PacBio => "PacBio",
            Platform::Ont => "ONT",
            Platform::Illumina => "Illumina",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LibraryPrep {
    #[serde(rename = "CapTrap")]
    CapTrap,
    #[serde(rename = "R2C2")]
    R2c2,
    #[serde(rename = "dRNA")]
    DRna,
    #[serde(rename = "cDNA")]
    CDna,
}

impl LibraryPrep {
    pub const ALL: [LibraryPrep; 4] = [
        LibraryPrep::CapTrap,
        LibraryPrep::R2c2,
        LibraryPrep::DRna,
        LibraryPrep::CDna,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryPrep::CapTrap => "CapTrap",
            LibraryPrep::R2c2 => "R2C2",
            LibraryPrep::DRna => "dRNA",
            LibraryPrep::CDna => "cDNA",
        }
    }
}

/// Biological sample a sequencing run was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Sample {
    #[serde(rename = "WTC11")]
    Wtc11,
    #[serde(rename = "H1_mix")]
    H1Mix,
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "H1")]
    H1,
    #[serde(rename = "endodermal")]
    Endodermal,
    #[serde(rename = "blood")]
    Blood,
}

impl Sample {
    pub const ALL: [Sample; 6] = [
        Sample::Wtc11,
        Sample::H1Mix,
        Sample::Es,
        Sample::H1,
        Sample::Endodermal,
        Sample::Blood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sample::Wtc11 => "WTC11",
            Sample::H1Mix => "H1_mix",
            Sample::Es => "ES",
            Sample::H1 => "H1",
            Sample::Endodermal => "endodermal",
            Sample::Blood => "blood",
        }
    }
}

/// Kind of data files an experiment produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentType {
    Model,
    Expression,
}

macro_rules! symbol_text {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = LrgaspError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|sym| sym.as_str() == trimmed)
                    .ok_or_else(|| LrgaspError::InvalidSymbol {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = LrgaspError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

symbol_text!(Challenge, "challenge");
symbol_text!(DataCategory, "data category");
symbol_text!(Platform, "platform");
symbol_text!(LibraryPrep, "library prep");
symbol_text!(Sample, "sample");

/// ENCODE file accession naming a sequencing library, e.g. `ENCFF023EXJ`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileAccession(String);

impl FileAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileAccession {
    type Err = LrgaspError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        if !FILE_ACC_RE.is_match(&normalized) {
            return Err(LrgaspError::InvalidAccession(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for FileAccession {
    type Error = LrgaspError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileAccession> for String {
    fn from(value: FileAccession) -> Self {
        value.0
    }
}

/// Render a set as a sorted, comma-separated listing for error messages.
pub fn set_to_str<T: fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    let sorted = values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<BTreeSet<_>>();
    sorted.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_file_accession_valid() {
        let acc: FileAccession = " ENCFF023EXJ ".parse().unwrap();
        assert_eq!(acc.as_str(), "ENCFF023EXJ");
    }

    #[test]
    fn parse_file_accession_invalid() {
        let err = "SRR014966".parse::<FileAccession>().unwrap_err();
        assert_matches!(err, LrgaspError::InvalidAccession(_));
    }

    #[test]
    fn symbols_round_trip_through_text() {
        for challenge in Challenge::ALL {
            assert_eq!(challenge.to_string().parse::<Challenge>().unwrap(), challenge);
        }
        assert_eq!("ONT".parse::<Platform>().unwrap(), Platform::Ont);
        assert_eq!("dRNA".parse::<LibraryPrep>().unwrap(), LibraryPrep::DRna);
        assert_matches!(
            "iso_detect".parse::<Challenge>(),
            Err(LrgaspError::InvalidSymbol { kind: "challenge", .. })
        );
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&Sample::H1Mix).unwrap();
        assert_eq!(json, "\"H1_mix\"");
        let category: DataCategory = serde_json::from_str("\"long_short\"").unwrap();
        assert_eq!(category, DataCategory::LongShort);
        let err = serde_json::from_str::<Platform>("\"Nanopore\"").unwrap_err();
        assert!(err.to_string().contains("invalid platform identifier: Nanopore"));
    }

    #[test]
    fn set_to_str_is_sorted() {
        let listing = set_to_str([Sample::Wtc11, Sample::Es, Sample::H1Mix]);
        assert_eq!(listing, "ES, H1_mix, WTC11");
    }
}
