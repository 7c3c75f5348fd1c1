//! Degree type inference from page and header titles.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Award type of a degree program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegreeType {
    Bachelor,
    Associate,
    Certificate,
    Minor,
    Master,
    DualBachelor,
    CombinedBm,
    Doctorate,
    GenEd,
}

impl DegreeType {
    /// String value for output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bachelor => "bachelor",
            Self::Associate => "associate",
            Self::Certificate => "certificate",
            Self::Minor => "minor",
            Self::Master => "master",
            Self::DualBachelor => "dual bachelor",
            Self::CombinedBm => "combined B&M",
            Self::Doctorate => "doctorate",
            Self::GenEd => "geneds",
        }
    }
}

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BACHELOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(bachelor|major in|BA|BS|BM|BFA|BSN|BBA|BAS|BSME|BSRS|BSW|BME)\b")
        .expect("valid regex")
});

#[allow(clippy::expect_used)]
static ASSOCIATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(associates?|AAS|AA|AS)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static CERTIFICATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(certificate|PCT)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static MINOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bminor\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static MASTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(masters?|MS|ME|MA|MAED|MSN|MPAS|MBA)\b").expect("valid regex")
});

#[allow(clippy::expect_used)]
static DUAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdual degree\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static COMBINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b3\+2 ").expect("valid regex"));

#[allow(clippy::expect_used)]
static DOCTORATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(p\.?h\.?d\.?|doctor(ate)?)\b").expect("valid regex"));

impl DegreeType {
    /// Infer the degree type from a degree or header title.
    ///
    /// Most specific patterns win: a "3+2" program is combined even though
    /// its title also names both degrees.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        if title == "GENEDS" {
            return Some(Self::GenEd);
        }
        if COMBINED_RE.is_match(title) {
            return Some(Self::CombinedBm);
        }
        if DUAL_RE.is_match(title) {
            return Some(Self::DualBachelor);
        }
        if DOCTORATE_RE.is_match(title) {
            return Some(Self::Doctorate);
        }
        if MINOR_RE.is_match(title) {
            return Some(Self::Minor);
        }
        if CERTIFICATE_RE.is_match(title) {
            return Some(Self::Certificate);
        }
        if MASTER_RE.is_match(title) {
            return Some(Self::Master);
        }
        if ASSOCIATE_RE.is_match(title) {
            return Some(Self::Associate);
        }
        if BACHELOR_RE.is_match(title) {
            return Some(Self::Bachelor);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_title_bachelor() {
        assert_eq!(
            DegreeType::from_title("Biology, BS"),
            Some(DegreeType::Bachelor)
        );
        assert_eq!(
            DegreeType::from_title("Bachelor of Fine Arts in Theatre"),
            Some(DegreeType::Bachelor)
        );
    }

    #[test]
    fn test_from_title_minor_beats_bachelor() {
        // "Minor" pages often still mention the parent BS program.
        assert_eq!(
            DegreeType::from_title("Chemistry Minor (BS students)"),
            Some(DegreeType::Minor)
        );
    }

    #[test]
    fn test_from_title_other_kinds() {
        assert_eq!(
            DegreeType::from_title("Welding Technology, AAS"),
            Some(DegreeType::Associate)
        );
        assert_eq!(
            DegreeType::from_title("Accounting, MBA"),
            Some(DegreeType::Master)
        );
        assert_eq!(
            DegreeType::from_title("Phlebotomy Certificate"),
            Some(DegreeType::Certificate)
        );
        assert_eq!(
            DegreeType::from_title("3+2 Engineering Program"),
            Some(DegreeType::CombinedBm)
        );
        assert_eq!(
            DegreeType::from_title("History, Ph.D."),
            Some(DegreeType::Doctorate)
        );
        assert_eq!(DegreeType::from_title("GENEDS"), Some(DegreeType::GenEd));
    }

    #[test]
    fn test_from_title_unknown() {
        assert_eq!(DegreeType::from_title("Exploratory Studies"), None);
    }
}
