//! Engine configuration and tunable thresholds.
//!
//! Course-code shapes and matching cutoffs differ per catalog vendor and
//! school, so they are configuration rather than constants. The defaults
//! cover the common "ABCD 1234"-style codes.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Default department prefix pattern.
pub const DEFAULT_DEPT_PATTERN: &str = "[A-Z]{2,4}";

/// Default course number pattern.
pub const DEFAULT_NUM_PATTERN: &str = "[0-9]{2,4}[A-Z]?";

/// Default similarity cutoff (0-100) for elective-table title matching.
pub const DEFAULT_SIMILARITY_CUTOFF: u8 = 70;

/// Default stand-in maximum for "credits vary" rows. A semester system
/// bachelor's tops out around 120, which bounds what "varies" could mean.
pub const DEFAULT_VARIES_MAX_CREDITS: f64 = 120.0;

/// Tunable engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Regex for the department part of a course code.
    pub dept_pattern: String,

    /// Regex for the number part of a course code.
    pub num_pattern: String,

    /// Similarity score (0-100) an elective-table title must reach to be
    /// linked to a requirement row. Empirically chosen per catalog vendor.
    pub similarity_cutoff: u8,

    /// Upper bound substituted for "credits vary" during summation.
    pub varies_max_credits: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dept_pattern: DEFAULT_DEPT_PATTERN.to_string(),
            num_pattern: DEFAULT_NUM_PATTERN.to_string(),
            similarity_cutoff: DEFAULT_SIMILARITY_CUTOFF,
            varies_max_credits: DEFAULT_VARIES_MAX_CREDITS,
        }
    }
}

impl EngineConfig {
    /// Compile the course-code patterns.
    pub fn compile(&self) -> Result<CoursePatterns> {
        CoursePatterns::compile(&self.dept_pattern, &self.num_pattern)
    }
}

/// Compiled course-code recognizers for one catalog.
///
/// The `*_at` variants are anchored at the start of their input; the label
/// tokenizer advances through a string by matching them against the tail.
#[derive(Debug, Clone)]
pub struct CoursePatterns {
    /// Full course code: department, optional space/hyphen, number.
    pub course: Regex,
    /// Department prefix alone.
    pub dept: Regex,
    /// Course number alone.
    pub number: Regex,
    pub course_at: Regex,
    pub dept_at: Regex,
    pub number_at: Regex,
}

impl CoursePatterns {
    /// Compile recognizers from the raw pattern fragments.
    pub fn compile(dept_pattern: &str, num_pattern: &str) -> Result<Self> {
        let compile_one = |src: String| {
            Regex::new(&src).map_err(|source| EngineError::InvalidPattern {
                pattern: src.clone(),
                source: Box::new(source),
            })
        };

        let course_body = format!(r"(?P<dept>{dept_pattern}) ?-? ?(?P<num>{num_pattern})\b");
        let dept_body = format!(r"(?P<dept>{dept_pattern})\b");
        let num_body = format!(r"(?P<num>{num_pattern})\b");

        Ok(Self {
            course: compile_one(format!(r"\b{course_body}"))?,
            dept: compile_one(format!(r"\b{dept_body}"))?,
            number: compile_one(format!(r"\b{num_body}"))?,
            course_at: compile_one(format!(r"^{course_body}"))?,
            dept_at: compile_one(format!(r"^{dept_body}"))?,
            number_at: compile_one(format!(r"^{num_body}"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_compiles() {
        let config = EngineConfig::default();
        let patterns = config.compile().unwrap();
        let caps = patterns.course.captures("BIO 101").unwrap();
        assert_eq!(&caps["dept"], "BIO");
        assert_eq!(&caps["num"], "101");
    }

    #[test]
    fn test_course_pattern_variants() {
        let patterns = EngineConfig::default().compile().unwrap();
        for text in ["CHEM107", "CHEM 107", "CHEM-107", "CHEM - 107"] {
            let caps = patterns.course.captures(text).unwrap();
            assert_eq!(&caps["dept"], "CHEM", "failed on {text}");
            assert_eq!(&caps["num"], "107", "failed on {text}");
        }
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let config = EngineConfig {
            dept_pattern: "[A-".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.compile(),
            Err(EngineError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"similarity_cutoff": 85}"#).unwrap();
        assert_eq!(config.similarity_cutoff, 85);
        assert_eq!(config.dept_pattern, DEFAULT_DEPT_PATTERN);
    }
}
