//! Extraction intake: the contract with the upstream table extractor.
//!
//! The extractor (a separate scraping job) emits one JSON file per school
//! holding every degree page's tables, and one JSON file listing the known
//! course codes. This module loads and validates both; nothing here
//! touches the network.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use coursemap_engine::{CourseCatalog, RawTable};

use crate::error::{OrganizerError, Result};

/// One degree/track page as extracted from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreePage {
    /// Page title, used as the degree name.
    pub degree: String,

    /// Link to the page, for verifying serialized codes by hand.
    #[serde(default)]
    pub link: String,

    pub tables: Vec<RawTable>,
}

/// A whole school's extracted tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub school: String,

    /// Catalog year the pages were scraped from (e.g. "2025-2026").
    #[serde(default)]
    pub catalog_year: Option<String>,

    pub pages: Vec<DegreePage>,
}

/// Load and validate an extraction file.
///
/// Table ids must be unique across the whole file; serialized codes
/// reference them globally.
pub fn load_extraction(path: &Path) -> Result<Extraction> {
    let text = std::fs::read_to_string(path)?;
    let extraction: Extraction = serde_json::from_str(&text)?;

    if extraction.pages.is_empty() {
        return Err(OrganizerError::InvalidInput(format!(
            "{} contains no degree pages",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for page in &extraction.pages {
        for table in &page.tables {
            if !seen.insert(table.table_id) {
                return Err(OrganizerError::InvalidInput(format!(
                    "duplicate table id {} (degree '{}')",
                    table.table_id, page.degree
                )));
            }
        }
    }

    Ok(extraction)
}

/// Load the known-course catalog, or an empty one when no path is given.
///
/// Without a catalog, wildcard requirements ("MAT 3XX") stay unresolved
/// and are reported in the coverage statistics.
pub fn load_catalog(path: Option<&Path>) -> Result<CourseCatalog> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => {
            tracing::warn!("No course catalog given; wildcard requirements will stay unresolved");
            Ok(CourseCatalog::default())
        }
    }
}
