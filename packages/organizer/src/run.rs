//! Organizing run: drive the engine over every extracted degree page.
//!
//! Classification is independent per page and runs on the rayon pool;
//! cross-reference resolution shares one group registry (group tokens are
//! global to the run) and therefore goes page by page. A failed table
//! never blocks the rest of the run.

use rayon::prelude::*;

use coursemap_engine::{
    finish_tables, prepare_tables, CourseCatalog, CoverageStats, EngineConfig, GroupRegistry,
    SerializedTable,
};
use serde::Serialize;

use crate::error::Result;
use crate::intake::Extraction;

/// A per-table failure, stringified for the report.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub table_id: String,
    pub degree: String,
    pub error: String,
}

/// An exported registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRecord {
    /// Reference token used inside serialized codes (`_0003_`).
    pub id: String,
    pub name: String,
    pub courses: Vec<String>,
}

/// Everything an organizing run produced.
#[derive(Debug)]
pub struct Organized {
    pub school: String,
    pub catalog_year: Option<String>,
    pub degrees: Vec<SerializedTable>,
    pub groups: Vec<GroupRecord>,
    pub failures: Vec<FailureRecord>,
    pub stats: CoverageStats,
}

/// Organize a whole extraction.
pub fn organize_extraction(
    extraction: &Extraction,
    catalog: &CourseCatalog,
    config: &EngineConfig,
) -> Result<Organized> {
    // Pages are independent through classification.
    let prepared: Vec<_> = extraction
        .pages
        .par_iter()
        .map(|page| prepare_tables(&page.tables, config))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // Resolution shares the registry, so it runs page by page.
    let mut registry = GroupRegistry::new();
    let mut degrees = Vec::new();
    let mut failures = Vec::new();
    let mut stats = CoverageStats::default();

    for (page, (tables, page_failures)) in extraction.pages.iter().zip(prepared) {
        tracing::info!(degree = %page.degree, tables = tables.len(), "Organizing page");
        let mut page_failures = page_failures;
        let (serialized, page_stats) =
            finish_tables(tables, catalog, config, &mut registry, &mut page_failures)?;

        degrees.extend(serialized);
        stats.total_requirements += page_stats.total_requirements;
        stats.unknown += page_stats.unknown;
        failures.extend(page_failures.into_iter().map(|f| FailureRecord {
            table_id: f.table_id.to_string(),
            degree: f.degree,
            error: f.error.to_string(),
        }));
    }

    let groups = registry
        .iter()
        .map(|entry| GroupRecord {
            id: entry.id.to_token(),
            name: entry.name.clone(),
            courses: entry.courses.iter().map(|c| c.token()).collect(),
        })
        .collect();

    Ok(Organized {
        school: extraction.school.clone(),
        catalog_year: extraction.catalog_year.clone(),
        degrees,
        groups,
        failures,
        stats,
    })
}
