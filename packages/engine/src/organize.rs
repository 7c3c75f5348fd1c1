//! Pipeline orchestration for one degree page.
//!
//! Stages run strictly in sequence per table (each needs the previous
//! stage's full output), then cross-references resolve across the page's
//! tables, then each table collapses independently. A structural error is
//! terminal for its table only; every other table still emits.

use crate::code::Expr;
use crate::collapse::{collapse_table, serialize_table, SerializedTable};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::registry::{CourseCatalog, GroupRegistry};
use crate::types::{RawTable, Table, TableId};

/// A table that could not be processed, with enough context to correct the
/// upstream extraction.
#[derive(Debug)]
pub struct TableFailure {
    pub table_id: TableId,
    pub degree: String,
    pub error: EngineError,
}

/// How much of the page's requirements parsed into codes.
///
/// Unresolved rows are surfaced as a count, never silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageStats {
    /// Non-header requirement rows seen before collapsing.
    pub total_requirements: usize,
    /// Rows still holding free text after every resolution stage.
    pub unknown: usize,
}

impl CoverageStats {
    /// Fraction of requirements left unresolved (0 when nothing was seen).
    #[must_use]
    pub fn unknown_ratio(&self) -> f64 {
        if self.total_requirements == 0 {
            0.0
        } else {
            self.unknown as f64 / self.total_requirements as f64
        }
    }
}

/// Output of organizing one degree page.
#[derive(Debug)]
pub struct PageResult {
    pub tables: Vec<SerializedTable>,
    pub registry: GroupRegistry,
    pub failures: Vec<TableFailure>,
    pub stats: CoverageStats,
}

fn count_coverage(tables: &[Table]) -> CoverageStats {
    let mut stats = CoverageStats::default();
    for table in tables {
        for row in &table.rows {
            if row.header_level.is_some() {
                continue;
            }
            stats.total_requirements += 1;
            if matches!(row.code.expr, Expr::Unparsed(_)) {
                stats.unknown += 1;
            }
        }
    }
    stats
}

/// Run the per-table classification stages (normalize, classify, group
/// resolution, credit validation) for one page.
///
/// Pages are independent of one another, so callers batching many pages
/// may run this phase concurrently.
///
/// # Errors
/// Fails only on configuration problems (invalid course-code patterns);
/// tables that cannot be normalized land in the failure list.
pub fn prepare_tables(
    raw_tables: &[RawTable],
    config: &EngineConfig,
) -> Result<(Vec<Table>, Vec<TableFailure>)> {
    let patterns = config.compile()?;
    let mut tables = Vec::new();
    let mut failures = Vec::new();

    for raw in raw_tables {
        match crate::normalize::normalize_table(raw, &patterns) {
            Ok(table) => {
                let table = crate::classify::classify_table(table);
                let table = crate::groups::resolve_groups(table);
                let table = crate::credits::validate_credits(table, config);
                tables.push(table);
            }
            Err(error) => {
                tracing::warn!(
                    table_id = %raw.table_id,
                    degree = %raw.degree,
                    %error,
                    "Table dropped during normalization"
                );
                failures.push(TableFailure {
                    table_id: raw.table_id,
                    degree: raw.degree.clone(),
                    error,
                });
            }
        }
    }

    Ok((tables, failures))
}

/// Resolve, collapse, and serialize prepared tables against a shared
/// registry. Sequential counterpart to [`prepare_tables`].
pub fn finish_tables(
    tables: Vec<Table>,
    catalog: &CourseCatalog,
    config: &EngineConfig,
    registry: &mut GroupRegistry,
    failures: &mut Vec<TableFailure>,
) -> Result<(Vec<SerializedTable>, CoverageStats)> {
    let tables = crate::resolve::resolve_references(tables, catalog, config, registry)?;
    let stats = count_coverage(&tables);

    let mut serialized = Vec::new();
    for table in tables {
        let table_id = table.table_id;
        let degree = table.degree.clone();
        match collapse_table(table) {
            Ok(collapsed) => serialized.push(serialize_table(&collapsed)),
            Err(error) => {
                tracing::warn!(%table_id, %degree, %error, "Table failed to collapse");
                failures.push(TableFailure {
                    table_id,
                    degree,
                    error,
                });
            }
        }
    }

    Ok((serialized, stats))
}

/// Organize one degree page: classify, resolve, and collapse its tables.
///
/// # Errors
/// Fails only on configuration problems (invalid course-code patterns);
/// per-table structural errors are returned inside [`PageResult`].
pub fn organize_page(
    raw_tables: &[RawTable],
    catalog: &CourseCatalog,
    config: &EngineConfig,
) -> Result<PageResult> {
    let (tables, mut failures) = prepare_tables(raw_tables, config)?;
    let mut registry = GroupRegistry::new();
    let (serialized, stats) =
        finish_tables(tables, catalog, config, &mut registry, &mut failures)?;

    Ok(PageResult {
        tables: serialized,
        registry,
        failures,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawRow, TableClass};
    use pretty_assertions::assert_eq;

    fn raw_row(label: &str, credits: &str) -> RawRow {
        RawRow {
            label: label.to_string(),
            title: String::new(),
            credits: credits.to_string(),
            semantic_class: None,
            indent_px: 0,
            is_table_header: false,
            superscripts: Vec::new(),
            fragment_link: None,
        }
    }

    fn raw_table(id: u32, rows: Vec<RawRow>) -> RawTable {
        RawTable {
            table_id: TableId(id),
            degree: "Biology, BS".to_string(),
            header_text: "Biology, BS".to_string(),
            table_class: TableClass::CourseList,
            source_link: String::new(),
            rows,
        }
    }

    #[test]
    fn test_organize_page_end_to_end() {
        let tables = vec![raw_table(
            1,
            vec![
                raw_row("BIO 101", "4"),
                raw_row("BIO 102", "4"),
                raw_row("Total Credits", "8"),
            ],
        )];
        let catalog = CourseCatalog::default();
        let result = organize_page(&tables, &catalog, &EngineConfig::default()).unwrap();

        assert_eq!(result.tables.len(), 1);
        assert!(result.failures.is_empty());
        assert_eq!(
            result.tables[0].code,
            "{_BIO101_4_credits_ & _BIO102_4_credits_}"
        );
        assert_eq!(result.stats.total_requirements, 2);
        assert_eq!(result.stats.unknown, 0);
    }

    #[test]
    fn test_failed_table_does_not_block_others() {
        let tables = vec![
            raw_table(1, vec![]),
            raw_table(
                2,
                vec![raw_row("BIO 101", "4"), raw_row("Total Credits", "4")],
            ),
        ];
        let catalog = CourseCatalog::default();
        let result = organize_page(&tables, &catalog, &EngineConfig::default()).unwrap();

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].table_id, TableId(1));
        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.tables[0].table_id, TableId(2));
    }

    #[test]
    fn test_unknown_rows_counted() {
        let tables = vec![raw_table(
            1,
            vec![
                raw_row("BIO 101", "4"),
                raw_row("General Education Humanities", "3"),
                raw_row("Total Credits", "7"),
            ],
        )];
        let catalog = CourseCatalog::default();
        let result = organize_page(&tables, &catalog, &EngineConfig::default()).unwrap();
        assert_eq!(result.stats.total_requirements, 2);
        assert_eq!(result.stats.unknown, 1);
        assert!(result.stats.unknown_ratio() > 0.49);
    }
}
