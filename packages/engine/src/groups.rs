//! Metagroup detection and group-header promotion.
//!
//! A metagroup header introduces two or more mutually exclusive alternative
//! groups ("Complete one of the following concentrations:"). Candidates are
//! tagged by the classifier; this stage keeps only the genuine ones, finds
//! each inner group's header row, and rejects the rest back to ordinary
//! rows. Sibling groups must agree on formatting: same header level, same
//! credit-presence signature, and a group noun shared with the metaheader.

use crate::types::{Credits, HeaderLevel, Row, RowType, Table};

/// Whether two noun sets share at least one noun.
fn nouns_intersect(a: &[String], b: &[String]) -> bool {
    a.iter().any(|noun| b.contains(noun))
}

/// Signature a sibling group header must match: level and credit presence
/// of the metagroup's first child.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SiblingSignature {
    level: HeaderLevel,
    has_credits: bool,
}

fn signature(row: &Row) -> Option<SiblingSignature> {
    Some(SiblingSignature {
        level: row.header_level?,
        has_credits: !matches!(row.credits, Credits::Absent),
    })
}

/// Validate a candidate metaheader at `m` against its region
/// (`m + 1 .. region_end`, bounded by the next candidate).
fn validate_candidate(rows: &[Row], m: usize, region_end: usize) -> bool {
    // The very next row must itself be a header: a bare metaheader followed
    // directly by a course row introduces nothing.
    let Some(first_child) = rows.get(m + 1) else {
        return false;
    };
    if m + 1 >= region_end || first_child.row_type == RowType::MetagroupHeader {
        return false;
    }
    let Some(first_sig) = signature(first_child) else {
        return false;
    };
    if first_sig.level.is_reserved() {
        return false;
    }

    // The first group header must carry a noun from the metaheader's set.
    let meta_nouns = &rows[m].group_nouns;
    if !nouns_intersect(&first_child.group_nouns, meta_nouns) {
        return false;
    }

    // At least two siblings must share the first child's signature and a
    // metaheader noun; one group is not a choice.
    let matching = rows[m + 1..region_end]
        .iter()
        .filter(|row| {
            signature(row) == Some(first_sig) && nouns_intersect(&row.group_nouns, meta_nouns)
        })
        .count();
    matching >= 2
}

/// Reclassify a failed candidate to a normal requirement or header.
fn demote(row: &mut Row) {
    use crate::types::SemanticClass;

    if row.semantic_class == Some(SemanticClass::AreaHeader) {
        row.row_type = RowType::RowHeader;
    } else if row.semantic_class == Some(SemanticClass::AreaSubheader) {
        row.row_type = RowType::RowSubheader;
    } else if row.raw_label.ends_with(':') {
        row.row_type = RowType::RowHeader;
    } else if row.code.is_pure_leaf() && row.credits.is_present() {
        row.row_type = RowType::RequiredCourse;
        row.header_level = None;
    } else if row.code.is_course_combo() && row.credits.is_present() {
        row.row_type = RowType::OnelineGroup;
        row.header_level = None;
    } else if row.credits.is_present() {
        row.row_type = RowType::OtherRequirement;
        row.header_level = None;
    } else {
        row.row_type = RowType::Unknown;
        row.header_level = None;
    }
}

/// Where a confirmed metagroup ends.
fn extent_end(
    rows: &[Row],
    m: usize,
    first_child_level: HeaderLevel,
    next_confirmed: Option<usize>,
) -> usize {
    // Whether the group's rank-and-file content is indented.
    let group_indented = rows[m + 1..]
        .iter()
        .find(|row| row.header_level.is_none())
        .is_some_and(|row| row.indented);

    let hard_end = next_confirmed.unwrap_or(rows.len());
    for (offset, row) in rows[m + 1..hard_end].iter().enumerate() {
        let i = m + 1 + offset;
        if row.row_type == RowType::CreditSum {
            return i;
        }
        if let Some(level) = row.header_level {
            // A row that outranks the group headers closes the metagroup.
            if level < first_child_level {
                return i;
            }
        } else if group_indented && !row.indented {
            // Indented metagroups end where the indentation does.
            return i;
        }
    }
    hard_end
}

/// Resolve metagroup structure for one table.
///
/// Confirmed metaheaders keep their type; every noun-matching row inside a
/// confirmed extent is promoted to a group header half a step below the
/// metaheader, so inner groups nest strictly between the metagroup and its
/// rank-and-file children. Failed candidates are demoted and their putative
/// children left ungrouped.
pub fn resolve_groups(mut table: Table) -> Table {
    let candidates: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.row_type == RowType::MetagroupHeader)
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return table;
    }

    // Pass 1: validate every candidate within its own region.
    let mut confirmed: Vec<usize> = Vec::new();
    for (ci, &m) in candidates.iter().enumerate() {
        let region_end = candidates
            .get(ci + 1)
            .copied()
            .unwrap_or(table.rows.len());
        if validate_candidate(&table.rows, m, region_end) {
            confirmed.push(m);
        } else {
            tracing::debug!(
                table_id = %table.table_id,
                row = %table.rows[m].raw_label,
                "Metaheader candidate demoted"
            );
            demote(&mut table.rows[m]);
        }
    }

    // Pass 2: fix extents and promote inner-group headers.
    for (ci, &m) in confirmed.iter().enumerate() {
        let Some(meta_level) = table.rows[m].header_level else {
            continue;
        };
        let Some(first_child_level) = table.rows[m + 1].header_level else {
            continue;
        };
        let end = extent_end(
            &table.rows,
            m,
            first_child_level,
            confirmed.get(ci + 1).copied(),
        );

        let meta_nouns = table.rows[m].group_nouns.clone();
        let inner_level = meta_level.half_step_below();
        for row in &mut table.rows[m + 1..end] {
            if row.row_type == RowType::CreditSum {
                continue;
            }
            // An inner-group boundary is itself evidence of headership, so
            // noun-matching rows are promoted even without formatting.
            if nouns_intersect(&row.group_nouns, &meta_nouns) {
                row.row_type = RowType::GroupHeader;
                row.header_level = Some(inner_level);
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_table;
    use crate::config::EngineConfig;
    use crate::normalize::normalize_table;
    use crate::types::{RawRow, RawTable, TableClass, TableId};
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

    fn resolved(rows: Vec<RawRow>) -> Table {
        let raw = RawTable {
            table_id: TableId(1),
            degree: "Biology, BS".to_string(),
            header_text: "Biology, BS".to_string(),
            table_class: TableClass::CourseList,
            source_link: String::new(),
            rows,
        };
        let patterns = EngineConfig::default().compile().unwrap();
        resolve_groups(classify_table(normalize_table(&raw, &patterns).unwrap()))
    }

    fn metagroup_rows() -> Vec<RawRow> {
        vec![
            raw_row("Choose one of the following concentrations:", ""),
            raw_row("Concentration A:", ""),
            raw_row("BIO 310", "3"),
            raw_row("BIO 311", "3"),
            raw_row("Concentration B:", ""),
            raw_row("BIO 320", "3"),
            raw_row("BIO 321", "3"),
            raw_row("Total Credits", "6"),
        ]
    }

    #[test]
    fn test_metagroup_confirmed() {
        let table = resolved(metagroup_rows());
        // Synthesized table header shifts indices by one.
        assert_eq!(table.rows[1].row_type, RowType::MetagroupHeader);
        assert_eq!(table.rows[2].row_type, RowType::GroupHeader);
        assert_eq!(table.rows[5].row_type, RowType::GroupHeader);

        let meta_level = table.rows[1].header_level.unwrap();
        let inner = meta_level.half_step_below();
        assert_eq!(table.rows[2].header_level, Some(inner));
        assert_eq!(table.rows[5].header_level, Some(inner));
    }

    #[test]
    fn test_metagroup_demoted_single_group() {
        let mut rows = metagroup_rows();
        // Remove Concentration B and its courses: one group is no choice.
        rows.drain(4..7);
        let table = resolved(rows);
        assert_eq!(table.rows[1].row_type, RowType::RowHeader);
        assert!(!table
            .rows
            .iter()
            .any(|r| r.row_type == RowType::MetagroupHeader));
        // The putative child stays an ordinary header.
        assert_eq!(table.rows[2].row_type, RowType::RowHeader);
    }

    #[test]
    fn test_metagroup_demoted_course_follows() {
        let table = resolved(vec![
            raw_row("Choose two of the following groups:", ""),
            raw_row("BIO 310", "3"),
            raw_row("Total Credits", "3"),
        ]);
        // Metaheader directly followed by a course row is no metagroup.
        assert_eq!(table.rows[1].row_type, RowType::RowHeader);
        assert_eq!(table.rows[2].row_type, RowType::RequiredCourse);
    }

    #[test]
    fn test_metagroup_extent_stops_at_sum() {
        let mut rows = metagroup_rows();
        rows.push(raw_row("Option C:", ""));
        let table = resolved(rows);
        // "Option C:" sits beyond the credit sum, outside the metagroup, and
        // its noun does not match "concentrations" anyway.
        let last = table.rows.last().unwrap();
        assert_ne!(last.row_type, RowType::GroupHeader);
    }

    #[test]
    fn test_implicit_group_header_promoted() {
        // Once two formatted siblings confirm the metagroup, a bare
        // "Concentration C" with no formatting signal at all still marks a
        // group boundary and is promoted.
        let mut rows = metagroup_rows();
        let sum = rows.pop().unwrap();
        rows.push(raw_row("Concentration C", ""));
        rows.push(raw_row("BIO 330", "3"));
        rows.push(raw_row("BIO 331", "3"));
        rows.push(sum);
        let table = resolved(rows);

        let implicit = &table.rows[8];
        assert_eq!(implicit.raw_label, "Concentration C");
        assert_eq!(implicit.row_type, RowType::GroupHeader);
        assert_eq!(
            implicit.header_level,
            Some(table.rows[1].header_level.unwrap().half_step_below())
        );
    }

    #[test]
    fn test_reserved_levels_outrank_all_content() {
        // After group resolution, no content-derived level (including the
        // promoted half-step ones) ever sinks below a reserved sentinel.
        let table = resolved(metagroup_rows());
        for row in &table.rows {
            if let Some(level) = row.header_level {
                if !level.is_reserved() {
                    assert!(level > HeaderLevel::TERM, "level {level} outranks a term");
                }
            }
        }
    }

    #[test]
    fn test_sibling_credit_signature_mismatch() {
        let table = resolved(vec![
            raw_row("Choose one of the following concentrations:", ""),
            raw_row("Concentration A:", ""),
            raw_row("BIO 310", "3"),
            raw_row("Concentration B:", "6"),
            raw_row("BIO 320", "3"),
            raw_row("Total Credits", "6"),
        ]);
        // Concentration B declares credits while A does not: signatures
        // differ, so only one sibling matches and the metaheader demotes.
        assert_eq!(table.rows[1].row_type, RowType::RowHeader);
    }
}
