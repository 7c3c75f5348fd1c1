//! Hierarchical collapse: reduce a classified table to one expression.
//!
//! Levels are processed from the deepest (most specific formatting) to the
//! shallowest, because inner nesting must collapse before its parent can.
//! At each level, contiguous runs bounded by higher-ranking rows collapse
//! into a single synthetic row whose code aggregates the children. Reserved
//! rows (term headers, credit sums, the table header) bound every run, so
//! the final pass at the table-header level leaves exactly one row.

use crate::code::{Code, Modifier, Op};
use crate::degree::DegreeType;
use crate::error::{EngineError, Result};
use crate::types::{Flag, HeaderLevel, Row, RowType, Table, TableClass, TableId};

/// The serialized output for one table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SerializedTable {
    pub table_id: TableId,
    pub degree: String,
    pub track: Option<String>,
    pub degree_type: Option<DegreeType>,
    pub class: TableClass,
    /// The full nested expression for this table.
    pub code: String,
    pub source_link: String,
    pub flags: Vec<Flag>,
    pub min_degree_credits: Option<f64>,
    pub max_degree_credits: Option<f64>,
}

/// Whether a row bounds a collapse run at `level`.
fn is_boundary(row: &Row, level: HeaderLevel) -> bool {
    match row.header_level {
        Some(l) => l <= level,
        None => row.end_of_indent,
    }
}

/// Operator joining a collapsed group's children.
///
/// A metagroup's children are mutually exclusive alternatives, a header
/// that says "choose N" introduces a pool of options, and an elective list
/// is a pool by nature; everything else in a requirement block is required
/// together.
fn group_op(first: &Row, elective_pool: bool) -> Op {
    let meta = first.row_type == RowType::MetagroupHeader;
    if meta || elective_pool || first.header_codes.iter().any(Modifier::is_choose_quantity) {
        Op::Or
    } else {
        Op::And
    }
}

/// Collapse every run whose governing row sits exactly at `level`.
fn collapse_level(table: &mut Table, level: HeaderLevel) -> Result<()> {
    let rows = std::mem::take(&mut table.rows);
    let n = rows.len();

    let mut segments: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for i in 1..n {
        if is_boundary(&rows[i], level) {
            segments.push((start, i));
            start = i;
        }
    }
    segments.push((start, n));

    let mut out: Vec<Row> = Vec::with_capacity(n);
    let mut rows_iter = rows.into_iter();
    let mut clear_pending = false;

    for (seg_start, seg_end) in segments {
        let mut seg: Vec<Row> = rows_iter.by_ref().take(seg_end - seg_start).collect();

        if clear_pending {
            if let Some(first) = seg.first_mut() {
                first.end_of_indent = false;
            }
            clear_pending = false;
        }

        let collapsible = seg.len() >= 2 && seg[0].header_level == Some(level);
        if !collapsible {
            out.append(&mut seg);
            continue;
        }

        let first = seg.remove(0);
        let meta = first.row_type == RowType::MetagroupHeader;

        // Under a metagroup only the group headers are direct children for
        // this step; leaf content collapsed into them in an earlier pass,
        // and anything else (comments between groups) stays behind.
        let (children, excluded): (Vec<Row>, Vec<Row>) = if meta {
            seg.into_iter().partition(|r| {
                matches!(r.row_type, RowType::GroupHeader | RowType::MetagroupHeader)
            })
        } else {
            (seg, Vec::new())
        };

        if meta && children.len() < 2 {
            return Err(EngineError::MetagroupUnderfilled {
                table_id: table.table_id,
                degree: table.degree.clone(),
                header: first.raw_label.clone(),
                groups: children.len(),
            });
        }
        if children.is_empty() {
            out.push(first);
            out.extend(excluded);
            continue;
        }

        let op = group_op(&first, table.class == TableClass::ElectiveList);

        // A row's own accumulated modifiers ride on its code when it is
        // consumed into a parent aggregate.
        let mut child_codes: Vec<Code> = children
            .into_iter()
            .map(|row| {
                let inherited = row.header_codes;
                row.code.with_prepended_modifiers(&inherited)
            })
            .collect();

        // A single surviving child passes through without a redundant
        // bracket layer.
        let mut code = if child_codes.len() == 1 {
            child_codes.swap_remove(0)
        } else {
            Code::group(op, child_codes)
        };

        // The governing row's quantity/qualifier codes govern the whole
        // aggregate, and its superscripts ride along.
        let mut inherited = first.header_codes.clone();
        inherited.extend(first.code.modifiers.iter().copied());
        code = code.with_prepended_modifiers(&inherited);
        let mut superscripts = first.superscripts.clone();
        superscripts.extend(first.code.superscripts.iter().cloned());
        superscripts.extend(std::mem::take(&mut code.superscripts));
        code.superscripts = superscripts;

        out.push(Row {
            raw_label: first.raw_label,
            title: first.title,
            code,
            credits: first.credits,
            row_type: first.row_type,
            header_level: None,
            header_codes: Vec::new(),
            group_nouns: Vec::new(),
            indented: first.indented,
            end_of_indent: false,
            semantic_class: first.semantic_class,
            is_table_header: first.is_table_header,
            superscripts: Vec::new(),
            fragment_link: first.fragment_link,
            all_caps: first.all_caps,
        });
        out.extend(excluded);
        clear_pending = true;
    }

    table.rows = out;
    Ok(())
}

/// Remove spent rows at `level`: headers that were only descriptive names
/// and credit-sum rows whose value was a checksum, not a requirement.
fn prune_spent(table: &mut Table, level: HeaderLevel) {
    table.rows.retain(|row| {
        row.header_level != Some(level)
            || row.code.carries_requirement()
            || !row.header_codes.is_empty()
    });
}

/// Collapse a table to a single row.
///
/// Running the collapser on its own output is a no-op: a collapsed table
/// has no header levels left to process.
pub fn collapse_table(mut table: Table) -> Result<Table> {
    let mut levels: Vec<HeaderLevel> = table.rows.iter().filter_map(|r| r.header_level).collect();
    levels.sort_unstable();
    levels.dedup();

    // Deepest formatting first; reserved levels naturally come last, with
    // the table header's closing the whole table.
    for level in levels.into_iter().rev() {
        collapse_level(&mut table, level)?;
        prune_spent(&mut table, level);
    }

    if table.rows.len() != 1 {
        return Err(EngineError::UnresolvedTable {
            table_id: table.table_id,
            degree: table.degree.clone(),
            remaining: table.rows.len(),
        });
    }
    Ok(table)
}

/// Render a collapsed table's final expression and metadata.
///
/// Superscript markers attached to the table-wide header apply to
/// everything in the table, so they wrap the whole expression.
#[must_use]
pub fn serialize_table(table: &Table) -> SerializedTable {
    let code = match table.rows.first() {
        Some(row) if table.header_superscripts.is_empty() => row.code.to_string(),
        Some(row) => {
            let mut wrapped = Code::group(Op::And, vec![row.code.clone()]);
            wrapped.superscripts = table.header_superscripts.clone();
            wrapped.to_string()
        }
        None => String::new(),
    };

    SerializedTable {
        table_id: table.table_id,
        degree: table.degree.clone(),
        track: table.track.clone(),
        degree_type: table.degree_type,
        class: table.class,
        code,
        source_link: table.source_link.clone(),
        flags: table.flags.to_vec(),
        min_degree_credits: table.min_degree_credits,
        max_degree_credits: table.max_degree_credits,
    }
}
