//! Row normalization: raw extractor records to canonical rows.
//!
//! Scraped cell text arrives with non-breaking spaces, doubled whitespace,
//! inline superscript markers, and "or"-continuation rows that belong to
//! the row above them. This stage cleans all of that up, parses the credits
//! cell, runs the label parser, and synthesizes a table-header row when the
//! extractor did not flag one.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::code::{Modifier, Quantity};
use crate::config::CoursePatterns;
use crate::error::{EngineError, Result};
use crate::parse;
use crate::types::{Credits, Flag, FlagSet, RawRow, RawTable, Row, RowType, SemanticClass, Table};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").expect("valid regex"));

#[allow(clippy::expect_used)]
static SUPERSCRIPT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?_SUPERSCRIPT_(..?)_ ?| ?<(..?)> ?").expect("valid regex"));

#[allow(clippy::expect_used)]
static CREDIT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}(?:\.\d)?)\s*-?\s*(\d{1,3}(?:\.\d)?)?$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static VARIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^var(?:ies|iable)?\.?$").expect("valid regex"));

#[allow(clippy::expect_used)]
static OR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^or\s+").expect("valid regex"));

/// Clean one cell of scraped text; returns the text and any superscript
/// markers that were embedded in it.
fn clean_cell(text: &str) -> (String, Vec<String>) {
    let text: String = text.nfkc().collect();

    let mut superscripts = Vec::new();
    let text = SUPERSCRIPT_MARKER
        .replace_all(&text, |caps: &regex::Captures<'_>| {
            let marker = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            superscripts.push(marker);
            " "
        })
        .to_string();

    let text = text.replace("(s)", "");
    let text = MULTI_SPACE.replace_all(&text, " ");
    let text = text.replace(" :", ":");
    (text.trim().to_string(), superscripts)
}

/// Parse the credits cell.
fn parse_credits(text: &str) -> Credits {
    let text = text.trim().replace(' ', "");
    if text.is_empty() {
        return Credits::Absent;
    }
    if VARIES.is_match(&text) {
        return Credits::Varies;
    }
    if let Some(caps) = CREDIT_RANGE.captures(&text) {
        let min: f64 = match caps[1].parse() {
            Ok(v) => v,
            Err(_) => return Credits::Absent,
        };
        let max: f64 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(min);
        return Credits::Range { min, max };
    }
    Credits::Absent
}

/// Whether a label is all caps: has letters and none of them lowercase.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Declared credits become a modifier on the row's scope, so a quantity in
/// the credits column serializes alongside the course code.
fn credits_modifier(credits: &Credits) -> Option<Modifier> {
    if let Credits::Range { min, max } = credits {
        if min.fract() == 0.0 && max.fract() == 0.0 && *min < 100.0 && *max < 100.0 {
            return Some(Modifier::Credits(Quantity {
                min: *min as u32,
                max: *max as u32,
            }));
        }
    }
    None
}

/// Merge rows that begin with "or" into the row above: they are
/// continuations of one alternative list, not separate requirements.
fn merge_or_rows(rows: Vec<RawRow>) -> Vec<RawRow> {
    let mut merged: Vec<RawRow> = Vec::new();
    for row in rows {
        if let Some(stripped) = OR_PREFIX.find(&row.label).map(|m| &row.label[m.end()..]) {
            if let Some(prev) = merged.last_mut() {
                prev.label = format!("{} or {}", prev.label, stripped);
                if !row.title.is_empty() {
                    if prev.title.is_empty() {
                        prev.title = row.title.clone();
                    } else {
                        prev.title = format!("{} | {}", prev.title, row.title);
                    }
                }
                continue;
            }
        }
        merged.push(row);
    }
    merged
}

/// Normalize one extracted table into canonical rows.
///
/// Fails when the table is empty or uses more than one indentation level
/// (source tables support at most one).
pub fn normalize_table(raw: &RawTable, patterns: &CoursePatterns) -> Result<Table> {
    if raw.rows.is_empty() {
        return Err(EngineError::EmptyTable {
            table_id: raw.table_id,
            degree: raw.degree.clone(),
        });
    }

    let indent_widths: std::collections::BTreeSet<u32> = raw
        .rows
        .iter()
        .filter(|r| r.indent_px > 0)
        .map(|r| r.indent_px)
        .collect();
    if indent_widths.len() > 1 {
        return Err(EngineError::IndentDepth {
            table_id: raw.table_id,
            degree: raw.degree.clone(),
            levels: indent_widths.len(),
        });
    }

    let (header_text, header_superscripts) = clean_cell(&raw.header_text);

    let mut flags = FlagSet::new();
    let mut rows = Vec::new();
    for raw_row in merge_or_rows(raw.rows.clone()) {
        let (label, mut superscripts) = clean_cell(&raw_row.label);
        let (title, _) = clean_cell(&raw_row.title);
        superscripts.extend(raw_row.superscripts.iter().cloned());

        let credits = parse_credits(&raw_row.credits);
        let parsed = parse::parse_label(&label, patterns);
        if parsed.ambiguous_ops || parsed.conflicting {
            flags.set(Flag::CodeConflict);
        }

        let mut header_codes = parsed.modifiers;
        if let Some(m) = credits_modifier(&credits) {
            if !header_codes.contains(&m) {
                header_codes.push(m);
            }
        }

        let mut code = parsed.code;
        code.superscripts = superscripts.clone();

        rows.push(Row {
            all_caps: is_all_caps(&label),
            raw_label: label,
            title,
            code,
            credits,
            row_type: RowType::Unknown,
            header_level: None,
            header_codes,
            group_nouns: parsed.group_nouns,
            indented: raw_row.indent_px > 0,
            end_of_indent: false,
            semantic_class: raw_row
                .semantic_class
                .as_deref()
                .and_then(SemanticClass::from_class),
            is_table_header: raw_row.is_table_header,
            superscripts,
            fragment_link: raw_row.fragment_link.clone(),
        });
    }

    // Every table needs a table-header boundary for the final collapse; if
    // the extractor did not flag one, synthesize it from the header text.
    if !rows.iter().any(|r| r.is_table_header) {
        rows.insert(
            0,
            Row {
                raw_label: header_text.clone(),
                title: String::new(),
                code: crate::code::Code::empty(),
                credits: Credits::Absent,
                row_type: RowType::Unknown,
                header_level: None,
                header_codes: Vec::new(),
                group_nouns: Vec::new(),
                indented: false,
                end_of_indent: false,
                semantic_class: None,
                is_table_header: true,
                superscripts: Vec::new(),
                fragment_link: None,
                all_caps: is_all_caps(&header_text),
            },
        );
    }

    Ok(Table {
        table_id: raw.table_id,
        degree: raw.degree.clone(),
        header_text,
        header_superscripts,
        class: raw.table_class,
        source_link: raw.source_link.clone(),
        contains_sum: false,
        track: None,
        degree_type: None,
        min_degree_credits: None,
        max_degree_credits: None,
        flags,
        rows,
    })
}
