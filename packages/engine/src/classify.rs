//! Row classification: row types and provisional header levels.
//!
//! Classification combines three kinds of evidence: explicit markers from
//! the markup (semantic classes, the table-header flag), formatting cues
//! (indentation, capitalization, a trailing colon), and content cues (the
//! parsed label shape, credit-sum keywords, group quantities).

use std::sync::LazyLock;

use regex::Regex;

use crate::code::Modifier;
use crate::types::{
    FormatKind, HeaderKind, HeaderLevel, Row, RowType, Table, TableClass,
};

/// Fixed list of "total credits" phrasings, matched against the whole field.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CREDIT_SUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+ )?total (program )?(credits|units|hours)( required)?:?$")
        .expect("valid regex")
});

/// Looser phrasing that only titles use ("Total Degree Credits").
#[allow(clippy::expect_used)]
static CREDIT_SUM_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^total .+ (credits|units|hours)( required)?:?$").expect("valid regex")
});

/// Per-row boolean predicates computed before type assignment.
#[derive(Debug, Clone, Copy, Default)]
struct RowSignals {
    explicit_header: bool,
    explicit_subheader: bool,
    table_header: bool,
    term_header: bool,
    colon: bool,
    indent_header: bool,
    sum: bool,
    metagroup: bool,
}

impl RowSignals {
    fn any_header(&self) -> bool {
        self.explicit_header
            || self.explicit_subheader
            || self.table_header
            || self.term_header
            || self.colon
            || self.indent_header
            || self.metagroup
    }
}

/// Whether a row's field marks a credit summation.
fn is_sum_row(row: &Row) -> bool {
    row.semantic_class.is_some_and(|c| c.is_sum())
        || CREDIT_SUM.is_match(&row.raw_label)
        || CREDIT_SUM.is_match(&row.title)
        || CREDIT_SUM_TITLE.is_match(&row.title)
}

/// Demote indentation runs of size 1: a lone indented row is noise, not a
/// nested group. Returns the surviving runs as (start, end) index ranges.
fn demote_lone_indents(rows: &mut [Row]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        if !rows[i].indented {
            i += 1;
            continue;
        }
        let start = i;
        while i < rows.len() && rows[i].indented {
            i += 1;
        }
        if i - start == 1 {
            rows[start].indented = false;
        } else {
            runs.push((start, i));
        }
    }
    runs
}

/// Compute the content-derived level for a header row.
fn content_level(signals: &RowSignals, row: &Row) -> HeaderLevel {
    let kind = if signals.explicit_header {
        HeaderKind::RowHeader
    } else if signals.explicit_subheader {
        HeaderKind::RowSubheader
    } else if signals.colon {
        HeaderKind::ColonHeader
    } else if signals.indent_header {
        HeaderKind::IndentHeader
    } else {
        // Leftovers are group headers without any special formatting.
        HeaderKind::ColonHeader
    };
    let format = FormatKind::from_row(row.all_caps, row.indented);
    HeaderLevel::content(kind, format)
}

/// Assign a row type and provisional header level to every row.
pub fn classify_table(mut table: Table) -> Table {
    let runs = demote_lone_indents(&mut table.rows);

    let contains_sum = table.rows.iter().any(is_sum_row);
    table.contains_sum = contains_sum;
    if table.class == TableClass::CourseList && !contains_sum {
        table.class = TableClass::ElectiveList;
    }
    if table.class == TableClass::PlanGrid && !contains_sum {
        tracing::warn!(
            table_id = %table.table_id,
            degree = %table.degree,
            "Plan grid without a credit sum row"
        );
    }

    let mut signals: Vec<RowSignals> = table
        .rows
        .iter()
        .map(|row| RowSignals {
            explicit_header: row.semantic_class == Some(crate::types::SemanticClass::AreaHeader),
            explicit_subheader: row.semantic_class
                == Some(crate::types::SemanticClass::AreaSubheader),
            table_header: row.is_table_header,
            term_header: row.semantic_class.is_some_and(|c| c.is_term_boundary()),
            colon: row.raw_label.ends_with(':'),
            indent_header: false,
            sum: is_sum_row(row),
            metagroup: row
                .header_codes
                .iter()
                .any(|m| matches!(m, Modifier::Groups(_))),
        })
        .collect();

    // The row above each surviving indented run is that group's header; an
    // indented run at the very top of a table has none.
    for (start, _) in &runs {
        if *start > 0 {
            signals[*start - 1].indent_header = true;
        }
    }

    for (row, sig) in table.rows.iter_mut().zip(signals.iter()) {
        row.row_type = assign_type(row, sig, contains_sum);

        row.header_level = if sig.table_header {
            Some(HeaderLevel::TABLE)
        } else if sig.sum {
            Some(HeaderLevel::CREDIT_SUM)
        } else if sig.term_header {
            Some(HeaderLevel::TERM)
        } else if sig.any_header() || row.row_type.is_header() {
            Some(content_level(sig, row))
        } else {
            None
        };
    }

    // The first non-indented, non-header row after an indented run closes
    // the group even without a header boundary.
    for (_, end) in &runs {
        if let Some(row) = table.rows.get_mut(*end) {
            if row.header_level.is_none() {
                row.end_of_indent = true;
            }
        }
    }

    table
}

/// Row type by precedence, highest first.
fn assign_type(row: &Row, sig: &RowSignals, contains_sum: bool) -> RowType {
    if sig.term_header {
        return RowType::TermHeader;
    }
    if sig.table_header {
        return RowType::TableHeader;
    }
    if sig.metagroup {
        return RowType::MetagroupHeader;
    }
    if sig.explicit_header {
        return RowType::RowHeader;
    }
    if sig.explicit_subheader {
        return RowType::RowSubheader;
    }
    if sig.sum {
        return RowType::CreditSum;
    }

    let has_credits = row.credits.is_present();
    if contains_sum {
        if row.code.is_pure_leaf() && has_credits {
            return RowType::RequiredCourse;
        }
        if row.code.is_course_combo() && has_credits {
            return RowType::OnelineGroup;
        }
        if row.indented {
            return RowType::MultilineGroup;
        }
        if has_credits {
            return RowType::OtherRequirement;
        }
        // A descriptive line with header formatting but no requirement of
        // its own is a header, not an unknown.
        if (sig.colon || sig.indent_header) && !row.code.carries_requirement() {
            return RowType::RowHeader;
        }
        RowType::Unknown
    } else {
        if row.code.is_pure_leaf() {
            return RowType::Elective;
        }
        if row.code.is_course_combo() {
            return RowType::ElectiveCombo;
        }
        if (sig.colon || sig.indent_header) && !row.code.carries_requirement() {
            return RowType::RowHeader;
        }
        RowType::UnknownElective
    }
}
