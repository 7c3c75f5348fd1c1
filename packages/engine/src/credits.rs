//! Credit-sum validation.
//!
//! Each contiguous block ending in a credit-sum row is checked: the sum the
//! catalog declares must be achievable from the declared per-row credits.
//! The table's final sum row doubles as the grand total and is checked
//! against everything since the table header. Mismatches are reported as a
//! flag, never corrected; the parser must not silently alter a declared
//! number to satisfy a sum.

use crate::config::EngineConfig;
use crate::types::{Credits, Flag, RowType, Table};

/// Running min/max credit accumulator.
#[derive(Debug, Clone, Copy, Default)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn add(&mut self, credits: &Credits, varies_cap: f64) {
        self.min += credits.min();
        self.max += credits.max(varies_cap);
    }

    /// Whether a declared range fits inside this achievable span.
    fn admits(&self, declared: &Credits, varies_cap: f64) -> bool {
        declared.max(varies_cap) <= self.max && declared.min() >= self.min
    }
}

/// Validate declared credit sums for one table.
pub fn validate_credits(mut table: Table, config: &EngineConfig) -> Table {
    let cap = config.varies_max_credits;

    if table
        .rows
        .iter()
        .any(|row| matches!(row.credits, Credits::Varies))
    {
        table.flags.set(Flag::CreditsVary);
    }

    let last_sum = table
        .rows
        .iter()
        .rposition(|row| row.row_type == RowType::CreditSum);

    let mut block = Span::default();
    let mut total = Span::default();
    let mut mismatch = false;

    for (i, row) in table.rows.iter_mut().enumerate() {
        match row.row_type {
            RowType::CreditSum => {
                let achievable = if Some(i) == last_sum { total } else { block };
                if row.credits.is_present() && !achievable.admits(&row.credits, cap) {
                    mismatch = true;
                    tracing::debug!(
                        table_id = %table.table_id,
                        row = %row.raw_label,
                        declared = ?row.credits,
                        achievable_min = achievable.min,
                        achievable_max = achievable.max,
                        "Credit sum outside achievable range"
                    );
                }
                block = Span::default();

                // Track the largest declared sum as the degree total.
                let declared_max = row.credits.max(cap);
                if row.credits.is_present()
                    && table.max_degree_credits.is_none_or(|m| declared_max > m)
                {
                    table.max_degree_credits = Some(declared_max);
                    table.min_degree_credits = Some(row.credits.min());
                }

                // Sum rows must not re-assert their quantity during
                // collapse; their declared value was only a checksum.
                row.header_codes.clear();
            }
            RowType::TableHeader => {
                block = Span::default();
                total = Span::default();
            }
            _ => {
                block.add(&row.credits, cap);
                total.add(&row.credits, cap);
            }
        }
    }

    if mismatch {
        table.flags.set(Flag::CreditMismatch);
    }
    table
}
