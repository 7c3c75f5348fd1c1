//! Text shaping for the report.

use textwrap::{fill, Options};

use crate::config::REPORT_WRAP_WIDTH;

/// Wrap free-text diagnostics at the report width.
///
/// Serialized codes are never wrapped (they are data, not prose); this is
/// only for error messages and unresolved-row context.
#[must_use]
pub fn wrap_report_text(text: &str) -> String {
    fill(text.trim(), Options::new(REPORT_WRAP_WIDTH))
}
