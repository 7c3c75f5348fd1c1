//! Core data types for the requirement engine.
//!
//! A [`RawTable`] is what the upstream table extractor hands over: ordered
//! rows with raw label text, a credits cell, and formatting hints. The
//! pipeline stages turn it into a [`Table`] of canonical [`Row`]s, which the
//! collapser reduces to a single serialized expression.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::degree::DegreeType;

/// Identifier of one extracted table.
///
/// Rendered zero-padded to four digits, matching the `_table_0012_`
/// reference tokens in the serialized grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

impl TableId {
    /// Reference token for this table in the serialized grammar.
    #[must_use]
    pub fn to_token(self) -> String {
        format!("_table_{self}_")
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Identifier of an entry in the group/elective registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Reference token for this group in the serialized grammar.
    #[must_use]
    pub fn to_token(self) -> String {
        format!("_{self}_")
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Kind of requirement table.
///
/// The extractor distinguishes four-year plan grids from course lists; a
/// course list without any credit-sum row is reclassified as an elective
/// list during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableClass {
    PlanGrid,
    CourseList,
    ElectiveList,
}

impl TableClass {
    /// String value for output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlanGrid => "plangrid",
            Self::CourseList => "courselist",
            Self::ElectiveList => "electivelist",
        }
    }
}

/// Explicit semantic class attached to a row by the catalog markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticClass {
    AreaHeader,
    AreaSubheader,
    ListSum,
    PlanGridYear,
    PlanGridTerm,
    PlanGridSum,
    PlanGridTotal,
}

impl SemanticClass {
    /// Parse from the extractor's class string.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "areaheader" => Some(Self::AreaHeader),
            "areasubheader" => Some(Self::AreaSubheader),
            "listsum" => Some(Self::ListSum),
            "plangridyear" => Some(Self::PlanGridYear),
            "plangridterm" => Some(Self::PlanGridTerm),
            "plangridsum" => Some(Self::PlanGridSum),
            "plangridtotal" => Some(Self::PlanGridTotal),
            _ => None,
        }
    }

    /// Term boundaries in plan grids (year and term rows).
    #[must_use]
    pub fn is_term_boundary(&self) -> bool {
        matches!(self, Self::PlanGridYear | Self::PlanGridTerm)
    }

    /// Classes that mark a credit summation row outright.
    #[must_use]
    pub fn is_sum(&self) -> bool {
        matches!(self, Self::ListSum | Self::PlanGridSum | Self::PlanGridTotal)
    }
}

/// A course code: department prefix plus catalog number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseCode {
    pub dept: String,
    pub number: String,
}

impl CourseCode {
    #[must_use]
    pub fn new(dept: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            dept: dept.into(),
            number: number.into(),
        }
    }

    /// Compact token without separators, e.g. "BIO101".
    #[must_use]
    pub fn token(&self) -> String {
        format!("{}{}", self.dept, self.number)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.dept, self.number)
    }
}

/// Declared credit quantity of a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Credits {
    /// No credit value in the row.
    Absent,
    /// A fixed value or range; `min == max` for a single value.
    Range { min: f64, max: f64 },
    /// The catalog says "varies"; the true upper bound is unknowable.
    Varies,
}

impl Credits {
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Lower bound contributed to a block sum.
    #[must_use]
    pub fn min(&self) -> f64 {
        match self {
            Self::Range { min, .. } => *min,
            _ => 0.0,
        }
    }

    /// Upper bound contributed to a block sum. "Varies" stands in with the
    /// configured cap since its true maximum is unknowable.
    #[must_use]
    pub fn max(&self, varies_cap: f64) -> f64 {
        match self {
            Self::Range { max, .. } => *max,
            Self::Varies => varies_cap,
            Self::Absent => 0.0,
        }
    }
}

/// Function of a row within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowType {
    TableHeader,
    TermHeader,
    MetagroupHeader,
    GroupHeader,
    RowHeader,
    RowSubheader,
    RequiredCourse,
    OnelineGroup,
    MultilineGroup,
    CreditSum,
    OtherRequirement,
    Elective,
    ElectiveCombo,
    Unknown,
    UnknownElective,
}

impl RowType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableHeader => "table header",
            Self::TermHeader => "term header",
            Self::MetagroupHeader => "metagroup header",
            Self::GroupHeader => "group header",
            Self::RowHeader => "row header",
            Self::RowSubheader => "row subheader",
            Self::RequiredCourse => "required course",
            Self::OnelineGroup => "oneline group",
            Self::MultilineGroup => "multiline group",
            Self::CreditSum => "credits sum",
            Self::OtherRequirement => "other requirement",
            Self::Elective => "elective",
            Self::ElectiveCombo => "elective combo",
            Self::Unknown => "unknown",
            Self::UnknownElective => "unknown elective",
        }
    }

    /// Header row types (rows that can govern a group).
    #[must_use]
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Self::TableHeader
                | Self::TermHeader
                | Self::MetagroupHeader
                | Self::GroupHeader
                | Self::RowHeader
                | Self::RowSubheader
        )
    }
}

/// Header type ranking, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    RowHeader = 0,
    RowSubheader = 1,
    ColonHeader = 2,
    IndentHeader = 3,
}

/// Visual styling ranking, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    AllCaps = 0,
    Regular = 1,
    AllCapsIndented = 2,
    RegularIndented = 3,
}

impl FormatKind {
    #[must_use]
    pub fn from_row(all_caps: bool, indented: bool) -> Self {
        match (all_caps, indented) {
            (true, false) => Self::AllCaps,
            (false, false) => Self::Regular,
            (true, true) => Self::AllCapsIndented,
            (false, true) => Self::RegularIndented,
        }
    }
}

/// Nesting/styling level of a header row.
///
/// Lower values sit higher in the hierarchy. Stored in half-steps so the
/// +0.5 offset given to implicit inner-group headers stays integral and can
/// never collide with a computed level. Content levels are
/// `(header ordinal * 4 + format ordinal)` whole steps, giving 16
/// distinguishable levels; the reserved sentinels (table header = -3,
/// credit sum = -2, term header = -1 whole steps) always outrank them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderLevel(i16);

impl HeaderLevel {
    /// Table header rows terminate every group in the table.
    pub const TABLE: HeaderLevel = HeaderLevel(-6);
    /// Credit-sum rows represent a complete division of the table.
    pub const CREDIT_SUM: HeaderLevel = HeaderLevel(-4);
    /// Term headers (year/term rows in plan grids).
    pub const TERM: HeaderLevel = HeaderLevel(-2);

    /// Compute the content-derived level for a header row.
    #[must_use]
    pub fn content(kind: HeaderKind, format: FormatKind) -> Self {
        HeaderLevel(((kind as i16) * 4 + format as i16) * 2)
    }

    /// A half-step below `self`: nests strictly between this level and the
    /// next computed one.
    #[must_use]
    pub fn half_step_below(self) -> Self {
        HeaderLevel(self.0 + 1)
    }

    /// Reserved levels always terminate a group regardless of formatting.
    #[must_use]
    pub fn is_reserved(self) -> bool {
        self.0 < 0
    }

    /// Raw half-step value, for ordering diagnostics.
    #[must_use]
    pub fn half_steps(self) -> i16 {
        self.0
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}", f64::from(self.0) / 2.0)
        }
    }
}

/// Non-fatal diagnostic flags attached to a table's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    CreditMismatch,
    CreditsVary,
    CodeConflict,
    HeaderError,
    UnresolvedTable,
}

impl Flag {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditMismatch => "creditmismatch",
            Self::CreditsVary => "creditsvary",
            Self::CodeConflict => "codeconflict",
            Self::HeaderError => "headererror",
            Self::UnresolvedTable => "unresolvedtable",
        }
    }
}

/// Set of diagnostic flags for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    credit_mismatch: bool,
    credits_vary: bool,
    code_conflict: bool,
    header_error: bool,
    unresolved_table: bool,
}

impl FlagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, flag: Flag) {
        match flag {
            Flag::CreditMismatch => self.credit_mismatch = true,
            Flag::CreditsVary => self.credits_vary = true,
            Flag::CodeConflict => self.code_conflict = true,
            Flag::HeaderError => self.header_error = true,
            Flag::UnresolvedTable => self.unresolved_table = true,
        }
    }

    #[must_use]
    pub fn contains(&self, flag: Flag) -> bool {
        match flag {
            Flag::CreditMismatch => self.credit_mismatch,
            Flag::CreditsVary => self.credits_vary,
            Flag::CodeConflict => self.code_conflict,
            Flag::HeaderError => self.header_error,
            Flag::UnresolvedTable => self.unresolved_table,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Flags present, in declaration order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Flag> {
        [
            Flag::CreditMismatch,
            Flag::CreditsVary,
            Flag::CodeConflict,
            Flag::HeaderError,
            Flag::UnresolvedTable,
        ]
        .into_iter()
        .filter(|f| self.contains(*f))
        .collect()
    }
}

/// One row as supplied by the upstream table extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    /// Content of the course-code cell.
    pub label: String,

    /// Content of the title cell.
    #[serde(default)]
    pub title: String,

    /// Content of the credits cell, verbatim.
    #[serde(default)]
    pub credits: String,

    /// Explicit semantic class from the markup, if any.
    #[serde(default)]
    pub semantic_class: Option<String>,

    /// Indentation offset in pixels.
    #[serde(default)]
    pub indent_px: u32,

    /// Extractor-flagged table header row.
    #[serde(default)]
    pub is_table_header: bool,

    /// Superscript markers attached to this row.
    #[serde(default)]
    pub superscripts: Vec<String>,

    /// Hyperlink fragment found in the row, if any.
    #[serde(default)]
    pub fragment_link: Option<String>,
}

/// One table as supplied by the upstream table extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub table_id: TableId,

    /// Degree/page title this table belongs to.
    pub degree: String,

    /// Header text above the table (often "<degree> : <track>").
    #[serde(default)]
    pub header_text: String,

    pub table_class: TableClass,

    /// Link to the source catalog page.
    #[serde(default)]
    pub source_link: String,

    pub rows: Vec<RawRow>,
}

/// A canonical row, mutated only by replacement across pipeline stages.
#[derive(Debug, Clone)]
pub struct Row {
    /// Original text of the course-code cell, post-normalization.
    pub raw_label: String,

    /// Title cell text.
    pub title: String,

    /// Working encoded form.
    pub code: Code,

    /// Declared credit quantity.
    pub credits: Credits,

    pub row_type: RowType,

    /// Defined for header, sum, table, and term rows; `None` otherwise.
    pub header_level: Option<HeaderLevel>,

    /// Modifier tokens accumulated on this row's scope.
    pub header_codes: Vec<crate::code::Modifier>,

    /// Group nouns found in the label (lowercased, singular).
    pub group_nouns: Vec<String>,

    pub indented: bool,

    /// First non-indented, non-header row after an indented run.
    pub end_of_indent: bool,

    pub semantic_class: Option<SemanticClass>,

    /// Extractor-flagged table header row (or synthesized stand-in).
    pub is_table_header: bool,

    pub superscripts: Vec<String>,

    pub fragment_link: Option<String>,

    pub all_caps: bool,
}

impl Row {
    /// Whether this row participates in the header hierarchy.
    #[must_use]
    pub fn is_header_row(&self) -> bool {
        self.header_level.is_some()
    }
}

/// A table of canonical rows plus table-scoped metadata.
///
/// Rows do not repeat table-wide fields; membership of a row in exactly one
/// table is structural.
#[derive(Debug, Clone)]
pub struct Table {
    pub table_id: TableId,
    pub degree: String,
    pub header_text: String,

    /// Superscript markers attached to the table-wide header; reattached
    /// around the final expression after collapse.
    pub header_superscripts: Vec<String>,

    pub class: TableClass,
    pub source_link: String,

    /// Whether any row of this table is a credit summation. Distinguishes a
    /// requirement table from a pure elective list.
    pub contains_sum: bool,

    pub track: Option<String>,
    pub degree_type: Option<DegreeType>,

    /// Largest declared sum credits, once validated.
    pub min_degree_credits: Option<f64>,
    pub max_degree_credits: Option<f64>,

    pub flags: FlagSet,
    pub rows: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_id_token() {
        assert_eq!(TableId(12).to_token(), "_table_0012_");
        assert_eq!(TableId(9011).to_token(), "_table_9011_");
    }

    #[test]
    fn test_group_id_token() {
        assert_eq!(GroupId(0).to_token(), "_0000_");
        assert_eq!(GroupId(3).to_token(), "_0003_");
    }

    #[test]
    fn test_semantic_class_from_class() {
        assert_eq!(
            SemanticClass::from_class("areaheader"),
            Some(SemanticClass::AreaHeader)
        );
        assert_eq!(
            SemanticClass::from_class("plangridtotal"),
            Some(SemanticClass::PlanGridTotal)
        );
        assert_eq!(SemanticClass::from_class("odd"), None);
    }

    #[test]
    fn test_credits_bounds() {
        let range = Credits::Range { min: 3.0, max: 6.0 };
        assert_eq!(range.min(), 3.0);
        assert_eq!(range.max(120.0), 6.0);

        assert_eq!(Credits::Varies.min(), 0.0);
        assert_eq!(Credits::Varies.max(120.0), 120.0);
        assert!(!Credits::Absent.is_present());
    }

    #[test]
    fn test_header_level_ordering() {
        // Reserved levels outrank every content level.
        let content = HeaderLevel::content(HeaderKind::RowHeader, FormatKind::AllCaps);
        assert!(HeaderLevel::TABLE < HeaderLevel::CREDIT_SUM);
        assert!(HeaderLevel::CREDIT_SUM < HeaderLevel::TERM);
        assert!(HeaderLevel::TERM < content);

        // 16 distinct content levels, ordered by type then format.
        let deepest = HeaderLevel::content(HeaderKind::IndentHeader, FormatKind::RegularIndented);
        assert!(content < deepest);
        assert_eq!(deepest.half_steps(), 30);
    }

    #[test]
    fn test_header_level_half_step() {
        let level = HeaderLevel::content(HeaderKind::ColonHeader, FormatKind::Regular);
        let inner = level.half_step_below();
        assert!(level < inner);
        let next = HeaderLevel::content(HeaderKind::ColonHeader, FormatKind::AllCapsIndented);
        assert!(inner < next);
        assert_eq!(inner.to_string(), "9.5");
    }

    #[test]
    fn test_flag_set() {
        let mut flags = FlagSet::new();
        assert!(flags.is_empty());
        flags.set(Flag::CreditMismatch);
        flags.set(Flag::CreditsVary);
        assert!(flags.contains(Flag::CreditMismatch));
        assert!(!flags.contains(Flag::CodeConflict));
        assert_eq!(flags.to_vec(), vec![Flag::CreditMismatch, Flag::CreditsVary]);
    }

    #[test]
    fn test_raw_row_deserialize_defaults() {
        let row: RawRow = serde_json::from_str(r#"{"label": "BIO 101"}"#).unwrap();
        assert_eq!(row.label, "BIO 101");
        assert_eq!(row.indent_px, 0);
        assert!(!row.is_table_header);
        assert!(row.superscripts.is_empty());
    }
}
