//! Cross-reference resolution across a degree page's tables.
//!
//! After classification, some rows still hold free text: "any MAT 3XX
//! course", "General electives", "Ecology Electives (see list below)".
//! This stage resolves what it can against the course catalog and the
//! page's other tables, building the group registry as it goes:
//!
//! - generic electives collapse onto the reserved registry entry;
//! - department/number wildcards, their "or"-combos, and ranges expand to
//!   catalog course lists;
//! - hyperlink fragments and title similarity link rows to elective tables;
//! - degree types and tracks are inferred;
//! - headers whose label turned out to be pure code are repaired.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::code::{Code, Expr};
use crate::config::EngineConfig;
use crate::degree::DegreeType;
use crate::error::Result;
use crate::registry::{CourseCatalog, GroupRegistry, ELECTIVES};
use crate::types::{Flag, Row, RowType, Table, TableClass, TableId};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ELECTIVE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((department )?approved |selected |required |free |general )?electives?( or \w+)?$")
        .expect("valid regex")
});

/// Phrases that are not part of a requirement's name: pointers to lists
/// below and credit quantities. Stripped before title matching.
#[allow(clippy::expect_used)]
static NOT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((see )?(lists? |electives? |groups? |courses? |requirements? |listed )?below)\b|\b((select |choose )?\d\d? )?credits?\b",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)]
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid regex"));

#[allow(clippy::expect_used)]
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").expect("valid regex"));

/// Longest common subsequence length over characters.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Token-sort similarity score in 0..=100.
///
/// Both strings are lowercased, split into tokens, sorted, and rejoined;
/// the score is the normalized common-subsequence ratio of the results.
/// Word order therefore does not matter: "Electives, Ecology" matches
/// "Ecology Electives".
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let sort_tokens = |s: &str| -> Vec<char> {
        let mut tokens: Vec<&str> = s.split_whitespace().collect();
        tokens.sort_unstable();
        tokens.join(" ").to_lowercase().chars().collect()
    };
    let a = sort_tokens(a);
    let b = sort_tokens(b);
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let lcs = lcs_len(&a, &b);
    ((200 * lcs) as f64 / (a.len() + b.len()) as f64).round() as u8
}

/// Strip parentheticals, list pointers, and credit phrases from a name.
fn clean_name(text: &str) -> String {
    let text = PARENTHETICAL.replace_all(text, "");
    let text = NOT_NAME.replace_all(&text, "");
    let text = MULTI_SPACE.replace_all(&text, " ");
    text.trim()
        .trim_matches(|c: char| matches!(c, ':' | ',' | '.'))
        .trim()
        .to_string()
}

/// The track-bearing tail of a table header ("Biology, BS : Ecology").
fn header_suffix(header_text: &str) -> String {
    match header_text.rfind(" : ") {
        Some(pos) => header_text[pos + 3..].trim().to_string(),
        None => header_text.trim().to_string(),
    }
}

/// A parsed department/number wildcard like "MAT 3XX".
#[derive(Debug, Clone, PartialEq, Eq)]
struct Wildcard {
    dept: String,
    prefix: Option<char>,
}

impl Wildcard {
    /// Canonical registry name, e.g. `_MAT_3xxx_` or `_MAT_xxxx_`.
    fn name(&self) -> String {
        match self.prefix {
            Some(d) => format!("_{}_{}xxx_", self.dept, d),
            None => format!("_{}_xxxx_", self.dept),
        }
    }

    /// Regex the course number must match in full.
    fn number_regex(&self) -> Option<Regex> {
        let src = match self.prefix {
            Some(d) => format!(r"{d}\d\d\d?"),
            None => r"\d\d\d\d?".to_string(),
        };
        Regex::new(&src).ok()
    }
}

/// Recognizers for wildcard rows, compiled per page against the
/// configured department pattern.
struct WildcardParser {
    single: Regex,
    or_sep: Regex,
    range_sep: Regex,
}

impl WildcardParser {
    fn compile(config: &EngineConfig) -> Result<Self> {
        let dept = &config.dept_pattern;
        let single_src = format!(
            r"^(?P<dept>{dept}) ?-? ?(?:(?P<prefix>\d)(?:\*{{2,3}}|X{{2,3}}|x{{2,3}}|_{{2,3}})|(?:\*{{3,4}}|X{{3,4}}|x{{3,4}}|_{{3,4}}))$"
        );
        let single = Regex::new(&single_src).map_err(|source| {
            crate::error::EngineError::InvalidPattern {
                pattern: single_src.clone(),
                source: Box::new(source),
            }
        })?;
        #[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
        let or_sep = Regex::new(r"(?i) or | ?/ ?| ?\| ?").expect("valid regex");
        #[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
        let range_sep = Regex::new(r" ?- ?").expect("valid regex");
        Ok(Self {
            single,
            or_sep,
            range_sep,
        })
    }

    fn parse_single(&self, text: &str) -> Option<Wildcard> {
        let caps = self.single.captures(text.trim())?;
        Some(Wildcard {
            dept: caps["dept"].to_string(),
            prefix: caps
                .name("prefix")
                .and_then(|m| m.as_str().chars().next()),
        })
    }

    /// Parse an "or"-combo of wildcards ("MAT 3XX or MAT 4XX").
    fn parse_combo(&self, text: &str) -> Option<Vec<Wildcard>> {
        let parts: Vec<&str> = self.or_sep.split(text).collect();
        if parts.len() < 2 {
            return None;
        }
        let mut wildcards = Vec::new();
        let mut last_dept: Option<String> = None;
        for part in parts {
            let part = part.trim();
            let wildcard = self.parse_single(part).or_else(|| {
                // "MAT 3XX or 4XX": the department carries over.
                let dept = last_dept.clone()?;
                self.parse_single(&format!("{dept} {part}"))
            })?;
            last_dept = Some(wildcard.dept.clone());
            wildcards.push(wildcard);
        }
        Some(wildcards)
    }

    /// Parse a wildcard range ("MAT 2XXX - MAT 4XXX") into a digit span.
    fn parse_range(&self, text: &str) -> Option<(String, char, char)> {
        let parts: Vec<&str> = self.range_sep.splitn(text, 2).collect();
        if parts.len() != 2 {
            return None;
        }
        let first = self.parse_single(parts[0].trim())?;
        let second = self
            .parse_single(parts[1].trim())
            .or_else(|| self.parse_single(&format!("{} {}", first.dept, parts[1].trim())))?;
        if first.dept != second.dept {
            return None;
        }
        match (first.prefix, second.prefix) {
            (Some(lo), Some(hi)) if lo <= hi => Some((first.dept, lo, hi)),
            _ => None,
        }
    }
}

/// Whether a row still needs resolution: not a header, and its code is
/// preserved free text.
fn is_unresolved(row: &Row) -> bool {
    row.header_level.is_none() && matches!(row.code.expr, Expr::Unparsed(_))
}

fn unresolved_text(row: &Row) -> Option<String> {
    if is_unresolved(row) {
        if let Expr::Unparsed(text) = &row.code.expr {
            return Some(clean_name(text));
        }
    }
    None
}

/// Replace a row's code while keeping its modifiers and superscripts.
fn replace_expr(row: &mut Row, expr: Expr) {
    row.code = Code {
        expr,
        modifiers: row.code.modifiers.clone(),
        superscripts: row.code.superscripts.clone(),
    };
}

/// Resolve cross-references for one page's tables, adding any course
/// groups to `registry`.
///
/// The registry is shared across pages of one run so group tokens stay
/// unique in the whole output.
pub fn resolve_references(
    mut tables: Vec<Table>,
    catalog: &CourseCatalog,
    config: &EngineConfig,
    registry: &mut GroupRegistry,
) -> Result<Vec<Table>> {
    let wildcards = WildcardParser::compile(config)?;

    infer_degree_types(&mut tables);
    infer_tracks(&mut tables);

    for table in &mut tables {
        resolve_wildcards(table, catalog, &wildcards, registry);
    }
    resolve_fragment_links(&mut tables);
    resolve_elective_titles(&mut tables, config);
    repair_headers(&mut tables);

    Ok(tables)
}

/// Infer the degree type from the degree title, falling back to the table
/// header text.
fn infer_degree_types(tables: &mut [Table]) {
    for table in tables.iter_mut() {
        table.degree_type =
            DegreeType::from_title(&table.degree).or_else(|| DegreeType::from_title(&table.header_text));
        if table.degree_type.is_none() {
            tracing::warn!(degree = %table.degree, "Unidentified degree type");
        }
    }
}

/// Infer tracks for degrees with multiple tables of the same class.
///
/// Preference order for the track name: distinct table-header suffixes,
/// then distinct top rows, then the table id.
fn infer_tracks(tables: &mut [Table]) {
    let mut by_degree_class: HashMap<(String, TableClass), Vec<usize>> = HashMap::new();
    for (i, table) in tables.iter().enumerate() {
        by_degree_class
            .entry((table.degree.clone(), table.class))
            .or_default()
            .push(i);
    }

    for indices in by_degree_class.values() {
        if indices.len() < 2 {
            continue;
        }

        let suffixes: Vec<String> = indices
            .iter()
            .map(|&i| header_suffix(&tables[i].header_text))
            .collect();
        let top_rows: Vec<String> = indices
            .iter()
            .map(|&i| {
                tables[i]
                    .rows
                    .get(1)
                    .map(|r| r.raw_label.clone())
                    .unwrap_or_default()
            })
            .collect();

        let names: Vec<String> = if all_distinct(&suffixes) {
            suffixes
        } else if all_distinct(&top_rows) {
            top_rows
        } else {
            indices.iter().map(|&i| tables[i].table_id.to_string()).collect()
        };

        for (&i, name) in indices.iter().zip(names) {
            tables[i].track = Some(format!("{} : {}", tables[i].degree, name));
        }
    }
}

fn all_distinct(names: &[String]) -> bool {
    let set: std::collections::HashSet<&String> = names.iter().collect();
    set.len() == names.len()
}

/// Resolve generic electives, wildcards, combos, and ranges in one table.
fn resolve_wildcards(
    table: &mut Table,
    catalog: &CourseCatalog,
    parser: &WildcardParser,
    registry: &mut GroupRegistry,
) {
    for row in &mut table.rows {
        let Some(text) = unresolved_text(row) else {
            continue;
        };

        if ELECTIVE_PHRASE.is_match(&text) {
            replace_expr(row, Expr::GroupRef(ELECTIVES));
            continue;
        }

        if let Some(wildcard) = parser.parse_single(&text) {
            if let Some(id) = register_wildcard(&wildcard, catalog, registry) {
                replace_expr(row, Expr::GroupRef(id));
            }
            continue;
        }

        if let Some((dept, lo, hi)) = parser.parse_range(&text) {
            let name = format!("_{dept}_{lo}xxx_-_{dept}_{hi}xxx_");
            if let Ok(re) = Regex::new(&format!(r"[{lo}-{hi}]\d\d\d?")) {
                let courses = catalog.matching(&dept, &re);
                if !courses.is_empty() {
                    let id = registry.register(name, courses);
                    replace_expr(row, Expr::GroupRef(id));
                }
            }
            continue;
        }

        if let Some(combo) = parser.parse_combo(&text) {
            let name = combo
                .iter()
                .map(Wildcard::name)
                .collect::<Vec<_>>()
                .join(" | ");
            let mut courses = Vec::new();
            for wildcard in &combo {
                if let Some(re) = wildcard.number_regex() {
                    courses.extend(catalog.matching(&wildcard.dept, &re));
                }
            }
            if !courses.is_empty() {
                let id = registry.register(name, courses);
                replace_expr(row, Expr::GroupRef(id));
            }
        }
    }
}

fn register_wildcard(
    wildcard: &Wildcard,
    catalog: &CourseCatalog,
    registry: &mut GroupRegistry,
) -> Option<crate::types::GroupId> {
    let re = wildcard.number_regex()?;
    let courses = catalog.matching(&wildcard.dept, &re);
    if courses.is_empty() {
        return None;
    }
    Some(registry.register(wildcard.name(), courses))
}

/// Link rows whose hyperlink fragment points at another table in the batch.
fn resolve_fragment_links(tables: &mut [Table]) {
    let by_link: HashMap<String, TableId> = tables
        .iter()
        .filter(|t| !t.source_link.is_empty())
        .map(|t| (t.source_link.clone(), t.table_id))
        .collect();

    for table in tables.iter_mut() {
        let own_id = table.table_id;
        for row in &mut table.rows {
            if !is_unresolved(row) {
                continue;
            }
            let Some(link) = row.fragment_link.as_deref() else {
                continue;
            };
            if let Some(&target) = by_link.get(link) {
                if target != own_id {
                    replace_expr(row, Expr::TableRef(target));
                }
            }
        }
    }
}

/// Match elective-table titles against unresolved requirement rows of the
/// same degree; a row that names an elective list becomes a reference to
/// that table. Better-scoring matches replace earlier ones.
fn resolve_elective_titles(tables: &mut [Table], config: &EngineConfig) {
    let elective_tables: Vec<(TableId, String, String)> = tables
        .iter()
        .filter(|t| t.class == TableClass::ElectiveList)
        .map(|t| {
            (
                t.table_id,
                t.degree.clone(),
                clean_name(&header_suffix(&t.header_text)),
            )
        })
        .collect();

    for table in tables.iter_mut() {
        if !table.contains_sum {
            continue;
        }
        for row in &mut table.rows {
            let Some(text) = unresolved_text(row) else {
                continue;
            };
            let mut best: Option<(u8, TableId)> = None;
            for (id, degree, title) in &elective_tables {
                if *degree != table.degree || title.is_empty() {
                    continue;
                }
                let score = token_sort_ratio(title, &text);
                if score >= config.similarity_cutoff
                    && best.is_none_or(|(prev, _)| score > prev)
                {
                    best = Some((score, *id));
                }
            }
            if let Some((score, id)) = best {
                tracing::debug!(
                    row = %row.raw_label,
                    table = %id,
                    score,
                    "Linked requirement to elective table by title"
                );
                replace_expr(row, Expr::TableRef(id));
            }
        }
    }
}

/// Headers whose label turned out to be pure code were misclassified by
/// the extraction; clear their level and flag the table. Row headers whose
/// label merely resembles a code keep their descriptive text.
fn repair_headers(tables: &mut [Table]) {
    for table in tables.iter_mut() {
        let mut any = false;
        for row in &mut table.rows {
            let pure_code = matches!(
                row.code.expr,
                Expr::Leaf(_) | Expr::TableRef(_) | Expr::GroupRef(_)
            ) || row.code.is_course_combo();
            if !pure_code || row.header_level.is_none() {
                continue;
            }
            if row.header_level.is_some_and(|l| l.is_reserved()) {
                continue;
            }
            if row.row_type == RowType::RowHeader {
                let text = row.raw_label.trim_end_matches(':').trim().to_string();
                replace_expr(row, Expr::Unparsed(text));
            } else {
                row.header_level = None;
                any = true;
            }
        }
        if any {
            table.flags.set(Flag::HeaderError);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_table;
    use crate::normalize::normalize_table;
    use crate::types::{CourseCode, RawRow, RawTable};
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

    fn table_from(
        id: u32,
        degree: &str,
        header: &str,
        class: TableClass,
        link: &str,
        rows: Vec<RawRow>,
    ) -> Table {
        let raw = RawTable {
            table_id: TableId(id),
            degree: degree.to_string(),
            header_text: header.to_string(),
            table_class: class,
            source_link: link.to_string(),
            rows,
        };
        let patterns = EngineConfig::default().compile().unwrap();
        classify_table(normalize_table(&raw, &patterns).unwrap())
    }

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            CourseCode::new("MAT", "301"),
            CourseCode::new("MAT", "310"),
            CourseCode::new("MAT", "401"),
            CourseCode::new("MAT", "201"),
            CourseCode::new("BIO", "310"),
        ])
    }

    #[test]
    fn test_token_sort_ratio_word_order() {
        assert_eq!(token_sort_ratio("Ecology Electives", "Electives Ecology"), 100);
        assert!(token_sort_ratio("Ecology Electives", "Ecology Electives List") >= 70);
        assert!(token_sort_ratio("Ecology Electives", "Organic Chemistry") < 50);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(
            clean_name("Ecology Electives (see list below)"),
            "Ecology Electives"
        );
        assert_eq!(clean_name("Choose 6 credits: Ecology Electives"), "Ecology Electives");
    }

    #[test]
    fn test_generic_electives_resolve_to_reserved_group() {
        let mut tables = vec![table_from(
            1,
            "Biology, BS",
            "Biology, BS",
            TableClass::CourseList,
            "",
            vec![
                raw_row("BIO 310", "3"),
                raw_row("Free Electives", "6"),
                raw_row("Total Credits", "9"),
            ],
        )];
        let config = EngineConfig::default();
        let mut registry = GroupRegistry::new();
        let tables =
            resolve_references(std::mem::take(&mut tables), &catalog(), &config, &mut registry)
                .unwrap();
        assert_eq!(tables[0].rows[2].code.expr, Expr::GroupRef(ELECTIVES));
    }

    #[test]
    fn test_wildcard_expansion() {
        let tables = vec![table_from(
            1,
            "Math, BS",
            "Math, BS",
            TableClass::CourseList,
            "",
            vec![
                raw_row("MAT 3XX", "3"),
                raw_row("Total Credits", "3"),
            ],
        )];
        let config = EngineConfig::default();
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();

        let row = &tables[0].rows[1];
        let Expr::GroupRef(id) = row.code.expr else {
            panic!("expected group ref, got {:?}", row.code.expr);
        };
        let entry = registry.get(id).unwrap();
        assert_eq!(entry.name, "_MAT_3xxx_");
        assert_eq!(
            entry.courses,
            vec![CourseCode::new("MAT", "301"), CourseCode::new("MAT", "310")]
        );
    }

    #[test]
    fn test_wildcard_combo() {
        let tables = vec![table_from(
            1,
            "Math, BS",
            "Math, BS",
            TableClass::CourseList,
            "",
            vec![
                raw_row("MAT 3XX or MAT 4XX", "3"),
                raw_row("Total Credits", "3"),
            ],
        )];
        let config = EngineConfig::default();
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();

        let Expr::GroupRef(id) = tables[0].rows[1].code.expr else {
            panic!("expected group ref");
        };
        let entry = registry.get(id).unwrap();
        assert_eq!(entry.courses.len(), 3);
    }

    #[test]
    fn test_wildcard_range() {
        let tables = vec![table_from(
            1,
            "Math, BS",
            "Math, BS",
            TableClass::CourseList,
            "",
            vec![
                raw_row("MAT 2XXX - MAT 4XXX", "3"),
                raw_row("Total Credits", "3"),
            ],
        )];
        let config = EngineConfig::default();
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();

        let Expr::GroupRef(id) = tables[0].rows[1].code.expr else {
            panic!("expected group ref");
        };
        // All MAT 2xx-4xx courses.
        assert_eq!(registry.get(id).unwrap().courses.len(), 4);
    }

    #[test]
    fn test_unknown_wildcard_left_unresolved() {
        let tables = vec![table_from(
            1,
            "Math, BS",
            "Math, BS",
            TableClass::CourseList,
            "",
            vec![
                raw_row("ZZZ 9XX", "3"),
                raw_row("Total Credits", "3"),
            ],
        )];
        let config = EngineConfig::default();
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();
        assert!(matches!(tables[0].rows[1].code.expr, Expr::Unparsed(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_elective_title_matching() {
        let config = EngineConfig::default();
        let tables = vec![
            table_from(
                1,
                "Biology, BS",
                "Biology, BS",
                TableClass::CourseList,
                "",
                vec![
                    raw_row("Ecology Electives (see list below)", "6"),
                    raw_row("Total Credits", "6"),
                ],
            ),
            table_from(
                2,
                "Biology, BS",
                "Biology, BS : Ecology Electives",
                TableClass::CourseList,
                "",
                vec![raw_row("BIO 310", ""), raw_row("BIO 320", "")],
            ),
        ];
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();
        assert_eq!(tables[0].rows[1].code.expr, Expr::TableRef(TableId(2)));
    }

    #[test]
    fn test_fragment_link_resolution() {
        let config = EngineConfig::default();
        let mut gened_row = raw_row("General Education Humanities", "3");
        gened_row.fragment_link = Some("/geneds#humanities".to_string());
        let tables = vec![
            table_from(
                1,
                "Biology, BS",
                "Biology, BS",
                TableClass::CourseList,
                "/biology",
                vec![gened_row, raw_row("Total Credits", "3")],
            ),
            table_from(
                9001,
                "GENEDS",
                "Humanities",
                TableClass::CourseList,
                "/geneds#humanities",
                vec![raw_row("HUM 101", "3"), raw_row("Total Credits", "3")],
            ),
        ];
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();
        assert_eq!(
            tables[0].rows[1].code.expr,
            Expr::TableRef(TableId(9001))
        );
    }

    #[test]
    fn test_track_inference_from_header_suffix() {
        let config = EngineConfig::default();
        let tables = vec![
            table_from(
                1,
                "Biology, BS",
                "Biology, BS : Ecology",
                TableClass::PlanGrid,
                "",
                vec![raw_row("BIO 101", "4"), raw_row("Total Credits", "4")],
            ),
            table_from(
                2,
                "Biology, BS",
                "Biology, BS : Genetics",
                TableClass::PlanGrid,
                "",
                vec![raw_row("BIO 102", "4"), raw_row("Total Credits", "4")],
            ),
        ];
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();
        assert_eq!(tables[0].track.as_deref(), Some("Biology, BS : Ecology"));
        assert_eq!(tables[1].track.as_deref(), Some("Biology, BS : Genetics"));
    }

    #[test]
    fn test_single_table_has_no_track() {
        let config = EngineConfig::default();
        let tables = vec![table_from(
            1,
            "Biology, BS",
            "Biology, BS",
            TableClass::PlanGrid,
            "",
            vec![raw_row("BIO 101", "4"), raw_row("Total Credits", "4")],
        )];
        let mut registry = GroupRegistry::new();
        let tables = resolve_references(tables, &catalog(), &config, &mut registry).unwrap();
        assert_eq!(tables[0].track, None);
        assert_eq!(tables[0].degree_type, Some(DegreeType::Bachelor));
    }
}
