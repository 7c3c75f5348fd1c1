//! Row label parsing: course-code expressions and requirement phrases.
//!
//! Labels are parsed in two independent ways. The raw label is scanned for
//! a pure course-code expression ("BIO 101", "LIFE 102 or LIFE 103",
//! "CHEM 111 & CHEM 112"); anything that is not entirely course codes and
//! separators is preserved as free text. Separately, the canonicalized
//! label (see [`crate::phrases`]) is scanned for quantity and qualifier
//! phrases, which become typed [`Modifier`]s.

use std::sync::LazyLock;

use regex::Regex;

use crate::code::{Code, Modifier, Op, Quantity};
use crate::config::CoursePatterns;
use crate::phrases;
use crate::types::CourseCode;

/// Result of scanning a label for a pure course-code expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseExpr {
    /// The label is not (only) course codes.
    NotCourses,
    /// The label is one course code or a single-operator list of them.
    Parsed(Code),
    /// Course codes joined by a mix of "and" and "or" with no brackets to
    /// disambiguate. Reported, never silently resolved.
    Ambiguous,
}

/// Fully parsed row label.
#[derive(Debug, Clone)]
pub struct ParsedLabel {
    /// Encoded form: a leaf, a one-line group, or preserved free text.
    pub code: Code,
    /// Quantity/qualifier modifiers found in the label.
    pub modifiers: Vec<Modifier>,
    /// The label mixed "and" and "or" without disambiguation.
    pub ambiguous_ops: bool,
    /// Two modifiers of the same kind with different quantities.
    pub conflicting: bool,
    /// Group nouns present in the label.
    pub group_nouns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum CourseToken {
    Course(CourseCode),
    DeptOnly(String),
    NumOnly(String),
    Sep(Op),
}

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static OR_SEP_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?i)or\s+|/\s*|\|\s*)").expect("valid regex"));

#[allow(clippy::expect_used)]
static AND_SEP_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?i)and\s+|&\s*)").expect("valid regex"));

/// Parse a label as a pure course-code expression.
///
/// Departments or numbers implied by context are filled in: "BIO 101 or
/// 102" yields two BIO courses, "BIO or CHEM 101" a course 101 in each
/// department.
pub fn parse_course_expr(label: &str, patterns: &CoursePatterns) -> CourseExpr {
    let text = label.trim().trim_end_matches('.').trim_end_matches(':').trim();
    if text.is_empty() {
        return CourseExpr::NotCourses;
    }

    let Some(tokens) = tokenize_courses(text, patterns) else {
        return CourseExpr::NotCourses;
    };
    let Some(tokens) = fill_implied(tokens) else {
        return CourseExpr::NotCourses;
    };

    let mut courses: Vec<CourseCode> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();
    let mut expect_course = true;
    for token in tokens {
        match (token, expect_course) {
            (CourseToken::Course(c), true) => {
                courses.push(c);
                expect_course = false;
            }
            (CourseToken::Sep(op), false) => {
                ops.push(op);
                expect_course = true;
            }
            // Dangling separator or two adjacent codes without one.
            _ => return CourseExpr::NotCourses,
        }
    }
    if expect_course {
        // Trailing separator.
        return CourseExpr::NotCourses;
    }

    if courses.len() == 1 {
        let only = courses.swap_remove(0);
        return CourseExpr::Parsed(Code::leaf(only));
    }

    let all_or = ops.iter().all(|op| *op == Op::Or);
    let all_and = ops.iter().all(|op| *op == Op::And);
    if !all_or && !all_and {
        return CourseExpr::Ambiguous;
    }

    let op = if all_or { Op::Or } else { Op::And };
    let children = courses.into_iter().map(Code::leaf).collect();
    CourseExpr::Parsed(Code::group(op, children))
}

/// Tokenize a label into course tokens; `None` when any stretch of text is
/// not a course code, a lone department/number, or a separator.
fn tokenize_courses(text: &str, patterns: &CoursePatterns) -> Option<Vec<CourseToken>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        rest = trimmed;

        if let Some(caps) = patterns.course_at.captures(rest) {
            tokens.push(CourseToken::Course(CourseCode::new(
                &caps["dept"],
                &caps["num"],
            )));
            rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
        } else if let Some(m) = OR_SEP_AT.find(rest) {
            tokens.push(CourseToken::Sep(Op::Or));
            rest = &rest[m.end()..];
        } else if let Some(m) = AND_SEP_AT.find(rest) {
            tokens.push(CourseToken::Sep(Op::And));
            rest = &rest[m.end()..];
        } else if let Some(caps) = patterns.number_at.captures(rest) {
            tokens.push(CourseToken::NumOnly(caps["num"].to_string()));
            rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
        } else if let Some(caps) = patterns.dept_at.captures(rest) {
            tokens.push(CourseToken::DeptOnly(caps["dept"].to_string()));
            rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
        } else {
            return None;
        }
    }

    Some(tokens)
}

/// Fill in departments and numbers implied by a neighboring course code.
fn fill_implied(tokens: Vec<CourseToken>) -> Option<Vec<CourseToken>> {
    let mut tokens = tokens;

    // "BIO 101 or 102": a bare number inherits the previous department.
    let mut last_dept: Option<String> = None;
    for token in &mut tokens {
        match token {
            CourseToken::Course(c) => last_dept = Some(c.dept.clone()),
            CourseToken::NumOnly(num) => {
                let dept = last_dept.clone()?;
                *token = CourseToken::Course(CourseCode::new(dept, num.clone()));
            }
            _ => {}
        }
    }

    // "BIO or CHEM 101": a bare department inherits the following number.
    let mut next_num: Option<String> = None;
    for token in tokens.iter_mut().rev() {
        match token {
            CourseToken::Course(c) => next_num = Some(c.number.clone()),
            CourseToken::DeptOnly(dept) => {
                let num = next_num.clone()?;
                *token = CourseToken::Course(CourseCode::new(dept.clone(), num));
            }
            _ => {}
        }
    }

    Some(tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum PhraseToken {
    Quantity(Quantity),
    Keyword(QuantityKind),
    Max,
    UpperDiv,
    Per,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum QuantityKind {
    Credits,
    Courses,
    Labs,
    Groups,
}

impl QuantityKind {
    fn make(self, q: Quantity) -> Modifier {
        match self {
            Self::Credits => Modifier::Credits(q),
            Self::Courses => Modifier::Courses(q),
            Self::Labs => Modifier::Labs(q),
            Self::Groups => Modifier::Groups(q),
        }
    }
}

#[allow(clippy::expect_used)]
static QUANTITY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?:-(\d{1,2}))?$").expect("valid regex"));

#[allow(clippy::expect_used)]
static QUANTITY_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d{1,2})(?:-(\d{1,2}))?-)?(credits|courses|labs|groups)$").expect("valid regex")
});

fn phrase_tokens(canonical: &str) -> Vec<PhraseToken> {
    let mut tokens = Vec::new();
    for word in canonical.split_whitespace() {
        let word = word.trim_matches(|c: char| matches!(c, ',' | ';' | '.' | '(' | ')' | ':'));
        if word.is_empty() {
            continue;
        }
        if let Some(caps) = QUANTITY_WORD.captures(word) {
            let min: u32 = caps[1].parse().unwrap_or(0);
            let max: u32 = caps.get(2).map_or(min, |m| m.as_str().parse().unwrap_or(min));
            tokens.push(PhraseToken::Quantity(Quantity { min, max }));
            continue;
        }
        if let Some(caps) = QUANTITY_KEYWORD.captures(word) {
            // Hyphen-joined forms like "3-credits" carry their own quantity.
            if let Some(min) = caps.get(1) {
                let min: u32 = min.as_str().parse().unwrap_or(0);
                let max: u32 = caps.get(2).map_or(min, |m| m.as_str().parse().unwrap_or(min));
                tokens.push(PhraseToken::Quantity(Quantity { min, max }));
            }
            let kind = match &caps[3] {
                "credits" => QuantityKind::Credits,
                "courses" => QuantityKind::Courses,
                "labs" => QuantityKind::Labs,
                _ => QuantityKind::Groups,
            };
            tokens.push(PhraseToken::Keyword(kind));
            continue;
        }
        tokens.push(match word {
            "max" => PhraseToken::Max,
            "upperdiv" => PhraseToken::UpperDiv,
            "per" => PhraseToken::Per,
            _ => PhraseToken::Other,
        });
    }
    tokens
}

/// Extract modifiers from a canonicalized label.
///
/// A quantity binds to the next keyword even across intervening plain words
/// ("9 upper division credits" carries its 9 to "credits"). "max" before a
/// quantity, or trailing it, marks the requirement as a maximum; a trailing
/// bare "max N" is a maximum course count.
pub fn extract_modifiers(canonical: &str) -> (Vec<Modifier>, bool) {
    let mut mods: Vec<Modifier> = Vec::new();
    let mut pending: Option<Quantity> = None;
    let mut saw_max = false;
    let mut saw_per = false;
    let mut last_kind: Option<QuantityKind> = None;

    for token in phrase_tokens(canonical) {
        match token {
            PhraseToken::Quantity(q) => pending = Some(q),
            PhraseToken::Keyword(kind) => {
                if saw_per && kind == QuantityKind::Groups {
                    mods.push(Modifier::PerGroup);
                    saw_per = false;
                    pending = None;
                } else if let Some(q) = pending.take() {
                    mods.push(kind.make(q));
                    last_kind = Some(kind);
                    if saw_max {
                        mods.push(Modifier::Max);
                        saw_max = false;
                    }
                }
            }
            PhraseToken::Max => {
                if pending.is_none() && !mods.is_empty() {
                    mods.push(Modifier::Max);
                } else {
                    saw_max = true;
                }
            }
            PhraseToken::UpperDiv => {
                // An implicit quantity ("9 credits, 6 upper division") uses
                // the closest prior keyword.
                if let Some(q) = pending.take() {
                    if let Some(kind) = last_kind {
                        mods.push(kind.make(q));
                    }
                }
                mods.push(Modifier::UpperDiv);
            }
            PhraseToken::Per => saw_per = true,
            PhraseToken::Other => {}
        }
    }

    // A leftover "max N" with no keyword is a maximum course count.
    if saw_max {
        if let Some(q) = pending.take() {
            mods.push(Modifier::Courses(q));
            mods.push(Modifier::Max);
        }
    }

    dedup_modifiers(mods)
}

/// Remove exact duplicates; report a conflict when one kind appears with
/// two different quantities ("3 credits" and "2 credits" on one header).
fn dedup_modifiers(mods: Vec<Modifier>) -> (Vec<Modifier>, bool) {
    let mut out: Vec<Modifier> = Vec::new();
    let mut conflict = false;
    for m in mods {
        if out.contains(&m) {
            continue;
        }
        if out
            .iter()
            .any(|prev| prev.kind() == m.kind() && *prev != m)
        {
            conflict = true;
            continue;
        }
        out.push(m);
    }
    (out, conflict)
}

/// Parse a row label into its encoded form and modifiers.
pub fn parse_label(label: &str, patterns: &CoursePatterns) -> ParsedLabel {
    let group_nouns = phrases::group_nouns(label);
    let trimmed = label.trim();

    match parse_course_expr(trimmed, patterns) {
        CourseExpr::Parsed(code) => ParsedLabel {
            code,
            modifiers: Vec::new(),
            ambiguous_ops: false,
            conflicting: false,
            group_nouns,
        },
        CourseExpr::Ambiguous => ParsedLabel {
            code: Code::unparsed(trimmed.trim_end_matches(':').trim()),
            modifiers: Vec::new(),
            ambiguous_ops: true,
            conflicting: false,
            group_nouns,
        },
        CourseExpr::NotCourses => {
            let canonical = phrases::canonicalize(trimmed);
            let (modifiers, conflicting) = extract_modifiers(&canonical);
            let text = trimmed.trim_end_matches(':').trim();
            let code = if text.is_empty() {
                Code::empty()
            } else {
                Code::unparsed(text)
            };
            ParsedLabel {
                code,
                modifiers,
                ambiguous_ops: false,
                conflicting,
                group_nouns,
            }
        }
    }
}
