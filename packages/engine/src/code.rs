//! The encoded requirement expression and its textual grammar.
//!
//! A [`Code`] is a tagged tree: leaf course codes, and/or groups, references
//! to registry groups or other tables, and preserved free text. Rendering to
//! the external bracket/underscore grammar happens in exactly one place, the
//! [`fmt::Display`] impl, keeping the internal representation decoupled from
//! the textual contract.
//!
//! Grammar summary:
//!
//! ```text
//! leaf      _BIO101_                      course code
//! group     {expr & expr} / {expr | expr} all-of / any-of
//! table ref _table_9011_                  another table's serialized result
//! group ref _0003_                        registry group (flattened or-list)
//! free text {Lower-div. Written Communication}
//! modifiers _3_credits_ _2_courses_ _upperdiv_ _max_ _per_group_
//! ```
//!
//! Modifiers are rendered as a suffix on leaves (`_BIO101_4_credits_`) and
//! as a prefix on groups and references (`_6_credits__table_9011_`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CourseCode, GroupId, TableId};

/// Operator joining the children of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    And,
    Or,
}

impl Op {
    /// Separator used in the rendered grammar.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        match self {
            Self::And => " & ",
            Self::Or => " | ",
        }
    }
}

/// A count or count range attached to a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub min: u32,
    pub max: u32,
}

impl Quantity {
    #[must_use]
    pub fn exact(n: u32) -> Self {
        Self { min: n, max: n }
    }

    #[must_use]
    pub fn range(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Kind of a modifier, used for conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Credits,
    Courses,
    Labs,
    Groups,
    UpperDiv,
    Max,
    PerGroup,
}

/// A numeric or qualifier modifier governing a leaf or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// `_N_credits_`: credits to be earned.
    Credits(Quantity),
    /// `_N_courses_`: courses to be taken.
    Courses(Quantity),
    /// `_N_labs_`: lab courses to be taken.
    Labs(Quantity),
    /// `_N_groups_`: groups to choose from a metagroup.
    Groups(Quantity),
    /// `_upperdiv_`: restricted to upper-division (3000/4000 level).
    UpperDiv,
    /// `_max_`: the quantity is a maximum, not a minimum.
    Max,
    /// `_per_group_`: the quantity applies to each group separately.
    PerGroup,
}

impl Modifier {
    #[must_use]
    pub fn kind(&self) -> ModifierKind {
        match self {
            Self::Credits(_) => ModifierKind::Credits,
            Self::Courses(_) => ModifierKind::Courses,
            Self::Labs(_) => ModifierKind::Labs,
            Self::Groups(_) => ModifierKind::Groups,
            Self::UpperDiv => ModifierKind::UpperDiv,
            Self::Max => ModifierKind::Max,
            Self::PerGroup => ModifierKind::PerGroup,
        }
    }

    /// Quantity modifiers express "choose N"; their presence on a header
    /// makes the governed rows alternatives rather than a conjunction.
    #[must_use]
    pub fn is_choose_quantity(&self) -> bool {
        matches!(
            self,
            Self::Credits(_) | Self::Courses(_) | Self::Labs(_) | Self::Groups(_)
        )
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credits(q) => write!(f, "_{q}_credits_"),
            Self::Courses(q) => write!(f, "_{q}_courses_"),
            Self::Labs(q) => write!(f, "_{q}_labs_"),
            Self::Groups(q) => write!(f, "_{q}_groups_"),
            Self::UpperDiv => write!(f, "_upperdiv_"),
            Self::Max => write!(f, "_max_"),
            Self::PerGroup => write!(f, "_per_group_"),
        }
    }
}

/// Expression node of a requirement code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// No encoded content (descriptive rows, headers before collapse).
    Empty,
    /// One course code.
    Leaf(CourseCode),
    /// A parenthesized group of alternatives or conjuncts.
    Group { op: Op, children: Vec<Code> },
    /// Reference to another table's serialized result.
    TableRef(TableId),
    /// Reference to a registry group (flattened or-list of courses).
    GroupRef(GroupId),
    /// Unparsed free text, preserved verbatim inside braces.
    Unparsed(String),
}

/// A requirement expression plus the modifiers and superscripts governing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub expr: Expr,
    pub modifiers: Vec<Modifier>,
    pub superscripts: Vec<String>,
}

impl Code {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            expr: Expr::Empty,
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    #[must_use]
    pub fn leaf(course: CourseCode) -> Self {
        Self {
            expr: Expr::Leaf(course),
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(op: Op, children: Vec<Code>) -> Self {
        Self {
            expr: Expr::Group { op, children },
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    #[must_use]
    pub fn table_ref(id: TableId) -> Self {
        Self {
            expr: Expr::TableRef(id),
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    #[must_use]
    pub fn group_ref(id: GroupId) -> Self {
        Self {
            expr: Expr::GroupRef(id),
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    #[must_use]
    pub fn unparsed(text: impl Into<String>) -> Self {
        Self {
            expr: Expr::Unparsed(text.into()),
            modifiers: Vec::new(),
            superscripts: Vec::new(),
        }
    }

    /// Prepend modifiers inherited from a governing row.
    #[must_use]
    pub fn with_prepended_modifiers(mut self, inherited: &[Modifier]) -> Self {
        if !inherited.is_empty() {
            let mut all = inherited.to_vec();
            all.append(&mut self.modifiers);
            self.modifiers = all;
        }
        self
    }

    /// A single course code, nothing else.
    #[must_use]
    pub fn is_pure_leaf(&self) -> bool {
        matches!(self.expr, Expr::Leaf(_))
    }

    /// A one-line group whose children are all plain course codes.
    #[must_use]
    pub fn is_course_combo(&self) -> bool {
        match &self.expr {
            Expr::Group { children, .. } => {
                !children.is_empty() && children.iter().all(|c| matches!(c.expr, Expr::Leaf(_)))
            }
            _ => false,
        }
    }

    /// Whether this code expresses an actual requirement, as opposed to a
    /// descriptive name. Used when pruning spent headers after a collapse
    /// pass.
    #[must_use]
    pub fn carries_requirement(&self) -> bool {
        match &self.expr {
            Expr::Leaf(_) | Expr::Group { .. } | Expr::TableRef(_) | Expr::GroupRef(_) => true,
            Expr::Empty | Expr::Unparsed(_) => {
                !self.modifiers.is_empty() || !self.superscripts.is_empty()
            }
        }
    }

    /// Multiset of leaf course tokens in this expression.
    pub fn leaf_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        self.collect_leaf_tokens(&mut tokens);
        tokens
    }

    fn collect_leaf_tokens(&self, out: &mut Vec<String>) {
        match &self.expr {
            Expr::Leaf(course) => out.push(course.token()),
            Expr::Group { children, .. } => {
                for child in children {
                    child.collect_leaf_tokens(out);
                }
            }
            Expr::TableRef(id) => out.push(id.to_token()),
            Expr::GroupRef(id) => out.push(id.to_token()),
            Expr::Empty | Expr::Unparsed(_) => {}
        }
    }
}

/// Append `token` (which starts and ends with `_`) onto `buf`, sharing the
/// boundary underscore: `_BIO101_` + `_4_credits_` = `_BIO101_4_credits_`.
fn push_merged(buf: &mut String, token: &str) {
    if buf.ends_with('_') {
        buf.push_str(token.strip_prefix('_').unwrap_or(token));
    } else {
        buf.push_str(token);
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        // Groups, references, and free text take their modifiers as a prefix.
        if !matches!(self.expr, Expr::Leaf(_)) {
            for m in &self.modifiers {
                out.push_str(&m.to_string());
            }
        }

        match &self.expr {
            Expr::Empty => {}
            Expr::Leaf(course) => {
                out.push('_');
                out.push_str(&course.token());
                out.push('_');
                for m in &self.modifiers {
                    push_merged(&mut out, &m.to_string());
                }
            }
            Expr::Group { op, children } => {
                out.push('{');
                let rendered: Vec<String> = children.iter().map(ToString::to_string).collect();
                out.push_str(&rendered.join(op.separator()));
                out.push('}');
            }
            Expr::TableRef(id) => out.push_str(&id.to_token()),
            Expr::GroupRef(id) => out.push_str(&id.to_token()),
            Expr::Unparsed(text) => {
                out.push('{');
                out.push_str(text);
                out.push('}');
            }
        }

        for s in &self.superscripts {
            out.push('<');
            out.push_str(s);
            out.push('>');
        }

        f.write_str(&out)
    }
}
