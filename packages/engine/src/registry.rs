//! Group/elective registry and the known-course catalog.
//!
//! The registry maps a group id to a flattened "or"-list of course codes.
//! Serialized expressions reference entries by token (`_0003_`), keeping
//! open-ended requirements like "any MAT 3XX course" compact. Entries are
//! immutable once created and live for the whole serialization run.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{CourseCode, GroupId};

/// Reserved registry entry for generic electives.
pub const ELECTIVES: GroupId = GroupId(0);

/// One registry entry: a named, flattened list of alternative courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: GroupId,
    /// Source name of the group (a wildcard form or a cleaned title).
    pub name: String,
    /// Courses the group stands for, an implicit "or"-list.
    pub courses: Vec<CourseCode>,
}

/// Registry of course groups referenced by serialized expressions.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    entries: Vec<GroupEntry>,
}

impl GroupRegistry {
    /// Create a registry seeded with the reserved generic-electives entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![GroupEntry {
                id: ELECTIVES,
                name: "electives".to_string(),
                courses: Vec::new(),
            }],
        }
    }

    /// Register a group, returning its id.
    ///
    /// Entries are immutable: registering a name that already exists
    /// returns the existing id and leaves the entry untouched.
    pub fn register(&mut self, name: impl Into<String>, courses: Vec<CourseCode>) -> GroupId {
        let name = name.into();
        if let Some(existing) = self.find_by_name(&name) {
            return existing;
        }
        let id = GroupId(self.entries.len() as u32);
        self.entries.push(GroupEntry { id, name, courses });
        id
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&GroupEntry> {
        self.entries.get(id.0 as usize)
    }

    /// Look up an id by group name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<GroupId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The known course codes of one school, from the course-description
/// collaborator. Used to expand department/number wildcards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseCatalog {
    courses: Vec<CourseCode>,
}

impl CourseCatalog {
    #[must_use]
    pub fn new(courses: Vec<CourseCode>) -> Self {
        Self { courses }
    }

    /// Distinct department prefixes, sorted.
    #[must_use]
    pub fn depts(&self) -> BTreeSet<&str> {
        self.courses.iter().map(|c| c.dept.as_str()).collect()
    }

    /// All courses in `dept` whose number matches `number_re` in full.
    #[must_use]
    pub fn matching(&self, dept: &str, number_re: &Regex) -> Vec<CourseCode> {
        self.courses
            .iter()
            .filter(|c| c.dept == dept && full_match(number_re, &c.number))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn full_match(re: &Regex, text: &str) -> bool {
    re.find(text).is_some_and(|m| m.start() == 0 && m.end() == text.len())
}
