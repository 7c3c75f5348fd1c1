//! Keyword dictionaries and phrase canonicalization.
//!
//! Catalog tables phrase the same requirement a dozen ways ("semester
//! hours", "credit hours", "units"; "no more than", "up to", "at most").
//! One canonicalization pass rewrites every synonym to a fixed keyword and
//! every number word to a digit, so the label parser only has to recognize
//! the canonical forms.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GROUP_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(course groups?|groups?|concentrations?|lists?|tracks?|options?|subfields?|fields|areas)\b",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)]
static COURSE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(courses?|classes)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static CREDIT_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(credits?|(credit|semester) hours?|hours?)\b").expect("valid regex")
});

#[allow(clippy::expect_used)]
static LAB_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(labs?|laboratory)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static MAX_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(not? more than|max(imum)?( of)?|as (many|much) as|at most|up to|may( choose| select)?)\b")
        .expect("valid regex")
});

#[allow(clippy::expect_used)]
static UPPERDIV_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(3000?-? or 4000?-? ?level|upper-? ?level|upper ?-? ?division)\b")
        .expect("valid regex")
});

#[allow(clippy::expect_used)]
static PER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(from each|from every)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static TWO_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(one pair of|both)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static FOUR_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(two pairs of)\b").expect("valid regex"));

#[allow(clippy::expect_used)]
static FROM_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(belonging to)\b").expect("valid regex"));

/// Number words one through twenty plus thirty, in replacement order.
static NUMBER_WORDS: &[(&str, &str)] = &[
    (r"(?i)\bthirty\b", "30"),
    (r"(?i)\btwenty\b", "20"),
    (r"(?i)\bnineteen\b", "19"),
    (r"(?i)\beighteen\b", "18"),
    (r"(?i)\bseventeen\b", "17"),
    (r"(?i)\bsixteen\b", "16"),
    (r"(?i)\bfifteen\b", "15"),
    (r"(?i)\bfourteen\b", "14"),
    (r"(?i)\bthirteen\b", "13"),
    (r"(?i)\btwelve\b", "12"),
    (r"(?i)\beleven\b", "11"),
    (r"(?i)\bten\b", "10"),
    (r"(?i)\bnine\b", "9"),
    (r"(?i)\beight\b", "8"),
    (r"(?i)\bseven\b", "7"),
    (r"(?i)\bsix\b", "6"),
    (r"(?i)\bfive\b", "5"),
    (r"(?i)\bfour\b", "4"),
    (r"(?i)\bthree\b", "3"),
    (r"(?i)\btwo\b", "2"),
    (r"(?i)\bone\b", "1"),
];

#[allow(clippy::expect_used)]
static NUMBER_WORD_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    NUMBER_WORDS
        .iter()
        .map(|(pattern, digit)| (Regex::new(pattern).expect("valid regex"), *digit))
        .collect()
});

#[allow(clippy::expect_used)]
static NUMBER_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d\d?) ?(?:-|to) ?(\d\d?)\b").expect("valid regex"));

/// Course/credit values that merely reference the size of the group below
/// ("choose two of the following 5 courses": the 5 is not a requirement).
#[allow(clippy::expect_used)]
static NONCODE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(of|from) the following \d\d?\b( (credits|courses|groups))?")
        .expect("valid regex")
});

/// Noun labels immediately followed by a number ("Group 1:", "Lab 4").
#[allow(clippy::expect_used)]
static NOUN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(groups|labs|courses) \d\d?\b:?").expect("valid regex"));

#[allow(clippy::expect_used)]
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"  +").expect("valid regex"));

fn replace_all_owned(re: &Regex, text: String, replacement: &str) -> String {
    match re.replace_all(&text, replacement) {
        Cow::Borrowed(_) => text,
        Cow::Owned(s) => s,
    }
}

/// Rewrite synonyms and number words in a row label to canonical forms.
///
/// After this pass, quantities appear as `N credits` / `N courses` /
/// `N labs` / `N groups`, qualifiers as `max` / `upperdiv` / `per`, and
/// ranges as `N-M`. Case of untouched words is preserved.
#[must_use]
pub fn canonicalize(label: &str) -> String {
    let mut text = label.to_string();

    // Pair words first so "one pair of" becomes "two" before number words run.
    text = replace_all_owned(&TWO_WORDS, text, "two");
    text = replace_all_owned(&FOUR_WORDS, text, "four");

    text = replace_all_owned(&COURSE_WORDS, text, "courses");
    text = replace_all_owned(&GROUP_WORDS, text, "groups");
    text = replace_all_owned(&CREDIT_WORDS, text, "credits");
    text = replace_all_owned(&LAB_WORDS, text, "labs");
    text = replace_all_owned(&MAX_WORDS, text, "max");
    text = replace_all_owned(&UPPERDIV_WORDS, text, "upperdiv");
    text = replace_all_owned(&PER_WORDS, text, "per");
    text = replace_all_owned(&FROM_WORDS, text, "from");

    for (re, digit) in NUMBER_WORD_RES.iter() {
        text = replace_all_owned(re, text, digit);
    }
    text = replace_all_owned(&NUMBER_RANGE, text, "$1-$2");

    text = replace_all_owned(&NONCODE_REFERENCE, text, "");
    text = replace_all_owned(&NOUN_LABEL, text, "");

    text = replace_all_owned(&MULTI_SPACE, text, " ");
    text.trim().to_string()
}

/// Group nouns present in a label, lowercased and singular, deduplicated.
///
/// Used to tie metagroup headers to their sibling group headers ("choose one
/// of the following concentrations" ↔ "Concentration A").
#[must_use]
pub fn group_nouns(label: &str) -> Vec<String> {
    let mut nouns: Vec<String> = GROUP_WORDS
        .find_iter(label)
        .map(|m| m.as_str().to_lowercase().trim_end_matches('s').to_string())
        .collect();
    nouns.sort();
    nouns.dedup();
    nouns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonicalize_synonyms() {
        assert_eq!(
            canonicalize("Choose nine semester hours"),
            "Choose 9 credits"
        );
        assert_eq!(canonicalize("select two classes"), "select 2 courses");
        assert_eq!(
            canonicalize("no more than one laboratory"),
            "max 1 labs"
        );
        assert_eq!(
            canonicalize("Upper-division electives: six credits"),
            "upperdiv electives: 6 credits"
        );
    }

    #[test]
    fn test_canonicalize_ranges() {
        assert_eq!(canonicalize("3 to 6 credits"), "3-6 credits");
        assert_eq!(canonicalize("3 - 6 credit hours"), "3-6 credits");
    }

    #[test]
    fn test_canonicalize_pairs() {
        assert_eq!(canonicalize("one pair of courses"), "2 courses");
    }

    #[test]
    fn test_canonicalize_drops_group_size_references() {
        assert_eq!(
            canonicalize("Choose two of the following 5 courses"),
            "Choose 2"
        );
    }

    #[test]
    fn test_canonicalize_drops_noun_labels() {
        // "Group 1:" is a name, not a quantity of groups.
        assert_eq!(canonicalize("Group 1: select one course"), "select 1 courses");
    }

    #[test]
    fn test_group_nouns() {
        assert_eq!(
            group_nouns("Choose one of the following concentrations"),
            vec!["concentration"]
        );
        assert_eq!(
            group_nouns("Concentration A: Ecology track options"),
            vec!["concentration", "option", "track"]
        );
        assert!(group_nouns("BIO 101").is_empty());
    }
}
