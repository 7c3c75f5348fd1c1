//! End-to-end integration tests for the requirement pipeline.
//!
//! Builds a realistic degree page (four-year plan grid, requirement course
//! list with a metagroup, a wildcard, and an elective reference, plus the
//! elective list itself) and checks the serialized output, registry, and
//! diagnostics.

use coursemap_engine::registry::ELECTIVES;
use coursemap_engine::types::{CourseCode, RawRow, RawTable, TableClass, TableId};
use coursemap_engine::{organize_page, CourseCatalog, DegreeType, EngineConfig, Flag};

fn row(label: &str, credits: &str) -> RawRow {
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

fn classed(label: &str, credits: &str, class: &str) -> RawRow {
    let mut r = row(label, credits);
    r.semantic_class = Some(class.to_string());
    r
}

fn catalog() -> CourseCatalog {
    CourseCatalog::new(vec![
        CourseCode::new("MAT", "301"),
        CourseCode::new("MAT", "320"),
        CourseCode::new("BIO", "310"),
        CourseCode::new("BIO", "320"),
    ])
}

/// The degree page under test: one plan grid, one requirement list with
/// nested structure, one elective list.
fn degree_page() -> Vec<RawTable> {
    let degree = "Agricultural Biology, BS";

    let plan_grid = RawTable {
        table_id: TableId(9),
        degree: degree.to_string(),
        header_text: format!("{degree} : Four Year Plan"),
        table_class: TableClass::PlanGrid,
        source_link: "https://catalog.example.edu/agbio/plan".to_string(),
        rows: vec![
            classed("Freshman Fall", "", "plangridterm"),
            row("LIFE 102", "3"),
            row("CHEM 107", "4"),
            classed("", "7", "plangridsum"),
            classed("Freshman Spring", "", "plangridterm"),
            row("LIFE 103", "3"),
            row("CO 150", "3"),
            classed("", "6", "plangridsum"),
            classed("", "13", "plangridtotal"),
        ],
    };

    let requirements = RawTable {
        table_id: TableId(10),
        degree: degree.to_string(),
        header_text: degree.to_string(),
        table_class: TableClass::CourseList,
        source_link: "https://catalog.example.edu/agbio".to_string(),
        rows: vec![
            row("AREC 202", "3"),
            row("CHEM 107", "4"),
            row("MAT 3XX", "3"),
            row("Agricultural Biology Electives (see list below)", "6"),
            row("Choose one of the following groups:", ""),
            row("Group A:", ""),
            row("LIFE 102", "3"),
            row("LIFE 103", "3"),
            row("Group B:", ""),
            row("BZ 110", "3"),
            row("BZ 111", "3"),
            row("Total Credits", "28"),
        ],
    };

    let electives = RawTable {
        table_id: TableId(11),
        degree: degree.to_string(),
        header_text: format!("{degree} : Agricultural Biology Electives"),
        table_class: TableClass::CourseList,
        source_link: "https://catalog.example.edu/agbio#electives".to_string(),
        rows: vec![row("BIO 310", ""), row("BIO 320", "")],
    };

    vec![plan_grid, requirements, electives]
}

#[test]
fn test_degree_page_serializes_fully() {
    let result = organize_page(&degree_page(), &catalog(), &EngineConfig::default()).unwrap();

    assert!(result.failures.is_empty(), "failures: {:?}", result.failures);
    assert_eq!(result.tables.len(), 3);

    let requirements = result
        .tables
        .iter()
        .find(|t| t.table_id == TableId(10))
        .unwrap();
    assert_eq!(
        requirements.code,
        "{_AREC202_3_credits_ & _CHEM107_4_credits_ & \
         _3_credits__0001_ & _6_credits__table_0011_ & \
         _1_groups_{{_LIFE102_3_credits_ & _LIFE103_3_credits_} | \
         {_BZ110_3_credits_ & _BZ111_3_credits_}}}"
    );
    assert!(requirements.flags.is_empty(), "flags: {:?}", requirements.flags);
    assert_eq!(requirements.degree_type, Some(DegreeType::Bachelor));
    assert_eq!(requirements.max_degree_credits, Some(28.0));
}

#[test]
fn test_plan_grid_terms_join() {
    let result = organize_page(&degree_page(), &catalog(), &EngineConfig::default()).unwrap();
    let plan = result
        .tables
        .iter()
        .find(|t| t.table_id == TableId(9))
        .unwrap();
    assert_eq!(
        plan.code,
        "{{_LIFE102_3_credits_ & _CHEM107_4_credits_} & \
         {_LIFE103_3_credits_ & _CO150_3_credits_}}"
    );
    assert!(plan.flags.is_empty());
}

#[test]
fn test_elective_list_is_an_or_pool() {
    let result = organize_page(&degree_page(), &catalog(), &EngineConfig::default()).unwrap();
    let electives = result
        .tables
        .iter()
        .find(|t| t.table_id == TableId(11))
        .unwrap();
    assert_eq!(electives.code, "{_BIO310_ | _BIO320_}");
}

#[test]
fn test_registry_holds_wildcard_expansion() {
    let result = organize_page(&degree_page(), &catalog(), &EngineConfig::default()).unwrap();

    // Reserved electives entry plus the MAT 3XX expansion.
    assert_eq!(result.registry.len(), 2);
    assert!(result.registry.get(ELECTIVES).is_some());
    let mat = result.registry.find_by_name("_MAT_3xxx_").unwrap();
    assert_eq!(
        result.registry.get(mat).unwrap().courses,
        vec![CourseCode::new("MAT", "301"), CourseCode::new("MAT", "320")]
    );
}

#[test]
fn test_every_requirement_resolved() {
    let result = organize_page(&degree_page(), &catalog(), &EngineConfig::default()).unwrap();
    assert_eq!(result.stats.unknown, 0);
    assert_eq!(result.stats.unknown_ratio(), 0.0);
    // Plan grid: 4 courses; requirements: 8 content rows; electives: 2.
    assert_eq!(result.stats.total_requirements, 14);
}

#[test]
fn test_credit_mismatch_is_reported_not_corrected() {
    let mut page = degree_page();
    // Break the declared total.
    page[1].rows.last_mut().unwrap().credits = "40".to_string();
    let result = organize_page(&page, &catalog(), &EngineConfig::default()).unwrap();

    let requirements = result
        .tables
        .iter()
        .find(|t| t.table_id == TableId(10))
        .unwrap();
    assert!(requirements.flags.contains(&Flag::CreditMismatch));
    // The expression itself is unchanged by the mismatch.
    assert!(requirements.code.contains("_AREC202_3_credits_"));
}

#[test]
fn test_malformed_table_fails_alone() {
    let mut page = degree_page();
    page.push(RawTable {
        table_id: TableId(12),
        degree: "Agricultural Biology, BS".to_string(),
        header_text: String::new(),
        table_class: TableClass::CourseList,
        source_link: String::new(),
        rows: vec![],
    });
    let result = organize_page(&page, &catalog(), &EngineConfig::default()).unwrap();

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].table_id, TableId(12));
    // The other three tables still emit.
    assert_eq!(result.tables.len(), 3);
}
