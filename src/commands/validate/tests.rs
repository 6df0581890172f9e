use super::run::build_report;
use super::*;
use crate::model::{
    KEYWORD_CATEGORY_AUTO, KeywordEntry, KeywordsMetadata, LinksMetadata, SectionCategory,
    SectionKeywordLink, SectionRecord, SectionsMetadata,
};

const LIMITS: ValidationLimits = ValidationLimits {
    min_content_chars: 10,
    max_keywords: 2,
};

fn section(id: &str, content: &str) -> SectionRecord {
    SectionRecord {
        id: id.to_string(),
        title: "17-1 햄류(*축산물가공품)".to_string(),
        content: content.to_string(),
        category: SectionCategory::LivestockProcessed,
        file_source: "codex.txt".to_string(),
        character_count: content.chars().count(),
        section_number: "17-1".to_string(),
    }
}

fn keyword(id: u64, keyword: &str) -> KeywordEntry {
    KeywordEntry {
        id,
        keyword: keyword.to_string(),
        search_count: 0,
        category: KEYWORD_CATEGORY_AUTO.to_string(),
    }
}

fn link(id: u64, section_id: &str, keyword_id: u64) -> SectionKeywordLink {
    SectionKeywordLink {
        id,
        section_id: section_id.to_string(),
        keyword_id,
    }
}

fn fixture() -> (SectionsFile, KeywordsFile, LinksFile) {
    let sections = vec![
        section("section-17_1", "17-1 햄류 식육을 염지한 것을 말한다."),
        section("section-17_2", "17-2 소시지류 식육을 충전한 것을 말한다."),
    ];
    let keywords = vec![keyword(1, "소시지류"), keyword(2, "햄류")];
    let links = vec![
        link(1, "section-17_1", 2),
        link(2, "section-17_2", 1),
    ];

    (
        SectionsFile {
            metadata: SectionsMetadata {
                source_file: "data/codex.txt".to_string(),
                source_sha256: "0".repeat(64),
                encoding: "cp949".to_string(),
                processed_at: "2026-01-01T00:00:00Z".to_string(),
                total_sections: sections.len(),
            },
            sections,
        },
        KeywordsFile {
            metadata: KeywordsMetadata {
                total_keywords: keywords.len(),
                processed_at: "2026-01-01T00:00:00Z".to_string(),
            },
            keywords,
        },
        LinksFile {
            metadata: LinksMetadata {
                total_connections: links.len(),
                processed_at: "2026-01-01T00:00:00Z".to_string(),
            },
            connections: links,
        },
    )
}

fn result_of<'a>(checks: &'a [QualityCheck], check_id: &str) -> &'a str {
    checks
        .iter()
        .find(|check| check.check_id == check_id)
        .map(|check| check.result.as_str())
        .unwrap_or("missing")
}

#[test]
fn consistent_outputs_pass_every_check() {
    let (sections, keywords, links) = fixture();
    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    let summary = summarize_checks(&checks);

    assert_eq!(summary.total_checks, 9);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.pending, 0);
    assert_eq!(summary.passed, 9);
}

#[test]
fn stale_character_count_fails() {
    let (mut sections, keywords, links) = fixture();
    sections.sections[0].character_count += 1;

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-001"), "failed");
}

#[test]
fn short_section_and_duplicate_ids_fail() {
    let (mut sections, keywords, links) = fixture();
    sections.sections[1] = section("section-17_1", "짧음");

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-002"), "failed");
    assert_eq!(result_of(&checks, "V-003"), "failed");
}

#[test]
fn keyword_vocabulary_must_be_sorted_and_dense() {
    let (sections, mut keywords, links) = fixture();
    keywords.keywords = vec![keyword(1, "햄류"), keyword(3, "소시지류")];

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-005"), "failed");
    assert_eq!(result_of(&checks, "V-004"), "pass");
}

#[test]
fn single_character_keyword_fails() {
    let (sections, mut keywords, links) = fixture();
    keywords.keywords.push(keyword(3, "힣"));
    keywords.metadata.total_keywords = 3;

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-004"), "failed");
}

#[test]
fn dangling_and_duplicate_links_fail() {
    let (sections, keywords, mut links) = fixture();
    links.connections.push(link(3, "section-99_9", 1));
    links.connections.push(link(3, "section-17_1", 2));
    links.metadata.total_connections = links.connections.len();

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-006"), "failed");
    assert_eq!(result_of(&checks, "V-007"), "failed");
}

#[test]
fn too_many_keywords_per_section_fails() {
    let (sections, mut keywords, mut links) = fixture();
    keywords.keywords.push(keyword(3, "햄류제품"));
    keywords.metadata.total_keywords = 3;
    links.connections = vec![
        link(1, "section-17_1", 1),
        link(2, "section-17_1", 2),
        link(3, "section-17_1", 3),
    ];
    links.metadata.total_connections = 3;

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    assert_eq!(result_of(&checks, "V-008"), "failed");
    assert_eq!(result_of(&checks, "V-006"), "pass");
}

#[test]
fn metadata_totals_are_compared() {
    let (mut sections, keywords, links) = fixture();
    sections.metadata.total_sections = 5;

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    let metadata = checks
        .iter()
        .find(|check| check.check_id == "V-009")
        .expect("metadata check should exist");
    assert_eq!(metadata.result, "failed");
    assert_eq!(metadata.violations, 1);
}

#[test]
fn empty_collections_are_pending() {
    let (mut sections, mut keywords, mut links) = fixture();
    sections.sections.clear();
    sections.metadata.total_sections = 0;
    keywords.keywords.clear();
    keywords.metadata.total_keywords = 0;
    links.connections.clear();
    links.metadata.total_connections = 0;

    let checks = build_quality_checks(&sections, &keywords, &links, LIMITS);
    let summary = summarize_checks(&checks);

    assert_eq!(summary.pending, 8);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn duplicate_count_counts_repeats() {
    assert_eq!(duplicate_count(["a", "b", "a", "a"]), 2);
    assert_eq!(duplicate_count(Vec::<u64>::new()), 0);
}

#[test]
fn build_report_reads_outputs_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let (sections, keywords, mut links) = fixture();
    write_json_pretty(&dir.path().join(SECTIONS_FILE_NAME), &sections)
        .expect("sections should be written");
    write_json_pretty(&dir.path().join(KEYWORDS_FILE_NAME), &keywords)
        .expect("keywords should be written");
    write_json_pretty(&dir.path().join(LINKS_FILE_NAME), &links)
        .expect("links should be written");

    let report = build_report(dir.path(), LIMITS).expect("report should build");
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.checks.len(), 9);

    links.connections[0].keyword_id = 999;
    write_json_pretty(&dir.path().join(LINKS_FILE_NAME), &links)
        .expect("links should be rewritten");

    let report = build_report(dir.path(), LIMITS).expect("report should build");
    assert_eq!(report.summary.failed, 1);
    assert_eq!(result_of(&report.checks, "V-006"), "failed");
}

#[test]
fn build_report_fails_when_outputs_are_missing() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let error = build_report(dir.path(), LIMITS).expect_err("missing outputs should fail");
    assert!(error.to_string().contains(SECTIONS_FILE_NAME));
}
