use super::*;

#[derive(Debug, Serialize, Clone)]
pub struct QualityCheck {
    pub check_id: String,
    pub name: String,
    pub result: String,
    pub violations: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct QualitySummary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub output_dir: String,
    pub summary: QualitySummary,
    pub checks: Vec<QualityCheck>,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidationLimits {
    pub min_content_chars: usize,
    pub max_keywords: usize,
}

fn check(check_id: &str, name: &str, population: usize, violations: usize) -> QualityCheck {
    QualityCheck {
        check_id: check_id.to_string(),
        name: name.to_string(),
        result: if population == 0 {
            "pending"
        } else if violations == 0 {
            "pass"
        } else {
            "failed"
        }
        .to_string(),
        violations,
    }
}

pub fn build_quality_checks(
    sections: &SectionsFile,
    keywords: &KeywordsFile,
    links: &LinksFile,
    limits: ValidationLimits,
) -> Vec<QualityCheck> {
    let mut checks = Vec::new();
    let section_total = sections.sections.len();
    let keyword_total = keywords.keywords.len();
    let link_total = links.connections.len();

    let count_mismatches = sections
        .sections
        .iter()
        .filter(|section| section.character_count != section.content.chars().count())
        .count();
    checks.push(check(
        "V-001",
        "Section character_count matches content length",
        section_total,
        count_mismatches,
    ));

    let short_sections = sections
        .sections
        .iter()
        .filter(|section| section.content.chars().count() < limits.min_content_chars)
        .count();
    checks.push(check(
        "V-002",
        "Section content meets minimum length",
        section_total,
        short_sections,
    ));

    checks.push(check(
        "V-003",
        "Section identifiers unique",
        section_total,
        duplicate_count(sections.sections.iter().map(|section| section.id.as_str())),
    ));

    let keyword_ids = keywords
        .keywords
        .iter()
        .map(|entry| entry.id)
        .collect::<HashSet<u64>>();
    let short_keywords = keywords
        .keywords
        .iter()
        .filter(|entry| entry.keyword.chars().count() < 2)
        .count();
    checks.push(check(
        "V-004",
        "Keywords unique and at least two characters",
        keyword_total,
        duplicate_count(keywords.keywords.iter().map(|entry| entry.keyword.as_str()))
            + (keyword_total - keyword_ids.len())
            + short_keywords,
    ));

    let first_id_offset = keywords
        .keywords
        .first()
        .map(|entry| usize::from(entry.id != 1))
        .unwrap_or(0);
    let unsorted_ids = first_id_offset
        + keywords
            .keywords
            .windows(2)
            .filter(|pair| pair[0].keyword >= pair[1].keyword || pair[1].id != pair[0].id + 1)
            .count();
    checks.push(check(
        "V-005",
        "Keyword identifiers follow sorted vocabulary order",
        keyword_total,
        unsorted_ids,
    ));

    let section_ids = sections
        .sections
        .iter()
        .map(|section| section.id.as_str())
        .collect::<HashSet<&str>>();
    let dangling_links = links
        .connections
        .iter()
        .filter(|link| {
            !section_ids.contains(link.section_id.as_str()) || !keyword_ids.contains(&link.keyword_id)
        })
        .count();
    checks.push(check(
        "V-006",
        "Links reference existing sections and keywords",
        link_total,
        dangling_links,
    ));

    let pair_duplicates = duplicate_count(
        links
            .connections
            .iter()
            .map(|link| (link.section_id.as_str(), link.keyword_id)),
    );
    let link_id_duplicates = duplicate_count(links.connections.iter().map(|link| link.id));
    checks.push(check(
        "V-007",
        "Links unique per section and keyword pair",
        link_total,
        pair_duplicates + link_id_duplicates,
    ));

    let mut per_section = HashMap::<&str, usize>::new();
    for link in &links.connections {
        *per_section.entry(link.section_id.as_str()).or_insert(0) += 1;
    }
    let overloaded_sections = per_section
        .values()
        .filter(|count| **count > limits.max_keywords)
        .count();
    checks.push(check(
        "V-008",
        "Per-section keyword count within bound",
        link_total,
        overloaded_sections,
    ));

    let metadata_mismatches = usize::from(sections.metadata.total_sections != section_total)
        + usize::from(keywords.metadata.total_keywords != keyword_total)
        + usize::from(links.metadata.total_connections != link_total);
    checks.push(check(
        "V-009",
        "Metadata totals match collection sizes",
        3,
        metadata_mismatches,
    ));

    checks
}

pub fn duplicate_count<T, I>(values: I) -> usize
where
    T: Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    for value in values {
        if !seen.insert(value) {
            duplicates += 1;
        }
    }
    duplicates
}

pub fn summarize_checks(checks: &[QualityCheck]) -> QualitySummary {
    let passed = checks.iter().filter(|check| check.result == "pass").count();
    let failed = checks
        .iter()
        .filter(|check| check.result == "failed")
        .count();
    let pending = checks
        .iter()
        .filter(|check| check.result == "pending")
        .count();

    QualitySummary {
        total_checks: checks.len(),
        passed,
        failed,
        pending,
    }
}
