use std::collections::HashMap;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{
    KEYWORDS_FILE_NAME, KeywordEntry, KeywordsFile, LINKS_FILE_NAME, LinksFile,
    SECTIONS_FILE_NAME, SectionsFile,
};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let sections_path = args.output_dir.join(SECTIONS_FILE_NAME);
    let keywords_path = args.output_dir.join(KEYWORDS_FILE_NAME);
    let links_path = args.output_dir.join(LINKS_FILE_NAME);

    info!(output_dir = %args.output_dir.display(), "status requested");

    if sections_path.exists() {
        let sections: SectionsFile = read_json(&sections_path)?;
        let mut per_category = HashMap::<&str, usize>::new();
        for section in &sections.sections {
            *per_category.entry(section.category.as_str()).or_insert(0) += 1;
        }
        let mut per_category = per_category.into_iter().collect::<Vec<(&str, usize)>>();
        per_category.sort();

        info!(
            source = %sections.metadata.source_file,
            encoding = %sections.metadata.encoding,
            processed_at = %sections.metadata.processed_at,
            sections = sections.metadata.total_sections,
            "loaded sections"
        );
        for (category, count) in per_category {
            info!(category = %category, sections = count, "category breakdown");
        }
    } else {
        warn!(path = %sections_path.display(), "sections output missing");
    }

    let keywords = if keywords_path.exists() {
        let keywords: KeywordsFile = read_json(&keywords_path)?;
        info!(
            processed_at = %keywords.metadata.processed_at,
            keywords = keywords.metadata.total_keywords,
            "loaded keywords"
        );
        Some(keywords)
    } else {
        warn!(path = %keywords_path.display(), "keywords output missing");
        None
    };

    let links = if links_path.exists() {
        let links: LinksFile = read_json(&links_path)?;
        info!(
            processed_at = %links.metadata.processed_at,
            connections = links.metadata.total_connections,
            "loaded section keyword links"
        );
        Some(links)
    } else {
        warn!(path = %links_path.display(), "links output missing");
        None
    };

    if let (Some(needle), Some(keywords)) = (args.keyword.as_deref(), keywords.as_ref()) {
        let usage = links
            .as_ref()
            .map(link_counts_by_keyword)
            .unwrap_or_default();
        let matches = matching_keywords(&keywords.keywords, needle, &usage, args.limit);
        if matches.is_empty() {
            info!(keyword = %needle, "no matching keywords");
        }
        for (entry, sections) in matches {
            info!(
                id = entry.id,
                keyword = %entry.keyword,
                search_count = entry.search_count,
                sections,
                "matching keyword"
            );
        }
    }

    Ok(())
}

fn link_counts_by_keyword(links: &LinksFile) -> HashMap<u64, usize> {
    let mut counts = HashMap::new();
    for link in &links.connections {
        *counts.entry(link.keyword_id).or_insert(0) += 1;
    }
    counts
}

/// Keywords containing `needle`, most linked first, then by id.
fn matching_keywords<'a>(
    keywords: &'a [KeywordEntry],
    needle: &str,
    usage: &HashMap<u64, usize>,
    limit: usize,
) -> Vec<(&'a KeywordEntry, usize)> {
    let mut matches = keywords
        .iter()
        .filter(|entry| entry.keyword.contains(needle))
        .map(|entry| (entry, usage.get(&entry.id).copied().unwrap_or(0)))
        .collect::<Vec<(&KeywordEntry, usize)>>();
    matches.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.id.cmp(&right.0.id)));
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KEYWORD_CATEGORY_AUTO, SectionKeywordLink};

    fn entry(id: u64, keyword: &str) -> KeywordEntry {
        KeywordEntry {
            id,
            keyword: keyword.to_string(),
            search_count: 0,
            category: KEYWORD_CATEGORY_AUTO.to_string(),
        }
    }

    #[test]
    fn matching_keywords_orders_by_link_usage_then_id() {
        let keywords = vec![entry(1, "즉석식품"), entry(2, "즉석조리식품"), entry(3, "햄류")];
        let usage = HashMap::from([(1, 1), (2, 4)]);

        let matches = matching_keywords(&keywords, "즉석", &usage, 10);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].0.keyword, "즉석조리식품");
        assert_eq!(matches[0].1, 4);
        assert_eq!(matches[1].0.keyword, "즉석식품");
    }

    #[test]
    fn matching_keywords_respects_limit() {
        let keywords = vec![entry(1, "가공품"), entry(2, "유가공품"), entry(3, "알가공품")];
        let matches = matching_keywords(&keywords, "가공품", &HashMap::new(), 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].0.id, 1);
        assert_eq!(matches[1].0.id, 2);
    }

    #[test]
    fn link_counts_by_keyword_tallies_each_connection() {
        let links = LinksFile {
            connections: vec![
                SectionKeywordLink {
                    id: 1,
                    section_id: "section-17_1".to_string(),
                    keyword_id: 3,
                },
                SectionKeywordLink {
                    id: 2,
                    section_id: "section-17_2".to_string(),
                    keyword_id: 3,
                },
            ],
            metadata: crate::model::LinksMetadata {
                total_connections: 2,
                processed_at: "2026-01-01T00:00:00Z".to_string(),
            },
        };

        let counts = link_counts_by_keyword(&links);
        assert_eq!(counts.get(&3), Some(&2));
    }
}
