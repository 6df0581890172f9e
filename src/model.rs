use serde::{Deserialize, Serialize};

pub const SECTIONS_FILE_NAME: &str = "food_codex_sections.json";
pub const KEYWORDS_FILE_NAME: &str = "search_keywords.json";
pub const LINKS_FILE_NAME: &str = "section_keywords.json";

pub const KEYWORD_CATEGORY_AUTO: &str = "자동추출";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionCategory {
    #[serde(rename = "축산물가공품")]
    LivestockProcessed,
    #[serde(rename = "가공품류")]
    Processed,
    #[serde(rename = "식품류")]
    Food,
    #[serde(rename = "기타")]
    Other,
}

impl SectionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionCategory::LivestockProcessed => "축산물가공품",
            SectionCategory::Processed => "가공품류",
            SectionCategory::Food => "식품류",
            SectionCategory::Other => "기타",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: SectionCategory,
    pub file_source: String,
    pub character_count: usize,
    pub section_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsMetadata {
    pub source_file: String,
    pub source_sha256: String,
    pub encoding: String,
    pub processed_at: String,
    pub total_sections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsFile {
    pub sections: Vec<SectionRecord>,
    pub metadata: SectionsMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub id: u64,
    pub keyword: String,
    pub search_count: u64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsMetadata {
    pub total_keywords: usize,
    pub processed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsFile {
    pub keywords: Vec<KeywordEntry>,
    pub metadata: KeywordsMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionKeywordLink {
    pub id: u64,
    pub section_id: String,
    pub keyword_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksMetadata {
    pub total_connections: usize,
    pub processed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksFile {
    pub connections: Vec<SectionKeywordLink>,
    pub metadata: LinksMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractPaths {
    pub input_path: String,
    pub output_dir: String,
    pub sections_path: String,
    pub keywords_path: String,
    pub links_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractCounts {
    pub input_bytes: usize,
    pub decoded_chars: usize,
    pub headers_found: usize,
    pub sections_emitted: usize,
    pub sections_discarded: usize,
    pub keywords_total: usize,
    pub links_total: usize,
    pub unresolved_links: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub encoding: String,
    pub code_page: String,
    pub min_content_chars: usize,
    pub max_keywords: usize,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub warnings: Vec<String>,
}
