use super::*;

/// Accumulator for one pipeline invocation. Owned by the assembler for the
/// duration of a run and consumed by [`PipelineContext::finish`].
#[derive(Debug, Default)]
pub struct PipelineContext {
    sections: Vec<SectionRecord>,
    issued_ids: HashSet<String>,
    section_keywords: Vec<(String, Vec<String>)>,
    keyword_set: BTreeSet<String>,
    discarded: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub sections: Vec<SectionRecord>,
    pub keywords: Vec<KeywordEntry>,
    pub links: Vec<SectionKeywordLink>,
    pub discarded: usize,
    pub unresolved_links: usize,
}

impl PipelineContext {
    /// Returns `base` or the first `base_N` (N from 1) not issued yet.
    pub fn issue_id(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 1usize;
        while self.issued_ids.contains(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        self.issued_ids.insert(candidate.clone());
        candidate
    }

    pub fn push_section(&mut self, record: SectionRecord, keywords: Vec<String>) {
        self.keyword_set.extend(keywords.iter().cloned());
        self.section_keywords.push((record.id.clone(), keywords));
        self.sections.push(record);
    }

    pub fn record_discard(&mut self) {
        self.discarded += 1;
    }

    pub fn finish(self) -> Assembly {
        let keywords = self
            .keyword_set
            .into_iter()
            .enumerate()
            .map(|(index, keyword)| KeywordEntry {
                id: (index + 1) as u64,
                keyword,
                search_count: 0,
                category: KEYWORD_CATEGORY_AUTO.to_string(),
            })
            .collect::<Vec<KeywordEntry>>();
        let keyword_ids = keywords
            .iter()
            .map(|entry| (entry.keyword.as_str(), entry.id))
            .collect::<BTreeMap<&str, u64>>();

        let mut links = Vec::<SectionKeywordLink>::new();
        let mut unresolved_links = 0usize;
        for (section_id, section_keywords) in &self.section_keywords {
            for keyword in section_keywords {
                let Some(keyword_id) = keyword_ids.get(keyword.as_str()) else {
                    warn!(section_id = %section_id, keyword = %keyword, "keyword has no id; skipping link");
                    unresolved_links += 1;
                    continue;
                };
                links.push(SectionKeywordLink {
                    id: (links.len() + 1) as u64,
                    section_id: section_id.clone(),
                    keyword_id: *keyword_id,
                });
            }
        }

        Assembly {
            sections: self.sections,
            keywords,
            links,
            discarded: self.discarded,
            unresolved_links,
        }
    }
}

pub struct SectionAssembler {
    normalizer: TextNormalizer,
    extractor: KeywordExtractor,
    min_content_chars: usize,
}

impl SectionAssembler {
    pub fn new(
        normalizer: TextNormalizer,
        extractor: KeywordExtractor,
        min_content_chars: usize,
    ) -> Self {
        Self {
            normalizer,
            extractor,
            min_content_chars,
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn assemble(&self, document: &str, spans: &[SectionSpan], file_source: &str) -> Assembly {
        let mut context = PipelineContext::default();
        for span in spans {
            self.process_span(&mut context, document, span, file_source);
        }
        context.finish()
    }

    fn process_span(
        &self,
        context: &mut PipelineContext,
        document: &str,
        span: &SectionSpan,
        file_source: &str,
    ) {
        let content = self.normalizer.normalize(span.slice(document));
        let character_count = content.chars().count();
        if character_count < self.min_content_chars {
            debug!(
                section_number = %span.section_number,
                chars = character_count,
                "discarding short section"
            );
            context.record_discard();
            return;
        }

        let title = span.full_title();
        let keywords = self.extractor.extract(&title, &content);
        let id = context.issue_id(&section_id_base(&span.section_number));

        debug!(
            id = %id,
            chars = character_count,
            keywords = keywords.len(),
            "assembled section"
        );

        context.push_section(
            SectionRecord {
                id,
                title,
                category: classify_category(&span.title),
                content,
                file_source: file_source.to_string(),
                character_count,
                section_number: span.section_number.clone(),
            },
            keywords,
        );
    }
}

/// Most specific marker wins; checked against the raw title line.
pub fn classify_category(raw_title: &str) -> SectionCategory {
    if raw_title.contains("축산물가공품") {
        SectionCategory::LivestockProcessed
    } else if raw_title.contains("가공품") {
        SectionCategory::Processed
    } else if raw_title.contains("식품") {
        SectionCategory::Food
    } else {
        SectionCategory::Other
    }
}

pub fn section_id_base(section_number: &str) -> String {
    let key = section_number
        .chars()
        .map(|character| {
            if character.is_ascii_digit() {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();
    format!("section-{key}")
}
