use super::*;

const MIN_KEYWORD_CHARS: usize = 2;

pub struct KeywordExtractor {
    title_number: Regex,
    parenthetical: Regex,
    syllable_word: Regex,
    food_terms: Vec<Regex>,
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new(max_keywords: usize) -> Result<Self> {
        let food_terms = [r"[가-힣]+류", r"[가-힣]+제품", r"[가-힣]+가공품"]
            .into_iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("failed to compile food term regex: {pattern}"))
            })
            .collect::<Result<Vec<Regex>>>()?;

        Ok(Self {
            title_number: Regex::new(r"^\s*([0-9]+-[0-9]+)\s*(.+)$")
                .context("failed to compile title number regex")?,
            parenthetical: Regex::new(r"\([^)]*\)")
                .context("failed to compile parenthetical regex")?,
            syllable_word: Regex::new(r"[가-힣]{2,}")
                .context("failed to compile syllable word regex")?,
            food_terms,
            max_keywords,
        })
    }

    /// Candidate keywords for one section, title-derived terms first.
    pub fn extract(&self, title: &str, content: &str) -> Vec<String> {
        let mut candidates = Vec::<String>::new();

        if let Some(main_title) = self.main_title(title) {
            let stripped = self
                .parenthetical
                .replace_all(&main_title, "")
                .trim()
                .to_string();

            candidates.push(main_title.clone());
            if stripped != main_title {
                candidates.push(stripped);
            }
            candidates.extend(
                self.syllable_word
                    .find_iter(&main_title)
                    .map(|word| word.as_str().to_string()),
            );
        }

        for pattern in &self.food_terms {
            candidates.extend(
                pattern
                    .find_iter(content)
                    .map(|term| term.as_str().to_string()),
            );
        }

        finalize_keywords(candidates, self.max_keywords)
    }

    /// Title text after the section number, cut at a parenthesis that is
    /// never closed (titles are often truncated at the line break).
    fn main_title(&self, title: &str) -> Option<String> {
        let captures = self.title_number.captures(title)?;
        let rest = captures.get(2)?.as_str();
        let cut = first_unclosed_paren(rest)
            .map(|index| &rest[..index])
            .unwrap_or(rest);
        let main_title = cut.trim();
        if main_title.is_empty() {
            return None;
        }
        Some(main_title.to_string())
    }
}

fn first_unclosed_paren(text: &str) -> Option<usize> {
    let mut open_positions = Vec::<usize>::new();
    for (index, character) in text.char_indices() {
        match character {
            '(' => open_positions.push(index),
            ')' => {
                open_positions.pop();
            }
            _ => {}
        }
    }
    open_positions.first().copied()
}

pub fn finalize_keywords(candidates: Vec<String>, max_keywords: usize) -> Vec<String> {
    let mut seen = HashSet::<String>::new();
    let mut keywords = Vec::<String>::new();

    for candidate in candidates {
        let keyword = candidate.trim();
        if keyword.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        if seen.insert(keyword.to_string()) {
            keywords.push(keyword.to_string());
        }
    }

    keywords.truncate(max_keywords);
    keywords
}
