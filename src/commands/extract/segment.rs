use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub section_number: String,
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl SectionSpan {
    pub fn full_title(&self) -> String {
        format!("{} {}", self.section_number, self.title)
    }

    pub fn slice<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }
}

pub struct SectionSegmenter {
    header: Regex,
}

impl SectionSegmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header: Regex::new(r"([0-9]+-[0-9]+)[^\S\n]*(\S[^\n]*)")
                .context("failed to compile section header regex")?,
        })
    }

    /// Splits `document` at every header. Returns `None` when no header is
    /// present so callers can tell an empty document apart from one that
    /// simply has no matching sections.
    pub fn segment(&self, document: &str) -> Option<Vec<SectionSpan>> {
        let headers = self
            .header
            .captures_iter(document)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let number = captures.get(1)?;
                let title = captures.get(2)?;
                Some((
                    whole.start(),
                    number.as_str().to_string(),
                    title.as_str().trim().to_string(),
                ))
            })
            .collect::<Vec<(usize, String, String)>>();

        if headers.is_empty() {
            return None;
        }

        let spans = headers
            .iter()
            .enumerate()
            .map(|(index, (start, section_number, title))| SectionSpan {
                section_number: section_number.clone(),
                title: title.clone(),
                start: *start,
                end: headers
                    .get(index + 1)
                    .map(|(next_start, _, _)| *next_start)
                    .unwrap_or(document.len()),
            })
            .collect();

        Some(spans)
    }
}
