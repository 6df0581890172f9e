use regex::Captures;

use super::*;

const SYLLABLE_FIRST: char = '\u{AC00}';
const SYLLABLE_LAST: char = '\u{D7A3}';
const MAX_SETTLE_PASSES: usize = 4;
const NUMERIC_ITEM_INDENT: &str = "  ";
const LATIN_ITEM_INDENT: &str = "    ";

pub fn is_syllable(character: char) -> bool {
    (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&character)
}

/// Cleans one raw section span into storable text.
///
/// Every stage is a separate method so the rules can be exercised on their
/// own. The stages run in a fixed order and later stages rely on the earlier
/// ones: outline breaks are only re-inserted after spacing has been repaired,
/// and the final collapse assumes all substitutions have already produced
/// their single spaces.
pub struct TextNormalizer {
    border_line: Regex,
    box_glyphs: Regex,
    figure_caption: Regex,
    page_footer: Regex,
    page_of_page: Regex,
    chapter_line: Regex,
    disallowed_character: Regex,
    digit_then_syllable: Regex,
    syllable_then_digit: Regex,
    space_after_open_paren: Regex,
    space_before_close_paren: Regex,
    numbered_item: Regex,
    numeric_sub_item: Regex,
    latin_sub_item: Regex,
    horizontal_run: Regex,
    line_indent: Regex,
    trailing_space: Regex,
    newline_run: Regex,
    double_newline: Regex,
    profile: Box<dyn CompatibilityProfile>,
}

impl TextNormalizer {
    pub fn new(profile: Box<dyn CompatibilityProfile>) -> Result<Self> {
        Ok(Self {
            border_line: Regex::new(r"(?m)^[^\S\n]*[\u{2500}-\u{257F}][\u{2500}-\u{257F}[^\S\n]]*$")
                .context("failed to compile table border regex")?,
            box_glyphs: Regex::new(r"[\u{2500}-\u{257F}]+")
                .context("failed to compile box-drawing regex")?,
            figure_caption: Regex::new(
                r"\[\s*(?:그\s*림|사\s*진|도)[^\]]*\]|<\s*그\s*림[^>]*>",
            )
            .context("failed to compile figure caption regex")?,
            page_footer: Regex::new(r"(?m)^[^\S\n]*-[^\S\n]*\d+[^\S\n]*-[^\S\n]*$")
                .context("failed to compile page footer regex")?,
            page_of_page: Regex::new(r"(?m)^[^\S\n]*\d+[^\S\n]*/[^\S\n]*\d+[^\S\n]*$")
                .context("failed to compile page-of-page regex")?,
            chapter_line: Regex::new(r"(?m)^[^\S\n]*제[^\S\n]*\d+[^\S\n]*장.*$")
                .context("failed to compile chapter line regex")?,
            disallowed_character: Regex::new(
                r"[^\w\s가-힣ㄱ-ㅎㅏ-ㅣ0-9A-Za-z().,;:!?\-=<>%/∶∙･]",
            )
            .context("failed to compile allow-list regex")?,
            digit_then_syllable: Regex::new(r"(\d)\s+([가-힣])")
                .context("failed to compile digit-syllable spacing regex")?,
            syllable_then_digit: Regex::new(r"([가-힣])\s+(\d)")
                .context("failed to compile syllable-digit spacing regex")?,
            space_after_open_paren: Regex::new(r"\(\s+")
                .context("failed to compile open parenthesis regex")?,
            space_before_close_paren: Regex::new(r"\s+\)")
                .context("failed to compile close parenthesis regex")?,
            numbered_item: Regex::new(r"(\d+)\s*\)\s*([가-힣])")
                .context("failed to compile numbered item regex")?,
            numeric_sub_item: Regex::new(r"\((\d+)\)\s*([가-힣])")
                .context("failed to compile numeric sub-item regex")?,
            latin_sub_item: Regex::new(r"\(([a-zA-Z])\)\s*([가-힣])")
                .context("failed to compile latin sub-item regex")?,
            horizontal_run: Regex::new(r"(\S)[^\S\n]+")
                .context("failed to compile horizontal whitespace regex")?,
            line_indent: Regex::new(r"(?m)^[^\S\n]+(?:(\([0-9]+\))|(\([A-Za-z]\)))?")
                .context("failed to compile line indent regex")?,
            trailing_space: Regex::new(r"[^\S\n]+\n")
                .context("failed to compile trailing whitespace regex")?,
            newline_run: Regex::new(r"\n{3,}").context("failed to compile newline run regex")?,
            double_newline: Regex::new(r"\n\n")
                .context("failed to compile double newline regex")?,
            profile,
        })
    }

    pub fn profile_name(&self) -> &'static str {
        self.profile.name()
    }

    /// Runs the stages until the text stops changing. A pass can expose new
    /// noise, e.g. spacing repair merging `제3` and `장 총칙` into a chapter
    /// line, so a single pass is not always a fixed point.
    pub fn normalize(&self, raw: &str) -> String {
        let mut text = self.normalize_once(raw);
        for _ in 1..MAX_SETTLE_PASSES {
            let next = self.normalize_once(&text);
            if next == text {
                break;
            }
            text = next;
        }
        text
    }

    fn normalize_once(&self, raw: &str) -> String {
        let text = self.strip_structural_noise(raw);
        let text = self.apply_allow_list(&text);
        let text = drop_undecodable(&text);
        let text = replace_unencodable(&text, self.profile.as_ref());
        // Symbols blanked above can leave a bare footer or chapter line.
        let text = self.strip_line_noise(&text);
        let text = self.repair_spacing(&text);
        let text = self.reinsert_outline_breaks(&text);
        self.collapse_whitespace(&text)
    }

    pub fn strip_structural_noise(&self, text: &str) -> String {
        let mut text = text.to_string();
        for pattern in [&self.border_line, &self.box_glyphs, &self.figure_caption] {
            text = pattern.replace_all(&text, " ").into_owned();
        }
        self.strip_line_noise(&text)
    }

    /// Page footers, page-of-page markers and chapter lines.
    pub fn strip_line_noise(&self, text: &str) -> String {
        let mut text = text.to_string();
        for pattern in [&self.page_footer, &self.page_of_page, &self.chapter_line] {
            text = pattern.replace_all(&text, " ").into_owned();
        }
        text
    }

    pub fn apply_allow_list(&self, text: &str) -> String {
        self.disallowed_character
            .replace_all(text, " ")
            .into_owned()
    }

    pub fn repair_spacing(&self, text: &str) -> String {
        let text = join_syllable_runs(text);
        let text = self.digit_then_syllable.replace_all(&text, "$1 $2");
        let text = self.syllable_then_digit.replace_all(&text, "$1 $2");
        let text = self.space_after_open_paren.replace_all(&text, "(");
        self.space_before_close_paren
            .replace_all(&text, ")")
            .into_owned()
    }

    pub fn reinsert_outline_breaks(&self, text: &str) -> String {
        // `1)` directly after `(` or another digit is the tail of `(1)` or of a
        // longer number, not an item of its own.
        let text = self
            .numbered_item
            .replace_all(text, |captures: &Captures<'_>| {
                let whole = &captures[0];
                let start = captures.get(0).map(|value| value.start()).unwrap_or(0);
                let inside_marker = text[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|character| character == '(' || character.is_ascii_digit());
                if inside_marker {
                    whole.to_string()
                } else {
                    format!("\n{}) {}", &captures[1], &captures[2])
                }
            })
            .into_owned();
        let text = self
            .numeric_sub_item
            .replace_all(&text, format!("\n{NUMERIC_ITEM_INDENT}($1) $2").as_str())
            .into_owned();
        self.latin_sub_item
            .replace_all(&text, format!("\n{LATIN_ITEM_INDENT}($1) $2").as_str())
            .into_owned()
    }

    /// Line-leading whitespace survives only as the outline indent in front
    /// of a `(1)` or `(a)` marker.
    pub fn collapse_whitespace(&self, text: &str) -> String {
        let text = self.horizontal_run.replace_all(text, "${1} ");
        let text = self
            .line_indent
            .replace_all(&text, |captures: &Captures<'_>| {
                if let Some(marker) = captures.get(1) {
                    format!("{NUMERIC_ITEM_INDENT}{}", marker.as_str())
                } else if let Some(marker) = captures.get(2) {
                    format!("{LATIN_ITEM_INDENT}{}", marker.as_str())
                } else {
                    String::new()
                }
            });
        let text = self.trailing_space.replace_all(&text, "\n");
        let text = self.newline_run.replace_all(&text, "\n\n");
        let text = self.double_newline.replace_all(&text, "\n");
        text.trim().to_string()
    }
}

pub fn drop_undecodable(text: &str) -> String {
    text.chars()
        .filter(|character| *character != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Removes whitespace runs that sit between two Hangul syllables.
pub fn join_syllable_runs(text: &str) -> String {
    let characters = text.chars().collect::<Vec<char>>();
    let mut out = String::with_capacity(text.len());
    let mut index = 0usize;

    while index < characters.len() {
        let character = characters[index];
        if !character.is_whitespace() {
            out.push(character);
            index += 1;
            continue;
        }

        let run_end = characters[index..]
            .iter()
            .position(|candidate| !candidate.is_whitespace())
            .map(|offset| index + offset)
            .unwrap_or(characters.len());
        let between_syllables = index > 0
            && is_syllable(characters[index - 1])
            && characters
                .get(run_end)
                .copied()
                .is_some_and(is_syllable);
        if !between_syllables {
            out.extend(&characters[index..run_end]);
        }
        index = run_end;
    }

    out
}
