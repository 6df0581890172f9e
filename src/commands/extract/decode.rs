use super::*;

#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub text: String,
    pub encoding: String,
    pub dropped_sequences: usize,
}

/// Strict candidates, tried in order when no byte-order mark is present.
fn decode_candidates() -> [(&'static str, &'static Encoding); 2] {
    [("utf-8", encoding_rs::UTF_8), ("cp949", encoding_rs::EUC_KR)]
}

pub fn decode_document(bytes: &[u8]) -> Option<DecodedDocument> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, dropped_sequences) = decode_tolerant(encoding, &bytes[bom_length..]);
        return Some(DecodedDocument {
            text: normalize_line_endings(&text),
            encoding: format!("{}-bom", encoding.name().to_ascii_lowercase()),
            dropped_sequences,
        });
    }

    for (label, encoding) in decode_candidates() {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Some(DecodedDocument {
                text: normalize_line_endings(&text),
                encoding: label.to_string(),
                dropped_sequences: 0,
            });
        }
    }

    let mut best: Option<(&'static str, String, usize)> = None;
    for (label, encoding) in decode_candidates() {
        let (text, dropped_sequences) = decode_tolerant(encoding, bytes);
        let improves = best
            .as_ref()
            .map(|(_, _, best_dropped)| dropped_sequences < *best_dropped)
            .unwrap_or(true);
        if improves {
            best = Some((label, text, dropped_sequences));
        }
    }

    let (label, text, dropped_sequences) = best?;
    if !bytes.is_empty() && text.is_empty() {
        return None;
    }

    Some(DecodedDocument {
        text: normalize_line_endings(&text),
        encoding: label.to_string(),
        dropped_sequences,
    })
}

/// Decodes with replacement, then drops the replacement characters so that
/// undecodable bytes vanish instead of leaking U+FFFD into the text.
fn decode_tolerant(encoding: &'static Encoding, bytes: &[u8]) -> (String, usize) {
    let (decoded, _) = encoding.decode_without_bom_handling(bytes);
    let dropped_sequences = decoded
        .chars()
        .filter(|character| *character == char::REPLACEMENT_CHARACTER)
        .count();
    let text = decoded
        .chars()
        .filter(|character| *character != char::REPLACEMENT_CHARACTER)
        .collect::<String>();
    (text, dropped_sequences)
}

fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn read_document(path: &Path) -> std::result::Result<(Vec<u8>, DecodedDocument), ExtractError> {
    if !path.exists() {
        return Err(ExtractError::InputUnavailable {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = decode_document(&bytes).ok_or_else(|| ExtractError::Decode {
        path: path.to_path_buf(),
    })?;

    Ok((bytes, document))
}
