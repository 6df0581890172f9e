use super::*;

/// Decides whether a character survives the legacy code-page pass.
pub trait CompatibilityProfile {
    fn name(&self) -> &'static str;

    fn can_encode(&self, character: char) -> bool;
}

/// Characters must be representable in CP949 (Unified Hangul Code).
#[derive(Debug, Clone, Copy, Default)]
pub struct Cp949Profile;

impl CompatibilityProfile for Cp949Profile {
    fn name(&self) -> &'static str {
        "cp949"
    }

    fn can_encode(&self, character: char) -> bool {
        if character.is_ascii() {
            return true;
        }

        let mut buf = [0_u8; 4];
        let (_, _, unmappable) = encoding_rs::EUC_KR.encode(character.encode_utf8(&mut buf));
        !unmappable
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughProfile;

impl CompatibilityProfile for PassThroughProfile {
    fn name(&self) -> &'static str {
        "none"
    }

    fn can_encode(&self, _character: char) -> bool {
        true
    }
}

pub fn profile_for(code_page: CodePage) -> Box<dyn CompatibilityProfile> {
    match code_page {
        CodePage::Cp949 => Box::new(Cp949Profile),
        CodePage::None => Box::new(PassThroughProfile),
    }
}

pub fn replace_unencodable(text: &str, profile: &dyn CompatibilityProfile) -> String {
    text.chars()
        .map(|character| {
            if profile.can_encode(character) {
                character
            } else {
                ' '
            }
        })
        .collect()
}
