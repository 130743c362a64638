use once_cell::sync::Lazy;
use regex::Regex;

/// First code point of the precomposed Hangul syllable block
pub const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;

/// Number of precomposed Hangul syllables
const HANGUL_SYLLABLE_COUNT: u32 = 11_172;

/// Syllables per leading consonant: 21 vowels × 28 trailing slots
const SYLLABLES_PER_INITIAL: u32 = 588;

/// Leading consonants in syllable-block order
pub const CHOSUNG_TABLE: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

static LATIN_INITIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]").expect("valid regex"));

/// Classification label for a name.
///
/// Hangul syllables map to their leading consonant. Anything else maps to the
/// uppercased first character, and an empty name maps to the empty label.
#[must_use]
pub fn initial_consonant(name: &str) -> String {
    let Some(first) = name.chars().next() else {
        return String::new();
    };

    let offset = u32::from(first).wrapping_sub(HANGUL_SYLLABLE_BASE);
    if offset < HANGUL_SYLLABLE_COUNT {
        let index = (offset / SYLLABLES_PER_INITIAL) as usize;
        return CHOSUNG_TABLE[index].to_string();
    }

    first.to_uppercase().collect()
}

/// Whether the name starts with an ASCII letter (the "A-Z" bucket)
#[must_use]
pub fn is_latin_initial(name: &str) -> bool {
    LATIN_INITIAL.is_match(name)
}
