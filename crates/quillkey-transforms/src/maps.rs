//! Character maps for the built-in styles
//!
//! Alphabet-offset styles (bold, italic, fullwidth, ...) are generated from
//! their Unicode base codepoints, with the handful of letters Unicode placed
//! outside the contiguous blocks handled as exceptions. Shape-based styles
//! (upside-down, mirror, small caps, leet) use explicit tables.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Apply a char-to-char map; unmapped characters pass through.
pub fn map_chars(text: &str, map: &HashMap<char, char>) -> String {
    text.chars().map(|c| *map.get(&c).unwrap_or(&c)).collect()
}

/// Apply a char-to-char map and reverse the result (upside-down, mirror).
pub fn map_chars_reversed(text: &str, map: &HashMap<char, char>) -> String {
    text.chars()
        .map(|c| *map.get(&c).unwrap_or(&c))
        .rev()
        .collect()
}

/// ROT13: rotate ASCII letters by 13, everything else unchanged.
pub fn rot13(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a'),
            'A'..='Z' => rotate(c, b'A'),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8) -> char {
    (((c as u8 - base + 13) % 26) + base) as char
}

/// Strikethrough: follow every character with U+0336 COMBINING LONG STROKE.
pub fn strikethrough(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

// ---------------------------------------------------------------------------
// Generated alphabet maps
// ---------------------------------------------------------------------------

fn char_at(base: u32, offset: u32) -> char {
    // Mathematical alphanumeric blocks are contiguous and valid scalar values
    char::from_u32(base + offset).unwrap_or('\u{FFFD}')
}

/// Build a map for A-Z/a-z from block base codepoints, with exceptions for
/// letters Unicode assigned earlier (e.g. ℎ for mathematical italic h).
fn alphabet_map(
    upper_base: u32,
    lower_base: u32,
    exceptions: &[(char, char)],
) -> HashMap<char, char> {
    let mut map = HashMap::new();
    for i in 0..26u32 {
        let upper = (b'A' + i as u8) as char;
        let lower = (b'a' + i as u8) as char;
        map.insert(upper, char_at(upper_base, i));
        map.insert(lower, char_at(lower_base, i));
    }
    for &(from, to) in exceptions {
        map.insert(from, to);
    }
    map
}

fn with_digits(mut map: HashMap<char, char>, zero_base: u32) -> HashMap<char, char> {
    for i in 0..10u32 {
        map.insert((b'0' + i as u8) as char, char_at(zero_base, i));
    }
    map
}

pub static BOLD: Lazy<HashMap<char, char>> =
    Lazy::new(|| with_digits(alphabet_map(0x1D400, 0x1D41A, &[]), 0x1D7CE));

pub static ITALIC: Lazy<HashMap<char, char>> =
    Lazy::new(|| alphabet_map(0x1D434, 0x1D44E, &[('h', '\u{210E}')]));

pub static BOLD_ITALIC: Lazy<HashMap<char, char>> =
    Lazy::new(|| alphabet_map(0x1D468, 0x1D482, &[]));

pub static MONOSPACE: Lazy<HashMap<char, char>> =
    Lazy::new(|| with_digits(alphabet_map(0x1D670, 0x1D68A, &[]), 0x1D7F6));

pub static DOUBLE_STRUCK: Lazy<HashMap<char, char>> = Lazy::new(|| {
    with_digits(
        alphabet_map(
            0x1D538,
            0x1D552,
            &[
                ('C', 'ℂ'),
                ('H', 'ℍ'),
                ('N', 'ℕ'),
                ('P', 'ℙ'),
                ('Q', 'ℚ'),
                ('R', 'ℝ'),
                ('Z', 'ℤ'),
            ],
        ),
        0x1D7D8,
    )
});

/// Fullwidth forms: printable ASCII shifts by 0xFEE0, space becomes U+3000.
pub static FULLWIDTH: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for c in '!'..='~' {
        map.insert(c, char_at(c as u32, 0xFEE0));
    }
    map.insert(' ', '\u{3000}');
    map
});

/// Circled letters and digits (zero is U+24EA, 1-9 start at U+2460).
pub static CIRCLED: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut map = alphabet_map(0x24B6, 0x24D0, &[]);
    map.insert('0', '\u{24EA}');
    for i in 1..10u32 {
        map.insert((b'0' + i as u8) as char, char_at(0x2460, i - 1));
    }
    map
});

// ---------------------------------------------------------------------------
// Explicit tables
// ---------------------------------------------------------------------------

pub static SMALL_CAPS: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('a', 'ᴀ'),
        ('b', 'ʙ'),
        ('c', 'ᴄ'),
        ('d', 'ᴅ'),
        ('e', 'ᴇ'),
        ('f', 'ꜰ'),
        ('g', 'ɢ'),
        ('h', 'ʜ'),
        ('i', 'ɪ'),
        ('j', 'ᴊ'),
        ('k', 'ᴋ'),
        ('l', 'ʟ'),
        ('m', 'ᴍ'),
        ('n', 'ɴ'),
        ('o', 'ᴏ'),
        ('p', 'ᴘ'),
        ('q', 'ǫ'),
        ('r', 'ʀ'),
        ('s', 'ꜱ'),
        ('t', 'ᴛ'),
        ('u', 'ᴜ'),
        ('v', 'ᴠ'),
        ('w', 'ᴡ'),
        ('y', 'ʏ'),
        ('z', 'ᴢ'),
    ]
    .into_iter()
    .collect()
});

pub static LEET: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('a', '4'),
        ('A', '4'),
        ('b', '8'),
        ('B', '8'),
        ('e', '3'),
        ('E', '3'),
        ('i', '1'),
        ('I', '1'),
        ('o', '0'),
        ('O', '0'),
        ('s', '5'),
        ('S', '5'),
        ('t', '7'),
        ('T', '7'),
    ]
    .into_iter()
    .collect()
});

pub static UPSIDE_DOWN: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('a', 'ɐ'),
        ('b', 'q'),
        ('c', 'ɔ'),
        ('d', 'p'),
        ('e', 'ǝ'),
        ('f', 'ɟ'),
        ('g', 'ƃ'),
        ('h', 'ɥ'),
        ('i', 'ᴉ'),
        ('j', 'ɾ'),
        ('k', 'ʞ'),
        ('m', 'ɯ'),
        ('n', 'u'),
        ('p', 'd'),
        ('q', 'b'),
        ('r', 'ɹ'),
        ('t', 'ʇ'),
        ('u', 'n'),
        ('v', 'ʌ'),
        ('w', 'ʍ'),
        ('y', 'ʎ'),
        ('A', '∀'),
        ('B', '𐐒'),
        ('C', 'Ɔ'),
        ('D', 'ᗡ'),
        ('E', 'Ǝ'),
        ('F', 'Ⅎ'),
        ('G', '⅁'),
        ('J', 'ſ'),
        ('L', '˥'),
        ('M', 'W'),
        ('P', 'Ԁ'),
        ('R', 'ᴚ'),
        ('T', '⊥'),
        ('U', '∩'),
        ('V', 'Λ'),
        ('Y', '⅄'),
        ('1', 'Ɩ'),
        ('2', 'ᄅ'),
        ('3', 'Ɛ'),
        ('4', 'ㄣ'),
        ('5', 'ϛ'),
        ('6', '9'),
        ('7', 'ㄥ'),
        ('9', '6'),
        ('.', '˙'),
        (',', '\''),
        ('\'', ','),
        ('?', '¿'),
        ('!', '¡'),
        ('(', ')'),
        (')', '('),
        ('[', ']'),
        (']', '['),
        ('{', '}'),
        ('}', '{'),
        ('<', '>'),
        ('>', '<'),
        ('&', '⅋'),
        ('_', '‾'),
    ]
    .into_iter()
    .collect()
});

/// Mirror table is an involution: every pair maps both ways, so applying the
/// mirror style twice restores the original text.
pub static MIRROR: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let pairs = [
        ('b', 'd'),
        ('p', 'q'),
        ('E', 'Ǝ'),
        ('3', 'Ɛ'),
        ('(', ')'),
        ('[', ']'),
        ('{', '}'),
        ('<', '>'),
        ('/', '\\'),
    ];
    let mut map = HashMap::new();
    for (a, b) in pairs {
        map.insert(a, b);
        map.insert(b, a);
    }
    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_block_is_contiguous() {
        assert_eq!(BOLD.get(&'A'), Some(&'\u{1D400}'));
        assert_eq!(BOLD.get(&'Z'), Some(&'\u{1D419}'));
        assert_eq!(BOLD.get(&'0'), Some(&'\u{1D7CE}'));
    }

    #[test]
    fn test_italic_h_exception() {
        assert_eq!(ITALIC.get(&'h'), Some(&'\u{210E}'));
    }

    #[test]
    fn test_double_struck_exceptions() {
        assert_eq!(DOUBLE_STRUCK.get(&'C'), Some(&'ℂ'));
        assert_eq!(DOUBLE_STRUCK.get(&'R'), Some(&'ℝ'));
    }

    #[test]
    fn test_circled_zero_is_outside_run() {
        assert_eq!(CIRCLED.get(&'0'), Some(&'\u{24EA}'));
        assert_eq!(CIRCLED.get(&'1'), Some(&'\u{2460}'));
        assert_eq!(CIRCLED.get(&'9'), Some(&'\u{2468}'));
    }

    #[test]
    fn test_mirror_map_is_involution() {
        for (&from, &to) in MIRROR.iter() {
            assert_eq!(MIRROR.get(&to), Some(&from));
        }
    }

    #[test]
    fn test_rot13_wraps_alphabet() {
        assert_eq!(rot13("nzm"), "amz");
        assert_eq!(rot13("NZM"), "AMZ");
    }
}
