//! Byte-level views of mis-decoded text.
//!
//! Mojibake arises when UTF-8 bytes are decoded as Latin-1 (Meta exports) or
//! as Windows-1252 (text that went through a Windows tool afterwards). Either
//! way each original byte ends up as one character. The helpers here map such
//! characters back to the byte they came from.

/// Characters Windows-1252 assigns to bytes 0x80..=0x9F. `None` marks the five
/// bytes the code page leaves undefined; those decode to the C1 control of the
/// same value, which the Latin-1 path already covers.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80 €
    None,             // 0x81
    Some('\u{201A}'), // 0x82 ‚
    Some('\u{0192}'), // 0x83 ƒ
    Some('\u{201E}'), // 0x84 „
    Some('\u{2026}'), // 0x85 …
    Some('\u{2020}'), // 0x86 †
    Some('\u{2021}'), // 0x87 ‡
    Some('\u{02C6}'), // 0x88 ˆ
    Some('\u{2030}'), // 0x89 ‰
    Some('\u{0160}'), // 0x8A Š
    Some('\u{2039}'), // 0x8B ‹
    Some('\u{0152}'), // 0x8C Œ
    None,             // 0x8D
    Some('\u{017D}'), // 0x8E Ž
    None,             // 0x8F
    None,             // 0x90
    Some('\u{2018}'), // 0x91 ‘
    Some('\u{2019}'), // 0x92 ’
    Some('\u{201C}'), // 0x93 “
    Some('\u{201D}'), // 0x94 ”
    Some('\u{2022}'), // 0x95 •
    Some('\u{2013}'), // 0x96 –
    Some('\u{2014}'), // 0x97 —
    Some('\u{02DC}'), // 0x98 ˜
    Some('\u{2122}'), // 0x99 ™
    Some('\u{0161}'), // 0x9A š
    Some('\u{203A}'), // 0x9B ›
    Some('\u{0153}'), // 0x9C œ
    None,             // 0x9D
    Some('\u{017E}'), // 0x9E ž
    Some('\u{0178}'), // 0x9F Ÿ
];

/// Returns the single byte a mis-decoded character stands for.
///
/// Code points up to U+00FF map to themselves (Latin-1). The Windows-1252
/// specials map to their 0x80..=0x9F byte. Anything else is not a byte.
pub fn byte_for(c: char) -> Option<u8> {
    if let Ok(byte) = u8::try_from(u32::from(c)) {
        return Some(byte);
    }
    CP1252_HIGH
        .iter()
        .position(|&special| special == Some(c))
        .map(|offset| 0x80 + offset as u8)
}

/// Character that Windows-1252 shows for `byte`.
pub fn cp1252_char(byte: u8) -> char {
    if (0x80..=0x9F).contains(&byte) {
        if let Some(c) = CP1252_HIGH[usize::from(byte - 0x80)] {
            return c;
        }
    }
    char::from(byte)
}

/// Character that Latin-1 shows for `byte`.
pub fn latin1_char(byte: u8) -> char {
    char::from(byte)
}

/// Renders UTF-8 bytes the way a Latin-1 decoder would.
pub fn as_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(latin1_char).collect()
}

/// Renders UTF-8 bytes the way a Windows-1252 decoder would.
pub fn as_cp1252(bytes: &[u8]) -> String {
    bytes.iter().copied().map(cp1252_char).collect()
}

/// Byte view of `text`: byte-mappable characters contribute their byte,
/// every other character contributes its own UTF-8 encoding.
pub fn reinterpret_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        match byte_for(c) {
            Some(byte) => bytes.push(byte),
            None => bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
        }
    }
    bytes
}

/// Length of the UTF-8 sequence introduced by `lead`, or 0 if `lead` cannot
/// start a multi-byte sequence.
pub fn utf8_sequence_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Returns `true` for a character that stands for a UTF-8 continuation
/// byte (0x80..=0xBF).
pub fn is_continuation(c: char) -> bool {
    byte_for(c).is_some_and(|byte| (0x80..=0xBF).contains(&byte))
}

/// Number of characters that are typical for UTF-8 bytes shown as Latin-1.
///
/// A C1 control always counts. A Latin-1 supplement character counts when it
/// could open a multi-byte sequence and the next character stands for a
/// continuation byte, so `Ã©` scores 1 while a correct `é` scores 0.
pub fn count_suspicious(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '\u{80}'..='\u{9F}') {
            count += 1;
        } else if matches!(c, '\u{C0}'..='\u{FF}')
            && byte_for(c).is_some_and(|byte| utf8_sequence_len(byte) > 0)
            && chars.peek().is_some_and(|&next| is_continuation(next))
        {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_for_latin1() {
        assert_eq!(byte_for('A'), Some(0x41));
        assert_eq!(byte_for('\u{F0}'), Some(0xF0));
        assert_eq!(byte_for('\u{9F}'), Some(0x9F));
    }

    #[test]
    fn test_byte_for_cp1252_specials() {
        assert_eq!(byte_for('Ÿ'), Some(0x9F));
        assert_eq!(byte_for('€'), Some(0x80));
        assert_eq!(byte_for('™'), Some(0x99));
        assert_eq!(byte_for('˜'), Some(0x98));
    }

    #[test]
    fn test_byte_for_other_chars() {
        assert_eq!(byte_for('Ж'), None);
        assert_eq!(byte_for('😂'), None);
    }

    #[test]
    fn test_cp1252_roundtrip() {
        for byte in 0x80..=0xFFu8 {
            assert_eq!(byte_for(cp1252_char(byte)), Some(byte));
        }
    }

    #[test]
    fn test_mojibake_renderings() {
        let bytes = "😂".as_bytes();
        assert_eq!(as_latin1(bytes), "\u{f0}\u{9f}\u{98}\u{82}");
        assert_eq!(as_cp1252(bytes), "ðŸ˜‚");
    }

    #[test]
    fn test_reinterpret_bytes_mixed() {
        let bytes = reinterpret_bytes("ðŸ˜‚ Ж");
        assert_eq!(&bytes[..4], "😂".as_bytes());
        assert_eq!(&bytes[5..], "Ж".as_bytes());
    }

    #[test]
    fn test_utf8_sequence_len() {
        assert_eq!(utf8_sequence_len(b'a'), 0);
        assert_eq!(utf8_sequence_len(0xC3), 2);
        assert_eq!(utf8_sequence_len(0xE2), 3);
        assert_eq!(utf8_sequence_len(0xF0), 4);
        assert_eq!(utf8_sequence_len(0x9F), 0);
    }

    #[test]
    fn test_count_suspicious() {
        assert_eq!(count_suspicious("Ã©"), 1);
        assert_eq!(count_suspicious("â€™"), 1);
        assert_eq!(count_suspicious("\u{e2}\u{9d}\u{a4}"), 2);
        assert_eq!(count_suspicious("café crème"), 0);
        assert_eq!(count_suspicious("Ãa"), 0);
        assert_eq!(count_suspicious("Жжж ¤"), 0);
    }
}
