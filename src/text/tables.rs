//! Static data consumed by the repair and emoji detection code.
//!
//! Everything in here is plain data. Extending coverage (another glyph,
//! another range) means editing a table, not the algorithms.

/// Glyphs whose mis-encoded forms are replaced by the substitution strategy.
///
/// Both the Latin-1 and the Windows-1252 renderings of each glyph's UTF-8
/// bytes are derived from this list.
pub const SUBSTITUTION_GLYPHS: &[&str] = &[
    // Hearts
    "❤️", "❤", "❣️", "💕", "💖", "💗", "💘", "💙", "💚", "💛", "💜", "💝", "💞", "💟",
    "🧡", "🖤", "🤍", "🤎", "💔",
    // Faces
    "😂", "😭", "😍", "🥰", "😘", "😊", "😎", "🤔", "😴", "🙄", "😤", "🤣", "😜", "😏",
    "🥺", "🤗", "😌", "😋", "🤤", "😈", "😅", "😁", "🙂", "😉",
    // Gestures
    "👍", "👎", "👀", "🙈", "🙉", "🙊", "🙏", "👏", "💪",
    // Objects and symbols
    "🔥", "💯", "💀", "👻", "✨", "⭐", "🌟", "💫", "🌈", "🎉", "🎊", "🎁", "🎂", "☕",
    // Typography
    "’", "‘", "“", "”", "…", "–", "—", "•", "€",
    // Accented Latin letters
    "á", "à", "â", "ä", "ã", "å", "ç", "é", "è", "ê", "ë", "í", "ì", "î", "ï", "ñ", "ó",
    "ò", "ô", "ö", "õ", "ú", "ù", "û", "ü", "ß", "Á", "É", "Í", "Ó", "Ú", "Ñ", "Ü",
    // Tamil vowels, consonants and vowel signs
    "அ", "ஆ", "இ", "ஈ", "உ", "ஊ", "எ", "ஏ", "ஐ", "ஒ", "ஓ", "ஔ", "ஃ",
    "க", "ங", "ச", "ஜ", "ஞ", "ட", "ண", "த", "ந", "ன", "ப", "ம", "ய", "ர", "ற", "ல", "ள",
    "ழ", "வ", "ஷ", "ஸ", "ஹ",
    "ா", "ி", "ீ", "ு", "ூ", "ெ", "ே", "ை", "ொ", "ோ", "ௌ", "்",
];

/// Hand-written substitutions for damaged forms that cannot be derived from
/// [`SUBSTITUTION_GLYPHS`], typically mojibake whose invisible C1 control
/// characters were stripped by some intermediate tool.
pub const EXTRA_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("â¤ï¸", "❤️"),
    ("â¤", "❤️"),
    ("â£ï¸", "❣️"),
];

/// Code point ranges recognised as emoji by the range detector.
///
/// Covers the supplementary emoji blocks, the misc symbols/dingbats blocks,
/// arrows, and the scattered BMP symbols with emoji presentation.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),   // ©
    (0x00AE, 0x00AE),   // ®
    (0x203C, 0x203C),   // ‼
    (0x2049, 0x2049),   // ⁉
    (0x2122, 0x2122),   // ™
    (0x2139, 0x2139),   // ℹ
    (0x2190, 0x21FF),   // arrows
    (0x231A, 0x231B),   // ⌚ ⌛
    (0x2328, 0x2328),   // ⌨
    (0x23CF, 0x23CF),   // ⏏
    (0x23E9, 0x23F3),   // ⏩ .. ⏳
    (0x23F8, 0x23FA),   // ⏸ .. ⏺
    (0x24C2, 0x24C2),   // Ⓜ
    (0x25AA, 0x25AB),   // ▪ ▫
    (0x25B6, 0x25B6),   // ▶
    (0x25C0, 0x25C0),   // ◀
    (0x25FB, 0x25FE),   // ◻ .. ◾
    (0x2600, 0x27BF),   // misc symbols, dingbats
    (0x2934, 0x2935),   // ⤴ ⤵
    (0x2B05, 0x2B07),   // ⬅ ⬆ ⬇
    (0x2B1B, 0x2B1C),   // ⬛ ⬜
    (0x2B50, 0x2B50),   // ⭐
    (0x2B55, 0x2B55),   // ⭕
    (0x3030, 0x3030),   // 〰
    (0x303D, 0x303D),   // 〽
    (0x3297, 0x3297),   // ㊗
    (0x3299, 0x3299),   // ㊙
    (0x1F000, 0x1FAFF), // supplementary emoji blocks
];

/// Ranges blanked out of text before it is split into words.
pub const WORD_STRIP_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F1E0, 0x1F1FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x1F900, 0x1F9FF),
    (0x1FA70, 0x1FAFF),
];

/// Base characters of keycap sequences (`1️⃣`, `#️⃣`, ...).
pub const KEYCAP_BASES: &[char] = &[
    '#', '*', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Emoji the raw byte scanner looks for in the unrepaired text.
///
/// Longer sequences must come before their prefixes (`❤️` before `❤`).
pub const RAW_SCAN_GLYPHS: &[&str] = &[
    "❤️", "❤", "😂", "😍", "🥰", "😘", "😊", "👍", "👎", "👀", "🔥", "💯", "😭", "🤣",
    "🤔", "🥺", "😎", "😏", "😜", "😤", "🙄", "😴", "💕", "💖", "💗", "💘", "💙", "💚",
    "💛", "💜", "💝", "💞", "💟",
];

/// Symbols that match the emoji ranges but are not conversational emoji.
pub const EMOJI_DENYLIST: &[&str] = &["©", "®", "™", "℗", "℠"];

/// Variation selector 16, requests emoji presentation.
pub const VS16: char = '\u{FE0F}';

/// Zero width joiner, glues emoji into one glyph.
pub const ZWJ: char = '\u{200D}';

/// Combining enclosing keycap.
pub const KEYCAP: char = '\u{20E3}';

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = u32::from(c);
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Returns `true` if `c` falls in one of the [`EMOJI_RANGES`].
pub fn is_emoji_char(c: char) -> bool {
    in_ranges(c, EMOJI_RANGES)
}

/// Returns `true` if `c` is removed before word splitting.
pub fn is_word_strip_char(c: char) -> bool {
    in_ranges(c, WORD_STRIP_RANGES)
}

/// Regional indicator symbols, pairs of which form flags.
pub fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Fitzpatrick skin tone modifiers.
pub fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}
