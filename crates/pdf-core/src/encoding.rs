//! Single-byte text encoding for the Helvetica faces
//!
//! Text is written with `WinAnsiEncoding` as the base encoding. The unused
//! WinAnsi slots are remapped through a `/Differences` array so Turkish
//! letters (ğ Ğ ı İ ş Ş) can be shown with the same fonts.

use lopdf::{dictionary, Dictionary, Object};

/// Byte written for characters the encoding cannot represent
pub const REPLACEMENT: u8 = b'?';

/// Codes remapped on top of WinAnsi: (code, unicode, glyph name)
const DIFFERENCES: [(u8, char, &str); 6] = [
    (0x7F, 'ş', "scedilla"),
    (0x81, 'Ğ', "Gbreve"),
    (0x8D, 'ğ', "gbreve"),
    (0x8F, 'İ', "Idotaccent"),
    (0x90, 'ı', "dotlessi"),
    (0x9D, 'Ş', "Scedilla"),
];

/// Encode a single character, or `None` if it has no code
pub fn encode_char(c: char) -> Option<u8> {
    if let Some((code, _, _)) = DIFFERENCES.iter().find(|(_, ch, _)| *ch == c) {
        return Some(*code);
    }

    let code = match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encode text into font codes, replacing unknown characters with `?`
///
/// Control characters (other than tab) are dropped.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .map(|c| encode_char(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Hex string operand for a content stream (e.g., "<48656C6C6F>")
pub fn hex_encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2 + 2);
    hex.push('<');
    for b in bytes {
        hex.push_str(&format!("{b:02X}"));
    }
    hex.push('>');
    hex
}

/// The `/Encoding` dictionary shared by all fonts
pub(crate) fn encoding_dictionary() -> Dictionary {
    let mut differences = Vec::new();
    for (code, _, name) in DIFFERENCES {
        differences.push(Object::Integer(code as i64));
        differences.push(Object::Name(name.as_bytes().to_vec()));
    }

    dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => differences,
    }
}
