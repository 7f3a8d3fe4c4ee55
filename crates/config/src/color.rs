/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional) into RGBA bytes.
///
/// Six-digit colours are fully opaque.
pub fn parse_hex_color(value: &str) -> Option<[u8; 4]> {
    let hex = value.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 {
        channel(6)?
    } else {
        u8::MAX
    };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}
