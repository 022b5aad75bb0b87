/// Decodes the escape sequences allowed inside string/character literals.
/// Supported escapes: `\\ \" \' \n \r \t \0 \xHH \uHHHH`. Returns the decoded
/// character and how many source characters (after the backslash) were
/// consumed, or `None` if `rest` does not start with a recognized escape.
pub fn decode_escape(rest: &str) -> Option<(char, usize)> {
    let mut chars = rest.chars();
    match chars.next()? {
        '\\' => Some(('\\', 1)),
        '"' => Some(('"', 1)),
        '\'' => Some(('\'', 1)),
        'n' => Some(('\n', 1)),
        'r' => Some(('\r', 1)),
        't' => Some(('\t', 1)),
        '0' => Some(('\0', 1)),
        'x' => decode_fixed_hex(chars.as_str(), 2).map(|(c, n)| (c, n + 1)),
        'u' => decode_fixed_hex(chars.as_str(), 4).map(|(c, n)| (c, n + 1)),
        _ => None,
    }
}

fn decode_fixed_hex(rest: &str, digits: usize) -> Option<(char, usize)> {
    let hex: String = rest.chars().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    let value = u32::from_str_radix(&hex, 16).ok()?;
    let c = char::from_u32(value)?;
    Some((c, digits))
}
