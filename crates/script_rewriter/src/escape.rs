// crates/script_rewriter/src/escape.rs

/// Escapes `text` so it can sit between double quotes of a JavaScript string
/// literal in the generated script.
pub fn escape_for_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

type CharStream<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Reads exactly `count` hex digits. Nothing is consumed on failure.
fn take_hex(chars: &mut CharStream<'_>, count: usize) -> Option<u32> {
    let digits: String = chars.clone().take(count).collect();
    if digits.chars().count() != count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    for _ in 0..count {
        chars.next();
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Reads a `{XXXX}` code point escape body. Nothing is consumed on failure.
fn take_braced_hex(chars: &mut CharStream<'_>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('{') {
        return None;
    }
    let mut digits = String::new();
    loop {
        match lookahead.next()? {
            '}' => break,
            c if c.is_ascii_hexdigit() && digits.len() < 6 => digits.push(c),
            _ => return None,
        }
    }
    let code = u32::from_str_radix(&digits, 16).ok()?;
    *chars = lookahead;
    Some(code)
}

/// Decodes the body of a double-quoted JavaScript string literal (the text
/// between the quotes) into the string it denotes.
///
/// Malformed `\x`/`\u` escapes are kept as written. Lone surrogates decode to
/// U+FFFD.
pub fn decode_js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut pending_high: Option<u32> = None;

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            out.push(ch);
            continue;
        }
        let Some(esc) = chars.next() else {
            flush_surrogate(&mut out, &mut pending_high);
            out.push('\\');
            break;
        };
        match esc {
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    take_braced_hex(&mut chars)
                } else {
                    take_hex(&mut chars, 4)
                };
                match code {
                    Some(code) => push_code_unit(&mut out, &mut pending_high, code),
                    None => {
                        flush_surrogate(&mut out, &mut pending_high);
                        out.push_str("\\u");
                    }
                }
            }
            'x' => {
                flush_surrogate(&mut out, &mut pending_high);
                match take_hex(&mut chars, 2).and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str("\\x"),
                }
            }
            other => {
                flush_surrogate(&mut out, &mut pending_high);
                match other {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'b' => out.push('\u{0008}'),
                    'f' => out.push('\u{000C}'),
                    'v' => out.push('\u{000B}'),
                    '0' => out.push('\0'),
                    // line continuation
                    '\n' => {}
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                    }
                    _ => out.push(other),
                }
            }
        }
    }
    flush_surrogate(&mut out, &mut pending_high);
    out
}

fn push_code_unit(out: &mut String, pending_high: &mut Option<u32>, code: u32) {
    if (0xDC00..0xE000).contains(&code) {
        if let Some(high) = pending_high.take() {
            let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
            out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
        } else {
            out.push(char::REPLACEMENT_CHARACTER);
        }
        return;
    }
    flush_surrogate(out, pending_high);
    if (0xD800..0xDC00).contains(&code) {
        *pending_high = Some(code);
    } else {
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}

fn flush_surrogate(out: &mut String, pending_high: &mut Option<u32>) {
    if pending_high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}
