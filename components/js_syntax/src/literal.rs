//! Literal text helpers: escape validation, string decoding and quoting,
//! numeric literal evaluation.

/// Check the escape sequences of a string or template body.
///
/// `\x` needs two hex digits, `\u` needs four hex digits or a braced code
/// point no greater than `10FFFF`. Every other escaped character is allowed.
pub(crate) fn check_escapes(body: &str) -> Result<(), &'static str> {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            Some('x') => {
                for _ in 0..2 {
                    if !chars.next().is_some_and(|d| d.is_ascii_hexdigit()) {
                        return Err("Invalid hexadecimal escape sequence");
                    }
                }
            }
            Some('u') => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut value: u32 = 0;
                    let mut digits = 0;
                    loop {
                        match chars.next() {
                            Some('}') if digits > 0 => break,
                            Some(d) if d.is_ascii_hexdigit() => {
                                value = value
                                    .saturating_mul(16)
                                    .saturating_add(d.to_digit(16).unwrap_or(0));
                                digits += 1;
                            }
                            _ => return Err("Invalid Unicode escape sequence"),
                        }
                    }
                    if value > 0x10FFFF {
                        return Err("Undefined Unicode code-point");
                    }
                } else {
                    for _ in 0..4 {
                        if !chars.next().is_some_and(|d| d.is_ascii_hexdigit()) {
                            return Err("Invalid Unicode escape sequence");
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn take_hex(chars: &[char], start: usize, count: usize) -> Option<u32> {
    let digits = chars.get(start..start + count)?;
    digits
        .iter()
        .try_fold(0u32, |acc, d| acc.checked_mul(16)?.checked_add(d.to_digit(16)?))
}

/// Decode the body of a string literal or template chunk (no delimiters).
///
/// Escaped line terminators are line continuations and produce nothing.
/// Lone surrogates from `\uD800`-style escapes become U+FFFD, except that a
/// high/low surrogate pair is combined.
pub fn unescape(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '\r' => {
                if chars.get(i) == Some(&'\n') {
                    i += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => match take_hex(&chars, i, 2) {
                Some(code) => {
                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                    i += 2;
                }
                None => out.push('x'),
            },
            'u' => {
                if chars.get(i) == Some(&'{') {
                    let close = chars[i..].iter().position(|c| *c == '}');
                    let code = close.and_then(|len| take_hex(&chars, i + 1, len - 1));
                    match (close, code) {
                        (Some(len), Some(code)) => {
                            out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                            i += len + 1;
                        }
                        _ => out.push('u'),
                    }
                } else {
                    match take_hex(&chars, i, 4) {
                        Some(high @ 0xD800..=0xDBFF) => {
                            i += 4;
                            let low = (chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u'))
                                .then(|| take_hex(&chars, i + 2, 4))
                                .flatten()
                                .filter(|low| (0xDC00..=0xDFFF).contains(low));
                            match low {
                                Some(low) => {
                                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                                    i += 6;
                                }
                                None => out.push('\u{FFFD}'),
                            }
                        }
                        Some(code) => {
                            out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                            i += 4;
                        }
                        None => out.push('u'),
                    }
                }
            }
            '0'..='7' => {
                // Legacy octal: up to three digits, value at most 0o377
                let mut code = escaped.to_digit(8).unwrap_or(0);
                let max_len = if escaped <= '3' { 3 } else { 2 };
                let mut len = 1;
                while len < max_len {
                    match chars.get(i).and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            i += 1;
                            len += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => out.push(other),
        }
    }
    out
}

/// Decode a template chunk. Unescaped CR LF and lone CR read as LF.
pub fn cook_template(raw: &str) -> String {
    if !raw.contains('\r') {
        return unescape(raw);
    }
    unescape(&raw.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Quote a decoded string so that it scans back to the same value.
///
/// ```
/// use js_syntax::literal::quote_string;
///
/// assert_eq!(quote_string("it's\n", '\''), r"'it\'s\n'");
/// assert_eq!(quote_string("say \"hi\"", '"'), r#""say \"hi\"""#);
/// ```
pub fn quote_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000B}' => out.push_str("\\v"),
            '\u{000C}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Numeric value of a numeric literal's source text.
///
/// Handles decimal (with fraction and exponent), `0x`, `0o`, `0b` and
/// legacy octal (`017`) spellings.
pub fn numeric_value(raw: &str) -> f64 {
    let lower = raw.to_ascii_lowercase();
    let radix_body = [("0x", 16), ("0o", 8), ("0b", 2)]
        .iter()
        .find_map(|(prefix, radix)| lower.strip_prefix(prefix).map(|body| (body, *radix)));
    if let Some((body, radix)) = radix_body {
        return integer_value(body, radix);
    }
    if lower.len() > 1 && lower.starts_with('0') && lower.chars().all(|c| c.is_digit(8)) {
        return integer_value(&lower[1..], 8);
    }
    lower.parse::<f64>().unwrap_or(f64::NAN)
}

fn integer_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|d| d.to_digit(radix))
        .fold(0.0, |acc, d| acc * radix as f64 + d as f64)
}
