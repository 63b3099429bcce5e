//! Content-Disposition parsing with media-type parameter syntax (RFC 2045/2183/2231).

use std::collections::BTreeMap;
use std::fmt;

/// Why a Content-Disposition value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispositionError {
    /// No disposition type before the first `;`.
    MissingType,
    /// The disposition type is not a token (or `token/token`).
    InvalidType,
    /// A parameter is not `name=value` with a token or quoted-string value.
    InvalidParameter,
    /// The same parameter name appears twice.
    DuplicateParameter(String),
}

impl fmt::Display for DispositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispositionError::MissingType => write!(f, "no disposition type"),
            DispositionError::InvalidType => write!(f, "invalid disposition type"),
            DispositionError::InvalidParameter => write!(f, "invalid parameter"),
            DispositionError::DuplicateParameter(name) => {
                write!(f, "duplicate parameter {:?}", name)
            }
        }
    }
}

impl std::error::Error for DispositionError {}

/// A parsed Content-Disposition header: the lowercased disposition type and its parameters.
///
/// RFC 2231 extended (`filename*=UTF-8''...`) and continued (`filename*0`, `filename*1*`)
/// parameters are decoded and stored under their base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    disposition: String,
    params: BTreeMap<String, String>,
}

impl ContentDisposition {
    pub fn parse(value: &str) -> Result<Self, DispositionError> {
        let (head, mut rest) = match value.find(';') {
            Some(i) => (&value[..i], &value[i..]),
            None => (value, ""),
        };
        let disposition = head.trim().to_ascii_lowercase();
        check_disposition_type(&disposition)?;

        let mut simple: BTreeMap<String, String> = BTreeMap::new();
        // base name -> (section index or None for unsectioned `name*`) -> (raw value, extended)
        let mut extended: BTreeMap<String, BTreeMap<Option<u32>, (String, bool)>> = BTreeMap::new();

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            let (key, val, remaining) = match consume_param(rest) {
                Some(p) => p,
                None => {
                    if rest.trim() == ";" {
                        // A lone trailing semicolon is tolerated.
                        break;
                    }
                    return Err(DispositionError::InvalidParameter);
                }
            };
            rest = remaining;

            match split_extended_key(&key) {
                Some((base, section, is_ext)) => {
                    let sections = extended.entry(base).or_default();
                    if sections.insert(section, (val, is_ext)).is_some() {
                        return Err(DispositionError::DuplicateParameter(key));
                    }
                }
                None => {
                    if simple.contains_key(&key) {
                        return Err(DispositionError::DuplicateParameter(key));
                    }
                    simple.insert(key, val);
                }
            }
        }

        let mut params = simple;
        for (base, sections) in extended {
            if let Some(decoded) = join_extended(&sections) {
                params.insert(base, decoded);
            }
        }

        Ok(ContentDisposition {
            disposition,
            params,
        })
    }

    /// Lowercased disposition type, e.g. `attachment`.
    pub fn disposition(&self) -> &str {
        &self.disposition
    }

    /// Parameter value by lowercase name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The suggested filename, if the header carries one.
    pub fn filename(&self) -> Option<&str> {
        self.param("filename")
    }
}

fn is_tspecial(c: char) -> bool {
    "()<>@,;:\\\"/[]?=".contains(c)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii() && c > ' ' && c != '\x7f' && !is_tspecial(c)
}

/// Splits the longest token prefix off `s`.
fn consume_token(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_token_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn check_disposition_type(t: &str) -> Result<(), DispositionError> {
    let (token, rest) = consume_token(t);
    if token.is_empty() {
        return Err(if t.is_empty() {
            DispositionError::MissingType
        } else {
            DispositionError::InvalidType
        });
    }
    if rest.is_empty() {
        return Ok(());
    }
    let sub = rest
        .strip_prefix('/')
        .ok_or(DispositionError::InvalidType)?;
    let (subtype, rest) = consume_token(sub);
    if subtype.is_empty() || !rest.is_empty() {
        return Err(DispositionError::InvalidType);
    }
    Ok(())
}

/// Consumes `; name=value`. Returns the lowercased name, the value and the remaining input.
fn consume_param(s: &str) -> Option<(String, String, &str)> {
    let s = s.trim_start().strip_prefix(';')?.trim_start();
    let (name, s) = consume_token(s);
    if name.is_empty() {
        return None;
    }
    let s = s.trim_start().strip_prefix('=')?.trim_start();
    let (value, s) = consume_value(s)?;
    Some((name.to_ascii_lowercase(), value, s))
}

fn consume_value(s: &str) -> Option<(String, &str)> {
    match s.strip_prefix('"') {
        Some(quoted) => consume_quoted(quoted),
        None => {
            let (token, rest) = consume_token(s);
            if token.is_empty() {
                None
            } else {
                Some((token.to_string(), rest))
            }
        }
    }
}

/// Reads a quoted-string body up to the closing quote.
///
/// A backslash only escapes a special character; before anything else it is kept
/// literally, so unescaped Windows paths such as `C:\dir\file.txt` survive.
fn consume_quoted(s: &str) -> Option<(String, &str)> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &s[i + 1..])),
            '\r' | '\n' => return None,
            '\\' => match chars.peek() {
                Some(&(_, next)) if is_tspecial(next) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    None
}

/// `name*` -> (name, None, true); `name*3` -> (name, Some(3), false); `name*3*` -> (name, Some(3), true).
fn split_extended_key(key: &str) -> Option<(String, Option<u32>, bool)> {
    let (base, suffix) = key.split_once('*')?;
    if suffix.is_empty() {
        return Some((base.to_string(), None, true));
    }
    let (index, is_ext) = match suffix.strip_suffix('*') {
        Some(idx) => (idx, true),
        None => (suffix, false),
    };
    let index: u32 = index.parse().ok()?;
    Some((base.to_string(), Some(index), is_ext))
}

fn join_extended(sections: &BTreeMap<Option<u32>, (String, bool)>) -> Option<String> {
    if let Some((raw, _)) = sections.get(&None) {
        return decode_extended_value(raw);
    }

    let mut out = String::new();
    for n in 0u32.. {
        let Some((raw, is_ext)) = sections.get(&Some(n)) else {
            break;
        };
        if !is_ext {
            out.push_str(raw);
        } else if n == 0 {
            out.push_str(&decode_extended_value(raw)?);
        } else {
            out.push_str(&percent_decode(raw));
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Decodes `charset'language'percent-encoded`. Only UTF-8 and US-ASCII are understood.
fn decode_extended_value(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if charset.is_empty() {
        return None;
    }
    if charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("us-ascii") {
        Some(percent_decode(encoded))
    } else {
        None
    }
}

/// Percent-decodes `input`; malformed escapes are kept as-is and invalid UTF-8 is replaced.
pub(crate) fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
