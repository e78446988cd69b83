pub const DELIMITER: u8 = b';';

const HASH_SEED: u64 = 17;
const HASH_MULTIPLIER: u64 = 31;

/// One decoded `<key>;<value>` line. `value` is the reading times ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub key: &'a [u8],
    pub hash: u64,
    pub value: i32,
}

/// Rolling multiplicative hash of the key bytes. Wraps on overflow.
#[inline(always)]
pub fn key_hash(key: &[u8]) -> u64 {
    key.iter().fold(HASH_SEED, |hash, &c| {
        hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(c as u64)
    })
}

#[inline(always)]
fn digit(b: u8) -> Option<i32> {
    if b.is_ascii_digit() {
        Some((b - b'0') as i32)
    } else {
        None
    }
}

/// Parses one line (terminator excluded) in a single forward pass.
///
/// The key runs up to the first `;` and is hashed on the way. The value must
/// match `[-]D{1,2}.D` exactly; anything else is rejected with a short reason
/// instead of being read past.
#[inline]
pub fn parse_line(line: &[u8]) -> Result<ParsedLine<'_>, &'static str> {
    let mut hash = HASH_SEED;
    let mut i = 0;
    while i < line.len() && line[i] != DELIMITER {
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(line[i] as u64);
        i += 1;
    }
    if i == line.len() {
        return Err("missing delimiter");
    }
    if i == 0 {
        return Err("empty key");
    }
    let key = &line[..i];
    i += 1;

    let mut sign = 1;
    if line.get(i) == Some(&b'-') {
        sign = -1;
        i += 1;
    }

    let mut num = match line.get(i).copied().and_then(digit) {
        Some(d) => d,
        None => return Err("expected digit"),
    };
    i += 1;
    if let Some(d) = line.get(i).copied().and_then(digit) {
        num = num * 10 + d;
        i += 1;
    }
    if line.get(i) != Some(&b'.') {
        return Err("expected decimal point");
    }
    i += 1;
    match line.get(i).copied().and_then(digit) {
        Some(d) => num = num * 10 + d,
        None => return Err("expected fractional digit"),
    }
    i += 1;
    if i != line.len() {
        return Err("trailing bytes after value");
    }

    Ok(ParsedLine {
        key,
        hash,
        value: sign * num,
    })
}
