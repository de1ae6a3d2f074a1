//! Ordering and display conventions for catalogue identifiers.
//!
//! Catalogue folders are named freely (`qx-1`, `qx-10`, `oak-line`), so the
//! listing is sorted with a numeric-aware natural order: runs of digits
//! compare by value, everything else compares case-insensitively. This is
//! what makes `catalog-2` sort before `catalog-10`.
//!
//! ## Display Headings
//!
//! Series-style identifiers get a spaced heading on the index page:
//! - `qx-3` → "QX 3"
//! - `QX-12` → "QX 12"
//! - `oak-line` → "OAK-LINE" (anything else is upper-cased)

use std::cmp::Ordering;

/// One run of a natural sort key: either a digit run or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(run: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(run)
    } else {
        Chunk::Text(run)
    }
}

/// Compare two digit runs by numeric value without parsing (no overflow).
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware, case-insensitive ordering.
///
/// Equal keys (`Qx-01` vs `qx-1`) fall back to plain byte order so the
/// result is a total order and sorting is deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            // Digits sort before letters, as they do in most collations.
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

/// Heading shown for a catalogue on the index page.
pub fn catalog_heading(id: &str) -> String {
    let series = id
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("qx-"))
        .map(|_| &id[3..])
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
    match series {
        Some(number) => format!("QX {number}"),
        None => id.to_uppercase(),
    }
}
