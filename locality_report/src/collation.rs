//! Ordering of locality names the way a reader expects them in a list.
//!
//! Punctuation and spaces are ignored, runs of digits compare by their
//! numerical value ("2nd St" before "10th St") and letters compare without
//! regard to case or accents. Accents, then case, only break ties. Other
//! symbols are kept and sort before digits.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::Locality;

// Letters with a stroke have no canonical decomposition. They sort with their
// base letter, the stroke acting as an accent.
const STROKES: &[(char, char)] = &[('ø', 'o'), ('ł', 'l'), ('đ', 'd'), ('ħ', 'h'), ('ŧ', 't')];
const STROKE_MARK: char = '\u{0338}';

#[derive(Eq, PartialEq, Debug, Clone)]
enum Element {
    // Symbols like '$' or '+' are not ignored. They come before digits and letters.
    Symbol(char),
    // Digits with the leading zeros removed.
    Number(String),
    Letter {
        base: char,
        marks: Vec<char>,
        upper: bool,
    },
}

impl Element {
    fn rank(&self) -> u8 {
        match self {
            Element::Symbol(_) => 0,
            Element::Number(_) => 1,
            Element::Letter { .. } => 2,
        }
    }

    fn primary_cmp(&self, other: &Element) -> Ordering {
        match (self, other) {
            (Element::Symbol(a), Element::Symbol(b)) => a.cmp(b),
            (Element::Number(a), Element::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Element::Letter { base: a, .. }, Element::Letter { base: b, .. }) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn marks(&self) -> &[char] {
        match self {
            Element::Letter { marks, .. } => marks,
            _ => &[],
        }
    }

    fn upper(&self) -> bool {
        matches!(self, Element::Letter { upper: true, .. })
    }
}

/// Whitespace and punctuation are skipped when comparing names. Other symbols are kept.
fn is_ignorable(c: char) -> bool {
    if c.is_whitespace() {
        return true;
    }
    if c.is_ascii() {
        // The ASCII punctuation characters, without the symbols ($ + < = > ^ ` | ~).
        return "!\"#%&'()*,-./:;?@[\\]_{}".contains(c);
    }
    matches!(c,
        '\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
        | '\u{2010}'..='\u{2027}'
        | '\u{2030}'..='\u{2043}'
        | '\u{2045}'..='\u{2051}'
        | '\u{2053}'..='\u{205E}'
        | '\u{3001}'..='\u{3003}'
        | '\u{3008}'..='\u{3011}')
}

fn letter(lc: char, upper: bool) -> Element {
    match STROKES.iter().find(|(stroked, _)| *stroked == lc) {
        Some((_, base)) => Element::Letter {
            base: *base,
            marks: vec![STROKE_MARK],
            upper,
        },
        None => Element::Letter {
            base: lc,
            marks: Vec::new(),
            upper,
        },
    }
}

// Accented letters are decomposed first, so that the accents follow their base
// letter as combining marks, whether the name came composed or not.
fn elements(name: &str) -> Vec<Element> {
    let mut res: Vec<Element> = Vec::new();
    let mut digits = String::new();
    for c in name.nfd() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            res.push(number_element(&digits));
            digits.clear();
        }
        if is_combining_mark(c) {
            push_mark(&mut res, c);
            continue;
        }
        if is_ignorable(c) {
            continue;
        }
        if !c.is_alphanumeric() {
            res.push(Element::Symbol(c));
            continue;
        }
        let upper = c.is_uppercase();
        for lc in c.to_lowercase() {
            if is_combining_mark(lc) {
                push_mark(&mut res, lc);
            } else {
                res.push(letter(lc, upper));
            }
        }
    }
    if !digits.is_empty() {
        res.push(number_element(&digits));
    }
    res
}

// A mark that does not follow a letter has no weight.
fn push_mark(res: &mut [Element], mark: char) {
    if let Some(Element::Letter { marks, .. }) = res.last_mut() {
        marks.push(mark);
    }
}

fn number_element(digits: &str) -> Element {
    let trimmed = digits.trim_start_matches('0');
    Element::Number(trimmed.to_string())
}

/// Compares two names in reading order.
///
/// Returns `Ordering::Equal` only when the names differ by punctuation, spacing,
/// leading zeros or Unicode normalization form. A stable sort then keeps the input order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let ea = elements(a);
    let eb = elements(b);

    let primary = ea
        .iter()
        .zip(eb.iter())
        .map(|(x, y)| x.primary_cmp(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or_else(|| ea.len().cmp(&eb.len()));
    if primary != Ordering::Equal {
        return primary;
    }

    // Same length and same base letters from here on.
    let secondary = ea
        .iter()
        .zip(eb.iter())
        .map(|(x, y)| x.marks().cmp(y.marks()))
        .find(|o| *o != Ordering::Equal);
    if let Some(o) = secondary {
        return o;
    }

    // Lowercase first.
    ea.iter()
        .zip(eb.iter())
        .map(|(x, y)| x.upper().cmp(&y.upper()))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Sorts the localities by name. The sort is stable.
pub fn sort_by_name(localities: &[Locality]) -> Vec<Locality> {
    let mut res = localities.to_vec();
    res.sort_by(|a, b| compare_names(&a.name, &b.name));
    res
}
