use std::cmp::Ordering;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Dictionary-order comparison for names: accents and case are ignored first,
/// the raw strings only break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

pub fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            // ñ sorts after n in Spanish
            'ñ' | 'Ñ' => {
                key.push('n');
                key.push('\u{10FFFF}');
            }
            'ß' => key.push_str("ss"),
            'æ' | 'Æ' => key.push_str("ae"),
            'œ' | 'Œ' => key.push_str("oe"),
            'ø' | 'Ø' => key.push('o'),
            'ł' | 'Ł' => key.push('l'),
            'đ' | 'Đ' => key.push('d'),
            _ => decompose_canonical(c, |part| {
                if !is_combining_mark(part) {
                    key.extend(part.to_lowercase());
                }
            }),
        }
    }
    key
}
