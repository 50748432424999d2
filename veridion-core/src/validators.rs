//! validators.rs - Programmatic checks that run after a rule's regex has matched.
//!
//! A regex can only check the shape of an identifier. For rules declared with
//! `programmatic_validation: true`, the classifier additionally runs the check
//! registered here for that rule's name.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Verhoeff multiplication table (dihedral group D5).
const VERHOEFF_D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Verhoeff permutation table.
const VERHOEFF_P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 7, 8, 6, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 2, 1, 5, 8, 9, 3, 6],
];

/// Validates a digit string whose last digit is a Verhoeff check digit.
///
/// # Returns
///
/// `false` for an empty string or any non-digit character.
pub fn is_valid_verhoeff(num_str: &str) -> bool {
    if num_str.is_empty() {
        return false;
    }
    let mut c: u8 = 0;
    for (i, ch) in num_str.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else { return false; };
        c = VERHOEFF_D[c as usize][VERHOEFF_P[i % 8][digit as usize] as usize];
    }
    c == 0
}

/// Validates a 12-digit national identity number.
///
/// Interior spaces are ignored. The first digit may not be 0 or 1, and the
/// last digit must be the Verhoeff check digit of the first eleven.
pub fn is_valid_national_id_programmatically(id: &str) -> bool {
    let digits: String = id.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if digits.starts_with('0') || digits.starts_with('1') {
        return false;
    }
    is_valid_verhoeff(&digits)
}

static TAX_ID_HOLDER_TYPES: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(['A', 'B', 'C', 'F', 'G', 'H', 'L', 'J', 'P', 'T']);
    set
});

/// Validates a 10-character tax account number.
///
/// Beyond the `AAAAA9999A` shape, the fourth character encodes the holder type
/// and must be one of the issued codes.
pub fn is_valid_tax_id_programmatically(id: &str) -> bool {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() != 10 {
        return false;
    }
    let shape_ok = chars[..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase();
    shape_ok && TAX_ID_HOLDER_TYPES.contains(&chars[3])
}

/// Runs the programmatic check registered for `rule_name`.
///
/// Rules without a registered check pass unconditionally.
pub fn run_programmatic_validator(rule_name: &str, matched_text: &str) -> bool {
    match rule_name {
        "NATIONAL_ID" => is_valid_national_id_programmatically(matched_text),
        "TAX_ID" => is_valid_tax_id_programmatically(matched_text),
        _ => true,
    }
}
