//! Contact data extraction from free-form visitor messages.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})\D*(\d{4,5})\D*(\d{4})").expect("PHONE_PATTERN should compile - this is a bug")
});

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-zÀ-ÿ]{3,}(?:\s+[A-Za-zÀ-ÿ]{2,})+")
        .expect("NAME_PATTERN should compile - this is a bug")
});

/// Find a Brazilian phone number and format it as `(DD) NNNNN-NNNN`.
pub fn format_phone(text: &str) -> Option<String> {
    let captures = PHONE_PATTERN.captures(text)?;
    Some(format!("({}) {}-{}", &captures[1], &captures[2], &captures[3]))
}

/// Find the first run of two or more words and title-case it.
pub fn extract_name(text: &str) -> Option<String> {
    NAME_PATTERN.find(text).map(|m| title_case(m.as_str()))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
