//! Display helpers for raw provider text.

use regex::Regex;
use std::sync::OnceLock;

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?[^>]+(>|$)").expect("markup pattern is valid"))
}

fn step_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n|\d+\.\s").expect("step separator pattern is valid"))
}

/// Remove anything that looks like an opening or closing tag.
///
/// This is a best-effort text transform, not an HTML parser: a `<` with no
/// closing `>` swallows the rest of the input, and entities are left as-is.
pub fn strip_markup(html: &str) -> String {
    markup_regex().replace_all(html, "").into_owned()
}

/// Split an instruction blob into steps.
///
/// Steps are separated by newlines or by a leading "<number>. " marker. Each
/// step is trimmed and blank steps are dropped, so an empty input gives an
/// empty list.
pub fn split_instructions(raw: &str) -> Vec<String> {
    step_separator_regex()
        .split(raw)
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(String::from)
        .collect()
}

/// Upper-case the first character of a short label
pub fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
