//! Visitor name extraction
//!
//! A best-effort heuristic, not a name parser: it strips a Portuguese
//! self-introduction ("meu nome é", "eu sou", ...) and title-cases what is
//! left. Odd results such as "Oitavio" becoming "Tavio" are accepted
//! behavior.

use regex::Regex;
use std::sync::LazyLock;

/// Leading self-introduction followed by the candidate name
static INTRODUCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:olá|ola|oi|prazer|meu nome é|eu me chamo|é|sou|meu nome eh|eu sou)\s*[,.!]?\s*)?([a-záàâãéèêíóôõúç\s]+)$",
    )
    .expect("introduction regex is valid")
});

/// Greetings are often stacked ("olá, meu nome é ana"); strip at most this many
const MAX_PREFIXES: usize = 2;

const MIN_NAME_CHARS: usize = 2;

/// Extract a display name from free text, or `None` if it does not look like one
pub fn extract_name(raw: &str) -> Option<String> {
    let mut candidate = raw.trim().to_lowercase();

    for _ in 0..MAX_PREFIXES {
        let stripped = INTRODUCTION_RE
            .captures(&candidate)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())?;
        if stripped == candidate {
            break;
        }
        candidate = stripped;
    }

    let name = title_case(&candidate);
    is_valid_name(&name).then_some(name)
}

/// Upper-case the first letter of every word and lower-case the rest
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_CHARS && !name.chars().any(|c| c.is_ascii_digit())
}
