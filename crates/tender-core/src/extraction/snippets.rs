use crate::model::CandidateLine;

/// Phrases that mark the pricing part of a tender document.
pub const PRICING_KEYWORDS: &[&str] = &[
    "pricing schedule",
    "price schedule",
    "bill of quantities",
    "boq",
    "pricing instructions",
    "fees and rates",
    "price list",
];

/// Lines kept before a keyword line.
const WINDOW_BEFORE: usize = 3;
/// Lines kept after a keyword line.
const WINDOW_AFTER: usize = 9;
/// Snippets kept in the excerpt.
const MAX_SNIPPETS: usize = 5;
/// Characters of text used as the excerpt when no keyword matches.
const FALLBACK_CHARS: usize = 4000;
/// A candidate line must be longer than this (in characters).
const MIN_CANDIDATE_CHARS: usize = 20;
const DESCRIPTION_GUESS_CHARS: usize = 120;

/// Find a window of lines around every pricing keyword.
pub fn extract_snippets(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let lower = line.to_lowercase();
            PRICING_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(|(i, _)| {
            let start = i.saturating_sub(WINDOW_BEFORE);
            let end = (i + WINDOW_AFTER + 1).min(lines.len());
            lines[start..end].join("\n")
        })
        .collect()
}

/// The part of the document worth showing: the first few keyword snippets,
/// or the start of the text when there are none.
pub fn pricing_excerpt(text: &str) -> String {
    let snippets = extract_snippets(text);
    if snippets.is_empty() {
        text.chars().take(FALLBACK_CHARS).collect()
    } else {
        snippets
            .into_iter()
            .take(MAX_SNIPPETS)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Lines of the excerpt that contain a digit and are long enough to be an item.
pub fn candidate_lines(excerpt: &str) -> Vec<CandidateLine> {
    excerpt
        .lines()
        .filter(|line| {
            line.chars().any(|c| c.is_ascii_digit())
                && line.chars().count() > MIN_CANDIDATE_CHARS
        })
        .map(|line| {
            let raw_line = line.trim().to_string();
            CandidateLine {
                description_guess: raw_line.chars().take(DESCRIPTION_GUESS_CHARS).collect(),
                raw_line,
                quantity_guess: None,
                unit_guess: None,
            }
        })
        .collect()
}
