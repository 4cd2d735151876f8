/// Normalize raw extracted document text.
///
/// Steps:
/// 1. CRLF and lone CR become LF
/// 2. Runs of spaces and tabs collapse to a single space
/// 3. Three or more consecutive newlines collapse to two
/// 4. Leading and trailing whitespace is trimmed
///
/// Never fails; the output is a fixed point (normalizing twice changes nothing).
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Line endings
    let mut unified = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            unified.push('\n');
        } else {
            unified.push(c);
        }
    }

    // Horizontal whitespace
    let mut spaced = String::with_capacity(unified.len());
    let mut in_run = false;
    for c in unified.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                spaced.push(' ');
            }
            in_run = true;
        } else {
            spaced.push(c);
            in_run = false;
        }
    }

    // Blank line runs
    let mut collapsed = String::with_capacity(spaced.len());
    let mut newlines = 0;
    for c in spaced.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                collapsed.push('\n');
            }
        } else {
            newlines = 0;
            collapsed.push(c);
        }
    }

    collapsed.trim().to_string()
}
