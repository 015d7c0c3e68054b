//! Splits plain text into titled sections using a heading heuristic.
//!
//! A trimmed, non-empty line shorter than [`MAX_HEADING_CHARS`] is a heading
//! when it is all uppercase, ends with `:`, or ends with `.` and has at most
//! [`MAX_HEADING_WORDS`] words. Body lines are joined with a space. Text
//! before the first heading goes into [`LEADING_TITLE`].
use elscan::{Document, Section};

pub const MAX_HEADING_CHARS: usize = 50;
pub const MAX_HEADING_WORDS: usize = 5;
pub const LEADING_TITLE: &str = "Introduction";

fn is_uppercase_line(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn is_heading(line: &str) -> bool {
    if line.chars().count() >= MAX_HEADING_CHARS {
        return false;
    }
    is_uppercase_line(line)
        || line.ends_with(':')
        || (line.ends_with('.') && line.split_whitespace().count() <= MAX_HEADING_WORDS)
}

fn heading_title(line: &str) -> &str {
    line.trim_end_matches([':', '.']).trim_end()
}

/// Builds a [`Document`]; headings with no body text produce no section
pub fn split_sections(content: &str) -> Document {
    let mut sections = Vec::new();
    let mut title = LEADING_TITLE.to_string();
    let mut body: Vec<&str> = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_heading(line) {
            if !body.is_empty() {
                sections.push(Section::new(title, body.join(" ")));
                body.clear();
            }
            title = heading_title(line).to_string();
        } else {
            body.push(line);
        }
    }

    if !body.is_empty() {
        sections.push(Section::new(title, body.join(" ")));
    }

    Document::new(sections)
}
