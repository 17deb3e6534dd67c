//! Terminal rendering of reflections.
//!
//! Pure text transforms: every function here takes data in and returns
//! a `String`, with no I/O and no color, so output is deterministic and
//! testable. Widths are measured in chars, matching how the box frames
//! are drawn.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use reflections_core::{Language, Reflection};
use reflections_query::Statistics;

/// Greedy word wrap.
///
/// Words accumulate onto a line while `length + word + separators`
/// stays within `width`; the overflowing word starts the next line. A
/// single word longer than `width` gets its own line and is never
/// split. Every input word appears exactly once, in order.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        // current.len() counts one separating space per word already on
        // the line.
        if current_len + word_len + current.len() <= width {
            current.push(word);
            current_len += word_len;
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Wrap a body that may contain embedded paragraph breaks, keeping an
/// empty line between paragraphs.
pub fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, paragraph) in text.split('\n').filter(|p| !p.trim().is_empty()).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(wrap_text(paragraph, width));
    }
    lines
}

/// Long-form date heading, e.g. `Wednesday, March 05, 2025`.
fn date_heading(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

fn pad(content: &str, inner: usize) -> String {
    format!("│ {:<inner$} │", content)
}

fn rule(edge_left: char, edge_right: char, inner: usize) -> String {
    format!("{}{}{}", edge_left, "─".repeat(inner + 2), edge_right)
}

/// One reflection as a box-drawn block.
pub fn render_reflection(reflection: &Reflection, width: usize) -> String {
    render_block(reflection, width, true)
}

/// Same block without the body, for search-result listings.
pub fn render_summary(reflection: &Reflection, width: usize) -> String {
    render_block(reflection, width, false)
}

fn render_block(reflection: &Reflection, width: usize, full_text: bool) -> String {
    let inner = width.saturating_sub(4).max(20);
    let mut out = Vec::new();

    out.push(rule('┌', '┐', inner));
    out.push(pad(&date_heading(reflection.date), inner));
    out.push(rule('├', '┤', inner));
    for line in wrap_text(&reflection.title, inner) {
        out.push(pad(&line, inner));
    }

    if !reflection.quote.is_empty() {
        out.push(rule('├', '┤', inner));
        for line in wrap_text(&reflection.quote, inner) {
            out.push(pad(&line, inner));
        }
    }

    if full_text {
        out.push(rule('├', '┤', inner));
        for line in wrap_paragraphs(&reflection.text, inner) {
            out.push(pad(&line, inner));
        }
    }

    if !reflection.reference.is_empty() {
        out.push(rule('├', '┤', inner));
        for line in wrap_text(&reflection.reference, inner) {
            out.push(pad(&line, inner));
        }
    }

    out.push(rule('└', '┘', inner));
    out.join("\n")
}

/// The multilingual comparison view: one date across every language
/// that has an entry for it, in canonical language order.
pub fn render_multilingual(
    reflections: &BTreeMap<Language, Reflection>,
    date: NaiveDate,
    width: usize,
) -> String {
    let banner = "═".repeat(width);
    let mut out = Vec::new();

    out.push(banner.clone());
    out.push(format!("{:^width$}", "DAILY REFLECTIONS"));
    out.push(format!("{:^width$}", date_heading(date)));
    out.push(banner.clone());

    for (i, (language, reflection)) in reflections.iter().enumerate() {
        if i > 0 {
            out.push("·".repeat(width));
        }
        out.push(String::new());
        out.push(format!("{:^width$}", language.display_name().to_uppercase()));
        out.push("─".repeat(width));
        out.push(reflection.title.clone());
        out.push(String::new());

        if !reflection.quote.is_empty() {
            let inner = width.saturating_sub(4).max(20);
            out.push(rule('┌', '┐', inner));
            for line in wrap_text(&reflection.quote, inner) {
                out.push(pad(&line, inner));
            }
            out.push(rule('└', '┘', inner));
            out.push(String::new());
        }

        for line in wrap_paragraphs(&reflection.text, width.saturating_sub(3)) {
            if line.is_empty() {
                out.push(line);
            } else {
                out.push(format!("   {}", line));
            }
        }

        if !reflection.reference.is_empty() {
            out.push(String::new());
            out.push(reflection.reference.clone());
        }
        out.push(String::new());
    }

    out.push(banner);
    out.join("\n")
}

/// The statistics table.
pub fn render_statistics(stats: &Statistics, width: usize) -> String {
    let inner = width.saturating_sub(4).max(30);
    let mut out = Vec::new();

    out.push(rule('┌', '┐', inner));
    out.push(format!("│ {:^inner$} │", "DATASET STATISTICS"));
    out.push(rule('├', '┤', inner));
    out.push(pad(&format!("Total reflections: {}", stats.total), inner));
    out.push(rule('├', '┤', inner));
    for (language, count) in &stats.by_language {
        let avg = stats
            .average_text_length
            .get(language)
            .map(|a| format!(" (avg {} chars)", a))
            .unwrap_or_default();
        out.push(pad(
            &format!("{}: {}{}", language.display_name(), count, avg),
            inner,
        ));
    }
    out.push(rule('└', '┘', inner));
    out.join("\n")
}
