//! Plain-text excerpts from markdown bodies

use pulldown_cmark::{Event, Options, Parser, TagEnd};

const MORE_MARKER: &str = "<!-- more -->";

/// Build a post excerpt from its markdown body
///
/// Text before `<!-- more -->` is used when the marker is present;
/// otherwise the plain text is cut to `max_chars` characters and suffixed
/// with `…`. A `max_chars` of 0 turns the generated excerpt off.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    if let Some(pos) = body.find(MORE_MARKER) {
        return plain_text(&body[..pos]);
    }

    if max_chars == 0 {
        return String::new();
    }

    let text = plain_text(body);
    truncate(&text, max_chars)
}

/// Strip markdown syntax, keeping readable text with collapsed whitespace
pub fn plain_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut text = String::new();
    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut text to at most `max_chars` characters on a char boundary
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
