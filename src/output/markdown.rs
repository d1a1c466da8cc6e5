//! Markdown rendering
//!
//! Model replies are markdown. The HTML form is what a browser front-end
//! would show; the plain-text form is what the terminal displays and what
//! gets copied or saved.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

pub trait MarkdownRenderer: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;

    /// Text content with markup removed, roughly what a browser's
    /// `innerText` gives for the rendered HTML.
    fn to_plain_text(&self, markdown: &str) -> String;
}

/// CommonMark renderer backed by pulldown-cmark.
#[derive(Debug, Clone, Default)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    fn to_plain_text(&self, markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len());
        // One entry per open list: next ordinal for ordered lists.
        let mut lists: Vec<Option<u64>> = Vec::new();

        for event in Parser::new_ext(markdown, Self::options()) {
            match event {
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::SoftBreak => out.push(' '),
                Event::HardBreak => out.push('\n'),
                Event::Rule => out.push_str("---\n\n"),
                Event::Start(Tag::List(start)) => {
                    if !lists.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    lists.push(start);
                }
                Event::Start(Tag::Item) => {
                    let depth = lists.len().saturating_sub(1);
                    out.push_str(&"  ".repeat(depth));
                    match lists.last_mut() {
                        Some(Some(n)) => {
                            out.push_str(&format!("{}. ", n));
                            *n += 1;
                        }
                        _ => out.push_str("- "),
                    }
                }
                Event::End(TagEnd::Item) => {
                    if !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
                Event::End(TagEnd::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        out.push('\n');
                    }
                }
                Event::End(TagEnd::Paragraph) => {
                    if lists.is_empty() {
                        out.push_str("\n\n");
                    } else {
                        out.push('\n');
                    }
                }
                Event::End(TagEnd::Heading(_)) => out.push_str("\n\n"),
                Event::End(TagEnd::TableCell) => out.push('\t'),
                Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                    out.push('\n')
                }
                Event::End(TagEnd::Table) | Event::End(TagEnd::CodeBlock) => out.push('\n'),
                _ => {}
            }
        }

        out.trim_end().to_string()
    }
}
