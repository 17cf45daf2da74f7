use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;
use tracing::debug;

use crate::compile;

/// One block-level token. Text-bearing tokens carry both their inline
/// text and the raw markdown span they were lexed from, so that later
/// stages can re-emit content without losing formatting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BlockToken {
    Heading {
        depth: u8,
        text: String,
        markdown: String,
    },
    Paragraph {
        text: String,
        markdown: String,
    },
    ListStart,
    ListEnd,
    /// The text of one list item.
    Text {
        text: String,
        markdown: String,
    },
    Code {
        text: String,
        lang: Option<String>,
        markdown: String,
    },
}

impl BlockToken {
    /// The raw markdown this token was lexed from, for tokens that have
    /// renderable content. List delimiters have none.
    pub fn markdown(&self) -> Option<&str> {
        match self {
            BlockToken::Heading { markdown, .. } => Some(markdown),
            BlockToken::Paragraph { markdown, .. } => Some(markdown),
            BlockToken::Text { markdown, .. } => Some(markdown),
            BlockToken::Code { markdown, .. } => Some(markdown),
            BlockToken::ListStart | BlockToken::ListEnd => None,
        }
    }
}

/// Lex a document into block tokens. Inline events are folded back into
/// per-block strings; paragraph text is the raw source span so that link
/// syntax and line breaks survive intact. Only the outermost list emits
/// delimiter tokens.
pub fn tokenize(content: &str) -> Vec<BlockToken> {
    let parser = Parser::new_ext(content, Options::empty());

    let mut tokens = Vec::new();
    let mut inline = String::new();
    let mut span: Range<usize> = 0..0;
    let mut list_depth = 0usize;
    let mut item_depth = 0usize;
    let mut code_lang: Option<String> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    inline.clear();
                    span = range;
                }
                Tag::Paragraph => {
                    if item_depth == 0 {
                        span = range;
                    }
                }
                Tag::List(_) => {
                    if list_depth == 0 {
                        tokens.push(BlockToken::ListStart);
                    }
                    list_depth += 1;
                }
                Tag::Item => {
                    inline.clear();
                    span = range;
                    item_depth += 1;
                }
                Tag::CodeBlock(kind) => {
                    inline.clear();
                    span = range;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.to_string()),
                        _ => None,
                    };
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(level) => {
                    tokens.push(BlockToken::Heading {
                        depth: level as u8,
                        text: std::mem::take(&mut inline),
                        markdown: slice(content, &span),
                    });
                }
                TagEnd::Paragraph => {
                    if item_depth == 0 {
                        let markdown = slice(content, &span);
                        let text = markdown
                            .trim_end()
                            .to_string();
                        tokens.push(BlockToken::Paragraph { text, markdown });
                    }
                }
                TagEnd::List(_) => {
                    list_depth -= 1;
                    if list_depth == 0 {
                        tokens.push(BlockToken::ListEnd);
                    }
                }
                TagEnd::Item => {
                    item_depth -= 1;
                    inline.clear();
                    let markdown = slice(content, &span);
                    let text = item_text(&markdown);
                    tokens.push(BlockToken::Text { text, markdown });
                }
                TagEnd::CodeBlock => {
                    let text = inline
                        .trim_end_matches('\n')
                        .to_string();
                    inline.clear();
                    tokens.push(BlockToken::Code {
                        text,
                        lang: code_lang.take(),
                        markdown: slice(content, &span),
                    });
                }
                _ => {}
            },
            Event::Text(text) => inline.push_str(&text),
            Event::Code(code) => {
                // keep inline code in heading text quoted as written
                inline.push('`');
                inline.push_str(&code);
                inline.push('`');
            }
            Event::SoftBreak | Event::HardBreak => inline.push('\n'),
            _ => {}
        }
    }

    debug!("lexed {} block tokens", tokens.len());

    tokens
}

fn slice(content: &str, span: &Range<usize>) -> String {
    content[span.clone()].to_string()
}

/// The text of a list item is its raw source minus the bullet or ordinal
/// marker, so inline markup reaches later stages exactly as written.
fn item_text(markdown: &str) -> String {
    let line = markdown.trim_end();
    let pattern = compile!(r"^[ \t]*(?:[-*+]|[0-9]+[.)])[ \t]+");
    pattern
        .replace(line, "")
        .to_string()
}
