//! Turns the service's loosely marked-up recommendation text into typed
//! content blocks for rendering.
//!
//! The text uses two conventions: `**...**` for emphasis and a leading `-`
//! for bullet lines. Parsing runs in three ordered passes (emphasis within a
//! line, line classification, block grouping); the order matters because the
//! grouping pass consumes what the earlier passes produce.

/// A run of text with a single emphasis setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub emphasized: bool,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One renderable unit of recommendation content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph(Vec<TextSpan>),
    List(Vec<Vec<TextSpan>>),
}

/// Formats raw recommendation text into an ordered block sequence.
///
/// Consecutive bullet lines merge into one list, even across blank lines;
/// non-bullet lines group into paragraphs split on blank lines. Empty or
/// whitespace-only input yields no blocks.
pub fn format_recommendation(text: &str) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = Vec::new();
    let mut paragraph: Vec<TextSpan> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        if let Some(item) = trimmed.strip_prefix('-') {
            flush_paragraph(&mut blocks, &mut paragraph);
            let spans = parse_spans(item.trim());
            match blocks.last_mut() {
                Some(ContentBlock::List(items)) => items.push(spans),
                _ => blocks.push(ContentBlock::List(vec![spans])),
            }
            continue;
        }

        // Plain text: append to the open paragraph, lines joined by a space.
        if !paragraph.is_empty() {
            push_span(&mut paragraph, " ", false);
        }
        for span in parse_spans(trimmed) {
            push_span(&mut paragraph, &span.text, span.emphasized);
        }
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<ContentBlock>, paragraph: &mut Vec<TextSpan>) {
    if !paragraph.is_empty() {
        blocks.push(ContentBlock::Paragraph(std::mem::take(paragraph)));
    }
}

/// Splits one line on `**...**` pairs, non-greedy: the first closing marker
/// ends the span. A marker with no closing partner stays literal text.
fn parse_spans(line: &str) -> Vec<TextSpan> {
    let mut spans: Vec<TextSpan> = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            break;
        };
        push_span(&mut spans, &rest[..open], false);
        push_span(&mut spans, &after[..close], true);
        rest = &after[close + 2..];
    }

    push_span(&mut spans, rest, false);
    spans
}

/// Appends text to the span list, coalescing with the previous span when the
/// emphasis matches so a run of plain text is always a single span.
fn push_span(spans: &mut Vec<TextSpan>, text: &str, emphasized: bool) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.emphasized == emphasized {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(TextSpan {
        text: text.to_string(),
        emphasized,
    });
}
