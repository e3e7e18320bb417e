//! Block extraction from raw source text.
//!
//! [`extract`] scans the source once and slices out every top-level `enum`
//! and `model` block. A block runs from its keyword through the first `}`
//! after the opening brace; blocks never overlap and never nest.

use log::trace;
use winnow::{
    Parser as _,
    stream::{LocatingSlice, Location, Stream},
};

use crate::{
    grammar::{self, BlockKind, Input, is_identifier_char},
    span::Span,
};

/// The source text of a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'src> {
    kind: BlockKind,
    text: &'src str,
    span: Span,
}

impl<'src> Fragment<'src> {
    /// Create a fragment for `text` starting at byte `offset` of the source.
    pub fn new(kind: BlockKind, text: &'src str, offset: usize) -> Self {
        Self {
            kind,
            text,
            span: Span::new(offset..offset + text.len()),
        }
    }

    /// Get the kind of block this fragment was extracted as.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Get the block text, from the keyword through the closing brace.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Get the location of the block in the source.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A block whose opening was found but that has no closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unterminated<'src> {
    kind: BlockKind,
    name: &'src str,
    span: Span,
}

impl<'src> Unterminated<'src> {
    /// Get the block kind.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Get the block name.
    pub fn name(&self) -> &'src str {
        self.name
    }

    /// Get the span of the `<keyword> <Name> {` opening.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// All blocks found in a source text, grouped by kind in source order.
#[derive(Debug, Clone, Default)]
pub struct Extracted<'src> {
    enums: Vec<Fragment<'src>>,
    models: Vec<Fragment<'src>>,
    unterminated: Vec<Unterminated<'src>>,
}

impl<'src> Extracted<'src> {
    /// Get the enum fragments in source order.
    pub fn enums(&self) -> &[Fragment<'src>] {
        &self.enums
    }

    /// Get the model fragments in source order.
    pub fn models(&self) -> &[Fragment<'src>] {
        &self.models
    }

    /// Get the block openings that were never closed.
    pub fn unterminated(&self) -> &[Unterminated<'src>] {
        &self.unterminated
    }

    fn push(&mut self, fragment: Fragment<'src>) {
        match fragment.kind() {
            BlockKind::Enum => self.enums.push(fragment),
            BlockKind::Model => self.models.push(fragment),
        }
    }
}

/// Extract every `enum` and `model` block from `source`.
///
/// A keyword only opens a block at a word boundary, so `mymodel X { }` is
/// not a block. Missing kinds yield empty sequences, never an error.
///
/// # Example
///
/// ```
/// # use zodgen_parser::extract::extract;
///
/// let source = "model User { role Role }\nenum Role { ADMIN USER }";
/// let extracted = extract(source);
///
/// assert_eq!(extracted.models()[0].text(), "model User { role Role }");
/// assert_eq!(extracted.enums()[0].text(), "enum Role { ADMIN USER }");
/// ```
pub fn extract(source: &str) -> Extracted<'_> {
    let mut input: Input<'_> = LocatingSlice::new(source);
    let mut extracted = Extracted::default();
    let mut at_word_boundary = true;

    while !input.is_empty() {
        if at_word_boundary {
            let start = input.current_token_start();
            let checkpoint = input.checkpoint();

            if let Ok(opening) = grammar::block_opening.parse_next(&mut input) {
                let opening_end = input.current_token_start();
                let after_opening = input.checkpoint();

                if grammar::block_body.parse_next(&mut input).is_ok() {
                    let end = input.current_token_start();
                    let fragment = Fragment::new(opening.kind, &source[start..end], start);
                    trace!(
                        kind:? = fragment.kind(),
                        name = opening.name,
                        span:% = fragment.span();
                        "Extracted block"
                    );
                    extracted.push(fragment);
                } else {
                    input.reset(&after_opening);
                    extracted.unterminated.push(Unterminated {
                        kind: opening.kind,
                        name: opening.name,
                        span: Span::new(start..opening_end),
                    });
                }
                // Both `}` and `{` end a word.
                at_word_boundary = true;
                continue;
            }

            input.reset(&checkpoint);
        }

        match input.next_token() {
            Some(c) => at_word_boundary = !is_identifier_char(c),
            None => break,
        }
    }

    extracted
}
