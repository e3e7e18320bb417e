//! Shared winnow grammar for `enum` and `model` blocks.
//!
//! A block has the shape `<keyword> <Name> { <body> }`. The body runs to the
//! first closing brace; blocks never nest.

use winnow::{
    ModalResult, Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, terminated},
    stream::{LocatingSlice, Location},
    token::{literal, take_until, take_while},
};

use crate::span::Span;

pub(crate) type Input<'src> = LocatingSlice<&'src str>;

/// The two block keywords of the input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// An `enum` block of whitespace-separated values.
    Enum,
    /// A `model` block of field lines.
    Model,
}

impl BlockKind {
    /// Returns the keyword that opens a block of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::Enum => "enum",
            BlockKind::Model => "model",
        }
    }
}

/// The `<keyword> <Name> {` part of a block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockOpening<'src> {
    pub kind: BlockKind,
    pub name: &'src str,
}

/// A complete block split into its parts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawBlock<'src> {
    pub kind: BlockKind,
    pub name: &'src str,
    pub body: &'src str,
    /// Span of `body` relative to the start of the parsed input.
    pub body_span: Span,
}

/// Returns `true` for characters that may continue an identifier.
pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse an identifier: a letter or underscore followed by alphanumerics or underscores.
pub(crate) fn identifier<'src>(input: &mut Input<'src>) -> ModalResult<&'src str> {
    take_while(1.., is_identifier_char)
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        })
        .parse_next(input)
}

fn block_keyword(input: &mut Input<'_>) -> ModalResult<BlockKind> {
    alt((
        literal("enum").value(BlockKind::Enum),
        literal("model").value(BlockKind::Model),
    ))
    .parse_next(input)
}

/// Parse `<keyword> <Name> {`.
///
/// The keyword must be followed by whitespace, so `models` or `enumerate`
/// never open a block.
pub(crate) fn block_opening<'src>(input: &mut Input<'src>) -> ModalResult<BlockOpening<'src>> {
    let kind = terminated(block_keyword, multispace1).parse_next(input)?;
    let name = identifier.parse_next(input)?;
    (multispace0, '{').void().parse_next(input)?;
    Ok(BlockOpening { kind, name })
}

/// Parse the body after an opening brace through the first closing brace.
///
/// Returns the body text (without braces) and its span.
pub(crate) fn block_body<'src>(input: &mut Input<'src>) -> ModalResult<(&'src str, Span)> {
    let start = input.current_token_start();
    let body = take_until(0.., '}').parse_next(input)?;
    let end = input.current_token_start();
    '}'.parse_next(input)?;
    Ok((body, Span::new(start..end)))
}

/// Parse a complete block.
pub(crate) fn block<'src>(input: &mut Input<'src>) -> ModalResult<RawBlock<'src>> {
    let BlockOpening { kind, name } = block_opening.parse_next(input)?;
    let (body, body_span) = block_body.parse_next(input)?;
    Ok(RawBlock {
        kind,
        name,
        body,
        body_span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_block(source: &str) -> Option<RawBlock<'_>> {
        let mut input = LocatingSlice::new(source);
        block.parse_next(&mut input).ok()
    }

    #[test]
    fn test_block_parts() {
        let raw = parse_block("model User {\n  id Int\n}").expect("block should parse");

        assert_eq!(raw.kind, BlockKind::Model);
        assert_eq!(raw.name, "User");
        assert_eq!(raw.body, "\n  id Int\n");
        assert_eq!(raw.body_span, Span::new(12..22));
    }

    #[test]
    fn test_block_without_space_before_brace() {
        let raw = parse_block("enum Role{ ADMIN }").expect("block should parse");

        assert_eq!(raw.kind, BlockKind::Enum);
        assert_eq!(raw.name, "Role");
        assert_eq!(raw.body, " ADMIN ");
    }

    #[test]
    fn test_block_body_stops_at_first_brace() {
        let raw = parse_block("model A { x Int } }").expect("block should parse");

        assert_eq!(raw.body, " x Int ");
    }

    #[test]
    fn test_keyword_needs_trailing_whitespace() {
        assert!(parse_block("models User { id Int }").is_none());
        assert!(parse_block("enumRole { A }").is_none());
    }

    #[test]
    fn test_unterminated_block_fails() {
        assert!(parse_block("model User { id Int").is_none());
    }

    #[test]
    fn test_identifier_must_not_start_with_digit() {
        assert!(parse_block("model 1User { id Int }").is_none());
        assert!(parse_block("model _User { id Int }").is_some());
    }
}
