use crate::template::{Segment, TemplateError, is_attribute_name};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Split a template source into literal and placeholder segments.
/// Empty literals are never emitted.
pub(super) fn parse_segments(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < source.len() {
        let rest = &source[cursor..];

        let Some(open) = rest.find(OPEN) else {
            push_literal(&mut segments, rest, cursor)?;
            break;
        };

        push_literal(&mut segments, &rest[..open], cursor)?;

        let open_at = cursor + open;
        let body_start = open_at + OPEN.len();
        let Some(close) = source[body_start..].find(CLOSE) else {
            return Err(TemplateError::Unterminated { offset: open_at });
        };

        let raw = &source[body_start..body_start + close];
        let name = raw.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder { offset: open_at });
        }
        if !is_attribute_name(name) {
            return Err(TemplateError::InvalidPlaceholder {
                name: name.to_string(),
                offset: open_at,
            });
        }

        segments.push(Segment::Placeholder(name.to_string()));
        cursor = body_start + close + CLOSE.len();
    }

    Ok(segments)
}

fn push_literal(
    segments: &mut Vec<Segment>,
    text: &str,
    offset: usize,
) -> Result<(), TemplateError> {
    if let Some(pos) = text.find(CLOSE) {
        return Err(TemplateError::UnexpectedClose {
            offset: offset + pos,
        });
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }

    Ok(())
}
