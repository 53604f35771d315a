//! Document reading
//!
//! A thin adapter that tokenizes a document with `quick-xml` and feeds its
//! tags to a [`Dispatcher`]. Text, comments, processing instructions and the
//! document type declaration are skipped; only elements and their attributes
//! reach the dispatcher.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::dispatch::{AttributeMap, Dispatcher, ParseState};
use crate::error::{ParseError, Result};
use crate::locations::Position;

/// Parse a document held in memory
///
/// Every tag is dispatched as it is read; the first error stops the parse.
/// On success the dispatcher has seen the end of the document and is ready
/// for the next one. Any error, including a malformed document, leaves the
/// dispatcher failed until it is reset.
pub fn parse_str(
    dispatcher: &mut Dispatcher<'_, '_>,
    source: &str,
) -> std::result::Result<(), ParseError> {
    if dispatcher.state() == ParseState::Failed {
        return Err(ParseError::Aborted);
    }
    dispatch_events(dispatcher, source).map_err(|err| dispatcher.fail(err))
}

fn dispatch_events(
    dispatcher: &mut Dispatcher<'_, '_>,
    source: &str,
) -> std::result::Result<(), ParseError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);
    // End tags are matched by the dispatcher, which knows the open elements
    reader.check_end_names(false);

    let mut elements = 0usize;

    loop {
        let offset = reader.buffer_position();
        let event = reader.read_event().map_err(|e| ParseError::Syntax {
            message: e.to_string(),
            position: Some(Position::from_offset(source, reader.buffer_position())),
        })?;
        let position = Some(tag_position(source, offset));

        match event {
            Event::Start(tag) => {
                elements += 1;
                let (name, attributes) = read_tag(&tag, position)?;
                dispatcher.start_element(&name, &attributes, position)?;
            }
            Event::Empty(tag) => {
                elements += 1;
                let (name, attributes) = read_tag(&tag, position)?;
                dispatcher.start_element(&name, &attributes, position)?;
                dispatcher.end_element(&name, position)?;
            }
            Event::End(tag) => {
                let name = utf8(tag.name().as_ref(), position)?;
                dispatcher.end_element(&name, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if elements == 0 {
        return Err(ParseError::Syntax {
            message: "document has no element".to_string(),
            position: None,
        });
    }

    dispatcher.finish()
}

/// Parse a document file
pub fn parse_file(dispatcher: &mut Dispatcher<'_, '_>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "parsing document");
    let source = std::fs::read_to_string(path)?;
    parse_str(dispatcher, &source)?;
    Ok(())
}

/// Position of the tag read from `offset` on; the reader skips leading
/// whitespace before it
fn tag_position(source: &str, offset: usize) -> Position {
    let rest = source.get(offset..).unwrap_or_default();
    let skipped = rest.len() - rest.trim_start().len();
    Position::from_offset(source, offset + skipped)
}

fn read_tag(
    tag: &BytesStart<'_>,
    position: Option<Position>,
) -> std::result::Result<(String, AttributeMap), ParseError> {
    let name = utf8(tag.name().as_ref(), position)?;
    let mut attributes = AttributeMap::new();

    for attr in tag.attributes() {
        let attr = attr.map_err(|e| syntax(e.to_string(), position))?;
        let key = utf8(attr.key.as_ref(), position)?;
        let value = attr
            .unescape_value()
            .map_err(|e| syntax(e.to_string(), position))?
            .into_owned();
        attributes.insert(key, value);
    }

    tracing::trace!(element = %name, attributes = attributes.len(), "tag read");
    Ok((name, attributes))
}

fn utf8(bytes: &[u8], position: Option<Position>) -> std::result::Result<String, ParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| syntax(e.to_string(), position))
}

fn syntax(message: String, position: Option<Position>) -> ParseError {
    ParseError::Syntax { message, position }
}
