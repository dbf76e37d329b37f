//! Streaming schema tokenizer
//!
//! Wraps a `quick-xml` reader and hands out owned tokens, one at a time, in
//! document order. Self-closing tags are expanded into a start/end pair so
//! every construct has a matching close. Comments, processing instructions
//! and the XML declaration are dropped; CDATA sections arrive as text.

use crate::error::{Error, Result};
use crate::names;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Opening tag with its attributes decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Qualified tag name as written, e.g. `xs:element`
    pub name: String,
    /// Attributes other than namespace declarations, in document order
    pub attributes: Vec<(String, String)>,
    /// `xmlns:prefix="uri"` declarations as (prefix, uri)
    pub namespaces: Vec<(String, String)>,
}

impl StartTag {
    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> &str {
        names::local_name(&self.name)
    }

    /// Namespace prefix of the tag, or the empty string
    pub fn prefix(&self) -> &str {
        names::prefix(&self.name)
    }

    /// Attribute value by local attribute name
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| names::local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }
}

/// Closing tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndTag {
    /// Qualified tag name as written
    pub name: String,
}

impl EndTag {
    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> &str {
        names::local_name(&self.name)
    }
}

/// One unit of the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start tag, also produced for an empty element
    Start(StartTag),
    /// End tag, also produced for an empty element
    End(EndTag),
    /// Character data, unescaped; whitespace-only runs are never produced
    Text(String),
}

/// Pull tokenizer over an in-memory schema document
pub struct SchemaReader<'a> {
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
}

impl<'a> SchemaReader<'a> {
    /// Create a reader over raw document bytes. The encoding is taken from
    /// the BOM or the XML declaration.
    pub fn new(source: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        reader.expand_empty_elements(true);
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Byte offset into the document
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Next token, or `None` at end of document
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| {
                    Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        self.reader.buffer_position(),
                        e
                    ))
                })?;

            let token = match event {
                Event::Start(e) => Token::Start(decode_start(&e, &self.reader)?),
                Event::End(e) => Token::End(EndTag {
                    name: decode(&self.reader, e.name().as_ref())?,
                }),
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("failed to unescape text: {}", e)))?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    Token::Text(text.into_owned())
                }
                Event::CData(e) => {
                    let text = decode(&self.reader, &e.into_inner())?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    Token::Text(text)
                }
                Event::Eof => return Ok(None),
                _ => continue,
            };
            return Ok(Some(token));
        }
    }
}

impl Iterator for SchemaReader<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn decode(reader: &Reader<&[u8]>, bytes: &[u8]) -> Result<String> {
    reader
        .decoder()
        .decode(bytes)
        .map(|s| s.into_owned())
        .map_err(|e| Error::Xml(format!("invalid character data: {}", e)))
}

fn decode_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<StartTag> {
    let name = decode(reader, start.name().as_ref())?;

    let mut attributes = Vec::new();
    let mut namespaces = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;
        let key = decode(reader, attr.key.as_ref())?;
        let value = attr
            .decode_and_unescape_value(reader)
            .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
            .into_owned();

        // The default namespace (`xmlns="..."`) plays no part in type lookup
        if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push((prefix.to_string(), value));
        } else if key != "xmlns" {
            attributes.push((key, value));
        }
    }

    Ok(StartTag {
        name,
        attributes,
        namespaces,
    })
}
