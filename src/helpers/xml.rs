//! Markup reading utilities for spreadsheet HTML exports.
//! Wraps the XML tokenizer with a configuration lenient enough for HTML tables,
//! plus helper traits for attribute lookup and text collection.

use crate::error::RosterError;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;

/// Markup reader wrapper configured for HTML produced by spreadsheet exports
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    /// Creates a new reader that tolerates void elements, unmatched end tags and bare ampersands
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;
        config.expand_empty_elements = true;
        config.trim_text(false);

        let buffer = Vec::with_capacity(1024);
        XmlReader { reader, buffer }
    }

    /// Reads the next event from the reader
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, RosterError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(RosterError::XmlError(error)),
        }
    }

    /// Byte offset of the reader inside its input, for diagnostics
    pub(crate) fn position(&self) -> u64 {
        self.reader.buffer_position()
    }
}

/// Helper trait for HTML elements providing attribute access methods
pub(crate) trait XmlNodeHelper {
    /// Gets an attribute value by case-insensitive name.
    /// Unquoted and valueless attributes are accepted, as browsers do.
    fn get_attribute_value(&self, name: &str) -> Result<Option<String>, RosterError>;

    /// Lowercased local element name (`td`, `TR` and `tr` compare equal)
    fn tag_name(&self) -> String;
}

impl XmlNodeHelper for BytesStart<'_> {
    fn get_attribute_value(&self, name: &str) -> Result<Option<String>, RosterError> {
        for attribute in self.html_attributes() {
            let attribute = attribute?;
            if attribute.key.as_ref().eq_ignore_ascii_case(name.as_bytes()) {
                let value = match attribute.unescape_value_with(|entity| resolve_html5_entity(entity)) {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attribute.value).into_owned(),
                };
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn tag_name(&self) -> String {
        String::from_utf8_lossy(self.local_name().as_ref()).to_ascii_lowercase()
    }
}

/// Helper trait for building text content from markup events
pub(crate) trait XmlTextContextHelper {
    /// Appends text content from a text event
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), RosterError>;

    /// Appends text content from an entity or character reference
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), RosterError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), RosterError> {
        self.push_str(&text.xml_content()?);
        Ok(())
    }

    /// Resolves numeric references and HTML5 named entities.
    /// Unknown references are kept verbatim, as a browser renders them.
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), RosterError> {
        let raw: Cow<str> = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => number.parse::<u32>().ok(),
            };
            match code.and_then(std::char::from_u32) {
                Some(character) => self.push(character),
                None => self.push_str(&format!("&{};", raw)),
            }
        } else if let Some(entity) = resolve_html5_entity(&raw) {
            self.push_str(entity);
        } else {
            self.push_str(&format!("&{};", raw));
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}
