// src/obs/listing.rs

//! Parsers for build-service listing documents
//!
//! Two documents are understood:
//!
//! ```xml
//! <directory>
//!   <entry name="openSUSE_Leap_15.3"/>
//! </directory>
//!
//! <binarylist>
//!   <binary filename="foo-1.0-1.x86_64.rpm" size="100" mtime="1620000000"/>
//! </binarylist>
//! ```
//!
//! Only direct children of the root element are considered.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::metadata::BinaryRecord;

const DIRECTORY_ROOT: &[u8] = b"directory";
const DIRECTORY_ENTRY: &[u8] = b"entry";
const BINARYLIST_ROOT: &[u8] = b"binarylist";
const BINARYLIST_ENTRY: &[u8] = b"binary";

/// Parse a `directory` document into entry names, in document order
pub fn parse_directory(xml: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for_each_child(xml, DIRECTORY_ROOT, DIRECTORY_ENTRY, |element| {
        names.push(path_segment(required_attr(element, "name")?)?);
        Ok(())
    })?;
    Ok(names)
}

/// Parse a `binarylist` document into binary records, in document order
///
/// A `size` that is not a non-negative integer is rejected here so the rest
/// of the crate only ever sees numeric sizes.
pub fn parse_binary_list(xml: &str) -> Result<Vec<BinaryRecord>> {
    let mut binaries = Vec::new();
    for_each_child(xml, BINARYLIST_ROOT, BINARYLIST_ENTRY, |element| {
        let filename = path_segment(required_attr(element, "filename")?)?;
        let raw_size = required_attr(element, "size")?;
        let size = raw_size.trim().parse::<u64>().map_err(|e| {
            Error::ParseError(format!("invalid size '{raw_size}' for {filename}: {e}"))
        })?;
        let mtime = optional_attr(element, "mtime")?.unwrap_or_default();
        binaries.push(BinaryRecord {
            filename,
            size,
            mtime,
        });
        Ok(())
    })?;
    Ok(binaries)
}

/// Walk `xml`, requiring `root` as the document element, and call `visit`
/// for every direct child named `child`
fn for_each_child<F>(xml: &str, root: &[u8], child: &[u8], mut visit: F) -> Result<()>
where
    F: FnMut(&BytesStart<'_>) -> Result<()>,
{
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::ParseError(format!(
                "malformed XML at position {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                if depth == 0 {
                    if seen_root {
                        return Err(Error::ParseError(
                            "more than one document element".to_string(),
                        ));
                    }
                    check_root(e, root)?;
                    seen_root = true;
                } else if depth == 1 && e.name().as_ref() == child {
                    visit(e)?;
                }
                if !is_empty {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Eof if depth > 0 => {
                return Err(Error::ParseError(format!(
                    "unexpected end of document with {depth} element(s) still open"
                )));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::ParseError(format!(
            "expected <{}> document, found no element",
            String::from_utf8_lossy(root)
        )));
    }
    Ok(())
}

/// Names become local path components, so each must be one plain segment
fn path_segment(name: String) -> Result<String> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::ParseError(format!(
            "'{name}' is not usable as a path segment"
        )));
    }
    Ok(name)
}

fn check_root(element: &BytesStart<'_>, expected: &[u8]) -> Result<()> {
    let name = element.name();
    if name.as_ref() != expected {
        return Err(Error::ParseError(format!(
            "expected <{}> document, found <{}>",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(name.as_ref())
        )));
    }
    Ok(())
}

fn optional_attr(element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::ParseError(format!("bad attribute: {e}")))?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::ParseError(format!("bad value for '{key}': {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(element: &BytesStart<'_>, key: &str) -> Result<String> {
    optional_attr(element, key)?.ok_or_else(|| {
        Error::ParseError(format!(
            "<{}> without '{key}' attribute",
            String::from_utf8_lossy(element.name().as_ref())
        ))
    })
}
