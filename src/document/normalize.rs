//! Parse, validate and repair raw SVG text into its canonical serialized form.

use std::sync::LazyLock;

use anyhow::Context as _;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;

use crate::document::duration::estimate_duration_ms;
use crate::foundation::error::{SvgshotError, SvgshotResult};

/// The SVG namespace URI injected when the root lacks a default namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

static ANIMATION_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:animate|animateTransform|animateMotion|set[\s/>])|animation|@keyframes")
        .expect("valid regex")
});

/// A validated, repaired SVG document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedSvg {
    serialized: String,
    is_animated: bool,
}

impl NormalizedSvg {
    /// Canonical serialized text; the input to every downstream render path.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Whether the text carries SMIL or CSS animation markers.
    pub fn is_animated(&self) -> bool {
        self.is_animated
    }

    /// Capture span for this document, see [`estimate_duration_ms`].
    pub fn duration_ms(&self) -> u64 {
        estimate_duration_ms(&self.serialized)
    }
}

/// Repairs applied to the root element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RootRepairs {
    add_xmlns: bool,
    add_size: bool,
}

/// Validate and normalize raw SVG text.
///
/// Fails with [`SvgshotError::Input`] on empty input and [`SvgshotError::Parse`] when the text
/// is not well-formed XML or its root element is not `svg`. On success the root carries an
/// `xmlns`, and a root with a `viewBox` but no `width`/`height` gains `width="100%"
/// height="100%"`. Only the root element and its content are serialized.
#[tracing::instrument(skip(raw), fields(len = raw.len()))]
pub fn normalize(raw: &str) -> SvgshotResult<NormalizedSvg> {
    if raw.trim().is_empty() {
        return Err(SvgshotError::input("empty input"));
    }

    let doc = validate(raw)?;
    let serialized = serialize_repaired(raw, doc.root_element())?;
    let is_animated = ANIMATION_HINT.is_match(&serialized);

    Ok(NormalizedSvg {
        serialized,
        is_animated,
    })
}

fn validate(raw: &str) -> SvgshotResult<roxmltree::Document<'_>> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(raw, opts)
        .map_err(|e| SvgshotError::parse(first_line(&e.to_string())))?;

    if doc.root_element().tag_name().name() != "svg" {
        return Err(SvgshotError::parse("root element is not svg"));
    }
    Ok(doc)
}

fn first_line(msg: &str) -> String {
    msg.lines().next().unwrap_or_default().to_owned()
}

fn serialize_repaired(raw: &str, parsed_root: roxmltree::Node<'_, '_>) -> SvgshotResult<String> {
    let mut reader = Reader::from_str(raw);
    let mut writer = Writer::new(Vec::with_capacity(raw.len() + 64));
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SvgshotError::parse(first_line(&e.to_string())))?;

        match event {
            Event::Eof => break,
            Event::Start(start) if depth == 0 => {
                let root = repair_root(&start, parsed_root)?;
                writer
                    .write_event(Event::Start(root))
                    .context("serialize svg root")?;
                depth = 1;
            }
            Event::Empty(start) if depth == 0 => {
                let root = repair_root(&start, parsed_root)?;
                writer
                    .write_event(Event::Empty(root))
                    .context("serialize svg root")?;
                break;
            }
            // An internal subset may declare entities that the body references.
            Event::DocType(dt) if depth == 0 => {
                if dt.contains(&b'[') {
                    writer
                        .write_event(Event::DocType(dt))
                        .context("serialize doctype")?;
                }
            }
            _ if depth == 0 => {}
            Event::End(end) => {
                writer
                    .write_event(Event::End(end))
                    .context("serialize svg")?;
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Start(start) => {
                writer
                    .write_event(Event::Start(start))
                    .context("serialize svg")?;
                depth += 1;
            }
            other => {
                writer.write_event(other).context("serialize svg")?;
            }
        }
    }

    String::from_utf8(writer.into_inner())
        .context("serialized svg is not utf-8")
        .map_err(SvgshotError::from)
}

fn repair_root(
    start: &BytesStart<'_>,
    parsed_root: roxmltree::Node<'_, '_>,
) -> SvgshotResult<BytesStart<'static>> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SvgshotError::parse(first_line(&e.to_string())))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = parsed_attr_value(parsed_root, &key).ok_or_else(|| {
            SvgshotError::parse(format!("unresolved root attribute '{key}'"))
        })?;
        attrs.push((key, value));
    }

    let present = |name: &str| attrs.iter().any(|(k, v)| k == name && !v.is_empty());
    let repairs = RootRepairs {
        add_xmlns: !present("xmlns"),
        add_size: present("viewBox") && !present("width") && !present("height"),
    };
    tracing::debug!(?repairs, "root repairs");

    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut root = BytesStart::new(name);
    if repairs.add_xmlns {
        root.push_attribute(("xmlns", SVG_NS));
    }
    for (k, v) in &attrs {
        let replaced = match k.as_str() {
            "xmlns" => repairs.add_xmlns,
            "width" | "height" => repairs.add_size,
            _ => false,
        };
        if !replaced {
            root.push_attribute((k.as_str(), v.as_str()));
        }
    }
    if repairs.add_size {
        root.push_attribute(("width", "100%"));
        root.push_attribute(("height", "100%"));
    }
    Ok(root)
}

// Root attribute values come from the validated tree, where entity and character references
// are already expanded. The raw bytes would be escaped a second time on write.
fn parsed_attr_value(root: roxmltree::Node<'_, '_>, key: &str) -> Option<String> {
    let value = match key.split_once(':') {
        None if key == "xmlns" => root
            .namespaces()
            .find(|ns| ns.name().is_none())
            .map_or("", |ns| ns.uri()),
        None => root.attribute(key)?,
        Some(("xmlns", prefix)) => root
            .namespaces()
            .find(|ns| ns.name() == Some(prefix))?
            .uri(),
        Some((prefix, local)) => {
            let uri = root.lookup_namespace_uri(Some(prefix))?;
            root.attribute((uri, local))?
        }
    };
    Some(value.to_owned())
}

impl AsRef<str> for NormalizedSvg {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/normalize.rs"]
mod tests;
