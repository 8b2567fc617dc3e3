//! Chart fragment extraction.
//!
//! Upstream plotting steps leave one html file per feature category holding
//! top-level `<div class="chunk" id="...">` fragments, one per chart. Each
//! fragment is captured as a verbatim byte span of the source so it can be
//! dropped into the report unchanged. Fragments are assumed structurally
//! well formed; they are machine generated.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Chart id to serialized fragment, in document order.
pub type ChunkSet = IndexMap<String, String>;

/// Scan `html` for chart fragments. Divs without `class="chunk"` are skipped
/// whole, so chunks nested inside a container div are not picked up; a chunk
/// div without an id is skipped.
pub fn parse_chunks(html: &str) -> Result<ChunkSet> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;
    let mut chunks = ChunkSet::new();
    loop {
        let tag_start = reader.buffer_position() as usize;
        match reader
            .read_event()
            .context("malformed chart fragment markup")?
        {
            Event::Start(e) if e.local_name().as_ref() == b"div" => {
                let class = attr_value(&e, "class")?;
                let id = attr_value(&e, "id")?;
                let end = e.to_end().into_owned();
                reader
                    .read_to_end(end.name())
                    .context("unclosed <div> in chart fragment markup")?;
                if class.as_deref() == Some("chunk")
                    && let Some(id) = id
                {
                    let tag_end = reader.buffer_position() as usize;
                    chunks.insert(id, html[tag_start..tag_end].to_string());
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == b"div" => {
                if attr_value(&e, "class")?.as_deref() == Some("chunk")
                    && let Some(id) = attr_value(&e, "id")?
                {
                    let tag_end = reader.buffer_position() as usize;
                    chunks.insert(id, html[tag_start..tag_end].to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(chunks)
}

fn attr_value(e: &BytesStart, name: &str) -> Result<Option<String>> {
    match e
        .try_get_attribute(name)
        .with_context(|| format!("bad {} attribute", name))?
    {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .with_context(|| format!("bad {} attribute value", name))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
