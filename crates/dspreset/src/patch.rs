//! Event-level rewrite of control geometry attributes.
//!
//! The whole document streams through quick-xml untouched; only the
//! `control` elements addressed by a change plan get their `x`/`y`/
//! `width`/`height` attributes replaced. Existing attribute order is
//! preserved and missing geometry attributes are appended.

use crate::types::ChangeRecord;
use crate::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;
use std::io::Cursor;

pub(crate) fn rewrite_controls(xml: &str, changes: &[ChangeRecord]) -> Result<String> {
    let planned: HashMap<usize, &ChangeRecord> =
        changes.iter().map(|c| (c.position, c)).collect();

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();
    // Position among control elements, counted the same way the load-time
    // scan counts them (document order, start and empty tags alike).
    let mut position = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,

            Event::Start(e) if e.local_name().as_ref() == b"control" => {
                match planned.get(&position) {
                    Some(change) => {
                        writer.write_event(Event::Start(rewrite_geometry(&e, change)?))?
                    }
                    None => writer.write_event(Event::Start(e))?,
                }
                position += 1;
            }

            Event::Empty(e) if e.local_name().as_ref() == b"control" => {
                match planned.get(&position) {
                    Some(change) => {
                        writer.write_event(Event::Empty(rewrite_geometry(&e, change)?))?
                    }
                    None => writer.write_event(Event::Empty(e))?,
                }
                position += 1;
            }

            e => writer.write_event(e)?,
        }
        buf.clear();
    }

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Rebuild a control tag with its geometry overwritten. Non-geometry
/// attributes pass through in place; geometry attributes the element never
/// had are appended at the end.
fn rewrite_geometry(e: &BytesStart, change: &ChangeRecord) -> Result<BytesStart<'static>> {
    let name = String::from_utf8(e.name().as_ref().to_vec())?;
    let mut elem = BytesStart::new(name);

    let new = &change.new;
    let geometry = [
        ("x", new.x),
        ("y", new.y),
        ("width", new.width),
        ("height", new.height),
    ];
    let mut written = [false; 4];

    for attr in e.attributes() {
        let attr = attr?;
        match geometry
            .iter()
            .position(|(key, _)| key.as_bytes() == attr.key.as_ref())
        {
            Some(i) => {
                elem.push_attribute((geometry[i].0, geometry[i].1.to_string().as_str()));
                written[i] = true;
            }
            None => elem.push_attribute(attr),
        }
    }

    for (i, (key, value)) in geometry.iter().enumerate() {
        if !written[i] {
            elem.push_attribute((*key, value.to_string().as_str()));
        }
    }

    Ok(elem)
}
