//! WADL transcoding.
//!
//! The scheduler describes its REST surface as a WADL document (XML). The
//! console renders it as a nested JSON document, so the XML is transcoded
//! once on fetch: element names become object keys, attributes become
//! `@name` keys, repeated children collapse into arrays, and text content
//! lands under `#text`.

use super::error::ClientError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

#[derive(Default)]
struct Element {
    map: Map<String, Value>,
    text: String,
}

impl Element {
    fn finish(self) -> Value {
        let text = self.text.trim().to_string();
        if self.map.is_empty() && !text.is_empty() {
            return Value::String(text);
        }
        let mut map = self.map;
        if !text.is_empty() {
            map.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(map)
    }
}

fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

fn read_attributes(
    start: &quick_xml::events::BytesStart<'_>,
    into: &mut Map<String, Value>,
) -> Result<(), ClientError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ClientError::Transcode(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ClientError::Transcode(e.to_string()))?;
        into.insert(format!("@{}", key), Value::String(value.into_owned()));
    }
    Ok(())
}

/// Transcode a WADL (or any XML) payload into a nested JSON document.
///
/// Namespace prefixes are stripped from element and attribute names. A
/// payload with no root element is a transcode failure, not an empty
/// document.
pub fn transcode(xml: &str) -> Result<Value, ClientError> {
    let mut reader = Reader::from_str(xml);

    let mut root = Map::new();
    let mut stack: Vec<(String, Element)> = Vec::new();
    let mut saw_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                saw_element = true;
                let name = String::from_utf8_lossy(start.name().local_name().as_ref()).to_string();
                let mut element = Element::default();
                read_attributes(&start, &mut element.map)?;
                stack.push((name, element));
            }
            Ok(Event::Empty(start)) => {
                saw_element = true;
                let name = String::from_utf8_lossy(start.name().local_name().as_ref()).to_string();
                let mut element = Element::default();
                read_attributes(&start, &mut element.map)?;
                let value = element.finish();
                match stack.last_mut() {
                    Some((_, parent)) => insert_child(&mut parent.map, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Ok(Event::End(_)) => {
                let (name, element) = stack
                    .pop()
                    .ok_or_else(|| ClientError::Transcode("unbalanced end tag".to_string()))?;
                let value = element.finish();
                match stack.last_mut() {
                    Some((_, parent)) => insert_child(&mut parent.map, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Ok(Event::Text(text)) => {
                if let Some((_, element)) = stack.last_mut() {
                    let chunk = text
                        .unescape()
                        .map_err(|e| ClientError::Transcode(e.to_string()))?;
                    element.text.push_str(&chunk);
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some((_, element)) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(ClientError::Transcode(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(ClientError::Transcode("unterminated element".to_string()));
    }
    if !saw_element {
        return Err(ClientError::Transcode("no root element".to_string()));
    }

    Ok(Value::Object(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_WADL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<application xmlns="http://wadl.dev.java.net/2009/02">
    <resources base="http://127.0.0.1:8192/api/">
        <resource path="cluster">
            <resource path="flexup">
                <method name="PUT" id="flexUp"/>
            </resource>
            <resource path="flexdown">
                <method name="PUT" id="flexDown"/>
            </resource>
        </resource>
        <resource path="state">
            <method name="GET" id="getState"/>
        </resource>
    </resources>
</application>"#;

    #[test]
    fn test_transcode_wadl_structure() {
        let doc = transcode(SAMPLE_WADL).unwrap();

        let resources = &doc["application"]["resources"];
        assert_eq!(resources["@base"], "http://127.0.0.1:8192/api/");

        // Two sibling <resource> elements collapse into an array
        let top = resources["resource"].as_array().unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0]["@path"], "cluster");
        assert_eq!(top[1]["@path"], "state");
        assert_eq!(top[1]["method"]["@name"], "GET");
    }

    #[test]
    fn test_transcode_repeated_children_become_array() {
        let doc = transcode("<a><b x=\"1\"/><b x=\"2\"/><b x=\"3\"/></a>").unwrap();
        let items = doc["a"]["b"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["@x"], "3");
    }

    #[test]
    fn test_transcode_text_only_element() {
        let doc = transcode("<doc><title>Scheduler API</title></doc>").unwrap();
        assert_eq!(doc["doc"]["title"], "Scheduler API");
    }

    #[test]
    fn test_transcode_mixed_text_and_attributes() {
        let doc = transcode("<note lang=\"en\">hello</note>").unwrap();
        assert_eq!(doc["note"]["@lang"], "en");
        assert_eq!(doc["note"]["#text"], "hello");
    }

    #[test]
    fn test_transcode_rejects_non_xml() {
        let result = transcode("application.wadl not defined.");
        assert!(matches!(result, Err(ClientError::Transcode(_))));
    }

    #[test]
    fn test_transcode_rejects_unterminated() {
        let result = transcode("<a><b></a>");
        assert!(matches!(result, Err(ClientError::Transcode(_))));
    }
}
