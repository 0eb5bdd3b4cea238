//! XFA (XML Forms Architecture) detection.
//!
//! XFA is an XML-based form specification embedded in some PDFs. A static
//! XFA form carries a regular PDF rendering of its pages and is harmless to
//! assistive technology; a dynamic one asks the viewer to render the pages
//! from the XML, which leaves nothing tagged to read. Only the latter matters
//! here, so this module reads the `config` packet far enough to find the
//! `dynamicRender` setting.
//!
//! # XFA Packet Structure
//!
//! XFA forms contain several XML packets:
//! - **template**: Form structure and field definitions
//! - **datasets**: Form data values
//! - **config**: Configuration settings (including `dynamicRender`)
//!
//! Packets may be stored Flate-compressed.

use crate::error::{Error, Result};
use flate2::read::ZlibDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;

/// Rendering mode requested by an XFA form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XfaRendering {
    /// The PDF pages are authoritative
    #[default]
    Static,
    /// The viewer must render from the XML
    Dynamic,
}

/// Summary of the XFA form in a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XfaForm {
    /// Packet names in document order
    pub packets: Vec<String>,
    /// Rendering mode from `config`
    pub rendering: XfaRendering,
    /// Catalog `NeedsRendering` flag
    pub needs_rendering: bool,
}

impl XfaForm {
    /// Parse XFA packets from a PDF XFA array: `[name1 stream1 name2 stream2 ...]`.
    ///
    /// Each packet's data is either plain XML or zlib-compressed XML.
    pub fn from_packets(packets: &[(String, Vec<u8>)]) -> Result<Self> {
        let mut form = XfaForm::default();
        for (name, data) in packets {
            form.packets.push(name.clone());
            let xml = decode_packet(data)?;
            if name == "config" || xml.contains("dynamicRender") {
                if scan_dynamic_render(&xml)? {
                    form.rendering = XfaRendering::Dynamic;
                }
            }
        }
        log::debug!(
            "XFA form with {} packets, rendering {:?}",
            form.packets.len(),
            form.rendering
        );
        Ok(form)
    }

    /// Parse a complete XDP document.
    pub fn from_xdp(data: &[u8]) -> Result<Self> {
        let xml = decode_packet(data)?;
        let rendering = if scan_dynamic_render(&xml)? {
            XfaRendering::Dynamic
        } else {
            XfaRendering::Static
        };
        Ok(XfaForm {
            packets: vec!["xdp".to_string()],
            rendering,
            needs_rendering: false,
        })
    }

    /// Set the catalog `NeedsRendering` flag.
    pub fn with_needs_rendering(mut self, needs_rendering: bool) -> Self {
        self.needs_rendering = needs_rendering;
        self
    }

    /// Whether the form is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.needs_rendering || self.rendering == XfaRendering::Dynamic
    }
}

/// Get packet XML, inflating it if it is zlib-compressed.
fn decode_packet(data: &[u8]) -> Result<String> {
    // zlib header: CMF 0x78 followed by a FLG byte making the pair divisible by 31
    let compressed =
        data.len() >= 2 && data[0] == 0x78 && (u16::from(data[0]) << 8 | u16::from(data[1])) % 31 == 0;
    if !compressed {
        return Ok(String::from_utf8_lossy(data).into_owned());
    }

    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Xfa(format!("cannot inflate XFA packet: {}", e)))?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Look for `<dynamicRender>required</dynamicRender>`.
fn scan_dynamic_render(xml: &str) -> Result<bool> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_dynamic_render = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                in_dynamic_render = e.local_name().as_ref() == b"dynamicRender";
            },
            Ok(Event::Text(ref e)) if in_dynamic_render => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::Xfa(format!("bad dynamicRender text: {}", err)))?;
                if text.trim() == "required" {
                    return Ok(true);
                }
            },
            Ok(Event::End(_)) => in_dynamic_render = false,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xfa(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            },
            _ => {},
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    const DYNAMIC_CONFIG: &str = r#"<config xmlns="http://www.xfa.org/schema/xci/3.0/">
        <acrobat><acrobat7><dynamicRender>required</dynamicRender></acrobat7></acrobat>
    </config>"#;

    const STATIC_CONFIG: &str = r#"<config>
        <acrobat><acrobat7><dynamicRender>forbidden</dynamicRender></acrobat7></acrobat>
    </config>"#;

    #[test]
    fn test_dynamic_config() {
        let form =
            XfaForm::from_packets(&[("config".into(), DYNAMIC_CONFIG.as_bytes().to_vec())]).unwrap();
        assert!(form.is_dynamic());
        assert_eq!(form.packets, vec!["config"]);
    }

    #[test]
    fn test_static_config() {
        let form = XfaForm::from_packets(&[
            ("template".into(), b"<template/>".to_vec()),
            ("config".into(), STATIC_CONFIG.as_bytes().to_vec()),
        ])
        .unwrap();
        assert!(!form.is_dynamic());
        assert!(form.with_needs_rendering(true).is_dynamic());
    }

    #[test]
    fn test_compressed_packet() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(DYNAMIC_CONFIG.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        let form = XfaForm::from_packets(&[("config".into(), compressed)]).unwrap();
        assert_eq!(form.rendering, XfaRendering::Dynamic);
    }

    #[test]
    fn test_xdp() {
        let xdp = format!("<xdp:xdp xmlns:xdp=\"http://ns.adobe.com/xdp/\">{}</xdp:xdp>", DYNAMIC_CONFIG);
        assert!(XfaForm::from_xdp(xdp.as_bytes()).unwrap().is_dynamic());
    }

    #[test]
    fn test_malformed_xml() {
        let result = XfaForm::from_packets(&[("config".into(), b"<config><a></b></config>".to_vec())]);
        assert!(matches!(result, Err(Error::Xfa(_))));
    }
}
