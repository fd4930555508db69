//! Thin element writer over [`quick_xml::Writer`].

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::export::Error;

pub(super) type Attrs<'a> = &'a [(&'a str, &'a str)];

/// Writes one XML part into memory.
pub(super) struct PartWriter {
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    /// Starts a part with a standalone UTF-8 declaration.
    pub(super) fn new() -> Result<Self, Error> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;
        Ok(Self { writer })
    }

    pub(super) fn start(&mut self, name: &str, attrs: Attrs<'_>) -> Result<(), Error> {
        self.writer.write_event(Event::Start(tag(name, attrs)))?;
        Ok(())
    }

    pub(super) fn end(&mut self, name: &str) -> Result<(), Error> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(super) fn empty(&mut self, name: &str, attrs: Attrs<'_>) -> Result<(), Error> {
        self.writer.write_event(Event::Empty(tag(name, attrs)))?;
        Ok(())
    }

    /// Writes `<name attrs>text</name>`, escaping `text`.
    ///
    /// Fails if `text` holds a character XML 1.0 cannot represent, even
    /// escaped.
    pub(super) fn element(&mut self, name: &str, attrs: Attrs<'_>, text: &str) -> Result<(), Error> {
        if let Some(c) = disallowed_char(text) {
            return Err(Error::Serialization(format!(
                "<{name}> text contains U+{:04X}, which XML does not allow",
                u32::from(c)
            )));
        }
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    pub(super) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// First character of `text` outside the XML 1.0 `Char` production.
pub(super) fn disallowed_char(text: &str) -> Option<char> {
    text.chars().find(|&c| {
        matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    })
}

fn tag<'a>(name: &'a str, attrs: Attrs<'a>) -> BytesStart<'a> {
    let mut tag = BytesStart::new(name);
    for attr in attrs {
        tag.push_attribute(*attr);
    }
    tag
}
