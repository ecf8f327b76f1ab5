// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use crate::error::{Error, WriteResult};
use crate::name::{NamespaceContext, QName};
use crate::stream::StreamWriter;

/// Renders the streaming surface as plain XML bytes.
///
/// Tag brackets are written lazily:
/// after [`start_element`](StreamWriter::start_element) or
/// [`empty_element`](StreamWriter::empty_element) the tag stays open
/// (`<name attr="v"`) so that attributes and namespace declarations
/// can still be appended.
/// The next non-attribute call forces the pending `>` or `/>` out.
/// Deferred-item replay in the decorating writer depends on exactly
/// this behavior.
///
/// No indentation, no collapsing:
/// a start/end pair with no content renders as `<name></name>`.
pub struct RawWriter<W: Write> {
    /// The byte sink. Owned by the caller for its whole lifetime.
    out: W,
    context: NamespaceContext,
    /// The not-yet-terminated tag bracket, if any.
    open: Option<Bracket>,
    /// Qualified names of the currently open elements.
    stack: Vec<String>,
}

enum Bracket {
    /// Terminated by `>`.
    Start,
    /// Terminated by `/>`.
    Empty,
}

impl<W: Write> RawWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            context: NamespaceContext::default(),
            open: None,
            stack: Vec::new(),
        }
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn terminate_bracket(&mut self) -> WriteResult<()> {
        match self.open.take() {
            Some(Bracket::Start) => self.out.write_all(b">")?,
            Some(Bracket::Empty) => self.out.write_all(b"/>")?,
            None => {}
        }
        Ok(())
    }

    /// Resolves a name to its serialized `prefix:local` form.
    ///
    /// Element names may also resolve against the default namespace;
    /// attribute names never do, per the XML namespaces rules.
    fn qualified(&self, name: &QName, attribute: bool) -> WriteResult<String> {
        if let Some(prefix) = &name.prefix {
            return Ok(format!("{prefix}:{}", name.local));
        }
        if let Some(namespace) = &name.namespace {
            if !attribute && self.context.default_namespace() == Some(namespace.as_str()) {
                return Ok(name.local.clone());
            }
            let prefix = self
                .context
                .prefix(namespace)
                .ok_or_else(|| Error::UnboundNamespace(namespace.clone()))?;
            return Ok(format!("{prefix}:{}", name.local));
        }
        Ok(name.local.clone())
    }

    fn open_tag(&mut self, name: &QName, bracket: Bracket) -> WriteResult<()> {
        self.terminate_bracket()?;
        let qualified = self.qualified(name, false)?;
        write!(self.out, "<{qualified}")?;
        if matches!(bracket, Bracket::Start) {
            self.stack.push(qualified);
        }
        self.open = Some(bracket);
        Ok(())
    }

    fn write_attribute_assignment(&mut self, qualified: &str, value: &str) -> WriteResult<()> {
        if self.open.is_none() {
            return Err(Error::AttributeOutsideElement);
        }
        write!(self.out, " {qualified}=\"")?;
        write_attr_escaped(&mut self.out, value)?;
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

impl<W: Write> StreamWriter for RawWriter<W> {
    fn start_document(
        &mut self,
        encoding: Option<&str>,
        version: Option<&str>,
    ) -> WriteResult<()> {
        let version = version.unwrap_or("1.0");
        write!(self.out, "<?xml version=\"{version}\"")?;
        if let Some(encoding) = encoding {
            write!(self.out, " encoding=\"{encoding}\"")?;
        }
        self.out.write_all(b"?>")?;
        Ok(())
    }

    fn start_element(&mut self, name: &QName) -> WriteResult<()> {
        self.open_tag(name, Bracket::Start)
    }

    fn empty_element(&mut self, name: &QName) -> WriteResult<()> {
        self.open_tag(name, Bracket::Empty)
    }

    fn end_element(&mut self) -> WriteResult<()> {
        self.terminate_bracket()?;
        let qualified = self.stack.pop().ok_or(Error::NoOpenElement)?;
        write!(self.out, "</{qualified}>")?;
        Ok(())
    }

    fn end_document(&mut self) -> WriteResult<()> {
        self.terminate_bracket()?;
        while let Some(qualified) = self.stack.pop() {
            write!(self.out, "</{qualified}>")?;
        }
        Ok(())
    }

    fn attribute(&mut self, name: &QName, value: &str) -> WriteResult<()> {
        let qualified = self.qualified(name, true)?;
        self.write_attribute_assignment(&qualified, value)
    }

    fn namespace(&mut self, prefix: &str, namespace: &str) -> WriteResult<()> {
        self.write_attribute_assignment(&format!("xmlns:{prefix}"), namespace)?;
        self.context.bind(prefix, namespace);
        Ok(())
    }

    fn default_namespace(&mut self, namespace: &str) -> WriteResult<()> {
        self.write_attribute_assignment("xmlns", namespace)?;
        self.context.bind_default(namespace);
        Ok(())
    }

    fn set_prefix(&mut self, prefix: &str, namespace: &str) -> WriteResult<()> {
        self.context.bind(prefix, namespace);
        Ok(())
    }

    fn set_default_namespace(&mut self, namespace: &str) -> WriteResult<()> {
        self.context.bind_default(namespace);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> WriteResult<()> {
        self.terminate_bracket()?;
        write_text_escaped(&mut self.out, text)?;
        Ok(())
    }

    fn cdata(&mut self, data: &str) -> WriteResult<()> {
        self.terminate_bracket()?;
        write!(self.out, "<![CDATA[{data}]]>")?;
        Ok(())
    }

    fn comment(&mut self, data: &str) -> WriteResult<()> {
        self.terminate_bracket()?;
        write!(self.out, "<!--{data}-->")?;
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> WriteResult<()> {
        self.terminate_bracket()?;
        match data {
            Some(data) => write!(self.out, "<?{target} {data}?>")?,
            None => write!(self.out, "<?{target}?>")?,
        }
        Ok(())
    }

    fn entity_ref(&mut self, name: &str) -> WriteResult<()> {
        self.terminate_bracket()?;
        write!(self.out, "&{name};")?;
        Ok(())
    }

    fn dtd(&mut self, dtd: &str) -> WriteResult<()> {
        self.terminate_bracket()?;
        self.out.write_all(dtd.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> WriteResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> WriteResult<()> {
        self.terminate_bracket()?;
        self.out.flush()?;
        Ok(())
    }

    fn namespace_context(&self) -> &NamespaceContext {
        &self.context
    }
}

/// Escapes character data.
///
/// `&`, `<` and `>` become named entities,
/// `\r` and remaining C0 controls become character references,
/// tabs and newlines pass through.
fn write_text_escaped(out: &mut impl Write, text: &str) -> WriteResult<()> {
    let mut buf = [0_u8; 4];
    for ch in text.chars() {
        match ch {
            '&' => out.write_all(b"&amp;")?,
            '<' => out.write_all(b"&lt;")?,
            '>' => out.write_all(b"&gt;")?,
            '\r' => out.write_all(b"&#13;")?,
            '\t' | '\n' => out.write_all(ch.encode_utf8(&mut buf).as_bytes())?,
            c if (c as u32) < 0x20 => write!(out, "&#x{:X};", c as u32)?,
            c => out.write_all(c.encode_utf8(&mut buf).as_bytes())?,
        }
    }
    Ok(())
}

/// Escapes an attribute value.
///
/// Like character data, but quotes are escaped as well
/// and literal whitespace controls are kept as character references
/// so they survive attribute-value normalization.
fn write_attr_escaped(out: &mut impl Write, value: &str) -> WriteResult<()> {
    let mut buf = [0_u8; 4];
    for ch in value.chars() {
        match ch {
            '&' => out.write_all(b"&amp;")?,
            '<' => out.write_all(b"&lt;")?,
            '>' => out.write_all(b"&gt;")?,
            '"' => out.write_all(b"&quot;")?,
            '\t' => out.write_all(b"&#9;")?,
            '\n' => out.write_all(b"&#10;")?,
            '\r' => out.write_all(b"&#13;")?,
            c if (c as u32) < 0x20 => write!(out, "&#x{:X};", c as u32)?,
            c => out.write_all(c.encode_utf8(&mut buf).as_bytes())?,
        }
    }
    Ok(())
}
