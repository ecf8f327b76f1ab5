// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::WriteResult;
use crate::name::{NamespaceContext, QName};

/// The streaming XML writer surface.
///
/// [`RawWriter`](crate::raw::RawWriter) implements it against a byte sink;
/// [`IndentingWriter`](crate::writer::IndentingWriter) decorates any
/// implementation with indentation, empty-element collapsing
/// and hitbox annotation.
///
/// Producers drive a writer strictly in document order.
/// All methods are fallible; every error is terminal for the session
/// and the document must be abandoned.
pub trait StreamWriter {
    /// Writes the XML declaration.
    ///
    /// Missing version defaults to `1.0`;
    /// a missing encoding is omitted from the declaration.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn start_document(&mut self, encoding: Option<&str>, version: Option<&str>)
    -> WriteResult<()>;

    /// Opens an element.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails,
    /// or if the name is namespace-addressed and no prefix is bound.
    fn start_element(&mut self, name: &QName) -> WriteResult<()>;

    /// Writes a self-closing element.
    ///
    /// Attributes may still follow until the next non-attribute call.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails,
    /// or if the name is namespace-addressed and no prefix is bound.
    fn empty_element(&mut self, name: &QName) -> WriteResult<()>;

    /// Closes the innermost open element.
    ///
    /// # Errors
    ///
    /// Fails if no element is open, or if the underlying sink fails.
    fn end_element(&mut self) -> WriteResult<()>;

    /// Closes all still-open elements and ends the document.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn end_document(&mut self) -> WriteResult<()>;

    /// Writes an attribute on the most recently opened tag.
    ///
    /// # Errors
    ///
    /// Fails if no tag is open for attributes anymore,
    /// or if the underlying sink fails.
    fn attribute(&mut self, name: &QName, value: &str) -> WriteResult<()>;

    /// Writes an `xmlns:prefix` declaration on the most recently opened tag
    /// and records the binding.
    ///
    /// # Errors
    ///
    /// Fails if no tag is open for attributes anymore,
    /// or if the underlying sink fails.
    fn namespace(&mut self, prefix: &str, namespace: &str) -> WriteResult<()>;

    /// Writes an `xmlns` declaration on the most recently opened tag
    /// and records the binding.
    ///
    /// # Errors
    ///
    /// Fails if no tag is open for attributes anymore,
    /// or if the underlying sink fails.
    fn default_namespace(&mut self, namespace: &str) -> WriteResult<()>;

    /// Records a prefix binding without writing anything.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn set_prefix(&mut self, prefix: &str, namespace: &str) -> WriteResult<()>;

    /// Records the default namespace without writing anything.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn set_default_namespace(&mut self, namespace: &str) -> WriteResult<()>;

    /// Writes escaped character data.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn characters(&mut self, text: &str) -> WriteResult<()>;

    /// Writes a CDATA section.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn cdata(&mut self, data: &str) -> WriteResult<()>;

    /// Writes a comment.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn comment(&mut self, data: &str) -> WriteResult<()>;

    /// Writes a processing instruction.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> WriteResult<()>;

    /// Writes an entity reference (`&name;`).
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn entity_ref(&mut self, name: &str) -> WriteResult<()>;

    /// Writes a DTD (`<!DOCTYPE …>`) declaration verbatim.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn dtd(&mut self, dtd: &str) -> WriteResult<()>;

    /// Flushes buffered output down to the byte sink.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn flush(&mut self) -> WriteResult<()>;

    /// Terminates the write session.
    ///
    /// Any dangling tag bracket is closed and the sink is flushed;
    /// releasing the sink itself is left to its owner.
    ///
    /// # Errors
    ///
    /// Fails if the underlying sink fails.
    fn close(&mut self) -> WriteResult<()>;

    /// The namespace bindings known so far.
    fn namespace_context(&self) -> &NamespaceContext;

    /// The prefix bound to `namespace`, if any.
    fn prefix(&self, namespace: &str) -> Option<&str> {
        self.namespace_context().prefix(namespace)
    }

    /// The namespace bound to `prefix`, if any.
    fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespace_context().namespace_uri(prefix)
    }

    /// An implementation defined writer property.
    fn property(&self, _name: &str) -> Option<String> {
        None
    }
}
