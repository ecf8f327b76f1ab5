// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use crate::constants::HITBOX_ELEMENT;
use crate::error::{Error, WriteResult};
use crate::indent::Indenter;
use crate::name::{NamespaceContext, QName};
use crate::options::{AnnotationOptions, Rect, WriterOptions};
use crate::stream::StreamWriter;

/// Decorates any [`StreamWriter`] with indentation,
/// empty-element collapsing and optional hitbox annotation.
///
/// Whether an element is childless -
/// and may therefore collapse into a single self-closing tag -
/// is unknowable at the moment its start is requested.
/// The writer therefore keeps the start of the most recent element
/// *pending*, buffers everything that may legally follow a start tag
/// (attributes, namespace declarations, prefix bindings),
/// and resolves the shape on the first unambiguous signal:
///
/// - the matching end call arrives first: the element collapses,
///   `<name a="1"/>`, with the buffered items replayed in arrival order;
/// - any content arrives first (character data, CDATA, a comment,
///   a processing instruction, an entity reference, a DTD,
///   a nested element, or the end of the document):
///   the element is emitted as a real start tag,
///   again followed by the buffered items in arrival order.
///
/// At most one element is ever pending:
/// a nested start resolves its parent before becoming pending itself.
pub struct IndentingWriter<W: StreamWriter> {
    /// The decorated writer, to which all real work is delegated.
    inner: W,
    indent: Indenter,
    /// The element whose shape is still undecided, if any.
    pending: Option<Pending>,
    /// Hitbox annotation state. `None` when the channel is inert.
    hitboxes: Option<Hitboxes>,
}

/// A start tag whose shape (self-closing vs. start/end pair)
/// has not been decided yet, with its deferred follow-up items.
struct Pending {
    name: QName,
    items: Vec<DeferredItem>,
}

/// A buffered call that may follow a start tag,
/// stored with its original arguments in arrival order.
enum DeferredItem {
    Attribute(QName, String),
    Namespace(String, String),
    SetPrefix(String, String),
    SetDefaultNamespace(String),
}

/// The two possible emission shapes of a pending element.
#[derive(Clone, Copy)]
enum Shape {
    /// One self-closing tag.
    Empty,
    /// A real start tag; fires the post-start hook.
    Open,
}

/// Cursor state of the hitbox annotation channel.
struct Hitboxes {
    /// Boxes aligned with successive leaf-element occurrences.
    boxes: Vec<Option<Rect>>,
    /// The injected element name, prebuilt with prefix and namespace.
    element: QName,
    prefix: String,
    namespace: String,
    root_element: String,
    leaf_element: String,
    /// Whether the namespace declaration was already written.
    declared: bool,
    /// Index of the next leaf occurrence to annotate.
    cursor: usize,
}

impl Hitboxes {
    fn from_options(options: AnnotationOptions) -> Option<Self> {
        if !options.is_active() {
            return None;
        }
        tracing::debug!(
            boxes = options.boxes.len(),
            prefix = %options.prefix,
            "Hitbox annotation enabled"
        );
        let element = QName::prefixed(
            options.prefix.clone(),
            HITBOX_ELEMENT,
            options.namespace.clone(),
        );
        Some(Self {
            boxes: options.boxes,
            element,
            prefix: options.prefix,
            namespace: options.namespace,
            root_element: options.root_element,
            leaf_element: options.leaf_element,
            declared: false,
            cursor: 0,
        })
    }

    /// The box for the current leaf occurrence;
    /// the cursor advances whether or not one is found.
    fn next(&mut self) -> Option<Rect> {
        let hit = self.boxes.get(self.cursor).copied().flatten();
        self.cursor += 1;
        hit
    }

    /// The box the next real leaf occurrence would receive.
    fn peek(&self) -> Option<Rect> {
        self.boxes.get(self.cursor).copied().flatten()
    }
}

impl<W: StreamWriter> IndentingWriter<W> {
    /// A writer with the default two-space indentation and no annotation.
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriterOptions::default())
    }

    pub fn with_options(inner: W, options: WriterOptions) -> Self {
        Self {
            inner,
            indent: Indenter::new(options.indent),
            pending: None,
            hitboxes: options.annotation.and_then(Hitboxes::from_options),
        }
    }

    /// Consumes the decorator, returning the decorated writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Commits the pending element to `shape`, if one exists,
    /// and replays its deferred items in arrival order.
    ///
    /// The first failure abandons the remaining items
    /// and surfaces as one wrapped error.
    fn resolve_pending(&mut self, shape: Shape) -> WriteResult<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        self.emit_pending(pending, shape)
            .map_err(|err| Error::Replay(Box::new(err)))
    }

    fn emit_pending(&mut self, pending: Pending, shape: Shape) -> WriteResult<()> {
        match shape {
            Shape::Empty => self.inner.empty_element(&pending.name)?,
            Shape::Open => {
                self.inner.start_element(&pending.name)?;
                self.after_start(&pending.name)?;
            }
        }
        for item in pending.items {
            match item {
                DeferredItem::Attribute(name, value) => self.inner.attribute(&name, &value)?,
                DeferredItem::Namespace(prefix, namespace) => {
                    self.inner.namespace(&prefix, &namespace)?;
                }
                DeferredItem::SetPrefix(prefix, namespace) => {
                    self.inner.set_prefix(&prefix, &namespace)?;
                }
                DeferredItem::SetDefaultNamespace(namespace) => {
                    self.inner.set_default_namespace(&namespace)?;
                }
            }
        }
        Ok(())
    }

    /// Post-start hook, fired right after a real start tag
    /// reached the decorated writer and before any deferred item replay.
    fn after_start(&mut self, name: &QName) -> WriteResult<()> {
        let Some(mut hitboxes) = self.hitboxes.take() else {
            return Ok(());
        };
        let result = self.annotate(&mut hitboxes, name);
        self.hitboxes = Some(hitboxes);
        result
    }

    fn annotate(&mut self, hitboxes: &mut Hitboxes, name: &QName) -> WriteResult<()> {
        if !hitboxes.declared && name.local == hitboxes.root_element {
            self.inner
                .namespace(&hitboxes.prefix, &hitboxes.namespace)?;
            hitboxes.declared = true;
            tracing::debug!(namespace = %hitboxes.namespace, "Hitbox namespace declared");
        }

        if name.local != hitboxes.leaf_element {
            return Ok(());
        }

        if let Some(rect) = hitboxes.next() {
            self.indent.do_indent(&mut self.inner)?;
            self.inner.empty_element(&hitboxes.element)?;
            self.inner.attribute(&QName::local("x"), &rect.x.to_string())?;
            self.inner.attribute(&QName::local("y"), &rect.y.to_string())?;
            self.inner
                .attribute(&QName::local("width"), &rect.width.to_string())?;
            self.inner
                .attribute(&QName::local("height"), &rect.height.to_string())?;
            self.indent.clear_closing();
        }
        Ok(())
    }

    /// Whether the pending element is a leaf occurrence
    /// that the annotation channel would inject into.
    fn annotation_due(&self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let Some(hitboxes) = &self.hitboxes else {
            return false;
        };
        pending.name.local == hitboxes.leaf_element && hitboxes.peek().is_some()
    }
}

impl<W: StreamWriter> StreamWriter for IndentingWriter<W> {
    fn start_document(
        &mut self,
        encoding: Option<&str>,
        version: Option<&str>,
    ) -> WriteResult<()> {
        self.inner.start_document(encoding, version)
    }

    fn start_element(&mut self, name: &QName) -> WriteResult<()> {
        // A nested start proves the pending element had content.
        self.resolve_pending(Shape::Open)?;
        self.indent.before_start(&mut self.inner)?;
        self.pending = Some(Pending {
            name: name.clone(),
            items: Vec::new(),
        });
        Ok(())
    }

    fn empty_element(&mut self, name: &QName) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.inner.empty_element(name)
    }

    fn end_element(&mut self) -> WriteResult<()> {
        if self.pending.is_none() {
            self.indent.before_end(&mut self.inner)?;
            return self.inner.end_element();
        }
        if self.annotation_due() {
            // The injected box is a structural child,
            // which rules out the self-closing form.
            self.resolve_pending(Shape::Open)?;
            self.indent.mark_closing();
            self.indent.before_end(&mut self.inner)?;
            self.inner.end_element()
        } else {
            // No content arrived since the start:
            // the self-closing form stands in for both tags.
            self.resolve_pending(Shape::Empty)?;
            self.indent.before_end(&mut self.inner)
        }
    }

    fn end_document(&mut self) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.inner.end_document()
    }

    fn attribute(&mut self, name: &QName, value: &str) -> WriteResult<()> {
        if let Some(pending) = &mut self.pending {
            pending
                .items
                .push(DeferredItem::Attribute(name.clone(), value.to_string()));
            return Ok(());
        }
        self.inner.attribute(name, value)
    }

    fn namespace(&mut self, prefix: &str, namespace: &str) -> WriteResult<()> {
        if let Some(pending) = &mut self.pending {
            pending.items.push(DeferredItem::Namespace(
                prefix.to_string(),
                namespace.to_string(),
            ));
            return Ok(());
        }
        self.inner.namespace(prefix, namespace)
    }

    fn default_namespace(&mut self, namespace: &str) -> WriteResult<()> {
        self.inner.default_namespace(namespace)
    }

    fn set_prefix(&mut self, prefix: &str, namespace: &str) -> WriteResult<()> {
        if let Some(pending) = &mut self.pending {
            pending.items.push(DeferredItem::SetPrefix(
                prefix.to_string(),
                namespace.to_string(),
            ));
            return Ok(());
        }
        self.inner.set_prefix(prefix, namespace)
    }

    fn set_default_namespace(&mut self, namespace: &str) -> WriteResult<()> {
        if let Some(pending) = &mut self.pending {
            pending
                .items
                .push(DeferredItem::SetDefaultNamespace(namespace.to_string()));
            return Ok(());
        }
        self.inner.set_default_namespace(namespace)
    }

    fn characters(&mut self, text: &str) -> WriteResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.resolve_pending(Shape::Open)?;
        self.inner.characters(text)
    }

    fn cdata(&mut self, data: &str) -> WriteResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.resolve_pending(Shape::Open)?;
        self.inner.cdata(data)
    }

    fn comment(&mut self, data: &str) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.indent.before_comment(&mut self.inner)?;
        self.inner.comment(data)
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.inner.processing_instruction(target, data)
    }

    fn entity_ref(&mut self, name: &str) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.inner.entity_ref(name)
    }

    fn dtd(&mut self, dtd: &str) -> WriteResult<()> {
        self.resolve_pending(Shape::Open)?;
        self.inner.dtd(dtd)
    }

    fn flush(&mut self) -> WriteResult<()> {
        if self.pending.is_none() {
            self.inner.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> WriteResult<()> {
        // Attempt to close the decorated writer
        // even when flushing the pending element failed;
        // the flush failure takes precedence in the result.
        let flushed = self.resolve_pending(Shape::Open);
        let closed = self.inner.close();
        flushed.and(closed)
    }

    fn namespace_context(&self) -> &NamespaceContext {
        self.inner.namespace_context()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.inner.property(name)
    }
}
