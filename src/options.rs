// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{
    DEFAULT_INDENT, HITBOX_NAMESPACE, HITBOX_PREFIX, LEAF_ELEMENT, ROOT_ELEMENT,
};

/// An axis-aligned bounding box, in page pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Configuration of the hitbox annotation side channel.
pub struct AnnotationOptions {
    /// Bounding boxes aligned 1:1, in document order,
    /// with the occurrences of [`Self::leaf_element`].
    /// An absent entry leaves the matching occurrence unannotated.
    pub boxes: Vec<Option<Rect>>,
    /// Prefix bound to [`Self::namespace`] on the first occurrence
    /// of [`Self::root_element`].
    pub prefix: String,
    /// Namespace URI qualifying the injected hitbox elements.
    pub namespace: String,
    /// Element whose first occurrence carries the namespace declaration.
    pub root_element: String,
    /// Recurring element whose occurrences are annotated.
    pub leaf_element: String,
}

impl AnnotationOptions {
    /// Whether this configuration has any observable effect.
    ///
    /// Annotation stays fully inert unless at least one box is present
    /// and both prefix and namespace are non-empty.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.boxes.iter().any(Option::is_some)
            && !self.prefix.is_empty()
            && !self.namespace.is_empty()
    }
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            boxes: Vec::new(),
            prefix: HITBOX_PREFIX.to_string(),
            namespace: HITBOX_NAMESPACE.to_string(),
            root_element: ROOT_ELEMENT.to_string(),
            leaf_element: LEAF_ELEMENT.to_string(),
        }
    }
}

/// Configuration of an [`IndentingWriter`](crate::writer::IndentingWriter),
/// fixed at construction.
pub struct WriterOptions {
    /// Space(s) or tab(s) representing one level of indentation.
    ///
    /// `None` disables indentation entirely;
    /// the writer then degenerates to a pass-through decorator
    /// that still collapses childless elements.
    pub indent: Option<String>,
    /// Optional hitbox annotation channel.
    pub annotation: Option<AnnotationOptions>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: Some(DEFAULT_INDENT.to_string()),
            annotation: None,
        }
    }
}
