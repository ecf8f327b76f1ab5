// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::WriteResult;
use crate::stream::StreamWriter;

/// Line-oriented indentation state.
///
/// Tracks the element nesting level and whether a close already happened
/// at the current level.
/// The asymmetry is deliberate:
/// every start tag gets a fresh line,
/// but a close only gets one when it is not the first close
/// following the most recent open.
/// That keeps `<leaf>text</leaf>` on one line
/// while sibling and ancestor closes each land on their own.
///
/// Without a configured indentation step every method is a no-op.
pub struct Indenter {
    /// Space(s) or tab(s) for one level. `None` disables indentation.
    step: Option<String>,
    /// Current element nesting level.
    level: usize,
    /// Whether a close already occurred at the current level.
    closing: bool,
}

impl Indenter {
    #[must_use]
    pub fn new(step: Option<String>) -> Self {
        Self {
            step,
            level: 0,
            closing: false,
        }
    }

    /// Emits a newline followed by the indentation of the current level.
    ///
    /// The characters go through the underlying writer,
    /// which also forces any lazily open tag bracket closed.
    ///
    /// # Errors
    ///
    /// Fails if the underlying writer fails.
    pub fn do_indent<W: StreamWriter>(&self, out: &mut W) -> WriteResult<()> {
        if let Some(step) = &self.step {
            out.characters("\n")?;
            for _ in 0..self.level {
                out.characters(step)?;
            }
        }
        Ok(())
    }

    /// Indentation before a start tag. Always indents.
    ///
    /// # Errors
    ///
    /// Fails if the underlying writer fails.
    pub fn before_start<W: StreamWriter>(&mut self, out: &mut W) -> WriteResult<()> {
        if self.step.is_some() {
            self.do_indent(out)?;
            self.level += 1;
            self.closing = false;
        }
        Ok(())
    }

    /// Indentation before an end tag. Indents except on the first close.
    ///
    /// # Errors
    ///
    /// Fails if the underlying writer fails.
    pub fn before_end<W: StreamWriter>(&mut self, out: &mut W) -> WriteResult<()> {
        if self.step.is_some() {
            self.level = self.level.saturating_sub(1);
            if self.closing {
                self.do_indent(out)?;
            }
            self.closing = true;
        }
        Ok(())
    }

    /// Indentation before a comment. Always indents.
    ///
    /// # Errors
    ///
    /// Fails if the underlying writer fails.
    pub fn before_comment<W: StreamWriter>(&self, out: &mut W) -> WriteResult<()> {
        if self.step.is_some() {
            self.do_indent(out)?;
        }
        Ok(())
    }

    /// Forces the next end tag onto its own line.
    pub const fn mark_closing(&mut self) {
        self.closing = true;
    }

    /// Treats the position as freshly opened again.
    pub const fn clear_closing(&mut self) {
        self.closing = false;
    }
}
