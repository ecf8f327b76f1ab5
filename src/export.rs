// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::WriteResult;
use crate::options::WriterOptions;
use crate::raw::RawWriter;
use crate::stream::StreamWriter;
use crate::writer::IndentingWriter;

/// Drives `producer` against a freshly wired writer stack
/// and returns the rendered document.
///
/// # Errors
///
/// Fails if the producer fails,
/// or if flushing the pending state at the end fails.
pub fn render<F>(options: WriterOptions, producer: F) -> WriteResult<String>
where
    F: FnOnce(&mut IndentingWriter<RawWriter<Vec<u8>>>) -> WriteResult<()>,
{
    let mut writer = IndentingWriter::with_options(RawWriter::new(Vec::new()), options);
    producer(&mut writer)?;
    writer.close()?;
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Exports one document to a file.
///
/// The writer stack (buffered file sink, raw writer, indenting decorator)
/// is wired up here;
/// `producer` only issues the streaming calls.
/// The writer is closed even when the producer fails,
/// so the file handle is always released in an orderly way;
/// the producer's error takes precedence in the result.
///
/// # Errors
///
/// Fails if the file cannot be created,
/// if the producer fails,
/// or if flushing/closing the writer fails.
pub fn export_file<F>(path: &Path, options: WriterOptions, producer: F) -> WriteResult<()>
where
    F: FnOnce(&mut IndentingWriter<RawWriter<BufWriter<File>>>) -> WriteResult<()>,
{
    let file = File::create(path)?;
    let mut writer = IndentingWriter::with_options(RawWriter::new(BufWriter::new(file)), options);
    let produced = producer(&mut writer);
    let closed = writer.close();
    produced.and(closed)?;
    tracing::info!("Document exported to {}", path.display());
    Ok(())
}
