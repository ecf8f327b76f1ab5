// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Represents all cases of `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("There is no open element that an end tag could close")]
    NoOpenElement,

    #[error("An attribute or namespace declaration must directly follow a start tag")]
    AttributeOutsideElement,

    #[error("No prefix is bound for namespace <{0}>")]
    UnboundNamespace(String),

    /// The first failure while replaying the deferred items of an element.
    /// The remaining items of that element are abandoned.
    #[error("Failed to replay the deferred items of an element: {0}")]
    Replay(Box<Error>),
}

pub type WriteResult<T> = std::result::Result<T, Error>;
