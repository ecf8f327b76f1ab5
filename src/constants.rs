// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

/// Indentation for one nesting step, if nothing else is configured.
pub const DEFAULT_INDENT: &str = "  ";

/// Default prefix bound to the hitbox namespace.
pub const HITBOX_PREFIX: &str = "omr";

/// Default namespace URI for injected hitbox elements.
///
/// The URI is part of the wire format:
/// consumers match on it to recognize hitbox data,
/// so it should only be changed together with them.
pub const HITBOX_NAMESPACE: &str = "http://audiveris.org/omr-data";

/// Local name of the injected bounding-box element.
pub const HITBOX_ELEMENT: &str = "hitbox";

/// Default root-like element that receives the one-time namespace declaration.
pub const ROOT_ELEMENT: &str = "score-partwise";

/// Default leaf element whose occurrences are annotated with hitboxes.
pub const LEAF_ELEMENT: &str = "note";
