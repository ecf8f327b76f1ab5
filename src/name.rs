// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// A qualified element or attribute name.
///
/// Covers the three addressing forms of the streaming surface:
/// local name only, namespace + local name,
/// and prefix + local name + namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    /// A name addressed by its local part only.
    #[must_use]
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            namespace: None,
            local: local.into(),
        }
    }

    /// A name addressed by namespace URI and local part.
    ///
    /// The prefix is resolved against the writer's namespace context
    /// at emission time.
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// A fully addressed name: prefix, local part and namespace URI.
    #[must_use]
    pub fn prefixed(
        prefix: impl Into<String>,
        local: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            prefix: Some(prefix.into()),
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}:{}", self.local)
        } else {
            write!(f, "{}", self.local)
        }
    }
}

/// The namespace bindings currently known to a writer.
///
/// Bindings accumulate over the document;
/// scoped re-binding per element is not supported.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    // Prefix to namespace mapping
    prefixes: BTreeMap<String, String>,
    // Namespace to prefix mapping
    prefixes_inverted: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        self.prefixes_inverted
            .insert(namespace.clone(), prefix.clone());
        self.prefixes.insert(prefix, namespace);
    }

    pub fn bind_default(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// The prefix bound to `namespace`, if any.
    #[must_use]
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes_inverted.get(namespace).map(String::as_str)
    }

    /// The namespace bound to `prefix`, if any.
    #[must_use]
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// The default (unprefixed) namespace, if one was declared.
    #[must_use]
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }
}
