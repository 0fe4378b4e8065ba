// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver configuration.
//!
//! Supports both programmatic and TOML-based configuration:
//!
//! ```toml
//! [resolver]
//! strict = true
//! ```

use serde::{Deserialize, Serialize};

/// Resolver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Fail annotation-only types that carry no directive at all.
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ResolverConfig {
    /// Accept annotation-only types with no directive-bearing field.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    #[must_use]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Parse a standalone `[resolver]` table.
    #[cfg(feature = "manifest")]
    pub fn from_toml_str(content: &str) -> Result<Self, crate::manifest::ManifestError> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            resolver: ResolverConfig,
        }

        let wrapper: Wrapper = toml::from_str(content)?;
        Ok(wrapper.resolver)
    }
}
