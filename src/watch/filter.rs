// src/watch/filter.rs

use std::path::Path;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled filename patterns for transient files.
///
/// Editors and downloaders produce short-lived files (`.tmp`, `.swp`,
/// `.part`, backup `~` suffixes) whose events must not reset the debounce
/// timer or trigger a pass. Matching is against the final path component
/// only, case-insensitively.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    set: GlobSet,
}

impl IgnoreFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pat in patterns {
            let glob = GlobBuilder::new(pat)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid ignore pattern: {pat}"))?;
            builder.add(glob);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// True if the path names a transient file whose events should be dropped.
    pub fn is_transient(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.set.is_match(Path::new(name)),
            None => false,
        }
    }
}
