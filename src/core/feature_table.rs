//! Tab-separated feature table parsing.
//!
//! Upstream steps emit one table per feature category (peptides, proteins,
//! gene names, ...). The first line is a header; the value of the first
//! header column is the row identifier. Column display order follows a
//! per-report priority list, with columns missing from the list sorted after
//! all known ones in their original header order.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Column priority list. Priority is the position in the configured list;
/// lower sorts first.
#[derive(Debug, Clone, Default)]
pub struct FieldOrder {
    priority: IndexMap<String, usize>,
}

impl FieldOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let priority = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.into(), i))
            .collect();
        Self { priority }
    }

    pub fn priority(&self, name: &str) -> Option<usize> {
        self.priority.get(name).copied()
    }
}

/// One parsed feature table. Immutable after construction.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    /// Column names in display order.
    pub fields: Vec<String>,
    /// Row identifier (first header column value) to column/value mapping.
    /// Duplicate identifiers are last-write-wins; identifiers are expected
    /// unique upstream.
    pub rows: IndexMap<String, IndexMap<String, String>>,
}

impl FeatureTable {
    pub fn load(path: &Path, order: &FieldOrder) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read feature table {}", path.display()))?;
        Self::parse(&text, order)
    }

    pub fn parse(text: &str, order: &FieldOrder) -> Result<Self> {
        let mut lines = text.lines();
        let header: Vec<&str> = lines
            .next()
            .context("feature table has no header row")?
            .split('\t')
            .collect();

        let mut fields: Vec<String> = header.iter().map(|name| name.to_string()).collect();
        // Stable sort: known columns by priority, unknown columns after every
        // known one, keeping their relative header order.
        fields.sort_by_key(|name| match order.priority(name) {
            Some(p) => (0, p),
            None => (1, 0),
        });

        let mut rows = IndexMap::new();
        for line in lines {
            let values: Vec<&str> = line.split('\t').collect();
            let mut row = IndexMap::new();
            // A short line simply leaves the trailing header columns absent.
            for (name, value) in header.iter().zip(values.iter()) {
                row.insert(name.to_string(), value.to_string());
            }
            rows.insert(values[0].to_string(), row);
        }
        Ok(Self { fields, rows })
    }
}
