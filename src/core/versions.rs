//! Software version collection.
//!
//! Scans a configured set of small text files left behind by pipeline steps,
//! pulls a version string out of each with a per-source regex, and renders
//! the result as a MultiQC custom-content block. The pipeline and workflow
//! engine entries are pre-seeded with a styled N/A placeholder so they appear
//! in the report even when nothing matched.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use crate::core::config::VersionsConfig;

/// Placeholder shown when a version could not be determined. Inserted
/// verbatim into the html block.
pub const NOT_AVAILABLE: &str = "<span style=\"color:#999999;\">N/A</span>";

/// One configured version source.
#[derive(Debug, Clone)]
pub struct VersionSource {
    pub name: String,
    pub path: PathBuf,
    /// Regex with the version string in capture group 1.
    pub pattern: String,
    /// Pre-seeded sources always appear in the output, falling back to the
    /// N/A placeholder.
    pub seeded: bool,
}

impl VersionSource {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            pattern: pattern.into(),
            seeded: false,
        }
    }

    pub fn seeded(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            seeded: true,
            ..Self::new(name, path, pattern)
        }
    }
}

/// Source name to resolved version (or placeholder), in display order.
pub type VersionRecord = IndexMap<String, String>;

/// Scan every configured source. Placeholders for seeded sources are
/// inserted first, then each source is scanned in configuration order; a
/// match overwrites the placeholder in place. Unopenable files and
/// non-matching contents are tolerated; an open failure for a non-seeded
/// source prints a `name error` line to stderr.
pub fn collect(sources: &[VersionSource]) -> Result<VersionRecord> {
    let mut record = VersionRecord::new();
    for source in sources.iter().filter(|s| s.seeded) {
        record.insert(source.name.clone(), NOT_AVAILABLE.to_string());
    }
    for source in sources {
        let re = Regex::new(&source.pattern)
            .with_context(|| format!("invalid version pattern for {}", source.name))?;
        match fs::read_to_string(&source.path) {
            Ok(text) => {
                if let Some(m) = re.captures(&text).and_then(|caps| caps.get(1)) {
                    record.insert(source.name.clone(), format!("v{}", m.as_str()));
                }
            }
            Err(err) => {
                if !source.seeded {
                    eprintln!("{} {}", source.name, err);
                }
            }
        }
    }
    Ok(record)
}

/// Render the MultiQC custom-content block consumed by the report step.
/// Values are inserted verbatim; input files are trusted pipeline output,
/// so no html escaping is applied.
pub fn mqc_block(config: &VersionsConfig, record: &VersionRecord) -> Result<String> {
    let mut out = String::new();
    writeln!(out)?;
    writeln!(out, "id: '{}'", config.id)?;
    writeln!(out, "section_name: '{}'", config.section_name)?;
    writeln!(out, "section_href: '{}'", config.section_href)?;
    writeln!(out, "plot_type: 'html'")?;
    writeln!(out, "description: '{}'", config.description)?;
    writeln!(out, "data: |")?;
    writeln!(out, "    <dl class=\"dl-horizontal\">")?;
    writeln!(out)?;
    for (name, version) in record {
        writeln!(out, "        <dt>{}</dt><dd>{}</dd>", name, version)?;
    }
    writeln!(out, "    </dl>")?;
    Ok(out)
}
