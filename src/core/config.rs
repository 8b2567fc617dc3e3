//! Configuration tables for both tools.
//!
//! All tables are explicit values handed to the components at call time, so
//! tests can substitute their own. The defaults mirror the nf-deqms
//! pipeline: the literal ids, hrefs and file names are part of its output
//! contract and must not drift.

use crate::core::feature_table::FieldOrder;
use crate::core::versions::VersionSource;

/// Fixed metadata and source list for the version collector.
#[derive(Debug, Clone)]
pub struct VersionsConfig {
    pub id: &'static str,
    pub section_name: &'static str,
    pub section_href: &'static str,
    pub description: &'static str,
    pub sources: Vec<VersionSource>,
}

pub fn versions() -> VersionsConfig {
    VersionsConfig {
        id: "lehtiolab/nf-deqms-software-versions",
        // Verbatim from the pipeline, missing space included.
        section_name: "lehtiolab/nf-deqmsSoftware Versions",
        section_href: "https://github.com/lehtiolab/nf-deqms",
        description: "are collected at run time from the software output.",
        sources: vec![
            VersionSource::seeded("lehtiolab/nf-deqms", "v_pipeline.txt", r"(\S+)"),
            VersionSource::seeded("Nextflow", "v_nextflow.txt", r"(\S+)"),
            VersionSource::new("DEqMS", "v_deqms.txt", r"\[1\]..([0-9.]+)"),
        ],
    }
}

/// One supported report type. The set of types is closed; an unknown type is
/// a fatal error at assembly time.
#[derive(Debug, Clone)]
pub struct ReportType {
    pub name: &'static str,
    /// Feature category key to display name.
    pub featnames: Vec<(&'static str, &'static str)>,
    /// Feature categories in report order.
    pub feattypes: Vec<&'static str>,
    /// Column priorities for this type's feature tables.
    pub field_order: FieldOrder,
}

impl ReportType {
    pub fn featname(&self, key: &str) -> Option<&'static str> {
        self.featnames
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| *name)
    }
}

/// Titles and report-type registry for the report assembler.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Chart/section titles shared across report types.
    pub titles: Vec<(&'static str, &'static str)>,
    pub report_types: Vec<ReportType>,
}

impl AssemblerConfig {
    pub fn report_type(&self, name: &str) -> Option<&ReportType> {
        self.report_types.iter().find(|rt| rt.name == name)
    }

    pub fn title(&self, key: &str) -> Option<&'static str> {
        self.titles
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, title)| *title)
    }
}

pub fn assembler() -> AssemblerConfig {
    AssemblerConfig {
        titles: vec![
            ("deqms", "DEqMS results"),
            ("pca", "Principal component analysis"),
        ],
        report_types: vec![ReportType {
            name: "qc_full",
            featnames: vec![
                ("ensg", "ENSGs"),
                ("peptides", "Peptides"),
                ("proteins", "Proteins"),
                ("genes", "Gene Names"),
            ],
            feattypes: vec!["peptides", "proteins", "genes", "assoc"],
            field_order: FieldOrder::new(["peptides", "proteins", "genes", "ensg"]),
        }],
    }
}
