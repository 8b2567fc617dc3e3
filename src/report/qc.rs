//! QC report assembly.
//!
//! Pulls together everything the upstream pipeline steps left in the working
//! directory: the software version list (`sw_ver_cut`), one chart fragment
//! file per feature category (`<category>.html`, optional) and one feature
//! table per category (`<category>.txt`, optional). The result is rendered
//! through the report-type template and written as `qc.html`.

use crate::core::chunks;
use crate::core::config::{AssemblerConfig, ReportType};
use crate::core::feature_table::FeatureTable;
use crate::report::software;
use anyhow::{Context, Result, bail};
use askama::Template;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// One pre-rendered chart, with an optional caption resolved from the
/// configured titles.
pub struct Chart {
    pub id: String,
    pub title: Option<String>,
    pub html: String,
}

/// Feature table flattened for rendering: one cell per display column, empty
/// string where the row had no value for that column.
pub struct TableView {
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the template needs for one feature category. Categories whose
/// chart file is missing never make it into the context.
pub struct FeatureSection {
    pub key: String,
    pub display: String,
    pub charts: Vec<Chart>,
    pub table: Option<TableView>,
}

#[derive(Template)]
#[template(path = "qc_full.html")]
struct QcFullPage<'a> {
    searchname: &'a str,
    sections: &'a [FeatureSection],
    software: &'a str,
    completedate: &'a str,
}

/// Assemble the report and write `qc.html` into `workdir`, overwriting any
/// previous run. The template path's base name selects the report type; an
/// unknown type aborts before any output is produced.
pub fn assemble(
    config: &AssemblerConfig,
    template: &Path,
    searchname: &str,
    workdir: &Path,
) -> Result<PathBuf> {
    let templatetype = template
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("template path {} has no usable base name", template.display()))?;
    let report_type = config
        .report_type(templatetype)
        .with_context(|| format!("unknown report type '{}'", templatetype))?;

    let sw_path = workdir.join("sw_ver_cut");
    let sw_html = fs::read_to_string(&sw_path)
        .with_context(|| format!("failed to read {}", sw_path.display()))?;
    let pairs = software::parse_dl(&sw_html)
        .with_context(|| format!("failed to parse {}", sw_path.display()))?;
    let software = software::render_table(&pairs)?;

    let sections = feature_sections(config, report_type, workdir)?;
    let completedate = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let html = match report_type.name {
        "qc_full" => QcFullPage {
            searchname,
            sections: &sections,
            software: &software,
            completedate: &completedate,
        }
        .render()
        .context("failed to render qc_full template")?,
        other => bail!("no template registered for report type '{}'", other),
    };

    let out_path = workdir.join("qc.html");
    fs::write(&out_path, html)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}

/// Load charts and tables for every configured category. A category whose
/// chart file cannot be opened is reported on stdout and dropped; a missing
/// feature table just leaves the section without one.
fn feature_sections(
    config: &AssemblerConfig,
    report_type: &ReportType,
    workdir: &Path,
) -> Result<Vec<FeatureSection>> {
    let mut sections = Vec::new();
    for &feat in &report_type.feattypes {
        let chart_path = workdir.join(format!("{}.html", feat));
        let chart_html = match fs::read_to_string(&chart_path) {
            Ok(text) => text,
            Err(err) => {
                println!("{} {}", feat, err);
                continue;
            }
        };
        let chunk_set = chunks::parse_chunks(&chart_html)
            .with_context(|| format!("failed to parse {}", chart_path.display()))?;
        let charts = chunk_set
            .into_iter()
            .map(|(id, html)| Chart {
                title: config.title(&id).map(str::to_string),
                id,
                html,
            })
            .collect();

        let table_path = workdir.join(format!("{}.txt", feat));
        let table = if table_path.is_file() {
            Some(table_view(&FeatureTable::load(
                &table_path,
                &report_type.field_order,
            )?))
        } else {
            None
        };

        sections.push(FeatureSection {
            key: feat.to_string(),
            display: report_type.featname(feat).unwrap_or(feat).to_string(),
            charts,
            table,
        });
    }
    Ok(sections)
}

fn table_view(table: &FeatureTable) -> TableView {
    let rows = table
        .rows
        .values()
        .map(|row| {
            table
                .fields
                .iter()
                .map(|field| row.get(field).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    TableView {
        fields: table.fields.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature_table::FieldOrder;

    #[test]
    fn table_view_fills_absent_cells_with_empty_strings() {
        let order = FieldOrder::new(["proteins", "genes"]);
        let table = FeatureTable::parse("proteins\tgenes\nP1\n", &order).unwrap();
        let view = table_view(&table);
        assert_eq!(view.fields, ["proteins", "genes"]);
        assert_eq!(view.rows, [["P1".to_string(), String::new()]]);
    }
}
