//! Software version table for the report.
//!
//! `sw_ver_cut` is an html definition list cut out of the MultiQC versions
//! block; each `<dt>`/`<dd>` pair is one software/version row. The pairing
//! must alternate strictly; anything else means the upstream producer broke
//! and we fail fast instead of guessing.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt::Write;

/// One software/version row. The version keeps its inner markup (the N/A
/// placeholder is a styled span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwarePair {
    pub name: String,
    pub version: String,
}

/// Walk the definition list and collect alternating dt/dd pairs in document
/// order.
pub fn parse_dl(html: &str) -> Result<Vec<SoftwarePair>> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;
    let mut pairs = Vec::new();
    let mut pending: Option<String> = None;
    loop {
        match reader
            .read_event()
            .context("malformed software version markup")?
        {
            Event::Start(e) if e.local_name().as_ref() == b"dt" => {
                if pending.is_some() {
                    bail!("software version list has a <dt> without a following <dd>");
                }
                pending = Some(inner_text(&mut reader, html, e)?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"dd" => {
                let Some(name) = pending.take() else {
                    bail!("software version list has a <dd> without a preceding <dt>");
                };
                let version = inner_text(&mut reader, html, e)?;
                pairs.push(SoftwarePair { name, version });
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if pending.is_some() {
        bail!("software version list ends with a <dt> without a <dd>");
    }
    Ok(pairs)
}

/// Render the two-column table inserted into the report.
pub fn render_table(pairs: &[SoftwarePair]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "<table class=\"table\">")?;
    writeln!(out, "<thead>")?;
    writeln!(out, "<th>Software</th>")?;
    writeln!(out, "<th>Version</th>")?;
    writeln!(out, "</thead>")?;
    writeln!(out, "<tbody>")?;
    for pair in pairs {
        writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", pair.name, pair.version)?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    Ok(out)
}

/// Capture the raw inner span of the element just opened by `e`.
fn inner_text(
    reader: &mut Reader<&[u8]>,
    html: &str,
    e: quick_xml::events::BytesStart<'_>,
) -> Result<String> {
    let end = e.to_end().into_owned();
    let span = reader
        .read_to_end(end.name())
        .context("unclosed element in software version markup")?;
    Ok(html[span.start as usize..span.end as usize].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DL: &str = concat!(
        "<dl class=\"dl-horizontal\">\n",
        "    <dt>lehtiolab/nf-deqms</dt><dd>v1.2</dd>\n",
        "    <dt>Nextflow</dt><dd><span style=\"color:#999999;\">N/A</span></dd>\n",
        "</dl>\n",
    );

    #[test]
    fn pairs_come_out_in_document_order() {
        let pairs = parse_dl(DL).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].name, "lehtiolab/nf-deqms");
        assert_eq!(pairs[0].version, "v1.2");
    }

    #[test]
    fn placeholder_markup_is_preserved() {
        let pairs = parse_dl(DL).unwrap();
        assert_eq!(pairs[1].version, "<span style=\"color:#999999;\">N/A</span>");
    }

    #[test]
    fn dangling_dt_fails_fast() {
        let err = parse_dl("<dl><dt>left over</dt></dl>").unwrap_err();
        assert!(err.to_string().contains("without a <dd>"));
    }

    #[test]
    fn dd_before_dt_fails_fast() {
        assert!(parse_dl("<dl><dd>orphan</dd></dl>").is_err());
    }

    #[test]
    fn consecutive_dts_fail_fast() {
        assert!(parse_dl("<dl><dt>a</dt><dt>b</dt><dd>v</dd></dl>").is_err());
    }

    #[test]
    fn table_holds_one_row_per_pair() {
        let pairs = parse_dl(DL).unwrap();
        let table = render_table(&pairs).unwrap();
        assert!(table.starts_with("<table class=\"table\">"));
        assert!(table.contains("<tr><td>lehtiolab/nf-deqms</td><td>v1.2</td></tr>"));
        assert_eq!(table.matches("<tr>").count(), 2);
    }
}
