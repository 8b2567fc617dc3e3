//! End-to-end report assembly tests.
//!
//! These run the assembler against a scratch working directory populated the
//! way the pipeline would populate it:
//! - unknown report types abort without touching `qc.html`
//! - missing chart files drop their category without failing the run
//! - re-rendering the same inputs changes nothing but the timestamp

use deqms_qc::core::config;
use deqms_qc::report::qc;
use regex::Regex;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SW_VER_CUT: &str = concat!(
    "<dl class=\"dl-horizontal\">\n",
    "    <dt>lehtiolab/nf-deqms</dt><dd>v1.2</dd>\n",
    "    <dt>Nextflow</dt><dd>v21.04.0</dd>\n",
    "    <dt>DEqMS</dt><dd><span style=\"color:#999999;\">N/A</span></dd>\n",
    "</dl>\n",
);

const PEPTIDE_CHARTS: &str = concat!(
    "<html><body>\n",
    "<div class=\"chunk\" id=\"pca\"><svg width=\"10\" height=\"10\"></svg></div>\n",
    "<div class=\"chunk\" id=\"deqms\"><p>volcano</p></div>\n",
    "</body></html>\n",
);

fn workdir_with_inputs() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sw_ver_cut"), SW_VER_CUT).unwrap();
    fs::write(dir.path().join("peptides.html"), PEPTIDE_CHARTS).unwrap();
    fs::write(
        dir.path().join("peptides.txt"),
        "Peptide\tproteins\tgenes\nAAK\tP1\nLLR\tP2\tG2\n",
    )
    .unwrap();
    dir
}

#[test]
fn unknown_report_type_fails_without_producing_output() {
    let dir = workdir_with_inputs();
    let err = qc::assemble(
        &config::assembler(),
        Path::new("templates/qc_bogus.html"),
        "run1",
        dir.path(),
    );
    assert!(err.is_err());
    assert!(!dir.path().join("qc.html").exists());
}

#[test]
fn assembles_report_from_available_inputs() {
    let dir = workdir_with_inputs();
    let out = qc::assemble(
        &config::assembler(),
        Path::new("qc_full.html"),
        "set42 heavy fraction",
        dir.path(),
    )
    .unwrap();
    assert_eq!(out, dir.path().join("qc.html"));

    let html = fs::read_to_string(out).unwrap();
    // Run name and software table made it in.
    assert!(html.contains("set42 heavy fraction"));
    assert!(html.contains("<tr><td>Nextflow</td><td>v21.04.0</td></tr>"));
    // Chart fragments are inserted verbatim with their configured captions.
    assert!(html.contains("<div class=\"chunk\" id=\"pca\">"));
    assert!(html.contains("Principal component analysis"));
    assert!(html.contains("DEqMS results"));
    // Feature table rendered under its display name, short row padded.
    assert!(html.contains("Peptides"));
    assert!(html.contains("<td>P2</td><td>G2</td>"));
    assert!(html.contains("<td>P1</td><td></td>"));
    // Categories without chart files are absent, not an error.
    assert!(!html.contains("id=\"proteins\""));
    assert!(!html.contains("id=\"assoc\""));
}

#[test]
fn missing_sw_ver_cut_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("peptides.html"), PEPTIDE_CHARTS).unwrap();
    let err = qc::assemble(
        &config::assembler(),
        Path::new("qc_full.html"),
        "run1",
        dir.path(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("sw_ver_cut"));
    assert!(!dir.path().join("qc.html").exists());
}

#[test]
fn rerender_differs_only_in_the_timestamp() {
    let dir = workdir_with_inputs();
    let template = Path::new("qc_full.html");
    let config = config::assembler();

    qc::assemble(&config, template, "run1", dir.path()).unwrap();
    let first = fs::read_to_string(dir.path().join("qc.html")).unwrap();
    qc::assemble(&config, template, "run1", dir.path()).unwrap();
    let second = fs::read_to_string(dir.path().join("qc.html")).unwrap();

    let ts = Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap();
    assert_eq!(ts.replace_all(&first, "TS"), ts.replace_all(&second, "TS"));
}
