use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deqms-qc",
    version,
    about = "QC report assembly for the nf-deqms proteomics pipeline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape software version files and print a MultiQC html block
    Versions,
    /// Assemble the QC report from upstream fragments in the working directory
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Report template; its base name (sans extension) selects the report type
    pub template: PathBuf,

    /// Search/run name shown in the report
    pub searchname: String,
}
