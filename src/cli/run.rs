use crate::cli::args::{Cli, Commands, ReportArgs};
use crate::core::{config, versions};
use crate::report;
use anyhow::{Context, Result};
use clap::Parser;
use std::env;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Versions => run_versions(),
        Commands::Report(args) => run_report(args),
    }
}

fn run_versions() -> Result<()> {
    let config = config::versions();
    let record = versions::collect(&config.sources)?;
    print!("{}", versions::mqc_block(&config, &record)?);
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    let config = config::assembler();
    let workdir = env::current_dir().context("failed to determine working directory")?;
    report::qc::assemble(&config, &args.template, &args.searchname, &workdir)?;
    Ok(())
}
