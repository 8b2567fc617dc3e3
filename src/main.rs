fn main() -> anyhow::Result<()> {
    deqms_qc::cli::run::entry()
}
