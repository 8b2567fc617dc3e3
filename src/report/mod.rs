pub mod qc;
pub mod software;
