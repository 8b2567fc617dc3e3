pub mod chunks;
pub mod config;
pub mod feature_table;
pub mod versions;
