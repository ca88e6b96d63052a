pub mod backend;
pub mod cli;
pub mod column_type;
pub mod config;
pub mod dsn;
pub mod error;
pub mod format;
pub mod format_csv;
pub mod format_json;
pub mod format_plain;
pub mod format_xlsx;
pub mod format_yaml;
pub mod masking;
pub mod output;
pub mod payload;
pub mod verbose;
