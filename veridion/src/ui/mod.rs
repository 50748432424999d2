//! Terminal presentation helpers: status messages and tables.

pub mod output_format;
pub mod redaction_summary;
