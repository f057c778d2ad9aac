//! CLI command implementations

pub mod export;
pub mod import;
pub mod info;
pub mod json_output;
pub mod samples;
pub mod scan;
