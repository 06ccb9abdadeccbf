pub mod anchors;
pub mod config;
pub mod issue;
