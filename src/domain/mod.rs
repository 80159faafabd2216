pub mod rank;
pub mod report;
pub mod target_site;
