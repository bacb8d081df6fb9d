pub mod dataset;
pub mod export;
pub mod insights;
pub mod records;
pub mod report;
pub mod sample;
pub mod session;
pub mod stats;
pub mod store;
