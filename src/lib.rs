pub mod config;
pub mod date;
pub mod model;
pub mod notify;
pub mod report;
pub mod scan;
pub mod source;
