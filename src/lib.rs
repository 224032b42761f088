pub mod cli;
pub mod config;
pub mod fetch;
pub mod report;
pub mod scrape;
pub mod store;
pub mod util;
