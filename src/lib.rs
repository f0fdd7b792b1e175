pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod pipeline;
pub mod scraper;
pub mod utils;

pub use pipeline::{JobBoard, JobPosting};
