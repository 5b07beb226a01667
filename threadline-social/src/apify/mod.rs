//! Apify actor-execution backend.
//!
//! Start an actor run, long-poll it to completion (`waitForFinish`), then
//! read the run's default dataset page by page. Single attempt throughout:
//! any HTTP failure or a failed run ends the request.
pub mod client;
pub mod types;

pub use client::{ApifyActors, ApifyClient};
pub use types::{RunData, RunStatus};
