pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;
pub mod search;

pub use client::{RedditClient, RedditClientError, Response};
pub use search::{SearchOptions, SearchService, Sort, Timespan};
