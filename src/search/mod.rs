//! Search across Reddit's posts, subreddits and users.
//!
//! All three searches share one endpoint. [`SearchOptions`] carries the
//! caller's modifiers, [`SearchRequest`] adds the entity discriminator and
//! query, and [`SearchService`] sends it and checks that the returned listing
//! holds the requested kind.

pub mod options;
pub mod params;
pub mod service;

pub use options::{ParseOptionError, SearchOptions, Sort, Timespan};
pub use params::{add_query, SearchParams, SearchRequest, SearchType};
pub use service::SearchService;
