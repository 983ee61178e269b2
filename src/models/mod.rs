use serde::Deserialize;
use std::collections::HashMap;

pub mod listing;
pub mod subreddit;
pub mod user;

pub use listing::{Listing, ListingKind, Posts, RootListing, Subreddits, Users};
pub use subreddit::Subreddit;
pub use user::User;

/// Format a Reddit `created_utc` value as a human-readable string
pub(crate) fn format_utc(created_utc: f64) -> String {
    use chrono::{TimeZone, Utc};

    let timestamp = Utc
        .timestamp_opt(created_utc as i64, 0)
        .single()
        .unwrap_or_else(Utc::now);

    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// A post returned by search.
///
/// Search results are less uniform than subreddit feeds, so every field
/// falls back to its default when Reddit leaves it out.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Post {
    // Basic post information
    pub id: String,
    pub name: String,
    pub title: String,
    pub author: String,
    pub author_fullname: Option<String>,
    pub permalink: String,
    pub url: String,
    pub created_utc: f64,

    // Post type and content
    pub is_self: bool,
    pub selftext: String,
    pub is_video: bool,
    pub is_original_content: bool,
    pub thumbnail: String,

    // Post metrics
    pub score: i32,
    pub upvote_ratio: f32,
    pub num_comments: i32,
    pub num_crossposts: i32,

    // Subreddit information
    pub subreddit: String,
    pub subreddit_id: String,
    pub subreddit_name_prefixed: String,

    // Post status and moderation
    pub archived: bool,
    pub locked: bool,
    pub stickied: bool,
    pub spoiler: bool,
    pub over_18: bool,
    pub edited: serde_json::Value, // Can be boolean or timestamp
    pub distinguished: Option<String>,
    pub link_flair_text: Option<String>,

    // Additional fields we don't explicitly model
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

impl Post {
    /// The post's fullname, usable as an `after`/`before` cursor
    pub fn fullname(&self) -> String {
        if self.name.is_empty() {
            format!("t3_{}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Format a post for display with important metadata
    pub fn format_summary(&self) -> String {
        let mut content = format!(
            "Title: {}\nAuthor: u/{}\nSubreddit: r/{}\nScore: {} ({}% upvoted) | Comments: {}\n",
            self.title,
            self.author,
            self.subreddit,
            self.score,
            (self.upvote_ratio * 100.0) as i32,
            self.num_comments,
        );

        let mut flags = Vec::new();
        if self.is_self {
            flags.push("Self Post");
        }
        if self.over_18 {
            flags.push("NSFW");
        }
        if self.spoiler {
            flags.push("Spoiler");
        }
        if self.is_video {
            flags.push("Video");
        }
        if self.is_original_content {
            flags.push("OC");
        }
        if self.stickied {
            flags.push("Stickied");
        }
        if self.locked {
            flags.push("Locked");
        }
        if !flags.is_empty() {
            content.push_str(&format!("Flags: [{}]\n", flags.join(", ")));
        }

        if let Some(flair) = &self.link_flair_text {
            if !flair.is_empty() {
                content.push_str(&format!("Flair: {}\n", flair));
            }
        }

        // Text posts get an excerpt, cut on a char boundary
        if self.is_self && !self.selftext.is_empty() {
            let text = if self.selftext.chars().count() > 500 {
                format!("{}...", self.selftext.chars().take(500).collect::<String>())
            } else {
                self.selftext.clone()
            };
            content.push_str("\nContent:\n---------\n");
            content.push_str(&text);
            content.push_str("\n---------\n");
        }

        content.push_str(&format!(
            "\nPermalink: https://reddit.com{}",
            self.permalink
        ));
        if !self.is_self && self.url != format!("https://reddit.com{}", self.permalink) {
            content.push_str(&format!("\nExternal URL: {}", self.url));
        }

        content
    }

    /// Get a short summary for the post (title, author, score)
    pub fn format_short_summary(&self) -> String {
        format!(
            "[{} | {} pts] {} - by u/{}",
            self.subreddit_name_prefixed, self.score, self.title, self.author
        )
    }

    pub fn format_timestamp(&self) -> String {
        format_utc(self.created_utc)
    }
}
