use crate::client::{RedditClient, RedditClientError};
use crate::models::{Post, Subreddit, User};
use crate::search::{SearchOptions, Sort, Timespan};
use chrono::DateTime;
use chrono_tz::America::Los_Angeles;
use log::{error, info};

/// What a search command looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Posts, optionally restricted to some subreddits
    Posts { subreddits: Vec<String> },
    Subreddits,
    Users,
}

/// Configuration options for a search command
#[derive(Debug, Clone)]
pub struct SearchCommandOptions {
    /// The text to search for
    pub query: String,
    pub target: SearchTarget,
    pub sort: Option<Sort>,
    pub timespan: Option<Timespan>,
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
    /// Display results in a brief, one-line format
    pub brief: bool,
}

impl SearchCommandOptions {
    pub fn new(query: impl Into<String>, target: SearchTarget) -> Self {
        Self {
            query: query.into(),
            target,
            sort: None,
            timespan: None,
            limit: None,
            after: None,
            before: None,
            brief: false,
        }
    }

    /// The modifiers to send with the search
    pub fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::new();
        if let Some(after) = &self.after {
            options = options.after(after.clone());
        }
        if let Some(before) = &self.before {
            options = options.before(before.clone());
        }
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        if let Some(sort) = self.sort {
            options = options.sort(sort);
        }
        if let Some(timespan) = self.timespan {
            options = options.timespan(timespan);
        }
        options
    }
}

/// Result of a search operation
#[derive(Debug)]
pub struct SearchResult {
    /// The number of results found
    pub result_count: usize,
    /// Cursor for the next page, if Reddit reported one
    pub next_after: Option<String>,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
}

/// Operation for searching Reddit
pub struct SearchOperation {
    options: SearchCommandOptions,
    client: RedditClient,
}

impl SearchOperation {
    pub fn with_client(options: SearchCommandOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Execute the search and format the results
    pub async fn execute(&self) -> Result<SearchResult, RedditClientError> {
        let search = self.client.search();
        let options = self.options.search_options();
        let query = self.options.query.as_str();

        let (lines, after) = match &self.options.target {
            SearchTarget::Posts { subreddits } => {
                let scope = if subreddits.is_empty() {
                    "all of Reddit".to_string()
                } else {
                    format!("r/{}", subreddits.join("+"))
                };
                info!("Searching posts in {} for '{}'", scope, query);

                let subreddits: Vec<&str> = subreddits.iter().map(String::as_str).collect();
                let (posts, _) = search.posts(query, &subreddits, &options).await?;
                let lines = format_posts(&posts.posts, self.options.brief);
                (lines, posts.after)
            }
            SearchTarget::Subreddits => {
                info!("Searching subreddits for '{}'", query);
                let (subreddits, _) = search.subreddits(query, &options).await?;
                let lines = format_subreddits(&subreddits.subreddits, self.options.brief);
                (lines, subreddits.after)
            }
            SearchTarget::Users => {
                info!("Searching users for '{}'", query);
                let (users, _) = search.users(query, &options).await?;
                let lines = format_users(&users.users, self.options.brief);
                (lines, users.after)
            }
        };

        let mut output = String::new();
        if lines.is_empty() {
            output.push_str("No results found.\n");
        } else {
            output.push_str(&format!("Found {} results\n", lines.len()));
            for line in &lines {
                output.push_str(line);
            }
        }
        if let Some(after) = &after {
            output.push_str(&format!("\nNext page: --after {}\n", after));
        }

        Ok(SearchResult {
            result_count: lines.len(),
            next_after: after,
            formatted_output: output,
        })
    }
}

// One formatted entry per post
fn format_posts(posts: &[Post], brief: bool) -> Vec<String> {
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            if brief {
                format!(
                    "{:2}. [{}] {} | ID: {}\n",
                    i + 1,
                    local_time(post.created_utc, "%m-%d %H:%M"),
                    post.format_short_summary(),
                    post.fullname()
                )
            } else {
                format!(
                    "\n============ POST =============\n[{}] [Los Angeles time]\nThing ID: {}\n{}\n================================\n",
                    local_time(post.created_utc, "%Y-%m-%d %H:%M:%S"),
                    post.fullname(),
                    post.format_summary()
                )
            }
        })
        .collect()
}

fn format_subreddits(subreddits: &[Subreddit], brief: bool) -> Vec<String> {
    subreddits
        .iter()
        .enumerate()
        .map(|(i, subreddit)| {
            if brief {
                format!("{:2}. {}\n", i + 1, subreddit.format_short_summary())
            } else {
                format!(
                    "\n========= SUBREDDIT ==========\n{}\n================================\n",
                    subreddit.format_summary()
                )
            }
        })
        .collect()
}

fn format_users(users: &[User], brief: bool) -> Vec<String> {
    users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            if brief {
                format!("{:2}. {}\n", i + 1, user.format_short_summary())
            } else {
                format!(
                    "\n============ USER ============\n{}\n================================\n",
                    user.format_summary()
                )
            }
        })
        .collect()
}

fn local_time(created_utc: f64, format: &str) -> String {
    match DateTime::from_timestamp(created_utc as i64, 0) {
        Some(utc) => utc.with_timezone(&Los_Angeles).format(format).to_string(),
        None => "unknown time".to_string(),
    }
}

/// CLI handler function for search commands that accepts a preconfigured client
pub async fn handle_search_command_with_client(
    options: SearchCommandOptions,
    client: RedditClient,
) -> Result<(), RedditClientError> {
    let operation = SearchOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            // Print the formatted output to the console
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error searching Reddit: {}", err);
            if let Some(response) = err.response() {
                if let Some(rate) = &response.rate {
                    error!(
                        "Rate limit: {} remaining, resets at {}",
                        rate.remaining, rate.reset
                    );
                }
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_options_become_search_options() {
        let mut options = SearchCommandOptions::new("rust", SearchTarget::Users);
        options.limit = Some(5);
        options.sort = Some(Sort::New);
        options.after = Some("t2_abc".to_string());

        let expected = SearchOptions::new().after("t2_abc").limit(5).sort_by_new();
        assert_eq!(options.search_options(), expected);
    }

    #[test]
    fn brief_post_lines_carry_the_fullname() {
        let post = Post {
            id: "abc".to_string(),
            title: "Async Rust".to_string(),
            author: "ferris".to_string(),
            subreddit_name_prefixed: "r/rust".to_string(),
            score: 7,
            ..Default::default()
        };

        let lines = format_posts(&[post], true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(" 1. ["));
        assert!(lines[0].contains("[r/rust | 7 pts] Async Rust - by u/ferris"));
        assert!(lines[0].ends_with("| ID: t3_abc\n"));
    }

    #[test]
    fn local_time_uses_los_angeles() {
        // 2024-01-01 08:00:00 UTC is midnight in Los Angeles
        assert_eq!(local_time(1_704_096_000.0, "%Y-%m-%d %H:%M"), "2024-01-01 00:00");
    }
}
