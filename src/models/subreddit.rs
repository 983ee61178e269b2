use serde::Deserialize;

/// A subreddit returned by search
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Subreddit {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub display_name_prefixed: String,
    pub title: String,
    pub public_description: String,
    pub url: String,
    pub subreddit_type: String,
    pub subscribers: Option<i64>,
    pub active_user_count: Option<i64>,
    pub over18: bool,
    pub user_is_subscriber: Option<bool>,
    pub created_utc: f64,
}

impl Subreddit {
    pub fn format_summary(&self) -> String {
        let subscribers = self
            .subscribers
            .map(|count| count.to_string())
            .unwrap_or_else(|| "?".to_string());

        let mut content = format!(
            "Name: {}\nTitle: {}\nSubscribers: {}\nType: {}\n",
            self.prefixed_name(),
            self.title,
            subscribers,
            self.subreddit_type,
        );
        if self.over18 {
            content.push_str("Flags: [NSFW]\n");
        }
        if !self.public_description.trim().is_empty() {
            content.push_str(&format!("\n{}\n", self.public_description.trim()));
        }
        content.push_str(&format!("\nURL: https://reddit.com{}", self.url));
        content
    }

    pub fn format_short_summary(&self) -> String {
        match self.subscribers {
            Some(count) => format!("{} ({} subscribers) {}", self.prefixed_name(), count, self.title),
            None => format!("{} {}", self.prefixed_name(), self.title),
        }
    }

    pub fn format_timestamp(&self) -> String {
        super::format_utc(self.created_utc)
    }

    fn prefixed_name(&self) -> String {
        if self.display_name_prefixed.is_empty() {
            format!("r/{}", self.display_name)
        } else {
            self.display_name_prefixed.clone()
        }
    }
}
