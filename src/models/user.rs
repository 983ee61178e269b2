use serde::Deserialize;

/// A user account returned by search
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_utc: f64,
    pub link_karma: i64,
    pub comment_karma: i64,
    pub is_friend: bool,
    pub is_employee: bool,
    pub is_mod: bool,
    pub has_verified_email: bool,
    pub is_suspended: bool,
}

impl User {
    pub fn format_summary(&self) -> String {
        let mut content = format!(
            "User: u/{}\nLink karma: {} | Comment karma: {}\nJoined: {}\n",
            self.name,
            self.link_karma,
            self.comment_karma,
            self.format_timestamp(),
        );

        let mut flags = Vec::new();
        if self.is_employee {
            flags.push("Admin");
        }
        if self.is_mod {
            flags.push("Moderator");
        }
        if self.is_suspended {
            flags.push("Suspended");
        }
        if !flags.is_empty() {
            content.push_str(&format!("Flags: [{}]\n", flags.join(", ")));
        }

        content.push_str(&format!("\nProfile: https://reddit.com/user/{}", self.name));
        content
    }

    pub fn format_short_summary(&self) -> String {
        format!(
            "u/{} ({} karma)",
            self.name,
            self.link_karma + self.comment_karma
        )
    }

    pub fn format_timestamp(&self) -> String {
        super::format_utc(self.created_utc)
    }
}
