//! The generic listing envelope returned by Reddit's search endpoint and its
//! projection into typed collections.

use super::{Post, Subreddit, User};
use crate::client::RedditClientError;
use serde::Deserialize;
use std::fmt;

/// Top-level response for Reddit listings
#[derive(Deserialize, Debug)]
pub struct RootListing {
    pub kind: String,
    pub data: ListingData,
}

/// Page of things with the cursors to continue from
#[derive(Deserialize, Debug, Default)]
pub struct ListingData {
    pub after: Option<String>,
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<i32>,
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A single listing entry, tagged by Reddit's type prefix
#[derive(Deserialize, Debug)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    #[serde(rename = "t3")]
    Post(Box<Post>),
    #[serde(rename = "t5")]
    Subreddit(Box<Subreddit>),
    #[serde(rename = "t2")]
    User(Box<User>),
}

impl Thing {
    pub fn listing_kind(&self) -> ListingKind {
        match self {
            Thing::Post(_) => ListingKind::Posts,
            Thing::Subreddit(_) => ListingKind::Subreddits,
            Thing::User(_) => ListingKind::Users,
        }
    }
}

/// The entity kind a listing holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Posts,
    Subreddits,
    Users,
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ListingKind::Posts => write!(f, "post listing"),
            ListingKind::Subreddits => write!(f, "subreddit listing"),
            ListingKind::Users => write!(f, "user listing"),
        }
    }
}

/// Posts matched by a search, plus pagination cursors
#[derive(Debug, Default)]
pub struct Posts {
    pub posts: Vec<Post>,
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Subreddits matched by a search, plus pagination cursors
#[derive(Debug, Default)]
pub struct Subreddits {
    pub subreddits: Vec<Subreddit>,
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Users matched by a search, plus pagination cursors
#[derive(Debug, Default)]
pub struct Users {
    pub users: Vec<User>,
    pub after: Option<String>,
    pub before: Option<String>,
}

/// A decoded listing whose entity kind has been checked.
///
/// A listing without children carries no kind at all, so it is kept apart
/// and projects into an empty collection of whatever kind is asked for.
#[derive(Debug)]
pub enum Listing {
    Empty {
        after: Option<String>,
        before: Option<String>,
    },
    Posts(Posts),
    Subreddits(Subreddits),
    Users(Users),
}

impl RootListing {
    /// Classify the envelope by the kind of its children.
    ///
    /// Fails when the envelope is not a listing or mixes entity kinds.
    pub fn into_listing(self) -> Result<Listing, RedditClientError> {
        if self.kind != "Listing" {
            return Err(RedditClientError::NotAListing {
                kind: self.kind,
                response: None,
            });
        }

        let ListingData {
            after,
            before,
            children,
            ..
        } = self.data;

        let kind = match children.first() {
            Some(first) => first.listing_kind(),
            None => return Ok(Listing::Empty { after, before }),
        };

        let listing = match kind {
            ListingKind::Posts => Listing::Posts(Posts {
                posts: collect(children, kind, |thing| match thing {
                    Thing::Post(post) => Ok(*post),
                    other => Err(other),
                })?,
                after,
                before,
            }),
            ListingKind::Subreddits => Listing::Subreddits(Subreddits {
                subreddits: collect(children, kind, |thing| match thing {
                    Thing::Subreddit(subreddit) => Ok(*subreddit),
                    other => Err(other),
                })?,
                after,
                before,
            }),
            ListingKind::Users => Listing::Users(Users {
                users: collect(children, kind, |thing| match thing {
                    Thing::User(user) => Ok(*user),
                    other => Err(other),
                })?,
                after,
                before,
            }),
        };

        Ok(listing)
    }

    pub fn into_posts(self) -> Result<Posts, RedditClientError> {
        self.into_listing()?.into_posts()
    }

    pub fn into_subreddits(self) -> Result<Subreddits, RedditClientError> {
        self.into_listing()?.into_subreddits()
    }

    pub fn into_users(self) -> Result<Users, RedditClientError> {
        self.into_listing()?.into_users()
    }
}

fn collect<T>(
    children: Vec<Thing>,
    expected: ListingKind,
    pick: impl Fn(Thing) -> Result<T, Thing>,
) -> Result<Vec<T>, RedditClientError> {
    children
        .into_iter()
        .map(|thing| {
            pick(thing).map_err(|other| mismatch(expected, other.listing_kind()))
        })
        .collect()
}

impl Listing {
    /// Entity kind held by the listing, `None` when it is empty
    pub fn kind(&self) -> Option<ListingKind> {
        match self {
            Listing::Empty { .. } => None,
            Listing::Posts(_) => Some(ListingKind::Posts),
            Listing::Subreddits(_) => Some(ListingKind::Subreddits),
            Listing::Users(_) => Some(ListingKind::Users),
        }
    }

    pub fn into_posts(self) -> Result<Posts, RedditClientError> {
        match self {
            Listing::Posts(posts) => Ok(posts),
            Listing::Empty { after, before } => Ok(Posts {
                posts: Vec::new(),
                after,
                before,
            }),
            Listing::Subreddits(_) => Err(mismatch(ListingKind::Posts, ListingKind::Subreddits)),
            Listing::Users(_) => Err(mismatch(ListingKind::Posts, ListingKind::Users)),
        }
    }

    pub fn into_subreddits(self) -> Result<Subreddits, RedditClientError> {
        match self {
            Listing::Subreddits(subreddits) => Ok(subreddits),
            Listing::Empty { after, before } => Ok(Subreddits {
                subreddits: Vec::new(),
                after,
                before,
            }),
            Listing::Posts(_) => Err(mismatch(ListingKind::Subreddits, ListingKind::Posts)),
            Listing::Users(_) => Err(mismatch(ListingKind::Subreddits, ListingKind::Users)),
        }
    }

    pub fn into_users(self) -> Result<Users, RedditClientError> {
        match self {
            Listing::Users(users) => Ok(users),
            Listing::Empty { after, before } => Ok(Users {
                users: Vec::new(),
                after,
                before,
            }),
            Listing::Posts(_) => Err(mismatch(ListingKind::Users, ListingKind::Posts)),
            Listing::Subreddits(_) => Err(mismatch(ListingKind::Users, ListingKind::Subreddits)),
        }
    }
}

fn mismatch(expected: ListingKind, found: ListingKind) -> RedditClientError {
    RedditClientError::UnexpectedListing {
        expected,
        found,
        response: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root(value: serde_json::Value) -> RootListing {
        serde_json::from_value(value).unwrap()
    }

    fn listing(children: serde_json::Value) -> RootListing {
        root(json!({
            "kind": "Listing",
            "data": { "after": "t3_next", "before": null, "dist": 1, "children": children }
        }))
    }

    #[test]
    fn post_listing_projects_into_posts() {
        let root = listing(json!([
            { "kind": "t3", "data": { "id": "abc", "title": "Async Rust", "subreddit": "rust" } },
            { "kind": "t3", "data": { "id": "def", "title": "Tokio 2.0", "subreddit": "rust" } }
        ]));

        let posts = root.into_posts().unwrap();
        assert_eq!(posts.posts.len(), 2);
        assert_eq!(posts.posts[0].title, "Async Rust");
        assert_eq!(posts.after.as_deref(), Some("t3_next"));
        assert_eq!(posts.before, None);
    }

    #[test]
    fn empty_listing_projects_into_every_kind() {
        let empty = json!({ "kind": "Listing", "data": { "after": null, "before": null, "children": [] } });

        assert!(root(empty.clone()).into_posts().unwrap().posts.is_empty());
        assert!(root(empty.clone()).into_subreddits().unwrap().subreddits.is_empty());
        assert!(root(empty).into_users().unwrap().users.is_empty());
    }

    #[test]
    fn missing_children_is_an_empty_listing() {
        let root = root(json!({ "kind": "Listing", "data": { "after": null, "before": null } }));
        assert!(matches!(root.into_listing().unwrap(), Listing::Empty { .. }));
    }

    #[test]
    fn wrong_projection_is_an_error() {
        let root = listing(json!([
            { "kind": "t3", "data": { "id": "abc", "title": "Async Rust" } }
        ]));

        let err = root.into_users().unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::UnexpectedListing {
                expected: ListingKind::Users,
                found: ListingKind::Posts,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Expected a user listing, got a post listing");
    }

    #[test]
    fn mixed_children_are_rejected() {
        let root = listing(json!([
            { "kind": "t5", "data": { "display_name": "rust" } },
            { "kind": "t2", "data": { "name": "ferris" } }
        ]));

        assert!(matches!(
            root.into_listing().unwrap_err(),
            RedditClientError::UnexpectedListing {
                expected: ListingKind::Subreddits,
                found: ListingKind::Users,
                ..
            }
        ));
    }

    #[test]
    fn non_listing_envelope_is_rejected() {
        let root = root(json!({ "kind": "t3", "data": {} }));
        assert!(matches!(
            root.into_posts().unwrap_err(),
            RedditClientError::NotAListing { kind, .. } if kind == "t3"
        ));
    }

    #[test]
    fn unknown_thing_kind_fails_to_decode() {
        let result = serde_json::from_value::<RootListing>(json!({
            "kind": "Listing",
            "data": { "children": [ { "kind": "t1", "data": { "body": "a comment" } } ] }
        }));
        assert!(result.is_err());
    }
}
