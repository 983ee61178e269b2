use super::options::SearchOptions;
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

/// Entity kind to search for, sent as the `type` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    Link,
    Subreddit,
    User,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Link => "link",
            SearchType::Subreddit => "sr",
            SearchType::User => "user",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for one search, one value per key.
///
/// Keys are kept sorted so the encoded query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams(BTreeMap<&'static str, String>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any earlier value
    pub(crate) fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub(crate) fn set_type(&mut self, search_type: SearchType) {
        self.set("type", search_type.as_str());
    }

    pub(crate) fn set_query(&mut self, query: &str) {
        self.set("q", query);
    }

    pub(crate) fn set_restrict(&mut self) {
        self.set("restrict_sr", "true");
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Append encoded `params` to `path`, keeping any query it already has
pub fn add_query(path: &str, params: &SearchParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, params.encode())
}

/// Everything needed to issue one search: where, with what, for which kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub path: String,
    pub params: SearchParams,
    pub search_type: SearchType,
}

impl SearchRequest {
    /// Search posts, limited to `subreddits` when any are given.
    ///
    /// Subreddit names go into the path verbatim, joined with `+`, and are
    /// not percent-encoded. They must be plain subreddit names (letters,
    /// digits and underscores); a `/`, `?` or `#` in a name changes which
    /// resource the request reaches.
    pub fn posts(query: &str, subreddits: &[&str], options: &SearchOptions) -> Self {
        if subreddits.is_empty() {
            Self::build("search".to_string(), SearchType::Link, query, options, false)
        } else {
            let path = format!("r/{}/search", subreddits.join("+"));
            Self::build(path, SearchType::Link, query, options, true)
        }
    }

    pub fn subreddits(query: &str, options: &SearchOptions) -> Self {
        Self::build("search".to_string(), SearchType::Subreddit, query, options, false)
    }

    pub fn users(query: &str, options: &SearchOptions) -> Self {
        Self::build("search".to_string(), SearchType::User, query, options, false)
    }

    fn build(
        path: String,
        search_type: SearchType,
        query: &str,
        options: &SearchOptions,
        restrict: bool,
    ) -> Self {
        let mut params = SearchParams::new();
        // Caller options first; the mandatory keys below never overlap them
        options.apply(&mut params);
        params.set_type(search_type);
        params.set_query(query);
        if restrict {
            params.set_restrict();
        }

        Self {
            path,
            params,
            search_type,
        }
    }

    /// Relative path with the encoded query attached
    pub fn url_path(&self) -> String {
        add_query(&self.path, &self.params)
    }
}
