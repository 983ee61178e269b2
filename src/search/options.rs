//! Search modifiers callers can combine freely.
//!
//! Every setter targets exactly one query parameter; calling a setter again
//! replaces the earlier value, so the last call wins.

use super::params::SearchParams;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A sort mode or time window literal Reddit does not know
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

/// Result ordering, sent as the `sort` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Sort {
    Hot,
    Best,
    New,
    Rising,
    Controversial,
    Top,
    Relevance,
    /// Highest number of comments first
    Comments,
}

impl Sort {
    pub const ALL: [Sort; 8] = [
        Sort::Hot,
        Sort::Best,
        Sort::New,
        Sort::Rising,
        Sort::Controversial,
        Sort::Top,
        Sort::Relevance,
        Sort::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::Best => "best",
            Sort::New => "new",
            Sort::Rising => "rising",
            Sort::Controversial => "controversial",
            Sort::Top => "top",
            Sort::Relevance => "relevance",
            Sort::Comments => "comments",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| ParseOptionError {
                kind: "sort",
                value: s.to_string(),
            })
    }
}

/// Time window, sent as the `t` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Timespan {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Timespan {
    pub const ALL: [Timespan; 6] = [
        Timespan::Hour,
        Timespan::Day,
        Timespan::Week,
        Timespan::Month,
        Timespan::Year,
        Timespan::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timespan::Hour => "hour",
            Timespan::Day => "day",
            Timespan::Week => "week",
            Timespan::Month => "month",
            Timespan::Year => "year",
            Timespan::All => "all",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timespan::ALL
            .into_iter()
            .find(|timespan| timespan.as_str() == s)
            .ok_or_else(|| ParseOptionError {
                kind: "timespan",
                value: s.to_string(),
            })
    }
}

/// Optional search modifiers.
///
/// ```
/// use redsearch::search::SearchOptions;
///
/// let options = SearchOptions::new()
///     .limit(25)
///     .after("t3_abc")
///     .sort_by_top()
///     .from_past_week();
/// ```
///
/// Reddit ignores the sort and time window when searching subreddits or
/// users; they are still sent so the request reflects what was asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    after: Option<String>,
    before: Option<String>,
    limit: Option<u32>,
    sort: Option<Sort>,
    timespan: Option<Timespan>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after the given fullname cursor, passed through unchecked
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Continue before the given fullname cursor, passed through unchecked
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Maximum number of results per page.
    ///
    /// Reddit's handling of this is inconsistent: `limit(1)` sometimes
    /// yields no results at all. The value is sent as given.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn sort_by_hot(self) -> Self {
        self.sort(Sort::Hot)
    }

    pub fn sort_by_best(self) -> Self {
        self.sort(Sort::Best)
    }

    pub fn sort_by_new(self) -> Self {
        self.sort(Sort::New)
    }

    pub fn sort_by_rising(self) -> Self {
        self.sort(Sort::Rising)
    }

    pub fn sort_by_controversial(self) -> Self {
        self.sort(Sort::Controversial)
    }

    pub fn sort_by_top(self) -> Self {
        self.sort(Sort::Top)
    }

    pub fn sort_by_relevance(self) -> Self {
        self.sort(Sort::Relevance)
    }

    pub fn sort_by_comments(self) -> Self {
        self.sort(Sort::Comments)
    }

    pub fn timespan(mut self, timespan: Timespan) -> Self {
        self.timespan = Some(timespan);
        self
    }

    pub fn from_past_hour(self) -> Self {
        self.timespan(Timespan::Hour)
    }

    pub fn from_past_day(self) -> Self {
        self.timespan(Timespan::Day)
    }

    pub fn from_past_week(self) -> Self {
        self.timespan(Timespan::Week)
    }

    pub fn from_past_month(self) -> Self {
        self.timespan(Timespan::Month)
    }

    pub fn from_past_year(self) -> Self {
        self.timespan(Timespan::Year)
    }

    pub fn from_all_time(self) -> Self {
        self.timespan(Timespan::All)
    }

    /// Write the set options into `params`, overwriting existing keys
    pub(crate) fn apply(&self, params: &mut SearchParams) {
        if let Some(after) = &self.after {
            params.set("after", after.as_str());
        }
        if let Some(before) = &self.before {
            params.set("before", before.as_str());
        }
        if let Some(limit) = self.limit {
            params.set("limit", limit.to_string());
        }
        if let Some(sort) = self.sort {
            params.set("sort", sort.as_str());
        }
        if let Some(timespan) = self.timespan {
            params.set("t", timespan.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(options: &SearchOptions) -> SearchParams {
        let mut params = SearchParams::new();
        options.apply(&mut params);
        params
    }

    #[test]
    fn empty_options_set_nothing() {
        assert!(params(&SearchOptions::new()).is_empty());
    }

    #[test]
    fn later_sort_wins() {
        let options = SearchOptions::new().sort_by_hot().sort_by_new();
        let params = params(&options);
        assert_eq!(params.get("sort"), Some("new"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn same_sort_twice_keeps_one_value() {
        let options = SearchOptions::new().sort_by_top().sort_by_top();
        assert_eq!(params(&options).get("sort"), Some("top"));
    }

    #[test]
    fn later_timespan_wins() {
        let options = SearchOptions::new().from_past_hour().from_all_time();
        assert_eq!(params(&options).get("t"), Some("all"));
    }

    #[test]
    fn every_sort_maps_to_its_literal() {
        let literals: Vec<&str> = Sort::ALL.iter().map(Sort::as_str).collect();
        assert_eq!(
            literals,
            ["hot", "best", "new", "rising", "controversial", "top", "relevance", "comments"]
        );
        for sort in Sort::ALL {
            assert_eq!(params(&SearchOptions::new().sort(sort)).get("sort"), Some(sort.as_str()));
        }
    }

    #[test]
    fn every_timespan_maps_to_its_literal() {
        let literals: Vec<&str> = Timespan::ALL.iter().map(Timespan::as_str).collect();
        assert_eq!(literals, ["hour", "day", "week", "month", "year", "all"]);
    }

    #[test]
    fn limit_one_is_passed_through() {
        assert_eq!(params(&SearchOptions::new().limit(1)).get("limit"), Some("1"));
    }

    #[test]
    fn cursors_are_set_verbatim() {
        let options = SearchOptions::new().after("not a cursor?").before("t3_xyz");
        let params = params(&options);
        assert_eq!(params.get("after"), Some("not a cursor?"));
        assert_eq!(params.get("before"), Some("t3_xyz"));
    }

    #[test]
    fn options_are_reusable() {
        let options = SearchOptions::new().limit(10).sort_by_new();
        assert_eq!(params(&options), params(&options.clone()));
    }

    #[test]
    fn sort_and_timespan_parse_from_literals() {
        assert_eq!("controversial".parse::<Sort>(), Ok(Sort::Controversial));
        assert_eq!("year".parse::<Timespan>(), Ok(Timespan::Year));

        let err = "ancient".parse::<Timespan>().unwrap_err();
        assert_eq!(err.to_string(), "unknown timespan `ancient`");
    }
}
