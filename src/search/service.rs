use super::options::SearchOptions;
use super::params::SearchRequest;
use crate::client::{RedditClient, RedditClientError, Response};
use crate::models::{Posts, RootListing, Subreddits, Users};
use log::debug;
use reqwest::Method;

/// Searches for posts, subreddits and users through a `RedditClient`.
///
/// For NSFW results to be included, the authenticated account must enable
/// "include not safe for work (NSFW) search results in searches" in its
/// preferences.
///
/// Every failure, from building the request to decoding the listing, is
/// returned as produced. When the server answered, the error carries the
/// response metadata (see [`RedditClientError::response`]).
pub struct SearchService<'a> {
    client: &'a RedditClient,
}

impl<'a> SearchService<'a> {
    pub fn new(client: &'a RedditClient) -> Self {
        Self { client }
    }

    /// Search posts. An empty `subreddits` slice searches all of Reddit.
    pub async fn posts(
        &self,
        query: &str,
        subreddits: &[&str],
        options: &SearchOptions,
    ) -> Result<(Posts, Response), RedditClientError> {
        let (root, response) = self
            .dispatch(SearchRequest::posts(query, subreddits, options))
            .await?;
        project(root, response, RootListing::into_posts)
    }

    /// Search subreddits. Sort and time window have no effect on the results.
    pub async fn subreddits(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Subreddits, Response), RedditClientError> {
        let (root, response) = self
            .dispatch(SearchRequest::subreddits(query, options))
            .await?;
        project(root, response, RootListing::into_subreddits)
    }

    /// Search users. Sort and time window have no effect on the results.
    pub async fn users(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Users, Response), RedditClientError> {
        let (root, response) = self.dispatch(SearchRequest::users(query, options)).await?;
        project(root, response, RootListing::into_users)
    }

    async fn dispatch(
        &self,
        search: SearchRequest,
    ) -> Result<(RootListing, Response), RedditClientError> {
        let path = search.url_path();
        debug!("Searching type={} at {}", search.search_type, path);

        let request = self.client.new_request(Method::GET, &path, None)?;
        self.client.execute(request).await
    }
}

// Shape errors come from a 200 response, so they keep its metadata
fn project<T>(
    root: RootListing,
    response: Response,
    into: impl FnOnce(RootListing) -> Result<T, RedditClientError>,
) -> Result<(T, Response), RedditClientError> {
    match into(root) {
        Ok(collection) => Ok((collection, response)),
        Err(err) => Err(err.with_response(response)),
    }
}
