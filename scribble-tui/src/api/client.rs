use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use crate::route::FeedFilter;
use scribble_types::*;

/// API client for communicating with the Scribble server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    /// CSRF token sent as `X-CSRFToken` on every mutating request.
    csrf_token: Option<String>,
    /// Raw `Cookie` header value carrying the session (and csrftoken) cookies.
    session_cookie: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            csrf_token: None,
            session_cookie: None,
        }
    }

    /// Set the credentials used for authenticated requests.
    pub fn set_credentials(&mut self, csrf_token: Option<String>, session_cookie: Option<String>) {
        self.csrf_token = csrf_token;
        self.session_cookie = session_cookie;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The login page of the site, for the unauthenticated-like redirect.
    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    /// Attach session cookie to any request, if present.
    fn add_session(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(cookie) = &self.session_cookie {
            req.header(reqwest::header::COOKIE, cookie)
        } else {
            req
        }
    }

    /// Attach CSRF header + session cookie; required on all POSTs.
    fn add_csrf(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = self.add_session(req);
        if let Some(token) = &self.csrf_token {
            req.header("X-CSRFToken", token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the server-supplied {"error": ...} message; clean up HTML
            // error pages (e.g., from nginx or the Django debug screen).
            let clean_error = if let Ok(body) = serde_json::from_str::<ErrorResponse>(&error_text) {
                body.error
            } else if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!("Server returned {} error. Please check the server URL.", status.as_u16())
            } else {
                error_text
            };

            match status.as_u16() {
                404 => Err(ApiError::NotFound(clean_error)),
                401 | 403 => Err(ApiError::Unauthorized(clean_error)),
                400 => Err(ApiError::BadRequest(clean_error)),
                _ => Err(ApiError::Api(clean_error)),
            }
        }
    }

    // Feed endpoints

    /// Get one page of the feed for the given filter.
    ///
    /// Accepts both the paginated envelope and the bare-array shape older
    /// servers answer with (see `FeedPage`).
    pub async fn feed(&self, filter: &FeedFilter, page: u32) -> ApiResult<FeedPage> {
        let mut url = format!("{}/api/data/?page={}", self.base_url, page);
        match filter {
            FeedFilter::All => {}
            FeedFilter::Owner(owner_id) => {
                url.push_str(&format!("&owner_id={}", owner_id));
            }
            FeedFilter::Following => {
                url.push_str("&following=true");
            }
        }

        let req = self.add_session(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Resolve a display name by owner id.
    pub async fn username_by_id(&self, owner_id: i64) -> ApiResult<String> {
        let url = format!(
            "{}/api/get_username_by_id/?owner_id={}",
            self.base_url, owner_id
        );
        let response = self.client.get(&url).send().await?;
        let body: UsernameResponse = self.handle_response(response).await?;
        Ok(body.username)
    }

    // Mutation endpoints

    /// Create a new scribble.
    pub async fn post_scribble(&self, contents: String) -> ApiResult<()> {
        let url = format!("{}/api/post_scribble/", self.base_url);
        let request = NewScribbleRequest { contents };
        let req = self.add_csrf(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let _: serde_json::Value = self.handle_response(response).await?;
        Ok(())
    }

    /// Toggle a like on a post. The response says whether a like was added.
    pub async fn toggle_like(&self, post_id: i64) -> ApiResult<LikeResponse> {
        let url = format!("{}/api/update_like/", self.base_url);
        let request = ToggleRequest { id: post_id };
        let req = self.add_csrf(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Toggle following a user. The response carries the fresh counts.
    pub async fn toggle_follow(&self, user_id: i64) -> ApiResult<FollowResponse> {
        let url = format!("{}/api/update_follow/", self.base_url);
        let request = ToggleRequest { id: user_id };
        let req = self.add_csrf(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Replace the contents of an owned post.
    pub async fn edit_post(&self, post_id: i64, content: String) -> ApiResult<()> {
        let url = format!("{}/api/edit_post/{}/", self.base_url, post_id);
        let request = EditPostRequest { content };
        let req = self.add_csrf(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let _: serde_json::Value = self.handle_response(response).await?;
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        let base_url = std::env::var("SCRIBBLE_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        Self::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://example.com/");
        assert_eq!(client.base_url(), "http://example.com");
        assert_eq!(client.login_url(), "http://example.com/login");
    }
}
