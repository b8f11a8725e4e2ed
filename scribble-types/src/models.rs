use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// A single scribble as served by the posts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub owner_id: i64,
    pub contents: String,
    #[serde(with = "datetime_format")]
    pub time: DateTime<Utc>,
    pub likes: i64,
    #[serde(default)]
    pub user_has_liked: bool,
    /// Display name, when the server embeds it. Older servers omit it and the
    /// client resolves names through the username endpoint instead.
    #[serde(default)]
    pub username: Option<String>,
}

/// One page of the feed plus the bookkeeping the pagination controls need.
///
/// The posts endpoint answers either with this envelope or, on older server
/// revisions, with a bare post array; a bare array becomes a single full page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "FeedPayload")]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total_pages: u32,
    pub current_page_count: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedPayload {
    Paged {
        posts: Vec<Post>,
        total_pages: u32,
        current_page_count: u32,
    },
    Bare(Vec<Post>),
}

impl From<FeedPayload> for FeedPage {
    fn from(payload: FeedPayload) -> Self {
        match payload {
            FeedPayload::Paged {
                posts,
                total_pages,
                current_page_count,
            } => Self {
                posts,
                total_pages,
                current_page_count,
            },
            FeedPayload::Bare(posts) => {
                let count = posts.len() as u32;
                Self {
                    posts,
                    total_pages: 1,
                    current_page_count: count,
                }
            }
        }
    }
}

// Request/Response types for API

#[derive(Debug, Serialize, Deserialize)]
pub struct NewScribbleRequest {
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditPostRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsernameResponse {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub is_new_like: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowResponse {
    pub is_new_follow: bool,
    pub follower_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
