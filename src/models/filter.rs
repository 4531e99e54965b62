//! Query filters for the `/posts` collection.

use super::post::Post;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter carrying the page size understood by the service.
pub const LIMIT_PARAM: &str = "_limit";

/// Filter applied to a `GET /posts` request.
///
/// Each set field becomes one query parameter. The service returns only
/// records matching every parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilter {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub limit: Option<u32>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.user_id.is_none()
            && self.title.is_none()
            && self.body.is_none()
            && self.limit.is_none()
    }

    /// Renders the filter as query pairs, in the order
    /// `id`, `userId`, `title`, `body`, `_limit`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.id {
            pairs.push(("id", id.to_string()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("userId", user_id.to_string()));
        }
        if let Some(title) = &self.title {
            pairs.push(("title", title.clone()));
        }
        if let Some(body) = &self.body {
            pairs.push(("body", body.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push((LIMIT_PARAM, limit.to_string()));
        }
        pairs
    }

    /// Checks whether `post` satisfies every field-level parameter.
    ///
    /// `limit` restricts the size of a result, not its members, and is
    /// ignored here.
    pub fn matches(&self, post: &Post) -> bool {
        self.id.map_or(true, |id| post.id == id)
            && self.user_id.map_or(true, |user_id| post.user_id == user_id)
            && self.title.as_ref().map_or(true, |title| &post.title == title)
            && self.body.as_ref().map_or(true, |body| &post.body == body)
    }
}

impl fmt::Display for PostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(no filter)");
        }

        let rendered: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, abbreviate(&value, 24)))
            .collect();
        write!(f, "{}", rendered.join("&"))
    }
}

/// Shortens long values for labels, keeping them on one line.
pub(crate) fn abbreviate(value: &str, max_chars: usize) -> String {
    let single_line = value.replace('\n', "\\n");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let head: String = single_line.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
