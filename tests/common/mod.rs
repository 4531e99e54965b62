//! Shared test infrastructure: an in-process fake of the posts API.
//!
//! The fake serves 100 posts, ten per user, the way the public service does:
//! `/posts` filters on `id`, `userId`, `title` and `body` and honours
//! `_limit`; `/posts/{id}` answers 404 with `{}` for unknown ids.

#![allow(dead_code)]

use posts_api_check::client::PostsClient;
use posts_api_check::config::ApiClientConfig;
use posts_api_check::models::Post;
use posts_api_check::scenario::fixtures;
use std::sync::Arc;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// The fake's data set. Posts 1 to 3 carry the texts of the bundled filter
/// fixture so valid rows find them.
pub fn sample_posts() -> Vec<Post> {
    let rows = fixtures::valid_filter_rows(None).expect("bundled fixture parses");

    (1..=100)
        .map(|id: i64| {
            let user_id = (id - 1) / 10 + 1;
            match rows.get((id - 1) as usize) {
                Some(row) => Post::new(id, user_id, row.title.clone(), row.body.clone()),
                None => Post::new(
                    id,
                    user_id,
                    format!("post {} title", id),
                    format!("post {} body\nsecond line", id),
                ),
            }
        })
        .collect()
}

/// Responder emulating the posts collection.
#[derive(Clone)]
pub struct FakePostsApi {
    posts: Arc<Vec<Post>>,
    ignore_filters: bool,
    duplicate_records: bool,
    content_type: String,
}

impl FakePostsApi {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(sample_posts()),
            ignore_filters: false,
            duplicate_records: false,
            content_type: JSON_UTF8.to_string(),
        }
    }

    /// A backend that answers every collection query with every post.
    pub fn ignoring_filters() -> Self {
        Self {
            ignore_filters: true,
            ..Self::new()
        }
    }

    /// A backend listing every selected record twice.
    pub fn duplicating_records() -> Self {
        Self {
            duplicate_records: true,
            ..Self::new()
        }
    }

    /// A backend labelling its bodies with another content type.
    pub fn with_content_type(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            ..Self::new()
        }
    }

    fn json(&self, status: u16, body: String) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.into_bytes(), &self.content_type)
    }

    fn single(&self, raw_id: &str) -> ResponseTemplate {
        let found = raw_id
            .parse::<i64>()
            .ok()
            .and_then(|id| self.posts.iter().find(|post| post.id == id));

        match found {
            Some(post) => self.json(200, serde_json::to_string(post).unwrap()),
            None => self.json(404, "{}".to_string()),
        }
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let mut selected: Vec<&Post> = self.posts.iter().collect();
        let mut limit = None;

        if !self.ignore_filters {
            for (name, value) in request.url.query_pairs() {
                match name.as_ref() {
                    "id" => {
                        let id = value.parse::<i64>().ok();
                        selected.retain(|post| Some(post.id) == id);
                    }
                    "userId" => {
                        let user_id = value.parse::<i64>().ok();
                        selected.retain(|post| Some(post.user_id) == user_id);
                    }
                    "title" => selected.retain(|post| post.title == value),
                    "body" => selected.retain(|post| post.body == value),
                    "_limit" => limit = value.parse::<usize>().ok(),
                    _ => {}
                }
            }
        }

        if let Some(limit) = limit {
            selected.truncate(limit);
        }

        if self.duplicate_records {
            selected = selected.into_iter().flat_map(|post| [post, post]).collect();
        }

        self.json(200, serde_json::to_string(&selected).unwrap())
    }
}

impl Respond for FakePostsApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request.url.path().trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["posts"] => self.list(request),
            ["posts", id] => self.single(id),
            _ => self.json(404, "{}".to_string()),
        }
    }
}

/// A running fake server. The server runs on its own thread; the runtime is
/// only needed to start it.
pub struct FakeServer {
    server: MockServer,
    _runtime: tokio::runtime::Runtime,
}

impl FakeServer {
    pub fn start(api: FakePostsApi) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build runtime");

        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path_regex(r"^/posts(/[^/]*)?$"))
                .respond_with(api)
                .mount(&server)
                .await;
            server
        });

        Self {
            server,
            _runtime: runtime,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.uri(),
            timeout: 5000,
            log_exchanges: false,
            ..Default::default()
        }
    }

    pub fn client(&self) -> PostsClient {
        PostsClient::from_config(&self.config()).expect("client builds")
    }
}
