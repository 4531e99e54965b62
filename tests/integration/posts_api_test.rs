//! Posts checks driven directly through the client against the fake backend.

use crate::common::{FakePostsApi, FakeServer, JSON_UTF8};
use posts_api_check::assertions::{
    assert_all_match, assert_at_most, assert_empty, assert_not_empty, AssertionError, JsonSchema,
    ResponseSpec,
};
use posts_api_check::models::PostFilter;
use posts_api_check::scenario::fixtures;

fn common_spec() -> ResponseSpec {
    ResponseSpec::new().content_type(JSON_UTF8)
}

#[test]
fn test_get_all_posts() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();
    let schema = JsonSchema::post_list().unwrap();

    let response = client.list_all().unwrap();
    let posts = response
        .then()
        .status(200)
        .unwrap()
        .spec(&common_spec())
        .unwrap()
        .matches_schema(&schema)
        .unwrap()
        .list_not_empty()
        .unwrap()
        .extract_posts()
        .unwrap();

    assert_eq!(posts.len(), 100);
    assert!(response.duration.as_secs() < 5);
}

#[test]
fn test_get_post_by_valid_id() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();
    let schema = JsonSchema::post().unwrap();

    for id in [1, 50, 100] {
        let response = client.get_post(id).unwrap();
        let post = response
            .then()
            .status(200)
            .unwrap()
            .spec(&common_spec())
            .unwrap()
            .matches_schema(&schema)
            .unwrap()
            .field_equals("id", id)
            .unwrap()
            .extract_post()
            .unwrap();
        assert_eq!(post.id, id, "post {} came back as {}", id, post.id);
    }
}

#[test]
fn test_get_post_by_invalid_id() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    for id in [-1, 0, 101, i32::MAX as i64, i32::MIN as i64] {
        let response = client.get_post(id).unwrap();
        assert_eq!(response.status_code, 404, "id {}", id);
        assert_eq!(response.body_text(), "{}");
        response
            .then()
            .status(404)
            .unwrap()
            .spec(&common_spec())
            .unwrap()
            .body_is_empty()
            .unwrap();
    }
}

#[test]
fn test_filter_by_valid_id() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    for id in [1, 100, 50] {
        let filter = PostFilter::new().id(id);
        let posts = client
            .list_posts(&filter)
            .unwrap()
            .then()
            .status(200)
            .unwrap()
            .extract_posts()
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_all_match(&posts, &filter).unwrap();
    }
}

#[test]
fn test_filter_by_invalid_id() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    for id in [-1, 101, i32::MAX as i64, i32::MIN as i64] {
        client
            .list_posts(&PostFilter::new().id(id))
            .unwrap()
            .then()
            .status(200)
            .unwrap()
            .spec(&common_spec())
            .unwrap()
            .list_size(0)
            .unwrap();
    }
}

#[test]
fn test_filter_by_user_id() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    let filter = PostFilter::new().user_id(1);
    let posts = client.list_posts(&filter).unwrap().posts().unwrap();
    assert_eq!(posts.len(), 10);
    assert_not_empty(&posts).unwrap();
    assert_all_match(&posts, &filter).unwrap();

    let posts = client
        .list_posts(&PostFilter::new().user_id(100))
        .unwrap()
        .posts()
        .unwrap();
    assert_empty(&posts).unwrap();
}

#[test]
fn test_filter_by_fixture_rows() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    for row in fixtures::valid_filter_rows(None).unwrap() {
        let filter = row.to_filter();
        let posts = client.list_posts(&filter).unwrap().posts().unwrap();
        assert_eq!(posts.len(), 1, "row {}", row);
        assert_all_match(&posts, &filter).unwrap();
    }

    for row in fixtures::invalid_filter_rows(None).unwrap() {
        let posts = client.list_posts(&row.to_filter()).unwrap().posts().unwrap();
        assert!(posts.is_empty(), "row {} matched {:?}", row, posts);
    }
}

#[test]
fn test_filter_by_combined_parameters() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    let filter = PostFilter::new().id(5).user_id(1);
    let posts = client.list_posts(&filter).unwrap().posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_all_match(&posts, &filter).unwrap();

    let posts = client
        .list_posts(&PostFilter::new().id(11).user_id(1))
        .unwrap()
        .posts()
        .unwrap();
    assert_empty(&posts).unwrap();
}

#[test]
fn test_limit_results() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    for limit in [1, 5] {
        let posts = client
            .list_posts(&PostFilter::new().limit(limit))
            .unwrap()
            .posts()
            .unwrap();
        assert_not_empty(&posts).unwrap();
        assert_at_most(&posts, limit as usize).unwrap();
        assert_eq!(posts.len(), limit as usize);
    }
}

#[test]
fn test_wrong_content_type_is_reported() {
    let server = FakeServer::start(FakePostsApi::with_content_type("text/plain"));
    let client = server.client();

    let response = client.get_post(1).unwrap();
    let err = response
        .then()
        .status(200)
        .unwrap()
        .spec(&common_spec())
        .unwrap_err();

    assert_eq!(
        err,
        AssertionError::ContentTypeMismatch {
            expected: JSON_UTF8.to_string(),
            actual: Some("text/plain".to_string()),
        }
    );
}

#[test]
fn test_status_mismatch_carries_body() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();

    let response = client.get_post(101).unwrap();
    match response.then().status(200) {
        Err(AssertionError::StatusMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 200);
            assert_eq!(actual, 404);
        }
        other => panic!("Expected StatusMismatch, got {:?}", other.map(|_| ())),
    }
}
