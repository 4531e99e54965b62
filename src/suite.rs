//! The posts checks.
//!
//! [`posts_suite`] builds every scenario the crate runs against the posts
//! collection. The inputs are literal: known ids, ids out of range, and the
//! filter fixtures.

use crate::assertions::{
    assert_all_match, assert_at_most, assert_empty, assert_not_empty, JsonSchema, ResponseSpec,
    SchemaError,
};
use crate::config::ApiClientConfig;
use crate::models::PostFilter;
use crate::scenario::{fixtures, FixtureError, Scenario};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Ids of existing posts.
pub const VALID_IDS: [i64; 3] = [1, 50, 100];

/// Ids of existing posts, used as a query parameter.
pub const VALID_FILTER_IDS: [i64; 3] = [1, 100, 50];

/// Ids no post has, looked up by path.
pub const INVALID_LOOKUP_IDS: [i64; 5] = [-1, 0, 101, i32::MAX as i64, i32::MIN as i64];

/// Ids no post has, used as a query parameter.
pub const INVALID_FILTER_IDS: [i64; 4] = [-1, 101, i32::MAX as i64, i32::MIN as i64];

/// A user owning posts.
pub const KNOWN_USER_ID: i64 = 1;

/// A user owning no post.
pub const UNKNOWN_USER_ID: i64 = 100;

/// Page sizes checked through `_limit`.
pub const LIMITS: [u32; 2] = [1, 5];

/// Scenario names, in the order [`posts_suite`] returns them.
pub const SCENARIO_NAMES: [&str; 11] = [
    "get_all_posts",
    "get_post_by_valid_id",
    "get_post_by_invalid_id",
    "filter_by_valid_id",
    "filter_by_invalid_id",
    "filter_by_valid_user_id",
    "filter_by_invalid_user_id",
    "filter_by_valid_parameters",
    "filter_by_invalid_parameters",
    "filter_by_combined_parameters",
    "limit_results",
];

/// Errors raised while assembling the suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("unknown scenario {name:?}; known scenarios: {}", SCENARIO_NAMES.join(", "))]
    UnknownScenario { name: String },
}

/// A combined `id` + `userId` query and whether a post satisfies both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedQuery {
    pub id: i64,
    pub user_id: i64,
    pub expect_match: bool,
}

impl CombinedQuery {
    fn filter(&self) -> PostFilter {
        PostFilter::new().id(self.id).user_id(self.user_id)
    }
}

impl fmt::Display for CombinedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={}&userId={}", self.id, self.user_id)
    }
}

/// Combined queries: post 5 belongs to user 1, post 11 does not.
pub const COMBINED_QUERIES: [CombinedQuery; 2] = [
    CombinedQuery {
        id: 5,
        user_id: 1,
        expect_match: true,
    },
    CombinedQuery {
        id: 11,
        user_id: 1,
        expect_match: false,
    },
];

/// Builds every scenario of the suite.
pub fn posts_suite(config: &ApiClientConfig) -> Result<Vec<Scenario>, SuiteError> {
    let common = Rc::new(ResponseSpec::from_config(config));
    let post_schema = Rc::new(JsonSchema::post()?);
    let list_schema = Rc::new(JsonSchema::post_list()?);
    let fixtures_dir = config.fixtures_dir.as_deref();
    let valid_rows = fixtures::valid_filter_rows(fixtures_dir)?;
    let invalid_rows = fixtures::invalid_filter_rows(fixtures_dir)?;

    let mut scenarios = Vec::with_capacity(SCENARIO_NAMES.len());

    scenarios.push({
        let common = Rc::clone(&common);
        let list_schema = Rc::clone(&list_schema);
        Scenario::single("get_all_posts", move |client| {
            client
                .list_all()?
                .then()
                .status(200)?
                .spec(&common)?
                .matches_schema(&list_schema)?
                .list_not_empty()?;
            Ok(())
        })
    });

    scenarios.push({
        let common = Rc::clone(&common);
        let post_schema = Rc::clone(&post_schema);
        Scenario::parameterized("get_post_by_valid_id", VALID_IDS, move |client, id| {
            client
                .get_post(*id)?
                .then()
                .status(200)?
                .spec(&common)?
                .matches_schema(&post_schema)?
                .field_equals("id", *id)?;
            Ok(())
        })
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized(
            "get_post_by_invalid_id",
            INVALID_LOOKUP_IDS,
            move |client, id| {
                client
                    .get_post(*id)?
                    .then()
                    .status(404)?
                    .spec(&common)?
                    .body_is_empty()?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized("filter_by_valid_id", VALID_FILTER_IDS, move |client, id| {
            let filter = PostFilter::new().id(*id);
            let response = client.list_posts(&filter)?;
            let posts = response
                .then()
                .status(200)?
                .spec(&common)?
                .extract_posts()?;
            assert_not_empty(&posts)?;
            assert_at_most(&posts, 1)?;
            assert_all_match(&posts, &filter)?;
            Ok(())
        })
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized(
            "filter_by_invalid_id",
            INVALID_FILTER_IDS,
            move |client, id| {
                client
                    .list_posts(&PostFilter::new().id(*id))?
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .list_size(0)?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        let list_schema = Rc::clone(&list_schema);
        Scenario::parameterized(
            "filter_by_valid_user_id",
            [KNOWN_USER_ID],
            move |client, user_id| {
                let filter = PostFilter::new().user_id(*user_id);
                let response = client.list_posts(&filter)?;
                let posts = response
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .matches_schema(&list_schema)?
                    .extract_posts()?;
                assert_not_empty(&posts)?;
                assert_all_match(&posts, &filter)?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized(
            "filter_by_invalid_user_id",
            [UNKNOWN_USER_ID],
            move |client, user_id| {
                let response = client.list_posts(&PostFilter::new().user_id(*user_id))?;
                let posts = response
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .extract_posts()?;
                assert_empty(&posts)?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        let list_schema = Rc::clone(&list_schema);
        Scenario::parameterized(
            "filter_by_valid_parameters",
            valid_rows,
            move |client, row| {
                let filter = row.to_filter();
                let response = client.list_posts(&filter)?;
                let posts = response
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .matches_schema(&list_schema)?
                    .extract_posts()?;
                assert_not_empty(&posts)?;
                assert_all_match(&posts, &filter)?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized(
            "filter_by_invalid_parameters",
            invalid_rows,
            move |client, row| {
                client
                    .list_posts(&row.to_filter())?
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .list_size(0)?;
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized(
            "filter_by_combined_parameters",
            COMBINED_QUERIES,
            move |client, query| {
                let filter = query.filter();
                let response = client.list_posts(&filter)?;
                let posts = response
                    .then()
                    .status(200)?
                    .spec(&common)?
                    .extract_posts()?;
                if query.expect_match {
                    assert_not_empty(&posts)?;
                    assert_at_most(&posts, 1)?;
                    assert_all_match(&posts, &filter)?;
                } else {
                    assert_empty(&posts)?;
                }
                Ok(())
            },
        )
    });

    scenarios.push({
        let common = Rc::clone(&common);
        Scenario::parameterized("limit_results", LIMITS, move |client, limit| {
            let response = client.list_posts(&PostFilter::new().limit(*limit))?;
            let posts = response
                .then()
                .status(200)?
                .spec(&common)?
                .extract_posts()?;
            assert_not_empty(&posts)?;
            assert_at_most(&posts, *limit as usize)?;
            Ok(())
        })
    });

    Ok(scenarios)
}

/// Keeps the scenarios named in `names`, in suite order. An empty selection
/// keeps everything.
pub fn select(scenarios: Vec<Scenario>, names: &[String]) -> Result<Vec<Scenario>, SuiteError> {
    if names.is_empty() {
        return Ok(scenarios);
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !SCENARIO_NAMES.contains(&name.as_str()))
    {
        return Err(SuiteError::UnknownScenario {
            name: unknown.clone(),
        });
    }

    Ok(scenarios
        .into_iter()
        .filter(|scenario| names.iter().any(|name| name == scenario.name()))
        .collect())
}
