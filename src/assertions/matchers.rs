//! Field-level checks over decoded post records.

use super::AssertionError;
use crate::models::filter::abbreviate;
use crate::models::{Post, PostFilter};

/// At least one record was returned.
pub fn assert_not_empty(posts: &[Post]) -> Result<(), AssertionError> {
    if posts.is_empty() {
        return Err(AssertionError::UnexpectedEmpty);
    }
    Ok(())
}

/// No record was returned.
pub fn assert_empty(posts: &[Post]) -> Result<(), AssertionError> {
    if !posts.is_empty() {
        return Err(AssertionError::UnexpectedCount {
            expected: "0".to_string(),
            actual: posts.len(),
        });
    }
    Ok(())
}

/// At most `limit` records were returned.
pub fn assert_at_most(posts: &[Post], limit: usize) -> Result<(), AssertionError> {
    if posts.len() > limit {
        return Err(AssertionError::UnexpectedCount {
            expected: format!("at most {}", limit),
            actual: posts.len(),
        });
    }
    Ok(())
}

/// Every record satisfies every field-level parameter of `filter`.
pub fn assert_all_match(posts: &[Post], filter: &PostFilter) -> Result<(), AssertionError> {
    for (index, post) in posts.iter().enumerate() {
        if !filter.matches(post) {
            return Err(AssertionError::RecordMismatch {
                index,
                id: post.id,
                reason: describe_mismatch(filter, post),
            });
        }
    }
    Ok(())
}

/// Every record satisfies `predicate`; `description` names the expectation
/// in the failure message.
pub fn assert_all<F>(posts: &[Post], description: &str, predicate: F) -> Result<(), AssertionError>
where
    F: Fn(&Post) -> bool,
{
    match posts.iter().position(|post| !predicate(post)) {
        Some(index) => Err(AssertionError::RecordMismatch {
            index,
            id: posts[index].id,
            reason: format!("does not satisfy: {}", description),
        }),
        None => Ok(()),
    }
}

fn describe_mismatch(filter: &PostFilter, post: &Post) -> String {
    let mut differences = Vec::new();

    if let Some(id) = filter.id.filter(|id| *id != post.id) {
        differences.push(format!("id {} != {}", post.id, id));
    }
    if let Some(user_id) = filter.user_id.filter(|user_id| *user_id != post.user_id) {
        differences.push(format!("userId {} != {}", post.user_id, user_id));
    }
    if let Some(title) = filter.title.as_ref().filter(|title| **title != post.title) {
        differences.push(format!(
            "title {:?} != {:?}",
            abbreviate(&post.title, 40),
            abbreviate(title, 40)
        ));
    }
    if let Some(body) = filter.body.as_ref().filter(|body| **body != post.body) {
        differences.push(format!(
            "body {:?} != {:?}",
            abbreviate(&post.body, 40),
            abbreviate(body, 40)
        ));
    }

    format!("does not match filter: {}", differences.join(", "))
}
