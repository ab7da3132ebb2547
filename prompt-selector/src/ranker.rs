//! Most-liked-first ordering of the fetched comments.

use crate::comment::Comment;

/// Sorts by `like_count` descending and keeps the first `top_k`.
///
/// The sort is stable: comments with the same number of likes keep their
/// fetch order, which is the tie-break for every later stage.
pub fn rank(mut comments: Vec<Comment>, top_k: usize) -> Vec<Comment> {
    comments.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    comments.truncate(top_k);
    comments
}
