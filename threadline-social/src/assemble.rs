use serde::Serialize;
use serde_json::Value;

use crate::model::{Comment, Post, ThreadedComment};

/// Comments as delivered to the caller: a flat batch-scrape list or a
/// threaded forest from live fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommentSet {
    Flat(Vec<Comment>),
    Threaded(Vec<ThreadedComment>),
}

impl CommentSet {
    /// Top-level entries (roots, for a threaded set).
    pub fn len(&self) -> usize {
        match self {
            CommentSet::Flat(c) => c.len(),
            CommentSet::Threaded(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Comment>> for CommentSet {
    fn from(comments: Vec<Comment>) -> Self {
        CommentSet::Flat(comments)
    }
}

impl From<Vec<ThreadedComment>> for CommentSet {
    fn from(forest: Vec<ThreadedComment>) -> Self {
        CommentSet::Threaded(forest)
    }
}

/// Response envelope: `{post, comments}` for the batch path or
/// `{insights, comments}` for the live path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Value>,
    pub comments: CommentSet,
}

/// Structural composition only; insights pass through untouched.
///
/// ```
/// use threadline_social::{assemble_result, Comment};
///
/// let env = assemble_result(None, Vec::<Comment>::new(), Some(serde_json::json!({ "reach": 10 })));
/// let out = serde_json::to_value(&env).unwrap();
/// assert_eq!(out, serde_json::json!({ "insights": { "reach": 10 }, "comments": [] }));
/// ```
pub fn assemble_result(
    post: Option<Post>,
    comments: impl Into<CommentSet>,
    insights: Option<Value>,
) -> ResultEnvelope {
    ResultEnvelope {
        post,
        insights,
        comments: comments.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::build_thread;
    use crate::timestamp::epoch;
    use serde_json::json;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: Some(id.into()),
            user: Some("u".into()),
            headline: String::new(),
            profile_url: String::new(),
            comment_link: None,
            text: None,
            likes: 1,
            created_at: epoch(),
            replied_to_id: parent.map(Into::into),
            has_liked: None,
            replies_count: 0,
            replies: Vec::new(),
        }
    }

    #[test]
    fn post_envelope_serializes_without_insights() {
        let post = Post {
            post_id: "p".into(),
            kind: "IMAGE".into(),
            author: "A".into(),
            author_headline: String::new(),
            author_profile_url: "https://www.linkedin.com/in/".into(),
            created_at: epoch(),
            display_url: None,
            likes: 0,
            comments_count: 1,
        };
        let env = assemble_result(Some(post), vec![comment("c", None)], None);
        let out = serde_json::to_value(&env).unwrap();

        assert!(out.get("insights").is_none());
        assert_eq!(out["post"]["type"], "IMAGE");
        assert_eq!(out["post"]["created_at"], "1970-01-01T00:00:00Z");
        assert_eq!(out["post"]["display_url"], Value::Null);
        assert_eq!(out["comments"][0]["id"], "c");
        assert!(out["comments"][0].get("replied_to_id").is_none());
    }

    #[test]
    fn threaded_comments_nest_under_replies() {
        let forest = build_thread(vec![comment("1", None), comment("2", Some("1"))]);
        let env = assemble_result(None, forest, Some(json!({ "impressions": 42 })));
        assert_eq!(env.comments.len(), 1);

        let out = serde_json::to_value(&env).unwrap();
        assert_eq!(out["insights"]["impressions"], 42);
        assert_eq!(out["comments"][0]["comment"]["id"], "1");
        assert_eq!(out["comments"][0]["replies"][0]["comment"]["replied_to_id"], "1");
    }
}
