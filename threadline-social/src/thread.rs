//! Reconstruct reply threads from a flat, provider-ordered comment list.
//!
//! A single left-to-right pass resolves each `replied_to_id` against the ids
//! seen so far. Unresolvable references (unknown ids, self references, and
//! forward references to parents emitted later) demote the comment to a root.
//! Providers emit parents before replies, so forward references are rare.
use std::collections::HashMap;

use tracing::debug;

use crate::model::{Comment, ThreadedComment};

struct Node {
    comment: Comment,
    children: Vec<usize>,
}

#[derive(Default)]
pub struct ThreadBuilder {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
    demoted: usize,
}

impl ThreadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, comment: Comment) {
        let slot = self.nodes.len();

        let parent = comment
            .replied_to_id
            .as_deref()
            .and_then(|id| self.index.get(id).copied());
        match (parent, comment.replied_to_id.as_deref()) {
            (Some(parent), _) => self.nodes[parent].children.push(slot),
            (None, Some(missing)) => {
                debug!(
                    comment_id = comment.id.as_deref().unwrap_or(""),
                    replied_to = missing,
                    "reply references unseen parent; treating as root"
                );
                self.demoted += 1;
                self.roots.push(slot);
            }
            (None, None) => self.roots.push(slot),
        }

        // First occurrence of a duplicated id keeps ownership of its replies.
        if let Some(id) = comment.id.as_deref() {
            self.index.entry(id.to_string()).or_insert(slot);
        }

        self.nodes.push(Node {
            comment,
            children: Vec::new(),
        });
    }

    /// Replies whose parent could not be resolved at the time they were seen.
    pub fn demoted(&self) -> usize {
        self.demoted
    }

    pub fn finish(self) -> Vec<ThreadedComment> {
        // Children always sit after their parent, so building from the back
        // guarantees every child is complete before it is attached.
        let mut built: Vec<Option<ThreadedComment>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);

        for (slot, node) in self.nodes.into_iter().enumerate().rev() {
            let replies = node
                .children
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            built[slot] = Some(ThreadedComment {
                comment: node.comment,
                replies,
            });
        }

        self.roots
            .iter()
            .filter_map(|root| built[*root].take())
            .collect()
    }
}

impl Extend<Comment> for ThreadBuilder {
    fn extend<T: IntoIterator<Item = Comment>>(&mut self, iter: T) {
        for comment in iter {
            self.push(comment);
        }
    }
}

/// Build the reply forest for `comments`, preserving first-seen order at
/// every level.
pub fn build_thread<I>(comments: I) -> Vec<ThreadedComment>
where
    I: IntoIterator<Item = Comment>,
{
    let mut builder = ThreadBuilder::new();
    builder.extend(comments);
    if builder.demoted() > 0 {
        debug!(demoted = builder.demoted(), "thread built with demoted replies");
    }
    builder.finish()
}
