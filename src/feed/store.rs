use serde::{Deserialize, Serialize};

use crate::models::{CommunityNote, Post};

use super::seed::seed_posts;

/// Discover tab filters over the feed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FeedFilter {
    #[default]
    All,
    /// Only Local/Wild provenance.
    Wild,
    /// Most liked first.
    Trending,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    pub post_id: String,
    pub likes: u32,
    pub is_liked: bool,
}

/// Newest-first collection of posts; the only shared mutable store in the app.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    posts: Vec<Post>,
}

impl FeedStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn seeded() -> Self {
        Self::new(seed_posts())
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    fn get_mut(&mut self, post_id: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == post_id)
    }

    /// Flips the like flag and moves the counter with it. `None` when no post
    /// has that id.
    pub fn toggle_like(&mut self, post_id: &str) -> Option<LikeOutcome> {
        let post = self.get_mut(post_id)?;
        if post.is_liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes = post.likes.saturating_add(1);
        }
        post.is_liked = !post.is_liked;

        Some(LikeOutcome {
            post_id: post.id.clone(),
            likes: post.likes,
            is_liked: post.is_liked,
        })
    }

    /// Appends to the end of the post's notes. Returns false for an unknown id.
    pub fn append_note(&mut self, post_id: &str, note: CommunityNote) -> bool {
        match self.get_mut(post_id) {
            Some(post) => {
                post.community_notes.push(note);
                true
            }
            None => false,
        }
    }

    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    pub fn filtered(&self, filter: FeedFilter) -> Vec<Post> {
        match filter {
            FeedFilter::All => self.posts.clone(),
            FeedFilter::Wild => self
                .posts
                .iter()
                .filter(|post| post.provenance.is_wild())
                .cloned()
                .collect(),
            FeedFilter::Trending => {
                let mut posts = self.posts.clone();
                posts.sort_by(|a, b| b.likes.cmp(&a.likes));
                posts
            }
        }
    }

    pub fn count_by_author(&self, author: &str) -> usize {
        self.posts.iter().filter(|post| post.user == author).count()
    }
}
