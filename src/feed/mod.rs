mod seed;
mod store;

pub use seed::seed_posts;
pub use store::{FeedFilter, FeedStore, LikeOutcome};
