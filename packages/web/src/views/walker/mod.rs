//! Walker section: duty toggle, walk queues, reviews.

mod home;
mod reviews;
mod walk_detail;
mod walks;

pub use home::WalkerHome;
pub use reviews::WalkerReviews;
pub use walk_detail::WalkerWalkDetail;
pub use walks::WalkerWalks;
