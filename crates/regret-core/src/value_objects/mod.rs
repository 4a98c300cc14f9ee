//! Value objects - immutable types that represent domain concepts

mod anonymous_id;
mod reaction_bundle;
mod sliding_doors;

pub use anonymous_id::AnonymousId;
pub use reaction_bundle::{ReactionBundle, ReactionKind};
pub use sliding_doors::{SlidingDoors, VoteChoice, VotePercentages};
