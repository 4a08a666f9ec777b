//! Layered request authorization.
//!
//! A request touching a team sub-resource is allowed only when the caller is
//! a member of the team *and* the resource id is owned by that team. The
//! resource lookup never runs for non-members.

mod guards;
mod membership;
mod ownership;

pub use guards::{require_membership, require_ownership};
pub use membership::MembershipChecker;
pub use ownership::{OwnedResource, ResourceOwnershipChecker};
