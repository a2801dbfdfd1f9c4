//! Path-pattern routing.
//!
//! # Responsibilities
//! - Match a request path against patterns in declaration order
//! - Gate the matched route on the request method
//! - Invoke the resolved handler and turn its outcome into one response
//!
//! # Design Decisions
//! - First match wins, no "most specific" resolution
//! - Matching is anchored at both ends, never a prefix match
//! - No regex: a pattern is an exact literal or a literal prefix plus one
//!   trailing segment

pub mod pattern;
pub mod router;

pub use pattern::{Pattern, RouteMatch};
pub use router::{Dispatch, Route, Router};
