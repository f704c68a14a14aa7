//! Navigation oracle for CIVICA 144.
//!
//! Two small, pure lookups that sit next to the guardian session:
//!
//! - **Routes** ([`Route`], [`ClusterId`], [`route_for_cluster`]): which
//!   view a path or a compass cluster leads to, and whether that view
//!   needs a session.
//! - **Lunar phase** ([`LunarPhase`]): the portal's toy moon, bucketed
//!   from the day of the month.
//!
//! Nothing here touches state; the route guard that combines these with a
//! session lives in the `civica` crate.

mod lunar;
mod route;

pub use lunar::LunarPhase;
pub use route::{route_for_cluster, ClusterId, Route};
