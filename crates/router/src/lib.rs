//! `homestay-router`: route table and the navigation guard.
//!
//! The guard is a pure decision over a target route and the session flags.
//! It performs no IO and never mutates the session.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{Decision, GuardOutcome, GuardRule, Transition, decide, explain};
pub use navigator::{MAX_REDIRECTS, NavigationError, NavigationOutcome, Navigator};
pub use routes::{ROUTES, ResolvedRoute, RouteDescriptor, RouteName, resolve};
