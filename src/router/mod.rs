//! Route table and navigation guard.

mod guard;
mod route;

pub use guard::{decide, Outcome};
pub use route::{default_routes, NavigationRequest, RouteDescriptor, RouteMeta, Router, View};
