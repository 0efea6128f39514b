use crate::identity::SessionState;

use super::route::RouteDescriptor;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/";
/// Fallback for authenticated users whose role does not match the route.
pub const ROLE_FALLBACK_PATH: &str = "/teams";

/// Result of a navigation decision. `decide` itself only produces `Proceed`
/// or `Redirect`; `NotFound` comes from route resolution in
/// [`super::Router::navigate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    Redirect(String),
    NotFound,
}

/// Pure access-control decision for one route transition. The session
/// snapshot is the sole oracle; evaluation order matters: the
/// authentication check wins over the role check, so an anonymous user
/// asking for an admin route lands on the login page, not the fallback.
pub fn decide(route: &RouteDescriptor, session: &SessionState) -> Outcome {
    if route.meta.requires_auth && session.user.is_none() {
        return Outcome::Redirect(LOGIN_PATH.to_string());
    }
    if let Some(required) = route.meta.role {
        let matches = session.user.as_ref().map(|u| u.role == required).unwrap_or(false);
        if !matches {
            return Outcome::Redirect(ROLE_FALLBACK_PATH.to_string());
        }
    }
    Outcome::Proceed
}
