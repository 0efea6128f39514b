use once_cell::sync::Lazy;

use crate::identity::SessionState;

use super::guard::{decide, Outcome};

/// Renderable views, opaque to the guard. Rendering itself is out of scope;
/// the shell only routes to these identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Home,
    Teams,
    Players,
    Matches,
    News,
    Referees,
    Standings,
    Profile,
    Admin,
    UserProfile,
}

/// Capability requirements attached to a route. The guard consults
/// `requires_auth` and `role`; `hide_navbar` is for the layout component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<&'static str>,
    pub hide_navbar: bool,
}

impl RouteMeta {
    pub const fn public() -> Self {
        Self { requires_auth: false, role: None, hide_navbar: false }
    }
    pub const fn no_navbar() -> Self {
        Self { requires_auth: false, role: None, hide_navbar: true }
    }
    pub const fn authenticated() -> Self {
        Self { requires_auth: true, role: None, hide_navbar: false }
    }
    pub const fn role(role: &'static str) -> Self {
        Self { requires_auth: true, role: Some(role), hide_navbar: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub view: View,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    const fn new(path: &'static str, view: View, meta: RouteMeta) -> Self {
        Self { path, view, meta }
    }
}

/// One navigation attempt, consumed synchronously by the guard.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
}

// Declared once at startup, immutable afterwards. Paths kept as served by
// the backing application (including "/refeeres" and "/inicio").
static DEFAULT_ROUTES: Lazy<Vec<RouteDescriptor>> = Lazy::new(|| {
    vec![
        RouteDescriptor::new("/inicio", View::Home, RouteMeta::public()),
        RouteDescriptor::new("/", View::Login, RouteMeta::no_navbar()),
        RouteDescriptor::new("/register", View::Register, RouteMeta::no_navbar()),
        RouteDescriptor::new("/teams", View::Teams, RouteMeta::public()),
        RouteDescriptor::new("/players", View::Players, RouteMeta::public()),
        RouteDescriptor::new("/matches", View::Matches, RouteMeta::public()),
        RouteDescriptor::new("/news", View::News, RouteMeta::public()),
        RouteDescriptor::new("/refeeres", View::Referees, RouteMeta::public()),
        RouteDescriptor::new("/standings", View::Standings, RouteMeta::public()),
        RouteDescriptor::new("/profile", View::Profile, RouteMeta::authenticated()),
        RouteDescriptor::new("/admin", View::Admin, RouteMeta::role("admin")),
        RouteDescriptor::new("/userProfile", View::UserProfile, RouteMeta::public()),
    ]
});

pub fn default_routes() -> &'static [RouteDescriptor] {
    &DEFAULT_ROUTES
}

/// Static route table. Lookup is linear; the table is a dozen entries.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteDescriptor>,
}

impl Router {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        debug_assert!(
            {
                let mut paths: Vec<_> = routes.iter().map(|r| r.path).collect();
                paths.sort_unstable();
                paths.windows(2).all(|w| w[0] != w[1])
            },
            "route paths must be unique"
        );
        Self { routes }
    }

    pub fn with_default_routes() -> Self {
        Self::new(default_routes().to_vec())
    }

    pub fn find(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Resolve a navigation attempt against the table and apply the guard.
    /// An undeclared destination is an explicit `NotFound`, not undefined
    /// behavior.
    pub fn navigate(&self, req: &NavigationRequest<'_>, session: &SessionState) -> Outcome {
        let Some(route) = self.find(req.to) else {
            tracing::debug!(target: "pitchside", "nav {} -> {}: not found", req.from, req.to);
            return Outcome::NotFound;
        };
        let outcome = decide(route, session);
        tracing::debug!(target: "pitchside", "nav {} -> {}: {:?}", req.from, req.to, outcome);
        outcome
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}
