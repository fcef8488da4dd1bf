//! Navigator: applies the guard to each attempted transition and follows
//! redirects.
//!
//! A redirect is itself a transition, so the guard runs again on the redirect
//! target. The chain is bounded; with the shipped route table every chain
//! settles within two hops.

use serde::Serialize;
use thiserror::Error;

use homestay_auth::SessionFlags;

use crate::guard::{Decision, Transition, explain};
use crate::routes::{ResolvedRoute, RouteName, resolve};

/// Upper bound on redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches path '{0}'")]
    UnknownPath(String),

    #[error("redirect limit exceeded: {}", format_chain(.chain))]
    RedirectLoop { chain: Vec<RouteName> },
}

fn format_chain(chain: &[RouteName]) -> String {
    chain.iter().map(RouteName::as_str).collect::<Vec<_>>().join(" -> ")
}

/// Where a navigation ended up and how it got there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationOutcome {
    pub requested: RouteName,
    pub location: ResolvedRoute,
    /// Redirect targets in the order they were taken.
    pub redirects: Vec<RouteName>,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: Option<ResolvedRoute>,
    redirect_limit: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::with_redirect_limit(MAX_REDIRECTS)
    }

    pub fn with_redirect_limit(redirect_limit: usize) -> Self {
        Self {
            current: None,
            redirect_limit,
        }
    }

    /// The location of the last completed navigation.
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// Resolve `path` and navigate to it.
    pub fn navigate<F>(&mut self, path: &str, session: &F) -> Result<NavigationOutcome, NavigationError>
    where
        F: SessionFlags + ?Sized,
    {
        let target = resolve(path).ok_or_else(|| NavigationError::UnknownPath(path.to_string()))?;
        self.navigate_to(target, session)
    }

    /// Navigate to a named, parameterless route.
    pub fn navigate_named<F>(&mut self, name: RouteName, session: &F) -> Result<NavigationOutcome, NavigationError>
    where
        F: SessionFlags + ?Sized,
    {
        self.navigate_to(ResolvedRoute::named(name), session)
    }

    pub fn navigate_to<F>(&mut self, target: ResolvedRoute, session: &F) -> Result<NavigationOutcome, NavigationError>
    where
        F: SessionFlags + ?Sized,
    {
        let requested = target.name();
        let mut location = target;
        let mut redirects = Vec::new();

        loop {
            let from = self.current.as_ref().map(|c| c.route);
            let outcome = explain(Transition::new(location.route, from), session);
            match outcome.decision {
                Decision::Allow => break,
                Decision::Redirect(next) => {
                    tracing::debug!(
                        from = ?outcome.from,
                        to = %outcome.to,
                        redirect = %next,
                        rule = outcome.rule.reason(),
                        "navigation redirected"
                    );
                    redirects.push(next);
                    if redirects.len() > self.redirect_limit {
                        let mut chain = vec![requested];
                        chain.extend(redirects);
                        tracing::warn!(chain = %format_chain(&chain), "redirect limit exceeded; navigation cancelled");
                        return Err(NavigationError::RedirectLoop { chain });
                    }
                    location = ResolvedRoute::named(next);
                }
            }
        }

        self.current = Some(location.clone());
        Ok(NavigationOutcome {
            requested,
            location,
            redirects,
        })
    }
}

#[cfg(test)]
mod tests {
    use homestay_auth::{Role, SessionSnapshot};

    use super::*;

    #[test]
    fn anonymous_visitor_lands_on_login() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate("/my-orders", &SessionSnapshot::anonymous()).unwrap();
        assert_eq!(outcome.requested, RouteName::MyOrders);
        assert_eq!(outcome.location.name(), RouteName::Login);
        assert_eq!(outcome.redirects, vec![RouteName::Login]);
        assert_eq!(nav.current().map(|c| c.name()), Some(RouteName::Login));
    }

    #[test]
    fn landlord_on_login_is_redirected_twice() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate("/login", &SessionSnapshot::signed_in(Role::Landlord)).unwrap();
        assert_eq!(outcome.redirects, vec![RouteName::Home, RouteName::MyProperties]);
        assert_eq!(outcome.location.path, "/my-properties");
    }

    #[test]
    fn allowed_navigation_keeps_params() {
        let mut nav = Navigator::new();
        let outcome = nav
            .navigate("/properties/31", &SessionSnapshot::signed_in(Role::Tenant))
            .unwrap();
        assert!(!outcome.was_redirected());
        assert_eq!(outcome.location.param("id"), Some("31"));
        assert_eq!(outcome.location.path, "/properties/31");
    }

    #[test]
    fn admin_ends_on_dashboard_from_anywhere() {
        let admin = SessionSnapshot::signed_in(Role::Admin);
        for route in crate::routes::ROUTES.iter() {
            let mut nav = Navigator::new();
            let outcome = nav.navigate_named(route.name, &admin).unwrap();
            assert_eq!(outcome.location.name(), RouteName::AdminDashboard);
        }
    }

    #[test]
    fn every_shape_settles_within_the_limit() {
        let mut shapes = vec![SessionSnapshot::anonymous(), SessionSnapshot::token_only()];
        shapes.extend(Role::ALL.map(SessionSnapshot::signed_in));
        for session in shapes {
            for route in crate::routes::ROUTES.iter() {
                let outcome = Navigator::new().navigate_named(route.name, &session).unwrap();
                assert!(outcome.redirects.len() <= 2);
            }
        }
    }

    #[test]
    fn unknown_path_is_an_error_and_keeps_location() {
        let mut nav = Navigator::new();
        nav.navigate("/", &SessionSnapshot::anonymous()).unwrap();
        let err = nav.navigate("/missing", &SessionSnapshot::anonymous()).unwrap_err();
        assert_eq!(err, NavigationError::UnknownPath("/missing".into()));
        assert_eq!(nav.current().map(|c| c.name()), Some(RouteName::Home));
    }

    #[test]
    fn redirect_limit_cancels_navigation() {
        let mut nav = Navigator::with_redirect_limit(1);
        let err = nav
            .navigate("/login", &SessionSnapshot::signed_in(Role::Landlord))
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::RedirectLoop {
                chain: vec![RouteName::Login, RouteName::Home, RouteName::MyProperties],
            }
        );
        assert_eq!(err.to_string(), "redirect limit exceeded: Login -> Home -> MyProperties");
        assert!(nav.current().is_none());
    }
}
