//! Navigation guard: who may enter which route.
//!
//! The decision is an ordered rule chain; the first matching rule wins and
//! later rules are not evaluated:
//!
//! 1. `requires_auth` and not authenticated → Login
//! 2. `requires_landlord` and not landlord → Home
//! 3. authenticated admin, target is not AdminDashboard → AdminDashboard
//! 4. `requires_admin` and not admin → Home
//! 5. landlord (non-admin) entering Home, PropertyList or Recommendations → MyProperties
//! 6. authenticated user entering Login → Home
//! 7. allow
//!
//! Rule 1 runs first so an anonymous visitor never learns a role-specific
//! redirect target. Admins always carry landlord access, so rule 2 can never
//! stop an admin and rule 3 confines them regardless of the landlord flag.

use serde::Serialize;

use homestay_auth::SessionFlags;

use crate::routes::{RouteDescriptor, RouteName};

/// Result of evaluating the guard for one transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Redirect(RouteName),
}

/// The rule that produced a decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardRule {
    AuthenticationRequired,
    LandlordRequired,
    AdminConfinement,
    AdminRequired,
    LandlordExcludedFromBrowse,
    AlreadyAuthenticated,
    Allowed,
}

impl GuardRule {
    pub fn reason(&self) -> &'static str {
        match self {
            GuardRule::AuthenticationRequired => "route requires a signed-in user",
            GuardRule::LandlordRequired => "route requires landlord access",
            GuardRule::AdminConfinement => "admins are confined to the admin dashboard",
            GuardRule::AdminRequired => "route requires admin access",
            GuardRule::LandlordExcludedFromBrowse => "landlords are sent to their own listings",
            GuardRule::AlreadyAuthenticated => "already signed in",
            GuardRule::Allowed => "no rule applies",
        }
    }
}

/// One attempted route change.
#[derive(Debug, Copy, Clone)]
pub struct Transition<'a> {
    pub to: &'a RouteDescriptor,
    pub from: Option<&'a RouteDescriptor>,
}

impl<'a> Transition<'a> {
    pub fn new(to: &'a RouteDescriptor, from: Option<&'a RouteDescriptor>) -> Self {
        Self { to, from }
    }
}

/// A decision together with the rule behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardOutcome {
    pub from: Option<RouteName>,
    pub to: RouteName,
    pub rule: GuardRule,
    pub decision: Decision,
}

/// Decide a transition.
///
/// - No IO
/// - No panics
/// - Reads the session, never writes it
pub fn decide<F>(transition: Transition<'_>, session: &F) -> Decision
where
    F: SessionFlags + ?Sized,
{
    evaluate(transition.to, session).1
}

/// Same as [`decide`], also naming the rule that fired.
pub fn explain<F>(transition: Transition<'_>, session: &F) -> GuardOutcome
where
    F: SessionFlags + ?Sized,
{
    let (rule, decision) = evaluate(transition.to, session);
    GuardOutcome {
        from: transition.from.map(|r| r.name),
        to: transition.to.name,
        rule,
        decision,
    }
}

fn evaluate<F>(to: &RouteDescriptor, session: &F) -> (GuardRule, Decision)
where
    F: SessionFlags + ?Sized,
{
    let authenticated = session.is_authenticated();
    let landlord = session.is_landlord();
    let admin = session.is_admin();

    if to.requires_auth && !authenticated {
        return (GuardRule::AuthenticationRequired, Decision::Redirect(RouteName::Login));
    }
    if to.requires_landlord && !landlord {
        return (GuardRule::LandlordRequired, Decision::Redirect(RouteName::Home));
    }
    if authenticated && admin && to.name != RouteName::AdminDashboard {
        return (GuardRule::AdminConfinement, Decision::Redirect(RouteName::AdminDashboard));
    }
    if to.requires_admin && !admin {
        return (GuardRule::AdminRequired, Decision::Redirect(RouteName::Home));
    }
    if landlord
        && !admin
        && matches!(
            to.name,
            RouteName::Home | RouteName::PropertyList | RouteName::Recommendations
        )
    {
        return (
            GuardRule::LandlordExcludedFromBrowse,
            Decision::Redirect(RouteName::MyProperties),
        );
    }
    if to.name == RouteName::Login && authenticated {
        return (GuardRule::AlreadyAuthenticated, Decision::Redirect(RouteName::Home));
    }
    (GuardRule::Allowed, Decision::Allow)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use homestay_auth::{MemoryStore, Role, SessionSnapshot, SessionStore, UserProfile};
    use homestay_core::UserId;
    use proptest::prelude::*;

    use super::*;
    use crate::routes::ROUTES;

    fn go<F: SessionFlags + ?Sized>(to: RouteName, session: &F) -> Decision {
        decide(Transition::new(to.descriptor(), None), session)
    }

    /// Every reachable session shape, plus the invalid "role without token"
    /// shapes so the guard is shown total over them too.
    fn all_snapshots() -> Vec<SessionSnapshot> {
        let mut shapes = vec![SessionSnapshot::anonymous(), SessionSnapshot::token_only()];
        for role in Role::ALL {
            shapes.push(SessionSnapshot::signed_in(role));
            shapes.push(SessionSnapshot {
                authenticated: false,
                role: Some(role),
            });
        }
        shapes
    }

    #[test]
    fn anonymous_is_sent_to_login_for_every_protected_route() {
        let session = SessionSnapshot::anonymous();
        for route in ROUTES.iter().filter(|r| r.requires_auth) {
            assert_eq!(
                decide(Transition::new(route, None), &session),
                Decision::Redirect(RouteName::Login),
                "{}",
                route.name
            );
        }
    }

    #[test]
    fn authentication_gate_precedes_role_gates_for_every_shape() {
        for session in all_snapshots().into_iter().filter(|s| !s.authenticated) {
            for route in ROUTES.iter().filter(|r| r.requires_auth) {
                let outcome = explain(Transition::new(route, None), &session);
                assert_eq!(outcome.rule, GuardRule::AuthenticationRequired);
            }
        }
    }

    #[test]
    fn admin_is_confined_to_dashboard() {
        let admin = SessionSnapshot::signed_in(Role::Admin);
        for route in ROUTES.iter() {
            let expected = if route.name == RouteName::AdminDashboard {
                Decision::Allow
            } else {
                Decision::Redirect(RouteName::AdminDashboard)
            };
            assert_eq!(go(route.name, &admin), expected, "{}", route.name);
        }
    }

    #[test]
    fn admin_confinement_applies_to_landlord_routes() {
        let admin = SessionSnapshot::signed_in(Role::Admin);
        let outcome = explain(Transition::new(RouteName::MyProperties.descriptor(), None), &admin);
        assert_eq!(outcome.rule, GuardRule::AdminConfinement);
        assert_eq!(outcome.decision, Decision::Redirect(RouteName::AdminDashboard));
    }

    #[test]
    fn landlord_is_excluded_from_browse_surface() {
        let landlord = SessionSnapshot::signed_in(Role::Landlord);
        for name in [RouteName::Home, RouteName::PropertyList, RouteName::Recommendations] {
            assert_eq!(go(name, &landlord), Decision::Redirect(RouteName::MyProperties));
        }
        assert_eq!(go(RouteName::MyProperties, &landlord), Decision::Allow);
        assert_eq!(go(RouteName::CreateProperty, &landlord), Decision::Allow);
        assert_eq!(go(RouteName::PropertyDetail, &landlord), Decision::Allow);
        assert_eq!(go(RouteName::AdminDashboard, &landlord), Decision::Redirect(RouteName::Home));
        assert_eq!(go(RouteName::Login, &landlord), Decision::Redirect(RouteName::Home));
    }

    #[test]
    fn tenant_rules() {
        let tenant = SessionSnapshot::signed_in(Role::Tenant);
        assert_eq!(go(RouteName::PropertyDetail, &tenant), Decision::Allow);
        assert_eq!(go(RouteName::Recommendations, &tenant), Decision::Allow);
        assert_eq!(go(RouteName::Home, &tenant), Decision::Allow);
        assert_eq!(go(RouteName::MyProperties, &tenant), Decision::Redirect(RouteName::Home));
        assert_eq!(go(RouteName::AdminDashboard, &tenant), Decision::Redirect(RouteName::Home));
        assert_eq!(go(RouteName::Login, &tenant), Decision::Redirect(RouteName::Home));
    }

    #[test]
    fn token_without_profile_has_no_role_access() {
        let session = SessionSnapshot::token_only();
        assert_eq!(go(RouteName::MyOrders, &session), Decision::Allow);
        assert_eq!(go(RouteName::EditProperty, &session), Decision::Redirect(RouteName::Home));
        assert_eq!(go(RouteName::AdminDashboard, &session), Decision::Redirect(RouteName::Home));
        assert_eq!(go(RouteName::Home, &session), Decision::Allow);
    }

    #[test]
    fn anonymous_may_browse_and_sign_in() {
        let session = SessionSnapshot::anonymous();
        for name in [
            RouteName::Home,
            RouteName::Login,
            RouteName::Register,
            RouteName::PropertyList,
            RouteName::PropertyDetail,
        ] {
            assert_eq!(go(name, &session), Decision::Allow, "{name}");
        }
        assert_eq!(go(RouteName::MyOrders, &session), Decision::Redirect(RouteName::Login));
    }

    #[test]
    fn reads_live_session_store() {
        let mut session = SessionStore::new(MemoryStore::new());
        assert_eq!(go(RouteName::MyOrders, &session), Decision::Redirect(RouteName::Login));

        session.set_token(Some("t1".into()));
        session.set_user(Some(UserProfile::new(UserId::new(1), "t", "t@example.com", Role::Tenant)));
        assert_eq!(go(RouteName::PropertyDetail, &session), Decision::Allow);
        assert_eq!(go(RouteName::MyOrders, &session), Decision::Allow);
    }

    #[test]
    fn explain_reports_both_ends() {
        let from = RouteName::Home.descriptor();
        let outcome = explain(
            Transition::new(RouteName::Login.descriptor(), Some(from)),
            &SessionSnapshot::signed_in(Role::Tenant),
        );
        assert_eq!(outcome.from, Some(RouteName::Home));
        assert_eq!(outcome.to, RouteName::Login);
        assert_eq!(outcome.rule, GuardRule::AlreadyAuthenticated);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["decision"]["decision"], "redirect");
        assert_eq!(json["decision"]["to"], "Home");
    }

    #[test]
    fn current_route_does_not_change_the_decision() {
        for session in all_snapshots() {
            for to in ROUTES.iter() {
                let baseline = decide(Transition::new(to, None), &session);
                for from in ROUTES.iter() {
                    assert_eq!(decide(Transition::new(to, Some(from)), &session), baseline);
                }
            }
        }
    }

    /// Expected decision written out from the route table by name, rule by
    /// rule, without going through the descriptors' flags.
    fn expected_decision(session: &SessionSnapshot, to: RouteName) -> Decision {
        use RouteName::*;

        let authenticated = session.authenticated;
        let landlord = matches!(session.role, Some(Role::Landlord | Role::Admin));
        let admin = session.role == Some(Role::Admin);
        let needs_auth = matches!(
            to,
            Recommendations | MyProperties | CreateProperty | EditProperty | MyOrders | Profile | AdminDashboard
        );
        let needs_landlord = matches!(to, MyProperties | CreateProperty | EditProperty);
        let needs_admin = to == AdminDashboard;

        if needs_auth && !authenticated {
            Decision::Redirect(Login)
        } else if needs_landlord && !landlord {
            Decision::Redirect(Home)
        } else if authenticated && admin && to != AdminDashboard {
            Decision::Redirect(AdminDashboard)
        } else if needs_admin && !admin {
            Decision::Redirect(Home)
        } else if landlord && !admin && matches!(to, Home | PropertyList | Recommendations) {
            Decision::Redirect(MyProperties)
        } else if to == Login && authenticated {
            Decision::Redirect(Home)
        } else {
            Decision::Allow
        }
    }

    #[test]
    fn every_shape_and_route_matches_the_rule_table() {
        let shapes = all_snapshots();
        let mut checked = 0;
        for session in &shapes {
            for route in ROUTES.iter() {
                assert_eq!(
                    decide(Transition::new(route, None), session),
                    expected_decision(session, route.name),
                    "{session:?} -> {}",
                    route.name
                );
                checked += 1;
            }
        }
        assert_eq!(shapes.len(), 8);
        assert_eq!(checked, 96);
    }

    #[test]
    fn signed_in_landings_by_role() {
        use Decision::{Allow, Redirect};
        use RouteName::*;

        // (route, tenant, landlord, admin)
        let table = [
            (Home, Allow, Redirect(MyProperties), Redirect(AdminDashboard)),
            (Login, Redirect(Home), Redirect(Home), Redirect(AdminDashboard)),
            (Register, Allow, Allow, Redirect(AdminDashboard)),
            (PropertyList, Allow, Redirect(MyProperties), Redirect(AdminDashboard)),
            (PropertyDetail, Allow, Allow, Redirect(AdminDashboard)),
            (Recommendations, Allow, Redirect(MyProperties), Redirect(AdminDashboard)),
            (MyProperties, Redirect(Home), Allow, Redirect(AdminDashboard)),
            (CreateProperty, Redirect(Home), Allow, Redirect(AdminDashboard)),
            (EditProperty, Redirect(Home), Allow, Redirect(AdminDashboard)),
            (MyOrders, Allow, Allow, Redirect(AdminDashboard)),
            (Profile, Allow, Allow, Redirect(AdminDashboard)),
            (AdminDashboard, Redirect(Home), Redirect(Home), Allow),
        ];
        assert_eq!(table.len(), ROUTES.len());

        let tenant = SessionSnapshot::signed_in(Role::Tenant);
        let landlord = SessionSnapshot::signed_in(Role::Landlord);
        let admin = SessionSnapshot::signed_in(Role::Admin);
        for (route, for_tenant, for_landlord, for_admin) in table {
            assert_eq!(go(route, &tenant), for_tenant, "tenant -> {route}");
            assert_eq!(go(route, &landlord), for_landlord, "landlord -> {route}");
            assert_eq!(go(route, &admin), for_admin, "admin -> {route}");
        }
    }

    fn snapshot_strategy() -> impl Strategy<Value = SessionSnapshot> {
        (any::<bool>(), prop::option::of(prop::sample::select(Role::ALL.to_vec())))
            .prop_map(|(authenticated, role)| SessionSnapshot { authenticated, role })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: the guard is deterministic.
        #[test]
        fn decision_is_deterministic(session in snapshot_strategy(), idx in 0usize..ROUTES.len()) {
            let to = &ROUTES[idx];
            let first = explain(Transition::new(to, None), &session);
            let second = explain(Transition::new(to, None), &session);
            prop_assert_eq!(first, second);
        }

        /// Property: a redirect never points back at the route being entered,
        /// and an allowed route satisfies all of its own requirements.
        #[test]
        fn decisions_are_consistent_with_requirements(
            session in snapshot_strategy(),
            idx in 0usize..ROUTES.len(),
        ) {
            let to = &ROUTES[idx];
            match decide(Transition::new(to, None), &session) {
                Decision::Redirect(target) => prop_assert_ne!(target, to.name),
                Decision::Allow => {
                    prop_assert!(!to.requires_auth || session.is_authenticated());
                    prop_assert!(!to.requires_landlord || session.is_landlord());
                    prop_assert!(!to.requires_admin || session.is_admin());
                }
            }
        }
    }
}
