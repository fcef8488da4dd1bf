//! Static route table.

use std::collections::BTreeMap;

use serde::Serialize;

/// Every named route of the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RouteName {
    Home,
    Login,
    Register,
    PropertyList,
    PropertyDetail,
    Recommendations,
    MyProperties,
    CreateProperty,
    EditProperty,
    MyOrders,
    Profile,
    AdminDashboard,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::PropertyList => "PropertyList",
            RouteName::PropertyDetail => "PropertyDetail",
            RouteName::Recommendations => "Recommendations",
            RouteName::MyProperties => "MyProperties",
            RouteName::CreateProperty => "CreateProperty",
            RouteName::EditProperty => "EditProperty",
            RouteName::MyOrders => "MyOrders",
            RouteName::Profile => "Profile",
            RouteName::AdminDashboard => "AdminDashboard",
        }
    }

    /// The static descriptor registered under this name.
    pub fn descriptor(self) -> &'static RouteDescriptor {
        // ROUTES is declared in enum order.
        &ROUTES[self as usize]
    }
}

impl core::fmt::Display for RouteName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route and its access requirements. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub name: RouteName,
    pub path: &'static str,
    pub requires_auth: bool,
    pub requires_landlord: bool,
    pub requires_admin: bool,
}

impl RouteDescriptor {
    const fn open(name: RouteName, path: &'static str) -> Self {
        Self {
            name,
            path,
            requires_auth: false,
            requires_landlord: false,
            requires_admin: false,
        }
    }

    const fn authenticated(name: RouteName, path: &'static str) -> Self {
        Self {
            requires_auth: true,
            ..Self::open(name, path)
        }
    }

    const fn landlord(name: RouteName, path: &'static str) -> Self {
        Self {
            requires_landlord: true,
            ..Self::authenticated(name, path)
        }
    }

    const fn admin(name: RouteName, path: &'static str) -> Self {
        Self {
            requires_admin: true,
            ..Self::authenticated(name, path)
        }
    }

    /// Match a normalized concrete path, binding `:param` segments.
    fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut pattern = segments(self.path);
        let mut concrete = segments(path);
        loop {
            match (pattern.next(), concrete.next()) {
                (None, None) => return Some(params),
                (Some(p), Some(c)) => {
                    if let Some(key) = p.strip_prefix(':') {
                        params.insert(key.to_string(), c.to_string());
                    } else if p != c {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The route table, in [`RouteName`] order.
pub static ROUTES: [RouteDescriptor; 12] = [
    RouteDescriptor::open(RouteName::Home, "/"),
    RouteDescriptor::open(RouteName::Login, "/login"),
    RouteDescriptor::open(RouteName::Register, "/register"),
    RouteDescriptor::open(RouteName::PropertyList, "/properties"),
    RouteDescriptor::open(RouteName::PropertyDetail, "/properties/:id"),
    RouteDescriptor::authenticated(RouteName::Recommendations, "/recommendations"),
    RouteDescriptor::landlord(RouteName::MyProperties, "/my-properties"),
    RouteDescriptor::landlord(RouteName::CreateProperty, "/create-property"),
    RouteDescriptor::landlord(RouteName::EditProperty, "/properties/:id/edit"),
    RouteDescriptor::authenticated(RouteName::MyOrders, "/my-orders"),
    RouteDescriptor::authenticated(RouteName::Profile, "/profile"),
    RouteDescriptor::admin(RouteName::AdminDashboard, "/admin"),
];

/// A concrete location: the matched route, the path as requested, and any
/// bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub route: &'static RouteDescriptor,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl ResolvedRoute {
    /// Location for a parameterless route, as used by redirects.
    pub fn named(name: RouteName) -> Self {
        let route = name.descriptor();
        Self {
            route,
            path: route.path.to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> RouteName {
        self.route.name
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Resolve a concrete path against the table. Query string and fragment are
/// ignored, as are repeated or trailing slashes.
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find_map(|route| {
        route.matches(bare).map(|params| ResolvedRoute {
            route,
            path: path.to_string(),
            params,
        })
    })
}
