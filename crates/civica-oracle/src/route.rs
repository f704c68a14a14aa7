//! Views of the portal and how to reach them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A view of the portal, identified by its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Landing,
    Auth,
    Dashboard,
    Billing,
    RitualTechnologist,
    Settings,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Self::Landing,
        Self::Auth,
        Self::Dashboard,
        Self::Billing,
        Self::RitualTechnologist,
        Self::Settings,
    ];

    /// The URL path of this view.
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Auth => "/auth",
            Self::Dashboard => "/dashboard",
            Self::Billing => "/billing",
            Self::RitualTechnologist => "/ritual-technologist",
            Self::Settings => "/settings",
        }
    }

    /// Looks up a view by path. A single trailing slash is ignored;
    /// unknown paths return `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Returns `true` if the view may only be shown to a logged-in
    /// guardian.
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::Billing | Self::Settings)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// ClusterId
// ---------------------------------------------------------------------------

/// One of the thirteen intelligence clusters on the compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u8);

impl ClusterId {
    /// The cluster that opens billing.
    pub const BILLING: ClusterId = ClusterId(5);
    /// The cluster that opens the ritual technologist services page.
    pub const RITUAL_TECHNOLOGIST: ClusterId = ClusterId(13);
    /// Number of clusters on the compass (ids `1..=COUNT`).
    pub const COUNT: u8 = 13;

    /// Returns `true` if the id names a cluster on the compass.
    pub fn is_known(self) -> bool {
        (1..=Self::COUNT).contains(&self.0)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Where selecting a cluster on the compass leads.
///
/// Billing and the ritual technologist each own one cluster; every other
/// known cluster opens the dashboard. Unknown ids lead nowhere.
pub fn route_for_cluster(cluster: ClusterId) -> Option<Route> {
    match cluster {
        ClusterId::BILLING => Some(Route::Billing),
        ClusterId::RITUAL_TECHNOLOGIST => Some(Route::RitualTechnologist),
        c if c.is_known() => Some(Route::Dashboard),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_from_path_agree() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_ignores_one_trailing_slash() {
        assert_eq!(Route::from_path("/billing/"), Some(Route::Billing));
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("/billing//"), None);
    }

    #[test]
    fn test_from_path_unknown_is_none() {
        assert_eq!(Route::from_path("/admin"), None);
        assert_eq!(Route::from_path(""), None);
        assert_eq!(Route::from_path("dashboard"), None);
    }

    #[test]
    fn test_requires_session() {
        let protected: Vec<_> = Route::ALL
            .into_iter()
            .filter(|r| r.requires_session())
            .collect();
        assert_eq!(protected, vec![Route::Dashboard, Route::Billing, Route::Settings]);
    }

    #[test]
    fn test_route_for_cluster_special_clusters() {
        assert_eq!(route_for_cluster(ClusterId(5)), Some(Route::Billing));
        assert_eq!(route_for_cluster(ClusterId(13)), Some(Route::RitualTechnologist));
    }

    #[test]
    fn test_route_for_cluster_others_open_dashboard() {
        for id in (1..=12).filter(|id| *id != 5) {
            assert_eq!(
                route_for_cluster(ClusterId(id)),
                Some(Route::Dashboard),
                "cluster {id}"
            );
        }
    }

    #[test]
    fn test_route_for_cluster_unknown_is_none() {
        assert_eq!(route_for_cluster(ClusterId(0)), None);
        assert_eq!(route_for_cluster(ClusterId(14)), None);
        assert_eq!(route_for_cluster(ClusterId(u8::MAX)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Route::RitualTechnologist.to_string(), "/ritual-technologist");
        assert_eq!(ClusterId(7).to_string(), "C-7");
    }
}
