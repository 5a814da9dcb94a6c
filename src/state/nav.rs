//! Navigation active-link resolution.
//!
//! DESIGN
//! ======
//! Resolution works on a snapshot of the rendered links (`NavLink`) and
//! returns a `NavUpdate` for the DOM layer to apply, so the route rules are
//! testable without a document. At most one link is ever marked active.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::{HOME_LINK_ID, LOGOUT_PATH, ROUTES};

/// Snapshot of one rendered navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub id: Option<String>,
    /// Pathname of the link target.
    pub path: String,
}

impl NavLink {
    pub fn new(id: Option<&str>, path: &str) -> Self {
        Self { id: id.filter(|id| !id.is_empty()).map(str::to_owned), path: path.to_owned() }
    }

    /// The logout link never carries active state.
    #[must_use]
    pub fn is_logout(&self) -> bool {
        self.path == LOGOUT_PATH
    }
}

/// What the DOM layer should do to the link set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavUpdate {
    /// Clear every link, then mark the link at this index active.
    Activate(usize),
    /// Clear every link; the routed link is not rendered on this page.
    ClearAll,
    /// Leave the server-rendered state alone.
    Unchanged,
}

/// Result of clicking a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub update: NavUpdate,
    /// Close the slide-out navigation panel.
    pub close_panel: bool,
}

/// Static path to link-id table.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<(String, String)>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_pairs(ROUTES)
    }
}

impl RouteTable {
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self { routes: pairs.iter().map(|(p, id)| ((*p).to_owned(), (*id).to_owned())).collect() }
    }

    /// Link id for `path`. The site root always maps to the home link.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, id)| id.as_str())
            .or_else(|| (path == "/").then_some(HOME_LINK_ID))
    }

    /// Decide which link should be active for `path`.
    #[must_use]
    pub fn resolve(&self, path: &str, links: &[NavLink]) -> NavUpdate {
        if let Some(id) = self.lookup(path) {
            return match links.iter().position(|link| link.id.as_deref() == Some(id)) {
                Some(index) => NavUpdate::Activate(index),
                None => {
                    log::debug!("nav: route {path} maps to #{id}, which is not rendered");
                    NavUpdate::ClearAll
                }
            };
        }
        links
            .iter()
            .position(|link| link.path == path)
            .map_or(NavUpdate::Unchanged, NavUpdate::Activate)
    }
}

/// Decide the outcome of a click on `links[index]`.
#[must_use]
pub fn on_click(links: &[NavLink], index: usize) -> Option<ClickOutcome> {
    let link = links.get(index)?;
    if link.is_logout() {
        return None;
    }
    if link.id.is_none() {
        log::warn!("nav: link to {} has no id", link.path);
    }
    Some(ClickOutcome { update: NavUpdate::Activate(index), close_panel: true })
}
