use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::grid::Grid;

pub const HOME_TAB_ID: &str = "home";
pub const HOME_TAB_TITLE: &str = "Controls";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn home() -> Self {
        Self(HOME_TAB_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == HOME_TAB_ID
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Source of fresh tab ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> TabId;
}

/// `tab-1`, `tab-2`, ... Deterministic, for tests and scripted sessions.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TabId {
        self.next += 1;
        TabId(format!("tab-{}", self.next))
    }
}

/// `tab-<unix millis>-<n>`. The counter keeps ids distinct within the same
/// millisecond.
#[derive(Clone, Debug, Default)]
pub struct TimestampIds {
    seq: u64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> TabId {
        self.seq += 1;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        TabId(format!("tab-{millis}-{}", self.seq))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// `None` only for the home tab.
    pub grid: Option<Grid>,
}

impl Tab {
    pub fn is_home(&self) -> bool {
        self.id.is_home()
    }
}

pub struct TabRegistry {
    ids: Box<dyn IdGenerator>,
    tabs: Vec<Tab>,
    active: TabId,
    created: u64,
}

impl fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabRegistry")
            .field("tabs", &self.tabs)
            .field("active", &self.active)
            .finish()
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new(Box::new(SequentialIds::new()))
    }
}

impl TabRegistry {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        let home = Tab {
            id: TabId::home(),
            title: HOME_TAB_TITLE.to_string(),
            grid: None,
        };
        Self {
            ids,
            tabs: vec![home],
            active: TabId::home(),
            created: 0,
        }
    }

    /// Registers `grid` under a fresh id and makes it the active tab.
    pub fn create(&mut self, grid: Grid, title_hint: &str) -> TabId {
        let mut id = self.ids.next_id();
        while id.is_home() || self.contains(&id) {
            id = self.ids.next_id();
        }
        self.created += 1;
        let title = if title_hint.trim().is_empty() {
            format!("Table {}", self.created)
        } else {
            title_hint.trim().to_string()
        };
        self.tabs.push(Tab {
            id: id.clone(),
            title,
            grid: Some(grid),
        });
        self.active = id.clone();
        id
    }

    /// Removes a single tab. Unknown ids and the home tab are ignored.
    ///
    /// Closing the active tab activates the tab to its left.
    pub fn remove_one(&mut self, id: &TabId) -> bool {
        if id.is_home() {
            return false;
        }
        let Some(pos) = self.tabs.iter().position(|t| &t.id == id) else {
            return false;
        };
        self.tabs.remove(pos);
        if &self.active == id {
            // pos >= 1 since home sits at index 0
            self.active = self.tabs[pos - 1].id.clone();
        }
        true
    }

    /// Removes every tab except home and returns how many were closed.
    pub fn remove_all(&mut self) -> usize {
        let before = self.tabs.len();
        self.tabs.retain(Tab::is_home);
        self.active = TabId::home();
        before - self.tabs.len()
    }

    pub fn activate(&mut self, id: &TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = id.clone();
        true
    }

    pub fn active(&self) -> &Tab {
        self.get(&self.active).unwrap_or(&self.tabs[0])
    }

    pub fn active_id(&self) -> &TabId {
        &self.active
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == id)
    }

    /// All tabs in insertion order, home first.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Tabs holding a table.
    pub fn table_tabs(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.tabs.iter().filter(|t| !t.is_home())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
