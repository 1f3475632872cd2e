//! Side navigation state.
//!
//! The menu is a fixed ordered item set in two sections. Which entry is
//! highlighted is held as a single selected id, so a double-active or
//! zero-active menu is unrepresentable.

/// Section headers of the navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Menu,
    General,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Menu => "MENU",
            Section::General => "GENERAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Dashboard,
    MyAsset,
    Analytics,
    History,
    News,
    Help,
    Settings,
    Logout,
}

/// One entry of the navigation panel.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub id: ItemId,
    pub label: &'static str,
    pub icon: &'static str,
    pub section: Section,
}

const ITEMS: &[MenuItem] = &[
    MenuItem { id: ItemId::Dashboard, label: "Dashboard", icon: "home-1", section: Section::Menu },
    MenuItem { id: ItemId::MyAsset, label: "My Asset", icon: "wallet", section: Section::Menu },
    MenuItem { id: ItemId::Analytics, label: "Analytics", icon: "chart", section: Section::Menu },
    MenuItem { id: ItemId::History, label: "History", icon: "time", section: Section::Menu },
    MenuItem { id: ItemId::News, label: "News", icon: "news", section: Section::Menu },
    MenuItem { id: ItemId::Help, label: "Help", icon: "info", section: Section::General },
    MenuItem { id: ItemId::Settings, label: "Settings", icon: "settings", section: Section::General },
    MenuItem { id: ItemId::Logout, label: "Logout", icon: "logout", section: Section::General },
];

/// Navigation menu with exactly one active entry at any time.
#[derive(Debug, Clone)]
pub struct NavMenu {
    active: ItemId,
}

impl NavMenu {
    /// Fresh menu with the default entry active.
    pub fn new() -> Self {
        Self {
            active: ItemId::Dashboard,
        }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        ITEMS
    }

    pub fn labels(&self) -> Vec<&'static str> {
        ITEMS.iter().map(|item| item.label).collect()
    }

    pub fn active(&self) -> ItemId {
        self.active
    }

    pub fn is_active(&self, id: ItemId) -> bool {
        self.active == id
    }

    /// Activate an entry. Atomic swap: the previous entry stops being active
    /// in the same assignment.
    pub fn activate(&mut self, id: ItemId) {
        self.active = id;
    }

    /// Activate the entry carrying `label`; returns the activated id, or
    /// `None` (leaving the selection untouched) for unknown labels.
    pub fn activate_by_label(&mut self, label: &str) -> Option<ItemId> {
        let id = ITEMS.iter().find(|item| item.label == label)?.id;
        self.activate(id);
        Some(id)
    }
}

impl Default for NavMenu {
    fn default() -> Self {
        Self::new()
    }
}
