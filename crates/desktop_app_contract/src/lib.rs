//! Shared contract types between the desktop window manager runtime and launchable items.
//!
//! The catalog describes what can be launched ([`AppItem`]); the window manager hosts whatever
//! [`ContentModule`] an item carries without ever inspecting it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_ITEM_ID_LEN: usize = 64;

/// Stable identifier for a catalog item and for the window launched from it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejection reasons for [`ItemId::new`].
pub enum ItemIdError {
    /// The identifier was empty.
    #[error("item id must not be empty")]
    Empty,
    /// The identifier exceeded the length limit.
    #[error("item id `{0}` is longer than 64 bytes")]
    TooLong(String),
    /// The identifier used characters outside `[a-z0-9-]` or a malformed leading/trailing byte.
    #[error("invalid item id `{0}`; expected lowercase kebab-case")]
    Malformed(String),
}

impl ItemId {
    /// Returns an item id when `raw` is lowercase kebab-case (`profile`, `ui-example-group`).
    ///
    /// # Errors
    ///
    /// Returns [`ItemIdError`] describing the first rule `raw` violates.
    pub fn new(raw: impl Into<String>) -> Result<Self, ItemIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if raw.len() > MAX_ITEM_ID_LEN {
            return Err(ItemIdError::TooLong(raw));
        }
        if !is_kebab_case(&raw) {
            return Err(ItemIdError::Malformed(raw));
        }
        Ok(Self(raw))
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

fn is_kebab_case(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Context handed to a [`ContentModule`] when its window body mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMountContext {
    /// Id of the hosting window (same as the launching item id).
    pub window_id: ItemId,
    /// Title shown in the hosting window's title bar.
    pub window_title: String,
}

/// Mount function signature used by [`ContentModule`].
pub type ContentMountFn = fn(ContentMountContext) -> View;

/// Opaque renderable hosted inside a managed window.
///
/// Two modules are equal when their keys match; the mount function itself is never compared.
#[derive(Clone, Copy)]
pub struct ContentModule {
    key: &'static str,
    mount_fn: ContentMountFn,
}

impl ContentModule {
    /// Creates a module from a stable key and a mount function.
    pub const fn new(key: &'static str, mount_fn: ContentMountFn) -> Self {
        Self { key, mount_fn }
    }

    /// Stable key identifying the pane implementation.
    pub const fn key(self) -> &'static str {
        self.key
    }

    /// Mounts the pane view.
    pub fn mount(self, context: ContentMountContext) -> View {
        (self.mount_fn)(context)
    }
}

impl std::fmt::Debug for ContentModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentModule")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ContentModule {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ContentModule {}

/// One catalog entry: a launchable item or a submenu group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppItem {
    /// Unique identifier across the catalog.
    pub id: ItemId,
    /// Label shown on the icon / menu entry.
    pub label: String,
    /// Icon asset path.
    pub icon: String,
    /// Pane rendered inside the window. Absent on submenu groups.
    pub content: Option<ContentModule>,
    /// Initial window width in px. `0` or absent opens maximized.
    pub default_width: Option<i32>,
    /// Initial window height in px. `0` or absent opens maximized.
    pub default_height: Option<i32>,
    /// Child entries of a submenu group.
    pub children: Vec<AppItem>,
}

impl AppItem {
    /// Creates a launchable entry with no declared size.
    pub fn leaf(
        id: ItemId,
        label: impl Into<String>,
        icon: impl Into<String>,
        content: ContentModule,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            icon: icon.into(),
            content: Some(content),
            default_width: None,
            default_height: None,
            children: Vec::new(),
        }
    }

    /// Creates a submenu group.
    pub fn group(
        id: ItemId,
        label: impl Into<String>,
        icon: impl Into<String>,
        children: Vec<AppItem>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            icon: icon.into(),
            content: None,
            default_width: None,
            default_height: None,
            children,
        }
    }

    /// Sets the declared window size.
    pub fn with_default_size(mut self, width: i32, height: i32) -> Self {
        self.default_width = Some(width);
        self.default_height = Some(height);
        self
    }

    /// Returns `true` for a submenu group (no content, at least one child).
    pub fn is_group(&self) -> bool {
        self.content.is_none() && !self.children.is_empty()
    }

    /// Returns `true` when the item can open a window.
    pub fn is_launchable(&self) -> bool {
        self.content.is_some()
    }

    /// Returns `true` when either declared dimension is zero or absent.
    pub fn opens_maximized(&self) -> bool {
        let declared = |value: Option<i32>| value.filter(|v| *v > 0);
        declared(self.default_width).is_none() || declared(self.default_height).is_none()
    }

    /// Depth-first search for `id` in this entry and its children.
    pub fn find(&self, id: &ItemId) -> Option<&AppItem> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
