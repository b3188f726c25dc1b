//! Settings menu
//!
//! The menu is a small tree of [`MenuNode`]s stored in a [`MenuTree`]
//! arena and addressed by [`NodeId`]. A [`Navigator`] keeps the path from
//! the root to the node on screen and turns button events into
//! up/down/decide/cancel calls.
//!
//! ```text
//! Menu
//! ├── OS Select      MacOS | Windows
//! ├── Repeat
//! │   ├── Start      100..=2000 ms, step 100
//! │   └── Continue   50..=1000 ms, step 10
//! ├── Save           execute
//! └── Load           execute
//! ```

mod navigator;
mod node;
mod settings;
mod tree;

pub use navigator::{NavEvent, Navigator, MAX_DEPTH};
pub use node::{
    Action, Decision, EnumChoice, IntegerField, MenuAction, MenuNode, Submenu, ValueString,
    MAX_CHILDREN, MAX_LABELS, MAX_VALUE_LEN,
};
pub use settings::{Applied, SettingsMenu};
pub use tree::{MenuTree, NodeId, MAX_NODES};

/// Errors raised while building the menu tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Submenu built with no children
    EmptySubmenu,
    /// Choice built with no labels
    EmptyChoice,
    /// Node built with an empty caption
    EmptyCaption,
    /// Integer field with `min > max` or a non-positive step
    InvalidRange,
    /// Tree arena is full
    TooManyNodes,
    /// Submenu exceeds `MAX_CHILDREN`
    TooManyChildren,
    /// Choice exceeds `MAX_LABELS`
    TooManyLabels,
    /// A child id does not name a node in the tree
    UnknownNode,
}
