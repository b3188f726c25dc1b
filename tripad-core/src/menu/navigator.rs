//! Navigation stack over a menu tree

use heapless::Vec;

use super::node::{Decision, MenuAction};
use super::tree::{MenuTree, NodeId};

/// Deepest menu nesting the navigator tracks
pub const MAX_DEPTH: usize = 4;

/// Outcome of one navigation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    /// Edit state or cursor changed
    Moved,
    /// Entered a submenu child
    Descended(NodeId),
    /// A field was committed and the navigator returned to its parent
    Committed(NodeId),
    /// An action was decided and the navigator returned to its parent
    Invoked(MenuAction),
    /// Left a node without committing
    Cancelled(NodeId),
    /// Cancel at the root: leave the menu
    Exit,
    /// Nothing happened
    Ignored,
}

/// Current node plus the path back to the root
#[derive(Debug, Clone)]
pub struct Navigator {
    root: NodeId,
    current: NodeId,
    stack: Vec<NodeId, MAX_DEPTH>,
}

impl Navigator {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            current: root,
            stack: Vec::new(),
        }
    }

    /// Node on screen
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Number of ancestors above the current node
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn at_root(&self) -> bool {
        self.stack.is_empty()
    }

    /// Return to the root, dropping the path
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = self.root;
    }

    pub fn up(&mut self, tree: &mut MenuTree) -> NavEvent {
        match tree.get_mut(self.current) {
            Some(node) => {
                node.up();
                NavEvent::Moved
            }
            None => NavEvent::Ignored,
        }
    }

    pub fn down(&mut self, tree: &mut MenuTree) -> NavEvent {
        match tree.get_mut(self.current) {
            Some(node) => {
                node.down();
                NavEvent::Moved
            }
            None => NavEvent::Ignored,
        }
    }

    /// Decide the current node
    ///
    /// Submenus push the current node and descend. Leaves commit (or
    /// request their action) and then pop back to the parent exactly as a
    /// cancel would.
    pub fn decide(&mut self, tree: &mut MenuTree) -> NavEvent {
        let Some(node) = tree.get_mut(self.current) else {
            return NavEvent::Ignored;
        };

        match node.decide() {
            Decision::Descend(child) => {
                if self.stack.push(self.current).is_err() {
                    return NavEvent::Ignored;
                }
                self.current = child;
                NavEvent::Descended(child)
            }
            Decision::Committed => {
                let left = self.current;
                self.pop(tree);
                NavEvent::Committed(left)
            }
            Decision::Invoke(action) => {
                self.pop(tree);
                NavEvent::Invoked(action)
            }
        }
    }

    /// Leave the current node without committing
    ///
    /// At the root there is nothing to pop and the menu should close.
    pub fn cancel(&mut self, tree: &mut MenuTree) -> NavEvent {
        if self.stack.is_empty() {
            return NavEvent::Exit;
        }
        let left = self.current;
        self.pop(tree);
        NavEvent::Cancelled(left)
    }

    fn pop(&mut self, tree: &mut MenuTree) {
        if let Some(node) = tree.get_mut(self.current) {
            node.cancel();
        }
        self.current = self.stack.pop().unwrap_or(self.root);
    }
}
