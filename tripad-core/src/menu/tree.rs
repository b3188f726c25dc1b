//! Arena storage for menu nodes

use heapless::Vec;

use super::node::{MenuNode, Submenu, ValueString};
use super::MenuError;

/// Capacity of the node arena
pub const MAX_NODES: usize = 16;

/// Handle to a node in a [`MenuTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(pub u8);

/// Menu nodes addressed by [`NodeId`]
///
/// Children are added before their parent, so every id a submenu refers
/// to already exists when the submenu is added.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode, MAX_NODES>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node, returning its id
    ///
    /// Submenus must only refer to nodes already in the tree.
    pub fn add(&mut self, node: MenuNode) -> Result<NodeId, MenuError> {
        if let MenuNode::Submenu(submenu) = &node {
            if submenu.children().iter().any(|&id| self.get(id).is_none()) {
                return Err(MenuError::UnknownNode);
            }
        }
        let id = NodeId(self.nodes.len() as u8);
        self.nodes.push(node).map_err(|_| MenuError::TooManyNodes)?;
        Ok(id)
    }

    /// Convenience for `add(MenuNode::Submenu(Submenu::new(..)?))`
    pub fn add_submenu(
        &mut self,
        caption: &'static str,
        children: &[NodeId],
    ) -> Result<NodeId, MenuError> {
        self.add(MenuNode::Submenu(Submenu::new(caption, children)?))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Caption of `id`, or an empty string for an unknown id
    pub fn caption(&self, id: NodeId) -> &'static str {
        self.get(id).map(MenuNode::caption).unwrap_or("")
    }

    /// Value line for `id`
    ///
    /// A submenu shows the caption of the child under its cursor.
    pub fn value_string(&self, id: NodeId) -> ValueString {
        match self.get(id) {
            Some(MenuNode::Submenu(n)) => {
                let mut s = ValueString::new();
                let _ = s.push_str(self.caption(n.selected()));
                s
            }
            Some(MenuNode::Integer(n)) => n.value_string(),
            Some(MenuNode::Choice(n)) => n.value_string(),
            Some(MenuNode::Action(n)) => n.value_string(),
            None => ValueString::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{EnumChoice, IntegerField};

    #[test]
    fn test_submenu_value_string_is_child_caption() {
        let mut tree = MenuTree::new();
        let start = tree
            .add(MenuNode::Integer(
                IntegerField::new("Start", 500, 100, 2000, 100, "ms").unwrap(),
            ))
            .unwrap();
        let os = tree
            .add(MenuNode::Choice(
                EnumChoice::new("OS Select", &["MacOS", "Windows"]).unwrap(),
            ))
            .unwrap();
        let root = tree.add_submenu("Menu", &[start, os]).unwrap();

        assert_eq!(tree.caption(root), "Menu");
        assert_eq!(tree.value_string(root).as_str(), "Start");
        tree.get_mut(root).unwrap().up();
        assert_eq!(tree.value_string(root).as_str(), "OS Select");
        assert_eq!(tree.value_string(start).as_str(), "500ms");
    }

    #[test]
    fn test_unknown_child_rejected() {
        let mut tree = MenuTree::new();
        assert_eq!(
            tree.add_submenu("Menu", &[NodeId(7)]).unwrap_err(),
            MenuError::UnknownNode
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_arena_capacity() {
        let mut tree = MenuTree::new();
        for _ in 0..MAX_NODES {
            tree.add(MenuNode::Integer(IntegerField::new("N", 0, 0, 1, 1, "").unwrap()))
                .unwrap();
        }
        assert_eq!(
            tree.add(MenuNode::Integer(IntegerField::new("N", 0, 0, 1, 1, "").unwrap()))
                .unwrap_err(),
            MenuError::TooManyNodes
        );
    }
}
