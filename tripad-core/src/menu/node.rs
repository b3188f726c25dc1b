//! Menu node variants
//!
//! Every variant answers the same four calls. `up`/`down` only touch the
//! edit state, `decide` commits it (or names a child to descend into) and
//! `cancel` throws it away.

use core::fmt::Write;

use heapless::{String, Vec};

use super::{MenuError, NodeId};

/// Longest string a node renders on the value line
pub const MAX_VALUE_LEN: usize = 24;

/// Most labels an [`EnumChoice`] can hold
pub const MAX_LABELS: usize = 8;

/// Most children a [`Submenu`] can hold
pub const MAX_CHILDREN: usize = 8;

/// Rendered value line
pub type ValueString = String<MAX_VALUE_LEN>;

/// Side effect an [`Action`] node requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Persist the live settings
    Save,
    /// Restore the persisted settings
    Load,
}

/// Result of `decide` on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Submenu: enter this child, nothing committed
    Descend(NodeId),
    /// Field: edit value is now the committed value
    Committed,
    /// Action: the caller runs the side effect
    Invoke(MenuAction),
}

fn check_caption(caption: &'static str) -> Result<&'static str, MenuError> {
    if caption.is_empty() {
        Err(MenuError::EmptyCaption)
    } else {
        Ok(caption)
    }
}

/// Clamped integer setting with a unit suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerField {
    caption: &'static str,
    committed: i32,
    edit: i32,
    min: i32,
    max: i32,
    step: i32,
    suffix: &'static str,
}

impl IntegerField {
    /// Create a field; `value` is clamped into `[min, max]`
    pub fn new(
        caption: &'static str,
        value: i32,
        min: i32,
        max: i32,
        step: i32,
        suffix: &'static str,
    ) -> Result<Self, MenuError> {
        if min > max || step <= 0 {
            return Err(MenuError::InvalidRange);
        }
        let value = value.clamp(min, max);
        Ok(Self {
            caption: check_caption(caption)?,
            committed: value,
            edit: value,
            min,
            max,
            step,
            suffix,
        })
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    /// Committed value
    pub fn value(&self) -> i32 {
        self.committed
    }

    /// Value currently being edited
    pub fn edit_value(&self) -> i32 {
        self.edit
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Overwrite both committed and edit value, clamped
    pub fn set_value(&mut self, value: i32) {
        self.committed = value.clamp(self.min, self.max);
        self.edit = self.committed;
    }

    pub fn up(&mut self) {
        self.edit = self.edit.saturating_add(self.step).min(self.max);
    }

    pub fn down(&mut self) {
        self.edit = self.edit.saturating_sub(self.step).max(self.min);
    }

    pub fn commit(&mut self) {
        self.committed = self.edit;
    }

    pub fn cancel(&mut self) {
        self.edit = self.committed;
    }

    /// Edit value followed by the suffix, e.g. `500ms`
    pub fn value_string(&self) -> ValueString {
        let mut s = ValueString::new();
        // Truncation only affects what is shown
        let _ = write!(s, "{}{}", self.edit, self.suffix);
        s
    }
}

/// Pick one label from a fixed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumChoice {
    caption: &'static str,
    labels: Vec<&'static str, MAX_LABELS>,
    committed: usize,
    edit: usize,
}

impl EnumChoice {
    pub fn new(caption: &'static str, labels: &[&'static str]) -> Result<Self, MenuError> {
        if labels.is_empty() {
            return Err(MenuError::EmptyChoice);
        }
        let labels = Vec::from_slice(labels).map_err(|_| MenuError::TooManyLabels)?;
        Ok(Self {
            caption: check_caption(caption)?,
            labels,
            committed: 0,
            edit: 0,
        })
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    /// Committed index
    pub fn index(&self) -> usize {
        self.committed
    }

    pub fn edit_index(&self) -> usize {
        self.edit
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Overwrite both committed and edit index; out-of-range becomes 0
    pub fn set_index(&mut self, index: usize) {
        self.committed = if index < self.labels.len() { index } else { 0 };
        self.edit = self.committed;
    }

    pub fn up(&mut self) {
        self.edit = (self.edit + 1) % self.labels.len();
    }

    pub fn down(&mut self) {
        self.edit = (self.edit + self.labels.len() - 1) % self.labels.len();
    }

    pub fn commit(&mut self) {
        self.committed = self.edit;
    }

    pub fn cancel(&mut self) {
        self.edit = self.committed;
    }

    pub fn value_string(&self) -> ValueString {
        let mut s = ValueString::new();
        let _ = s.push_str(self.labels[self.edit]);
        s
    }
}

/// Node with children and a wrapping cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    caption: &'static str,
    children: Vec<NodeId, MAX_CHILDREN>,
    cursor: usize,
}

impl Submenu {
    pub fn new(caption: &'static str, children: &[NodeId]) -> Result<Self, MenuError> {
        if children.is_empty() {
            return Err(MenuError::EmptySubmenu);
        }
        let children = Vec::from_slice(children).map_err(|_| MenuError::TooManyChildren)?;
        Ok(Self {
            caption: check_caption(caption)?,
            children,
            cursor: 0,
        })
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Child under the cursor
    pub fn selected(&self) -> NodeId {
        self.children[self.cursor]
    }

    pub fn up(&mut self) {
        self.cursor = (self.cursor + 1) % self.children.len();
    }

    pub fn down(&mut self) {
        self.cursor = (self.cursor + self.children.len() - 1) % self.children.len();
    }
}

/// Leaf that runs a side effect when decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    caption: &'static str,
    action: MenuAction,
}

impl Action {
    pub fn new(caption: &'static str, action: MenuAction) -> Result<Self, MenuError> {
        Ok(Self {
            caption: check_caption(caption)?,
            action,
        })
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    pub fn action(&self) -> MenuAction {
        self.action
    }

    pub fn value_string(&self) -> ValueString {
        let mut s = ValueString::new();
        let _ = s.push_str("execute");
        s
    }
}

/// A settings-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Submenu(Submenu),
    Integer(IntegerField),
    Choice(EnumChoice),
    Action(Action),
}

impl MenuNode {
    pub fn caption(&self) -> &'static str {
        match self {
            MenuNode::Submenu(n) => n.caption(),
            MenuNode::Integer(n) => n.caption(),
            MenuNode::Choice(n) => n.caption(),
            MenuNode::Action(n) => n.caption(),
        }
    }

    pub fn up(&mut self) {
        match self {
            MenuNode::Submenu(n) => n.up(),
            MenuNode::Integer(n) => n.up(),
            MenuNode::Choice(n) => n.up(),
            MenuNode::Action(_) => {}
        }
    }

    pub fn down(&mut self) {
        match self {
            MenuNode::Submenu(n) => n.down(),
            MenuNode::Integer(n) => n.down(),
            MenuNode::Choice(n) => n.down(),
            MenuNode::Action(_) => {}
        }
    }

    pub fn decide(&mut self) -> Decision {
        match self {
            MenuNode::Submenu(n) => Decision::Descend(n.selected()),
            MenuNode::Integer(n) => {
                n.commit();
                Decision::Committed
            }
            MenuNode::Choice(n) => {
                n.commit();
                Decision::Committed
            }
            MenuNode::Action(n) => Decision::Invoke(n.action()),
        }
    }

    /// Reset edit state to the committed state; submenus keep their cursor
    pub fn cancel(&mut self) {
        match self {
            MenuNode::Integer(n) => n.cancel(),
            MenuNode::Choice(n) => n.cancel(),
            MenuNode::Submenu(_) | MenuNode::Action(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn repeat_start() -> IntegerField {
        IntegerField::new("Start", 500, 100, 2000, 100, "ms").unwrap()
    }

    fn os_select() -> EnumChoice {
        EnumChoice::new("OS Select", &["MacOS", "Windows"]).unwrap()
    }

    #[test]
    fn test_integer_field_edit_and_commit() {
        let mut field = repeat_start();
        assert_eq!(field.value_string().as_str(), "500ms");

        field.up();
        field.up();
        assert_eq!(field.edit_value(), 700);
        assert_eq!(field.value(), 500);

        field.commit();
        assert_eq!(field.value(), 700);
    }

    #[test]
    fn test_integer_field_clamps_at_bounds() {
        let mut field = IntegerField::new("Continue", 200, 50, 1000, 10, "ms").unwrap();
        for _ in 0..200 {
            field.down();
        }
        assert_eq!(field.edit_value(), 50);
        for _ in 0..200 {
            field.up();
        }
        assert_eq!(field.edit_value(), 1000);
    }

    #[test]
    fn test_integer_field_rejects_bad_range() {
        assert_eq!(
            IntegerField::new("X", 0, 10, 5, 1, "").unwrap_err(),
            MenuError::InvalidRange
        );
        assert_eq!(
            IntegerField::new("X", 0, 0, 5, 0, "").unwrap_err(),
            MenuError::InvalidRange
        );
        assert_eq!(
            IntegerField::new("", 0, 0, 5, 1, "").unwrap_err(),
            MenuError::EmptyCaption
        );
    }

    #[test]
    fn test_enum_choice_wraps_both_ways() {
        let mut choice = os_select();
        choice.down();
        assert_eq!(choice.value_string().as_str(), "Windows");
        choice.up();
        assert_eq!(choice.value_string().as_str(), "MacOS");
        choice.up();
        choice.commit();
        assert_eq!(choice.index(), 1);
    }

    #[test]
    fn test_enum_choice_rejects_empty_labels() {
        assert_eq!(
            EnumChoice::new("OS Select", &[]).unwrap_err(),
            MenuError::EmptyChoice
        );
    }

    #[test]
    fn test_submenu_rejects_empty_children() {
        assert_eq!(
            Submenu::new("Menu", &[]).unwrap_err(),
            MenuError::EmptySubmenu
        );
    }

    #[test]
    fn test_decide_per_variant() {
        let mut submenu = MenuNode::Submenu(Submenu::new("Menu", &[NodeId(3), NodeId(4)]).unwrap());
        submenu.up();
        assert_eq!(submenu.decide(), Decision::Descend(NodeId(4)));

        let mut field = MenuNode::Integer(repeat_start());
        assert_eq!(field.decide(), Decision::Committed);

        let mut action = MenuNode::Action(Action::new("Save", MenuAction::Save).unwrap());
        assert_eq!(action.decide(), Decision::Invoke(MenuAction::Save));
    }

    #[test]
    fn test_submenu_cancel_keeps_cursor() {
        let mut node = MenuNode::Submenu(Submenu::new("Menu", &[NodeId(0), NodeId(1)]).unwrap());
        node.up();
        node.cancel();
        assert_eq!(node.decide(), Decision::Descend(NodeId(1)));
    }

    #[test]
    fn test_action_value_string() {
        let action = Action::new("Load", MenuAction::Load).unwrap();
        assert_eq!(action.value_string().as_str(), "execute");
    }

    fn leaf_value_string(node: &MenuNode) -> ValueString {
        match node {
            MenuNode::Integer(n) => n.value_string(),
            MenuNode::Choice(n) => n.value_string(),
            MenuNode::Action(n) => n.value_string(),
            MenuNode::Submenu(_) => unreachable!(),
        }
    }

    proptest! {
        #[test]
        fn prop_integer_edit_stays_in_range(moves in prop::collection::vec(any::<bool>(), 0..300)) {
            let mut field = IntegerField::new("Continue", 200, 50, 1000, 10, "ms").unwrap();
            for up in moves {
                if up { field.up() } else { field.down() }
                prop_assert!((50..=1000).contains(&field.edit_value()));
            }
        }

        #[test]
        fn prop_cancel_restores_value_string(
            variant in 0usize..3,
            moves in prop::collection::vec(any::<bool>(), 0..50),
        ) {
            let mut node = match variant {
                0 => MenuNode::Integer(repeat_start()),
                1 => MenuNode::Choice(os_select()),
                _ => MenuNode::Action(Action::new("Save", MenuAction::Save).unwrap()),
            };
            let before = leaf_value_string(&node);
            for up in moves {
                if up { node.up() } else { node.down() }
            }
            node.cancel();
            prop_assert_eq!(leaf_value_string(&node), before);
        }

        #[test]
        fn prop_up_cycles_back(
            labels in 1usize..=MAX_LABELS,
            start in 0usize..MAX_LABELS,
        ) {
            const NAMES: [&str; MAX_LABELS] = ["a", "b", "c", "d", "e", "f", "g", "h"];
            let mut choice = EnumChoice::new("Pick", &NAMES[..labels]).unwrap();
            for _ in 0..(start % labels) {
                choice.up();
            }
            let original = choice.edit_index();
            for _ in 0..labels {
                choice.up();
            }
            prop_assert_eq!(choice.edit_index(), original);

            let ids: std::vec::Vec<NodeId> = (0..labels as u8).map(NodeId).collect();
            let mut submenu = Submenu::new("Menu", &ids).unwrap();
            for _ in 0..(start % labels) {
                submenu.down();
            }
            let original = submenu.cursor();
            for _ in 0..labels {
                submenu.up();
            }
            prop_assert_eq!(submenu.cursor(), original);
        }
    }
}
