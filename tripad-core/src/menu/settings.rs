//! The device settings menu and its link to the runtime context

use heapless::Vec;

use super::node::{Action, EnumChoice, IntegerField, MenuAction, MenuNode, MAX_LABELS};
use super::tree::{MenuTree, NodeId};
use super::MenuError;
use crate::input::RepeatTiming;
use crate::keymap::Keymap;
use crate::runtime::{FieldRange, RuntimeContext, REPEAT_CONTINUE_RANGE, REPEAT_START_RANGE};

/// What an apply step changed in the runtime context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Applied {
    pub profile_changed: bool,
    pub timing_changed: bool,
}

/// Settings tree plus the ids of the nodes that mirror runtime values
#[derive(Debug, Clone)]
pub struct SettingsMenu {
    tree: MenuTree,
    root: NodeId,
    profile: NodeId,
    repeat_start: NodeId,
    repeat_continue: NodeId,
}

fn timing_field(
    caption: &'static str,
    value: u16,
    range: FieldRange,
) -> Result<MenuNode, MenuError> {
    Ok(MenuNode::Integer(IntegerField::new(
        caption,
        value as i32,
        range.min as i32,
        range.max as i32,
        range.step as i32,
        "ms",
    )?))
}

impl SettingsMenu {
    /// Build the menu with one OS choice per keymap profile
    pub fn new(keymap: &Keymap, ctx: &RuntimeContext) -> Result<Self, MenuError> {
        let mut labels: Vec<&'static str, MAX_LABELS> = Vec::new();
        for index in 0..keymap.profile_count() {
            labels
                .push(keymap.profile(index as u8).name)
                .map_err(|_| MenuError::TooManyLabels)?;
        }

        let mut tree = MenuTree::new();
        let profile = tree.add(MenuNode::Choice(EnumChoice::new("OS Select", &labels)?))?;
        let repeat_start = tree.add(timing_field(
            "Start",
            ctx.timing.start_ms,
            REPEAT_START_RANGE,
        )?)?;
        let repeat_continue = tree.add(timing_field(
            "Continue",
            ctx.timing.continue_ms,
            REPEAT_CONTINUE_RANGE,
        )?)?;
        let repeat = tree.add_submenu("Repeat", &[repeat_start, repeat_continue])?;
        let save = tree.add(MenuNode::Action(Action::new("Save", MenuAction::Save)?))?;
        let load = tree.add(MenuNode::Action(Action::new("Load", MenuAction::Load)?))?;
        let root = tree.add_submenu("Menu", &[profile, repeat, save, load])?;

        let mut menu = Self {
            tree,
            root,
            profile,
            repeat_start,
            repeat_continue,
        };
        menu.sync_from(ctx);
        Ok(menu)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Overwrite committed and edit values from the runtime context
    pub fn sync_from(&mut self, ctx: &RuntimeContext) {
        if let Some(MenuNode::Choice(choice)) = self.tree.get_mut(self.profile) {
            choice.set_index(ctx.profile_index as usize);
        }
        if let Some(MenuNode::Integer(field)) = self.tree.get_mut(self.repeat_start) {
            field.set_value(ctx.timing.start_ms as i32);
        }
        if let Some(MenuNode::Integer(field)) = self.tree.get_mut(self.repeat_continue) {
            field.set_value(ctx.timing.continue_ms as i32);
        }
    }

    /// Push committed values that differ from the runtime into it
    ///
    /// A changed profile resets the active layer to 0.
    pub fn apply_to(&self, ctx: &mut RuntimeContext) -> Applied {
        let mut applied = Applied::default();

        if let Some(index) = self.committed_profile() {
            applied.profile_changed = ctx.select_profile(index);
        }

        let timing = RepeatTiming::new(
            self.committed_ms(self.repeat_start)
                .unwrap_or(ctx.timing.start_ms),
            self.committed_ms(self.repeat_continue)
                .unwrap_or(ctx.timing.continue_ms),
        );
        if timing != ctx.timing {
            ctx.timing = timing;
            applied.timing_changed = true;
        }

        applied
    }

    fn committed_profile(&self) -> Option<u8> {
        match self.tree.get(self.profile) {
            Some(MenuNode::Choice(choice)) => Some(choice.index() as u8),
            _ => None,
        }
    }

    fn committed_ms(&self, id: NodeId) -> Option<u16> {
        match self.tree.get(id) {
            Some(MenuNode::Integer(field)) => u16::try_from(field.value()).ok(),
            _ => None,
        }
    }
}
