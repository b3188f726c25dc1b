//! Device controller
//!
//! Runs once per tick. All four switches are sampled first, then the tick
//! is routed either to the settings menu or to key dispatch, and finally
//! one frame is rendered to the display and the indicator.
//!
//! The modifier button carries three gestures:
//!
//! - tap: next layer (key mode) or back one menu level (menu mode)
//! - hold past the long-press time: enter or leave the menu, once per hold
//! - hold while C repeats: step layers backwards ("layer back")
//!
//! In key mode the long-press check runs first, then layer back, then
//! normal dispatch. Once layer back is engaged the hold cannot open the
//! menu until the modifier is released.

mod events;

pub use events::{ControllerEvent, Events, MAX_EVENTS};

use tripad_hal::{BlockStorage, InputPin};

use crate::input::{Button, Switches};
use crate::keymap::Keymap;
use crate::macros::MacroTable;
use crate::menu::{MenuAction, MenuError, NavEvent, Navigator, SettingsMenu};
use crate::runtime::RuntimeContext;
use crate::settings::{SaveProgress, SettingsError, SettingsRecord, SettingsStore};
use crate::traits::{DisplayError, HidTransport, Indicator, StatusDisplay};
use events::emit;

/// Ticks the layer captions stay on screen after a layer change
pub const CAPTION_TICKS: u16 = 180;

/// Ticks a save/load notice stays on screen
pub const NOTICE_TICKS: u16 = 100;

/// Default modifier hold time that opens or closes the menu
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

/// Tunables the controller takes from device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub long_press_ms: u32,
    /// Indicator brightness, 255 shows layer colours unscaled
    pub brightness: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            brightness: 255,
        }
    }
}

/// Output collaborators
pub struct Outputs<D, L, H> {
    pub display: D,
    pub indicator: L,
    pub hid: H,
}

/// Which state machine owns the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Keys,
    Menu,
}

#[derive(Debug, Clone, Copy)]
struct Notice {
    lines: [&'static str; 2],
    remaining: u16,
}

/// The per-tick control loop
pub struct DeviceController<P, D, L, H, S>
where
    P: InputPin,
    D: StatusDisplay,
    L: Indicator,
    H: HidTransport,
    S: BlockStorage,
{
    switches: Switches<P>,
    display: D,
    indicator: L,
    hid: H,
    store: SettingsStore<S>,
    keymap: Keymap,
    macros: MacroTable,
    menu: SettingsMenu,
    nav: Navigator,
    ctx: RuntimeContext,
    config: ControllerConfig,
    mode: Mode,
    /// Set once a hold has toggled the menu, cleared on release
    mod_long_press: bool,
    /// Modifier + C stepped layers back during the current hold
    layer_back_mode: bool,
    caption_ticks: u16,
    notice: Option<Notice>,
    /// Render one dark frame (leaving the menu by long press)
    blank_frame: bool,
}

impl<P, D, L, H, S> DeviceController<P, D, L, H, S>
where
    P: InputPin,
    D: StatusDisplay,
    L: Indicator,
    H: HidTransport,
    S: BlockStorage,
{
    /// Assemble the controller
    ///
    /// `ctx` is sanitized against `keymap` and seeds the menu's values.
    pub fn new(
        switches: Switches<P>,
        outputs: Outputs<D, L, H>,
        store: SettingsStore<S>,
        keymap: Keymap,
        macros: MacroTable,
        mut ctx: RuntimeContext,
        config: ControllerConfig,
    ) -> Result<Self, MenuError> {
        ctx.sanitize(&keymap);
        let menu = SettingsMenu::new(&keymap, &ctx)?;
        let nav = Navigator::new(menu.root());

        Ok(Self {
            switches,
            display: outputs.display,
            indicator: outputs.indicator,
            hid: outputs.hid,
            store,
            keymap,
            macros,
            menu,
            nav,
            ctx,
            config,
            mode: Mode::Keys,
            mod_long_press: false,
            layer_back_mode: false,
            caption_ticks: 0,
            notice: None,
            blank_frame: false,
        })
    }

    /// Load persisted settings into the runtime, as done at boot
    pub fn restore(&mut self) -> Result<SettingsRecord, SettingsError> {
        let record = self.store.load(&mut self.ctx, &self.keymap)?;
        self.menu.sync_from(&self.ctx);
        self.caption_ticks = 0;
        Ok(record)
    }

    pub fn runtime(&self) -> &RuntimeContext {
        &self.ctx
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layer_back_mode(&self) -> bool {
        self.layer_back_mode
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    /// Advance one tick
    pub fn tick(&mut self) -> Events {
        let mut events = Events::new();

        self.switches.update(&self.ctx.timing);
        match self.mode {
            Mode::Keys => self.key_tick(&mut events),
            Mode::Menu => self.menu_tick(&mut events),
        }

        if let Err(e) = self.render() {
            emit(&mut events, ControllerEvent::Display(e));
        }
        events
    }

    fn key_tick(&mut self, events: &mut Events) {
        let long_press_ms = self.config.long_press_ms;
        let modifier = &self.switches.modifier;

        if modifier.pressed() && modifier.long_pressed(long_press_ms) {
            if !self.mod_long_press && !self.layer_back_mode {
                self.mod_long_press = true;
                self.enter_menu(events);
                return;
            }
        } else if modifier.release() {
            if !self.mod_long_press && !self.layer_back_mode {
                self.ctx.next_layer(&self.keymap);
                self.layer_changed(events);
            }
            self.mod_long_press = false;
            self.layer_back_mode = false;
        }

        let mut suppress_c = false;
        if self.switches.modifier.pressed() && self.switches.c.repeat() {
            if !self.layer_back_mode {
                self.layer_back_mode = true;
                emit(events, ControllerEvent::LayerBackEngaged);
            }
            self.ctx.previous_layer(&self.keymap);
            self.layer_changed(events);
            suppress_c = true;
        }

        for button in Button::ALL {
            if button == Button::C && suppress_c {
                continue;
            }
            if self.switches.button(button).repeat() {
                self.dispatch(button, events);
            }
        }
    }

    fn dispatch(&mut self, button: Button, events: &mut Events) {
        let binding = *self.ctx.layer(&self.keymap).binding(button);

        let result = if binding.macro_index == 0 {
            self.hid.send_key(binding.code, binding.modifiers)
        } else {
            match self.macros.get(binding.macro_index) {
                Some(text) => self.hid.send_text(text).map(|()| {
                    emit(
                        events,
                        ControllerEvent::MacroSent {
                            index: binding.macro_index,
                        },
                    );
                }),
                // Rejected by keymap validation at boot
                None => Ok(()),
            }
        };

        if let Err(e) = result {
            emit(events, ControllerEvent::Hid(e));
        }
    }

    fn menu_tick(&mut self, events: &mut Events) {
        let any_press = self.switches.a.on()
            || self.switches.b.on()
            || self.switches.c.on()
            || self.switches.modifier.on();
        if any_press {
            self.notice = None;
        }

        if self.switches.a.repeat() {
            self.nav.up(self.menu.tree_mut());
        } else if self.switches.b.repeat() {
            self.nav.down(self.menu.tree_mut());
        } else if self.switches.c.repeat() {
            match self.nav.decide(self.menu.tree_mut()) {
                NavEvent::Descended(_) | NavEvent::Committed(_) => self.apply_settings(events),
                NavEvent::Invoked(action) => {
                    self.apply_settings(events);
                    self.run_action(action, events);
                }
                NavEvent::Exit => self.exit_menu(events),
                _ => {}
            }
        }

        let long_press_ms = self.config.long_press_ms;
        let modifier = &self.switches.modifier;
        if modifier.pressed() && modifier.long_pressed(long_press_ms) {
            if !self.mod_long_press {
                // Leave without committing or cancelling; the path is kept
                self.mod_long_press = true;
                self.exit_menu(events);
                self.blank_frame = true;
            }
        } else if modifier.release() {
            if !self.mod_long_press && self.nav.cancel(self.menu.tree_mut()) == NavEvent::Exit {
                self.exit_menu(events);
            }
            self.mod_long_press = false;
        }
    }

    fn enter_menu(&mut self, events: &mut Events) {
        self.mode = Mode::Menu;
        self.notice = None;
        emit(events, ControllerEvent::MenuEntered);
    }

    fn exit_menu(&mut self, events: &mut Events) {
        self.mode = Mode::Keys;
        self.notice = None;
        emit(events, ControllerEvent::MenuExited);
    }

    fn layer_changed(&mut self, events: &mut Events) {
        self.caption_ticks = 0;
        emit(
            events,
            ControllerEvent::LayerChanged {
                profile: self.ctx.profile_index,
                layer: self.ctx.layer_index,
            },
        );
    }

    fn apply_settings(&mut self, events: &mut Events) {
        let applied = self.menu.apply_to(&mut self.ctx);
        if applied.profile_changed {
            self.caption_ticks = 0;
            emit(
                events,
                ControllerEvent::ProfileChanged {
                    profile: self.ctx.profile_index,
                },
            );
        }
        if applied.timing_changed {
            emit(events, ControllerEvent::TimingChanged(self.ctx.timing));
        }
    }

    fn run_action(&mut self, action: MenuAction, events: &mut Events) {
        match action {
            MenuAction::Save => {
                let display = &mut self.display;
                let result = self.store.save(&self.ctx, |phase| {
                    let step = match phase {
                        SaveProgress::Erasing => "Erasing...",
                        SaveProgress::Writing => "Writing...",
                    };
                    // Drawn immediately: the save blocks the loop
                    if let Err(e) = draw_lines_now(display, "Saving", step) {
                        emit(events, ControllerEvent::Display(e));
                    }
                });
                match result {
                    Ok(()) => {
                        self.show_notice(["Save", "Saved"]);
                        emit(events, ControllerEvent::SettingsSaved);
                    }
                    Err(e) => {
                        self.show_notice(["Save", "Save failed"]);
                        emit(events, ControllerEvent::SaveFailed(e));
                    }
                }
            }
            MenuAction::Load => match self.restore() {
                Ok(record) => {
                    self.show_notice(["Load", "Loaded"]);
                    emit(events, ControllerEvent::SettingsLoaded(record));
                }
                Err(e) => {
                    let line = match e {
                        SettingsError::BadMagic => "No saved data",
                        _ => "Load failed",
                    };
                    self.show_notice(["Load", line]);
                    emit(events, ControllerEvent::LoadFailed(e));
                }
            },
        }
    }

    fn show_notice(&mut self, lines: [&'static str; 2]) {
        self.notice = Some(Notice {
            lines,
            remaining: NOTICE_TICKS,
        });
    }

    fn render(&mut self) -> Result<(), DisplayError> {
        if self.blank_frame {
            self.blank_frame = false;
            self.indicator.clear();
            self.indicator.flush();
            self.display.clear()?;
            return self.display.flush();
        }

        match self.mode {
            Mode::Keys => self.render_keys(),
            Mode::Menu => self.render_menu(),
        }
    }

    fn render_keys(&mut self) -> Result<(), DisplayError> {
        let layer = self.ctx.layer(&self.keymap);

        self.indicator.clear();
        self.indicator
            .set_color(layer.color.scale(self.config.brightness));
        self.indicator.flush();

        self.display.clear()?;
        if self.caption_ticks < CAPTION_TICKS {
            self.display.draw_lines(layer.captions[0], layer.captions[1])?;
            self.display.draw_progress((self.caption_ticks / 2) as u8)?;
            self.caption_ticks += 1;
        }
        self.display.flush()
    }

    fn render_menu(&mut self) -> Result<(), DisplayError> {
        self.indicator.clear();
        self.indicator.flush();

        if let Some(notice) = self.notice.as_mut() {
            notice.remaining = notice.remaining.saturating_sub(1);
            let lines = notice.lines;
            if notice.remaining == 0 {
                self.notice = None;
            }
            return draw_lines_now(&mut self.display, lines[0], lines[1]);
        }

        let current = self.nav.current();
        let tree = self.menu.tree();
        let value = tree.value_string(current);
        draw_lines_now(&mut self.display, tree.caption(current), &value)
    }
}

fn draw_lines_now<D: StatusDisplay>(
    display: &mut D,
    line1: &str,
    line2: &str,
) -> Result<(), DisplayError> {
    display.clear()?;
    display.draw_lines(line1, line2)?;
    display.flush()
}
