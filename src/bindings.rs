//! Key bindings as plain data.
//!
//! Bindings are declared as [`KeyBinding`] values so that the table can be
//! inspected (and tested) without an X server. [`compile`] turns the table
//! into the map penrose grabs keys from.
use std::collections::HashMap;

use penrose::{core::bindings::KeyBindings, xcb::helpers::parse_key_binding};
use tracing::{debug, warn};

use crate::{groups, Conn};

/// Key modifiers, rendered in the prefix syntax penrose parses (`M-S-h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Mod4 / the "super" key
    Meta,
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Meta => "M",
            Self::Shift => "S",
            Self::Ctrl => "C",
            Self::Alt => "A",
        }
    }
}

/// Something a key binding can do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    ShuffleNext,
    ShufflePrev,
    GrowMain,
    ShrinkMain,
    MoreMain,
    FewerMain,
    ToggleFullscreen,
    NextLayout,
    Kill,
    Restart,
    Shutdown,
    RunPrompt,
    Spawn(String),
    /// Show the workspace at this index on the active screen
    FocusWorkspace(usize),
    /// Move the focused client to the workspace at this index
    ClientToWorkspace(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub mods: Vec<Modifier>,
    pub key: String,
    pub action: Action,
    pub desc: Option<&'static str>,
}

impl KeyBinding {
    pub fn new(mods: &[Modifier], key: &str, action: Action) -> Self {
        Self {
            mods: mods.to_vec(),
            key: key.to_string(),
            action,
            desc: None,
        }
    }

    pub fn desc(mut self, desc: &'static str) -> Self {
        self.desc = Some(desc);
        self
    }

    /// The binding in penrose pattern syntax, e.g. `M-C-r`.
    pub fn pattern(&self) -> String {
        self.mods
            .iter()
            .map(|m| m.prefix())
            .chain(std::iter::once(self.key.as_str()))
            .collect::<Vec<_>>()
            .join("-")
    }
}

fn key(mods: &[Modifier], key: &str, action: Action, desc: &'static str) -> KeyBinding {
    KeyBinding::new(mods, key, action).desc(desc)
}

/// The full binding table: window and program bindings followed by the
/// per-workspace bindings from [`groups::workspace_bindings`].
pub fn key_bindings(terminal: &str) -> Vec<KeyBinding> {
    use Action::*;
    use Modifier::*;

    let mut bindings = vec![
        // focus
        key(&[Meta], "h", FocusPrev, "Move focus to left"),
        key(&[Meta], "l", FocusNext, "Move focus to right"),
        key(&[Meta], "j", FocusNext, "Move focus down"),
        key(&[Meta], "k", FocusPrev, "Move focus up"),
        key(&[Meta], "space", FocusNext, "Move window focus to other window"),
        // move clients within the stack
        key(&[Meta, Shift], "h", ShufflePrev, "Move window to the left"),
        key(&[Meta, Shift], "l", ShuffleNext, "Move window to the right"),
        key(&[Meta, Shift], "j", ShuffleNext, "Move window down"),
        key(&[Meta, Shift], "k", ShufflePrev, "Move window up"),
        // resize
        key(&[Meta, Ctrl], "h", ShrinkMain, "Grow window to the left"),
        key(&[Meta, Ctrl], "l", GrowMain, "Grow window to the right"),
        key(&[Meta, Ctrl], "j", FewerMain, "Grow window down"),
        key(&[Meta, Ctrl], "k", MoreMain, "Grow window up"),
        key(&[Meta], "m", ToggleFullscreen, "Maximize focused window"),
        // programs
        key(&[Meta], "Return", Spawn(terminal.to_string()), "Launch terminal"),
        key(&[Meta], "x", Spawn("rofi -show run".into()), "Launch App with rofi"),
        key(&[Meta], "c", Spawn("rofi -show window".into()), "Switch window with rofi"),
        key(&[Meta], "r", RunPrompt, "Spawn a command using a prompt"),
        key(
            &[Meta],
            "b",
            Spawn("light-locker-command -l".into()),
            "Lock the session",
        ),
        // layouts and session
        key(&[Meta], "Tab", NextLayout, "Toggle between layouts"),
        key(&[Meta], "w", Kill, "Kill focused window"),
        key(&[Meta, Ctrl], "r", Restart, "Restart penrose"),
        key(&[Meta, Ctrl], "q", Shutdown, "Shutdown penrose"),
    ];

    bindings.extend(groups::workspace_bindings());
    bindings
}

/// Resolve binding patterns against the keycodes known to the X server.
///
/// Patterns that do not parse are logged and dropped. If two bindings share a
/// pattern the later one wins.
pub fn compile(bindings: Vec<KeyBinding>, codes: &HashMap<String, u8>) -> KeyBindings<Conn> {
    let mut compiled: KeyBindings<Conn> = HashMap::new();

    for binding in bindings {
        let pattern = binding.pattern();
        let code = match parse_key_binding(pattern.clone(), codes) {
            Some(code) => code,
            None => {
                warn!("unable to parse key binding '{}', skipping", pattern);
                continue;
            }
        };

        debug!(
            "binding {} => {:?} ({})",
            pattern,
            binding.action,
            binding.desc.unwrap_or("-")
        );
        if compiled.insert(code, binding.action.into_handler()).is_some() {
            warn!("duplicate key binding '{}': keeping the last one", pattern);
        }
    }

    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn patterns_render_modifiers_in_order() {
        let b = KeyBinding::new(&[Modifier::Meta, Modifier::Ctrl], "r", Action::Restart);
        assert_eq!(b.pattern(), "M-C-r");

        let b = KeyBinding::new(&[], "F1", Action::Kill);
        assert_eq!(b.pattern(), "F1");
    }

    #[test]
    fn patterns_are_unique() {
        let bindings = key_bindings("termite");
        let mut seen = HashSet::new();
        for b in &bindings {
            assert!(seen.insert(b.pattern()), "duplicate binding {}", b.pattern());
        }
    }

    #[test]
    fn workspace_bindings_come_last() {
        let bindings = key_bindings("termite");
        let ws = groups::workspace_bindings();
        assert_eq!(&bindings[bindings.len() - ws.len()..], ws.as_slice());
    }

    #[test]
    fn terminal_is_configurable() {
        let bindings = key_bindings("alacritty");
        let launch = bindings.iter().find(|b| b.pattern() == "M-Return").unwrap();
        assert_eq!(launch.action, Action::Spawn("alacritty".into()));
        assert_eq!(launch.desc, Some("Launch terminal"));
    }

    fn codes() -> HashMap<String, u8> {
        [("a", 38), ("b", 56), ("Return", 36)]
            .iter()
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let bindings = vec![
            KeyBinding::new(&[Modifier::Meta], "a", Action::Kill),
            KeyBinding::new(&[Modifier::Meta], "no_such_key", Action::NextLayout),
            KeyBinding::new(&[Modifier::Meta, Modifier::Shift], "Return", Action::Restart),
        ];

        assert_eq!(compile(bindings, &codes()).len(), 2);
    }

    #[test]
    fn duplicate_patterns_keep_one_entry() {
        let bindings = vec![
            KeyBinding::new(&[Modifier::Meta], "b", Action::Kill),
            KeyBinding::new(&[Modifier::Meta], "b", Action::NextLayout),
            KeyBinding::new(&[Modifier::Meta, Modifier::Ctrl], "b", Action::Restart),
        ];

        assert_eq!(compile(bindings, &codes()).len(), 2);
    }

    #[test]
    fn every_static_binding_is_described() {
        let n_ws = groups::workspace_bindings().len();
        let bindings = key_bindings("termite");
        let static_bindings = &bindings[..bindings.len() - n_ws];
        assert!(static_bindings.iter().all(|b| b.desc.is_some()));
    }
}
