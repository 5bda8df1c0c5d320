//! Workspaces and the keys used to reach them.
use crate::{
    bindings::{Action, KeyBinding, Modifier},
    layouts,
};

/// Workspace names paired with the layout they should start in.
pub const GROUPS: [(&str, &str); 6] = [
    ("I", layouts::COLUMNS),
    ("II", layouts::COLUMNS),
    ("III", layouts::COLUMNS),
    ("IV", layouts::COLUMNS),
    ("V", layouts::COLUMNS),
    ("VI", layouts::COLUMNS),
];

/// Hotkeys for each workspace, paired with [`GROUPS`] by position. There is
/// one more key than there are workspaces: `p` is currently unbound.
pub const GROUP_KEYS: [&str; 7] = ["s", "d", "f", "u", "i", "o", "p"];

pub fn workspace_names() -> Vec<&'static str> {
    GROUPS.iter().map(|(name, _)| *name).collect()
}

/// Two bindings per workspace, in declaration order: `M-<key>` switches to
/// the workspace and `M-S-<key>` sends the focused client there.
pub fn workspace_bindings() -> Vec<KeyBinding> {
    GROUPS
        .iter()
        .zip(GROUP_KEYS.iter())
        .enumerate()
        .flat_map(|(ix, (_, key))| {
            vec![
                KeyBinding::new(&[Modifier::Meta], key, Action::FocusWorkspace(ix)),
                KeyBinding::new(
                    &[Modifier::Meta, Modifier::Shift],
                    key,
                    Action::ClientToWorkspace(ix),
                ),
            ]
        })
        .collect()
}
