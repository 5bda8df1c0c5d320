use penrose::{
    contrib::extensions::dmenu::*,
    core::{bindings::KeyEventHandler, helpers::spawn, ring::Selector},
    Backward, Forward, Less, More,
};
use tracing::info;

use crate::{bindings::Action, Conn, Wm};

impl Action {
    /// Convert this action into a handler penrose can run when the bound key
    /// is pressed.
    pub fn into_handler(self) -> KeyEventHandler<Conn> {
        match self {
            Action::FocusNext => run_internal!(cycle_client, Forward),
            Action::FocusPrev => run_internal!(cycle_client, Backward),
            Action::ShuffleNext => run_internal!(drag_client, Forward),
            Action::ShufflePrev => run_internal!(drag_client, Backward),
            Action::GrowMain => run_internal!(update_main_ratio, More),
            Action::ShrinkMain => run_internal!(update_main_ratio, Less),
            Action::MoreMain => run_internal!(update_max_main, More),
            Action::FewerMain => run_internal!(update_max_main, Less),
            Action::ToggleFullscreen => {
                run_internal!(toggle_client_fullscreen, &Selector::Focused)
            }
            Action::NextLayout => run_internal!(cycle_layout, Forward),
            Action::Kill => run_internal!(kill_client),
            // run-penrose restarts us in a loop, so exiting is a restart
            Action::Restart => run_internal!(exit),
            Action::Shutdown => Box::new(move |wm: &mut Wm| {
                spawn("pkill -fi run-penrose")?;
                wm.exit()
            }),
            Action::RunPrompt => run_prompt(),
            Action::Spawn(cmd) => Box::new(move |_: &mut Wm| spawn(cmd.as_str())),
            Action::FocusWorkspace(ix) => {
                Box::new(move |wm: &mut Wm| wm.focus_workspace(&Selector::Index(ix)))
            }
            Action::ClientToWorkspace(ix) => {
                Box::new(move |wm: &mut Wm| wm.client_to_workspace(&Selector::Index(ix)))
            }
        }
    }
}

/// Prompt for a command with dmenu and run whatever was typed or picked.
pub fn run_prompt() -> KeyEventHandler<Conn> {
    Box::new(move |wm: &mut Wm| {
        let menu = DMenu::new("run: ", Vec::<String>::new(), DMenuConfig::default());
        let screen_index = wm.active_screen_index();

        match menu.run(screen_index) {
            Ok(MenuMatch::UserInput(cmd)) | Ok(MenuMatch::Line(_, cmd)) if !cmd.is_empty() => {
                info!("running '{}' from prompt", cmd);
                spawn(cmd)
            }
            _ => Ok(()),
        }
    })
}
