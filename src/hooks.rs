//! Hooks run by penrose alongside its own event handling.
use std::{fs, path::PathBuf};

use penrose::core::{
    helpers::{spawn_for_output, spawn_with_args},
    hooks::Hook,
    manager::WindowManager,
    ring::Selector,
    xconnection::{XConn, Xid},
};
use tracing::{debug, info, warn};

use crate::bar::Bar;

/// Run a program without waiting on it. Failing to start it is logged and
/// otherwise ignored.
fn fire_and_forget(program: &str, args: &[&str]) {
    if let Err(e) = spawn_with_args(program, args) {
        warn!("unable to run '{}': {}", program, e);
    }
}

/// What to do about the autostart script when penrose starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autostart {
    Run,
    /// There is no script to run
    Missing,
    /// The script has already run in this session
    AlreadyRan,
}

/// The script runs once per session: restarting penrose does not run it
/// again while the marker left by the first run is present.
pub fn autostart_decision(script_exists: bool, marker_exists: bool) -> Autostart {
    match (script_exists, marker_exists) {
        (false, _) => Autostart::Missing,
        (true, true) => Autostart::AlreadyRan,
        (true, false) => Autostart::Run,
    }
}

/// Draws the bar, sets the wallpaper and runs the user's autostart script
/// once penrose has started.
pub struct StartupHook {
    pub bar: Bar,
    pub bar_config: PathBuf,
    pub wallpaper: PathBuf,
    pub autostart: PathBuf,
    pub autostart_marker: Option<PathBuf>,
}

impl StartupHook {
    fn launch_bar(&self) {
        if let Err(e) = self.bar.write_to(&self.bar_config) {
            warn!(
                "unable to write bar config to {}: {}",
                self.bar_config.display(),
                e
            );
            return;
        }

        // A restart leaves the previous bar running. Waiting on pkill keeps it
        // from racing the new bar.
        if let Err(e) = spawn_for_output("pkill -x polybar") {
            debug!("no running bar to stop: {}", e);
        }

        let args = self.bar.args(&self.bar_config);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        fire_and_forget("polybar", &args);
    }

    fn set_wallpaper(&self) {
        let wallpaper = self.wallpaper.display().to_string();
        fire_and_forget("feh", &["--no-fehbg", "--bg-fill", wallpaper.as_str()]);
    }

    pub fn run_autostart(&self) -> Autostart {
        let marker_exists = self
            .autostart_marker
            .as_ref()
            .map(|m| m.exists())
            .unwrap_or(false);
        let decision = autostart_decision(self.autostart.exists(), marker_exists);

        match decision {
            Autostart::Missing => {
                info!("no autostart script at {}", self.autostart.display());
            }
            Autostart::AlreadyRan => {
                info!("autostart script already ran this session");
            }
            Autostart::Run => {
                info!("running {}", self.autostart.display());
                fire_and_forget(&self.autostart.display().to_string(), &[]);

                match &self.autostart_marker {
                    Some(marker) => {
                        if let Err(e) = fs::write(marker, b"") {
                            warn!("unable to write {}: {}", marker.display(), e);
                        }
                    }
                    None => warn!("no runtime directory: autostart will run again on restart"),
                }
            }
        }

        decision
    }
}

impl<X: XConn> Hook<X> for StartupHook {
    fn startup(&mut self, _wm: &mut WindowManager<X>) -> penrose::Result<()> {
        self.launch_bar();
        self.set_wallpaper();
        self.run_autostart();

        Ok(())
    }
}

/// Keeps the root window name in step with the active layout symbol at
/// startup and on workspace switches. Layout changes are covered by
/// penrose's `LayoutSymbolAsRootName`.
pub struct RootLayoutName {}

impl RootLayoutName {
    fn update<X: XConn>(wm: &mut WindowManager<X>) -> penrose::Result<()> {
        let symbol = wm.current_layout_symbol().to_string();
        wm.set_root_window_name(&symbol)
    }
}

impl<X: XConn> Hook<X> for RootLayoutName {
    fn startup(&mut self, wm: &mut WindowManager<X>) -> penrose::Result<()> {
        Self::update(wm)
    }

    fn workspace_change(
        &mut self,
        wm: &mut WindowManager<X>,
        _previous_workspace: usize,
        _new_workspace: usize,
    ) -> penrose::Result<()> {
        Self::update(wm)
    }
}

/// Logs the class and title of each new client: handy when writing floating
/// rules.
pub struct ClientLogHook {}

impl<X: XConn> Hook<X> for ClientLogHook {
    fn new_client(&mut self, wm: &mut WindowManager<X>, id: Xid) -> penrose::Result<()> {
        match wm.client(&Selector::WinId(id)) {
            Some(c) => info!(
                "new client with WM_CLASS='{}' WM_NAME='{}'",
                c.wm_class(),
                c.wm_name()
            ),
            None => warn!("new client {} is not being tracked", id),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::bar;
    use tempfile::TempDir;

    fn hook(dir: &TempDir, script: &str) -> StartupHook {
        StartupHook {
            bar: bar("termite"),
            bar_config: dir.path().join("polybar.ini"),
            wallpaper: dir.path().join("wallpaper.jpeg"),
            autostart: dir.path().join(script),
            autostart_marker: Some(dir.path().join("penrose-autostart")),
        }
    }

    #[test]
    fn autostart_runs_once_per_session() {
        assert_eq!(autostart_decision(true, false), Autostart::Run);
        assert_eq!(autostart_decision(true, true), Autostart::AlreadyRan);
    }

    #[test]
    fn missing_script_is_never_run() {
        assert_eq!(autostart_decision(false, false), Autostart::Missing);
        assert_eq!(autostart_decision(false, true), Autostart::Missing);
    }

    #[test]
    fn missing_script_is_skipped_without_a_marker() {
        let dir = TempDir::new().unwrap();
        let h = hook(&dir, "autostart.sh");

        assert_eq!(h.run_autostart(), Autostart::Missing);
        assert!(!dir.path().join("penrose-autostart").exists());
    }

    #[test]
    fn marker_from_earlier_start_skips_script() {
        let dir = TempDir::new().unwrap();
        let h = hook(&dir, "autostart.sh");
        fs::write(&h.autostart, "#!/bin/sh\n").unwrap();
        fs::write(h.autostart_marker.as_ref().unwrap(), b"").unwrap();

        assert_eq!(h.run_autostart(), Autostart::AlreadyRan);
    }
}
