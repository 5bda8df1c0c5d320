#[macro_use]
extern crate penrose;

use std::path::{Path, PathBuf};

use penrose::{WindowManager, XcbConnection};

pub mod actions;
pub mod bar;
pub mod bindings;
pub mod colors;
pub mod groups;
pub mod hooks;
pub mod layouts;

pub type Conn = XcbConnection;
pub type Wm = WindowManager<Conn>;

pub const TERMINAL: &str = "termite";

/// Windows with a matching WM_CLASS will always float
pub const FLOATING_CLASSES: [&str; 8] = [
    "confirmreset", // gitk
    "makebranch",   // gitk
    "maketag",      // gitk
    "ssh-askpass",
    "pinentry", // GPG key password entry
    "rofi",
    "dmenu",
    "polybar",
];

/// Files read and written outside of the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub log_file: PathBuf,
    pub bar_config: PathBuf,
    pub autostart: PathBuf,
    /// Present once the autostart script has run in this session. `None` when
    /// there is no runtime directory to keep it in.
    pub autostart_marker: Option<PathBuf>,
    pub wallpaper: PathBuf,
}

impl Paths {
    pub fn new(home: &Path, runtime_dir: Option<&Path>) -> Self {
        Self {
            log_file: home.join(".penrose/logs/output.log"),
            bar_config: home.join(".config/polybar/penrose.ini"),
            autostart: home.join(".config/penrose/autostart.sh"),
            autostart_marker: runtime_dir.map(|d| d.join("penrose-autostart")),
            wallpaper: home.join("Pictures/Wallpapers/wallpaper.jpeg"),
        }
    }

    /// Paths under the user's home directory, or `None` if it can't be found.
    pub fn from_env() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::new(&home, dirs::runtime_dir().as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_at_home() {
        let paths = Paths::new(Path::new("/home/nord"), Some(Path::new("/run/user/1000")));
        assert_eq!(paths.log_file, PathBuf::from("/home/nord/.penrose/logs/output.log"));
        assert_eq!(paths.bar_config, PathBuf::from("/home/nord/.config/polybar/penrose.ini"));
        assert_eq!(paths.autostart, PathBuf::from("/home/nord/.config/penrose/autostart.sh"));
        assert_eq!(
            paths.autostart_marker,
            Some(PathBuf::from("/run/user/1000/penrose-autostart"))
        );
    }

    #[test]
    fn no_runtime_dir_means_no_marker() {
        assert_eq!(Paths::new(Path::new("/home/nord"), None).autostart_marker, None);
    }
}
