//! The status bar.
//!
//! penrose leaves drawing a bar to an external program: the widget list below
//! is rendered into a [polybar](https://github.com/polybar/polybar) config
//! that is written out and launched when the window manager starts.
use std::{fmt, fs, io, path::Path};

use crate::colors::{color, with_alpha};

pub const BAR_NAME: &str = "penrose";
pub const FONT: &str = "Ubuntu Mono";
pub const FONT_SIZE: u32 = 12;
pub const PADDING: u32 = 10;
pub const HEIGHT: u32 = 24;

// Palette indices for widgets that do not set their own colours
const FOREGROUND: usize = 0;
const BACKGROUND: usize = 1;
const HIGHLIGHT: usize = 3;
const DIM: usize = 10;

const LAYOUT_EXEC: &str = r#"xprop -root -notype WM_NAME | sed -n 's/^WM_NAME = "\(.*\)"$/\1/p'"#;

/// A single element of the bar, in the order it appears left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    TextBox {
        text: &'static str,
        font_size: Option<u32>,
        padding: Option<u32>,
        foreground: Option<usize>,
    },
    /// The symbol of the active layout, read from the root window name
    CurrentLayout,
    /// Workspace names, the active one underlined
    GroupBox {
        padding: u32,
        foreground: usize,
    },
    /// Fills the remaining space: widgets after it are right aligned
    Spacer,
    CheckUpdates {
        interval: u32,
        on_click: String,
        foreground: usize,
    },
    /// `format` may use `{char}` and `{percent}`
    Battery {
        format: &'static str,
        charge_char: &'static str,
        discharge_char: &'static str,
        foreground: usize,
    },
    Volume {
        channel: &'static str,
        foreground: usize,
    },
    /// `format` is a strftime format string
    Clock {
        format: &'static str,
        foreground: usize,
    },
    /// `format` may use `{quality}`
    Wlan {
        interface: &'static str,
        format: &'static str,
        disconnected_message: &'static str,
        foreground: usize,
    },
}

impl Widget {
    fn kind(&self) -> &'static str {
        match self {
            Self::TextBox { .. } => "text",
            Self::CurrentLayout => "layout",
            Self::GroupBox { .. } => "groups",
            Self::Spacer => "spacer",
            Self::CheckUpdates { .. } => "updates",
            Self::Battery { .. } => "battery",
            Self::Volume { .. } => "volume",
            Self::Clock { .. } => "clock",
            Self::Wlan { .. } => "wlan",
        }
    }

    fn font_size(&self) -> Option<u32> {
        match self {
            Self::TextBox { font_size, .. } => *font_size,
            _ => None,
        }
    }
}

fn sep() -> Widget {
    Widget::TextBox {
        text: "|",
        font_size: Some(18),
        padding: Some(0),
        foreground: None,
    }
}

fn icon(text: &'static str, font_size: u32, padding: Option<u32>, foreground: usize) -> Widget {
    Widget::TextBox {
        text,
        font_size: Some(font_size),
        padding,
        foreground: Some(foreground),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: &'static str,
    pub height: u32,
    pub opacity: f64,
    pub widgets: Vec<Widget>,
}

/// The bar shown at the top of each screen. `terminal` is used for commands
/// launched by clicking on widgets.
pub fn bar(terminal: &str) -> Bar {
    let widgets = vec![
        icon("\u{f303}", 28, Some(4), 8),
        Widget::CurrentLayout,
        sep(),
        Widget::GroupBox {
            padding: 15,
            foreground: 6,
        },
        sep(),
        Widget::Spacer,
        sep(),
        icon("\u{f019}", 28, None, 8),
        Widget::CheckUpdates {
            interval: 1800,
            on_click: format!("{} -e sudo pacman -Syu", terminal),
            foreground: 8,
        },
        sep(),
        Widget::Battery {
            format: "{char} {percent}",
            charge_char: "\u{f0e7}",
            discharge_char: "\u{f242}",
            foreground: 4,
        },
        sep(),
        icon("\u{f028}", 28, Some(4), 5),
        Widget::Volume {
            channel: "Master",
            foreground: 5,
        },
        sep(),
        icon("\u{f073}", 25, Some(4), 7),
        Widget::Clock {
            format: "%Y-%m-%d %a",
            foreground: 7,
        },
        icon("\u{f017}", 25, Some(4), 8),
        Widget::Clock {
            format: "%H:%M",
            foreground: 8,
        },
        sep(),
        icon("直", 24, None, 11),
        Widget::Wlan {
            interface: "wlp3s0",
            format: "{quality}%",
            disconnected_message: "",
            foreground: 11,
        },
    ];

    Bar {
        name: BAR_NAME,
        height: HEIGHT,
        opacity: 0.9,
        widgets,
    }
}

/// One `[header]` block of an ini file.
struct Section {
    header: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            entries: vec![],
        }
    }

    fn set(&mut self, key: impl Into<String>, val: impl ToString) -> &mut Self {
        self.entries.push((key.into(), val.to_string()));
        self
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.header)?;
        for (k, v) in &self.entries {
            // polybar drops surrounding whitespace unless the value is quoted
            if v.is_empty() || v.trim() != v {
                writeln!(f, "{} = \"{}\"", k, v)?;
            } else {
                writeln!(f, "{} = {}", k, v)?;
            }
        }
        Ok(())
    }
}

impl Bar {
    /// Font sizes in use, the default first. A widget's polybar font index is
    /// its position in this list plus one.
    fn font_sizes(&self) -> Vec<u32> {
        let mut sizes = vec![FONT_SIZE];
        for size in self.widgets.iter().filter_map(Widget::font_size) {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
        sizes
    }

    fn module_name(ix: usize, w: &Widget) -> String {
        format!("{}-{}", w.kind(), ix)
    }

    /// Module names either side of the first [`Widget::Spacer`]. Any further
    /// spacers are ignored.
    pub fn module_split(&self) -> (Vec<String>, Vec<String>) {
        let mut left = vec![];
        let mut right = vec![];
        let mut past_spacer = false;

        for (ix, w) in self.widgets.iter().enumerate() {
            match w {
                Widget::Spacer => past_spacer = true,
                _ if past_spacer => right.push(Self::module_name(ix, w)),
                _ => left.push(Self::module_name(ix, w)),
            }
        }

        (left, right)
    }

    /// Render the bar as a polybar config file.
    pub fn render(&self) -> String {
        let sizes = self.font_sizes();
        let (left, right) = self.module_split();

        let mut bar = Section::new(format!("bar/{}", self.name));
        bar.set("width", "100%")
            .set("height", self.height)
            .set("bottom", "false")
            .set("background", with_alpha(color(BACKGROUND), self.opacity))
            .set("foreground", color(FOREGROUND))
            .set("line-size", 2)
            .set("wm-restack", "generic");
        for (i, size) in sizes.iter().enumerate() {
            bar.set(format!("font-{}", i), format!("{}:pixelsize={};2", FONT, size));
        }
        bar.set("modules-left", left.join(" "))
            .set("modules-right", right.join(" "));

        let mut sections = vec![bar];
        for (ix, w) in self.widgets.iter().enumerate() {
            if let Some(section) = self.module(ix, w, &sizes) {
                sections.push(section);
            }
        }

        sections
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn module(&self, ix: usize, w: &Widget, sizes: &[u32]) -> Option<Section> {
        let mut m = Section::new(format!("module/{}", Self::module_name(ix, w)));

        match w {
            Widget::Spacer => return None,

            Widget::TextBox {
                text,
                font_size,
                padding,
                foreground,
            } => {
                let font = font_size.and_then(|s| sizes.iter().position(|&f| f == s));
                m.set("type", "custom/text")
                    .set("content", text)
                    .set("content-foreground", color(foreground.unwrap_or(FOREGROUND)))
                    .set("content-padding", px(padding.unwrap_or(PADDING)));
                if let Some(i) = font {
                    m.set("content-font", i + 1);
                }
            }

            Widget::CurrentLayout => {
                // prints nothing while the root window has no name
                m.set("type", "custom/script")
                    .set("exec", LAYOUT_EXEC)
                    .set("interval", 1)
                    .set("label", "%output%")
                    .set("format-padding", px(PADDING));
            }

            Widget::GroupBox {
                padding,
                foreground,
            } => {
                m.set("type", "internal/xworkspaces")
                    .set("enable-click", "true")
                    .set("enable-scroll", "false")
                    .set("label-active", "%name%")
                    .set("label-active-foreground", color(*foreground))
                    .set("label-active-underline", color(HIGHLIGHT))
                    .set("label-active-padding", px(*padding))
                    .set("label-occupied", "%name%")
                    .set("label-occupied-foreground", color(*foreground))
                    .set("label-occupied-padding", px(*padding))
                    .set("label-empty", "%name%")
                    .set("label-empty-foreground", color(DIM))
                    .set("label-empty-padding", px(*padding));
            }

            Widget::CheckUpdates {
                interval,
                on_click,
                foreground,
            } => {
                m.set("type", "custom/script")
                    .set("exec", "checkupdates 2>/dev/null | wc -l")
                    .set("interval", interval)
                    .set("click-left", on_click)
                    .set("label", "%output%")
                    .set("format-foreground", color(*foreground))
                    .set("format-padding", px(PADDING));
            }

            Widget::Battery {
                format,
                charge_char,
                discharge_char,
                foreground,
            } => {
                let label = |c: &str| format.replace("{char}", c).replace("{percent}", "%percentage%%");
                m.set("type", "internal/battery")
                    .set("format-charging", "<label-charging>")
                    .set("format-discharging", "<label-discharging>")
                    .set("label-charging", label(charge_char))
                    .set("label-discharging", label(discharge_char))
                    .set("label-full", label(charge_char))
                    .set("format-charging-foreground", color(*foreground))
                    .set("format-discharging-foreground", color(*foreground))
                    .set("format-full-foreground", color(*foreground))
                    .set("format-charging-padding", px(PADDING))
                    .set("format-discharging-padding", px(PADDING))
                    .set("format-full-padding", px(PADDING));
            }

            Widget::Volume {
                channel,
                foreground,
            } => {
                m.set("type", "internal/alsa")
                    .set("master-mixer", channel)
                    .set("format-volume", "<label-volume>")
                    .set("label-volume", "%percentage%%")
                    .set("format-volume-foreground", color(*foreground))
                    .set("format-volume-padding", px(PADDING))
                    .set("label-muted", "M")
                    .set("format-muted-foreground", color(*foreground))
                    .set("format-muted-padding", px(PADDING));
            }

            Widget::Clock { format, foreground } => {
                m.set("type", "internal/date")
                    .set("interval", 1)
                    .set("date", format)
                    .set("label", "%date%")
                    .set("format-foreground", color(*foreground))
                    .set("format-padding", px(PADDING));
            }

            Widget::Wlan {
                interface,
                format,
                disconnected_message,
                foreground,
            } => {
                m.set("type", "internal/network")
                    .set("interface", interface)
                    .set("label-connected", format.replace("{quality}", "%signal%"))
                    .set("label-disconnected", disconnected_message)
                    .set("format-connected-foreground", color(*foreground))
                    .set("format-connected-padding", px(PADDING))
                    .set("format-disconnected-foreground", color(*foreground));
            }
        }

        Some(m)
    }

    /// Render the bar and write it to `path`, creating parent directories as
    /// needed.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.render())
    }

    /// Arguments to `polybar` that launch this bar from the config at `path`.
    pub fn args(&self, path: &Path) -> Vec<String> {
        vec![
            "--reload".to_string(),
            format!("--config={}", path.display()),
            self.name.to_string(),
        ]
    }
}

fn px(n: u32) -> String {
    format!("{}px", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line<'a>(rendered: &'a str, key: &str) -> Option<&'a str> {
        let prefix = format!("{} = ", key);
        rendered
            .lines()
            .find(|l| l.starts_with(&prefix))
            .map(|l| &l[prefix.len()..])
    }

    #[test]
    fn modules_split_at_spacer() {
        let (left, right) = bar("termite").module_split();
        assert_eq!(left, vec!["text-0", "layout-1", "text-2", "groups-3", "text-4"]);
        assert_eq!(right.first().map(String::as_str), Some("text-6"));
        assert_eq!(right.last().map(String::as_str), Some("wlan-21"));
        assert!(!right.iter().chain(left.iter()).any(|m| m.starts_with("spacer")));
    }

    #[test]
    fn no_spacer_keeps_everything_left() {
        let b = Bar {
            name: "test",
            height: 20,
            opacity: 1.0,
            widgets: vec![Widget::CurrentLayout, sep()],
        };
        let (left, right) = b.module_split();
        assert_eq!(left, vec!["layout-0", "text-1"]);
        assert!(right.is_empty());
    }

    #[test]
    fn font_sizes_are_deduplicated_in_order() {
        assert_eq!(bar("termite").font_sizes(), vec![12, 28, 18, 25, 24]);
    }

    #[test]
    fn bar_section_carries_theme() {
        let rendered = bar("termite").render();
        assert!(rendered.starts_with("[bar/penrose]\n"));
        assert_eq!(line(&rendered, "height"), Some("24"));
        assert_eq!(line(&rendered, "background"), Some("#e62e3440"));
        assert_eq!(line(&rendered, "foreground"), Some("#d8dee9"));
        assert_eq!(line(&rendered, "font-0"), Some("Ubuntu Mono:pixelsize=12;2"));
        assert_eq!(line(&rendered, "font-2"), Some("Ubuntu Mono:pixelsize=18;2"));
    }

    #[test]
    fn every_module_has_a_section() {
        let b = bar("termite");
        let rendered = b.render();
        let (left, right) = b.module_split();
        for name in left.iter().chain(right.iter()) {
            assert!(
                rendered.contains(&format!("[module/{}]\n", name)),
                "missing section for {}",
                name
            );
        }
        assert!(!rendered.contains("[module/spacer"));
    }

    #[test]
    fn widget_formats_are_translated() {
        let rendered = bar("termite").render();
        assert_eq!(line(&rendered, "label-charging"), Some("\u{f0e7} %percentage%%"));
        assert_eq!(line(&rendered, "label-connected"), Some("%signal%%"));
        assert_eq!(line(&rendered, "label-disconnected"), Some("\"\""));
        assert_eq!(line(&rendered, "click-left"), Some("termite -e sudo pacman -Syu"));
        assert_eq!(line(&rendered, "interval"), Some("1"));
        assert!(rendered.contains("date = %Y-%m-%d %a\n"));
        assert!(rendered.contains("date = %H:%M\n"));
    }

    #[test]
    fn separators_use_their_own_font() {
        let rendered = bar("termite").render();
        let section = rendered
            .split("\n\n")
            .find(|s| s.starts_with("[module/text-2]"))
            .unwrap();
        assert!(section.contains("content = |\n"));
        assert!(section.contains("content-padding = 0px\n"));
        assert!(section.contains("content-font = 3\n"));
    }

    #[test]
    fn args_point_at_config() {
        let b = bar("termite");
        assert_eq!(
            b.args(Path::new("/home/my user/.config/polybar/penrose.ini")),
            vec![
                "--reload",
                "--config=/home/my user/.config/polybar/penrose.ini",
                "penrose"
            ]
        );
    }

    #[test]
    fn layout_module_is_blank_until_named() {
        let rendered = bar("termite").render();
        assert_eq!(line(&rendered, "exec"), Some(LAYOUT_EXEC));
        assert!(LAYOUT_EXEC.contains("sed -n"));
        assert!(!LAYOUT_EXEC.contains("cut"));
    }
}
