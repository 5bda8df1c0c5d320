#[macro_use]
extern crate penrose;

use std::{
    fs::{self, File},
    path::Path,
};

use penrose::{
    contrib::hooks::{DefaultWorkspace, LayoutSymbolAsRootName},
    core::{
        bindings::MouseEvent, config::Config, helpers::keycodes_from_xmodmap,
        manager::WindowManager, ring::Selector,
    },
    logging_error_handler,
    xcb::{XcbConnection, XcbHooks},
    Backward, More, Result,
};

use penrose_nord::{
    bar, bindings, colors::LAYOUT_THEME, groups, hooks::*, layouts, Paths, FLOATING_CLASSES,
    TERMINAL,
};
use simplelog::{LevelFilter, SimpleLogger, WriteLogger};
use tracing::{info, warn};

fn main() -> Result<()> {
    // tracing events (ours and penrose's) are forwarded to the log crate and
    // written out by simplelog
    let found = Paths::from_env();
    let paths = found
        .clone()
        .unwrap_or_else(|| Paths::new(Path::new("/tmp"), None));

    let log_file = found.as_ref().and_then(|p| {
        if let Some(dir) = p.log_file.parent() {
            let _ = fs::create_dir_all(dir);
        }
        File::create(&p.log_file).ok()
    });
    if let Some(file) = log_file {
        WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)
            .expect("failed to init logging");
    } else {
        SimpleLogger::init(LevelFilter::Info, simplelog::Config::default())
            .expect("failed to init logging");
    }
    if found.is_none() {
        warn!("unable to find a home directory: using paths under /tmp");
    }

    let theme = LAYOUT_THEME;
    let bar = bar::bar(TERMINAL);

    let mut config_builder = Config::default().builder();
    config_builder
        .workspaces(groups::workspace_names())
        .floating_classes(FLOATING_CLASSES.to_vec())
        .border_px(theme.border_width)
        .gap_px(theme.margin)
        .focused_border(theme.border_focus)?
        .unfocused_border(theme.border_normal)?
        // polybar is drawn by a separate process: leave room for it
        .show_bar(true)
        .top_bar(true)
        .bar_height(bar.height)
        .layouts(layouts::layouts());

    // Build and validate config
    let config = config_builder.build().expect("invalid penrose config");

    let mut hooks: XcbHooks = vec![
        Box::new(ClientLogHook {}),
        Box::new(StartupHook {
            bar,
            bar_config: paths.bar_config,
            wallpaper: paths.wallpaper,
            autostart: paths.autostart,
            autostart_marker: paths.autostart_marker,
        }),
        // read back by the bar's current layout widget
        Box::new(RootLayoutName {}),
        LayoutSymbolAsRootName::new(),
    ];

    // Apply each workspace's starting layout the first time it is shown empty
    for (name, layout) in groups::GROUPS.iter() {
        hooks.push(DefaultWorkspace::new(*name, *layout, Vec::<&str>::new()));
    }

    let codes = keycodes_from_xmodmap();
    let key_bindings = bindings::compile(bindings::key_bindings(TERMINAL), &codes);
    info!("{} key bindings grabbed", key_bindings.len());

    // Tiled windows have no free position or size: dragging shuffles the
    // stack and resizing grows the main area instead.
    let mouse_bindings = gen_mousebindings! {
        Press Left + [Meta] => |wm: &mut WindowManager<_>, _: &MouseEvent| wm.drag_client(Backward),
        Press Right + [Meta] => |wm: &mut WindowManager<_>, _: &MouseEvent| wm.update_main_ratio(More),
        Press Middle + [Meta] => |wm: &mut WindowManager<_>, _: &MouseEvent| wm.toggle_client_fullscreen(&Selector::Focused)
    };

    let conn = XcbConnection::new()?;
    let mut wm = WindowManager::new(config, conn, hooks, logging_error_handler());
    wm.init()?;
    wm.detect_screens()?;

    wm.grab_keys_and_run(key_bindings, mouse_bindings)?;
    Ok(())
}
