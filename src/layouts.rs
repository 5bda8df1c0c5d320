//! Layouts available on every workspace.
use penrose::core::{
    client::Client,
    data_types::Region,
    layout::{monocle, side_stack, Layout, LayoutConf},
    xconnection::Xid,
};

pub const COLUMNS: &str = "[cols]";
pub const MAX: &str = "[max]";
pub const VERTICAL: &str = "[vert]";

// Default number of clients in the main area and its share of the screen
const N_MAIN: u32 = 1;
const RATIO: f32 = 0.6;

pub fn layouts() -> Vec<Layout> {
    // A single visible client: no gaps and re-run on focus change.
    let max_conf = LayoutConf {
        floating: false,
        gapless: true,
        follow_focus: true,
        allow_wrapping: true,
    };

    vec![
        Layout::new(COLUMNS, LayoutConf::default(), side_stack, N_MAIN, RATIO),
        Layout::new(MAX, max_conf, monocle, N_MAIN, RATIO),
        Layout::new(VERTICAL, LayoutConf::default(), rows, N_MAIN, RATIO),
    ]
}

/// Every client full width, stacked top to bottom in equal rows.
///
/// Main area settings are ignored.
pub fn rows(
    clients: &[&Client],
    _: Option<Xid>,
    monitor_region: &Region,
    _: u32,
    _: f32,
) -> Vec<(Xid, Option<Region>)> {
    clients
        .iter()
        .zip(row_regions(monitor_region, clients.len()))
        .map(|(c, r)| (c.id(), Some(r)))
        .collect()
}

/// Split `region` into `n` full width rows. Integer division leaves a
/// remainder: the last row takes it so the rows always cover the region.
pub fn row_regions(region: &Region, n: usize) -> Vec<Region> {
    if n == 0 {
        return vec![];
    }

    let (x, y, w, h) = region.values();
    let n = n as u32;
    let row_h = h / n;

    (0..n)
        .map(|i| {
            let height = if i == n - 1 { h - row_h * i } else { row_h };
            Region::new(x, y + row_h * i, w, height)
        })
        .collect()
}
