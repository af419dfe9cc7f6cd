mod error;
mod logging;
mod model;
mod render;
mod services;
mod theme;
mod ui;
mod widgets;
mod wizard;

use anyhow::Result;

fn main() -> Result<()> {
    ui::run()
}
