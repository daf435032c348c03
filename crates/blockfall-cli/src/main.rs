mod command;
mod logging;
mod play;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
