mod command;
mod config;
mod logging;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
