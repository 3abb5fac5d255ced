#[macro_use]
extern crate log;

mod cli;
mod config;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}
