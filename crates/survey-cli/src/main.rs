mod cli;
mod cmd;
mod config;
mod logging;

fn main() -> anyhow::Result<()> {
    cli::main()
}
