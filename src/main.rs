use clap::Parser;

use role_console::cli::{self, Cli, Command};
use role_console::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The interactive screen owns the terminal, so its logs go to a file
    match cli.command {
        None | Some(Command::Browse) => logging::init_file_logging(),
        Some(_) => logging::init_stderr_logging(),
    }

    cli::run(cli).await
}
