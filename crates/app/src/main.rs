//! Hamper Application CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = cli::Cli::parse().run().await {
        #[expect(clippy::print_stderr, reason = "CLI errors are reported on stderr")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
