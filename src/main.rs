mod cli;
mod clipboard;
mod error;
mod exits;
mod output;
mod pass;
mod qr;
mod store;
mod totp;

use clap::Parser;

fn main() {
    exits::install_handlers();
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0) };
    env_logger::Builder::from_default_env().init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli) {
        cli::prompts::error(&err.to_string());
        std::process::exit(1);
    }
}
