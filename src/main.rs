//! CiteMigrate packager - builds a signed macOS .app with PyInstaller.
//!
//! Runs the packaging pipeline once, strictly in order, and exits with 0 only
//! if the bundle exists at `dist/<name>.app`.

use citemigrate_packager::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse_args();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
