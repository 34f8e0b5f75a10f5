//! Anime4K - command-line upscaler for line art and anime imagery

use std::process::ExitCode;

use anime4k::cli;

fn main() -> ExitCode {
    cli::run()
}
