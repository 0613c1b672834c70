//! Windcfg - check and resolve utility-CSS generator configuration

use std::process::ExitCode;

use windcfg::cli;

fn main() -> ExitCode {
    cli::run()
}
