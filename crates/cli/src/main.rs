use std::process::ExitCode;

fn main() -> ExitCode {
    ecopack_cli::run()
}
