use std::process::ExitCode;

fn main() -> ExitCode {
    menubot_cli::run()
}
