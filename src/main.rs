use std::process::ExitCode;

fn main() -> ExitCode {
    endpoint_console_lib::run()
}
