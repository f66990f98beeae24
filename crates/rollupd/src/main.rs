use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match rollupd::run_daemon() {
        Ok(never) => match never {},
        Err(error) => {
            let _ = writeln!(io::stderr(), "rollupd: {error}");
            ExitCode::FAILURE
        }
    }
}
