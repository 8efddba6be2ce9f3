use std::process::ExitCode;

use restmapper::cli::{run_cli, Outcome};

fn main() -> anyhow::Result<ExitCode> {
    Ok(match run_cli()? {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::NoMatch => ExitCode::from(1),
    })
}
