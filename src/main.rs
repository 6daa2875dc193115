use clap::Parser;

mod commands;
mod output;
mod report;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version = VERSION)]
#[command(about = "Rename the product identity across the current directory tree")]
struct Cli {
    #[command(flatten)]
    args: commands::rebrand::RebrandArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let exit_code = match commands::rebrand::run(cli.args) {
        Ok((result, exit_code)) => match report::print_summary(&result) {
            Ok(()) => exit_code,
            Err(err) => output::print_error(&err),
        },
        Err(err) => output::print_error(&err),
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
