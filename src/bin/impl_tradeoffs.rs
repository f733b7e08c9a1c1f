use tradeoff_chart::cli::{CliCommand, USAGE, parse_args};
use tradeoff_chart::{ChartResult, telemetry, write_tradeoffs_chart};

fn main() {
    let _ = telemetry::init_default_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        if matches!(err, tradeoff_chart::ChartError::Usage(_)) {
            eprintln!("{USAGE}");
        }
        std::process::exit(err.exit_code());
    }
}

fn run() -> ChartResult<()> {
    match parse_args(std::env::args_os().skip(1))? {
        CliCommand::Help => {
            println!("{USAGE}");
            Ok(())
        }
        CliCommand::Render { output } => write_tradeoffs_chart(output).map(|_| ()),
    }
}
