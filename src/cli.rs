use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{ChartError, ChartResult};

pub const USAGE: &str = "usage: impl-tradeoffs <OUTPUT>\n\n\
Renders the WebAssembly runtime performance-tradeoffs chart to OUTPUT.\n\
The format follows the extension: .svg, .json (scene snapshot), .png (cairo-backend builds).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Render { output: PathBuf },
    Help,
}

/// Parses the arguments after the program name.
///
/// The first positional argument is the output path and anything after it is
/// ignored; `-h`/`--help` anywhere wins over everything else.
pub fn parse_args<I>(args: I) -> ChartResult<CliCommand>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Ok(CliCommand::Help);
    }

    let output = args
        .into_iter()
        .next()
        .ok_or_else(|| ChartError::Usage("missing output path".to_owned()))?;
    if output.is_empty() {
        return Err(ChartError::Usage("output path must not be empty".to_owned()));
    }

    Ok(CliCommand::Render {
        output: PathBuf::from(output),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{CliCommand, parse_args};
    use crate::error::ChartError;

    #[test]
    fn single_path_is_a_render_command() {
        let command = parse_args(["doc/impl-tradeoffs.svg"]).expect("parse");
        assert_eq!(
            command,
            CliCommand::Render {
                output: PathBuf::from("doc/impl-tradeoffs.svg")
            }
        );
    }

    #[test]
    fn missing_path_is_a_usage_error() {
        let err = parse_args(Vec::<String>::new()).expect_err("usage");
        assert!(matches!(err, ChartError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn arguments_after_the_path_are_ignored() {
        let command = parse_args(["a.svg", "b.svg"]).expect("parse");
        assert_eq!(
            command,
            CliCommand::Render {
                output: PathBuf::from("a.svg")
            }
        );
    }

    #[test]
    fn help_flag_wins() {
        assert_eq!(parse_args(["out.svg", "--help"]).expect("help"), CliCommand::Help);
    }
}
