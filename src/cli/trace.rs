use crate::cli::shared::{IoArgs, HELP_TEMPLATE};
use clap::Parser;
use std::io::Write;
use tracefmt::error_report::ErrorReport;
use tracefmt::stack_trace::parse_stack;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Normalize a runtime stack trace (Chrome, WinJS or Gecko dialect) into one frame per line.",
    long_about = None,
    rename_all = "kebab-case",
    help_template = HELP_TEMPLATE,
    after_long_help = "\
EXAMPLES:
    $ printf '    at initMap (http://localhost/bundle.js:389:18)\\n' | tracefmt trace
    initMap (http://localhost/bundle.js:389:18)

    $ tracefmt trace -i stack.txt --name TypeError --kind TypeError --message 'TypeError: boom'
    TypeError: TypeError
    : boom
      at initMap: (http://localhost/bundle.js:389:18)
"
)]
pub struct TraceCmdArgs {
    #[command(flatten)]
    pub io: IoArgs,

    #[arg(help = "write frames (or the error report) as JSON", long = "json")]
    pub json: bool,

    #[arg(help = "error name; renders a full error report", long = "name")]
    pub name: Option<String>,

    #[arg(help = "error type, removed from the message", long = "kind")]
    pub kind: Option<String>,

    #[arg(help = "error message", long = "message")]
    pub message: Option<String>,
}

impl TraceCmdArgs {
    fn wants_report(&self) -> bool {
        self.name.is_some() || self.kind.is_some() || self.message.is_some()
    }
}

pub fn trace_command(args: TraceCmdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stack = args.io.read_input()?;
    let mut out = args.io.writer()?;

    if args.wants_report() {
        let report = ErrorReport::new(
            args.name.as_deref().unwrap_or_default(),
            args.kind.as_deref().unwrap_or_default(),
            args.message.as_deref().unwrap_or_default(),
            &stack,
        );
        log::info!(
            "parsed {} frames, dropped {} lines",
            report.frames.len(),
            report.dropped_lines
        );
        if args.json {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", report)?;
        }
    } else {
        let parsed = parse_stack(&stack);
        log::info!(
            "parsed {} frames, dropped {} lines",
            parsed.frames.len(),
            parsed.dropped.len()
        );
        if args.json {
            serde_json::to_writer_pretty(&mut out, &parsed.frames)?;
            writeln!(out)?;
        } else {
            for frame in &parsed.frames {
                writeln!(out, "{}", frame)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
