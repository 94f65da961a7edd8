use crate::cli::shared::{IoArgs, HELP_TEMPLATE};
use clap::Parser;
use std::io::Write;
use tracefmt::format_options::{FormatOptions, Locale};
use tracefmt::formatting::{FormattableValue, ValueFormatter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Format numbers and [low, high] ranges for display.",
    long_about = None,
    rename_all = "kebab-case",
    help_template = HELP_TEMPLATE,
    after_long_help = "\
EXAMPLES:
    $ tracefmt format 0 123456 3.14159 '[-Infinity, 10]' '[5, Infinity]' '[1, 2]'
    0
    1.23e+5
    3.142
    < 10
    > 5
    1 - 2

    Values that are neither numbers nor bracketed ranges are printed unchanged.
    With no VALUES, each input line is formatted.
"
)]
pub struct FormatCmdArgs {
    #[command(flatten)]
    pub io: IoArgs,

    #[arg(
        help = "locale used for digit grouping and the decimal separator",
        short = 'l',
        long = "locale",
        default_value = "en"
    )]
    pub locale: Locale,

    #[arg(
        help = "mantissa fraction digits for exponential notation",
        long = "exponent-digits",
        default_value = "2"
    )]
    pub exponent_digits: usize,

    #[arg(
        help = "minimum fraction digits for non-integers",
        long = "min-fraction",
        default_value = "2"
    )]
    pub min_fraction_digits: usize,

    #[arg(
        help = "maximum fraction digits for non-integers",
        long = "max-fraction",
        default_value = "3"
    )]
    pub max_fraction_digits: usize,

    #[arg(help = "values to format (default: read one per line from input)", allow_hyphen_values = true)]
    pub values: Vec<String>,
}

pub fn format_command(args: FormatCmdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = FormatOptions::builder()
        .locale(args.locale)
        .exponent_digits(args.exponent_digits)
        .min_fraction_digits(args.min_fraction_digits)
        .max_fraction_digits(args.max_fraction_digits)
        .build()?;
    log::info!("format options: {:?}", options);
    let formatter = ValueFormatter::new(options);

    let input;
    let values: Vec<&str> = if args.values.is_empty() {
        input = args.io.read_input()?;
        input.lines().collect()
    } else {
        args.values.iter().map(String::as_str).collect()
    };

    let mut out = args.io.writer()?;
    for raw in values {
        let value: FormattableValue = raw.parse()?;
        writeln!(out, "{}", formatter.format(&value))?;
    }
    out.flush()?;
    Ok(())
}
