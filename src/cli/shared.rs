use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const HELP_TEMPLATE: &str =
    "{name} v{version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}{after-help}";

#[derive(Parser, Debug)]
pub struct IoArgs {
    #[arg(
        help = "input file (default: stdin)",
        short = 'i',
        long = "input",
        default_value = "-"
    )]
    pub input_path: PathBuf,

    #[arg(
        help = "output file (default: stdout)",
        short = 'o',
        long = "output",
        default_value = "-"
    )]
    pub output_path: PathBuf,
}

fn is_std(path: &Path) -> bool {
    path.to_str() == Some("-")
}

impl IoArgs {
    /// Read the whole input, from stdin when the path is `-`.
    pub fn read_input(&self) -> io::Result<String> {
        let mut text = String::new();
        if is_std(&self.input_path) {
            io::stdin().lock().read_to_string(&mut text)?;
        } else {
            File::open(&self.input_path)?.read_to_string(&mut text)?;
        }
        log::debug!(
            "read {} bytes from {}",
            text.len(),
            self.input_path.display()
        );
        Ok(text)
    }

    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        if is_std(&self.output_path) {
            Ok(Box::new(BufWriter::new(io::stdout().lock())))
        } else {
            Ok(Box::new(BufWriter::new(File::create(&self.output_path)?)))
        }
    }
}
