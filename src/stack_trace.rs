use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Function name used when a dialect could not recover one.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

static CHROME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*at (.*?) ?\(((?:file|https?|blob|chrome-extension|native|eval|webpack|<anonymous>|/).*?)(?::([0-9]+))?(?::([0-9]+))?\)?\s*$",
    )
    .expect("CHROME_RE is a valid static regex pattern")
});

static CHROME_EVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\S*)(?::([0-9]+))(?::([0-9]+))\)")
        .expect("CHROME_EVAL_RE is a valid static regex pattern")
});

static WINJS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*at (?:((?:\[object object\])?.+) )?\(?((?:file|ms-appx|https?|webpack|blob):.*?):([0-9]+)(?::([0-9]+))?\)?\s*$",
    )
    .expect("WINJS_RE is a valid static regex pattern")
});

static GECKO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(.*?)(?:\((.*?)\))?(?:^|@)((?:file|https?|blob|chrome|webpack|resource|\[native).*?|[^@]*bundle)(?::([0-9]+))?(?::([0-9]+))?\s*$",
    )
    .expect("GECKO_RE is a valid static regex pattern")
});

static GECKO_EVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\S+) line ([0-9]+)(?: > eval line [0-9]+)* > eval")
        .expect("GECKO_EVAL_RE is a valid static regex pattern")
});

/// One normalized call site extracted from a raw stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Resolved call-site name, or [`UNKNOWN_FUNCTION`].
    pub function_name: String,
    /// Source URL or path. `None` for native frames.
    pub file: Option<String>,
    pub arguments: Vec<String>,
    pub line_number: Option<u64>,
    pub column: Option<u64>,
}

impl Frame {
    /// `file:line:column`, with `null` standing in for anything missing.
    pub fn location(&self) -> String {
        format!(
            "{}:{}:{}",
            or_null(self.file.as_deref()),
            or_null(self.line_number),
            or_null(self.column)
        )
    }

    /// True for engine-internal frames with no associated source file.
    pub fn is_native(&self) -> bool {
        self.file.is_none()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.function_name, self.location())
    }
}

fn or_null<T: fmt::Display>(v: Option<T>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

/// A stack-trace text convention. Lines are tried against [`Dialect::ORDER`]
/// and the first dialect that matches produces the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// V8: `at fn (url:line:col)`.
    Chrome,
    /// Windows/IE JavaScript: `at fn (ms-appx://...:line[:col])`.
    WinJs,
    /// Firefox and Safari: `fn(args)@url:line:col`.
    Gecko,
}

impl Dialect {
    pub const ORDER: [Dialect; 3] = [Dialect::Chrome, Dialect::WinJs, Dialect::Gecko];

    /// Match a single line, returning the normalized frame with any eval
    /// wrapper already unwrapped.
    pub fn match_line(self, line: &str) -> Option<Frame> {
        let candidate = match self {
            Dialect::Chrome => Candidate::chrome(line)?,
            Dialect::WinJs => Candidate::winjs(line)?,
            Dialect::Gecko => Candidate::gecko(line)?,
        };
        Some(candidate.unwrap_eval().into_frame())
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Chrome => write!(f, "chrome"),
            Dialect::WinJs => write!(f, "winjs"),
            Dialect::Gecko => write!(f, "gecko"),
        }
    }
}

// Raw capture groups of a matched line, before eval unwrapping and numeric
// conversion.
#[derive(Debug)]
struct Candidate<'a> {
    dialect: Dialect,
    function_name: Option<&'a str>,
    location: &'a str,
    arguments: Option<&'a str>,
    line_number: Option<&'a str>,
    column: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    fn chrome(line: &'a str) -> Option<Self> {
        let caps = CHROME_RE.captures(line)?;
        Some(Candidate {
            dialect: Dialect::Chrome,
            function_name: caps.get(1).map(|m| m.as_str()),
            location: caps.get(2).map_or("", |m| m.as_str()),
            arguments: None,
            line_number: caps.get(3).map(|m| m.as_str()),
            column: caps.get(4).map(|m| m.as_str()),
        })
    }

    fn winjs(line: &'a str) -> Option<Self> {
        let caps = WINJS_RE.captures(line)?;
        Some(Candidate {
            dialect: Dialect::WinJs,
            function_name: caps.get(1).map(|m| m.as_str()),
            location: caps.get(2).map_or("", |m| m.as_str()),
            arguments: None,
            line_number: caps.get(3).map(|m| m.as_str()),
            column: caps.get(4).map(|m| m.as_str()),
        })
    }

    fn gecko(line: &'a str) -> Option<Self> {
        let caps = GECKO_RE.captures(line)?;
        Some(Candidate {
            dialect: Dialect::Gecko,
            function_name: caps.get(1).map(|m| m.as_str()),
            location: caps.get(3).map_or("", |m| m.as_str()),
            arguments: caps.get(2).map(|m| m.as_str()),
            line_number: caps.get(4).map(|m| m.as_str()),
            column: caps.get(5).map(|m| m.as_str()),
        })
    }

    fn is_native(&self) -> bool {
        self.dialect == Dialect::Chrome && self.location.starts_with("native")
    }

    /// Replace the synthetic eval-wrapper location with the call site that
    /// issued the eval.
    fn unwrap_eval(mut self) -> Self {
        match self.dialect {
            Dialect::Chrome if self.location.starts_with("eval") => {
                // innermost `(url:line:col)`; the wrapper's own line/column are dropped
                if let Some(caps) = CHROME_EVAL_RE.captures(self.location) {
                    log::debug!("unwrapping chrome eval frame: {}", self.location);
                    self.location = caps.get(1).map_or("", |m| m.as_str());
                    self.line_number = caps.get(2).map(|m| m.as_str());
                    self.column = caps.get(3).map(|m| m.as_str());
                }
            }
            Dialect::Gecko if self.location.contains(" > eval") => {
                // outermost `url line N`; gecko eval frames never carry a column
                if let Some(caps) = GECKO_EVAL_RE.captures(self.location) {
                    log::debug!("unwrapping gecko eval frame: {}", self.location);
                    self.location = caps.get(1).map_or("", |m| m.as_str());
                    self.line_number = caps.get(2).map(|m| m.as_str());
                    self.column = None;
                }
            }
            _ => {}
        }
        self
    }

    fn into_frame(self) -> Frame {
        let native = self.is_native();
        let arguments = if native {
            vec![self.location.to_string()]
        } else {
            match self.arguments {
                Some(args) if !args.is_empty() => args.split(',').map(String::from).collect(),
                _ => Vec::new(),
            }
        };
        Frame {
            function_name: self
                .function_name
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_FUNCTION)
                .to_string(),
            file: (!native).then(|| self.location.to_string()),
            arguments,
            line_number: self.line_number.and_then(|n| n.parse().ok()),
            column: self.column.and_then(|n| n.parse().ok()),
        }
    }
}

/// Frames recovered from a stack trace together with the lines that no
/// dialect recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedStack {
    pub frames: Vec<Frame>,
    /// Zero-based indices of input lines that produced no frame.
    pub dropped: Vec<usize>,
}

/// Normalize a single line. Returns `None` if no dialect matches.
pub fn parse_line(line: &str) -> Option<Frame> {
    Dialect::ORDER
        .iter()
        .find_map(|dialect| dialect.match_line(line))
}

/// Parse a newline-delimited stack trace, keeping track of dropped lines.
pub fn parse_stack(stack: &str) -> ParsedStack {
    let mut parsed = ParsedStack::default();
    for (i, line) in stack.split('\n').enumerate() {
        match parse_line(line) {
            Some(frame) => parsed.frames.push(frame),
            None => {
                log::trace!("no stack dialect matched line {}: {:?}", i, line);
                parsed.dropped.push(i);
            }
        }
    }
    parsed
}

/// Parse a newline-delimited stack trace into frames, in input order.
/// Lines no dialect recognizes are skipped.
pub fn parse(stack: &str) -> Vec<Frame> {
    parse_stack(stack).frames
}
