use crate::stack_trace::{parse_stack, Frame};
use serde::Serialize;
use std::fmt;

/// An error as shown to the user: its name, type and message plus the
/// normalized frames of its stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// The message with the first occurrence of `kind` removed.
    pub message: String,
    pub frames: Vec<Frame>,
    /// Stack lines that no dialect recognized.
    pub dropped_lines: usize,
}

impl ErrorReport {
    pub fn new(name: &str, kind: &str, message: &str, stack: &str) -> Self {
        let parsed = parse_stack(stack);
        let message = if kind.is_empty() {
            message.to_string()
        } else {
            message.replacen(kind, "", 1)
        };
        ErrorReport {
            name: name.to_string(),
            kind: kind.to_string(),
            message,
            frames: parsed.frames,
            dropped_lines: parsed.dropped.len(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.name, self.kind)?;
        writeln!(f, "{}", self.message)?;
        for frame in &self.frames {
            writeln!(f, "  at {}: ({})", frame.function_name, frame.location())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::stack_fixtures;

    #[test]
    fn test_report_strips_kind_from_message() {
        let r = ErrorReport::new(
            "CartoValidationError",
            "[Error]",
            "[Error] Viz property 'color' is not valid",
            "",
        );
        assert_eq!(r.message, " Viz property 'color' is not valid");
        assert!(r.frames.is_empty());
        assert_eq!(r.dropped_lines, 1);
    }

    #[test]
    fn test_report_display() {
        let r = ErrorReport::new("TypeError", "TypeError", "boom", stack_fixtures::CHROME);
        let text = r.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TypeError: TypeError");
        assert_eq!(lines[1], "boom");
        assert_eq!(
            lines[2],
            "  at initLayers: (http://localhost:8888/static/bundle.js:412:23)"
        );
        assert_eq!(lines[4], "  at Array.forEach: (null:null:null)");
        assert_eq!(lines.len(), 2 + r.frames.len());
        assert_eq!(r.dropped_lines, 1);
    }

    #[test]
    fn test_report_json_uses_type_key() {
        let r = ErrorReport::new("Error", "RangeError", "RangeError: bad", "");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "RangeError");
        assert_eq!(json["message"], ": bad");
        assert_eq!(json["frames"].as_array().map(|a| a.len()), Some(0));
    }
}
