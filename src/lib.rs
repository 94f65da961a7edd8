//! tracefmt normalizes runtime stack traces and formats numeric values for
//! display in legends, popups and widgets.

/// Exact decimal rounding backing the number renderings.
mod decimal;

/// Rendering an error with its normalized stack.
pub mod error_report;

/// Locale and digit options for the value formatter.
pub mod format_options;

/// Value and range formatting.
pub mod formatting;

/// Multi-dialect stack-trace parsing.
pub mod stack_trace;
