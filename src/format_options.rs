use clap::ValueEnum;
use std::str::FromStr;

// Upper bound on requested digits; mirrors what host number formatting accepts.
const MAX_DIGITS: usize = 20;

/// Separators used when rendering grouped numbers.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum Locale {
    /// `1,234.5`
    #[default]
    #[value(name = "en")]
    En,
    /// `1.234,5`
    #[value(name = "de")]
    De,
    /// `1 234,5` with a narrow no-break space.
    #[value(name = "fr")]
    Fr,
    /// `1234.5`, no grouping.
    #[value(name = "plain")]
    Plain,
}

impl Locale {
    pub fn group_separator(&self) -> Option<&'static str> {
        match self {
            Locale::En => Some(","),
            Locale::De => Some("."),
            Locale::Fr => Some("\u{202f}"),
            Locale::Plain => None,
        }
    }

    pub fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::En | Locale::Plain => ".",
            Locale::De | Locale::Fr => ",",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::De => write!(f, "de"),
            Locale::Fr => write!(f, "fr"),
            Locale::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for Locale {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| OptionsError::UnknownLocale(s.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum OptionsError {
    UnknownLocale(String),
    FractionDigits { min: usize, max: usize },
    TooManyDigits(usize),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::UnknownLocale(s) => write!(f, "Unknown locale: {}", s),
            OptionsError::FractionDigits { min, max } => write!(
                f,
                "Minimum fraction digits ({}) exceeds maximum ({})",
                min, max
            ),
            OptionsError::TooManyDigits(n) => {
                write!(f, "Digit count {} exceeds the limit of {}", n, MAX_DIGITS)
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Options for rendering values.
///
/// # Examples
///
/// ```
/// use tracefmt::format_options::{FormatOptions, Locale};
///
/// let options = FormatOptions::builder()
///     .locale(Locale::De)
///     .max_fraction_digits(2)
///     .build()
///     .unwrap();
/// assert_eq!(options.exponent_digits, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub locale: Locale,
    /// Fractional digits of the mantissa in exponential notation.
    pub exponent_digits: usize,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            exponent_digits: 2,
            min_fraction_digits: 2,
            max_fraction_digits: 3,
        }
    }
}

impl FormatOptions {
    /// Create a new builder for FormatOptions
    pub fn builder() -> FormatOptionsBuilder {
        FormatOptionsBuilder::new()
    }
}

/// Builder for FormatOptions.
///
/// # Examples
///
/// ```
/// use tracefmt::format_options::{FormatOptionsBuilder, Locale};
///
/// let builder = FormatOptionsBuilder::new()
///     .locale(Locale::Fr)
///     .exponent_digits(3);
/// ```
pub struct FormatOptionsBuilder {
    options: FormatOptions,
}

impl Default for FormatOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatOptionsBuilder {
    /// Create a new FormatOptionsBuilder with default values
    pub fn new() -> Self {
        Self {
            options: FormatOptions::default(),
        }
    }

    /// Set the locale
    pub fn locale(mut self, locale: Locale) -> Self {
        self.options.locale = locale;
        self
    }

    /// Set the exponential mantissa digits
    pub fn exponent_digits(mut self, digits: usize) -> Self {
        self.options.exponent_digits = digits;
        self
    }

    /// Set the minimum fraction digits
    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.options.min_fraction_digits = digits;
        self
    }

    /// Set the maximum fraction digits
    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.options.max_fraction_digits = digits;
        self
    }

    /// Build the FormatOptions, rejecting inconsistent digit bounds.
    pub fn build(self) -> Result<FormatOptions, OptionsError> {
        let o = self.options;
        for n in [o.exponent_digits, o.min_fraction_digits, o.max_fraction_digits] {
            if n > MAX_DIGITS {
                return Err(OptionsError::TooManyDigits(n));
            }
        }
        if o.min_fraction_digits > o.max_fraction_digits {
            return Err(OptionsError::FractionDigits {
                min: o.min_fraction_digits,
                max: o.max_fraction_digits,
            });
        }
        Ok(o)
    }
}
