use crate::decimal::{round_fraction, round_significant, Basis, Decimal};
use crate::format_options::{FormatOptions, Locale};
use std::str::FromStr;

/// Above this base-10 magnitude numbers switch to exponential notation.
const MAX_PLAIN_LOG10: f64 = 4.0;
/// Below this base-10 magnitude numbers switch to exponential notation. The
/// epsilon keeps `0.01` on the plain side despite log10 rounding.
const MIN_PLAIN_LOG10: f64 = -2.00000001;

/// A raw value headed for a legend, popup or widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattableValue {
    Number(f64),
    /// `[low, high]`; `low` may be `-inf` and `high` may be `+inf`.
    Range(f64, f64),
    /// Already formatted; returned unchanged.
    Text(String),
}

impl From<f64> for FormattableValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<(f64, f64)> for FormattableValue {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Range(low, high)
    }
}

impl From<&str> for FormattableValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FormattableValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// accepts `inf`, `Infinity` and `NaN` in any case
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

/// Never fails: a number, then `[low, high]`, then text. Ranges must be
/// bracketed so grouped text such as `1,234` stays text.
impl FromStr for FormattableValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(v) = parse_number(s) {
            return Ok(Self::Number(v));
        }
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'));
        if let Some((low, high)) = inner.and_then(|inner| inner.split_once(',')) {
            if let (Some(low), Some(high)) = (parse_number(low), parse_number(high)) {
                return Ok(Self::Range(low, high));
            }
        }
        Ok(Self::Text(s.to_string()))
    }
}

/// Turns raw values into display strings.
#[derive(Debug, Clone, Default)]
pub struct ValueFormatter {
    options: FormatOptions,
}

impl ValueFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format(&self, value: &FormattableValue) -> String {
        match value {
            FormattableValue::Range(low, high) => {
                if *low == f64::NEG_INFINITY {
                    format!("< {}", self.format_number(*high))
                } else if *high == f64::INFINITY {
                    format!("> {}", self.format_number(*low))
                } else {
                    format!("{} - {}", self.format_number(*low), self.format_number(*high))
                }
            }
            FormattableValue::Number(v) => self.format_number(*v),
            FormattableValue::Text(s) => s.clone(),
        }
    }

    /// Exponential for very large or very small magnitudes, otherwise grouped
    /// with bounded fraction digits (none for integers).
    pub fn format_number(&self, v: f64) -> String {
        if v.is_nan() {
            return "NaN".to_string();
        }
        if v.is_infinite() {
            return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if v == 0.0 {
            return "0".to_string();
        }
        let log = v.abs().log10();
        if log > MAX_PLAIN_LOG10 || log < MIN_PLAIN_LOG10 {
            return exponential(v, self.options.exponent_digits);
        }
        if v.fract() != 0.0 {
            grouped(
                v,
                self.options.min_fraction_digits,
                self.options.max_fraction_digits,
                self.options.locale,
            )
        } else {
            grouped(v, 0, 0, self.options.locale)
        }
    }
}

/// Format with the default options (`en` grouping, 2-3 fraction digits).
pub fn format(value: &FormattableValue) -> String {
    ValueFormatter::default().format(value)
}

/// Format a single number with the default options.
pub fn format_number(v: f64) -> String {
    ValueFormatter::default().format_number(v)
}

/// Exponential notation with `fraction` mantissa digits: `1.23e+5`.
pub fn exponential(v: f64, fraction: usize) -> String {
    let d = round_significant(v, fraction + 1, Basis::Exact);
    let exp = if d.is_zero() { 0 } else { d.exponent - 1 };
    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push(char::from(b'0' + d.digits.first().copied().unwrap_or(0)));
    if fraction > 0 {
        out.push('.');
        for i in 1..=fraction {
            out.push(char::from(b'0' + d.digits.get(i).copied().unwrap_or(0)));
        }
    }
    out.push('e');
    out.push(if exp < 0 { '-' } else { '+' });
    out.push_str(&exp.abs().to_string());
    out
}

/// Fixed-point with exactly `fraction` digits and no grouping: the viewport
/// rendering of zoom/lat/lng.
pub fn fixed(v: f64, fraction: usize) -> String {
    let d = round_fraction(v, fraction, Basis::Exact);
    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&render_digits(&d, fraction, fraction, Locale::Plain));
    out
}

fn grouped(v: f64, min_fraction: usize, max_fraction: usize, locale: Locale) -> String {
    let d = round_fraction(v, max_fraction, Basis::Shortest);
    let mut out = String::new();
    if v < 0.0 && !d.is_zero() {
        out.push('-');
    }
    out.push_str(&render_digits(&d, min_fraction, max_fraction, locale));
    out
}

fn render_digits(d: &Decimal, min_fraction: usize, max_fraction: usize, locale: Locale) -> String {
    let int_len = d.exponent.max(1);
    let mut out = String::new();
    for position in (0..int_len).rev() {
        out.push(char::from(b'0' + d.digit(position)));
        if position > 0 && position % 3 == 0 {
            if let Some(sep) = locale.group_separator() {
                out.push_str(sep);
            }
        }
    }
    let mut fraction: Vec<u8> = (1..=max_fraction as i32).map(|i| d.digit(-i)).collect();
    while fraction.len() > min_fraction && fraction.last() == Some(&0) {
        fraction.pop();
    }
    if !fraction.is_empty() {
        out.push_str(locale.decimal_separator());
        out.extend(fraction.into_iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// The map-info line shown when viewport info is enabled.
pub fn viewport_info(zoom: f64, lat: f64, lng: f64) -> String {
    format!(
        "viewport={{'zoom': {}, 'lat': {}, 'lng': {}}}",
        fixed(zoom, 2),
        fixed(lat, 6),
        fixed(lng, 6)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_exponential() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_large_and_small_magnitudes() {
        assert_eq!(format_number(123456.0), "1.23e+5");
        assert_eq!(format_number(-123456.0), "-1.23e+5");
        assert_eq!(format_number(124500.0), "1.25e+5");
        assert_eq!(format_number(0.001), "1.00e-3");
        assert_eq!(format_number(0.0045678), "4.57e-3");
        assert_eq!(format_number(99999.0), "1.00e+5");
        assert_eq!(format_number(1e21), "1.00e+21");
        assert_eq!(format_number(5e-324), "4.94e-324");
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(format_number(10000.0), "10,000");
        assert_eq!(format_number(0.01), "0.01");
        assert_eq!(format_number(-0.01), "-0.01");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_number(3.14159), "3.142");
        assert_eq!(format_number(1234.5), "1,234.50");
        assert_eq!(format_number(-2.5), "-2.50");
        assert_eq!(format_number(0.0625), "0.063");
        assert_eq!(format_number(1.0005), "1.001");
        assert_eq!(format_number(1.00049), "1.00");
        assert_eq!(format_number(9999.9996), "10,000.00");
    }

    #[test]
    fn test_integers_are_grouped() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(-1234.0), "-1,234");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_ranges() {
        let range = |low: f64, high: f64| format(&FormattableValue::Range(low, high));
        assert_eq!(range(f64::NEG_INFINITY, 10.0), "< 10");
        assert_eq!(range(5.0, f64::INFINITY), "> 5");
        assert_eq!(range(1.0, 2.0), "1 - 2");
        assert_eq!(range(0.5, 1500.25), "0.50 - 1,500.25");
        assert_eq!(range(f64::NEG_INFINITY, f64::INFINITY), "< Infinity");
    }

    #[test]
    fn test_text_passes_through() {
        let once = format(&FormattableValue::Number(1234.5));
        let twice = format(&FormattableValue::from(once.as_str()));
        assert_eq!(once, twice);
        assert_eq!(format(&FormattableValue::from("Residential")), "Residential");
    }

    #[test]
    fn test_locales() {
        let de = ValueFormatter::new(FormatOptions::builder().locale(Locale::De).build().unwrap());
        assert_eq!(de.format_number(1234.5), "1.234,50");
        let fr = ValueFormatter::new(FormatOptions::builder().locale(Locale::Fr).build().unwrap());
        assert_eq!(fr.format_number(1234.0), "1\u{202f}234");
        let plain =
            ValueFormatter::new(FormatOptions::builder().locale(Locale::Plain).build().unwrap());
        assert_eq!(plain.format_number(1234.5), "1234.50");
    }

    #[test]
    fn test_custom_digits() {
        let f = ValueFormatter::new(
            FormatOptions::builder()
                .exponent_digits(0)
                .min_fraction_digits(0)
                .max_fraction_digits(1)
                .build()
                .unwrap(),
        );
        assert_eq!(f.format_number(123456.0), "1e+5");
        assert_eq!(f.format_number(2.25), "2.3");
        assert_eq!(f.format_number(2.0), "2");
    }

    #[test]
    fn test_parse_formattable_value() {
        assert_eq!("12.5".parse::<FormattableValue>().unwrap(), FormattableValue::Number(12.5));
        assert_eq!(
            "[-Infinity, 10]".parse::<FormattableValue>().unwrap(),
            FormattableValue::Range(f64::NEG_INFINITY, 10.0)
        );
        assert_eq!(
            "[5,inf]".parse::<FormattableValue>().unwrap(),
            FormattableValue::Range(5.0, f64::INFINITY)
        );
        assert_eq!(
            "1,234.50".parse::<FormattableValue>().unwrap(),
            FormattableValue::Text("1,234.50".to_string())
        );
        assert_eq!(
            "hello, world".parse::<FormattableValue>().unwrap(),
            FormattableValue::Text("hello, world".to_string())
        );
    }

    #[test]
    fn test_viewport_info() {
        assert_eq!(
            viewport_info(9.0, 40.416775, -3.70379),
            "viewport={'zoom': 9.00, 'lat': 40.416775, 'lng': -3.703790}"
        );
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(0.1, 20), "0.10000000000000000555");
    }
}
