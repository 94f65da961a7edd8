//! Decimal digit extraction and half-away-from-zero rounding for `f64`.
//!
//! Rust's float formatting rounds exact ties to even, while display strings
//! here round ties away from zero (so `124500` is `1.25e+5`, not `1.24e+5`).
//! Two bases are supported: locale-style grouping rounds the shortest
//! round-trip digits (`1.005` -> `1.01`), exponential and fixed notation
//! round the exact binary value (`1.005` -> `1.00`). For the exact basis the
//! full expansion is only computed when the shortest digits sit on the
//! rounding boundary or run out before the requested precision.

/// Non-negative decimal `0.d1 d2 d3 ... × 10^exponent`.
///
/// `digits` has no leading or trailing zeros; an empty `digits` is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decimal {
    pub(crate) digits: Vec<u8>,
    pub(crate) exponent: i32,
}

/// Which digits a tie is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Basis {
    Shortest,
    Exact,
}

#[derive(Debug, PartialEq, Eq)]
enum Rounding {
    Down,
    Up,
    Tie,
}

// Enough fractional digits in scientific form to print any f64 exactly.
const EXACT_PRECISION: usize = 767;

impl Decimal {
    /// Digits of the shortest representation that round-trips to `|v|`.
    /// `v` must be finite.
    pub(crate) fn shortest(v: f64) -> Self {
        Self::from_scientific(&format!("{:e}", v.abs()))
    }

    /// Every digit of the exact binary value of `|v|`.
    fn exact(v: f64) -> Self {
        Self::from_scientific(&format!("{:.*e}", EXACT_PRECISION, v.abs()))
    }

    fn from_scientific(s: &str) -> Self {
        let (mantissa, exp) = s.split_once('e').unwrap_or((s, "0"));
        let exp: i32 = exp.parse().unwrap_or_default();
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            return Self::zero();
        }
        // scientific form has exactly one non-zero digit before the point
        Self {
            digits,
            exponent: exp + 1,
        }
    }

    fn zero() -> Self {
        Self {
            digits: Vec::new(),
            exponent: 0,
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn rounding_at(&self, keep: i32) -> Rounding {
        if keep < 0 || keep as usize >= self.digits.len() {
            return Rounding::Down;
        }
        let keep = keep as usize;
        match self.digits[keep] {
            d if d > 5 => Rounding::Up,
            d if d < 5 => Rounding::Down,
            _ if keep + 1 < self.digits.len() => Rounding::Up,
            _ => Rounding::Tie,
        }
    }

    fn truncate(&self, keep: i32, up: bool) -> Self {
        let keep = keep.max(0) as usize;
        let mut digits: Vec<u8> = self.digits.iter().take(keep).copied().collect();
        let mut exponent = self.exponent;
        if up {
            let mut i = digits.len();
            loop {
                if i == 0 {
                    // carried out of the leading digit: 9.99 -> 10.0
                    digits.insert(0, 1);
                    exponent += 1;
                    break;
                }
                i -= 1;
                if digits[i] == 9 {
                    digits[i] = 0;
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }
        while digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            return Self::zero();
        }
        Self { digits, exponent }
    }

    /// Round a decimal that holds every digit of its value.
    fn round_complete(&self, keep: i32) -> Self {
        self.truncate(keep, self.rounding_at(keep) != Rounding::Down)
    }

    /// Round to `keep` significant digits, ties away from zero.
    fn round(&self, keep: i32, v: f64, basis: Basis) -> Self {
        let up = match (self.rounding_at(keep), basis) {
            (Rounding::Up, _) | (Rounding::Tie, Basis::Shortest) => true,
            (Rounding::Down, _) => false,
            (Rounding::Tie, Basis::Exact) => Self::exact(v).rounding_at(keep) != Rounding::Down,
        };
        self.truncate(keep, up)
    }

    /// Digit at `position` counted from the decimal point: 0 is the units
    /// digit, negative positions are fractional.
    pub(crate) fn digit(&self, position: i32) -> u8 {
        let index = self.exponent - 1 - position;
        if index < 0 {
            return 0;
        }
        self.digits.get(index as usize).copied().unwrap_or(0)
    }
}

/// `|v|` rounded to `significant` significant digits.
pub(crate) fn round_significant(v: f64, significant: usize, basis: Basis) -> Decimal {
    let d = Decimal::shortest(v);
    if basis == Basis::Exact && significant >= d.digits.len() {
        // digits past the shortest form come from the binary value
        return Decimal::exact(v).round_complete(significant as i32);
    }
    d.round(significant as i32, v, basis)
}

/// `|v|` rounded to `fraction` digits after the decimal point.
pub(crate) fn round_fraction(v: f64, fraction: usize, basis: Basis) -> Decimal {
    let d = Decimal::shortest(v);
    let keep = d.exponent + fraction as i32;
    if basis == Basis::Exact && keep >= d.digits.len() as i32 {
        // the exact exponent can sit one below the shortest one (1e23)
        let exact = Decimal::exact(v);
        return exact.round_complete(exact.exponent + fraction as i32);
    }
    d.round(keep, v, basis)
}
