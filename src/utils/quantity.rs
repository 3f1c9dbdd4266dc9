//! Exact Kubernetes quantity arithmetic
//!
//! Quantities are held as a whole number of nano-units so that summing
//! capacities across many nodes never accumulates rounding error.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// A quantity counted in nano-units (1 core = 10^9)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct NanoQuantity(i128);

impl NanoQuantity {
    pub const ZERO: Self = Self(0);

    /// Parse a quantity string such as `4`, `3500m`, `1.5`, `2Ki` or `1e3`.
    ///
    /// Returns `None` for malformed input, for values that overflow, and for
    /// values finer than one nano-unit.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (negative, s) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let number_len = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(number_len);

        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if frac.contains('.') {
            return None;
        }

        let mut digits: i128 = 0;
        for c in whole.chars().chain(frac.chars()) {
            digits = digits
                .checked_mul(10)?
                .checked_add(i128::from(c.to_digit(10)?))?;
        }
        let frac_len = i32::try_from(frac.len()).ok()?;

        let nanos = match parse_suffix(suffix)? {
            Multiplier::Decimal(exp) => scale_decimal(digits, exp + 9 - frac_len)?,
            Multiplier::Binary(shift) => {
                let scaled = digits.checked_mul(1i128.checked_shl(shift)?)?;
                scale_decimal(scaled, 9 - frac_len)?
            }
        };

        Some(Self(if negative { -nanos } else { nanos }))
    }

    pub fn nanos(self) -> i128 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Sum, or `None` on overflow
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Whole units, or `None` when the value has a fractional part
    pub fn to_whole_units(self) -> Option<i128> {
        (self.0 % NANOS_PER_UNIT == 0).then(|| self.0 / NANOS_PER_UNIT)
    }
}

impl TryFrom<&Quantity> for NanoQuantity {
    type Error = String;

    fn try_from(quantity: &Quantity) -> Result<Self, Self::Error> {
        Self::parse(&quantity.0).ok_or_else(|| quantity.0.clone())
    }
}

enum Multiplier {
    /// Power of ten
    Decimal(i32),
    /// Power of two
    Binary(u32),
}

fn parse_suffix(suffix: &str) -> Option<Multiplier> {
    let multiplier = match suffix {
        "" => Multiplier::Decimal(0),
        "n" => Multiplier::Decimal(-9),
        "u" => Multiplier::Decimal(-6),
        "m" => Multiplier::Decimal(-3),
        "k" => Multiplier::Decimal(3),
        "M" => Multiplier::Decimal(6),
        "G" => Multiplier::Decimal(9),
        "T" => Multiplier::Decimal(12),
        "P" => Multiplier::Decimal(15),
        "E" => Multiplier::Decimal(18),
        "Ki" => Multiplier::Binary(10),
        "Mi" => Multiplier::Binary(20),
        "Gi" => Multiplier::Binary(30),
        "Ti" => Multiplier::Binary(40),
        "Pi" => Multiplier::Binary(50),
        "Ei" => Multiplier::Binary(60),
        _ => {
            let exp = suffix
                .strip_prefix('e')
                .or_else(|| suffix.strip_prefix('E'))?;
            Multiplier::Decimal(exp.parse().ok()?)
        }
    };
    Some(multiplier)
}

/// Multiply `value` by 10^exp, refusing to drop precision
fn scale_decimal(value: i128, exp: i32) -> Option<i128> {
    if exp >= 0 {
        value.checked_mul(10i128.checked_pow(u32::try_from(exp).ok()?)?)
    } else {
        let divisor = 10i128.checked_pow(u32::try_from(-exp).ok()?)?;
        (value % divisor == 0).then(|| value / divisor)
    }
}
