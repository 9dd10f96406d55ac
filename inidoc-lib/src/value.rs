//! Invariant text representation of typed property values.
//!
//! Integers use plain decimal digits with an optional leading `-`. Floating
//! point values use the shortest digits that parse back to the same binary
//! value, so `3.141592_f64` is written as `3.141592`. Outside the decimal
//! exponent range `-4..=14` they switch to `E` notation with a signed,
//! two-digit minimum exponent (`1E-07`, `1.7976931348623157E+308`).
//! Non-finite values are `NaN`, `Infinity` and `-Infinity`. Decimals keep
//! their scale. Booleans are written as `True` / `False`.

use rust_decimal::Decimal;

pub trait IniValue: Sized {
    /// Name reported in [`crate::IniError::Conversion`].
    const TYPE_NAME: &'static str;

    fn to_ini_string(&self) -> String;

    /// `None` when `text` is not a valid representation of `Self`.
    fn from_ini_str(text: &str) -> Option<Self>;
}

macro_rules! impl_ini_value_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IniValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn to_ini_string(&self) -> String {
                    self.to_string()
                }

                fn from_ini_str(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

impl_ini_value_via_from_str!(u8, i8, u16, i16, u32, i32, u64, i64, Decimal);

/// Decimal exponents written positionally; everything else uses `E` notation.
const POSITIONAL_EXPONENTS: std::ops::RangeInclusive<i32> = -4..=14;

/// Turns Rust's shortest `{:e}` text (`1.5e-7`) into `1.5E-07`, or falls back
/// to `positional` when the exponent is in [`POSITIONAL_EXPONENTS`].
fn format_finite_float(scientific: &str, positional: impl FnOnce() -> String) -> String {
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return positional();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return positional();
    };
    if POSITIONAL_EXPONENTS.contains(&exponent) {
        return positional();
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

macro_rules! impl_ini_value_for_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IniValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn to_ini_string(&self) -> String {
                    if self.is_nan() {
                        return "NaN".to_owned();
                    }
                    if self.is_infinite() {
                        return (if self.is_sign_negative() { "-Infinity" } else { "Infinity" }).to_owned();
                    }
                    format_finite_float(&format!("{self:e}"), || self.to_string())
                }

                // `str::parse` already accepts `E` exponents and `Infinity`/`NaN` in any case.
                fn from_ini_str(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

impl_ini_value_for_float!(f32, f64);

impl IniValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_ini_string(&self) -> String {
        (if *self { "True" } else { "False" }).to_owned()
    }

    fn from_ini_str(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl IniValue for String {
    const TYPE_NAME: &'static str = "String";

    fn to_ini_string(&self) -> String {
        self.clone()
    }

    fn from_ini_str(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }
}
