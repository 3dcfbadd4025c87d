// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable SI formatting for measure values.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt as _;

/// SI prefixes for exponents `-24..=24` in steps of 3.
const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];
/// Index of the empty prefix in [`PREFIXES`].
const UNIT_GROUP: i32 = 8;

/// Formats `value` with one decimal and an SI magnitude suffix, e.g. `1.2k` or `3.4M`.
///
/// Values outside the yocto..yotta range keep the extreme prefix. A value that rounds up to
/// `1000.0` of one prefix is promoted to the next (`999.96` becomes `1.0k`).
#[must_use]
pub fn format_si(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    if value == 0.0 {
        return String::from("0.0");
    }

    let mag = if value < 0.0 { -value } else { value };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite log10 of an f64 fits comfortably in i32"
    )]
    let mut group = (mag.log10() / 3.0).floor() as i32;
    group = group.clamp(-UNIT_GROUP, UNIT_GROUP);

    let mut rounded = round_tenth(mag / 10.0_f64.powi(group * 3));
    if rounded >= 1000.0 && group < UNIT_GROUP {
        group += 1;
        rounded = round_tenth(mag / 10.0_f64.powi(group * 3));
    }
    if rounded == 0.0 {
        // Below half a tenth of a yocto: indistinguishable from zero.
        return String::from("0.0");
    }

    let prefix = usize::try_from(group + UNIT_GROUP)
        .ok()
        .and_then(|i| PREFIXES.get(i))
        .copied()
        .unwrap_or("");
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{rounded:.1}{prefix}")
}

/// Formats an observed range the way measure cards show it.
#[must_use]
pub fn format_range(min: f64, max: f64) -> String {
    format!("({}  —  {})", format_si(min), format_si(max))
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn picks_prefix_by_magnitude() {
        assert_eq!(format_si(1234.0), "1.2k");
        assert_eq!(format_si(3_400_000.0), "3.4M");
        assert_eq!(format_si(12.0), "12.0");
        assert_eq!(format_si(0.5), "500.0m");
        assert_eq!(format_si(0.0021), "2.1m");
        assert_eq!(format_si(7.0e9), "7.0G");
    }

    #[test]
    fn keeps_sign() {
        assert_eq!(format_si(-2500.0), "-2.5k");
        assert_eq!(format_si(-0.25), "-250.0m");
    }

    #[test]
    fn zero_and_non_finite() {
        assert_eq!(format_si(0.0), "0.0");
        assert_eq!(format_si(-0.0), "0.0");
        assert_eq!(format_si(f64::NAN), "NaN");
        assert_eq!(format_si(f64::INFINITY), "inf");
        assert_eq!(format_si(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn rounding_up_promotes_prefix() {
        assert_eq!(format_si(999.96), "1.0k");
        assert_eq!(format_si(999_960.0), "1.0M");
        assert_eq!(format_si(1000.0), "1.0k");
        assert_eq!(format_si(999.94), "999.9");
    }

    #[test]
    fn exact_powers_of_ten_land_on_their_prefix() {
        assert_eq!(format_si(0.001), "1.0m");
        assert_eq!(format_si(1.0e-6), "1.0µ");
        assert_eq!(format_si(1.0e6), "1.0M");
    }

    #[test]
    fn out_of_range_keeps_extreme_prefix() {
        assert_eq!(format_si(1.0e27), "1000.0Y");
        assert_eq!(format_si(1.0e-25), "0.1y");
        assert_eq!(format_si(1.0e-30), "0.0");
        assert_eq!(format_si(-1.0e-30), "0.0", "no signed zero");
        assert_eq!(format_si(5.0e-324), "0.0");
    }

    #[test]
    fn range_uses_both_ends() {
        assert_eq!(format_range(-1500.0, 2.0), "(-1.5k  —  2.0)");
    }
}
