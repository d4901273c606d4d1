/// Formats an atomic amount as a fixed-point coin value with trailing zeros trimmed.
///
/// The number of decimals is the digit count of `units_per_coin - 1`, so `1_000_000_000` gives
/// nine decimals. A `units_per_coin` of zero or one formats the raw amount.
///
/// ```
/// use explorer_core::utils::format_coin;
///
/// assert_eq!(format_coin(1_500_000_000, 1_000_000_000), "1.5");
/// assert_eq!(format_coin(2_000_000_000, 1_000_000_000), "2");
/// ```
#[must_use]
pub fn format_coin(atomic: u64, units_per_coin: u64) -> String {
    if units_per_coin <= 1 {
        return atomic.to_string();
    }

    let whole = atomic / units_per_coin;
    let fraction = atomic % units_per_coin;
    if fraction == 0 {
        return whole.to_string();
    }

    let decimals = (units_per_coin - 1).to_string().len();
    let digits = format!("{fraction:0decimals$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Scales `value` to a `K`/`M`/`G` suffix with two decimals.
#[must_use]
pub fn format_unit(value: f64) -> String {
    const K: f64 = 1_000.0;
    const M: f64 = 1_000_000.0;
    const G: f64 = 1_000_000_000.0;

    if value > G {
        format!("{:.2}G", value / G)
    } else if value > M {
        format!("{:.2}M", value / M)
    } else if value > K {
        format!("{:.2}K", value / K)
    } else {
        format!("{value:.2}")
    }
}

/// Returns true for a 64-character hexadecimal string (block hash or transaction id).
#[must_use]
pub fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
