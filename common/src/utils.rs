use crate::constants::EARTH_RADIUS_METERS;
use crate::types::coordinate::Coordinate;

/// Great-circle distance in meters (haversine).
pub fn calculate_distance(point1: Coordinate, point2: Coordinate) -> f64 {
    let (lat1, lat2) = (point1.lat.to_radians(), point2.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (point2.lng - point1.lng).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

/// Fixed-point rendering with `decimals` places. Values exactly half way
/// between two renderings round away from zero, so `40.0625` keeps to
/// `"40.063"` where plain `{:.3}` would give `"40.062"`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || !is_half_way(value.abs(), decimals) {
        return format!("{:.*}", decimals, value);
    }
    // A tie has at most `decimals + 1` fractional digits, so this is exact.
    let extended = format!("{:.*}", decimals + 1, value.abs());
    let mut digits: Vec<u8> = extended[..extended.len() - 1]
        .bytes()
        .filter(|b| *b != b'.')
        .collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let whole: String = whole.iter().map(|&b| b as char).collect();
    if decimals == 0 {
        return format!("{}{}", sign, whole);
    }
    let fraction: String = fraction.iter().map(|&b| b as char).collect();
    format!("{}{}.{}", sign, whole, fraction)
}

fn is_half_way(abs: f64, decimals: usize) -> bool {
    let scaled = abs * 2f64.powi(decimals as i32 + 1);
    scaled.is_finite()
        && scaled.fract() == 0.0
        && format!("{:.*}", decimals + 1, abs).ends_with('5')
}

/// Upper-cases the first character of every whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
