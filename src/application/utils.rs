//! # Formatting Utils
//!
//! Number formatting shared by the market and Steem replies.

/// Formats a price with precision that scales with its magnitude.
/// e.g. `64231.5` -> `64,231.50`, `0.0004312` -> `0.00043120`
pub fn format_price(value: f64) -> String {
    let abs = value.abs();
    let decimals = if abs >= 1.0 {
        2
    } else if abs >= 0.01 {
        4
    } else {
        8
    };
    let fixed = format!("{:.*}", decimals, abs);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac_part}", group_thousands(int_part))
    }
}

/// Large amounts (market cap, volume) without decimals: `1234567.8` -> `1,234,568`
pub fn format_large(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rounded))
}

/// Signed percentage with two decimals: `2.345` -> `+2.35%`
pub fn format_change(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders a series as a one-line bar chart, downsampled to at most `width` points.
pub fn sparkline(points: &[f64], width: usize) -> String {
    if points.is_empty() || width == 0 {
        return String::new();
    }

    let sampled: Vec<f64> = if points.len() <= width {
        points.to_vec()
    } else {
        (0..width)
            .map(|i| points[i * (points.len() - 1) / (width - 1).max(1)])
            .collect()
    };

    let min = sampled.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    sampled
        .iter()
        .map(|p| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let level = ((p - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Steem reputation score from the raw on-chain value (e.g. `95832978796820` -> `69`).
pub fn reputation_score(raw: i64) -> i64 {
    if raw == 0 {
        return 25;
    }
    let negative = raw < 0;
    let level = ((raw.unsigned_abs() as f64).log10() - 9.0).max(0.0);
    let signed = if negative { -level } else { level };
    (signed * 9.0 + 25.0).floor() as i64
}
