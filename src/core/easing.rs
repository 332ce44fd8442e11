//! Penner-style easing curves over `(t, b, c, d)`.
//!
//! `t` is elapsed time, `b` the start value, `c` the total change and `d`
//! the duration.  Every curve returns exactly `b` at `t == 0` and exactly
//! `b + c` once `t >= d`, so a ride always lands on its target.

use std::fmt;
use std::str::FromStr;

/// Which curve the driver uses to ease the viewport towards the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Four decaying bounces settling on the target.
    #[default]
    Bounce,
    /// Quadratic acceleration then deceleration, no bounce.
    InOutQuad,
}

impl Easing {
    pub const ALL: &[Easing] = &[Easing::Bounce, Easing::InOutQuad];

    /// Evaluate the curve.
    pub fn apply(self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Easing::Bounce => ease_out_bounce(t, b, c, d),
            Easing::InOutQuad => ease_in_out_quad(t, b, c, d),
        }
    }

    /// Name used in the config file and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Easing::Bounce => "bounce",
            Easing::InOutQuad => "quad",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bounce" => Ok(Easing::Bounce),
            "quad" | "in-out-quad" => Ok(Easing::InOutQuad),
            other => {
                let names: Vec<&str> = Easing::ALL.iter().map(|e| e.as_str()).collect();
                Err(format!("unknown easing `{other}` (expected one of: {})", names.join(", ")))
            }
        }
    }
}

// ───────────────────────────────────────── curves ────────────

/// Bounce-out: the value falls onto `b + c` and rebounds three times with
/// shrinking height.
///
/// Normalised time `p = t / d` is split into four bands at `1/2.75`,
/// `2/2.75` and `2.5/2.75`; each band is a parabola `7.5625 * u² + k`
/// whose floor `k` climbs towards 1 (`0`, `.75`, `.9375`, `.984375`).
pub fn ease_out_bounce(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 || t >= d {
        return b + c;
    }
    if t <= 0.0 {
        return b;
    }

    let p = t / d;
    let curve = if p < 1.0 / 2.75 {
        7.5625 * p * p
    } else if p < 2.0 / 2.75 {
        let u = p - 1.5 / 2.75;
        7.5625 * u * u + 0.75
    } else if p < 2.5 / 2.75 {
        let u = p - 2.25 / 2.75;
        7.5625 * u * u + 0.9375
    } else {
        let u = p - 2.625 / 2.75;
        7.5625 * u * u + 0.984375
    };

    c * curve + b
}

/// Quadratic ease-in-out.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 || t >= d {
        return b + c;
    }
    if t <= 0.0 {
        return b;
    }

    let p = t / (d / 2.0);
    if p < 1.0 {
        c / 2.0 * p * p + b
    } else {
        let p = p - 1.0;
        -c / 2.0 * (p * (p - 2.0) - 1.0) + b
    }
}
