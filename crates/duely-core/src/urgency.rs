//! Urgency scoring: how close an unpaid occurrence is to its due date,
//! as a progress fraction plus an sRGB color band.

use chrono::{NaiveDate, NaiveDateTime};

use duely_domain::calendar::at_noon;

/// Days of headroom that count as fully safe (full green bar).
pub const DEFAULT_WINDOW_DAYS: f64 = 30.0;

pub const SAFE: Rgb = Rgb::new(52, 199, 89);
pub const WARNING: Rgb = Rgb::new(255, 204, 0);
pub const CRITICAL: Rgb = Rgb::new(255, 59, 48);
pub const SETTLED: Rgb = Rgb::new(142, 142, 147);

const SECONDS_PER_DAY: f64 = 86_400.0;

/// An sRGB color with linear per-channel interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors; `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
        Rgb {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
        }
    }
}

/// Progress toward a due date (1.0 = far away, 0.0 = due or overdue) with
/// the matching color band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Urgency {
    pub progress: f64,
    pub color: Rgb,
}

impl Urgency {
    /// Scores one occurrence against "now".
    ///
    /// Paid occurrences are fully settled (progress 1.0, neutral gray).
    /// Otherwise the remaining time, in fractional days against the due
    /// date's noon anchor, is normalized over `window_days` and the color
    /// sweeps green -> yellow -> red, continuous at the midpoint. Overdue
    /// clamps to full red.
    pub fn score(due_date: NaiveDate, is_paid: bool, window_days: f64, now: NaiveDateTime) -> Self {
        if is_paid {
            return Self {
                progress: 1.0,
                color: SETTLED,
            };
        }
        let window = if window_days > 0.0 {
            window_days
        } else {
            DEFAULT_WINDOW_DAYS
        };
        let days_left = (at_noon(due_date) - now).num_seconds() as f64 / SECONDS_PER_DAY;
        let progress = (days_left / window).clamp(0.0, 1.0);
        let t = 1.0 - progress;
        let color = if t < 0.5 {
            Rgb::lerp(SAFE, WARNING, t / 0.5)
        } else {
            Rgb::lerp(WARNING, CRITICAL, (t - 0.5) / 0.5)
        };
        Self { progress, color }
    }
}

/// Compact countdown: a check mark when paid, `"today"` on the due day,
/// otherwise whole days remaining (negative once overdue).
pub fn countdown_label(due_date: NaiveDate, is_paid: bool, today: NaiveDate) -> String {
    if is_paid {
        return "✓".into();
    }
    let days = (due_date - today).num_days();
    if days == 0 {
        "today".into()
    } else {
        format!("{days}d")
    }
}
