//! Terminal capability detection and ANSI styling.
//!
//! Colour is on unless `NO_COLOR` is set or `TERM=dumb`. Unicode glyphs are
//! only used when the locale advertises UTF-8.

/// Raw ANSI escape sequences.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    // Role badges (bold reverse video).
    pub const TAG_ORIGIN: &str = "\x1b[1;7;32m";
    pub const TAG_STORAGE: &str = "\x1b[1;7;34m";
    pub const TAG_RECHARGE: &str = "\x1b[1;7;36m";
    pub const TAG_CLIENT: &str = "\x1b[1;7;33m";
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    pub const GRAY: &str = "\x1b[90m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    /// 256-colour orange.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const RED: &str = "\x1b[31m";
}

/// Resolved colour codes; every field is empty when colour is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_origin: &'static str,
    pub tag_storage: &'static str,
    pub tag_recharge: &'static str,
    pub tag_client: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_origin: colors::TAG_ORIGIN,
            tag_storage: colors::TAG_STORAGE,
            tag_recharge: colors::TAG_RECHARGE,
            tag_client: colors::TAG_CLIENT,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_origin: "",
            tag_storage: "",
            tag_recharge: "",
            tag_client: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            orange: "",
            red: "",
        }
    }

    /// `colored()` when the terminal supports it, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Colour for a battery level: green below half the ceiling, orange below
    /// 85%, red above.
    #[must_use]
    pub fn battery_level(&self, battery: u64, max_battery: u64) -> &'static str {
        if max_battery == 0 || battery.saturating_mul(100) >= max_battery.saturating_mul(85) {
            self.red
        } else if battery.saturating_mul(2) >= max_battery {
            self.orange
        } else {
            self.green
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether ANSI colour should be emitted.
///
/// Honours `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Whether the locale (`LC_ALL`, then `LANG`) advertises UTF-8.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LC_ALL", "LANG"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.to_uppercase().contains("UTF"))
            .unwrap_or(false)
    })
}

/// Fixed-width battery gauge, e.g. `[#####.....]`.
///
/// # Examples
///
/// ```
/// # use droneroute_cli::terminal::battery_gauge;
/// assert_eq!(battery_gauge(25, 50, 10, false), "[#####.....]");
/// assert_eq!(battery_gauge(0, 50, 4, false), "[....]");
/// ```
#[must_use]
pub fn battery_gauge(battery: u64, max_battery: u64, width: usize, unicode: bool) -> String {
    let filled = if max_battery == 0 {
        width
    } else {
        let ratio = battery.min(max_battery) as f64 / max_battery as f64;
        (ratio * width as f64).round() as usize
    };
    let (full, empty) = if unicode { ('█', '░') } else { ('#', '.') };

    let mut gauge = String::with_capacity(width + 2);
    gauge.push('[');
    gauge.extend(std::iter::repeat(full).take(filled));
    gauge.extend(std::iter::repeat(empty).take(width - filled));
    gauge.push(']');
    gauge
}

/// Format a number with thousand separators, e.g. `1,234,567`.
///
/// ```
/// # use droneroute_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
