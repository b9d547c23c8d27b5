//! Daily theme selection for ranking challenges.

use chrono::{Datelike, NaiveDate, Utc};

use crate::constants::DEFAULT_DAILY_THEMES;

/// Rotates through a fixed list of themes, one per UTC calendar day.
#[derive(Debug, Clone)]
pub struct ThemeRotation {
    themes: Vec<String>,
}

impl ThemeRotation {
    /// Create a rotation; an empty list falls back to the built-in themes.
    #[must_use]
    pub fn new(themes: Vec<String>) -> Self {
        let themes = if themes.is_empty() {
            DEFAULT_DAILY_THEMES.iter().map(ToString::to_string).collect()
        } else {
            themes
        };
        Self { themes }
    }

    /// Theme for the given date. Stable for the whole day.
    pub fn theme_for(&self, date: NaiveDate) -> &str {
        let day = date.num_days_from_ce().unsigned_abs() as usize;
        &self.themes[day % self.themes.len()]
    }

    /// Theme for the current UTC date.
    pub fn today(&self) -> &str {
        self.theme_for(Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_same_theme() {
        let rotation = ThemeRotation::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(
            rotation.theme_for(date(2026, 10, 19)),
            rotation.theme_for(date(2026, 10, 19))
        );
    }

    #[test]
    fn test_consecutive_days_rotate() {
        let rotation = ThemeRotation::new(vec!["a".into(), "b".into(), "c".into()]);
        let first = rotation.theme_for(date(2026, 10, 19));
        let second = rotation.theme_for(date(2026, 10, 20));
        let fourth = rotation.theme_for(date(2026, 10, 22));

        assert_ne!(first, second);
        assert_eq!(first, fourth);
    }

    #[test]
    fn test_empty_list_uses_defaults() {
        let rotation = ThemeRotation::new(Vec::new());
        assert!(DEFAULT_DAILY_THEMES.contains(&rotation.today()));
    }
}
