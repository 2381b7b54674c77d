//! # Weekday Resolver
//!
//! Maps a calendar date to the weekday whose chores apply, together with the
//! label shown to people. Saturday and Sunday are rest days and resolve to
//! `None`.
//!
//! Rows are matched on the canonical weekday key (`monday` … `sunday`), never
//! on the label, so the label is purely cosmetic and an unknown locale simply
//! falls back to English naming.

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::Once;
use tracing::warn;

use crate::error::{ChoreError, Result};

/// Weekday naming tables supported by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayLocale {
    #[default]
    English,
    BrazilianPortuguese,
    Spanish,
    French,
}

static FALLBACK_WARNING: Once = Once::new();

impl WeekdayLocale {
    /// Resolve a locale identifier such as `pt_BR.UTF-8`, `pt-BR` or
    /// `Portuguese_Brazil.1252`. Unknown identifiers fall back to English.
    pub fn resolve(identifier: &str) -> Self {
        match Self::lookup(identifier) {
            Some(locale) => locale,
            None => {
                FALLBACK_WARNING.call_once(|| {
                    warn!(
                        "Unknown locale '{}', falling back to default weekday names",
                        identifier
                    );
                });
                Self::default()
            }
        }
    }

    fn lookup(identifier: &str) -> Option<Self> {
        // Drop the encoding suffix (".UTF-8", ".1252") and normalise separators
        let base = identifier.split('.').next().unwrap_or_default();
        let normalized = base.trim().replace('-', "_").to_ascii_lowercase();

        match normalized.as_str() {
            "en" | "en_us" | "en_gb" | "english" | "c" | "posix" => Some(WeekdayLocale::English),
            "pt" | "pt_br" | "portuguese_brazil" | "portuguese" => {
                Some(WeekdayLocale::BrazilianPortuguese)
            }
            "es" | "es_es" | "es_mx" | "spanish" | "spanish_spain" => Some(WeekdayLocale::Spanish),
            "fr" | "fr_fr" | "french" | "french_france" => Some(WeekdayLocale::French),
            _ => None,
        }
    }

    /// Full, title-cased weekday name
    pub fn label(&self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match self {
            WeekdayLocale::English => [
                "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
            ][index],
            WeekdayLocale::BrazilianPortuguese => [
                "Segunda-feira",
                "Terça-feira",
                "Quarta-feira",
                "Quinta-feira",
                "Sexta-feira",
                "Sábado",
                "Domingo",
            ][index],
            WeekdayLocale::Spanish => [
                "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo",
            ][index],
            WeekdayLocale::French => [
                "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
            ][index],
        }
    }
}

/// The weekday whose chores apply today
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreDay {
    pub weekday: Weekday,
    pub label: String,
}

/// Resolve `date` to a chore day, or `None` on Saturday and Sunday
pub fn resolve(date: NaiveDate, locale: WeekdayLocale) -> Option<ChoreDay> {
    let weekday = date.weekday();
    if is_rest_day(weekday) {
        return None;
    }

    Some(ChoreDay {
        weekday,
        label: locale.label(weekday).to_string(),
    })
}

pub fn is_rest_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Key stored in the `weekday` column
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

pub fn parse_weekday_key(key: &str) -> Result<Weekday> {
    match key {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        other => Err(ChoreError::InvalidWeekday(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_weekdays_in_portuguese() {
        // 2025-06-09 is a Monday
        let monday = resolve(date(2025, 6, 9), WeekdayLocale::BrazilianPortuguese).unwrap();
        assert_eq!(monday.weekday, Weekday::Mon);
        assert_eq!(monday.label, "Segunda-feira");

        let friday = resolve(date(2025, 6, 13), WeekdayLocale::BrazilianPortuguese).unwrap();
        assert_eq!(friday.weekday, Weekday::Fri);
        assert_eq!(friday.label, "Sexta-feira");
    }

    #[test]
    fn test_weekend_has_no_chores() {
        assert_eq!(resolve(date(2025, 6, 14), WeekdayLocale::English), None);
        assert_eq!(resolve(date(2025, 6, 15), WeekdayLocale::BrazilianPortuguese), None);
    }

    #[test]
    fn test_locale_identifiers() {
        assert_eq!(WeekdayLocale::resolve("pt_BR.UTF-8"), WeekdayLocale::BrazilianPortuguese);
        assert_eq!(WeekdayLocale::resolve("Portuguese_Brazil.1252"), WeekdayLocale::BrazilianPortuguese);
        assert_eq!(WeekdayLocale::resolve("pt-BR"), WeekdayLocale::BrazilianPortuguese);
        assert_eq!(WeekdayLocale::resolve("es_ES.UTF-8"), WeekdayLocale::Spanish);
        assert_eq!(WeekdayLocale::resolve("en_US"), WeekdayLocale::English);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(WeekdayLocale::resolve("xx_YY.UTF-8"), WeekdayLocale::English);
        assert_eq!(WeekdayLocale::resolve(""), WeekdayLocale::English);

        let day = resolve(date(2025, 6, 10), WeekdayLocale::resolve("klingon")).unwrap();
        assert_eq!(day.label, "Tuesday");
    }

    #[test]
    fn test_weekday_keys() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(parse_weekday_key(weekday_key(weekday)).unwrap(), weekday);
        }

        assert!(matches!(
            parse_weekday_key("Segunda-feira"),
            Err(ChoreError::InvalidWeekday(_))
        ));
    }
}
