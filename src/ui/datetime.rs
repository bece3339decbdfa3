// ============================================================================
// Formatage des dates selon la locale
// ============================================================================
// Convertit un timestamp en millisecondes (epoch Unix) en date/heure lisible,
// dans la locale et le fuseau de l'environnement (ou ceux fixés par la config
// et les tests).
//
// CONCEPTS RUST :
// 1. Enums Copy : Locale et Zone se passent par valeur
// 2. Génériques sur TimeZone : un seul chemin de formatage pour Local et FixedOffset
// ============================================================================

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

/// Texte affiché pour un timestamp hors de la plage représentable
pub const INVALID_DATE: &str = "Invalid Date";

/// Locales supportées pour l'affichage des dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// 1/1/1970, 12:00:00 AM
    #[default]
    EnUs,
    /// 01/01/1970, 00:00:00
    EnGb,
    /// 1.1.1970, 00:00:00
    De,
    /// 01/01/1970 00:00:00
    Fr,
    /// 1970-01-01 00:00:00
    Iso,
}

impl Locale {
    /// Résout une étiquette de locale (`en_US.UTF-8`, `fr-FR`, `C`, ...)
    ///
    /// Les étiquettes inconnues retombent sur `EnUs`
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase().replace('-', "_");
        // "fr_FR.UTF-8@euro" -> "fr_fr"
        let tag = tag.split(['.', '@']).next().unwrap_or_default();

        if tag == "iso" {
            Locale::Iso
        } else if tag.starts_with("en_gb") {
            Locale::EnGb
        } else if tag == "de" || tag.starts_with("de_") {
            Locale::De
        } else if tag == "fr" || tag.starts_with("fr_") {
            Locale::Fr
        } else {
            Locale::EnUs
        }
    }

    /// Locale de l'environnement : LC_ALL, puis LC_TIME, puis LANG
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::from_tag(&value))
            .unwrap_or_default()
    }

    /// Format strftime de la locale
    fn pattern(&self) -> &'static str {
        match self {
            Locale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
            Locale::EnGb => "%d/%m/%Y, %H:%M:%S",
            Locale::De => "%-d.%-m.%Y, %H:%M:%S",
            Locale::Fr => "%d/%m/%Y %H:%M:%S",
            Locale::Iso => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// Fuseau horaire d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Fuseau de l'environnement
    #[default]
    Local,
    /// Décalage fixe par rapport à UTC
    Fixed(FixedOffset),
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Parse un décalage `+HH:MM`, `-HH:MM` ou `Z`
    pub fn parse_offset(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let (sign, rest) = match text.chars().next() {
            Some('+') => (1, &text[1..]),
            Some('-') => (-1, &text[1..]),
            _ => bail!("UTC offset '{}' must start with '+' or '-'", text),
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours = offset_field(hours)
            .with_context(|| format!("Heures invalides dans '{}'", text))?;
        let minutes = offset_field(minutes)
            .with_context(|| format!("Minutes invalides dans '{}'", text))?;
        if minutes >= 60 {
            bail!("UTC offset '{}' has more than 59 minutes", text);
        }

        let seconds = sign * (hours * 3600 + minutes * 60);
        let offset = FixedOffset::east_opt(seconds)
            .with_context(|| format!("UTC offset '{}' out of range", text))?;
        Ok(Zone::Fixed(offset))
    }
}

/// Champ numérique d'un décalage : un ou deux chiffres ASCII
///
/// `i32::from_str` accepte un signe, qui ne doit apparaître qu'en tête du décalage
fn offset_field(field: &str) -> Result<i32> {
    if field.is_empty() || field.len() > 2 || !field.chars().all(|c| c.is_ascii_digit()) {
        bail!("'{}' is not a number", field);
    }
    Ok(field.parse()?)
}

/// Formateur date/heure : locale + fuseau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeFormat {
    pub locale: Locale,
    pub zone: Zone,
}

impl DateTimeFormat {
    pub fn new(locale: Locale, zone: Zone) -> Self {
        Self { locale, zone }
    }

    /// Locale et fuseau de l'environnement d'exécution
    pub fn from_env() -> Self {
        Self::new(Locale::from_env(), Zone::Local)
    }

    /// Formate un timestamp en millisecondes depuis l'epoch
    pub fn format_millis(&self, millis: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(millis) else {
            return INVALID_DATE.to_string();
        };

        match self.zone {
            Zone::Local => self.format_in(&utc, &Local),
            Zone::Fixed(offset) => self.format_in(&utc, &offset),
        }
    }

    fn format_in<Tz>(&self, utc: &DateTime<Utc>, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        utc.with_timezone(zone)
            .format(self.locale.pattern())
            .to_string()
    }
}
