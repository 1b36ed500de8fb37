//! Region display names.
//!
//! Resolves ISO 3166-1 alpha-2 codes to the English short names shown in
//! the standings table.

use isocountry::CountryCode;
use std::collections::HashMap;

/// English locale names that differ from the ISO short names.
const LOCALE_NAMES: &[(&str, &str)] = &[
    ("AG", "Antigua & Barbuda"),
    ("AX", "Åland Islands"),
    ("BA", "Bosnia & Herzegovina"),
    ("BL", "St. Barthélemy"),
    ("BN", "Brunei"),
    ("BO", "Bolivia"),
    ("BQ", "Caribbean Netherlands"),
    ("CD", "Congo - Kinshasa"),
    ("CG", "Congo - Brazzaville"),
    ("CI", "Côte d’Ivoire"),
    ("CV", "Cape Verde"),
    ("CW", "Curaçao"),
    ("CZ", "Czechia"),
    ("FK", "Falkland Islands"),
    ("FM", "Micronesia"),
    ("GB", "United Kingdom"),
    ("GS", "South Georgia & South Sandwich Islands"),
    ("HK", "Hong Kong SAR China"),
    ("HM", "Heard & McDonald Islands"),
    ("IR", "Iran"),
    ("KN", "St. Kitts & Nevis"),
    ("KP", "North Korea"),
    ("KR", "South Korea"),
    ("LA", "Laos"),
    ("LC", "St. Lucia"),
    ("MD", "Moldova"),
    ("MF", "St. Martin"),
    ("MK", "North Macedonia"),
    ("MM", "Myanmar (Burma)"),
    ("MO", "Macao SAR China"),
    ("NL", "Netherlands"),
    ("PM", "St. Pierre & Miquelon"),
    ("PN", "Pitcairn Islands"),
    ("PS", "Palestinian Territories"),
    ("RE", "Réunion"),
    ("RU", "Russia"),
    ("SH", "St. Helena"),
    ("SJ", "Svalbard & Jan Mayen"),
    ("ST", "São Tomé & Príncipe"),
    ("SX", "Sint Maarten"),
    ("SY", "Syria"),
    ("SZ", "Eswatini"),
    ("TC", "Turks & Caicos Islands"),
    ("TL", "Timor-Leste"),
    ("TR", "Türkiye"),
    ("TT", "Trinidad & Tobago"),
    ("TW", "Taiwan"),
    ("TZ", "Tanzania"),
    ("UM", "U.S. Outlying Islands"),
    ("US", "United States"),
    ("VA", "Vatican City"),
    ("VC", "St. Vincent & Grenadines"),
    ("VE", "Venezuela"),
    ("VG", "British Virgin Islands"),
    ("VI", "U.S. Virgin Islands"),
    ("VN", "Vietnam"),
    ("WF", "Wallis & Futuna"),
    ("XK", "Kosovo"),
];

/// Region-name lookup, built once per run.
#[derive(Debug, Clone, Default)]
pub struct RegionNames {
    overrides: HashMap<String, String>,
}

impl RegionNames {
    /// Creates a lookup with user-supplied names taking precedence.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(code, name)| (code.trim().to_uppercase(), name))
                .collect(),
        }
    }

    /// Returns the locale name of a region code, or `None` if unknown.
    pub fn region_name(&self, code: &str) -> Option<String> {
        let code = code.trim().to_uppercase();

        if let Some(name) = self.overrides.get(&code) {
            return Some(name.clone());
        }

        if let Some((_, name)) = LOCALE_NAMES.iter().find(|(c, _)| *c == code) {
            return Some((*name).to_string());
        }

        CountryCode::for_alpha2(&code)
            .ok()
            .map(|country| country.name().to_string())
    }

    /// Returns the name displayed in the standings table.
    pub fn display_name(&self, code: &str) -> Option<String> {
        self.region_name(code)
            .map(|name| name.replace("Hong Kong SAR China", "Hong Kong"))
    }
}
