//! Domain data structures for charge records, route translations, and their join.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Locales the report can be translated into.
///
/// The set is closed on purpose: route names arrive as one column per
/// language, and an unsupported locale code should be unrepresentable
/// instead of silently producing an empty table.
pub enum Locale {
    /// English.
    #[serde(rename = "en")]
    En,
    /// Danish.
    #[serde(rename = "da-DK")]
    DaDk,
    /// German.
    #[serde(rename = "de-DE")]
    DeDe,
    /// French.
    #[serde(rename = "fr-FR")]
    FrFr,
    /// Spanish.
    #[serde(rename = "es-ES")]
    EsEs,
    /// Italian.
    #[serde(rename = "it-IT")]
    ItIt,
    /// Dutch.
    #[serde(rename = "nl-NL")]
    NlNl,
    /// Norwegian.
    #[serde(rename = "no-NO")]
    NoNo,
    /// Finnish.
    #[serde(rename = "fi-FI")]
    FiFi,
    /// Estonian.
    #[serde(rename = "et-EE")]
    EtEe,
    /// Lithuanian.
    #[serde(rename = "lt-LT")]
    LtLt,
    /// Latvian.
    #[serde(rename = "lv-LV")]
    LvLv,
    /// Polish.
    #[serde(rename = "pl-PL")]
    PlPl,
    /// Swedish.
    #[serde(rename = "sv-SE")]
    SvSe,
    /// Turkish.
    #[serde(rename = "tr-TR")]
    TrTr,
}

impl Locale {
    /// Every supported locale, in the order the source columns are defined.
    pub const ALL: [Locale; 15] = [
        Locale::En,
        Locale::DaDk,
        Locale::DeDe,
        Locale::FrFr,
        Locale::EsEs,
        Locale::ItIt,
        Locale::NlNl,
        Locale::NoNo,
        Locale::FiFi,
        Locale::EtEe,
        Locale::LtLt,
        Locale::LvLv,
        Locale::PlPl,
        Locale::SvSe,
        Locale::TrTr,
    ];

    /// The locale code used as a field key by the CMS.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::DaDk => "da-DK",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::EsEs => "es-ES",
            Locale::ItIt => "it-IT",
            Locale::NlNl => "nl-NL",
            Locale::NoNo => "no-NO",
            Locale::FiFi => "fi-FI",
            Locale::EtEe => "et-EE",
            Locale::LtLt => "lt-LT",
            Locale::LvLv => "lv-LV",
            Locale::PlPl => "pl-PL",
            Locale::SvSe => "sv-SE",
            Locale::TrTr => "tr-TR",
        }
    }

    /// Month-name locale for formatting the report heading.
    #[must_use]
    pub const fn month_locale(self) -> chrono::Locale {
        match self {
            Locale::En => chrono::Locale::en_US,
            Locale::DaDk => chrono::Locale::da_DK,
            Locale::DeDe => chrono::Locale::de_DE,
            Locale::FrFr => chrono::Locale::fr_FR,
            Locale::EsEs => chrono::Locale::es_ES,
            Locale::ItIt => chrono::Locale::it_IT,
            Locale::NlNl => chrono::Locale::nl_NL,
            // glibc has no plain no_NO locale, Bokmål is the convention.
            Locale::NoNo => chrono::Locale::nb_NO,
            Locale::FiFi => chrono::Locale::fi_FI,
            Locale::EtEe => chrono::Locale::et_EE,
            Locale::LtLt => chrono::Locale::lt_LT,
            Locale::LvLv => chrono::Locale::lv_LV,
            Locale::PlPl => chrono::Locale::pl_PL,
            Locale::SvSe => chrono::Locale::sv_SE,
            Locale::TrTr => chrono::Locale::tr_TR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of a single charge record.
pub struct RecordId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier shared between a charge record and its route translation.
pub struct RouteId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of the CMS entry holding the published report.
pub struct EntryId(pub String);

impl fmt::Display for EntryId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
/// Bearer token obtained from the OAuth2 client-credentials exchange.
///
/// Read-only after creation; cloned into both concurrent fetchers.
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Transportation charge as fetched from the data platform.
pub struct ChargeRecord {
    /// Unique identifier.
    pub id: RecordId,
    /// Charge band in `"min-max"` form, used as a table column key.
    pub charge_range: String,
    /// Charge value in euros.
    pub charge_in_euros: f64,
    /// Route the charge applies to.
    pub route: RouteId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Display names of a route per locale.
pub struct RouteTranslation {
    /// Identifier referenced by [`ChargeRecord::route`].
    pub id: RouteId,
    /// Translated names. An absent locale means the route has no
    /// translation in that language.
    pub names: HashMap<Locale, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A charge record joined with the translated names of its route.
pub struct CombinedRecord {
    /// Identifier of the originating charge record.
    pub record_id: RecordId,
    /// Charge band in `"min-max"` form.
    pub charge_range: String,
    /// Charge value in euros.
    pub charge_in_euros: f64,
    /// Translated route names; empty when the route matched no translation.
    pub route_names: HashMap<Locale, String>,
}

impl CombinedRecord {
    /// Whether at least one locale has a display name for the route.
    #[must_use]
    pub fn has_any_name(&self) -> bool {
        !self.route_names.is_empty()
    }
}
