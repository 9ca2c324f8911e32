//! Provider implementation for the Power Apps / Dataverse data platform.
//!
//! Implements the token port (OAuth2 client-credentials) and the two record
//! ports. Rows arrive under the OData `value` envelope with `cr02c_*` column
//! names and are mapped into the core models here.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::error;

use ets_charges_core::{
    model::{AccessToken, ChargeRecord, Locale, RecordId, RouteId, RouteTranslation},
    ports::{AuthError, ChargePort, FetchError, Resource, TokenPort, TranslationPort},
};

#[derive(Debug, Clone)]
/// Endpoint and credential configuration for the Dataverse tenant.
pub struct DataverseConfig {
    /// OAuth2 token endpoint of the tenant.
    pub token_url: String,
    /// Application (client) id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Resource scope requested with the token.
    pub scope: String,
    /// Endpoint returning transportation charge records.
    pub charges_url: String,
    /// Endpoint returning route translation records.
    pub translations_url: String,
}

impl DataverseConfig {
    /// Token endpoint for a directory tenant.
    #[must_use]
    pub fn token_url_for_tenant(tenant_id: &str) -> String {
        format!("https://login.microsoftonline.com/{tenant_id}/oauth2/v2.0/token")
    }
}

/// OAuth2 token response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    // expires_in and token_type are also returned, we don't need them
}

/// OData list envelope; both record endpoints wrap their rows in `value`.
#[derive(Debug, Deserialize)]
struct ValueEnvelope<T> {
    value: Vec<T>,
}

/// Charge row as returned by the charges endpoint.
#[derive(Debug, Deserialize)]
struct ChargeRow {
    #[serde(rename = "cr02c_recordid")]
    record_id: String,
    #[serde(rename = "cr02c_chargerange")]
    charge_range: String,
    #[serde(rename = "cr02c_chargeineuros")]
    charge_in_euros: f64,
    #[serde(rename = "_cr02c_route_value")]
    route: String,
}

impl ChargeRow {
    fn into_record(self) -> ChargeRecord {
        ChargeRecord {
            id: RecordId(self.record_id),
            charge_range: self.charge_range,
            charge_in_euros: self.charge_in_euros,
            route: RouteId(self.route),
        }
    }
}

/// Translation row; one nullable name column per supported language.
#[derive(Debug, Deserialize)]
struct TranslationRow {
    #[serde(rename = "cr02c_routetranslation1id")]
    id: String,
    #[serde(rename = "cr02c_englishroutename")]
    english: Option<String>,
    #[serde(rename = "cr02c_danishroutename")]
    danish: Option<String>,
    #[serde(rename = "cr02c_germanroutename")]
    german: Option<String>,
    #[serde(rename = "cr02c_frenchroutename")]
    french: Option<String>,
    #[serde(rename = "cr02c_spanishroutename")]
    spanish: Option<String>,
    #[serde(rename = "cr02c_italianroutename")]
    italian: Option<String>,
    #[serde(rename = "cr02c_dutchroutename")]
    dutch: Option<String>,
    #[serde(rename = "cr02c_norwegianroutename")]
    norwegian: Option<String>,
    #[serde(rename = "cr02c_finnishroutename")]
    finnish: Option<String>,
    #[serde(rename = "cr02c_estonianroutename")]
    estonian: Option<String>,
    #[serde(rename = "cr02c_lithuanianroutename")]
    lithuanian: Option<String>,
    #[serde(rename = "cr02c_latvianroutename")]
    latvian: Option<String>,
    #[serde(rename = "cr02c_polishroutename")]
    polish: Option<String>,
    #[serde(rename = "cr02c_swedishroutename")]
    swedish: Option<String>,
    #[serde(rename = "cr02c_turkishroutename")]
    turkish: Option<String>,
}

impl TranslationRow {
    fn into_translation(self) -> RouteTranslation {
        let names = [
            (Locale::En, self.english),
            (Locale::DaDk, self.danish),
            (Locale::DeDe, self.german),
            (Locale::FrFr, self.french),
            (Locale::EsEs, self.spanish),
            (Locale::ItIt, self.italian),
            (Locale::NlNl, self.dutch),
            (Locale::NoNo, self.norwegian),
            (Locale::FiFi, self.finnish),
            (Locale::EtEe, self.estonian),
            (Locale::LtLt, self.lithuanian),
            (Locale::LvLv, self.latvian),
            (Locale::PlPl, self.polish),
            (Locale::SvSe, self.swedish),
            (Locale::TrTr, self.turkish),
        ]
        .into_iter()
        .filter_map(|(locale, name)| {
            name.filter(|name| !name.is_empty())
                .map(|name| (locale, name))
        })
        .collect();

        RouteTranslation {
            id: RouteId(self.id),
            names,
        }
    }
}

/// Dataverse-backed implementation of the token and record ports.
pub struct DataverseProvider {
    client: Client,
    config: DataverseConfig,
}

impl DataverseProvider {
    /// Create a new provider bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: DataverseConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &AccessToken,
        resource: Resource,
    ) -> Result<Vec<T>, FetchError> {
        fetch_json::<ValueEnvelope<T>>(
            self.client
                .get(url)
                .bearer_auth(&token.0)
                .header(ACCEPT, "application/json"),
            resource,
        )
        .await
        .map(|envelope| envelope.value)
        .inspect_err(|error| error!("{error}"))
    }
}

#[async_trait]
impl TokenPort for DataverseProvider {
    async fn token(&self) -> Result<AccessToken, AuthError> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", self.config.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let result: Result<TokenResponse, AuthError> = async {
            Ok(self
                .client
                .post(&self.config.token_url)
                .form(&form)
                .send()
                .await?
                .error_for_status()?
                .json::<TokenResponse>()
                .await?)
        }
        .await;

        result
            .map(|response| AccessToken(response.access_token))
            .inspect_err(|error| error!("Error fetching access token: {error}"))
    }
}

#[async_trait]
impl ChargePort for DataverseProvider {
    async fn charges(&self, token: &AccessToken) -> Result<Vec<ChargeRecord>, FetchError> {
        let rows: Vec<ChargeRow> = self
            .fetch_rows(&self.config.charges_url, token, Resource::Charges)
            .await?;

        Ok(rows.into_iter().map(ChargeRow::into_record).collect())
    }
}

#[async_trait]
impl TranslationPort for DataverseProvider {
    async fn translations(&self, token: &AccessToken) -> Result<Vec<RouteTranslation>, FetchError> {
        let rows: Vec<TranslationRow> = self
            .fetch_rows(&self.config.translations_url, token, Resource::Translations)
            .await?;

        Ok(rows
            .into_iter()
            .map(TranslationRow::into_translation)
            .collect())
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(
    req: RequestBuilder,
    resource: Resource,
) -> Result<T, FetchError> {
    let as_fetch_error = |source| FetchError::Network { resource, source };

    req.send()
        .await
        .map_err(as_fetch_error)?
        .error_for_status()
        .map_err(as_fetch_error)?
        .json()
        .await
        .map_err(as_fetch_error)
}
