//! Environment-derived configuration for the report runner.

use std::env;

use ets_charges_provider_contentful::ContentfulConfig;
use ets_charges_provider_dataverse::DataverseConfig;

/// Environment tier the report entry lives in.
const ENVIRONMENT_ID: &str = "dev";

/// Rich-text field the locale documents are written into.
const RICH_TEXT_FIELD: &str = "richText";

/// Configuration for both providers, assembled from the environment.
pub(crate) struct Config {
    /// Data platform endpoints and credentials.
    pub dataverse: DataverseConfig,
    /// CMS addressing and credentials.
    pub contentful: ContentfulConfig,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Missing variables degrade to empty strings; the resulting requests
    /// fail upstream rather than being validated here.
    pub(crate) fn from_env() -> Self {
        Self {
            dataverse: DataverseConfig {
                token_url: DataverseConfig::token_url_for_tenant(&var("DYNAMICS_TENANT_ID")),
                client_id: var("DYNAMICS_CLIENT_ID"),
                client_secret: var("DYNAMICS_CLIENT_SECRET"),
                scope: var("DYNAMICS_SCOPE"),
                charges_url: var("ETS_DATA_ENDPOINT"),
                translations_url: var("ROUTE_TRANSLATION_ENDPOINT"),
            },
            contentful: ContentfulConfig {
                access_token: var("CONTENTFUL_ACCESS_TOKEN"),
                space_id: var("CONTENTFUL_SPACE_ID"),
                environment_id: ENVIRONMENT_ID.to_owned(),
                rich_text_field: RICH_TEXT_FIELD.to_owned(),
            },
        }
    }
}

fn var(key: &str) -> String {
    env::var(key).unwrap_or_default()
}
