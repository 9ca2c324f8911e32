//! Provider implementation for the Contentful Management API.
//!
//! Performs the single read-modify-write cycle that publishes the built
//! locale documents into the report entry's rich-text field.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use ets_charges_core::{
    model::{EntryId, Locale},
    ports::{CmsError, EntryPort},
    richtext::Document,
};

const BASE_URL: &str = "https://api.contentful.com";

/// Optimistic-concurrency header required by entry writes.
const VERSION_HEADER: &str = "X-Contentful-Version";

const CMA_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

#[derive(Debug, Clone)]
/// Addressing and credential configuration for the CMS space.
pub struct ContentfulConfig {
    /// Management API token.
    pub access_token: String,
    /// Space holding the report entry.
    pub space_id: String,
    /// Environment tier, e.g. `"dev"`.
    pub environment_id: String,
    /// Id of the rich-text field the locale documents are written into.
    pub rich_text_field: String,
}

/// Entry as read from (and written back to) the Management API. Fields are
/// kept as raw JSON so unrelated fields survive the write untouched.
#[derive(Debug, Deserialize)]
struct EntryEnvelope {
    sys: EntrySys,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct EntrySys {
    id: String,
    version: u64,
}

/// Contentful-backed implementation of the entry port.
pub struct ContentfulProvider {
    client: Client,
    config: ContentfulConfig,
}

impl ContentfulProvider {
    /// Create a new provider bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: ContentfulConfig) -> Self {
        Self { client, config }
    }

    fn entry_url(&self, entry: &EntryId) -> String {
        format!(
            "{BASE_URL}/spaces/{}/environments/{}/entries/{entry}",
            self.config.space_id, self.config.environment_id
        )
    }

    async fn read_entry(&self, url: &str) -> Result<EntryEnvelope, CmsError> {
        Ok(self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn write_entry(
        &self,
        url: &str,
        version: u64,
        fields: &Map<String, Value>,
    ) -> Result<EntryEnvelope, CmsError> {
        Ok(self
            .client
            .put(url)
            .bearer_auth(&self.config.access_token)
            .header(VERSION_HEADER, version)
            .json(&json!({ "fields": fields }))
            .header(CONTENT_TYPE, CMA_CONTENT_TYPE)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn apply_update(
        &self,
        url: &str,
        documents: &[(Locale, Document)],
    ) -> Result<EntryId, CmsError> {
        let mut envelope = self.read_entry(url).await?;

        assign_documents(&mut envelope.fields, &self.config.rich_text_field, documents)?;

        let updated = self
            .write_entry(url, envelope.sys.version, &envelope.fields)
            .await?;

        Ok(EntryId(updated.sys.id))
    }
}

/// Set the rich-text field's value for each locale, keeping any locales the
/// entry already carries.
fn assign_documents(
    fields: &mut Map<String, Value>,
    field_id: &str,
    documents: &[(Locale, Document)],
) -> Result<(), CmsError> {
    let field = fields
        .entry(field_id.to_owned())
        .or_insert_with(|| Value::Object(Map::new()));

    let Some(by_locale) = field.as_object_mut() else {
        return Err(CmsError::MalformedEntry(format!(
            "field {field_id:?} is not a locale map"
        )));
    };

    for (locale, document) in documents {
        debug!("assigning report document for locale {locale}");
        let value = serde_json::to_value(document)
            .map_err(|error| CmsError::Serialization(error.to_string()))?;
        by_locale.insert(locale.as_str().to_owned(), value);
    }

    Ok(())
}

#[async_trait]
impl EntryPort for ContentfulProvider {
    async fn update_entry(
        &self,
        entry: &EntryId,
        documents: &[(Locale, Document)],
    ) -> Result<EntryId, CmsError> {
        let url = self.entry_url(entry);

        self.apply_update(&url, documents)
            .await
            .inspect_err(|error| error!("Error updating entry {entry}: {error}"))
    }
}
