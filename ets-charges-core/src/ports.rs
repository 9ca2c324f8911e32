//! Traits describing the external collaborators and their error types.

use std::fmt;

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{AccessToken, ChargeRecord, EntryId, Locale, RecordId, RouteTranslation};
use crate::richtext::Document;

#[derive(thiserror::Error, Debug)]
/// Errors raised while exchanging client credentials for a bearer token.
pub enum AuthError {
    /// Transport failure, non-2xx response, or an unreadable token body.
    #[error("Token exchange failed: {0}")]
    Exchange(#[from] ReqwestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The record set a fetcher was retrieving when it failed.
pub enum Resource {
    /// Transportation charge records.
    Charges,
    /// Route translation records.
    Translations,
}

impl fmt::Display for Resource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Charges => "transportation charge records",
            Resource::Translations => "route translation records",
        };
        formatter.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
/// Errors raised while fetching one of the two record sets.
pub enum FetchError {
    /// Transport failure, non-2xx response, or an undecodable body.
    #[error("Failed to fetch {resource}: {source}")]
    Network {
        /// Which record set was being fetched.
        resource: Resource,
        /// Underlying transport error.
        source: ReqwestError,
    },
    /// Internal fetcher error.
    #[error("Failed to fetch {resource}: {message}")]
    Internal {
        /// Which record set was being fetched.
        resource: Resource,
        /// Description of the failure.
        message: String,
    },
}

impl FetchError {
    /// Which record set the failed fetch was retrieving.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            FetchError::Network { resource, .. } | FetchError::Internal { resource, .. } => {
                *resource
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
/// Errors raised while merging the two record sets into table data.
pub enum JoinError {
    /// A charge range has no numeric lower bound to order its column by.
    #[error("Charge range {range:?} on record {record_id:?} has no numeric lower bound")]
    MalformedChargeRange {
        /// Record carrying the offending range.
        record_id: RecordId,
        /// The range string as received.
        range: String,
    },
}

#[derive(thiserror::Error, Debug)]
/// Errors raised while reading or writing the CMS entry.
pub enum CmsError {
    /// Transport failure, non-2xx response, or an undecodable body.
    #[error("CMS request failed: {0}")]
    Network(#[from] ReqwestError),
    /// The entry exists but its fields do not have the expected shape.
    #[error("Malformed CMS entry: {0}")]
    MalformedEntry(String),
    /// A built document could not be serialized into the entry field.
    #[error("Failed to serialize rich text document: {0}")]
    Serialization(String),
}

#[derive(thiserror::Error, Debug)]
/// Any failure of the end-to-end report workflow.
pub enum WorkflowError {
    /// Token exchange failed.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
    /// One of the record fetches failed.
    #[error("Data retrieval failed: {0}")]
    Fetch(#[from] FetchError),
    /// The fetched records could not be merged.
    #[error("Data merge failed: {0}")]
    Join(#[from] JoinError),
    /// The CMS entry could not be read or written.
    #[error("CMS update failed: {0}")]
    Cms(#[from] CmsError),
}

#[async_trait]
/// Trait for the OAuth2 client-credentials token exchange.
pub trait TokenPort: Send + Sync {
    /// Obtain a bearer token for the data platform.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] on any transport or non-2xx response.
    /// The exchange is never retried.
    async fn token(&self) -> Result<AccessToken, AuthError>;
}

#[async_trait]
/// Trait for fetching transportation charge records.
pub trait ChargePort: Send + Sync {
    /// Fetch all charge records using the given token.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] naming [`Resource::Charges`] when the
    /// request fails.
    async fn charges(&self, token: &AccessToken) -> Result<Vec<ChargeRecord>, FetchError>;
}

#[async_trait]
/// Trait for fetching route translation records.
pub trait TranslationPort: Send + Sync {
    /// Fetch all route translations using the given token.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] naming [`Resource::Translations`] when the
    /// request fails.
    async fn translations(&self, token: &AccessToken) -> Result<Vec<RouteTranslation>, FetchError>;
}

#[async_trait]
/// Trait for persisting the built documents into the CMS entry.
pub trait EntryPort: Send + Sync {
    /// Set the entry's rich-text field for each locale and persist it.
    ///
    /// Performs exactly one read-modify-write cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`CmsError`] when the entry read or write fails.
    async fn update_entry(
        &self,
        entry: &EntryId,
        documents: &[(Locale, Document)],
    ) -> Result<EntryId, CmsError>;
}
