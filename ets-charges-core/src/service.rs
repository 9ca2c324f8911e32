//! High-level service facade driving the fetch-join-publish workflow.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::join::join;
use crate::model::{CombinedRecord, EntryId, Locale};
use crate::ports::{ChargePort, EntryPort, TokenPort, TranslationPort, WorkflowError};
use crate::richtext::Document;
use crate::table::{build_locale_document, charge_range_order, period_label};

/// Public entry point for producing and publishing the charges report.
///
/// All external collaborators are injected as ports; the service holds no
/// client state of its own and performs one run-to-completion workflow per
/// call.
pub struct ReportService {
    token_port: Arc<dyn TokenPort>,
    charge_port: Arc<dyn ChargePort>,
    translation_port: Arc<dyn TranslationPort>,
    entry_port: Arc<dyn EntryPort>,
}

impl ReportService {
    /// Create a new service bound to the provided ports.
    #[must_use]
    pub fn new(
        token_port: Arc<dyn TokenPort>,
        charge_port: Arc<dyn ChargePort>,
        translation_port: Arc<dyn TranslationPort>,
        entry_port: Arc<dyn EntryPort>,
    ) -> Self {
        Self {
            token_port,
            charge_port,
            translation_port,
            entry_port,
        }
    }

    /// Fetch both record sets and join them.
    ///
    /// The two fetches run concurrently with the same token; the first
    /// failure aborts the pair and no partial join is attempted.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowError`] when the token exchange or either fetch
    /// fails.
    pub async fn combined_records(&self) -> Result<Vec<CombinedRecord>, WorkflowError> {
        let token = self.token_port.token().await?;

        let (charges, translations) = futures::try_join!(
            self.charge_port.charges(&token),
            self.translation_port.translations(&token),
        )?;

        debug!(
            "fetched {} charge records and {} route translations",
            charges.len(),
            translations.len()
        );

        Ok(join(charges, translations))
    }

    /// Build one document per locale and persist them into the CMS entry.
    ///
    /// The charge-range column ordering is computed once from the full
    /// record set and shared by every locale. Documents are built and
    /// assigned sequentially; the entry is written exactly once.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowError`] when any stage of the workflow fails.
    pub async fn publish(
        &self,
        entry: &EntryId,
        locales: &[Locale],
        today: NaiveDate,
    ) -> Result<EntryId, WorkflowError> {
        let records = self.combined_records().await?;
        let range_order = charge_range_order(&records)?;

        let mut documents: Vec<(Locale, Document)> = Vec::with_capacity(locales.len());
        for &locale in locales {
            debug!("building report document for locale {locale}");
            let label = period_label(locale, today);
            documents.push((
                locale,
                build_locale_document(&records, locale, &range_order, &label),
            ));
        }

        let updated = self.entry_port.update_entry(entry, &documents).await?;
        info!(
            "entry {updated} updated with {} locale documents",
            documents.len()
        );

        Ok(updated)
    }
}
