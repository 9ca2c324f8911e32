//! Joining charge records with the translated names of their routes.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{ChargeRecord, CombinedRecord, RouteId, RouteTranslation};

/// Merge charge records with route translations by route identifier.
///
/// Each charge record is projected into a [`CombinedRecord`] carrying the
/// translated names of its route. Charges whose route matches no
/// translation in any locale are dropped, everything else keeps the input
/// order of the charge records.
///
/// Duplicate translation ids overwrite each other; the last one in the
/// input wins.
#[must_use]
pub fn join(
    charges: Vec<ChargeRecord>,
    translations: Vec<RouteTranslation>,
) -> Vec<CombinedRecord> {
    let names_by_route: HashMap<RouteId, _> = translations
        .into_iter()
        .map(|translation| (translation.id, translation.names))
        .collect();

    let total = charges.len();

    let combined: Vec<CombinedRecord> = charges
        .into_iter()
        .map(|charge| {
            let route_names = names_by_route.get(&charge.route).cloned().unwrap_or_default();
            CombinedRecord {
                record_id: charge.id,
                charge_range: charge.charge_range,
                charge_in_euros: charge.charge_in_euros,
                route_names,
            }
        })
        .filter(CombinedRecord::has_any_name)
        .collect();

    debug!(
        "joined {total} charge records, {} with at least one translated route name",
        combined.len()
    );

    combined
}
