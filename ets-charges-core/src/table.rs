//! Building the per-locale report document from joined records.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::{CombinedRecord, Locale};
use crate::ports::JoinError;
use crate::richtext::{Document, Node};

/// Label of the first header column.
const ROUTE_NAME_HEADER: &str = "Route Name";

/// Displayed route name when the locale has no translation.
const UNTRANSLATED: &str = "N/A";

/// Charges of one route, keyed by charge range.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGroup {
    /// Resolved display name, or `"N/A"` when the locale has none.
    pub name: String,
    /// Euro value per charge range. Duplicate (route, range) pairs keep
    /// the last record seen, they are never summed.
    pub charges: HashMap<String, f64>,
}

/// Numeric lower bound of a `"min-max"` range string.
fn lower_bound(range: &str) -> Option<f64> {
    range
        .split('-')
        .next()
        .and_then(|prefix| prefix.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Compute the shared column ordering for every locale's table.
///
/// Charge ranges are de-duplicated and sorted ascending by the numeric
/// value preceding the first `-`. The ordering is computed once from the
/// full record set so that columns line up across locales.
///
/// # Errors
///
/// Returns [`JoinError::MalformedChargeRange`] for the first range whose
/// leading segment is not a finite number. A bad upstream row should stop
/// the run instead of silently reordering every table.
pub fn charge_range_order(records: &[CombinedRecord]) -> Result<Vec<String>, JoinError> {
    let mut seen = HashSet::new();
    let mut ranges = Vec::new();

    for record in records {
        if !seen.insert(record.charge_range.clone()) {
            continue;
        }
        let Some(bound) = lower_bound(&record.charge_range) else {
            return Err(JoinError::MalformedChargeRange {
                record_id: record.record_id.clone(),
                range: record.charge_range.clone(),
            });
        };
        ranges.push((bound, record.charge_range.clone()));
    }

    ranges.sort_by(|left, right| left.0.total_cmp(&right.0));

    Ok(ranges.into_iter().map(|(_bound, range)| range).collect())
}

/// Group records by the route name resolved for `locale`.
///
/// Groups keep the order in which their route first appears; within a
/// group the last record for a charge range wins.
#[must_use]
pub fn group_by_route(records: &[CombinedRecord], locale: Locale) -> Vec<RouteGroup> {
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RouteGroup> = Vec::new();

    for record in records {
        let name = record
            .route_names
            .get(&locale)
            .cloned()
            .unwrap_or_else(|| UNTRANSLATED.to_owned());

        let index = *index_by_name.entry(name.clone()).or_insert_with(|| {
            groups.push(RouteGroup {
                name,
                charges: HashMap::new(),
            });
            groups.len() - 1
        });

        if let Some(group) = groups.get_mut(index) {
            group
                .charges
                .insert(record.charge_range.clone(), record.charge_in_euros);
        }
    }

    groups
}

/// Render the report document for one locale.
///
/// The document is a heading with the period label followed by a table:
/// a header row (route-name label plus one cell per charge range in the
/// shared order) and one row per route group, with euro values formatted
/// to exactly two decimals and an empty cell where a (route, range) pair
/// has no value.
#[must_use]
pub fn build_locale_document(
    records: &[CombinedRecord],
    locale: Locale,
    range_order: &[String],
    period_label: &str,
) -> Document {
    let groups = group_by_route(records, locale);

    let mut header = Vec::with_capacity(range_order.len() + 1);
    header.push(Node::cell(ROUTE_NAME_HEADER));
    header.extend(range_order.iter().map(Node::cell));

    let mut rows = Vec::with_capacity(groups.len() + 1);
    rows.push(Node::row(header));

    for group in groups {
        let mut cells = Vec::with_capacity(range_order.len() + 1);
        cells.push(Node::cell(group.name));
        cells.extend(range_order.iter().map(|range| {
            let text = group
                .charges
                .get(range)
                .map(|value| format!("{value:.2}"))
                .unwrap_or_default();
            Node::cell(text)
        }));
        rows.push(Node::row(cells));
    }

    Document::new(vec![Node::heading(period_label), Node::table(rows)])
}

/// Heading text for the report: capitalized localized month name and
/// four-digit year, e.g. `"March 2025"` or `"Marts 2025"`.
#[must_use]
pub fn period_label(locale: Locale, date: NaiveDate) -> String {
    let formatted = date
        .format_localized("%B %Y", locale.month_locale())
        .to_string();
    capitalize_first(formatted)
}

/// Uppercase the first character; several locales write month names in
/// lowercase.
fn capitalize_first(value: String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::model::{CombinedRecord, Locale, RecordId};
    use crate::ports::JoinError;
    use crate::richtext::Node;

    use super::{build_locale_document, charge_range_order, group_by_route, period_label};

    fn record(id: &str, range: &str, euros: f64, names: &[(Locale, &str)]) -> CombinedRecord {
        CombinedRecord {
            record_id: RecordId(id.to_owned()),
            charge_range: range.to_owned(),
            charge_in_euros: euros,
            route_names: names
                .iter()
                .map(|&(locale, name)| (locale, name.to_owned()))
                .collect(),
        }
    }

    fn route_a(id: &str, range: &str, euros: f64) -> CombinedRecord {
        record(id, range, euros, &[(Locale::En, "Route A")])
    }

    /// Text of every cell in a table-row node.
    fn cell_texts(row: &Node) -> Vec<String> {
        let Node::TableRow { content, .. } = row else {
            panic!("expected a table-row node");
        };
        content
            .iter()
            .map(|cell| {
                let Node::TableCell { content, .. } = cell else {
                    panic!("expected a table-cell node");
                };
                let Some(Node::Paragraph { content, .. }) = content.first() else {
                    panic!("expected a paragraph inside the cell");
                };
                let Some(Node::Text { value, .. }) = content.first() else {
                    panic!("expected a text run inside the paragraph");
                };
                value.clone()
            })
            .collect()
    }

    fn table_rows(document: &crate::richtext::Document) -> &[Node] {
        let Some(Node::Table { content, .. }) = document.content().get(1) else {
            panic!("expected the table as the second top-level node");
        };
        content
    }

    #[test]
    fn ranges_sort_by_numeric_lower_bound_and_dedupe() {
        let records = vec![
            route_a("1", "100-200", 150.0),
            route_a("2", "0-100", 50.0),
            route_a("3", "0-100", 60.0),
            route_a("4", "20-30", 25.0),
        ];

        let order = charge_range_order(&records).expect("orderable ranges");
        assert_eq!(order, ["0-100", "20-30", "100-200"]);
    }

    #[test]
    fn malformed_range_fails_fast() {
        let records = vec![route_a("1", "0-100", 50.0), route_a("2", "unknown", 10.0)];

        let error = charge_range_order(&records).expect_err("malformed range");
        let JoinError::MalformedChargeRange { record_id, range } = error;
        assert_eq!(record_id, RecordId("2".to_owned()));
        assert_eq!(range, "unknown");
    }

    #[test]
    fn grouping_overwrites_duplicate_route_range_pairs() {
        let records = vec![route_a("1", "0-100", 50.0), route_a("2", "0-100", 75.0)];

        let groups = group_by_route(&records, Locale::En);
        assert_eq!(groups.len(), 1);

        let group = groups.first().expect("one group");
        assert_eq!(group.name, "Route A");
        assert_eq!(group.charges.get("0-100"), Some(&75.0));
    }

    #[test]
    fn groups_keep_first_seen_route_order() {
        let records = vec![
            record("1", "0-100", 50.0, &[(Locale::En, "Route B")]),
            record("2", "0-100", 60.0, &[(Locale::En, "Route A")]),
            record("3", "100-200", 70.0, &[(Locale::En, "Route B")]),
        ];

        let groups = group_by_route(&records, Locale::En);
        let names: Vec<&str> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, ["Route B", "Route A"]);
    }

    #[test]
    fn untranslated_locale_falls_back_to_na() {
        let records = vec![record("1", "0-100", 50.0, &[(Locale::En, "Route A")])];

        let groups = group_by_route(&records, Locale::DaDk);
        assert_eq!(groups.first().map(|group| group.name.as_str()), Some("N/A"));
    }

    #[test]
    fn document_renders_header_values_and_empty_cells() {
        let records = vec![
            record("1", "0-100", 100.0, &[(Locale::En, "Route A")]),
            record("2", "100-200", 42.5, &[(Locale::En, "Route B")]),
        ];
        let order = charge_range_order(&records).expect("orderable ranges");

        let document = build_locale_document(&records, Locale::En, &order, "March 2025");

        let Some(Node::Heading4 { content, .. }) = document.content().first() else {
            panic!("expected a heading as the first top-level node");
        };
        assert!(
            matches!(content.first(), Some(Node::Text { value, .. }) if value == "March 2025"),
            "heading should carry the period label"
        );

        let rows = table_rows(&document);
        assert_eq!(rows.len(), 3, "header plus one row per route");

        assert_eq!(
            cell_texts(rows.first().expect("header row")),
            ["Route Name", "0-100", "100-200"]
        );
        assert_eq!(
            cell_texts(rows.get(1).expect("first data row")),
            ["Route A", "100.00", ""]
        );
        assert_eq!(
            cell_texts(rows.get(2).expect("second data row")),
            ["Route B", "", "42.50"]
        );
    }

    #[test]
    fn column_order_is_taken_from_the_shared_ordering() {
        let records = vec![
            record("1", "0-100", 50.0, &[(Locale::En, "Route A"), (Locale::DaDk, "Rute A")]),
            record("2", "100-200", 60.0, &[(Locale::En, "Route A"), (Locale::DaDk, "Rute A")]),
        ];
        let order = charge_range_order(&records).expect("orderable ranges");

        let english = build_locale_document(&records, Locale::En, &order, "March 2025");
        let danish = build_locale_document(&records, Locale::DaDk, &order, "Marts 2025");

        let english_header = cell_texts(table_rows(&english).first().expect("header"));
        let danish_header = cell_texts(table_rows(&danish).first().expect("header"));
        assert_eq!(english_header.get(1..), danish_header.get(1..));
    }

    #[test]
    fn zero_euro_value_still_renders() {
        let records = vec![route_a("1", "0-100", 0.0)];
        let order = charge_range_order(&records).expect("orderable ranges");

        let document = build_locale_document(&records, Locale::En, &order, "March 2025");
        let rows = table_rows(&document);
        assert_eq!(
            cell_texts(rows.get(1).expect("data row")),
            ["Route A", "0.00"]
        );
    }

    #[test]
    fn period_label_is_localized_and_capitalized() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date");

        assert_eq!(period_label(Locale::En, date), "March 2025");
        assert_eq!(period_label(Locale::DaDk, date), "Marts 2025");
    }

    #[test]
    fn empty_record_set_builds_header_only_table() {
        let records: Vec<CombinedRecord> = Vec::new();
        let order = charge_range_order(&records).expect("empty ordering");
        assert!(order.is_empty());

        let document = build_locale_document(&records, Locale::En, &order, "March 2025");
        let rows = table_rows(&document);
        assert_eq!(rows.len(), 1);
        assert_eq!(cell_texts(rows.first().expect("header")), ["Route Name"]);
    }
}
