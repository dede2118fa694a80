//! List filtering
//!
//! Every list screen applies the same two predicates over its fetched
//! collection: a free-text search against the record's name/reference
//! haystack and a status selector. Insertion order is preserved; there is
//! no pagination or indexing at the expected list sizes.

/// Implemented by every listable entity.
pub trait Searchable {
    /// Fields matched by the free-text search (name, references).
    fn haystack(&self) -> Vec<&str>;

    /// Status label compared against the selected filter.
    fn status_label(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn matches(&self, status_label: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status_label,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(s) => s,
        }
    }
}

/// Indices of the records that pass both predicates, in insertion order.
/// Returning indices keeps the caller's selection cursor stable against
/// the unfiltered collection it owns.
pub fn filter_records<T: Searchable>(records: &[T], search: &str, status: &StatusFilter) -> Vec<usize> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let matches_search = needle.is_empty()
                || record
                    .haystack()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            matches_search && status.matches(record.status_label())
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        reference: String,
        status: &'static str,
    }

    impl Searchable for Row {
        fn haystack(&self) -> Vec<&str> {
            vec![&self.name, &self.reference]
        }

        fn status_label(&self) -> &str {
            self.status
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Acme".into(),
                reference: "PRJ-1".into(),
                status: "Pending",
            },
            Row {
                name: "Beta".into(),
                reference: "PRJ-2".into(),
                status: "Completed",
            },
        ]
    }

    #[test]
    fn search_is_case_insensitive() {
        let rows = rows();
        let hits = filter_records(&rows, "acme", &StatusFilter::All);
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn status_filter_alone_selects_by_equality() {
        let rows = rows();
        let hits = filter_records(&rows, "", &StatusFilter::Only("Completed".into()));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn search_matches_references_too() {
        let rows = rows();
        let hits = filter_records(&rows, "prj-2", &StatusFilter::All);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let rows = rows();
        let hits = filter_records(&rows, "acme", &StatusFilter::Only("Completed".into()));
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_search_and_all_filter_keep_insertion_order() {
        let rows = rows();
        let hits = filter_records(&rows, "", &StatusFilter::All);
        assert_eq!(hits, vec![0, 1]);
    }
}
