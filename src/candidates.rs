//! Fixed candidate lists and the literal filter applied to them.
//!
//! Filtering is a case-insensitive substring test. The query is never
//! interpreted as a pattern, so characters like `(`, `*` or `\` simply have to
//! appear in the label to match.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// An ordered, immutable list of selectable labels.
///
/// Clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    items: Arc<[String]>,
}

impl CandidateList {
    /// Creates a list from any sequence of labels, keeping their order.
    ///
    /// ```rust
    /// use alumni_portal::candidates::CandidateList;
    ///
    /// let states = CandidateList::new(["Delhi", "Goa", "Gujarat", "Kerala"]);
    /// let matched: Vec<&str> = states.filter("go").collect();
    /// assert_eq!(matched, vec!["Goa"]);
    /// ```
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::<String>::into).collect(),
        }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Reports whether the list has no labels.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The labels, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Iterates over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Reports whether `label` is one of the candidates (exact match).
    pub fn contains(&self, label: &str) -> bool {
        self.items.iter().any(|item| item == label)
    }

    /// Lazily yields the labels matching `query`, in list order. An empty
    /// query yields every label.
    pub fn filter<'a>(&'a self, query: &str) -> FilteredView<'a> {
        FilteredView {
            items: self.items.iter(),
            needle: query.to_lowercase(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Iterator over the candidates matching a query. Recomputed on demand and
/// never stored by the widget.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    items: std::slice::Iter<'a, String>,
    needle: String,
}

impl<'a> Iterator for FilteredView<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = self.needle.as_str();
        self.items
            .by_ref()
            .find(|item| matches_folded(item, needle))
            .map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

// `needle` is already lowercased
fn matches_folded(label: &str, needle: &str) -> bool {
    needle.is_empty() || label.to_lowercase().contains(needle)
}

/// The States and Union Territories of India, alphabetically.
pub static STATES_AND_UTS: Lazy<CandidateList> = Lazy::new(|| {
    CandidateList::new([
        "Andaman and Nicobar Islands",
        "Andhra Pradesh",
        "Arunachal Pradesh",
        "Assam",
        "Bihar",
        "Chandigarh",
        "Chhattisgarh",
        "Dadra and Nagar Haveli and Daman and Diu",
        "Delhi",
        "Goa",
        "Gujarat",
        "Haryana",
        "Himachal Pradesh",
        "Jammu and Kashmir",
        "Jharkhand",
        "Karnataka",
        "Kerala",
        "Ladakh",
        "Lakshadweep",
        "Madhya Pradesh",
        "Maharashtra",
        "Manipur",
        "Meghalaya",
        "Mizoram",
        "Nagaland",
        "Odisha",
        "Puducherry",
        "Punjab",
        "Rajasthan",
        "Sikkim",
        "Tamil Nadu",
        "Telangana",
        "Tripura",
        "Uttar Pradesh",
        "Uttarakhand",
        "West Bengal",
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CandidateList {
        CandidateList::new(["Delhi", "Goa", "Gujarat", "Kerala"])
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let list = sample();
        let all: Vec<&str> = list.filter("").collect();
        assert_eq!(all, vec!["Delhi", "Goa", "Gujarat", "Kerala"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let list = sample();
        assert_eq!(list.filter("GO").collect::<Vec<_>>(), vec!["Goa"]);
        assert_eq!(list.filter("g").collect::<Vec<_>>(), vec!["Goa", "Gujarat"]);
        assert_eq!(list.filter("A").count(), 3);
    }

    #[test]
    fn test_filtered_view_is_subsequence() {
        let list = STATES_AND_UTS.clone();
        for query in ["", "a", "PRADESH", "an", "zz", "nagar h"] {
            let view: Vec<&str> = list.filter(query).collect();
            let mut rest = list.iter();
            let folded = query.to_lowercase();
            for label in &view {
                assert!(label.to_lowercase().contains(&folded));
                assert!(rest.any(|candidate| candidate == *label), "{label} out of order");
            }
            let expected = list
                .iter()
                .filter(|label| label.to_lowercase().contains(&folded))
                .count();
            assert_eq!(view.len(), expected);
        }
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let list = CandidateList::new(["a+b", "ab", "(x)", "x", "c.d", "cxd", "back\\slash"]);
        assert_eq!(list.filter("a+b").collect::<Vec<_>>(), vec!["a+b"]);
        assert_eq!(list.filter("(").collect::<Vec<_>>(), vec!["(x)"]);
        assert_eq!(list.filter(".").collect::<Vec<_>>(), vec!["c.d"]);
        assert_eq!(list.filter("\\").collect::<Vec<_>>(), vec!["back\\slash"]);
        assert_eq!(list.filter("[").count(), 0);
        assert_eq!(list.filter("*").count(), 0);
    }

    #[test]
    fn test_matches_folded() {
        assert!(matches_folded("Tamil Nadu", ""));
        assert!(matches_folded("Tamil Nadu", "nadu"));
        assert!(matches_folded("Tamil Nadu", "il n"));
        assert!(!matches_folded("Tamil Nadu", "NADU"), "needle must arrive folded");
        assert!(!matches_folded("Goa", "goa "));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(sample().filter("xyz").count(), 0);
    }

    #[test]
    fn test_states_list() {
        assert_eq!(STATES_AND_UTS.len(), 36);
        assert!(STATES_AND_UTS.contains("Goa"));
        assert!(!STATES_AND_UTS.contains("goa"));
        let sorted = {
            let mut labels: Vec<&str> = STATES_AND_UTS.iter().collect();
            labels.sort_unstable();
            labels
        };
        assert_eq!(sorted, STATES_AND_UTS.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_clones_share_storage() {
        let list = sample();
        let other = list.clone();
        assert!(std::ptr::eq(list.as_slice(), other.as_slice()));
    }
}
