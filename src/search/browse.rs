//! Listing operations over the index, used by the browsing tools

use std::collections::{BTreeMap, HashMap};

use crate::directory::ExhibitorRecord;
use crate::search::DirectoryIndex;

/// An event or offer together with the exhibitor running it
#[derive(Debug, Clone, PartialEq)]
pub struct EventListing<'a> {
    pub event: &'a str,
    pub record: &'a ExhibitorRecord,
}

impl DirectoryIndex {
    /// Every record in a hall, in load order
    pub fn hall(&self, hall: u32) -> impl Iterator<Item = &ExhibitorRecord> {
        self.records().iter().filter(move |record| record.hall == hall)
    }

    /// Records in a hall whose section label matches, ignoring case
    pub fn section<'a>(
        &'a self,
        hall: u32,
        section: &'a str,
    ) -> impl Iterator<Item = &'a ExhibitorRecord> {
        let section = section.trim();
        self.hall(hall).filter(move |record| {
            record
                .section
                .as_deref()
                .is_some_and(|label| label.trim().eq_ignore_ascii_case(section))
        })
    }

    /// Record count per hall, ascending by hall number
    pub fn hall_counts(&self) -> Vec<(u32, usize)> {
        let mut counts = BTreeMap::new();
        for record in self.records() {
            *counts.entry(record.hall).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Section labels used in a hall, sorted and unique ignoring case
    ///
    /// Each label is spelled as it first appears in load order, matching what
    /// [`DirectoryIndex::section`] accepts.
    pub fn sections(&self, hall: u32) -> Vec<&str> {
        let mut sections: Vec<&str> = self
            .hall(hall)
            .filter_map(|record| record.section.as_deref())
            .map(str::trim)
            .collect();
        sections.sort_by_key(|label| label.to_ascii_lowercase());
        sections.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        sections
    }

    /// Exhibitor count per category, most common first, then by name
    ///
    /// A record listing several categories counts once for each. Records
    /// without a category list count under their single category.
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in self.records() {
            if record.categories.is_empty() {
                *counts.entry(record.category.as_str()).or_insert(0) += 1;
            } else {
                for category in &record.categories {
                    *counts.entry(category.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }

    /// Every event across the directory, in record order
    pub fn events(&self) -> Vec<EventListing<'_>> {
        self.records()
            .iter()
            .flat_map(|record| {
                record
                    .events
                    .iter()
                    .map(move |event| EventListing { event, record })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> DirectoryIndex {
        let mut multi = ExhibitorRecord::new("A3", "Three", "", 1).with_section("B");
        multi.categories = vec!["Children".to_string(), "Science".to_string()];
        multi.category = "Children".to_string();

        DirectoryIndex::build(vec![
            ExhibitorRecord::new("A1", "One", "", 1)
                .with_section("A")
                .with_category("Children")
                .with_events(["Signing at 5pm", "10% off"]),
            ExhibitorRecord::new("A2", "Two", "", 1).with_section("a"),
            multi,
            ExhibitorRecord::new("C1", "Four", "", 3).with_events(["Launch"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_hall_and_section() {
        let index = index();
        let hall: Vec<&str> = index.hall(1).map(|r| r.code.as_str()).collect();
        assert_eq!(hall, vec!["A1", "A2", "A3"]);

        let section: Vec<&str> = index.section(1, "A").map(|r| r.code.as_str()).collect();
        assert_eq!(section, vec!["A1", "A2"]);
        assert_eq!(index.section(3, "A").count(), 0);
        // "A" and "a" name the same section
        assert_eq!(index.sections(1), vec!["A", "B"]);
    }

    #[test]
    fn test_hall_counts() {
        assert_eq!(index().hall_counts(), vec![(1, 3), (3, 1)]);
    }

    #[test]
    fn test_category_counts() {
        let index = index();
        assert_eq!(
            index.category_counts(),
            vec![("Children", 2), ("Other", 2), ("Science", 1)]
        );
    }

    #[test]
    fn test_events_in_record_order() {
        let index = index();
        let events: Vec<(&str, &str)> = index
            .events()
            .iter()
            .map(|listing| (listing.event, listing.record.code.as_str()))
            .collect();
        assert_eq!(
            events,
            vec![("Signing at 5pm", "A1"), ("10% off", "A1"), ("Launch", "C1")]
        );
    }
}
