use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::directory::{ExhibitorRecord, ValidationError};

/// Index key form of a code or name: whitespace removed, case folded
///
/// The same function is applied at build time and query time; lookups only
/// work because both sides agree on it.
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Which bilingual name a key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLanguage {
    Primary,
    Secondary,
}

/// Normalized name key to record mapping with deterministic iteration order
///
/// Keys iterate in order of first insertion. When two records normalize to
/// the same key the later record wins but the key keeps its slot.
#[derive(Debug, Default)]
struct NameIndex {
    entries: Vec<(String, usize)>,
    slots: HashMap<String, usize>,
}

impl NameIndex {
    /// Insert a key, returning the record it displaced, if any
    fn insert(&mut self, key: String, record: usize) -> Option<usize> {
        match self.slots.entry(key) {
            Entry::Occupied(slot) => {
                let entry = &mut self.entries[*slot.get()];
                Some(std::mem::replace(&mut entry.1, record))
            }
            Entry::Vacant(slot) => {
                self.entries.push((slot.key().clone(), record));
                slot.insert(self.entries.len() - 1);
                None
            }
        }
    }

    fn get(&self, key: &str) -> Option<usize> {
        self.slots.get(key).map(|slot| self.entries[*slot].1)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One key of a name index together with the record it resolves to
#[derive(Debug, Clone, Copy)]
pub struct NameKey<'a> {
    pub key: &'a str,
    pub language: NameLanguage,
    pub record: &'a ExhibitorRecord,
}

/// Read-only lookup structures over the exhibitor records
///
/// Built once by [`DirectoryIndex::build`] and never mutated afterwards.
#[derive(Debug)]
pub struct DirectoryIndex {
    records: Vec<ExhibitorRecord>,
    by_code: HashMap<String, usize>,
    by_booth: HashMap<(String, u32), Vec<usize>>,
    by_name_primary: NameIndex,
    by_name_secondary: NameIndex,
    built_at: DateTime<Utc>,
}

impl DirectoryIndex {
    /// Validate the records and build all three indices
    ///
    /// Fails on the first record with an empty or duplicate code, a zero
    /// hall, or no name at all. No index is produced in that case.
    pub fn build(
        records: impl IntoIterator<Item = ExhibitorRecord>,
    ) -> Result<Self, ValidationError> {
        let records: Vec<ExhibitorRecord> = records.into_iter().collect();
        let mut by_code = HashMap::with_capacity(records.len());
        let mut by_booth: HashMap<(String, u32), Vec<usize>> = HashMap::new();
        let mut by_name_primary = NameIndex::default();
        let mut by_name_secondary = NameIndex::default();

        for (position, record) in records.iter().enumerate() {
            let code_key = normalize_key(&record.code);
            if code_key.is_empty() {
                return Err(ValidationError::EmptyCode { position });
            }
            if record.hall == 0 {
                return Err(ValidationError::InvalidHall {
                    code: record.code.clone(),
                });
            }
            if !record.has_name() {
                return Err(ValidationError::MissingName {
                    code: record.code.clone(),
                });
            }

            match by_code.entry(code_key) {
                Entry::Occupied(_) => {
                    return Err(ValidationError::DuplicateCode {
                        code: record.code.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }

            if let Some(booth) = record.booth_code() {
                by_booth.entry(booth.identity()).or_default().push(position);
            }

            for (name, index) in [
                (&record.name_primary, &mut by_name_primary),
                (&record.name_secondary, &mut by_name_secondary),
            ] {
                let key = normalize_key(name);
                if key.is_empty() {
                    continue;
                }
                if let Some(previous) = index.insert(key, position) {
                    tracing::debug!(
                        "Name key of {} replaces {} ({})",
                        record.code,
                        records[previous].code,
                        name
                    );
                }
            }
        }

        tracing::info!(
            "Indexed {} exhibitors ({} primary names, {} secondary names)",
            records.len(),
            by_name_primary.len(),
            by_name_secondary.len()
        );

        Ok(Self {
            records,
            by_code,
            by_booth,
            by_name_primary,
            by_name_secondary,
            built_at: Utc::now(),
        })
    }

    /// Records in load order
    pub fn records(&self) -> &[ExhibitorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Exact booth code lookup, case and whitespace insensitive
    pub fn by_code(&self, code: &str) -> Option<&ExhibitorRecord> {
        self.by_code
            .get(&normalize_key(code))
            .map(|position| &self.records[*position])
    }

    /// Every record whose code has these letters and this number, ignoring
    /// case and zero padding, in load order
    pub fn by_booth(&self, letters: &str, number: u32) -> Vec<&ExhibitorRecord> {
        self.by_booth
            .get(&(letters.to_lowercase(), number))
            .map(|positions| positions.iter().map(|p| &self.records[*p]).collect())
            .unwrap_or_default()
    }

    /// Exact normalized-name lookup in one language
    pub fn by_name(&self, language: NameLanguage, name: &str) -> Option<&ExhibitorRecord> {
        let index = match language {
            NameLanguage::Primary => &self.by_name_primary,
            NameLanguage::Secondary => &self.by_name_secondary,
        };
        index
            .get(&normalize_key(name))
            .map(|position| &self.records[position])
    }

    /// All name keys, primary index first, each in first-insertion order
    pub fn name_keys(&self) -> impl Iterator<Item = NameKey<'_>> {
        let primary = self
            .by_name_primary
            .entries
            .iter()
            .map(move |(key, position)| NameKey {
                key,
                language: NameLanguage::Primary,
                record: &self.records[*position],
            });
        let secondary = self
            .by_name_secondary
            .entries
            .iter()
            .map(move |(key, position)| NameKey {
                key,
                language: NameLanguage::Secondary,
                record: &self.records[*position],
            });
        primary.chain(secondary)
    }

    pub fn name_key_counts(&self) -> (usize, usize) {
        (self.by_name_primary.len(), self.by_name_secondary.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ExhibitorRecord> {
        vec![
            ExhibitorRecord::new("B29", "دار الشروق", "Dar Al-Shorouk", 1),
            ExhibitorRecord::new("B28", "X", "", 1),
            ExhibitorRecord::new("B30", "", "Y", 2),
        ]
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Dar Al-Shorouk "), "daral-shorouk");
        assert_eq!(normalize_key("دار الشروق"), "دارالشروق");
        assert_eq!(normalize_key("B 29"), "b29");
        assert_eq!(normalize_key(" \t"), "");
    }

    #[test]
    fn test_build_indexes_codes_and_names() {
        let index = DirectoryIndex::build(sample()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.by_code("b29").unwrap().code, "B29");
        assert_eq!(index.by_code(" B 28 ").unwrap().code, "B28");
        assert!(index.by_code("B31").is_none());

        assert_eq!(
            index.by_name(NameLanguage::Secondary, "dar al-shorouk").unwrap().code,
            "B29"
        );
        assert_eq!(index.name_key_counts(), (2, 2));
    }

    #[test]
    fn test_empty_names_are_not_indexed() {
        let index = DirectoryIndex::build(sample()).unwrap();
        let keys: Vec<&str> = index.name_keys().map(|k| k.key).collect();
        assert_eq!(keys, vec!["دارالشروق", "x", "daral-shorouk", "y"]);
    }

    #[test]
    fn test_duplicate_code_fails_build() {
        let mut records = sample();
        records.push(ExhibitorRecord::new("B29", "Other", "", 3));
        let err = DirectoryIndex::build(records).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateCode {
                code: "B29".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_code_is_case_insensitive() {
        let records = vec![
            ExhibitorRecord::new("a7", "One", "", 1),
            ExhibitorRecord::new("A7", "Two", "", 1),
        ];
        assert!(matches!(
            DirectoryIndex::build(records),
            Err(ValidationError::DuplicateCode { .. })
        ));
    }

    #[test]
    fn test_invalid_records_fail_build() {
        let empty_code = vec![ExhibitorRecord::new("  ", "Name", "", 1)];
        assert_eq!(
            DirectoryIndex::build(empty_code).unwrap_err(),
            ValidationError::EmptyCode { position: 0 }
        );

        let no_hall = vec![ExhibitorRecord::new("A1", "Name", "", 0)];
        assert!(matches!(
            DirectoryIndex::build(no_hall),
            Err(ValidationError::InvalidHall { .. })
        ));

        let nameless = vec![ExhibitorRecord::new("A1", " ", "", 1)];
        assert!(matches!(
            DirectoryIndex::build(nameless),
            Err(ValidationError::MissingName { .. })
        ));
    }

    #[test]
    fn test_name_collision_last_write_wins() {
        let records = vec![
            ExhibitorRecord::new("A1", "Blue Owl", "", 1),
            ExhibitorRecord::new("A2", "Red Fox", "", 1),
            ExhibitorRecord::new("A3", "blue  owl", "", 2),
        ];
        let index = DirectoryIndex::build(records).unwrap();

        assert_eq!(index.by_name(NameLanguage::Primary, "Blue Owl").unwrap().code, "A3");
        let keys: Vec<(&str, &str)> = index
            .name_keys()
            .map(|k| (k.key, k.record.code.as_str()))
            .collect();
        assert_eq!(keys, vec![("blueowl", "A3"), ("redfox", "A2")]);
    }

    #[test]
    fn test_empty_directory_builds() {
        let index = DirectoryIndex::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.name_keys().count(), 0);
    }
}
