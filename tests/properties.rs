//! Property tests for query resolution and neighbor derivation

use std::collections::BTreeSet;

use exhibitor_directory_mcp::directory::ExhibitorRecord;
use exhibitor_directory_mcp::search::{
    DirectoryIndex, MatchKind, QueryResolver, QueryResult, SearchConfig, neighbors_of, similarity,
};
use proptest::prelude::*;

/// Booth codes over a few row letters, some zero-padded, with names and halls 1..=5
fn directory() -> impl Strategy<Value = Vec<ExhibitorRecord>> {
    let letter = prop::sample::select(vec!['A', 'B', 'C']);
    prop::collection::btree_set((letter, 0u32..60, 0usize..=2), 1..40)
        .prop_flat_map(|codes: BTreeSet<(char, u32, usize)>| {
            let len = codes.len();
            (
                Just(codes),
                prop::collection::vec(("[a-z]{3,12}", 1u32..=5), len),
            )
        })
        .prop_map(|(codes, details)| {
            codes
                .into_iter()
                .zip(details)
                .map(|((letter, number, zeros), (name, hall))| {
                    let code = format!("{letter}{}{number}", "0".repeat(zeros));
                    ExhibitorRecord::new(code, "", name, hall)
                })
                .collect()
        })
}

fn codes(result: &QueryResult<'_>) -> Vec<String> {
    result.records().iter().map(|r| r.code.clone()).collect()
}

proptest! {
    #[test]
    fn exact_code_resolves_to_its_record(
        records in directory(),
        pick in any::<prop::sample::Index>(),
        spaced in any::<bool>(),
    ) {
        let index = DirectoryIndex::build(records.clone()).unwrap();
        let config = SearchConfig::default();
        let target = &records[pick.index(records.len())];

        let query = if spaced {
            let (letters, digits) = target.code.split_at(1);
            format!("  {} {} ", letters.to_lowercase(), digits)
        } else {
            target.code.to_lowercase()
        };

        let result = QueryResolver::new(&index, &config).resolve(&query);
        prop_assert_eq!(result.kind(), Some(MatchKind::ExactCode));
        prop_assert_eq!(codes(&result), vec![target.code.clone()]);
    }

    #[test]
    fn neighbors_are_symmetric(records in directory()) {
        let index = DirectoryIndex::build(records.clone()).unwrap();

        for record in &records {
            for neighbor in neighbors_of(&index, &record.code) {
                let back: Vec<&str> = neighbors_of(&index, &neighbor.code)
                    .iter()
                    .map(|r| r.code.as_str())
                    .collect();
                prop_assert!(
                    back.contains(&record.code.as_str()),
                    "{} -> {} but not back", record.code, neighbor.code
                );
            }
        }
    }

    #[test]
    fn resolution_is_deterministic(records in directory(), query in "[a-z ]{0,12}") {
        let config = SearchConfig::default();
        let first = DirectoryIndex::build(records.clone()).unwrap();
        let second = DirectoryIndex::build(records).unwrap();

        let a = QueryResolver::new(&first, &config).resolve(&query);
        let b = QueryResolver::new(&first, &config).resolve(&query);
        let c = QueryResolver::new(&second, &config).resolve(&query);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(codes(&a), codes(&c));
        prop_assert_eq!(a.kind(), c.kind());
    }

    #[test]
    fn unknown_hall_gives_empty_hall_filter(records in directory(), hall in 6u32..1000) {
        let index = DirectoryIndex::build(records).unwrap();
        let config = SearchConfig::default();

        let result = QueryResolver::new(&index, &config).resolve(&format!("hall {hall}"));
        let expected = QueryResult::Records {
            kind: MatchKind::HallFilter,
            hall: Some(hall),
            records: vec![],
        };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let ab = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(ab, similarity(&b, &a));
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }
}
