//! Adjacent exhibitors
//!
//! [`neighbors_of`] is a purely structural rule: booth `B29` is considered
//! next to `B28` and `B30`. Sequential numbers are not guaranteed to be
//! physically adjacent on the floor, so the result is an approximation.
//! [`nearby_of`] uses floor-plan positions instead, when the data has them.

use crate::directory::{BoothCode, ExhibitorRecord};
use crate::search::DirectoryIndex;

/// Records at booth numbers `n-1` and `n+1` with the same letter prefix
///
/// Returned in that order, each group in load order. Booths are matched by
/// number, so `B09` and `B9` are both neighbors of `B10`. Codes that do not
/// look like `<letters><digits>` have no neighbors.
pub fn neighbors_of<'a>(index: &'a DirectoryIndex, code: &str) -> Vec<&'a ExhibitorRecord> {
    let Some(booth) = BoothCode::parse(code) else {
        tracing::debug!("'{}' is not a <letters><digits> booth code", code);
        return Vec::new();
    };

    [booth.number().checked_sub(1), booth.number().checked_add(1)]
        .into_iter()
        .flatten()
        .flat_map(|number| index.by_booth(booth.letters(), number))
        .collect()
}

/// Closest records by floor-plan distance within the same hall and section
///
/// Only records carrying a position take part. Equal distances keep load
/// order.
pub fn nearby_of<'a>(
    index: &'a DirectoryIndex,
    code: &str,
    max: usize,
) -> Vec<&'a ExhibitorRecord> {
    let Some(origin) = index.by_code(code) else {
        return Vec::new();
    };
    let Some(origin_position) = origin.position else {
        return Vec::new();
    };

    let mut candidates: Vec<(f64, &ExhibitorRecord)> = index
        .records()
        .iter()
        .filter(|record| {
            record.code != origin.code
                && record.hall == origin.hall
                && same_section(record.section.as_deref(), origin.section.as_deref())
        })
        .filter_map(|record| {
            record
                .position
                .map(|position| (origin_position.distance_to(&position), record))
        })
        .collect();

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates.into_iter().take(max).map(|(_, record)| record).collect()
}

fn same_section(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        (None, None) => true,
        _ => false,
    }
}
