use parking_lot::RwLock;
use std::sync::Arc;

use crate::search::DirectoryIndex;

/// Holder of the directory currently being served
///
/// Readers take an `Arc` snapshot and query it without holding any lock.
/// A reload builds a complete new index first and then swaps the reference,
/// so in-flight queries keep the snapshot they started with.
#[derive(Debug)]
pub struct SharedDirectory {
    current: RwLock<Arc<DirectoryIndex>>,
}

impl SharedDirectory {
    pub fn new(index: DirectoryIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    pub fn snapshot(&self) -> Arc<DirectoryIndex> {
        self.current.read().clone()
    }

    /// Install a freshly built index, returning the one it replaced
    pub fn replace(&self, index: DirectoryIndex) -> Arc<DirectoryIndex> {
        let next = Arc::new(index);
        std::mem::replace(&mut *self.current.write(), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::ExhibitorRecord;

    fn index_with(codes: &[&str]) -> DirectoryIndex {
        DirectoryIndex::build(
            codes
                .iter()
                .map(|code| ExhibitorRecord::new(*code, format!("name {code}"), "", 1))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedDirectory::new(index_with(&["A1"]));
        let before = shared.snapshot();

        let previous = shared.replace(index_with(&["A1", "A2"]));

        assert_eq!(before.len(), 1);
        assert_eq!(previous.len(), 1);
        assert_eq!(shared.snapshot().len(), 2);
    }
}
