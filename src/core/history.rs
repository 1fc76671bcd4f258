//! Caller-owned record of the latest verdict per document

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::verdict::Verdict;

/// Latest verdict per path
///
/// Safe to share across validation threads. Entries are never evicted;
/// drop the history to discard them.
#[derive(Debug, Default)]
pub struct VerdictHistory {
    entries: Mutex<HashMap<PathBuf, Verdict>>,
}

impl VerdictHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `verdict` for `path`, replacing any earlier one
    pub fn record(&self, path: &Path, verdict: Verdict) {
        self.lock().insert(path.to_path_buf(), verdict);
    }

    pub fn get(&self, path: &Path) -> Option<Verdict> {
        self.lock().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All entries, sorted by path
    pub fn snapshot(&self) -> Vec<(PathBuf, Verdict)> {
        let mut entries: Vec<_> = self
            .lock()
            .iter()
            .map(|(path, verdict)| (path.clone(), verdict.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    // Every critical section is a single map operation, so a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Verdict>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checks::CheckResults;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_record_replaces_previous_verdict() {
        let history = VerdictHistory::new();
        let path = Path::new("/reports/a.pdf");

        history.record(path, Verdict::Failed { error: "first".into() });
        history.record(path, Verdict::Checked(CheckResults::default()));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(path), Some(Verdict::Checked(CheckResults::default())));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let history = VerdictHistory::new();
        history.record(Path::new("b.pdf"), Verdict::Failed { error: "b".into() });
        history.record(Path::new("a.pdf"), Verdict::Failed { error: "a".into() });

        let paths: Vec<_> = history.snapshot().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
    }

    #[test]
    fn test_concurrent_records() {
        let history = Arc::new(VerdictHistory::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let history = Arc::clone(&history);
                thread::spawn(move || {
                    let path = PathBuf::from(format!("{}.pdf", i));
                    history.record(&path, Verdict::Checked(CheckResults::default()));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(history.len(), 8);
        assert!(!history.is_empty());
    }
}
