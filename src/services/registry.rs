use crate::models::UploadedFile;
use std::sync::Mutex;

/// In-process log of successful uploads, in upload order.
///
/// Append-only and volatile: it is not reconciled with the bucket contents and
/// is lost on restart. Re-uploading a name appends a second record rather than
/// replacing the first, so duplicates are expected. The object store itself is
/// the source of truth for bytes.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Mutex<Vec<UploadedFile>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a completed upload.
    pub fn record(&self, file: UploadedFile) {
        // A push cannot leave the list half-mutated, so a poisoned lock is
        // still safe to reuse.
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(file);
    }

    /// Current contents, insertion order preserved.
    pub fn snapshot(&self) -> Vec<UploadedFile> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            url: format!("https://bucket.s3.us-east-1.amazonaws.com/{name}"),
        }
    }

    #[test]
    fn starts_empty() {
        assert!(FileRegistry::new().snapshot().is_empty());
    }

    #[test]
    fn preserves_insertion_order() {
        let registry = FileRegistry::new();
        registry.record(record("a.txt"));
        registry.record(record("b.txt"));

        let names: Vec<_> = registry.snapshot().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn duplicate_names_append() {
        let registry = FileRegistry::new();
        registry.record(record("a.txt"));
        registry.record(record("a.txt"));
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let registry = FileRegistry::new();
        registry.record(record("a.txt"));
        let snap = registry.snapshot();
        registry.record(record("b.txt"));
        assert_eq!(snap.len(), 1);
    }
}
