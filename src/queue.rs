use crate::error::QueueError;
use jarlabel_types::QueueEntry;

/// Label requests waiting to be rendered, in insertion order.
///
/// Duplicates are allowed; the same strain can be queued once per label
/// that should be printed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelQueue {
    entries: Vec<QueueEntry>,
}

impl LabelQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: QueueEntry) {
        log::debug!("Queued {}", entry.summary());
        self.entries.push(entry);
    }

    /// Removes the entry at `index`. An out-of-range index leaves the
    /// queue unchanged.
    pub fn remove(&mut self, index: usize) -> Result<QueueEntry, QueueError> {
        if index >= self.entries.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One human readable line per entry.
    pub fn summary(&self) -> Vec<String> {
        self.entries.iter().map(QueueEntry::summary).collect()
    }
}

impl Extend<QueueEntry> for LabelQueue {
    fn extend<I: IntoIterator<Item = QueueEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

impl<'a> IntoIterator for &'a LabelQueue {
    type Item = &'a QueueEntry;
    type IntoIter = std::slice::Iter<'a, QueueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
