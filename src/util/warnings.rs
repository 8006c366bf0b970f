//! Deduplicating warning log.

/// Warnings shown to the user, each listed once with a repeat count.
#[derive(Debug, Default, Clone)]
pub struct WarningLog {
    entries: Vec<(String, usize)>,
}

impl WarningLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Repeats bump the count of the existing entry.
    pub fn add(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        match self.entries.iter_mut().find(|(m, _)| *m == message) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((message, 1)),
        }
    }

    /// Drop all warnings.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct warnings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display lines in insertion order.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(message, count)| {
                if *count <= 1 {
                    message.clone()
                } else {
                    format!("{} (occurred {} times)", message, count)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_are_counted_not_duplicated() {
        let mut log = WarningLog::new();
        log.add("no simulation file");
        log.add("bad row");
        log.add("no simulation file");

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.lines(),
            vec!["no simulation file (occurred 2 times)", "bad row"]
        );

        log.clear();
        assert!(log.is_empty());
    }
}
