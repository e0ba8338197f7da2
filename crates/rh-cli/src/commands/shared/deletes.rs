use std::collections::HashSet;

use serde::Serialize;

/// Where each requested id ended up after a batch of optimistic deletes.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeleteTally {
    pub deleted: Vec<String>,
    /// Not in the mirror to begin with and not on the server afterwards.
    pub already_absent: Vec<String>,
    /// Still present once deletes settled.
    pub failed: Vec<String>,
}

impl DeleteTally {
    /// Classify `requested` ids in order, ignoring repeats.
    ///
    /// `removed_locally` holds the ids the optimistic pass actually took out of
    /// the mirror; `still_present` reports the settled mirror.
    pub fn classify(
        requested: &[String],
        removed_locally: &HashSet<String>,
        still_present: impl Fn(&str) -> bool,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut tally = Self::default();
        for id in requested {
            if !seen.insert(id.as_str()) {
                continue;
            }
            let bucket = if still_present(id) {
                &mut tally.failed
            } else if removed_locally.contains(id) {
                &mut tally.deleted
            } else {
                &mut tally.already_absent
            };
            bucket.push(id.clone());
        }
        tally
    }
}
