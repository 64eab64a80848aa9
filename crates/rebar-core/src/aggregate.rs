use std::collections::HashMap;

use crate::model::{ElementCode, RodSpec};
use crate::scan::RodEvent;

/// Identifies one row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub element: ElementCode,
    pub rod: RodSpec,
}

/// Running quantities of one (element, rod spec) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationRecord {
    /// Sum of rods placed directly in one instance of the element.
    pub direct_rods: u64,
    /// Sum of rods in one instance of an embedded item.
    pub rods_per_embedded: u64,
    /// Embedded-item instance count of the most recent embedded event.
    ///
    /// Not summed and not scoped per embedded item: a later count replaces an
    /// earlier one for the whole record.
    pub embedded_count: u64,
}

/// An embedded event replaced a different, earlier non-zero embedded-item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedOverwrite {
    pub key: AggregationKey,
    pub previous: u64,
    pub current: u64,
}

/// Rod quantities per (element, rod spec), iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct AggregationTable {
    entries: Vec<(AggregationKey, AggregationRecord)>,
    index: HashMap<AggregationKey, usize>,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rod event to its record, creating the record on first sight.
    ///
    /// Returns the overwrite when an embedded event replaces a different
    /// non-zero count on a record that already holds embedded rods.
    pub fn record(&mut self, event: RodEvent) -> Option<EmbeddedOverwrite> {
        let key = AggregationKey {
            element: event.element,
            rod: RodSpec::new(event.name, event.size),
        };

        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.entries.push((key.clone(), AggregationRecord::default()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let (key, record) = &mut self.entries[slot];

        match event.embedded {
            None => {
                record.direct_rods = record.direct_rods.saturating_add(event.quantity);
                None
            }
            Some(count) => {
                let previous = record.embedded_count;
                let overwritten =
                    record.rods_per_embedded > 0 && previous != 0 && previous != count;
                record.rods_per_embedded = record.rods_per_embedded.saturating_add(event.quantity);
                record.embedded_count = count;
                overwritten.then(|| EmbeddedOverwrite {
                    key: key.clone(),
                    previous,
                    current: count,
                })
            }
        }
    }

    /// Records in the order their keys were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&AggregationKey, &AggregationRecord)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
