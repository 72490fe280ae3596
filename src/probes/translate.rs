//! Field-to-metric translation shared by the probes.
//!
//! Most endpoints return a list of per-VDOM envelopes, each holding a set of
//! named entries. [`ScopedTable`] flattens that shape: for every scope, for
//! every entry, it emits one observation per [`Family`]. Entries are never
//! deduplicated, so the same name appearing in two scopes (or twice in one
//! response) yields one observation set per occurrence.

use crate::metrics::{MetricDesc, Observation};

/// One metric family of a table: its descriptor and how to read the value.
pub struct Family<E> {
    pub desc: &'static MetricDesc,
    pub value: fn(&E) -> f64,
}

impl<E> Family<E> {
    pub fn new(desc: &'static MetricDesc, value: fn(&E) -> f64) -> Self {
        Self { desc, value }
    }
}

/// Declarative translation of entries of type `E` grouped by scope
pub struct ScopedTable<'f, E> {
    /// Label values for an entry, ordered like every family's label names
    pub labels: fn(&str, &E) -> Vec<String>,
    pub families: &'f [Family<E>],
}

impl<'f, E> ScopedTable<'f, E> {
    pub fn new(labels: fn(&str, &E) -> Vec<String>, families: &'f [Family<E>]) -> Self {
        Self { labels, families }
    }

    /// Flattens `(scope, entries)` groups into observations.
    pub fn translate<'a, S, I>(&self, scopes: S) -> Vec<Observation>
    where
        S: IntoIterator<Item = (&'a str, I)>,
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        let mut observations = Vec::new();
        for (scope, entries) in scopes {
            for entry in entries {
                let labels = (self.labels)(scope, entry);
                for family in self.families {
                    observations.push(Observation::new(
                        family.desc,
                        (family.value)(entry),
                        labels.clone(),
                    ));
                }
            }
        }
        observations
    }
}

/// Converts a 0-100 percentage to a 0-1.0 ratio.
pub fn ratio(percent: f64) -> f64 {
    percent / 100.0
}

/// Label value for an appliance flag, always `"true"` or `"false"`.
pub fn bool_label(flag: bool) -> String {
    let label = if flag { "true" } else { "false" };
    label.to_string()
}
