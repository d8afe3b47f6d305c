// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-mostly cache of the printers last seen on the spooler.
//
// The map sits behind an `Arc` snapshot. Readers clone the `Arc` under a
// short read lock and work on their snapshot. A refresh holds the write lock
// from reading the old map until the new one is in place, so overlapping
// refreshes cannot each hand a printer its own semaphore.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use spoolwerk_core::types::Printer;

type Snapshot = Arc<HashMap<String, Printer>>;

#[derive(Default)]
pub struct PrinterRegistry {
    printers: RwLock<Snapshot>,
}

impl PrinterRegistry {
    pub fn new(printers: Vec<Printer>) -> Self {
        let registry = Self::default();
        registry.refresh(printers);
        registry
    }

    fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.printers.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the cached printers wholesale.
    ///
    /// A printer that survives the refresh keeps its admission semaphore, so
    /// jobs already in flight stay counted against the new entry.
    pub fn refresh(&self, printers: Vec<Printer>) {
        let mut current = self.printers.write().unwrap_or_else(PoisonError::into_inner);
        let previous = Arc::clone(&current);
        let next: HashMap<String, Printer> = printers
            .into_iter()
            .map(|mut p| {
                if let Some(old) = previous.get(&p.name) {
                    p.native_job_semaphore = old.native_job_semaphore.clone();
                }
                (p.name.clone(), p)
            })
            .collect();
        debug!(count = next.len(), "printer registry refreshed");
        *current = Arc::new(next);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Printer> {
        self.snapshot().get(name).cloned()
    }

    /// All printers, sorted by name.
    pub fn get_all(&self) -> Vec<Printer> {
        let mut all: Vec<Printer> = self.snapshot().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolwerk_core::semaphore::NativeJobSemaphore;
    use spoolwerk_core::types::{Description, PrinterState};
    use std::collections::BTreeMap;
    use std::sync::Barrier;
    use std::thread;

    fn printer(name: &str) -> Printer {
        Printer {
            name: name.to_string(),
            default_display_name: name.to_string(),
            manufacturer: "Acme".to_string(),
            model: "Laser".to_string(),
            state: PrinterState::default(),
            description: Description::base(),
            tags: BTreeMap::new(),
            native_job_semaphore: NativeJobSemaphore::default(),
        }
    }

    #[test]
    fn lookup_and_list() {
        let reg = PrinterRegistry::new(vec![printer("b"), printer("a")]);
        assert_eq!(reg.len(), 2);
        assert!(reg.get_by_name("a").is_some());
        assert!(reg.get_by_name("zz").is_none());
        let names: Vec<_> = reg.get_all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn refresh_replaces_everything() {
        let reg = PrinterRegistry::new(vec![printer("a"), printer("b")]);
        reg.refresh(vec![printer("c")]);
        assert!(reg.get_by_name("a").is_none());
        assert_eq!(reg.get_all().len(), 1);
        reg.refresh(Vec::new());
        assert!(reg.is_empty());
    }

    #[test]
    fn refresh_keeps_semaphore_of_surviving_printer() {
        let reg = PrinterRegistry::new(vec![printer("a")]);
        let before = reg.get_by_name("a").unwrap().native_job_semaphore;
        reg.refresh(vec![printer("a"), printer("b")]);
        let after = reg.get_by_name("a").unwrap().native_job_semaphore;
        assert!(before.shares_slots_with(&after));
        let fresh = reg.get_by_name("b").unwrap().native_job_semaphore;
        assert!(!before.shares_slots_with(&fresh));
    }

    #[test]
    fn overlapping_refreshes_agree_on_one_semaphore() {
        for _ in 0..20 {
            let reg = Arc::new(PrinterRegistry::default());
            let barrier = Arc::new(Barrier::new(8));
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let reg = Arc::clone(&reg);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        let mut batch: Vec<Printer> =
                            (0..500).map(|i| printer(&format!("p{i}"))).collect();
                        batch.push(printer("Office"));
                        barrier.wait();
                        reg.refresh(batch);
                        reg.get_by_name("Office").unwrap().native_job_semaphore
                    })
                })
                .collect();
            let seen: Vec<NativeJobSemaphore> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();
            let last = reg.get_by_name("Office").unwrap().native_job_semaphore;
            assert!(seen.iter().all(|s| s.shares_slots_with(&last)));
        }
    }

    #[test]
    fn readers_never_see_partial_maps() {
        let reg = Arc::new(PrinterRegistry::new(vec![printer("a"), printer("b")]));
        let writer = {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                for i in 0..200 {
                    if i % 2 == 0 {
                        reg.refresh(vec![printer("c"), printer("d"), printer("e")]);
                    } else {
                        reg.refresh(vec![printer("a"), printer("b")]);
                    }
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let reg = Arc::clone(&reg);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let n = reg.get_all().len();
                        assert!(n == 2 || n == 3, "observed {n} printers");
                    }
                })
            })
            .collect();
        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
