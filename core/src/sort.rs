//! Deterministic linearization of entry sets.
//!
//! The sorter turns a partially ordered collection of entries into the one
//! sequence every replica agrees on: each entry is placed after every causal
//! parent already in the buffer and no later than the last entry that
//! references it, with remaining ties broken by first-seen order. Identical
//! inputs and lookups always produce identical output, which is what makes
//! merged logs converge.

use std::collections::{HashMap, HashSet, VecDeque};

use strand_proto::{BlockId, Entry};

/// Linearize `entries` into a causally consistent sequence.
pub fn sort(entries: Vec<Entry>) -> Vec<Entry> { sort_with(entries, |_| None, |_| None) }

/// Linearize `entries` plus everything transitively reachable through the
/// `lookup_a` / `lookup_b` resolvers.
///
/// A predecessor hash is resolved against the input set first, then
/// `lookup_a`, then `lookup_b`. Resolved predecessors jump the work queue so
/// they are placed before the remaining frontier; unresolved hashes stay
/// dangling references in the output.
pub fn sort_with<A, B>(entries: Vec<Entry>, lookup_a: A, lookup_b: B) -> Vec<Entry>
where
    A: Fn(&BlockId) -> Option<Entry>,
    B: Fn(&BlockId) -> Option<Entry>,
{
    let by_hash: HashMap<BlockId, Entry> = entries.iter().map(|e| (e.hash().clone(), e.clone())).collect();
    let mut queue: VecDeque<Entry> = entries.into();
    let mut placed: Vec<Entry> = Vec::new();
    let mut seen: HashSet<BlockId> = HashSet::new();

    while let Some(entry) = queue.pop_front() {
        if !seen.insert(entry.hash().clone()) {
            continue;
        }

        // Position bounds from what is already placed: after the last parent
        // of this entry, and no later than the last entry referencing it.
        let after_parent = placed.iter().rposition(|p| entry.references(p.hash())).map(|i| i + 1);
        let before_child = placed.iter().rposition(|c| c.references(entry.hash()));

        let index = match (after_parent, before_child) {
            (None, None) => placed.len(),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (Some(a), Some(b)) => a.min(b),
        };

        // Predecessors jump the queue so they are placed next.
        for id in entry.next().iter().rev() {
            if seen.contains(id) {
                continue;
            }
            if let Some(parent) = by_hash.get(id).cloned().or_else(|| lookup_a(id)).or_else(|| lookup_b(id)) {
                queue.push_front(parent);
            }
        }

        placed.insert(index, entry);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, next: &[&str]) -> Entry { Entry::new(id.into(), id.as_bytes().to_vec(), next.iter().map(|n| (*n).into()).collect()) }

    fn ids(entries: &[Entry]) -> Vec<&str> { entries.iter().map(|e| e.hash().as_str()).collect() }

    fn assert_causal(entries: &[Entry]) {
        for (idx, e) in entries.iter().enumerate() {
            for parent in e.next() {
                if let Some(pidx) = entries.iter().position(|p| p.hash() == parent) {
                    assert!(pidx < idx, "parent {} should precede {}", parent, e.hash());
                }
            }
        }
    }

    #[test]
    fn linear_chain_sorts_oldest_first() {
        // 1 <- 2 <- 3, arriving newest first (the fetch order)
        let input = vec![entry("3", &["2"]), entry("2", &["1"]), entry("1", &[])];
        let sorted = sort(input);
        assert_eq!(ids(&sorted), ["1", "2", "3"]);
    }

    #[test]
    fn duplicates_are_dropped_first_seen() {
        let input = vec![entry("1", &[]), entry("2", &["1"]), entry("1", &[]), entry("2", &["1"])];
        let sorted = sort(input);
        assert_eq!(ids(&sorted), ["1", "2"]);
    }

    #[test]
    fn arrival_order_does_not_change_the_result() {
        //      1
        //    ↙   ↘
        //   2     3
        //    ↘   ↙
        //      4
        let forward = vec![entry("1", &[]), entry("2", &["1"]), entry("3", &["1"]), entry("4", &["2", "3"])];
        let backward: Vec<Entry> = forward.iter().rev().cloned().collect();

        let a = sort(forward);
        let b = sort(backward);

        assert_causal(&a);
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn divergent_branches_over_a_shared_root_stay_causal() {
        //      r
        //    ↙   ↘
        //  a1      b1
        //  ↓       ↓
        //  a2      b2
        let all =
            vec![entry("r", &[]), entry("a1", &["r"]), entry("a2", &["a1"]), entry("b1", &["r"]), entry("b2", &["b1"])];
        let by_hash: HashMap<BlockId, Entry> = all.iter().map(|e| (e.hash().clone(), e.clone())).collect();

        // seed with the two branch heads only; everything else comes from the lookups
        let heads = vec![entry("a2", &["a1"]), entry("b2", &["b1"])];
        let lookup = |id: &BlockId| by_hash.get(id).cloned();
        let sorted = sort_with(heads, lookup, |_| None);

        assert_eq!(sorted.len(), 5);
        assert_causal(&sorted);
        assert_eq!(sorted[0].hash().as_str(), "r");
    }

    #[test]
    fn lookups_resolve_in_priority_order() {
        // the same hash resolves differently in the two lookups; the first wins
        let from_a = entry("p", &[]);
        let from_b = Entry::new("p".into(), b"other payload".to_vec(), vec![]);

        let sorted = sort_with(
            vec![entry("c", &["p"])],
            move |id: &BlockId| if id.as_str() == "p" { Some(from_a.clone()) } else { None },
            move |id: &BlockId| if id.as_str() == "p" { Some(from_b.clone()) } else { None },
        );

        assert_eq!(ids(&sorted), ["p", "c"]);
        assert_eq!(sorted[0].payload(), b"p");
    }

    #[test]
    fn unresolvable_parents_stay_dangling() {
        let sorted = sort(vec![entry("c", &["missing"])]);
        assert_eq!(ids(&sorted), ["c"]);
    }

    #[test]
    fn forged_reference_cycles_terminate() {
        // impossible with real content addressing, but decode accepts any ids
        let input = vec![entry("a", &["b"]), entry("b", &["a"])];
        let sorted = sort(input);
        assert_eq!(sorted.len(), 2);
    }
}
