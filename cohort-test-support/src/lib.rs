//! Shared test utilities used across cohort crates.

pub mod graph {
    //! Deterministic graph fixtures and a brute-force partition oracle.
    //!
    //! The oracle recomputes connected components from scratch on every
    //! call, which is exactly what the incremental engine under test must
    //! agree with after any sequence of edits.

    use std::collections::{BTreeMap, BTreeSet, VecDeque};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Computes the connected components of the undirected graph spanned
    /// by `nodes`, one set per component.
    ///
    /// Edges are treated as undirected. An edge endpoint absent from
    /// `nodes` never connects anything, so callers comparing against a
    /// registry with removed members may pass a stale edge list as long
    /// as the node list is current.
    #[must_use]
    pub fn components(nodes: &[u64], edges: &[(u64, u64)]) -> BTreeSet<BTreeSet<u64>> {
        let mut adjacency: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
        for &(left, right) in edges {
            adjacency.entry(left).or_default().push(right);
            adjacency.entry(right).or_default().push(left);
        }

        let mut unvisited: BTreeSet<u64> = nodes.iter().copied().collect();
        let mut parts = BTreeSet::new();
        while let Some(&start) = unvisited.iter().next() {
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                if !unvisited.remove(&current) {
                    continue;
                }
                component.insert(current);
                if let Some(neighbours) = adjacency.get(&current) {
                    queue.extend(neighbours.iter().copied());
                }
            }
            parts.insert(component);
        }
        parts
    }

    /// Edges forming the chain `0 - 1 - … - (n-1)`.
    #[must_use]
    pub fn line(n: u64) -> Vec<(u64, u64)> {
        (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect()
    }

    /// Edges forming a cycle over `n` nodes: the chain plus a closing
    /// edge back to node `0`.
    #[must_use]
    pub fn ring(n: u64) -> Vec<(u64, u64)> {
        let mut edges = line(n);
        if n >= 2 {
            edges.push((n - 1, 0));
        }
        edges
    }

    /// Edges forming a star centred on node `0` with `n - 1` leaves.
    #[must_use]
    pub fn star(n: u64) -> Vec<(u64, u64)> {
        (1..n).map(|leaf| (0, leaf)).collect()
    }

    /// Seeded random edge set over `n` nodes, each unordered pair drawn
    /// independently with `probability`.
    ///
    /// The same seed always produces the same edges, keeping randomised
    /// cases reproducible.
    ///
    /// # Panics
    /// Panics when `probability` lies outside `[0, 1]`.
    #[must_use]
    pub fn random_edges(n: u64, probability: f64, seed: u64) -> Vec<(u64, u64)> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut edges = Vec::new();
        for left in 0..n {
            for right in (left + 1)..n {
                if rng.gen_bool(probability) {
                    edges.push((left, right));
                }
            }
        }
        edges
    }
}

pub mod logging {
    //! Tracing initialisation for tests.

    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Installs a fmt subscriber writing through the test harness capture.
    ///
    /// Safe to call from every test; only the first call installs, and an
    /// externally installed subscriber is left in place.
    pub fn init() {
        INIT.call_once(|| {
            if tracing_subscriber::fmt().with_test_writer().try_init().is_err() {
                // another subscriber won the race; keep it
            }
        });
    }
}
