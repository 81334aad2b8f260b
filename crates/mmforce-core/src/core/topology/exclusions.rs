use crate::core::models::ids::AtomId;
use crate::core::models::topology::Bond;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, instrument, warn};

/// Default bond-graph horizon: 1-2, 1-3 and 1-4 pairs.
pub const DEFAULT_EXCLUSION_DEPTH: u8 = 3;

/// Minimum bond-graph hop distance for every atom pair within a bounded horizon.
///
/// Pairs are stored under a canonical key (smaller id first), so lookups are
/// order independent. Self-pairs and pairs farther than the build depth are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionTable {
    distances: HashMap<(AtomId, AtomId), u8>,
    max_depth: u8,
}

#[inline]
fn canonical(a: AtomId, b: AtomId) -> (AtomId, AtomId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl ExclusionTable {
    /// Hop distance between `a` and `b`, or `None` when they are farther apart
    /// than the build depth (or identical).
    #[inline]
    pub fn distance(&self, a: AtomId, b: AtomId) -> Option<u8> {
        self.distances.get(&canonical(a, b)).copied()
    }

    /// Whether the pair lies within `horizon` bonds of each other.
    #[inline]
    pub fn is_excluded(&self, a: AtomId, b: AtomId, horizon: u8) -> bool {
        self.distance(a, b).is_some_and(|d| d <= horizon)
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Iterates over `((smaller_id, larger_id), distance)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((AtomId, AtomId), u8)> + '_ {
        self.distances.iter().map(|(&pair, &d)| (pair, d))
    }
}

/// Builds the exclusion table of a bond graph by breadth-first search from every atom.
///
/// BFS discovers each atom at its minimum hop count, which is the distance recorded.
/// Only distances in `1..=max_depth` are stored. Bonds with an endpoint outside
/// `0..atom_count` are skipped with a warning; self-bonds are ignored.
#[instrument(skip_all, name = "build_exclusion_table")]
pub fn build_exclusion_table(atom_count: usize, bonds: &[Bond], max_depth: u8) -> ExclusionTable {
    let mut adjacency: Vec<Vec<AtomId>> = vec![Vec::new(); atom_count];
    for bond in bonds {
        let (a, b) = (bond.atom1_id, bond.atom2_id);
        if a >= atom_count || b >= atom_count {
            warn!(
                atom1 = a,
                atom2 = b,
                atom_count,
                "Skipping bond with an atom id outside the system."
            );
            continue;
        }
        if a == b {
            continue;
        }
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut distances = HashMap::new();
    let mut visited: HashMap<AtomId, u8> = HashMap::new();
    let mut queue = VecDeque::new();

    for start in 0..atom_count {
        visited.clear();
        queue.clear();
        visited.insert(start, 0);
        queue.push_back((start, 0u8));

        while let Some((current, depth)) = queue.pop_front() {
            if depth == max_depth {
                continue;
            }
            for &next in &adjacency[current] {
                if visited.contains_key(&next) {
                    continue;
                }
                let next_depth = depth + 1;
                visited.insert(next, next_depth);
                queue.push_back((next, next_depth));
                // Each unordered pair is reached from both ends; keep the lower-id search.
                if start < next {
                    distances.insert((start, next), next_depth);
                }
            }
        }
    }

    debug!(
        atoms = atom_count,
        bonds = bonds.len(),
        max_depth,
        pairs = distances.len(),
        "Built exclusion table."
    );

    ExclusionTable {
        distances,
        max_depth,
    }
}
