use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::trace;

use crate::graph::{CityId, RoadNetwork, SegmentId};

/// Total length of a path. Sums of `u32` segment lengths.
pub type Distance = u64;

/// Oldest-year summary of the empty path; any real year is smaller.
const NO_YEAR: i32 = i32::MAX;

/// Constraints applied during pathfinding.
#[derive(Debug, Default, Clone)]
pub struct PathConstraints {
    /// Cities that may be reached but never expanded. The search source is
    /// always expanded, and the search ends once the destination is settled.
    pub excluded_cities: HashSet<CityId>,
}

impl PathConstraints {
    /// Constraints excluding every city in `cities`.
    pub fn excluding(cities: impl IntoIterator<Item = CityId>) -> Self {
        Self {
            excluded_cities: cities.into_iter().collect(),
        }
    }

    fn allows_expansion(&self, city: CityId, source: CityId) -> bool {
        city == source || !self.excluded_cities.contains(&city)
    }
}

/// Best path found by [`find_shortest_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub source: CityId,
    pub destination: CityId,
    pub distance: Distance,
    /// Minimum construction/repair year along the path.
    pub oldest_year: i32,
    back_chain: Vec<SegmentId>,
}

impl ShortestPath {
    /// Segments obtained by walking predecessors from the destination back to
    /// the source; the first element touches the destination.
    pub fn segments_from_destination(&self) -> &[SegmentId] {
        &self.back_chain
    }

    /// Segments in travel order, from the source to the destination.
    pub fn segments_from_source(&self) -> Vec<SegmentId> {
        self.back_chain.iter().rev().copied().collect()
    }

    pub fn hop_count(&self) -> usize {
        self.back_chain.len()
    }
}

/// Outcome of a single shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Found(ShortestPath),
    /// No path exists under the given constraints.
    Unreachable,
    /// The destination is reachable but two equally short paths share the
    /// same oldest year, so no canonical best path exists.
    Ambiguous,
}

impl PathOutcome {
    pub fn found(self) -> Option<ShortestPath> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable | PathOutcome::Ambiguous => None,
        }
    }

    /// Distance to the destination when a unique best path exists.
    pub fn distance(&self) -> Option<Distance> {
        match self {
            PathOutcome::Found(path) => Some(path.distance),
            PathOutcome::Unreachable | PathOutcome::Ambiguous => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, PathOutcome::Ambiguous)
    }
}

/// Per-city scratch state, rebuilt for every query.
#[derive(Debug, Clone, Copy)]
struct VertexState {
    distance: Option<Distance>,
    predecessor: Option<SegmentId>,
    oldest_year: i32,
    ambiguous: bool,
    settled: bool,
}

impl Default for VertexState {
    fn default() -> Self {
        Self {
            distance: None,
            predecessor: None,
            oldest_year: NO_YEAR,
            ambiguous: false,
            settled: false,
        }
    }
}

/// Run Dijkstra's algorithm from `source` to `destination`.
///
/// Length is the primary cost. Among equally long paths the one whose oldest
/// segment is most recent wins; equal oldest years mark the target vertex as
/// ambiguous, and that flag travels forward along every best path built on
/// top of it. Segments pending removal are never traversed.
pub fn find_shortest_path(
    network: &RoadNetwork,
    source: CityId,
    destination: CityId,
    constraints: &PathConstraints,
) -> PathOutcome {
    let city_count = network.city_count();
    if source >= city_count || destination >= city_count {
        return PathOutcome::Unreachable;
    }
    if source == destination {
        return PathOutcome::Found(ShortestPath {
            source,
            destination,
            distance: 0,
            oldest_year: NO_YEAR,
            back_chain: Vec::new(),
        });
    }

    let mut states = vec![VertexState::default(); city_count];
    let mut queue = IndexedMinHeap::with_capacity(city_count);
    let mut settled_count = 0usize;

    states[source].distance = Some(0);
    queue.push_or_decrease(source, 0);

    while let Some(HeapEntry { city: current, .. }) = queue.pop() {
        states[current].settled = true;
        settled_count += 1;
        if current == destination {
            break;
        }
        if !constraints.allows_expansion(current, source) {
            continue;
        }
        let Some(current_distance) = states[current].distance else {
            continue;
        };
        let Some(city) = network.city(current) else {
            continue;
        };

        for &segment_id in city.segments() {
            let Some(segment) = network.segment(segment_id) else {
                continue;
            };
            if segment.is_pending_removal() {
                continue;
            }
            let Some(next) = segment.other_end(current) else {
                continue;
            };
            if states[next].settled {
                continue;
            }

            let candidate = current_distance.saturating_add(Distance::from(segment.length));
            let candidate_oldest = states[current].oldest_year.min(segment.year);
            let known_distance = states[next].distance;
            let improves = match known_distance {
                None => true,
                Some(known) => match candidate.cmp(&known) {
                    Ordering::Less => true,
                    Ordering::Equal if candidate_oldest > states[next].oldest_year => true,
                    Ordering::Equal if candidate_oldest == states[next].oldest_year => {
                        states[next].ambiguous = true;
                        false
                    }
                    _ => false,
                },
            };

            if improves {
                let inherited = states[current].ambiguous;
                let state = &mut states[next];
                state.distance = Some(candidate);
                state.predecessor = Some(segment_id);
                state.oldest_year = candidate_oldest;
                state.ambiguous = inherited;
                queue.push_or_decrease(next, candidate);
            }
        }
    }

    trace!(source, destination, settled = settled_count, "shortest path search finished");

    let target = states[destination];
    let Some(distance) = target.distance else {
        return PathOutcome::Unreachable;
    };
    if target.ambiguous {
        return PathOutcome::Ambiguous;
    }

    match reconstruct_chain(network, &states, source, destination) {
        Some(back_chain) => PathOutcome::Found(ShortestPath {
            source,
            destination,
            distance,
            oldest_year: target.oldest_year,
            back_chain,
        }),
        None => PathOutcome::Unreachable,
    }
}

fn reconstruct_chain(
    network: &RoadNetwork,
    states: &[VertexState],
    source: CityId,
    destination: CityId,
) -> Option<Vec<SegmentId>> {
    let mut chain = Vec::new();
    let mut current = destination;
    while current != source {
        let segment_id = states[current].predecessor?;
        chain.push(segment_id);
        current = network.segment(segment_id)?.other_end(current)?;
    }
    Some(chain)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct HeapEntry {
    city: CityId,
    key: Distance,
}

/// Binary min-heap over cities with decrease-key support.
///
/// `slots[city]` holds the position of `city` inside `entries`, so a key can
/// be lowered in place and sifted up in O(log n).
#[derive(Debug)]
struct IndexedMinHeap {
    entries: Vec<HeapEntry>,
    slots: Vec<Option<usize>>,
}

impl IndexedMinHeap {
    fn with_capacity(city_count: usize) -> Self {
        Self {
            entries: Vec::with_capacity(city_count),
            slots: vec![None; city_count],
        }
    }

    /// Insert `city` with `key`, or lower its key if it is already queued.
    /// Raising a key is ignored.
    fn push_or_decrease(&mut self, city: CityId, key: Distance) {
        match self.slots[city] {
            Some(slot) => {
                if key < self.entries[slot].key {
                    self.entries[slot].key = key;
                    self.sift_up(slot);
                }
            }
            None => {
                self.entries.push(HeapEntry { city, key });
                let slot = self.entries.len() - 1;
                self.slots[city] = Some(slot);
                self.sift_up(slot);
            }
        }
    }

    fn pop(&mut self) -> Option<HeapEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let min = self.entries.pop()?;
        self.slots[min.city] = None;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].key >= self.entries[parent].key {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < len && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots[self.entries[a].city] = Some(a);
        self.slots[self.entries[b].city] = Some(b);
    }
}
