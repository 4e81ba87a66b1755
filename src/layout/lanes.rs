//! Greedy lane assignment.
//!
//! # Algorithm
//!
//! 1. Stable-sort intervals by clipped start (ties keep input order).
//! 2. Track, per lane, the end of the last interval placed in it.
//! 3. Place each interval in the first lane whose tracked end is `<=` its
//!    start (back-to-back intervals share a lane).
//! 4. Open a new lane when none qualifies.
//!
//! This is the classic interval partitioning greedy. Processing by start
//! time, a new lane is opened only when every existing lane is busy at the
//! current start, so the lane count equals the maximum overlap depth.
//!
//! # Complexity
//! O(n log n + n * k) where k is the resulting lane count.
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ClippedInterval;

/// Lane indices for one resource on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    /// Activity ID → lane index.
    pub lanes: HashMap<String, usize>,
    /// Number of lanes opened.
    pub lane_count: usize,
}

impl LaneAssignment {
    /// Lane index of an activity.
    pub fn lane_of(&self, activity_id: &str) -> Option<usize> {
        self.lanes.get(activity_id).copied()
    }

    /// Number of assigned activities.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Whether nothing was assigned.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

/// Assigns non-overlapping lanes to intervals of a single resource.
pub fn assign_lanes(intervals: &[ClippedInterval]) -> LaneAssignment {
    let mut assignment = LaneAssignment::default();
    for (index, lane) in place(intervals) {
        assignment
            .lanes
            .insert(intervals[index].activity_id.clone(), lane);
        assignment.lane_count = assignment.lane_count.max(lane + 1);
    }
    assignment
}

/// Sorted placement: `(input index, lane)` pairs in processing order.
///
/// Used by the timeline to emit records in a deterministic order and to map
/// each placement back to its source activity.
pub fn place(intervals: &[ClippedInterval]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // sort_by_key is stable
    order.sort_by_key(|&i| intervals[i].start);

    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut placed = Vec::with_capacity(order.len());

    for index in order {
        let interval = &intervals[index];
        let lane = match lane_ends.iter().position(|&end| end <= interval.start) {
            Some(lane) => {
                lane_ends[lane] = interval.end;
                lane
            }
            None => {
                lane_ends.push(interval.end);
                lane_ends.len() - 1
            }
        };
        placed.push((index, lane));
    }

    placed
}

/// Maximum number of intervals overlapping at any instant.
///
/// Endpoint sweep; an end at `t` is processed before a start at `t`, so
/// back-to-back intervals do not count as overlapping.
pub fn max_overlap_depth(intervals: &[ClippedInterval]) -> usize {
    let mut events: Vec<(NaiveDateTime, i32)> = intervals
        .iter()
        .flat_map(|iv| [(iv.start, 1), (iv.end, -1)])
        .collect();
    // -1 sorts before +1 at equal instants
    events.sort();

    let mut depth: i32 = 0;
    let mut max_depth: i32 = 0;
    for (_, delta) in events {
        depth += delta;
        max_depth = max_depth.max(depth);
    }
    max_depth as usize
}
