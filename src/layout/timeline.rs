//! Day timeline composition.
//!
//! Runs the full pipeline for one viewed day:
//!
//! 1. Group activities by resource (input order kept).
//! 2. Normalize each against the day window; drop what is not drawn.
//! 3. Assign lanes per resource.
//! 4. Map each placement to geometry and resolve the row height.
//!
//! The computation is pure and is redone wholesale whenever any input
//! changes. Malformed or invisible activities are dropped and logged at
//! `debug`; nothing is raised to the caller.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::geometry::{to_layout, LayoutRecord};
use super::lanes::place;
use super::row::resolve_row_height;
use crate::config::LayoutConfig;
use crate::models::{
    covered_duration_ms, Activity, ActivityKind, ActivityRecord, ActivityStatus, ClippedInterval,
    DayWindow, Resource,
};

/// Input container for one layout computation.
#[derive(Debug, Clone)]
pub struct TimelineRequest {
    /// Rows to lay out, in display order.
    pub resources: Vec<Resource>,
    /// Validated activities.
    pub activities: Vec<Activity>,
    /// Calendar day being viewed.
    pub viewed_date: NaiveDate,
    /// Reference instant for status classification. `None` = no item is
    /// considered in progress.
    pub now: Option<NaiveDateTime>,
    /// Driver display names by driver ID.
    pub drivers: HashMap<String, String>,
    /// Vertical layout constants.
    pub config: LayoutConfig,
}

impl TimelineRequest {
    /// Creates a request with default configuration.
    pub fn new(resources: Vec<Resource>, activities: Vec<Activity>, viewed_date: NaiveDate) -> Self {
        Self {
            resources,
            activities,
            viewed_date,
            now: None,
            drivers: HashMap::new(),
            config: LayoutConfig::default(),
        }
    }

    /// Creates a request from raw records, dropping malformed ones.
    pub fn from_records(
        resources: Vec<Resource>,
        records: &[ActivityRecord],
        viewed_date: NaiveDate,
    ) -> Self {
        let activities = records
            .iter()
            .filter_map(|record| match Activity::from_record(record) {
                Ok(activity) => Some(activity),
                Err(err) => {
                    debug!("dropping activity record: {err}");
                    None
                }
            })
            .collect();
        Self::new(resources, activities, viewed_date)
    }

    /// Sets the reference instant.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Sets the driver directory used for block labels.
    pub fn with_drivers<I, K, V>(mut self, drivers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.drivers = drivers
            .into_iter()
            .map(|(id, name)| (id.into(), name.into()))
            .collect();
        self
    }

    /// Display name of an activity's driver, if known.
    pub fn driver_name(&self, activity: &Activity) -> Option<&str> {
        activity
            .driver_id
            .as_deref()
            .and_then(|id| self.drivers.get(id))
            .map(String::as_str)
    }

    /// Sets the layout configuration.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }
}

/// One drawn activity block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBlock {
    /// Normalized geometry.
    #[serde(flatten)]
    pub layout: LayoutRecord,
    /// Activity category.
    pub kind: ActivityKind,
    /// Visual status class.
    pub status: ActivityStatus,
    /// Text shown on the block.
    pub label: String,
    /// Unclipped start of the activity.
    pub start: NaiveDateTime,
    /// Unclipped end of the activity.
    pub end: NaiveDateTime,
    /// Free-text detail line.
    pub description: Option<String>,
}

impl TimelineBlock {
    /// `HH:MM → HH:MM` of the unclipped activity.
    pub fn time_range(&self) -> String {
        format!("{} → {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Layout of one resource row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRow {
    /// Resource identifier.
    pub resource_id: String,
    /// Primary row label.
    pub display_label: String,
    /// Secondary row label.
    pub subtitle: Option<String>,
    /// Number of lanes used (0 when the row is empty).
    pub lane_count: usize,
    /// Row height (px).
    pub row_height: f64,
    /// Fraction of the day covered by at least one block.
    pub utilization: f64,
    /// Blocks sorted by start (stable).
    pub blocks: Vec<TimelineBlock>,
}

impl ResourceRow {
    /// Geometry of every block.
    pub fn records(&self) -> impl Iterator<Item = &LayoutRecord> + '_ {
        self.blocks.iter().map(|b| &b.layout)
    }

    /// Block for an activity.
    pub fn block_for_activity(&self, activity_id: &str) -> Option<&TimelineBlock> {
        self.blocks
            .iter()
            .find(|b| b.layout.activity_id == activity_id)
    }
}

/// Complete day layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    /// Day window the geometry is relative to.
    pub window: DayWindow,
    /// One row per resource, in request order.
    pub rows: Vec<ResourceRow>,
}

impl TimelineLayout {
    /// Computes the layout for a request.
    pub fn compute(request: &TimelineRequest) -> Self {
        let window = DayWindow::for_date(request.viewed_date);

        let mut by_resource: HashMap<&str, Vec<&Activity>> = HashMap::new();
        for activity in &request.activities {
            by_resource
                .entry(activity.resource_id.as_str())
                .or_default()
                .push(activity);
        }

        for resource_id in by_resource.keys() {
            if !request.resources.iter().any(|r| r.id == *resource_id) {
                debug!("ignoring activities for unknown resource '{resource_id}'");
            }
        }

        let rows = request
            .resources
            .iter()
            .map(|resource| {
                let activities = by_resource
                    .get(resource.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                layout_row(resource, activities, &window, request)
            })
            .collect();

        Self { window, rows }
    }

    /// Row for a resource.
    pub fn row(&self, resource_id: &str) -> Option<&ResourceRow> {
        self.rows.iter().find(|r| r.resource_id == resource_id)
    }

    /// Geometry for an activity, searching all rows.
    pub fn record_for_activity(&self, activity_id: &str) -> Option<&LayoutRecord> {
        self.rows
            .iter()
            .find_map(|r| r.block_for_activity(activity_id))
            .map(|b| &b.layout)
    }

    /// Sum of all row heights (px).
    pub fn total_height(&self) -> f64 {
        self.rows.iter().map(|r| r.row_height).sum()
    }

    /// Number of drawn blocks.
    pub fn block_count(&self) -> usize {
        self.rows.iter().map(|r| r.blocks.len()).sum()
    }
}

fn layout_row(
    resource: &Resource,
    activities: &[&Activity],
    window: &DayWindow,
    request: &TimelineRequest,
) -> ResourceRow {
    let mut sources: Vec<&Activity> = Vec::with_capacity(activities.len());
    let mut intervals: Vec<ClippedInterval> = Vec::with_capacity(activities.len());
    for &activity in activities {
        match ClippedInterval::normalize(activity, window) {
            Some(interval) => {
                sources.push(activity);
                intervals.push(interval);
            }
            None => debug!(
                "activity '{}' not drawn on {}: no time inside the day",
                activity.id, window.date
            ),
        }
    }

    let mut lane_count = 0;
    let blocks = place(&intervals)
        .into_iter()
        .map(|(index, lane)| {
            lane_count = lane_count.max(lane + 1);
            let activity = sources[index];
            let status = match request.now {
                Some(now) => ActivityStatus::classify(activity, now),
                None => ActivityStatus::of_kind(&activity.kind),
            };
            TimelineBlock {
                layout: to_layout(&intervals[index], lane, window, &request.config),
                kind: activity.kind.clone(),
                status,
                label: activity.display_label(request.driver_name(activity)),
                start: activity.start,
                end: activity.end,
                description: activity.description.clone(),
            }
        })
        .collect();

    ResourceRow {
        resource_id: resource.id.clone(),
        display_label: resource.display_label.clone(),
        subtitle: resource.subtitle.clone(),
        lane_count,
        row_height: resolve_row_height(lane_count, &request.config),
        utilization: covered_duration_ms(&intervals) as f64 / window.duration_ms() as f64,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn act(id: &str, resource: &str, start: &str, end: &str) -> Activity {
        Activity::new(
            id,
            resource,
            parse_timestamp(start).unwrap(),
            parse_timestamp(end).unwrap(),
        )
        .unwrap()
    }

    fn scenario() -> TimelineRequest {
        TimelineRequest::new(
            vec![Resource::new("V1"), Resource::new("V2")],
            vec![
                act("A", "V1", "2024-03-05T08:00", "2024-03-05T10:00"),
                act("B", "V1", "2024-03-05T09:00", "2024-03-05T11:00"),
                act("C", "V1", "2024-03-05T10:30", "2024-03-05T12:00"),
            ],
            day(5),
        )
    }

    #[test]
    fn test_end_to_end_scenario() {
        let layout = TimelineLayout::compute(&scenario());
        let v1 = layout.row("V1").unwrap();

        assert_eq!(v1.lane_count, 2);
        assert_eq!(v1.row_height, 150.0);
        assert_eq!(v1.block_for_activity("A").unwrap().layout.lane, 0);
        assert_eq!(v1.block_for_activity("B").unwrap().layout.lane, 1);
        assert_eq!(v1.block_for_activity("C").unwrap().layout.lane, 0);

        let a = layout.record_for_activity("A").unwrap();
        assert!((a.left - 8.0 / 24.0).abs() < 1e-12);
        assert!((a.width - 2.0 / 24.0).abs() < 1e-12);
        assert_eq!(a.top, 8.0);
        let b = layout.record_for_activity("B").unwrap();
        assert_eq!(b.top, 73.0);
    }

    #[test]
    fn test_empty_row_uses_minimum() {
        let layout = TimelineLayout::compute(&scenario());
        let v2 = layout.row("V2").unwrap();
        assert_eq!(v2.lane_count, 0);
        assert!(v2.blocks.is_empty());
        assert_eq!(v2.row_height, 90.0);
        assert_eq!(v2.utilization, 0.0);
        assert_eq!(layout.total_height(), 240.0);
    }

    #[test]
    fn test_rows_follow_resource_order() {
        let mut request = scenario();
        request.resources.reverse();
        let layout = TimelineLayout::compute(&request);
        let ids: Vec<&str> = layout.rows.iter().map(|r| r.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["V2", "V1"]);
    }

    #[test]
    fn test_blocks_sorted_by_start() {
        let mut request = scenario();
        request.activities.reverse();
        let layout = TimelineLayout::compute(&request);
        let ids: Vec<&str> = layout
            .row("V1")
            .unwrap()
            .records()
            .map(|r| r.activity_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_resource_ignored() {
        let mut request = scenario();
        request
            .activities
            .push(act("X", "V99", "2024-03-05T08:00", "2024-03-05T09:00"));
        let layout = TimelineLayout::compute(&request);
        assert!(layout.record_for_activity("X").is_none());
        assert_eq!(layout.block_count(), 3);
    }

    #[test]
    fn test_other_days_not_drawn() {
        let mut request = scenario();
        request.viewed_date = day(6);
        let layout = TimelineLayout::compute(&request);
        assert_eq!(layout.block_count(), 0);
        assert_eq!(layout.window.date, day(6));
    }

    #[test]
    fn test_from_records_drops_malformed() {
        let records = vec![
            ActivityRecord::new("ok", "V1", "2024-03-05T08:00", "2024-03-05T09:00"),
            ActivityRecord::new("bad", "V1", "garbage", "2024-03-05T09:00"),
            ActivityRecord::new("empty", "V1", "2024-03-05T09:00", "2024-03-05T09:00"),
            ActivityRecord::new("reversed", "V1", "2024-03-05T10:00", "2024-03-05T09:00"),
        ];
        let request = TimelineRequest::from_records(vec![Resource::new("V1")], &records, day(5));
        assert_eq!(request.activities.len(), 1);

        let layout = TimelineLayout::compute(&request);
        assert_eq!(layout.block_count(), 1);
        assert!(layout.record_for_activity("ok").is_some());
    }

    #[test]
    fn test_status_and_labels() {
        let request = TimelineRequest::new(
            vec![Resource::new("V1")],
            vec![
                act("M", "V1", "2024-03-05T08:00", "2024-03-05T10:00"),
                act("W", "V1", "2024-03-05T08:00", "2024-03-05T10:00")
                    .with_kind(ActivityKind::Maintenance),
                act("L", "V1", "2024-03-05T14:00", "2024-03-05T15:00").with_label("Airport run"),
            ],
            day(5),
        )
        .with_now(parse_timestamp("2024-03-05T09:00").unwrap());

        let layout = TimelineLayout::compute(&request);
        let row = layout.row("V1").unwrap();
        assert_eq!(row.block_for_activity("M").unwrap().status, ActivityStatus::InProgress);
        assert_eq!(row.block_for_activity("W").unwrap().status, ActivityStatus::Maintenance);
        assert_eq!(row.block_for_activity("W").unwrap().label, "Maintenance");
        let l = row.block_for_activity("L").unwrap();
        assert_eq!(l.status, ActivityStatus::Planned);
        assert_eq!(l.label, "Airport run");
    }

    #[test]
    fn test_status_without_now() {
        let request = scenario();
        let layout = TimelineLayout::compute(&request);
        assert!(layout
            .rows
            .iter()
            .flat_map(|r| &r.blocks)
            .all(|b| b.status == ActivityStatus::Planned));
    }

    #[test]
    fn test_utilization_counts_union() {
        let layout = TimelineLayout::compute(&scenario());
        // 08:00-12:00 covered
        assert!((layout.row("V1").unwrap().utilization - 4.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_config_flows_through() {
        let cfg = LayoutConfig::new()
            .with_row_pixel_unit(40.0)
            .with_vertical_padding(10.0)
            .with_minimum_row_height(0.0);
        let layout = TimelineLayout::compute(&scenario().with_config(cfg));
        let v1 = layout.row("V1").unwrap();
        assert_eq!(v1.row_height, 90.0);
        assert_eq!(layout.record_for_activity("B").unwrap().top, 48.0);
    }

    #[test]
    fn test_spanning_activity_fills_day() {
        let request = TimelineRequest::new(
            vec![Resource::new("V1")],
            vec![act("N", "V1", "2024-03-04T23:00", "2024-03-06T02:00")],
            day(5),
        );
        let layout = TimelineLayout::compute(&request);
        let n = layout.record_for_activity("N").unwrap();
        assert_eq!(n.left, 0.0);
        assert_eq!(n.width, 1.0);
        assert_eq!(layout.row("V1").unwrap().utilization, 1.0);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let request = scenario().with_now(day(5).and_hms_opt(9, 30, 0).unwrap());
        let first = serde_json::to_value(&TimelineLayout::compute(&request).rows).unwrap();
        let second = serde_json::to_value(&TimelineLayout::compute(&request).rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_driver_name_labels_block() {
        let records = vec![
            ActivityRecord {
                driver_id: Some("D1".to_string()),
                label: Some("Airport run".to_string()),
                ..ActivityRecord::new("M", "V1", "2024-03-05T08:00", "2024-03-05T10:00")
            },
            ActivityRecord {
                driver_id: Some("D9".to_string()),
                ..ActivityRecord::new("U", "V1", "2024-03-05T11:00", "2024-03-05T12:00")
            },
        ];
        let request = TimelineRequest::from_records(vec![Resource::new("V1")], &records, day(5))
            .with_drivers([("D1", "Camille Martin")]);

        let layout = TimelineLayout::compute(&request);
        let row = layout.row("V1").unwrap();
        assert_eq!(row.block_for_activity("M").unwrap().label, "Camille Martin");
        // Unknown driver falls back to the kind label
        assert_eq!(row.block_for_activity("U").unwrap().label, "Mission");
    }

    #[test]
    fn test_block_carries_unclipped_times() {
        let request = TimelineRequest::new(
            vec![Resource::new("V1")],
            vec![act("N", "V1", "2024-03-04T22:15", "2024-03-05T06:30")
                .with_description("Night shuttle")],
            day(5),
        );
        let layout = TimelineLayout::compute(&request);
        let block = layout.row("V1").unwrap().block_for_activity("N").unwrap();
        assert_eq!(block.layout.left, 0.0);
        assert_eq!(block.start, parse_timestamp("2024-03-04T22:15").unwrap());
        assert_eq!(block.time_range(), "22:15 → 06:30");
        assert_eq!(block.description.as_deref(), Some("Night shuttle"));
    }

    #[test]
    fn test_block_serializes_flat() {
        let layout = TimelineLayout::compute(&scenario());
        let block = layout.row("V1").unwrap().block_for_activity("A").unwrap();
        let value = serde_json::to_value(block).unwrap();
        assert_eq!(value["activity_id"], "A");
        assert_eq!(value["kind"], "mission");
        assert_eq!(value["status"], "planned");
        assert!(value.get("left").is_some());
    }
}
