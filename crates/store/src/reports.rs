//! Reporting helpers: shift hours and room occupancy.
//!
//! Small server-side arithmetic the dashboard relies on. Shift spans are
//! wall-clock times within a day; a shift whose end time is before its start
//! wraps past midnight.

use chrono::NaiveTime;
use serde::Serialize;
use serde_json::Value;

/// Hours beyond which a shift counts as overtime.
const OVERTIME_THRESHOLD_HOURS: f64 = 8.0;

/// Worked and overtime hours for one shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftHours {
    /// Hours worked, break excluded.
    pub worked_hours: f64,
    /// Hours worked beyond the overtime threshold.
    pub overtime_hours: f64,
}

/// Parses a wall-clock time, accepting `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes + 24 * 60
    } else {
        minutes
    }
}

/// Computes worked and overtime hours for a shift.
///
/// The break interval, when given, is subtracted from the span. An end time
/// before the start time wraps past midnight.
pub fn shift_hours(
    start: NaiveTime,
    end: NaiveTime,
    break_interval: Option<(NaiveTime, NaiveTime)>,
) -> ShiftHours {
    let mut minutes = span_minutes(start, end);
    if let Some((break_start, break_end)) = break_interval {
        minutes -= span_minutes(break_start, break_end);
    }
    let worked_hours = (minutes.max(0) as f64) / 60.0;
    ShiftHours {
        worked_hours,
        overtime_hours: (worked_hours - OVERTIME_THRESHOLD_HOURS).max(0.0),
    }
}

/// Computes hours for a shift document.
///
/// Reads `startTime`, `endTime`, and the optional `breakStart`/`breakEnd`
/// pair. Returns `None` when the start or end time is missing or malformed.
pub fn shift_hours_for(content: &Value) -> Option<ShiftHours> {
    let time = |field: &str| content.get(field).and_then(Value::as_str).and_then(parse_time);
    let start = time("startTime")?;
    let end = time("endTime")?;
    let break_interval = match (time("breakStart"), time("breakEnd")) {
        (Some(bs), Some(be)) => Some((bs, be)),
        _ => None,
    };
    Some(shift_hours(start, end, break_interval))
}

/// Occupied beds over capacity as a percentage. Zero capacity yields 0.
pub fn occupancy_percent(occupied_beds: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    (occupied_beds as f64 / capacity as f64) * 100.0
}

/// Computes the occupancy percentage for a room document from its
/// `occupiedBeds` and `capacity` fields. Missing fields count as zero.
pub fn occupancy_for(content: &Value) -> f64 {
    let number = |field: &str| content.get(field).and_then(Value::as_u64).unwrap_or(0);
    occupancy_percent(number("occupiedBeds"), number("capacity"))
}

/// Adds computed report fields to an outgoing record.
///
/// Shifts gain `workedHours`/`overtimeHours`, rooms gain
/// `occupancyPercent`. The values are derived per response and never
/// stored. Other collections pass through untouched.
pub fn annotate(collection: &str, content: &mut Value) {
    match collection {
        "shifts" => {
            if let Some(hours) = shift_hours_for(content) {
                if let Some(obj) = content.as_object_mut() {
                    obj.insert(
                        "workedHours".to_string(),
                        serde_json::json!(hours.worked_hours),
                    );
                    obj.insert(
                        "overtimeHours".to_string(),
                        serde_json::json!(hours.overtime_hours),
                    );
                }
            }
        }
        "rooms" => {
            let percent = occupancy_for(content);
            if let Some(obj) = content.as_object_mut() {
                obj.insert("occupancyPercent".to_string(), serde_json::json!(percent));
            }
        }
        _ => {}
    }
}
