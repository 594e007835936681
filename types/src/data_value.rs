use chrono::{DateTime, Utc};

use crate::status_code::StatusCode;
use crate::variant::Variant;

/// A timestamped, status-qualified value, as returned by `fill_data_value` and carried by
/// `MonitoredItem::last_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataValue {
    pub value: Variant,
    pub status: StatusCode,
    pub source_timestamp: Option<DateTime<Utc>>,
    pub server_timestamp: Option<DateTime<Utc>>,
    pub source_picoseconds: u16,
    pub server_picoseconds: u16,
}

impl Default for DataValue {
    fn default() -> Self {
        DataValue {
            value: Variant::Empty,
            status: StatusCode::Good,
            source_timestamp: None,
            server_timestamp: None,
            source_picoseconds: 0,
            server_picoseconds: 0,
        }
    }
}

impl DataValue {
    pub fn new_now(value: Variant, now: DateTime<Utc>) -> DataValue {
        DataValue {
            value,
            status: StatusCode::Good,
            source_timestamp: Some(now),
            server_timestamp: Some(now),
            source_picoseconds: 0,
            server_picoseconds: 0,
        }
    }
}

/// Which timestamps a caller wants filled in on a `DataValue`. Consumed by `fill_data_value`
/// (out of scope) and stored per monitored item so the scheduler knows what the client asked
/// for, even though the scheduler itself only ever asks for server-side timestamps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TimestampsToReturn {
    Source,
    Server,
    Both,
    Neither,
}

/// True when `current`'s value differs from `previous`'s, by value equality of the `Variant`.
/// Status and timestamps are deliberately excluded from the comparison: the subscription
/// engine only reports a data *change*, not a timestamp refresh with an unchanged value.
pub fn is_value_different(previous: &DataValue, current: &DataValue) -> bool {
    previous.value != current.value || previous.status != current.status
}

/// Overwrite `dest` with `src`'s contents. A plain `Clone` would do the same thing; this
/// function exists because the tick algorithm treats the overwrite as a distinct step from
/// the dirty/diff bookkeeping around it.
pub fn copy_data_value(dest: &mut DataValue, src: &DataValue) {
    dest.clone_from(src);
}
