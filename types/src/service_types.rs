//! Request/response shapes for the subscription and monitored-item services
//! (`MonitoredItemCreateRequest`, `MonitoredItemCreateResult`, and friends).

use std::convert::TryFrom;

use chrono::{DateTime, Utc};

use crate::data_value::{DataValue, TimestampsToReturn};
use crate::node_id::NodeId;
use crate::status_code::StatusCode;

/// Which attribute a monitored item samples. The wider OPC UA attribute set has ~20 entries;
/// the subscription engine only ever accepts these two. Numeric values match the standard
/// attribute id table so `TryFrom<u32>` can decode a wire-level `AttributeId` directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeId {
    Value = 13,
    EventNotifier = 18,
}

impl TryFrom<u32> for AttributeId {
    type Error = StatusCode;

    fn try_from(value: u32) -> Result<AttributeId, StatusCode> {
        match value {
            13 => Ok(AttributeId::Value),
            18 => Ok(AttributeId::EventNotifier),
            _ => Err(StatusCode::BadAttributeIdInvalid),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoredItemCreateRequest {
    pub node_id: NodeId,
    pub attribute_id: u32,
    pub client_handle: u32,
    pub timestamps_to_return: TimestampsToReturn,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoredItemCreateResult {
    pub status_code: StatusCode,
    pub monitored_item_id: u32,
}

impl MonitoredItemCreateResult {
    pub fn error(status_code: StatusCode) -> MonitoredItemCreateResult {
        MonitoredItemCreateResult { status_code, monitored_item_id: 0 }
    }
}

/// One monitored item's contribution to a `DataChangeNotification`.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoredItemNotification {
    pub client_handle: u32,
    pub value: DataValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataChangeNotification {
    pub monitored_items: Vec<MonitoredItemNotification>,
}

/// The payload of a single completed publish. A keepalive is a `NotificationMessage` whose
/// `notification_data` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
    pub sequence_number: u32,
    pub publish_time: DateTime<Utc>,
    pub notification_data: Option<DataChangeNotification>,
}

impl NotificationMessage {
    pub fn keep_alive(sequence_number: u32, publish_time: DateTime<Utc>) -> NotificationMessage {
        NotificationMessage { sequence_number, publish_time, notification_data: None }
    }

    pub fn data_change(sequence_number: u32, publish_time: DateTime<Utc>, notification: DataChangeNotification) -> NotificationMessage {
        NotificationMessage { sequence_number, publish_time, notification_data: Some(notification) }
    }

    pub fn is_keep_alive(&self) -> bool {
        self.notification_data.is_none()
    }
}

/// A client's acknowledgement of one previously delivered `NotificationMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionAcknowledgement {
    pub subscription_id: u32,
    pub sequence_number: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseHeader {
    pub service_result: Option<StatusCode>,
}

impl ResponseHeader {
    pub fn for_result(service_result: StatusCode) -> ResponseHeader {
        ResponseHeader { service_result: if service_result.is_good() { None } else { Some(service_result) } }
    }
}

/// A long-polled publish request, identified by the authentication token of the session it
/// belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    pub request_id: u32,
    pub authentication_token: NodeId,
    pub subscription_acknowledgements: Vec<SubscriptionAcknowledgement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    pub response_header: ResponseHeader,
    pub subscription_id: u32,
    pub notification_message: Option<NotificationMessage>,
    pub more_notifications: bool,
    pub results: Vec<StatusCode>,
}
