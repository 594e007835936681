//! Publish queue item and `complete_publish`. The transport's `begin_send_response`/
//! `end_send_response` pair is an external collaborator; here `end_send_response` is modeled as
//! invoking the item's owned responder closure exactly once, a typed handoff of the eventual
//! response rather than a shared raw pointer into request state.

use chrono::{DateTime, Utc};
use log::debug;

use opcua_types::prelude::*;

use crate::subscriptions::Subscription;

/// A long-polled publish request, owned end-to-end until `complete_publish` consumes it.
/// `ack_results` is computed once, at `begin_publish` time, and carried along so it can ride in
/// the eventual `PublishResponse` even though that response may not go out until a later tick.
pub struct PublishQueueItem {
    pub request: PublishRequest,
    ack_results: Vec<StatusCode>,
    responder: Box<dyn FnOnce(PublishResponse) + Send>,
}

impl PublishQueueItem {
    pub fn new(request: PublishRequest, ack_results: Vec<StatusCode>, responder: impl FnOnce(PublishResponse) + Send + 'static) -> PublishQueueItem {
        PublishQueueItem { request, ack_results, responder: Box::new(responder) }
    }

    fn end_send_response(self, response: PublishResponse) {
        (self.responder)(response);
    }
}

/// Applies `subscription_acknowledgements` from a `PublishRequest`, returning one `StatusCode`
/// per acknowledgement.
pub fn acknowledge(subscription: Option<&mut Subscription>, ack: &SubscriptionAcknowledgement) -> StatusCode {
    match subscription {
        None => StatusCode::BadSubscriptionIdInvalid,
        Some(sub) if sub.id != ack.subscription_id => StatusCode::BadSubscriptionIdInvalid,
        Some(sub) => {
            if ack.sequence_number != sub.seq_num {
                StatusCode::BadSequenceNumberUnknown
            } else {
                sub.last_ack_seq = ack.sequence_number;
                StatusCode::Good
            }
        }
    }
}

/// Completes one queued publish request, consuming `item`.
pub fn complete_publish(item: PublishQueueItem, subscription: Option<&mut Subscription>, now: DateTime<Utc>) {
    let results = item.ack_results.clone();
    let response = match subscription {
        None => PublishResponse {
            response_header: ResponseHeader::default(),
            subscription_id: 0,
            notification_message: None,
            more_notifications: false,
            results,
        },
        Some(sub) => {
            sub.seq_num += 1;
            let notification_data = sub.drain_data_change_notification();
            debug!("completing publish for subscription {}, sequence number {}", sub.id, sub.seq_num);
            let notification_message = match notification_data {
                Some(data) => NotificationMessage::data_change(sub.seq_num, now, data),
                None => NotificationMessage::keep_alive(sub.seq_num, now),
            };
            PublishResponse {
                response_header: ResponseHeader::default(),
                subscription_id: sub.id,
                notification_message: Some(notification_message),
                more_notifications: false,
                results,
            }
        }
    };
    item.end_send_response(response);
}
