use chrono::Utc;

use crate::prelude::*;
use crate::tests::*;

fn value_request(node_id: &NodeId, client_handle: u32) -> MonitoredItemCreateRequest {
    MonitoredItemCreateRequest {
        node_id: node_id.clone(),
        attribute_id: AttributeId::Value as u32,
        client_handle,
        timestamps_to_return: TimestampsToReturn::Server,
    }
}

#[test]
fn create_and_delete_subscription_updates_diagnostics() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    assert!(st.core.subscription_exists(id));
    assert_eq!(st.core.diagnostics().subscription_count, 1);

    assert!(st.core.delete_subscription(id).is_ok());
    assert!(!st.core.subscription_exists(id));
    assert_eq!(st.core.diagnostics().subscription_count, 0);

    assert_eq!(st.core.delete_subscription(id), Err(StatusCode::BadSubscriptionIdInvalid));
}

#[test]
fn create_monitored_item_rejects_unknown_node() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    let unknown = NodeId::new_numeric(1, 999);
    let result = st.core.create_monitored_item(id, &value_request(&unknown, 1));
    assert_eq!(result.status_code, StatusCode::BadNodeIdUnknown);
}

#[test]
fn create_monitored_item_rejects_invalid_attribute_id() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    let request = MonitoredItemCreateRequest {
        node_id: objects_folder_id(),
        attribute_id: 999,
        client_handle: 1,
        timestamps_to_return: TimestampsToReturn::Server,
    };
    let result = st.core.create_monitored_item(id, &request);
    assert_eq!(result.status_code, StatusCode::BadAttributeIdInvalid);
}

#[test]
fn create_monitored_item_on_unknown_subscription() {
    let st = ServiceTest::new(sample_address_space());
    let result = st.core.create_monitored_item(999, &value_request(&objects_folder_id(), 1));
    assert_eq!(result.status_code, StatusCode::BadSubscriptionIdInvalid);
}

#[test]
fn delete_monitored_item_unknown_id_is_invalid() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    assert_eq!(st.core.delete_monitored_item(id, 42), StatusCode::BadMonitoredItemIdInvalid);
}

#[test]
fn set_publishing_mode_reports_per_id_status() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    let results = st.core.set_publishing_mode(&[id, 999], false);
    assert_eq!(results, vec![StatusCode::Good, StatusCode::BadSubscriptionIdInvalid]);
}

#[test]
fn tick_emits_notification_on_value_change() {
    // A monitored Value item whose underlying node changes between ticks produces a
    // DataChangeNotification on the next publish.
    let (address_space, ids) = add_many_vars(sample_address_space(), &objects_folder_id(), 1);
    let st = ServiceTest::new(address_space);
    let subscription_id = st.core.create_subscription(st.session_token.clone(), true);
    st.core.create_monitored_item(subscription_id, &value_request(&ids[0], 7));

    // The baseline sample is taken on item creation, so the first publish/tick round just
    // drains that initial notification.
    let baseline = std::sync::Arc::new(std::sync::Mutex::new(None));
    let baseline2 = baseline.clone();
    let request = PublishRequest { request_id: 1, authentication_token: st.session_token.clone(), subscription_acknowledgements: Vec::new() };
    st.core.begin_publish(request, move |response| *baseline2.lock().unwrap() = Some(response)).unwrap();
    assert!(baseline.lock().unwrap().is_some());

    st.core.address_space().write_value(&ids[0], Variant::Int16(99), Utc::now()).unwrap();

    let seen = std::sync::Arc::new(std::sync::Mutex::new(None));
    let seen2 = seen.clone();
    let request = PublishRequest { request_id: 2, authentication_token: st.session_token.clone(), subscription_acknowledgements: Vec::new() };
    st.core.begin_publish(request, move |response| *seen2.lock().unwrap() = Some(response)).unwrap();
    // Nothing new since the baseline sample yet, so this one queues until the next tick.
    assert!(seen.lock().unwrap().is_none());

    st.core.tick(Utc::now());
    let response = seen.lock().unwrap().take().expect("tick should complete the queued publish");
    let notification = response.notification_message.expect("changed value should produce a notification");
    let data_change = notification.notification_data.expect("expected a DataChangeNotification");
    assert_eq!(data_change.monitored_items[0].client_handle, 7);
    assert_eq!(data_change.monitored_items[0].value.value, Variant::Int16(99));
}

#[test]
fn tick_expires_subscription_after_lifetime_count() {
    // A disabled subscription still counts down its lifetime and is destroyed exactly after
    // LIFETIME_COUNT ticks.
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), false);
    for _ in 0..LIFETIME_COUNT - 1 {
        st.core.tick(Utc::now());
        assert!(st.core.subscription_exists(id));
    }
    st.core.tick(Utc::now());
    assert!(!st.core.subscription_exists(id));
}

#[test]
fn tick_sends_keepalive_on_cadence() {
    // With no monitored items, an enabled subscription gets a keepalive exactly every
    // MAX_KEEP_ALIVE_COUNT ticks, not sooner.
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);

    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    for i in 0..(MAX_KEEP_ALIVE_COUNT * 2) {
        let seen2 = seen.clone();
        let request = PublishRequest { request_id: i, authentication_token: st.session_token.clone(), subscription_acknowledgements: Vec::new() };
        st.core.begin_publish(request, move |response| seen2.lock().unwrap().push(response)).unwrap();
        st.core.tick(Utc::now());
    }
    let responses = seen.lock().unwrap();
    assert!(responses.iter().any(|r| r.notification_message.as_ref().map_or(false, |m| m.is_keep_alive())));
    let _ = id;
}

#[test]
fn publish_ack_mismatch_is_bad_sequence_number_unknown() {
    let st = ServiceTest::new(sample_address_space());
    let subscription_id = st.core.create_subscription(st.session_token.clone(), true);

    let seen = std::sync::Arc::new(std::sync::Mutex::new(None));
    let seen2 = seen.clone();
    let ack = SubscriptionAcknowledgement { subscription_id, sequence_number: 999 };
    let request = PublishRequest { request_id: 1, authentication_token: st.session_token.clone(), subscription_acknowledgements: vec![ack] };
    st.core.begin_publish(request, move |response| *seen2.lock().unwrap() = Some(response)).unwrap();

    let response = seen.lock().unwrap().take().unwrap();
    assert_eq!(response.results, vec![StatusCode::BadSequenceNumberUnknown]);
}

#[test]
fn begin_publish_rejects_unknown_session() {
    let st = ServiceTest::new(sample_address_space());
    let request = PublishRequest { request_id: 1, authentication_token: NodeId::new_numeric(9, 9), subscription_acknowledgements: Vec::new() };
    assert_eq!(st.core.begin_publish(request, |_| {}), Err(StatusCode::BadSecurityChecksFailed));
}

#[test]
fn begin_publish_rejects_unactivated_session() {
    let st = ServiceTest::new(sample_address_space());
    let token = NodeId::new_numeric(1, 2);
    st.core.create_session(token.clone());
    let request = PublishRequest { request_id: 1, authentication_token: token, subscription_acknowledgements: Vec::new() };
    assert_eq!(st.core.begin_publish(request, |_| {}), Err(StatusCode::BadSessionNotActivated));
}

#[test]
fn begin_republish_always_unavailable() {
    let st = ServiceTest::new(sample_address_space());
    assert_eq!(st.core.begin_republish(), StatusCode::BadMessageNotAvailable);
}

#[test]
fn destroy_session_tears_down_its_subscriptions() {
    let st = ServiceTest::new(sample_address_space());
    let id = st.core.create_subscription(st.session_token.clone(), true);
    st.core.destroy_session(&st.session_token);
    assert!(!st.core.subscription_exists(id));
    assert_eq!(st.core.diagnostics().session_count, 0);
}
