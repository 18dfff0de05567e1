//! Community Tests
//!
//! Cache identity, reconciliation and listings through a `Community`.

use std::sync::Arc;

use amino_client::domain::entities::{Member, MemberRecord, ThreadRecord};
use amino_client::infrastructure::http::Method;
use amino_client::ClientError;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{client, thread, url, SESSION};

fn member_records(ids: &[&str]) -> Vec<MemberRecord> {
    ids.iter()
        .map(|id| MemberRecord::from_value(json!({ "uid": id })).unwrap())
        .collect()
}

#[test]
fn test_two_batches_share_one_member_instance() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Alice");
    transport.member("U2", "Bob");
    let community = client.community("42");

    let first = community.reconcile_members(&member_records(&["U1", "U2"]))?;
    let second = community.reconcile_members(&member_records(&["U2", "U1"]))?;

    assert!(Arc::ptr_eq(&first[0], &second[1]));
    assert!(Arc::ptr_eq(&first[1], &second[0]));
    assert_eq!(community.cache().members().ids(), vec!["U1", "U2"]);
    assert_eq!(transport.calls().len(), 2);
    Ok(())
}

#[test]
fn test_cached_author_is_not_refetched() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.thread("T1", "U1");
    let community = client.community("42");
    let host = community.cache().insert_member(Member::new("U1").into_shared());

    let records = vec![ThreadRecord::from_value(thread("T1", "U1"))?];
    let threads = community.reconcile_threads(&records)?;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, url("chat/thread/T1"));
    assert!(Arc::ptr_eq(threads[0].read().creator.as_ref().unwrap(), &host));
    Ok(())
}

#[test]
fn test_joined_threads_resolve_shared_creator() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(
        Method::Get,
        url("chat/thread?type=joined-me&start=0&size=25"),
        200,
        json!({ "threadList": [thread("T1", "U1"), thread("T2", "U1")] }),
    );
    transport.member("U1", "Alice");
    transport.thread("T1", "U1");
    transport.thread("T2", "U1");
    let community = client.community("42");

    let threads = community.joined_threads(25)?;

    assert_eq!(threads.ids(), vec!["T1", "T2"]);
    let a = threads[0].read().creator.clone().unwrap();
    let b = threads[1].read().creator.clone().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.read().name.as_deref(), Some("Alice"));
    assert_eq!(transport.count("/user-profile/U1?action=visit"), 1);
    assert_eq!(community.cache().thread_count(), 2);
    Ok(())
}

#[test]
fn test_online_members_second_page_uses_cache() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(
        Method::Get,
        url("live-layer?topic=ndtopic:x42:online-members&start=0&size=10"),
        200,
        json!({ "userProfileList": [{ "uid": "U2" }, { "uid": "U1" }] }),
    );
    transport.member("U1", "Alice");
    transport.member("U2", "Bob");
    let community = client.community("42");

    let first = community.online_members(10)?;
    let second = community.online_members(10)?;

    assert_eq!(first.ids(), vec!["U2", "U1"]);
    assert!(Arc::ptr_eq(&first[0], &second[0]));
    assert_eq!(transport.count("?action=visit"), 2);
    Ok(())
}

#[test]
fn test_refresh_is_observed_by_every_holder() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Alice");
    let community = client.community("42");
    let batch = community.reconcile_members(&member_records(&["U1"]))?;
    let held = community.member("U1")?;

    community.refresh_members(&batch)?;

    assert!(Arc::ptr_eq(&held, &batch[0]));
    assert_eq!(transport.count("/user-profile/U1?action=visit"), 2);
    Ok(())
}

#[test]
fn test_identify_sets_me_from_cache() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Alice");
    let mut community = client.community("42");

    let me = community.identify("U1")?;
    let again = community.member("U1")?;

    assert!(Arc::ptr_eq(&me, &again));
    assert_eq!(transport.calls().len(), 1);
    Ok(())
}

#[test]
fn test_every_request_carries_session() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Alice");
    transport.thread("T1", "U1");
    let community = client.community("42");

    community.thread("T1")?;

    let expected = format!("sid={}", SESSION);
    for call in transport.calls() {
        assert_eq!(call.options.headers.get("NDCAUTH"), Some(&expected));
    }
    Ok(())
}

#[test]
fn test_missing_envelope_is_schema_mismatch() {
    let (client, transport) = client();
    transport.on(
        Method::Get,
        url("user-profile/U1?action=visit"),
        200,
        json!({ "api:statuscode": 0 }),
    );
    let community = client.community("42");

    let err = community.member("U1").unwrap_err();

    assert!(matches!(err, ClientError::SchemaMismatch(_)));
    assert_eq!(community.cache().member_count(), 0);
}

#[test]
fn test_server_error_propagates_with_status() {
    let (client, transport) = client();
    transport.on(
        Method::Get,
        url("chat/thread/T1"),
        500,
        json!({ "api:message": "internal" }),
    );
    let community = client.community("42");

    let err = community.thread("T1").unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(community.cache().thread_count(), 0);
}
