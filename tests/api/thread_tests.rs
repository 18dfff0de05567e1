//! Thread Tests
//!
//! Messaging and moderation actions, checked on the wire.

use std::io::Write;

use amino_client::domain::entities::{Member, Thread, CLIENT_REF_ID};
use amino_client::infrastructure::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{client, url};

fn hosted_thread(community: &amino_client::Community, host: &str) -> anyhow::Result<Thread> {
    let creator = community.member(host)?;
    Ok(Thread {
        creator: Some(creator),
        ..Thread::new("T1")
    })
}

#[test]
fn test_send_message_payload_and_url() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(Method::Post, url("chat/thread/T1/message"), 200, json!({}));
    let community = client.community("42");

    Thread::new("T1").send_message(&community, "hi")?;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].url, url("chat/thread/T1/message"));

    let mut body = calls[0].json();
    assert!(body["timestamp"].as_i64().is_some());
    body.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(
        body,
        json!({ "type": 0, "content": "hi", "clientRefId": CLIENT_REF_ID })
    );
    Ok(())
}

/// Known defect: every message carries the same client reference id, so the
/// service cannot tell two sends apart.
#[test]
fn test_client_ref_id_repeats_across_messages() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(Method::Post, url("chat/thread/T1/message"), 200, json!({}));
    let community = client.community("42");
    let thread = Thread::new("T1");

    thread.send_message(&community, "one")?;
    thread.send_message(&community, "two")?;

    let ids: Vec<_> = transport
        .calls()
        .iter()
        .map(|call| call.json()["clientRefId"].clone())
        .collect();
    assert_eq!(ids[0], ids[1]);
    Ok(())
}

#[test]
fn test_send_image_encodes_file() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(Method::Post, url("chat/thread/T1/message"), 200, json!({}));
    let community = client.community("42");

    let mut file = tempfile::Builder::new().suffix(".PNG").tempfile()?;
    file.write_all(b"png")?;

    Thread::new("T1").send_image(&community, file.path())?;

    let body = transport.calls()[0].json();
    assert_eq!(body["mediaType"], json!(100));
    assert_eq!(body["mediaUploadValue"], json!("cG5n"));
    assert_eq!(body["mediaUploadValueContentType"], json!("image/png"));
    assert_eq!(body["mediaUhqEnabled"], json!(false));
    Ok(())
}

#[test]
fn test_send_audio_is_voice_message() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(Method::Post, url("chat/thread/T1/message"), 200, json!({}));
    let community = client.community("42");

    let mut file = tempfile::Builder::new().suffix(".aac").tempfile()?;
    file.write_all(b"aac")?;

    Thread::new("T1").send_audio(&community, file.path())?;

    let body = transport.calls()[0].json();
    assert_eq!(body["type"], json!(2));
    assert_eq!(body["mediaType"], json!(110));
    assert_eq!(body["content"], json!(null));
    Ok(())
}

#[test]
fn test_message_list_in_server_order() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.on(
        Method::Get,
        url("chat/thread/T1/message?v=2&pagingType=t&size=2"),
        200,
        json!({ "messageList": [
            { "messageId": "M2", "threadId": "T1", "content": "later", "type": 0 },
            { "messageId": "M1", "threadId": "T1", "content": "earlier", "type": 0 },
        ] }),
    );
    let community = client.community("42");

    let messages = Thread::new("T1").get_message_list(&community, 2)?;

    assert_eq!(messages.ids(), vec!["M2", "M1"]);
    assert_eq!(messages[1].read().content.as_deref(), Some("earlier"));
    Ok(())
}

#[test]
fn test_ban_by_non_host_sends_nothing() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Host");
    let community = client
        .community("42")
        .with_me(Member::new("U2").into_shared());
    let thread = hosted_thread(&community, "U1")?;
    let before = transport.calls().len();

    let err = thread.ban(&community, &Member::new("U3"), false).unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(
        err.to_string(),
        "Forbidden: You do not have sufficient permissions to perform this operation."
    );
    assert_eq!(transport.calls().len(), before);
    Ok(())
}

#[test]
fn test_ban_by_host_deletes_member() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Host");
    transport.on(
        Method::Delete,
        url("chat/thread/T1/member/U3?allowRejoin=1"),
        200,
        json!({}),
    );
    let mut community = client.community("42");
    community.identify("U1")?;
    let thread = hosted_thread(&community, "U1")?;

    thread.ban(&community, &Member::new("U3"), true)?;

    let last = transport.calls().pop().unwrap();
    assert_eq!(last.method, Method::Delete);
    assert_eq!(last.url, url("chat/thread/T1/member/U3?allowRejoin=1"));
    Ok(())
}

/// Open question: leaving removes the creator on record, which is only the
/// caller when the caller created the thread.
#[test]
fn test_leave_targets_creator_on_record() -> anyhow::Result<()> {
    let (client, transport) = client();
    transport.member("U1", "Host");
    transport.on(Method::Delete, url("chat/thread/T1/member/U1"), 200, json!({}));
    let community = client
        .community("42")
        .with_me(Member::new("U2").into_shared());
    let thread = hosted_thread(&community, "U1")?;

    thread.leave(&community)?;

    let last = transport.calls().pop().unwrap();
    assert_eq!(last.url, url("chat/thread/T1/member/U1"));
    Ok(())
}
