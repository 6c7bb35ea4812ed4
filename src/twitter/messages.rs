// Direct message fetching: message_create events sent by the user.
//
// The events endpoint returns both sent and received messages, newest first,
// in pages of up to 50. Only events whose sender is the authenticated user
// are kept.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, info};

use super::client::TwitterClient;
use crate::error::Result;

/// Page size cap for direct_messages/events/list.
pub const MAX_EVENTS_PAGE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub events: Vec<DmEvent>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DmEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub message_create: Option<MessageCreate>,
}

#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub sender_id: String,
    pub message_data: MessageData,
}

#[derive(Debug, Deserialize)]
pub struct MessageData {
    pub text: String,
}

/// Texts of the events in `page` that `sender_id` sent.
pub fn sent_texts(page: EventsPage, sender_id: &str) -> Vec<String> {
    page.events
        .into_iter()
        .filter(|e| e.kind == "message_create")
        .filter_map(|e| e.message_create)
        .filter(|m| m.sender_id == sender_id)
        .map(|m| m.message_data.text)
        .collect()
}

/// Fetch up to `max_messages` direct messages sent by the authenticated user.
pub async fn fetch_sent_messages(
    client: &TwitterClient,
    max_messages: usize,
) -> Result<Vec<String>> {
    let sender_id = client.user().id_str.clone();
    let page_size = max_messages.min(MAX_EVENTS_PAGE).to_string();
    let page_size = page_size.as_str();

    collect_sent_messages(&sender_id, max_messages, move |cursor| async move {
        let mut params: Vec<(&str, &str)> = vec![("count", page_size)];
        if let Some(ref c) = cursor {
            params.push(("cursor", c));
        }
        client
            .get::<EventsPage>("direct_messages/events/list.json", &params)
            .await
    })
    .await
}

/// Walk event pages until `max_messages` sent texts are collected.
///
/// `fetch_page` receives the cursor from the previous page (`None` first).
/// Paging stops at the cap, at a page without `next_cursor`, or at an empty
/// page. A cap of zero requests nothing.
pub async fn collect_sent_messages<F, Fut>(
    sender_id: &str,
    max_messages: usize,
    mut fetch_page: F,
) -> Result<Vec<String>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<EventsPage>>,
{
    let mut messages = Vec::new();
    let mut cursor: Option<String> = None;

    while messages.len() < max_messages {
        let page = fetch_page(cursor.take()).await?;

        let page_events = page.events.len();
        let next = page.next_cursor.clone();

        for text in sent_texts(page, sender_id) {
            if messages.len() >= max_messages {
                break;
            }
            messages.push(text);
        }

        debug!(
            page_events = page_events,
            total_collected = messages.len(),
            "Fetched page of direct message events"
        );

        cursor = next;
        if cursor.is_none() || page_events == 0 {
            break;
        }
    }

    info!(count = messages.len(), "Collected sent direct messages");

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudError;

    const PAGE: &str = r#"{
        "events": [
            {"type": "message_create", "id": "1", "created_timestamp": "1",
             "message_create": {"target": {"recipient_id": "99"}, "sender_id": "10",
                                "message_data": {"text": "sent by me", "entities": {}}}},
            {"type": "message_create", "id": "2", "created_timestamp": "2",
             "message_create": {"target": {"recipient_id": "10"}, "sender_id": "99",
                                "message_data": {"text": "sent to me"}}},
            {"type": "participants_join", "id": "3"}
        ],
        "next_cursor": "abc"
    }"#;

    #[test]
    fn keeps_only_sent_messages() {
        let page: EventsPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert_eq!(sent_texts(page, "10"), vec!["sent by me"]);
    }

    #[test]
    fn empty_page_deserializes() {
        let page: EventsPage = serde_json::from_str("{}").unwrap();
        assert!(page.events.is_empty());
        assert!(page.next_cursor.is_none());
    }

    fn sent(texts: &[&str], next_cursor: Option<&str>) -> EventsPage {
        EventsPage {
            events: texts
                .iter()
                .map(|t| DmEvent {
                    kind: "message_create".to_string(),
                    message_create: Some(MessageCreate {
                        sender_id: "10".to_string(),
                        message_data: MessageData {
                            text: t.to_string(),
                        },
                    }),
                })
                .collect(),
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    /// Serve `pages` in order, recording the cursor each request carried.
    async fn collect(
        pages: Vec<EventsPage>,
        max_messages: usize,
    ) -> (Result<Vec<String>>, Vec<Option<String>>) {
        let mut pages = pages.into_iter();
        let mut requested = Vec::new();
        let result = collect_sent_messages("10", max_messages, |cursor| {
            requested.push(cursor);
            std::future::ready(Ok(pages.next().unwrap_or_else(|| sent(&[], None))))
        })
        .await;
        (result, requested)
    }

    #[tokio::test]
    async fn cap_applies_across_pages() {
        let pages = vec![
            sent(&["a", "b"], Some("p2")),
            sent(&["c", "d"], Some("p3")),
            sent(&["e"], None),
        ];
        let (result, requested) = collect(pages, 3).await;
        assert_eq!(result.unwrap(), vec!["a", "b", "c"]);
        assert_eq!(requested, vec![None, Some("p2".to_string())]);
    }

    #[tokio::test]
    async fn stops_when_cursor_is_missing() {
        let pages = vec![sent(&["a"], Some("p2")), sent(&["b"], None)];
        let (result, requested) = collect(pages, 10).await;
        assert_eq!(result.unwrap(), vec!["a", "b"]);
        assert_eq!(requested.len(), 2);
    }

    #[tokio::test]
    async fn stops_on_empty_page_even_with_cursor() {
        let pages = vec![sent(&["a"], Some("p2")), sent(&[], Some("p3"))];
        let (result, requested) = collect(pages, 10).await;
        assert_eq!(result.unwrap(), vec!["a"]);
        assert_eq!(requested.len(), 2);
    }

    #[tokio::test]
    async fn received_only_pages_keep_paging() {
        let mut received = sent(&["to me"], Some("p2"));
        if let Some(m) = received.events[0].message_create.as_mut() {
            m.sender_id = "99".to_string();
        }
        let pages = vec![received, sent(&["mine"], None)];
        let (result, requested) = collect(pages, 5).await;
        assert_eq!(result.unwrap(), vec!["mine"]);
        assert_eq!(requested.len(), 2);
    }

    #[tokio::test]
    async fn zero_cap_requests_nothing() {
        let (result, requested) = collect(vec![sent(&["a"], None)], 0).await;
        assert!(result.unwrap().is_empty());
        assert!(requested.is_empty());
    }

    #[tokio::test]
    async fn page_error_propagates() {
        let result = collect_sent_messages("10", 5, |_| {
            std::future::ready(Err(CloudError::Retrieval("429 Too Many Requests".to_string())))
        })
        .await;
        assert!(matches!(result, Err(CloudError::Retrieval(_))));
    }
}
