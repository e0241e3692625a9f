//! Socket event object
//!
//! Every dispatched frame is mapped into an [`Event`]: the named fields are
//! read from the frame's `o` payload and the whole frame is kept in
//! [`Event::raw`] for anything the typed view does not cover.

use super::Message;
use serde::Deserialize;
use serde_json::Value;

/// A read-view over one inbound socket frame
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Community the event happened in
    #[serde(rename = "ndcId")]
    pub com_id: Option<i64>,
    /// Alert option of the chat member
    pub alert_option: Option<i64>,
    /// Membership status of the chat member
    pub membership_status: Option<i64>,
    /// Action name on action frames (e.g. `Typing`)
    pub actions: Option<Value>,
    /// Action target
    pub target: Option<String>,
    /// Action parameters
    pub params: Option<Value>,
    /// Thread type on action frames
    pub thread_type: Option<i64>,
    /// Frame id
    pub id: Option<String>,
    /// Chat message on message frames
    #[serde(rename = "chatMessage")]
    pub message: Option<Message>,

    /// Top-level frame type (`t`)
    #[serde(skip)]
    pub frame_type: Option<i64>,
    /// The whole frame as received
    #[serde(skip)]
    pub raw: Value,
}

impl Event {
    /// Map a decoded frame into an event.
    ///
    /// Fields of `o` that do not match the expected shape are left empty
    /// rather than failing the whole mapping.
    pub fn from_frame(frame: &Value) -> Self {
        let payload = frame.get("o").cloned().unwrap_or(Value::Null);
        let mut event = match serde_json::from_value::<Event>(payload) {
            Ok(event) => event,
            Err(error) => {
                tracing::debug!(%error, "Socket frame payload did not match the event shape");
                Event::default()
            }
        };
        event.frame_type = frame.get("t").and_then(Value::as_i64);
        event.raw = frame.clone();
        event
    }

    /// Text content of the chat message, if any
    pub fn content(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.content.as_deref())
    }

    /// Thread id of the chat message, if any
    pub fn thread_id(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.thread_id.as_deref())
    }

    /// Author uid of the chat message, if any
    pub fn author_id(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| {
            m.uid
                .as_deref()
                .or_else(|| m.author.as_ref().map(|a| a.uid.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_from_chat_frame() {
        let frame = json!({
            "t": 1000,
            "o": {
                "ndcId": 42,
                "alertOption": 1,
                "membershipStatus": 1,
                "chatMessage": {
                    "type": 0,
                    "content": "hi",
                    "threadId": "t-1",
                    "author": {"uid": "u-1"}
                }
            }
        });

        let event = Event::from_frame(&frame);
        assert_eq!(event.frame_type, Some(1000));
        assert_eq!(event.com_id, Some(42));
        assert_eq!(event.content(), Some("hi"));
        assert_eq!(event.thread_id(), Some("t-1"));
        assert_eq!(event.author_id(), Some("u-1"));
        assert_eq!(event.raw, frame);
    }

    #[test]
    fn test_event_from_action_frame() {
        let frame = json!({
            "t": 304,
            "o": {"actions": "Typing", "target": "ndc://x1/chat-thread/t-1", "threadType": 2, "id": "abc"}
        });

        let event = Event::from_frame(&frame);
        assert_eq!(event.actions, Some(json!("Typing")));
        assert_eq!(event.target.as_deref(), Some("ndc://x1/chat-thread/t-1"));
        assert_eq!(event.thread_type, Some(2));
        assert!(event.message.is_none());
    }

    #[test]
    fn test_event_from_frame_without_payload() {
        let frame = json!({"t": 9999});
        let event = Event::from_frame(&frame);
        assert_eq!(event.frame_type, Some(9999));
        assert!(event.com_id.is_none());
        assert_eq!(event.raw, frame);
    }

    #[test]
    fn test_event_from_malformed_payload_keeps_raw() {
        let frame = json!({"t": 1000, "o": {"ndcId": "not-a-number"}});
        let event = Event::from_frame(&frame);
        assert!(event.com_id.is_none());
        assert_eq!(event.raw, frame);
    }
}
