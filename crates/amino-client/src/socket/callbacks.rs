//! Callback router
//!
//! Inbound frames are routed in two levels. The top-level `t` field selects
//! the category:
//!
//! | `t`    | category      | second-level key                          |
//! |--------|---------------|-------------------------------------------|
//! | `1000` | chat message  | `"{type}:{mediaType}"` of `o.chatMessage` |
//! | `304`  | action start  | `o.actions`                               |
//! | `306`  | action end    | `o.actions`                               |
//!
//! The second-level key is looked up in a fixed table that names the public
//! event type (e.g. `0:0` → `on_text_message`). Anything unrecognised at
//! either level goes to `default`. User code subscribes with
//! [`Callbacks::event`]; every callback for a type runs in registration order
//! and a panicking callback is logged without affecting the others.

use crate::objects::Event;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

const CHAT_MESSAGE: i64 = 1000;
const ACTION_START: i64 = 304;
const ACTION_END: i64 = 306;

const CHAT_TABLE: &[(&str, EventType)] = &[
    ("0:0", EventType::TextMessage),
    ("0:100", EventType::ImageMessage),
    ("0:103", EventType::YoutubeMessage),
    ("2:110", EventType::VoiceMessage),
    ("3:113", EventType::StickerMessage),
    ("100:0", EventType::DeleteMessage),
    ("101:0", EventType::GroupMemberJoin),
    ("102:0", EventType::GroupMemberLeave),
    ("103:0", EventType::ChatInvite),
    ("107:0", EventType::VoiceChatStart),
    ("110:0", EventType::VoiceChatEnd),
    ("114:0", EventType::ScreenRoomStart),
];

const ACTION_START_TABLE: &[(&str, EventType)] = &[("Typing", EventType::UserTypingStart)];
const ACTION_END_TABLE: &[(&str, EventType)] = &[("Typing", EventType::UserTypingEnd)];

/// A registered callback
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// A frame could not be routed at all
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The frame is not valid JSON
    #[error("Invalid frame: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Public event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Plain text message
    TextMessage,
    /// Image message
    ImageMessage,
    /// Embedded YouTube link
    YoutubeMessage,
    /// Voice note
    VoiceMessage,
    /// Sticker
    StickerMessage,
    /// A message was deleted
    DeleteMessage,
    /// A member joined the chat
    GroupMemberJoin,
    /// A member left the chat
    GroupMemberLeave,
    /// The account was invited to a chat
    ChatInvite,
    /// Voice chat started
    VoiceChatStart,
    /// Voice chat ended
    VoiceChatEnd,
    /// Screening room started
    ScreenRoomStart,
    /// A user started typing
    UserTypingStart,
    /// A user stopped typing
    UserTypingEnd,
    /// Anything else
    Default,
}

impl EventType {
    /// Every event type, in table order
    pub const ALL: [EventType; 15] = [
        EventType::TextMessage,
        EventType::ImageMessage,
        EventType::YoutubeMessage,
        EventType::VoiceMessage,
        EventType::StickerMessage,
        EventType::DeleteMessage,
        EventType::GroupMemberJoin,
        EventType::GroupMemberLeave,
        EventType::ChatInvite,
        EventType::VoiceChatStart,
        EventType::VoiceChatEnd,
        EventType::ScreenRoomStart,
        EventType::UserTypingStart,
        EventType::UserTypingEnd,
        EventType::Default,
    ];

    /// Name used to register callbacks
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::TextMessage => "on_text_message",
            EventType::ImageMessage => "on_image_message",
            EventType::YoutubeMessage => "on_youtube_message",
            EventType::VoiceMessage => "on_voice_message",
            EventType::StickerMessage => "on_sticker_message",
            EventType::DeleteMessage => "on_delete_message",
            EventType::GroupMemberJoin => "on_group_member_join",
            EventType::GroupMemberLeave => "on_group_member_leave",
            EventType::ChatInvite => "on_chat_invite",
            EventType::VoiceChatStart => "on_voice_chat_start",
            EventType::VoiceChatEnd => "on_voice_chat_end",
            EventType::ScreenRoomStart => "on_screen_room_start",
            EventType::UserTypingStart => "on_user_typing_start",
            EventType::UserTypingEnd => "on_user_typing_end",
            EventType::Default => "default",
        }
    }

    /// Look up an event type by its registration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing key derived from a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchKey {
    /// Chat message frame, keyed by `"{type}:{mediaType}"`
    ChatMessage(String),
    /// Action start frame, keyed by the action name
    ActionStart(String),
    /// Action end frame, keyed by the action name
    ActionEnd(String),
    /// Any other top-level type, or a frame missing the fields to key on
    Unrecognized,
}

impl DispatchKey {
    /// The event type this key routes to
    pub fn event_type(&self) -> EventType {
        let (table, key) = match self {
            DispatchKey::ChatMessage(key) => (CHAT_TABLE, key),
            DispatchKey::ActionStart(key) => (ACTION_START_TABLE, key),
            DispatchKey::ActionEnd(key) => (ACTION_END_TABLE, key),
            DispatchKey::Unrecognized => return EventType::Default,
        };
        table
            .iter()
            .find(|(k, _)| *k == key.as_str())
            .map(|(_, t)| *t)
            .unwrap_or(EventType::Default)
    }
}

/// Derive the routing key for a decoded frame
pub fn dispatch_key(frame: &Value) -> DispatchKey {
    let payload = frame.get("o");
    match frame.get("t").and_then(Value::as_i64) {
        Some(CHAT_MESSAGE) => payload
            .and_then(|o| o.get("chatMessage"))
            .and_then(chat_message_key)
            .map(DispatchKey::ChatMessage)
            .unwrap_or(DispatchKey::Unrecognized),
        Some(ACTION_START) => DispatchKey::ActionStart(action_key(payload)),
        Some(ACTION_END) => DispatchKey::ActionEnd(action_key(payload)),
        _ => DispatchKey::Unrecognized,
    }
}

fn chat_message_key(message: &Value) -> Option<String> {
    let message_type = message.get("type").and_then(Value::as_i64)?;
    let media_type = message.get("mediaType").and_then(Value::as_i64).unwrap_or(0);
    Some(format!("{}:{}", message_type, media_type))
}

fn action_key(payload: Option<&Value>) -> String {
    match payload.and_then(|o| o.get("actions")) {
        Some(Value::String(action)) => action.clone(),
        Some(Value::Null) | None => "0".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Registry of user callbacks keyed by event type name
#[derive(Default)]
pub struct Callbacks {
    handlers: RwLock<HashMap<String, Vec<EventHandler>>>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let mut counts: Vec<(&String, usize)> =
            handlers.iter().map(|(name, list)| (name, list.len())).collect();
        counts.sort();
        f.debug_struct("Callbacks").field("handlers", &counts).finish()
    }
}

impl Callbacks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an event type name.
    ///
    /// Callbacks for the same name run in registration order. Any name is
    /// accepted; names that no frame maps to are simply never called.
    pub fn event<F>(&self, event_type: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.into())
            .or_default()
            .push(Arc::new(handler));
        self
    }

    /// Register a callback for a typed event
    pub fn on<F>(&self, event_type: EventType, handler: F) -> &Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.event(event_type.as_str(), handler)
    }

    /// Number of callbacks registered for a name
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .map_or(0, Vec::len)
    }

    /// Invoke every callback registered for `event_type`.
    ///
    /// Returns how many callbacks completed without panicking. A name with
    /// no registrations is a no-op.
    pub fn call(&self, event_type: &str, event: &Event) -> usize {
        // Snapshot so callbacks may register further callbacks
        let handlers: Vec<EventHandler> = match self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
        {
            Some(list) => list.clone(),
            None => return 0,
        };

        let mut completed = 0;
        for (index, handler) in handlers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(()) => completed += 1,
                Err(_) => {
                    tracing::error!(event_type, index, "Event callback panicked");
                }
            }
        }
        completed
    }

    /// Route an already decoded frame
    pub fn dispatch(&self, frame: &Value) -> EventType {
        let event_type = dispatch_key(frame).event_type();
        let event = Event::from_frame(frame);
        self.call(event_type.as_str(), &event);
        event_type
    }

    /// Decode a raw text frame and route it
    pub fn resolve(&self, raw: &str) -> Result<EventType, DispatchError> {
        let frame: Value = serde_json::from_str(raw)?;
        Ok(self.dispatch(&frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn recorder(callbacks: &Callbacks, name: &str) -> Arc<Mutex<Vec<Event>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        callbacks.event(name, move |event: &Event| sink.lock().unwrap().push(event.clone()));
        seen
    }

    #[test]
    fn test_chat_key_defaults_media_type() {
        let frame = json!({"t": 1000, "o": {"chatMessage": {"type": 0}}});
        assert_eq!(dispatch_key(&frame), DispatchKey::ChatMessage("0:0".to_string()));
    }

    #[test]
    fn test_chat_table() {
        let cases = [
            (0, Some(0), EventType::TextMessage),
            (0, Some(100), EventType::ImageMessage),
            (0, Some(103), EventType::YoutubeMessage),
            (2, Some(110), EventType::VoiceMessage),
            (3, Some(113), EventType::StickerMessage),
            (100, None, EventType::DeleteMessage),
            (101, None, EventType::GroupMemberJoin),
            (102, None, EventType::GroupMemberLeave),
            (103, None, EventType::ChatInvite),
            (107, None, EventType::VoiceChatStart),
            (110, None, EventType::VoiceChatEnd),
            (114, None, EventType::ScreenRoomStart),
            (0, Some(999), EventType::Default),
            (55, None, EventType::Default),
        ];
        for (message_type, media_type, expected) in cases {
            let mut message = json!({"type": message_type});
            if let Some(media) = media_type {
                message["mediaType"] = json!(media);
            }
            let frame = json!({"t": 1000, "o": {"chatMessage": message}});
            assert_eq!(dispatch_key(&frame).event_type(), expected, "{}", frame);
        }
    }

    #[test]
    fn test_action_keys() {
        let start = json!({"t": 304, "o": {"actions": "Typing"}});
        let end = json!({"t": 306, "o": {"actions": "Typing"}});
        let other = json!({"t": 304, "o": {"actions": "Recording"}});
        let missing = json!({"t": 306, "o": {}});

        assert_eq!(dispatch_key(&start).event_type(), EventType::UserTypingStart);
        assert_eq!(dispatch_key(&end).event_type(), EventType::UserTypingEnd);
        assert_eq!(dispatch_key(&other).event_type(), EventType::Default);
        assert_eq!(dispatch_key(&missing), DispatchKey::ActionEnd("0".to_string()));
        assert_eq!(dispatch_key(&missing).event_type(), EventType::Default);
    }

    #[test]
    fn test_unrecognized_frames_route_to_default() {
        for frame in [
            json!({"t": 9999, "o": {}}),
            json!({"o": {}}),
            json!({"t": "1000"}),
            json!({"t": 1000, "o": {}}),
            json!({"t": 1000, "o": {"chatMessage": {"content": "no type"}}}),
            json!([1, 2, 3]),
        ] {
            assert_eq!(dispatch_key(&frame), DispatchKey::Unrecognized, "{}", frame);
        }
    }

    #[test]
    fn test_resolve_text_message() {
        let callbacks = Callbacks::new();
        let seen = recorder(&callbacks, "on_text_message");

        let routed = callbacks
            .resolve(r#"{"t": 1000, "o": {"chatMessage": {"type": 0, "content": "hi"}}}"#)
            .unwrap();

        assert_eq!(routed, EventType::TextMessage);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].content(), Some("hi"));
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let callbacks = Callbacks::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for id in 1..=2 {
            let order = order.clone();
            callbacks.on(EventType::TextMessage, move |_| order.lock().unwrap().push(id));
        }

        callbacks
            .resolve(r#"{"t": 1000, "o": {"chatMessage": {"type": 0, "content": "x"}}}"#)
            .unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_default_receives_raw_frame() {
        let callbacks = Callbacks::new();
        let seen = recorder(&callbacks, "default");

        let routed = callbacks.resolve(r#"{"t": 42, "o": {"ndcId": 7}}"#).unwrap();
        assert_eq!(routed, EventType::Default);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].raw, json!({"t": 42, "o": {"ndcId": 7}}));
        assert_eq!(seen[0].com_id, Some(7));
    }

    #[test]
    fn test_call_without_handlers_is_noop() {
        let callbacks = Callbacks::new();
        assert_eq!(callbacks.call("on_chat_invite", &Event::default()), 0);
    }

    #[test]
    fn test_panicking_callback_is_isolated() {
        let callbacks = Callbacks::new();
        callbacks.event("on_text_message", |_| panic!("boom"));
        let seen = recorder(&callbacks, "on_text_message");

        let completed = callbacks.call("on_text_message", &Event::default());
        assert_eq!(completed, 1);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_callback_can_register_during_dispatch() {
        let callbacks = Arc::new(Callbacks::new());
        let inner = callbacks.clone();
        callbacks.event("default", move |_| {
            inner.event("default", |_| {});
        });

        callbacks.call("default", &Event::default());
        assert_eq!(callbacks.handler_count("default"), 2);
    }

    #[test]
    fn test_resolve_invalid_json() {
        let callbacks = Callbacks::new();
        assert!(matches!(
            callbacks.resolve("not json"),
            Err(DispatchError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::TextMessage.as_str(), "on_text_message");
        assert_eq!(EventType::from_name("on_user_typing_end"), Some(EventType::UserTypingEnd));
        assert_eq!(EventType::from_name("on_nothing"), None);
        assert_eq!(EventType::Default.to_string(), "default");
    }
}
