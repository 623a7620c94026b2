#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::session::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("What is the revenue?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What is the revenue?");
        assert!(msg.relevant_pages.is_empty());
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("$5M");
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.relevant_pages.is_empty());
    }

    #[test]
    fn test_message_assistant_with_pages() {
        let msg = Message::assistant_with_pages("$5M", vec![3]);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "$5M");
        assert_eq!(msg.relevant_pages, vec![3]);
    }

    #[test]
    fn test_message_pages_skipped_when_empty() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(!json.contains("relevant_pages"));

        let json = serde_json::to_string(&Message::assistant_with_pages("a", vec![1, 2])).unwrap();
        assert!(json.contains("relevant_pages"));
    }

    #[test]
    fn test_message_pages_default_on_deserialize() {
        let msg: Message = serde_json::from_str(r#"{"role":"assistant","content":"x"}"#).unwrap();
        assert!(msg.relevant_pages.is_empty());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, r#""user""#);

        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_context_message_strips_pages() {
        let msg = Message::assistant_with_pages("See page 3", vec![3]);
        let ctx = ContextMessage::from(&msg);
        assert_eq!(ctx.role, Role::Assistant);
        assert_eq!(ctx.content, "See page 3");

        let json = serde_json::to_string(&ctx).unwrap();
        assert!(!json.contains("relevant_pages"));
        assert!(json.contains(r#""role":"assistant""#));
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new() {
        let session = Session::new(SessionId(1), "report.pdf");
        assert_eq!(session.id, SessionId(1));
        assert_eq!(session.file_name, "report.pdf");
        assert!(session.messages.is_empty());
        assert!(!session.created_at.is_empty());
    }

    #[test]
    fn test_session_id_ordering() {
        assert!(SessionId(1) < SessionId(2));
        assert_eq!(SessionId(7), SessionId(7));
        assert_eq!(SessionId(42).to_string(), "42");
    }

    #[test]
    fn test_session_last_message() {
        let mut session = Session::new(SessionId(1), "a.pdf");
        assert!(session.last_message().is_none());

        session.messages.push(Message::user("q"));
        assert_eq!(session.last_message().unwrap().role, Role::User);
    }

    #[test]
    fn test_session_last_assistant_text() {
        let mut session = Session::new(SessionId(1), "a.pdf");
        assert!(session.last_assistant_text().is_none());

        session.messages.push(Message::user("q"));
        assert!(session.last_assistant_text().is_none());

        session.messages.push(Message::assistant("answer"));
        assert_eq!(session.last_assistant_text(), Some("answer"));
    }

    #[test]
    fn test_session_serialization_roundtrip() {
        let mut session = Session::new(SessionId(9), "deck.pdf");
        session.messages.push(Message::user("hello"));
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, SessionId(9));
        assert_eq!(back.file_name, "deck.pdf");
        assert_eq!(back.messages.len(), 1);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::SessionCreated {
            id: SessionId(3),
            file_name: "report.pdf".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SessionCreated"));
        assert!(json.contains("report.pdf"));
    }

    #[test]
    fn test_chat_event_active_changed_none() {
        let event = ChatEvent::ActiveSessionChanged { id: None };
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, ChatEvent::ActiveSessionChanged { id: None }));
    }

    #[test]
    fn test_chat_event_reply_discarded() {
        let event = ChatEvent::ReplyDiscarded {
            session_id: SessionId(5),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        if let ChatEvent::ReplyDiscarded { session_id } = back {
            assert_eq!(session_id, SessionId(5));
        } else {
            panic!("Wrong variant");
        }
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.backend.base_url, DEFAULT_BACKEND_URL);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Backend("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Backend error: HTTP 500");

        let err = ChatError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = ChatError::Config("bad url".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }

    #[test]
    fn test_error_clone() {
        let err = ChatError::Network("timeout".to_string());
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
