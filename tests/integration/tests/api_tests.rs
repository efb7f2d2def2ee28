//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_conversations_require_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/conversations").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/v1/conversations", "not-a-real-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Send Message Tests
// ============================================================================

#[tokio::test]
async fn test_first_message_creates_conversation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();

    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.content.as_deref(), Some("hi"));
    assert_eq!(message.sender.id, alice.id.to_string());
    assert_eq!(message.receiver_id, bob.id.to_string());
    assert!(!message.read);
    assert!(!message.conversation_id.is_empty());
}

#[tokio::test]
async fn test_conversation_is_symmetric() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    // First contact from Alice's side
    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hello from alice"),
        )
        .await
        .unwrap();
    let first: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Reply from Bob's side lands in the same conversation
    let response = server
        .post_auth(
            "/api/v1/messages",
            &bob.token,
            &SendMessageBody::text(&alice, "hello from bob"),
        )
        .await
        .unwrap();
    let second: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(first.conversation_id, second.conversation_id);
}

#[tokio::test]
async fn test_self_message_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let carol = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &carol.token,
            &SendMessageBody::text(&carol, "hi"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Nothing was created
    let response = server
        .get_auth("/api/v1/conversations", &carol.token)
        .await
        .unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(conversations.is_empty());
}

#[tokio::test]
async fn test_empty_payload_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let body = SendMessageBody {
        receiver_id: bob.id.to_string(),
        content: None,
        media_url: None,
        media_type: None,
    };
    let response = server
        .post_auth("/api/v1/messages", &alice.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_media_requires_type() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let body = SendMessageBody {
        receiver_id: bob.id.to_string(),
        content: None,
        media_url: Some("https://cdn.example.com/photo.jpg".to_string()),
        media_type: None,
    };
    let response = server
        .post_auth("/api/v1/messages", &alice.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_media_message_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let body = SendMessageBody {
        receiver_id: bob.id.to_string(),
        content: Some("look at this".to_string()),
        media_url: Some("https://cdn.example.com/photo.jpg".to_string()),
        media_type: Some("image".to_string()),
    };
    let response = server
        .post_auth("/api/v1/messages", &alice.token, &body)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.content.as_deref(), Some("look at this"));
    assert_eq!(
        message.media_url.as_deref(),
        Some("https://cdn.example.com/photo.jpg")
    );
    assert_eq!(message.media_type.as_deref(), Some("image"));
}

#[tokio::test]
async fn test_unknown_receiver_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();

    let body = SendMessageBody {
        receiver_id: "999999999999999999".to_string(),
        content: Some("hi".to_string()),
        media_url: None,
        media_type: None,
    };
    let response = server
        .post_auth("/api/v1/messages", &alice.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Conversation History and Read-State Tests
// ============================================================================

#[tokio::test]
async fn test_viewing_conversation_marks_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();

    // Bob opens the conversation; the message flips to read in the response
    let path = format!("/api/v1/conversations/{}/messages", alice.id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].read);

    // Idempotent: a second view leaves the same state
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].read);
}

#[tokio::test]
async fn test_sender_view_does_not_mark_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();

    // Alice re-reading her own sent message does not flip Bob's read flag
    let path = format!("/api/v1/conversations/{}/messages", bob.id);
    let response = server.get_auth(&path, &alice.token).await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert!(!messages[0].read);
}

#[tokio::test]
async fn test_messages_are_ascending_and_paginated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    for i in 0..5 {
        server
            .post_auth(
                "/api/v1/messages",
                &alice.token,
                &SendMessageBody::text(&bob, &format!("message {i}")),
            )
            .await
            .unwrap();
    }

    // First page, oldest first
    let path = format!("/api/v1/conversations/{}/messages?limit=3", alice.id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let page: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].content.as_deref(), Some("message 0"));

    let mut last_id = 0i64;
    for message in &page {
        let id: i64 = message.id.parse().unwrap();
        assert!(id > last_id, "messages should be ascending");
        last_id = id;
    }

    // Next page resumes after the cursor
    let path = format!(
        "/api/v1/conversations/{}/messages?limit=3&after={}",
        alice.id,
        page.last().unwrap().id
    );
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let next: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(next.len(), 2);
    assert_eq!(next[0].content.as_deref(), Some("message 3"));
    assert_eq!(next[1].content.as_deref(), Some("message 4"));
}

#[tokio::test]
async fn test_history_with_stranger_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let stranger = TestUser::create(&server).await.unwrap();

    let path = format!("/api/v1/conversations/{}/messages", stranger.id);
    let response = server.get_auth(&path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Conversation List Tests
// ============================================================================

#[tokio::test]
async fn test_conversation_list_shows_last_message_and_unread() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "first"),
        )
        .await
        .unwrap();
    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "second"),
        )
        .await
        .unwrap();

    // Bob sees one conversation with Alice, two unread, newest last message
    let response = server.get_auth("/api/v1/conversations", &bob.token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(conversations.len(), 1);
    let row = &conversations[0];
    assert_eq!(row.other_user.id, alice.id.to_string());
    assert_eq!(row.unread_count, 2);
    assert_eq!(
        row.last_message.as_ref().unwrap().content.as_deref(),
        Some("second")
    );

    // Viewing the conversation clears the unread count
    let path = format!("/api/v1/conversations/{}/messages", alice.id);
    server.get_auth(&path, &bob.token).await.unwrap();

    let response = server.get_auth("/api/v1/conversations", &bob.token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations[0].unread_count, 0);

    // The sender has no unread messages in this conversation
    let response = server.get_auth("/api/v1/conversations", &alice.token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].unread_count, 0);
}

#[tokio::test]
async fn test_conversation_list_ordered_by_activity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();
    let carol = TestUser::create(&server).await.unwrap();

    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "to bob"),
        )
        .await
        .unwrap();
    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&carol, "to carol"),
        )
        .await
        .unwrap();

    // Carol's conversation has the most recent activity
    let response = server.get_auth("/api/v1/conversations", &alice.token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].other_user.id, carol.id.to_string());
    assert_eq!(conversations[1].other_user.id, bob.id.to_string());

    // A new message to Bob moves that conversation back to the top
    server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "to bob again"),
        )
        .await
        .unwrap();

    let response = server.get_auth("/api/v1/conversations", &alice.token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations[0].other_user.id, bob.id.to_string());
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_set_and_overwrite() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // First reaction
    let path = format!("/api/v1/messages/{}/reaction", message.id);
    let response = server
        .put_auth(
            &path,
            &bob.token,
            &SetReactionBody {
                emoji: "❤️".to_string(),
            },
        )
        .await
        .unwrap();
    let reaction: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reaction.emoji, "❤️");
    assert_eq!(reaction.user.id, bob.id.to_string());

    // Overwrite with a new emoji
    let response = server
        .put_auth(
            &path,
            &bob.token,
            &SetReactionBody {
                emoji: "😂".to_string(),
            },
        )
        .await
        .unwrap();
    let reaction: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reaction.emoji, "😂");

    // Exactly one reaction remains, holding the latest emoji
    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let groups: Vec<ReactionGroupResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].emoji, "😂");
    assert_eq!(groups[0].count, 1);
    assert_eq!(groups[0].users.len(), 1);
    assert_eq!(groups[0].users[0].id, bob.id.to_string());
}

#[tokio::test]
async fn test_reactions_group_by_emoji() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Both participants react with the same emoji
    let path = format!("/api/v1/messages/{}/reaction", message.id);
    for user in [&alice, &bob] {
        server
            .put_auth(
                &path,
                &user.token,
                &SetReactionBody {
                    emoji: "👍".to_string(),
                },
            )
            .await
            .unwrap();
    }

    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let response = server.get_auth(&path, &alice.token).await.unwrap();
    let groups: Vec<ReactionGroupResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[0].users.len(), 2);
}

#[tokio::test]
async fn test_clear_reaction_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reaction", message.id);

    // Clearing with no existing reaction succeeds
    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Set then clear
    server
        .put_auth(
            &path,
            &bob.token,
            &SetReactionBody {
                emoji: "🔥".to_string(),
            },
        )
        .await
        .unwrap();
    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Nothing remains
    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let groups: Vec<ReactionGroupResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_free_form_emoji_accepted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Any short string is stored verbatim
    let path = format!("/api/v1/messages/{}/reaction", message.id);
    let response = server
        .put_auth(
            &path,
            &bob.token,
            &SetReactionBody {
                emoji: ":custom_blob:".to_string(),
            },
        )
        .await
        .unwrap();
    let reaction: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reaction.emoji, ":custom_blob:");
}

#[tokio::test]
async fn test_outsider_cannot_react() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();
    let eve = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "hi"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reaction", message.id);
    let response = server
        .put_auth(
            &path,
            &eve.token,
            &SetReactionBody {
                emoji: "👀".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Message and User Lookup Tests
// ============================================================================

#[tokio::test]
async fn test_outsider_cannot_read_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();
    let eve = TestUser::create(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/messages",
            &alice.token,
            &SendMessageBody::text(&bob, "secret"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}", message.id);
    let response = server.get_auth(&path, &eve.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_unknown_message_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();

    let response = server
        .get_auth("/api/v1/messages/999999999999999999", &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_get_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::create(&server).await.unwrap();
    let bob = TestUser::create(&server).await.unwrap();

    let path = format!("/api/v1/users/{}", bob.id);
    let response = server.get_auth(&path, &alice.token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.username, bob.username);

    let response = server
        .get_auth("/api/v1/users/999999999999999999", &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
