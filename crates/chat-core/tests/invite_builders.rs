//! Invite builder tests
//!
//! A stub context hands out fixed sentinel entities and records every
//! sub-payload it is asked to resolve, so the tests can check that builders
//! pass nested objects through untouched and keep the returned instances.

use std::sync::{Arc, Mutex};
use std::thread;

use chat_core::marshal::into_payload;
use chat_core::{
    CastError, ChannelType, Guild, GuildChannel, Invite, InviteMetadata, MarshalError,
    MarshalResult, Payload, ResolutionContext, Snowflake, User,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

// ============================================================================
// Fixtures
// ============================================================================

type Calls = Vec<(&'static str, Option<Payload>)>;

struct StubContext {
    guild: Arc<Guild>,
    channel: Arc<GuildChannel>,
    user: Arc<User>,
    calls: Mutex<Calls>,
}

impl StubContext {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            guild: Arc::new(Guild {
                id: Snowflake::new(1),
                name: "sentinel guild".to_string(),
                icon: None,
                splash: None,
                banner: None,
                description: None,
                features: Vec::new(),
                verification_level: None,
                vanity_url_code: None,
                owner_id: None,
            }),
            channel: Arc::new(GuildChannel {
                id: Snowflake::new(2),
                guild_id: Some(Snowflake::new(1)),
                name: "sentinel channel".to_string(),
                channel_type: ChannelType::GuildText,
                position: 0,
                topic: None,
                nsfw: false,
                parent_id: None,
            }),
            user: Arc::new(User {
                id: Snowflake::new(3),
                username: "sentinel".to_string(),
                discriminator: "0001".to_string(),
                avatar: None,
                bot: false,
                system: false,
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, kind: &'static str, payload: Option<&Payload>) {
        self.calls.lock().unwrap().push((kind, payload.cloned()));
    }

    fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

impl ResolutionContext for StubContext {
    fn resolve_guild(&self, payload: Option<&Payload>) -> MarshalResult<Arc<Guild>> {
        self.record("guild", payload);
        Ok(Arc::clone(&self.guild))
    }

    fn resolve_channel(&self, payload: Option<&Payload>) -> MarshalResult<Arc<GuildChannel>> {
        self.record("channel", payload);
        Ok(Arc::clone(&self.channel))
    }

    fn resolve_user(&self, payload: Option<&Payload>) -> MarshalResult<Arc<User>> {
        self.record("user", payload);
        Ok(Arc::clone(&self.user))
    }
}

/// Context whose channel lookups always fail
struct FailingContext(Arc<StubContext>);

impl ResolutionContext for FailingContext {
    fn resolve_guild(&self, payload: Option<&Payload>) -> MarshalResult<Arc<Guild>> {
        self.0.resolve_guild(payload)
    }

    fn resolve_channel(&self, _payload: Option<&Payload>) -> MarshalResult<Arc<GuildChannel>> {
        Err(MarshalError::resolution("channel", "unknown channel"))
    }

    fn resolve_user(&self, _payload: Option<&Payload>) -> MarshalResult<Arc<User>> {
        Err(MarshalError::resolution("user", "unknown user"))
    }
}

fn payload(value: Value) -> Payload {
    into_payload(value).unwrap()
}

fn invite_payload() -> Payload {
    payload(json!({
        "code": "abc123",
        "guild": {"id": "165176875973476352", "name": "CS:GO Fraggers Only"},
        "channel": {"id": "165176875973476352", "name": "illuminati", "type": 0}
    }))
}

fn metadata_payload() -> Payload {
    payload(json!({
        "inviter": {"id": "80351110224678912", "username": "Nelly"},
        "uses": 5,
        "max_uses": 0,
        "max_age": 86400,
        "temporary": true,
        "created_at": "2020-01-01T00:00:00+00:00",
        "revoked": false
    }))
}

// ============================================================================
// Invite
// ============================================================================

#[test]
fn test_invite_passes_through_context_entities() {
    let ctx = StubContext::new();
    let raw = invite_payload();

    let invite = Invite::build(&ctx, &raw).unwrap();

    assert_eq!(invite.code(), "abc123");
    assert!(Arc::ptr_eq(invite.guild(), &ctx.guild));
    assert!(Arc::ptr_eq(invite.channel(), &ctx.channel));

    let calls = ctx.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "guild");
    assert_eq!(calls[0].1.as_ref(), raw["guild"].as_object());
    assert_eq!(calls[1].0, "channel");
    assert_eq!(calls[1].1.as_ref(), raw["channel"].as_object());
}

#[test]
fn test_invite_missing_counts_stay_absent() {
    let ctx = StubContext::new();
    let invite = Invite::build(&ctx, &invite_payload()).unwrap();

    assert_eq!(invite.approximate_presence_count(), None);
    assert_eq!(invite.approximate_member_count(), None);

    let raw = payload(json!({
        "code": "abc123",
        "approximate_presence_count": null,
        "approximate_member_count": null
    }));
    let invite = Invite::build(&ctx, &raw).unwrap();
    assert_eq!(invite.approximate_presence_count(), None);
    assert_eq!(invite.approximate_member_count(), None);
}

#[test]
fn test_invite_counts_present() {
    let ctx = StubContext::new();
    let mut raw = invite_payload();
    raw.insert("approximate_presence_count".to_string(), json!(0));
    raw.insert("approximate_member_count".to_string(), json!(1024));

    let invite = Invite::build(&ctx, &raw).unwrap();
    assert_eq!(invite.approximate_presence_count(), Some(0));
    assert_eq!(invite.approximate_member_count(), Some(1024));
}

#[test]
fn test_invite_bad_count_is_an_error() {
    let ctx = StubContext::new();
    let mut raw = invite_payload();
    raw.insert("approximate_member_count".to_string(), json!("many"));

    let err = Invite::build(&ctx, &raw).unwrap_err();
    assert_eq!(err.field(), Some("approximate_member_count"));
}

// Decision point: a missing code is tolerated and becomes an empty string.
#[test]
fn test_invite_missing_code_defaults_to_empty_string() {
    let ctx = StubContext::new();
    let raw = payload(json!({"guild": {"id": "1"}, "channel": {"id": "2"}}));

    let invite = Invite::build(&ctx, &raw).unwrap();
    assert_eq!(invite.code(), "");
}

#[test]
fn test_invite_code_of_wrong_type_is_an_error() {
    let ctx = StubContext::new();
    let raw = payload(json!({"code": 123}));

    let err = Invite::build(&ctx, &raw).unwrap_err();
    assert!(matches!(
        err,
        MarshalError::Cast { ref field, source: CastError::WrongType { expected: "string", .. } }
            if field == "code"
    ));
}

#[test]
fn test_invite_absent_sub_payloads_reach_context_as_none() {
    let ctx = StubContext::new();
    let raw = payload(json!({"code": "abc123", "guild": null}));

    Invite::build(&ctx, &raw).unwrap();

    let calls = ctx.calls();
    assert_eq!(calls, vec![("guild", None), ("channel", None)]);
}

#[test]
fn test_invite_non_object_sub_payload_is_an_error() {
    let ctx = StubContext::new();
    let raw = payload(json!({"code": "abc123", "guild": "165176875973476352"}));

    let err = Invite::build(&ctx, &raw).unwrap_err();
    assert_eq!(err.field(), Some("guild"));
    assert!(ctx.calls().is_empty());
}

#[test]
fn test_invite_target_user_only_resolved_when_present() {
    let ctx = StubContext::new();
    let invite = Invite::build(&ctx, &invite_payload()).unwrap();
    assert!(invite.target_user().is_none());
    assert!(ctx.calls().iter().all(|(kind, _)| *kind != "user"));

    let mut raw = invite_payload();
    raw.insert("target_user".to_string(), json!({"id": "3"}));
    let invite = Invite::build(&ctx, &raw).unwrap();
    assert!(Arc::ptr_eq(invite.target_user().unwrap(), &ctx.user));
}

#[test]
fn test_invite_ignores_unknown_keys() {
    let ctx = StubContext::new();
    let mut raw = invite_payload();
    raw.insert("some_future_field".to_string(), json!({"deep": [1, 2, 3]}));

    let invite = Invite::build(&ctx, &raw).unwrap();
    assert_eq!(invite, Invite::build(&ctx, &invite_payload()).unwrap());
}

#[test]
fn test_invite_propagates_resolution_failure() {
    let ctx = Arc::new(FailingContext(StubContext::new()));

    let err = Invite::build(&ctx, &invite_payload()).unwrap_err();
    assert!(matches!(err, MarshalError::Resolution { kind: "channel", .. }));
    assert!(!err.is_payload_error());
}

#[test]
fn test_invite_build_is_idempotent() {
    let ctx = StubContext::new();
    let raw = invite_payload();

    let first = Invite::build(&ctx, &raw).unwrap();
    let second = Invite::build(&ctx, &raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invite_url() {
    let ctx = StubContext::new();
    let invite = Invite::build(&ctx, &invite_payload()).unwrap();
    assert_eq!(invite.url(), "https://discord.gg/abc123");
}

#[test]
fn test_invite_context_handle_does_not_own_context() {
    let ctx = StubContext::new();
    let invite = Invite::build(&ctx, &invite_payload()).unwrap();

    assert!(invite.context().points_to(&ctx));
    assert!(invite.context().upgrade().is_some());
    assert_eq!(Arc::strong_count(&ctx), 1);

    drop(ctx);
    assert!(invite.context().is_dangling());
    assert!(invite.context().upgrade().is_none());
    // Nested entities outlive the context that handed them out
    assert_eq!(invite.guild().name, "sentinel guild");
}

#[test]
fn test_invite_rebuilt_through_upgraded_context() {
    let ctx = StubContext::new();
    let invite = Invite::build(&ctx, &invite_payload()).unwrap();

    let upgraded: Arc<dyn ResolutionContext> = invite.context().upgrade().unwrap();
    let rebuilt = Invite::build(&upgraded, &invite_payload()).unwrap();

    assert_eq!(rebuilt, invite);
    assert!(Arc::ptr_eq(rebuilt.guild(), invite.guild()));
    assert!(rebuilt.context().points_to(&ctx));
    assert_eq!(ctx.calls().len(), 4);
}

#[test]
fn test_metadata_built_from_trait_object_context() {
    let ctx = StubContext::new();
    let erased: Arc<dyn ResolutionContext> = ctx.clone();

    let meta = InviteMetadata::build(&erased, &metadata_payload()).unwrap();
    assert!(Arc::ptr_eq(meta.inviter(), &ctx.user));
    assert!(meta.context().points_to(&ctx));

    drop(erased);
    drop(ctx);
    assert!(meta.context().is_dangling());
}

#[test]
fn test_invite_build_from_many_threads() {
    let ctx = StubContext::new();
    let raw = invite_payload();
    let expected = Invite::build(&ctx, &raw).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| Invite::build(&ctx, &raw).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ============================================================================
// InviteMetadata
// ============================================================================

#[test]
fn test_metadata_full_payload() {
    let ctx = StubContext::new();
    let raw = metadata_payload();

    let meta = InviteMetadata::build(&ctx, &raw).unwrap();

    assert!(Arc::ptr_eq(meta.inviter(), &ctx.user));
    assert_eq!(meta.uses(), 5);
    assert_eq!(meta.max_uses(), 0);
    assert_eq!(meta.max_age(), 86400);
    assert!(meta.temporary());
    assert!(!meta.revoked());
    assert_eq!(
        meta.created_at(),
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    );

    let calls = ctx.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.as_ref(), raw["inviter"].as_object());
}

#[test]
fn test_metadata_defaults_for_missing_counters_and_flags() {
    let ctx = StubContext::new();
    let raw = payload(json!({
        "inviter": {"id": "1"},
        "created_at": "2020-01-01T00:00:00+00:00"
    }));

    let meta = InviteMetadata::build(&ctx, &raw).unwrap();
    assert_eq!(meta.uses(), 0);
    assert_eq!(meta.max_uses(), 0);
    assert_eq!(meta.max_age(), 0);
    assert!(!meta.temporary());
    assert!(!meta.revoked());
}

#[test]
fn test_metadata_null_counters_default_to_zero() {
    let ctx = StubContext::new();
    let raw = payload(json!({
        "uses": null,
        "max_uses": null,
        "revoked": null,
        "created_at": "2020-01-01T00:00:00+00:00"
    }));

    let meta = InviteMetadata::build(&ctx, &raw).unwrap();
    assert_eq!(meta.uses(), 0);
    assert_eq!(meta.max_uses(), 0);
    assert!(!meta.revoked());
}

#[test]
fn test_metadata_malformed_created_at_is_an_error() {
    let ctx = StubContext::new();
    let mut raw = metadata_payload();
    raw.insert("created_at".to_string(), json!("not-a-date"));

    let err = InviteMetadata::build(&ctx, &raw).unwrap_err();
    assert!(matches!(
        err,
        MarshalError::Cast { ref field, source: CastError::InvalidTimestamp { .. } }
            if field == "created_at"
    ));
}

#[test]
fn test_metadata_missing_created_at_is_an_error() {
    let ctx = StubContext::new();
    let mut raw = metadata_payload();
    raw.remove("created_at");

    let err = InviteMetadata::build(&ctx, &raw).unwrap_err();
    assert!(matches!(err, MarshalError::MissingField(ref f) if f == "created_at"));
}

#[test]
fn test_metadata_wrong_shape_counter_is_an_error() {
    let ctx = StubContext::new();
    let mut raw = metadata_payload();
    raw.insert("uses".to_string(), json!("five"));

    let err = InviteMetadata::build(&ctx, &raw).unwrap_err();
    assert_eq!(err.field(), Some("uses"));
    assert_eq!(err.code(), "INVALID_FIELD");
}

#[test]
fn test_metadata_does_not_enforce_use_limits() {
    let ctx = StubContext::new();
    let mut raw = metadata_payload();
    raw.insert("uses".to_string(), json!(10));
    raw.insert("max_uses".to_string(), json!(3));

    let meta = InviteMetadata::build(&ctx, &raw).unwrap();
    assert_eq!(meta.uses(), 10);
    assert_eq!(meta.max_uses(), 3);
}

#[test]
fn test_metadata_propagates_resolution_failure() {
    let ctx = Arc::new(FailingContext(StubContext::new()));

    let err = InviteMetadata::build(&ctx, &metadata_payload()).unwrap_err();
    assert!(matches!(err, MarshalError::Resolution { kind: "user", .. }));
}

#[test]
fn test_metadata_expiry() {
    let ctx = StubContext::new();
    let meta = InviteMetadata::build(&ctx, &metadata_payload()).unwrap();

    assert!(meta.is_unlimited());
    assert_eq!(
        meta.expires_at(),
        Some(Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap())
    );

    let mut raw = metadata_payload();
    raw.insert("max_age".to_string(), json!(0));
    raw.insert("max_uses".to_string(), json!(1));
    let meta = InviteMetadata::build(&ctx, &raw).unwrap();
    assert_eq!(meta.expires_at(), None);
    assert!(!meta.is_unlimited());
}

#[test]
fn test_metadata_build_is_idempotent() {
    let ctx = StubContext::new();
    let raw = metadata_payload();

    assert_eq!(
        InviteMetadata::build(&ctx, &raw).unwrap(),
        InviteMetadata::build(&ctx, &raw).unwrap()
    );
}
