//! Resolution context - the authority that owns canonical entities
//!
//! Builders never construct nested guilds, channels or users themselves.
//! They hand the embedded sub-payload to a context, which decides whether
//! to parse it fresh or return an instance it already holds.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::entities::{Guild, GuildChannel, User};
use crate::error::MarshalResult;
use crate::marshal::Payload;

/// Maps embedded sub-payloads to canonical, possibly cached entities.
///
/// `None` means the parent payload had no such sub-object (or it was
/// `null`); each implementation defines what it returns in that case.
/// Implementations must be safe to call from several threads at once.
pub trait ResolutionContext: Send + Sync {
    /// Resolve a guild sub-payload
    fn resolve_guild(&self, payload: Option<&Payload>) -> MarshalResult<Arc<Guild>>;

    /// Resolve a channel sub-payload
    fn resolve_channel(&self, payload: Option<&Payload>) -> MarshalResult<Arc<GuildChannel>>;

    /// Resolve a user sub-payload
    fn resolve_user(&self, payload: Option<&Payload>) -> MarshalResult<Arc<User>>;
}

/// A context that can be referred to through a [`ContextHandle`].
///
/// Implemented for every concrete context and for `dyn ResolutionContext`,
/// so builders accept both `Arc<MyContext>` and the `Arc` returned by
/// [`ContextHandle::upgrade`].
pub trait ContextSource: ResolutionContext {
    /// Downgrade `this` to a type-erased weak reference
    fn weak_context(this: &Arc<Self>) -> Weak<dyn ResolutionContext>;
}

impl<C> ContextSource for C
where
    C: ResolutionContext + 'static,
{
    fn weak_context(this: &Arc<Self>) -> Weak<dyn ResolutionContext> {
        Arc::<C>::downgrade(this)
    }
}

impl ContextSource for dyn ResolutionContext {
    fn weak_context(this: &Arc<Self>) -> Weak<dyn ResolutionContext> {
        Arc::downgrade(this)
    }
}

/// Non-owning back-reference from an entity to the context that built it.
///
/// Holding a handle never keeps the context alive.
#[derive(Clone)]
pub struct ContextHandle(Weak<dyn ResolutionContext>);

impl ContextHandle {
    /// Create a handle pointing at `ctx`
    pub fn new<C>(ctx: &Arc<C>) -> Self
    where
        C: ContextSource + ?Sized,
    {
        Self(C::weak_context(ctx))
    }

    /// Get the context back, if it is still alive
    pub fn upgrade(&self) -> Option<Arc<dyn ResolutionContext>> {
        self.0.upgrade()
    }

    /// Check if the context has been dropped
    #[inline]
    pub fn is_dangling(&self) -> bool {
        self.0.strong_count() == 0
    }

    /// Check if this handle points at `ctx`
    pub fn points_to<C>(&self, ctx: &Arc<C>) -> bool
    where
        C: ContextSource + ?Sized,
    {
        self == &Self::new(ctx)
    }
}

impl PartialEq for ContextHandle {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ContextHandle {}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHandle")
            .field("alive", &!self.is_dangling())
            .finish()
    }
}
