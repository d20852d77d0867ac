use std::any::Any;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use super::Ability;
use super::behavior::WandAction;
use crate::stats::DamageType;

/// Opaque host data carried through a cast (trigger event, target).
pub type Payload = Rc<dyn Any>;

/// Picks the target of a cast. `None` aborts the cast with `FailedTarget`.
pub type Targeter = Rc<dyn Fn(&Ability) -> Option<Payload>>;

/// Context handed to `on_cast`, either immediately or after a channel.
#[derive(Clone)]
pub struct Cast {
    pub event: Payload,
    pub action: WandAction,
    pub target: Option<Payload>,
}

impl Cast {
    pub fn new(event: Payload, action: WandAction, target: Option<Payload>) -> Self {
        Self {
            event,
            action,
            target,
        }
    }

    pub fn event_as<T: Any>(&self) -> Option<&T> {
        (*self.event).downcast_ref::<T>()
    }

    pub fn target_as<T: Any>(&self) -> Option<&T> {
        self.target.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cast")
            .field("action", &self.action)
            .field("has_target", &self.target.is_some())
            .finish_non_exhaustive()
    }
}

/// Per-call overrides for [`Ability::try_cast_with`].
///
/// Unset fields fall back to the concept's casting time and cost and to the
/// ability's own targeter.
#[derive(Clone, Default)]
pub struct CastOptions {
    pub(crate) casting_time: Option<u64>,
    pub(crate) cost: Option<f64>,
    pub(crate) targeter: Option<Option<Targeter>>,
}

impl CastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn casting_time(mut self, ticks: u64) -> Self {
        self.casting_time = Some(ticks);
        self
    }

    #[must_use]
    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost.max(0.0));
        self
    }

    #[must_use]
    pub fn targeter(mut self, targeter: Targeter) -> Self {
        self.targeter = Some(Some(targeter));
        self
    }

    /// Skips targeting even if the ability has a targeter installed.
    #[must_use]
    pub fn without_targeter(mut self) -> Self {
        self.targeter = Some(None);
        self
    }
}

/// Damage the host should apply on behalf of an ability.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    pub kind: DamageType,
    pub amount: f64,
    pub knockback: f64,
    /// Entity credited with the damage.
    pub source: Uuid,
}
