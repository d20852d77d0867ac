//! Hook contract implemented by every concrete ability.

use bitflags::bitflags;

use super::Ability;
use super::cast::Cast;
use crate::error::{HookResult, Result};
use crate::psychic::Channel;
use crate::section::ConfigSection;

/// Trigger actions an active ability can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WandAction {
    LeftClick,
    RightClick,
}

bitflags! {
    /// Set of [`WandAction`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WandActions: u8 {
        const LEFT_CLICK = 0b01;
        const RIGHT_CLICK = 0b10;
    }
}

impl From<WandAction> for WandActions {
    fn from(action: WandAction) -> Self {
        match action {
            WandAction::LeftClick => Self::LEFT_CLICK,
            WandAction::RightClick => Self::RIGHT_CLICK,
        }
    }
}

impl WandActions {
    pub fn allows(self, action: WandAction) -> bool {
        self.contains(action.into())
    }
}

/// Whether an ability is cast explicitly or only reacts to lifecycle hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Never cast; `try_cast` always reports `FailedAction`.
    Passive,
    /// Cast through `try_cast` with one of the allowed actions.
    Active(WandActions),
}

impl Activation {
    /// Active ability reacting to every trigger action.
    pub const ANY_ACTION: Self = Self::Active(WandActions::all());

    pub fn allowed_actions(self) -> WandActions {
        match self {
            Self::Passive => WandActions::empty(),
            Self::Active(actions) => actions,
        }
    }
}

/// Behaviour of one ability kind.
///
/// All hooks default to no-ops. The owning psychic calls the lifecycle hooks
/// in this order: `on_initialize`, `on_attach`, `on_enable` on attach, and
/// `on_disable`, `on_detach` on destroy. `on_cast` runs either directly from
/// [`Ability::cast`] or after a completed channel (preceded by `on_channel`).
///
/// Hooks receive the [`Ability`] they belong to. Calling back into the same
/// ability's hook dispatch from inside a hook yields
/// [`PsychicError::AbilityBusy`](crate::PsychicError::AbilityBusy).
pub trait AbilityBehavior {
    fn activation(&self) -> Activation {
        Activation::Passive
    }

    fn on_initialize(&mut self, _ability: &Ability) {}

    fn on_attach(&mut self, _ability: &Ability) {}

    fn on_detach(&mut self, _ability: &Ability) {}

    /// Writes ability-specific state next to the persisted cooldown.
    fn on_save(&mut self, _ability: &Ability, _section: &mut ConfigSection) -> HookResult {
        Ok(())
    }

    /// Restores state written by [`AbilityBehavior::on_save`].
    fn on_load(&mut self, _ability: &Ability, _section: &ConfigSection) -> HookResult {
        Ok(())
    }

    fn on_enable(&mut self, _ability: &Ability) {}

    fn on_disable(&mut self, _ability: &Ability) {}

    /// Performs the ability's effect. Implementations normally call
    /// [`Ability::exhaust`] exactly once here.
    fn on_cast(&mut self, _ability: &Ability, _cast: &Cast) -> Result<()> {
        Ok(())
    }

    /// Runs when a channel completes, right before `on_cast`.
    fn on_channel(&mut self, _ability: &Ability, _channel: &Channel) {}

    /// Runs instead of `on_cast` when a channel is interrupted.
    fn on_interrupt(&mut self, _ability: &Ability, _channel: &Channel) {}
}
