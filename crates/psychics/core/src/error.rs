//! Error infrastructure for psychics-core.
//!
//! Expected cast rejections are *not* errors: they are returned as
//! [`TestResult`](crate::TestResult) values. [`PsychicError`] covers the two
//! remaining failure families:
//!
//! - **Unavailable handles**: a weak back-reference (ability → psychic,
//!   psychic → esper, esper → entity) whose target is gone.
//! - **Invalid state**: API misuse such as operating on a destroyed or
//!   disabled psychic, starting a second channel, or re-entering a hook.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the target went away; the caller can drop the request
/// - **Validation**: the request does not fit the configured concept
/// - **Internal**: the API was used in a state it does not allow
/// - **Fatal**: reserved for corrupted bookkeeping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates misuse or a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Failures raised by ability, psychic and esper operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PsychicError {
    /// The external entity behind an esper has been released.
    #[error("entity is no longer available")]
    EntityUnavailable,

    /// A psychic outlived the esper it was attached to.
    #[error("esper is no longer available")]
    EsperUnavailable,

    /// An ability outlived the psychic that owned it.
    #[error("psychic is no longer available")]
    PsychicUnavailable,

    /// The psychic has been destroyed.
    #[error("psychic `{0}` has been destroyed")]
    Destroyed(String),

    /// The psychic exists but is disabled.
    #[error("psychic `{0}` is disabled")]
    Disabled(String),

    /// A channel is already in flight on this psychic.
    #[error("psychic is already channeling `{0}`")]
    ChannelActive(String),

    /// An ability hook was entered while the same ability was still running one.
    #[error("ability `{0}` is already running a hook")]
    AbilityBusy(String),

    #[error("ability `{0}` does not define damage")]
    DamageUndefined(String),

    #[error("ability `{0}` does not define healing")]
    HealingUndefined(String),

    /// A concrete ability reported a failure from `on_cast`.
    #[error("ability `{ability}` failed: {message}")]
    Behavior { ability: String, message: String },
}

impl PsychicError {
    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EntityUnavailable | Self::EsperUnavailable | Self::PsychicUnavailable => {
                ErrorSeverity::Recoverable
            }
            Self::DamageUndefined(_) | Self::HealingUndefined(_) => ErrorSeverity::Validation,
            Self::Behavior { .. } => ErrorSeverity::Recoverable,
            Self::Destroyed(_) | Self::Disabled(_) | Self::ChannelActive(_) => {
                ErrorSeverity::Internal
            }
            Self::AbilityBusy(_) => ErrorSeverity::Internal,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EntityUnavailable => "ENTITY_UNAVAILABLE",
            Self::EsperUnavailable => "ESPER_UNAVAILABLE",
            Self::PsychicUnavailable => "PSYCHIC_UNAVAILABLE",
            Self::Destroyed(_) => "PSYCHIC_DESTROYED",
            Self::Disabled(_) => "PSYCHIC_DISABLED",
            Self::ChannelActive(_) => "CHANNEL_ACTIVE",
            Self::AbilityBusy(_) => "ABILITY_BUSY",
            Self::DamageUndefined(_) => "DAMAGE_UNDEFINED",
            Self::HealingUndefined(_) => "HEALING_UNDEFINED",
            Self::Behavior { .. } => "ABILITY_BEHAVIOR",
        }
    }
}

pub type Result<T> = std::result::Result<T, PsychicError>;

/// Error type returned by persistence hooks (`on_save` / `on_load`).
///
/// Hook failures never escape the save/load boundary; they are logged and
/// the surrounding operation continues.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

pub type HookResult = std::result::Result<(), HookError>;
