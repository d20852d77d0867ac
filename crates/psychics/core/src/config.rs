/// Tunable parameters shared by every esper of one manager.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PsychicsConfig {
    /// Attack damage granted per entity level.
    pub attack_damage_per_level: f64,
    /// Upper bound for the level-derived attack damage.
    pub attack_damage_max: f64,
    /// Ticks between automatic saves of every esper. Zero disables autosave.
    pub autosave_interval: u64,
}

impl PsychicsConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_DAMAGE_PER_LEVEL: f64 = 0.4;
    pub const DEFAULT_ATTACK_DAMAGE_MAX: f64 = 25.0;
    /// Five minutes at 20 ticks per second.
    pub const DEFAULT_AUTOSAVE_INTERVAL: u64 = 6000;

    pub fn new() -> Self {
        Self {
            attack_damage_per_level: Self::DEFAULT_ATTACK_DAMAGE_PER_LEVEL,
            attack_damage_max: Self::DEFAULT_ATTACK_DAMAGE_MAX,
            autosave_interval: Self::DEFAULT_AUTOSAVE_INTERVAL,
        }
    }

    pub fn with_autosave_interval(mut self, autosave_interval: u64) -> Self {
        self.autosave_interval = autosave_interval;
        self
    }
}

impl Default for PsychicsConfig {
    fn default() -> Self {
        Self::new()
    }
}
