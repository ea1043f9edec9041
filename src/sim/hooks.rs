//! Item behavior hooks
//!
//! Items never attach closures to the simulation. Each item's registration
//! function returns a list of tagged [`Hook`]s for its current stack count;
//! the [`HookSet`] stores one list per source (item or synergy), replacing it
//! wholesale on re-registration, and folds everything into [`Modifiers`] that
//! the tick and the typing resolver read at their extension points.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single behavior contributed by an item or synergy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Hook {
    // Passive stats
    MaxHealth(f32),
    FlatDamage(f32),
    CritChance(f32),
    CritMultiplier(f32),
    DamageReduction(f32),
    ProjectileSpeed(f32),
    EnemySlow(f32),

    // Key press
    VowelHeal(f32),
    ConsonantDamage(f32),
    InstantComplete(f32),
    AutoCompleteTail(u32),

    // Word complete
    EchoShot(f32),
    PerfectWordBonus(f32),
    LongWordBonus { min_len: usize, bonus: f32 },
    ShortWordBonus { max_len: usize, bonus: f32 },
    ExtraProjectiles { min_len: usize, count: u32 },
    FreezeEnemies(f32),
    Barrage,

    // Projectile update
    WallBounce(u32),
    BounceDamage(f32),

    // Projectile hit
    Ricochet { count: u32, falloff: f32 },
    Pierce(u32),
    Splash { radius: f32, fraction: f32 },
    SlowOnHit { factor: f32, secs: f32 },
    Knockback(f32),
    EliteBonus(f32),

    // Enemy killed
    BonusXp(u32),
    XpMultiplier(u32),
    ChainDamage(f32),
    RecursiveShot(f32),
    Lifesteal(f32),

    // Player damaged
    SurviveFatal(u32),
    LastStand,

    // Per tick
    AutoType(f32),
    Aura { radius: f32, dps: f32 },

    // Wave start
    WaveHeal(f32),
}

/// Aggregated effect of every registered hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifiers {
    pub max_health: f32,
    pub flat_damage: f32,
    pub crit_chance: f32,
    /// Damage multiplier on a critical hit
    pub crit_multiplier: f32,
    /// Fraction of incoming contact damage ignored (capped at 0.8)
    pub damage_reduction: f32,
    pub projectile_speed: f32,
    /// Fraction of enemy speed removed (capped at 0.6)
    pub enemy_slow: f32,

    pub vowel_heal: f32,
    pub consonant_damage: f32,
    pub instant_complete: f32,
    pub auto_complete_tail: u32,

    pub echo_chance: f32,
    pub perfect_bonus: f32,
    pub long_word: Vec<(usize, f32)>,
    pub short_word: Vec<(usize, f32)>,
    pub extra_projectiles: Vec<(usize, u32)>,
    pub freeze_secs: f32,
    pub barrage: bool,

    pub wall_bounces: u32,
    pub bounce_damage: f32,
    pub ricochets: u32,
    pub ricochet_falloff: f32,
    pub pierce: u32,
    pub splash_radius: f32,
    pub splash_fraction: f32,
    pub slow_on_hit: Option<(f32, f32)>,
    pub knockback: f32,
    pub elite_bonus: f32,

    pub bonus_xp: u32,
    pub xp_multiplier: u32,
    pub chain_damage: f32,
    pub recursive_chance: f32,
    pub lifesteal: f32,

    pub survive_fatal: u32,
    pub last_stand: bool,

    /// Seconds between ghostwriter keystrokes
    pub auto_type_interval: Option<f32>,
    pub aura: Option<(f32, f32)>,

    pub wave_heal: f32,
}

/// Base crit multiplier before critical_letter stacks
pub const BASE_CRIT_MULTIPLIER: f32 = 2.0;

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            max_health: 0.0,
            flat_damage: 0.0,
            crit_chance: 0.0,
            crit_multiplier: BASE_CRIT_MULTIPLIER,
            damage_reduction: 0.0,
            projectile_speed: 0.0,
            enemy_slow: 0.0,
            vowel_heal: 0.0,
            consonant_damage: 0.0,
            instant_complete: 0.0,
            auto_complete_tail: 0,
            echo_chance: 0.0,
            perfect_bonus: 0.0,
            long_word: Vec::new(),
            short_word: Vec::new(),
            extra_projectiles: Vec::new(),
            freeze_secs: 0.0,
            barrage: false,
            wall_bounces: 0,
            bounce_damage: 0.0,
            ricochets: 0,
            ricochet_falloff: 0.0,
            pierce: 0,
            splash_radius: 0.0,
            splash_fraction: 0.0,
            slow_on_hit: None,
            knockback: 0.0,
            elite_bonus: 0.0,
            bonus_xp: 0,
            xp_multiplier: 1,
            chain_damage: 0.0,
            recursive_chance: 0.0,
            lifesteal: 0.0,
            survive_fatal: 0,
            last_stand: false,
            auto_type_interval: None,
            aura: None,
            wave_heal: 0.0,
        }
    }
}

impl Modifiers {
    fn apply(&mut self, hook: &Hook) {
        match *hook {
            Hook::MaxHealth(v) => self.max_health += v,
            Hook::FlatDamage(v) => self.flat_damage += v,
            Hook::CritChance(v) => self.crit_chance = (self.crit_chance + v).min(1.0),
            Hook::CritMultiplier(v) => self.crit_multiplier += v,
            Hook::DamageReduction(v) => {
                self.damage_reduction = (self.damage_reduction + v).min(0.8)
            }
            Hook::ProjectileSpeed(v) => self.projectile_speed += v,
            Hook::EnemySlow(v) => self.enemy_slow = (self.enemy_slow + v).min(0.6),
            Hook::VowelHeal(v) => self.vowel_heal += v,
            Hook::ConsonantDamage(v) => self.consonant_damage += v,
            Hook::InstantComplete(v) => {
                self.instant_complete = (self.instant_complete + v).min(1.0)
            }
            Hook::AutoCompleteTail(n) => self.auto_complete_tail += n,
            Hook::EchoShot(v) => self.echo_chance = (self.echo_chance + v).min(1.0),
            Hook::PerfectWordBonus(v) => self.perfect_bonus += v,
            Hook::LongWordBonus { min_len, bonus } => self.long_word.push((min_len, bonus)),
            Hook::ShortWordBonus { max_len, bonus } => self.short_word.push((max_len, bonus)),
            Hook::ExtraProjectiles { min_len, count } => {
                self.extra_projectiles.push((min_len, count))
            }
            Hook::FreezeEnemies(v) => self.freeze_secs += v,
            Hook::Barrage => self.barrage = true,
            Hook::WallBounce(n) => self.wall_bounces += n,
            Hook::BounceDamage(v) => self.bounce_damage += v,
            Hook::Ricochet { count, falloff } => {
                self.ricochets += count;
                self.ricochet_falloff = self.ricochet_falloff.max(falloff);
            }
            Hook::Pierce(n) => self.pierce += n,
            Hook::Splash { radius, fraction } => {
                self.splash_radius += radius;
                self.splash_fraction += fraction;
            }
            Hook::SlowOnHit { factor, secs } => {
                let (f, s) = self.slow_on_hit.unwrap_or((0.0, 0.0));
                self.slow_on_hit = Some(((f + factor).min(0.9), s.max(secs)));
            }
            Hook::Knockback(v) => self.knockback += v,
            Hook::EliteBonus(v) => self.elite_bonus += v,
            Hook::BonusXp(n) => self.bonus_xp += n,
            Hook::XpMultiplier(n) => self.xp_multiplier *= n.max(1),
            Hook::ChainDamage(v) => self.chain_damage += v,
            Hook::RecursiveShot(v) => {
                self.recursive_chance = (self.recursive_chance + v).min(1.0)
            }
            Hook::Lifesteal(v) => self.lifesteal += v,
            Hook::SurviveFatal(n) => self.survive_fatal += n,
            Hook::LastStand => self.last_stand = true,
            Hook::AutoType(interval) => {
                // Multiple sources type at the fastest rate
                let current = self.auto_type_interval.unwrap_or(f32::MAX);
                self.auto_type_interval = Some(current.min(interval.max(0.1)));
            }
            Hook::Aura { radius, dps } => {
                let (r, d) = self.aura.unwrap_or((0.0, 0.0));
                self.aura = Some((r.max(radius), d + dps));
            }
            Hook::WaveHeal(v) => self.wave_heal += v,
        }
    }
}

/// Registered hooks, one list per source
#[derive(Debug, Clone, Default)]
pub struct HookSet {
    sources: BTreeMap<&'static str, Vec<Hook>>,
    modifiers: Modifiers,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hooks of `source` with `hooks`
    pub fn register(&mut self, source: &'static str, hooks: Vec<Hook>) {
        self.sources.insert(source, hooks);
        self.rebuild();
    }

    /// Drop every hook of `source`
    pub fn unregister(&mut self, source: &str) {
        if self.sources.remove(source).is_some() {
            self.rebuild();
        }
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.modifiers = Modifiers::default();
    }

    /// Hooks of a single source
    pub fn hooks_for(&self, source: &str) -> &[Hook] {
        self.sources.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of registered hooks
    pub fn len(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn rebuild(&mut self) {
        let mut modifiers = Modifiers::default();
        for hook in self.sources.values().flatten() {
            modifiers.apply(hook);
        }
        self.modifiers = modifiers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistration_replaces() {
        let mut hooks = HookSet::new();
        hooks.register("papercut", vec![Hook::FlatDamage(1.0)]);
        hooks.register("papercut", vec![Hook::FlatDamage(2.0)]);
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks.modifiers().flat_damage, 2.0);
    }

    #[test]
    fn test_sources_accumulate() {
        let mut hooks = HookSet::new();
        hooks.register("papercut", vec![Hook::FlatDamage(3.0)]);
        hooks.register("blood_ink", vec![Hook::FlatDamage(5.0), Hook::Lifesteal(2.0)]);
        assert_eq!(hooks.modifiers().flat_damage, 8.0);
        assert_eq!(hooks.hooks_for("blood_ink").len(), 2);

        hooks.unregister("blood_ink");
        assert_eq!(hooks.modifiers().flat_damage, 3.0);
        assert_eq!(hooks.modifiers().lifesteal, 0.0);
    }

    #[test]
    fn test_caps() {
        let mut hooks = HookSet::new();
        hooks.register("a", vec![Hook::DamageReduction(0.5), Hook::EnemySlow(0.5)]);
        hooks.register("b", vec![Hook::DamageReduction(0.5), Hook::EnemySlow(0.5)]);
        assert_eq!(hooks.modifiers().damage_reduction, 0.8);
        assert_eq!(hooks.modifiers().enemy_slow, 0.6);
    }

    #[test]
    fn test_ricochet_falloff_takes_best() {
        let mut hooks = HookSet::new();
        hooks.register("ricochet_rune", vec![Hook::Ricochet { count: 2, falloff: 0.6 }]);
        hooks.register("pinball_wizard", vec![Hook::Ricochet { count: 0, falloff: 1.0 }]);
        assert_eq!(hooks.modifiers().ricochets, 2);
        assert_eq!(hooks.modifiers().ricochet_falloff, 1.0);
    }

    #[test]
    fn test_auto_type_uses_fastest() {
        let mut hooks = HookSet::new();
        hooks.register("a", vec![Hook::AutoType(6.0)]);
        hooks.register("b", vec![Hook::AutoType(2.0)]);
        assert_eq!(hooks.modifiers().auto_type_interval, Some(2.0));
    }
}
