//! Effect applicator: folds percentage trait deltas into a new vector.

use crate::schema::traits::{NumericTrait, TraitVector};
use crate::schema::trigger::Effect;

pub const TRAIT_MIN: f32 = 0.0;
pub const TRAIT_MAX: f32 = 100.0;

/// Apply `effects` in order and return the result; `base` is left untouched.
///
/// Each effect scales the trait's *current* value, so earlier effects in the
/// list compound into later ones: `new = clamp(v + v * modifier / 100)`.
/// Effects naming a non-numeric or unconfigured trait are skipped. Durations
/// are not interpreted here.
pub fn apply_effects(base: &TraitVector, effects: &[Effect]) -> TraitVector {
    let mut traits = base.clone();
    for effect in effects {
        let Some(key) = NumericTrait::from_name(&effect.trait_name) else {
            tracing::warn!("ignoring effect on non-numeric trait '{}'", effect.trait_name);
            continue;
        };
        let Some(slot) = traits.slot_mut(key) else {
            tracing::debug!("ignoring effect on unconfigured trait {}", key);
            continue;
        };
        let current = *slot;
        let delta = current * effect.modifier / 100.0;
        *slot = (current + delta).clamp(TRAIT_MIN, TRAIT_MAX);
        tracing::trace!("{}: {} -> {} ({:+}%)", key, current, *slot, effect.modifier);
    }
    traits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::trigger::Duration;

    fn base() -> TraitVector {
        TraitVector {
            directness: Some(50.0),
            stress_response: Some(50.0),
            ..TraitVector::default()
        }
    }

    #[test]
    fn hostile_attack_effects() {
        let effects = [
            Effect::new("agreeableness", -40.0, Duration::Instant),
            Effect::new("directness", 30.0, Duration::Instant),
            Effect::new("stress_response", 20.0, Duration::Instant),
        ];
        let out = apply_effects(&base(), &effects);
        assert_eq!(out.agreeableness, 30.0);
        assert_eq!(out.directness, Some(65.0));
        assert_eq!(out.stress_response, Some(60.0));
    }

    #[test]
    fn empty_effects_are_identity() {
        let v = base();
        assert_eq!(apply_effects(&v, &[]), v);
    }

    #[test]
    fn input_is_not_mutated() {
        let v = base();
        let _ = apply_effects(&v, &[Effect::new("openness", 50.0, Duration::Permanent)]);
        assert_eq!(v.openness, 50.0);
    }

    #[test]
    fn sequential_effects_compound() {
        let effects = [
            Effect::new("openness", 50.0, Duration::Instant),
            Effect::new("openness", -50.0, Duration::Instant),
        ];
        // 50 -> 75 -> 37.5, not back to 50
        assert_eq!(apply_effects(&TraitVector::default(), &effects).openness, 37.5);

        let reversed = [
            Effect::new("openness", -50.0, Duration::Instant),
            Effect::new("openness", 50.0, Duration::Instant),
        ];
        // without the clamp the product is the same in either order
        assert_eq!(apply_effects(&TraitVector::default(), &reversed).openness, 37.5);

        let clamped = [
            Effect::new("openness", 100.0, Duration::Instant),
            Effect::new("openness", -50.0, Duration::Instant),
        ];
        // 80 -> 100 -> 50, but 80 -> 40 -> 80
        let v = TraitVector {
            openness: 80.0,
            ..TraitVector::default()
        };
        assert_eq!(apply_effects(&v, &clamped).openness, 50.0);
        let clamped_rev = [clamped[1].clone(), clamped[0].clone()];
        assert_eq!(apply_effects(&v, &clamped_rev).openness, 80.0);
    }

    #[test]
    fn clamped_to_range() {
        let up = vec![Effect::new("neuroticism", 100.0, Duration::Instant); 10];
        assert_eq!(apply_effects(&TraitVector::default(), &up).neuroticism, 100.0);

        let down = [Effect::new("neuroticism", -100.0, Duration::Instant)];
        assert_eq!(apply_effects(&TraitVector::default(), &down).neuroticism, 0.0);
    }

    #[test]
    fn clamp_holds_for_any_chain() {
        let modifiers = [-100.0, -73.5, -40.0, -1.0, 0.0, 12.5, 40.0, 99.0, 100.0];
        let mut v = TraitVector {
            empathy: Some(100.0),
            ..TraitVector::default()
        };
        for (i, m) in modifiers.iter().cycle().take(200).enumerate() {
            let key = if i % 2 == 0 { "empathy" } else { "agreeableness" };
            v = apply_effects(&v, &[Effect::new(key, *m, Duration::Instant)]);
            for t in [NumericTrait::Empathy, NumericTrait::Agreeableness] {
                let value = v.get(t).unwrap();
                assert!((TRAIT_MIN..=TRAIT_MAX).contains(&value), "{} = {}", t, value);
            }
        }
    }

    #[test]
    fn out_of_range_input_is_pulled_back() {
        let v = TraitVector {
            openness: 150.0,
            ..TraitVector::default()
        };
        let out = apply_effects(&v, &[Effect::new("openness", 0.0, Duration::Instant)]);
        assert_eq!(out.openness, 100.0);
    }

    #[test]
    fn non_numeric_and_unconfigured_traits_ignored() {
        let v = TraitVector::default();
        let effects = [
            Effect::new("core_fear", 50.0, Duration::Instant),
            Effect::new("empathy", 50.0, Duration::Instant),
            Effect::new("not_a_trait", 50.0, Duration::Instant),
        ];
        assert_eq!(apply_effects(&v, &effects), v);
    }
}
