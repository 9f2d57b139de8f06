//! Base damage math and 4096-scale modifier helpers.
//!
//! Intermediate results truncate at each step to match the cartridge
//! formula's integer behavior.

/// Rounding used when applying 4096-scale modifiers: a remainder of exactly
/// one half rounds down, not up.
#[inline]
pub const fn halfdown_round(value: u32, divisor: u32) -> u32 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder > divisor / 2 {
        quotient + 1
    } else {
        quotient
    }
}

/// Apply a 4096-scale modifier (4096 = 1.0x) to a damage value.
#[inline]
pub fn apply_modifier(value: u32, modifier: u16) -> u32 {
    if modifier == 4096 {
        return value;
    }
    halfdown_round(value * modifier as u32, 4096)
}

/// Deterministic component of the damage formula:
/// `floor((floor(2 * level / 5 + 2) * power * attack / defense) / 50) + 2`.
pub fn base_damage(level: u32, power: u32, attack: u32, defense: u32) -> u32 {
    if defense == 0 || power == 0 {
        return 0;
    }
    let level_factor = 2 * level / 5 + 2;
    (level_factor * power * attack / defense) / 50 + 2
}

/// Apply the uniform variance roll (85..=100) as a percentage multiplier.
#[inline]
pub fn apply_variance(damage: u32, roll: u8) -> u32 {
    debug_assert!((85..=100).contains(&roll));
    damage * roll as u32 / 100
}
