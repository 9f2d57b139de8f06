//! Preparation-turn flavor text.
//!
//! Each charging or semi-invulnerable move announces its first turn with a
//! fixed message. Templates substitute `{user}` and `{target}` with species
//! names.

use phf::{phf_map, Map};

static CHARGE_MESSAGES: Map<&'static str, &'static str> = phf_map! {
    "solar-beam" => "{user} absorbed light!",
    "skull-bash" => "{user} lowered its head!",
    "sky-attack" => "{user} became cloaked in a harsh light!",
    "meteor-beam" => "{user} is overflowing with space power!",
    "razor-wind" => "{user} made a whirlwind!",
    "bounce" => "{user} sprang up!",
    "dig" => "{user} dug a hole!",
    "dive" => "{user} hid underwater!",
    "phantom-force" => "{user} vanished instantly!",
    "electro-shot" => "{user} absorbed electricity!",
    "fly" => "{user} flew up high!",
    "shadow-force" => "{user} vanished instantly!",
    "freeze-shock" => "{user} became cloaked in a freezing light!",
    "sky-drop" => "{user} took the enemy {target} into the sky!",
    "solar-blade" => "{user} absorbed light!",
    "geomancy" => "{user} is absorbing power!",
    "ice-burn" => "{user} became cloaked in freezing air!",
    "focus-punch" => "{user} is tightening its focus!",
};

static SEMI_INVULN_MESSAGES: Map<&'static str, &'static str> = phf_map! {
    "fly" => "{user} flew up high!",
    "bounce" => "{user} sprang up!",
    "sky-drop" => "{user} took the enemy {target} into the sky!",
    "dig" => "{user} burrowed its way under the ground!",
    "dive" => "{user} hid underwater!",
};

fn render(template: &str, user: &str, target: &str) -> String {
    template.replace("{user}", user).replace("{target}", target)
}

/// Flavor message for a charging move's preparation turn.
pub fn charge_message(move_name: &str, user: &str, target: &str) -> String {
    CHARGE_MESSAGES
        .get(move_name)
        .map(|template| render(template, user, target))
        .unwrap_or_default()
}

/// Flavor message for the turn a semi-invulnerable move hides its user.
/// Moves without a dedicated message fall back to the charging table.
pub fn semi_invuln_message(move_name: &str, user: &str, target: &str) -> String {
    SEMI_INVULN_MESSAGES
        .get(move_name)
        .map(|template| render(template, user, target))
        .unwrap_or_else(|| charge_message(move_name, user, target))
}
