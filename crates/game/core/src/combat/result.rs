//! Hit resolution against block and HP.

use super::damage::DamageClass;

/// Result of one hit after block absorption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResult {
    /// Damage absorbed by block.
    pub blocked: i32,
    /// HP actually lost (never more than the HP the creature had).
    pub hp_lost: i32,
    pub hp_after: i32,
    pub block_after: i32,
    /// HP went from positive to zero on this hit.
    pub killed: bool,
}

/// Resolves `damage` against `block` then `hp`.
///
/// HP-loss damage ignores block. Both HP and block stay non-negative.
pub fn apply_hit(hp: i32, block: i32, damage: i32, class: DamageClass) -> HitResult {
    let hp = hp.max(0);
    let block = block.max(0);
    let damage = damage.max(0);

    let blocked = if class.bypasses_block() {
        0
    } else {
        damage.min(block)
    };
    let through = damage - blocked;
    let hp_lost = through.min(hp);

    HitResult {
        blocked,
        hp_lost,
        hp_after: hp - hp_lost,
        block_after: block - blocked,
        killed: hp > 0 && hp_lost == hp,
    }
}
