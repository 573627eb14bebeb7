//! Snapshot fingerprints for search deduplication and logging.

use sha2::{Digest, Sha256};
use spire_core::StateSnapshot;

/// SHA-256 over the JSON encoding of `snapshot`, hex encoded.
///
/// Two snapshots with equal fields always share a fingerprint; the field
/// order of the JSON encoding is fixed by the struct definitions. Snapshots
/// record the draw and discard piles only as counts, so combats that differ
/// only in pile order share a fingerprint too.
pub fn fingerprint(snapshot: &StateSnapshot) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(snapshot)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// First 16 hex chars of [`fingerprint`], for compact log lines.
pub fn short_fingerprint(snapshot: &StateSnapshot) -> Result<String, serde_json::Error> {
    let mut full = fingerprint(snapshot)?;
    full.truncate(16);
    Ok(full)
}

#[cfg(test)]
mod tests {
    use spire_content::ContentRegistry;
    use spire_core::{CombatSetup, StreamSeeds};

    use super::*;

    fn snapshot(seed: i64) -> StateSnapshot {
        let registry = ContentRegistry::builtin().unwrap();
        let engine = registry.engine();
        let setup = CombatSetup::new(
            vec!["Strike_P".into(); 6],
            vec!["JawWorm".into()],
            StreamSeeds::uniform(seed),
        );
        engine.observe(&engine.setup(&setup).unwrap())
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = fingerprint(&snapshot(1)).unwrap();
        let b = fingerprint(&snapshot(1)).unwrap();
        assert_eq!(a, b, "same state should produce same fingerprint");
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_short_format() {
        let short = short_fingerprint(&snapshot(1)).unwrap();
        assert_eq!(short.len(), 16);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn draw_order_is_not_part_of_the_fingerprint() {
        let registry = ContentRegistry::builtin().unwrap();
        let engine = registry.engine();
        let setup = CombatSetup::new(
            ["Strike_P", "Defend_P"].repeat(6).into_iter().map(String::from).collect(),
            vec!["JawWorm".into()],
            StreamSeeds::uniform(1),
        );
        let combat = engine.setup(&setup).unwrap();
        let mut reordered = combat.clone();
        reordered.player.piles.draw.reverse();
        assert_ne!(combat.player.piles.draw, reordered.player.piles.draw);

        assert_eq!(
            fingerprint(&engine.observe(&combat)).unwrap(),
            fingerprint(&engine.observe(&reordered)).unwrap()
        );
    }

    #[test]
    fn different_hp_rolls_differ() {
        let mut base = snapshot(1);
        let before = fingerprint(&base).unwrap();
        base.enemies[0].hp -= 1;
        assert_ne!(before, fingerprint(&base).unwrap());
    }
}
