//! Race winner resolution.
//!
//! The settled result of a race is a single-key mapping whose one key names
//! the branch that settled first. The losing branches are cancelled by the
//! runtime itself and never receive a winner flag here.

use sagascope_foundation::{EffectId, Error, Result, Value};

use crate::manager::EffectManager;

/// Marks the winning child of a settled race.
///
/// # Errors
///
/// Fails with `MalformedPayload` when the settled result is not a keyed
/// mapping, and with `RaceLabelMismatch` when its first key matches no
/// child label. Neither case modifies any record; callers report the
/// anomaly and move on.
pub(crate) fn resolve_winner(
    manager: &mut EffectManager,
    race_id: EffectId,
    settled: &Value,
) -> Result<()> {
    let Some(label) = settled.as_map().and_then(|m| m.first_key()) else {
        return Err(Error::malformed_payload(format!(
            "race {race_id} settled with a non-mapping result"
        )));
    };
    let label = label.to_owned();

    let child_ids: Vec<EffectId> = manager.child_ids(race_id).to_vec();
    let mut matched = false;
    for child_id in child_ids {
        if let Ok(child) = manager.get_mut(child_id) {
            if child.label.as_deref() == Some(label.as_str()) {
                child.winner = true;
                matched = true;
            }
        }
    }

    if matched {
        Ok(())
    } else {
        Err(Error::race_label_mismatch(race_id, label))
    }
}

// =============================================================================
// Tests
// =============================================================================
