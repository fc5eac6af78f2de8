//! Boundary to the game world collaborator.
//!
//! The engine never talks to the game directly; the host implements
//! [`WorldProbe`] and drives [`pump_observations`] from its tick loop
//! (the reference host polls at 200 ms). This is the sole channel by
//! which new links enter the knowledge store.

use crate::core::Position;
use crate::navigator::Navigator;

/// Read-only view of the game world, implemented by the host.
pub trait WorldProbe {
    /// Stable identifier of the current world/savegame
    fn world_id(&self) -> &str;

    /// Current player position
    fn player_position(&self) -> Position;

    /// The world's default spawn position, used as display origin
    fn default_spawn(&self) -> Position;

    /// The teleport block the player is currently looking at, if any,
    /// together with its resolved destination when the game state
    /// exposes one.
    fn targeted_link(&self) -> Option<(Position, Option<Position>)>;
}

/// Feed one tick of world observations into the navigator.
///
/// Seeds the world origin on first contact and records the currently
/// targeted link. A resolved pair is recorded in both directions, since
/// the paired endpoint's own block may never be looked at; an unresolved
/// one is recorded as a target-less entry so the discovery is not lost.
pub fn pump_observations(probe: &impl WorldProbe, navigator: &mut Navigator) {
    let world = probe.world_id();
    navigator.set_origin_if_absent(world, probe.default_spawn());

    let Some((source, target)) = probe.targeted_link() else {
        return;
    };

    match target {
        Some(target) => {
            navigator.record_observation(world, source, Some(target));
            navigator.record_observation(world, target, Some(source));
        }
        None => {
            navigator.record_observation(world, source, None);
        }
    }
}
