//! Collision tests between the player and everything else
//!
//! All shapes are circles. Comparisons are strict: touching is not a hit.

use glam::Vec2;

use super::state::{Planet, Player, Rock};

/// Whether two circles overlap, with the summed radius scaled by `forgiveness`
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32, forgiveness: f32) -> bool {
    a.distance(b) < (a_radius + b_radius) * forgiveness
}

/// Index of the first rock overlapping the player, if any
pub fn first_rock_hit(player: &Player, rocks: &[Rock], forgiveness: f32) -> Option<usize> {
    rocks.iter().position(|rock| {
        circles_overlap(player.pos, player.radius, rock.pos, rock.radius, forgiveness)
    })
}

/// Whether the player is within `win_distance` of the planet's center.
///
/// `win_distance` is a raw field-unit distance; it does not scale with the
/// viewport the way the player's radius does.
#[inline]
pub fn reached_planet(player: &Player, planet: &Planet, win_distance: f32) -> bool {
    player.pos.distance(planet.pos) < win_distance
}
