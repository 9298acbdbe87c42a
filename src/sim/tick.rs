//! Per-frame simulation tick
//!
//! One call advances the player, rocks and the live planet by one display
//! frame, then resolves collisions into a level outcome.

use glam::Vec2;
use rand::Rng;

use super::collision::{first_rock_hit, reached_planet};
use super::state::{Field, Flash, FlashColor, GameState, LevelOutcome, Planet};
use crate::consts::*;
use crate::settings::GameConfig;
use crate::wrap_degrees;

/// Held directions for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Per-direction OR of two input sources
    pub fn merge(self, other: TickInput) -> TickInput {
        TickInput {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

/// Advance the game state by one frame.
///
/// Returns the outcome on the frame the level ends; does nothing once the
/// level is already over.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<LevelOutcome> {
    if state.phase.is_over() {
        return None;
    }

    update_player(state, input);
    update_rocks(state);

    // Checked against the rocks that survived culling
    let hit = first_rock_hit(&state.player, &state.rocks, config.collision_forgiveness);
    if let Some(index) = hit {
        let rock = &state.rocks[index];
        log::info!(
            "Hit rock at ({:.0}, {:.0}) on level {}",
            rock.pos.x,
            rock.pos.y,
            state.level
        );
    }

    // A rock hit does not stop the planet; reaching it this frame still wins
    let field = state.field;
    update_planet(state.current_planet_mut(), field, rng);

    if reached_planet(&state.player, state.current_planet(), config.win_distance) {
        let level = state.level;
        state.current_planet_mut().reached = true;
        state.planets_reached.push(level);
        state.flash = Some(Flash::new(FlashColor::Green));
        state.phase = LevelOutcome::Won.phase();
        log::info!("Reached planet {} (path {} steps)", level, state.path.len());
        return Some(LevelOutcome::Won);
    }

    if hit.is_some() {
        state.phase = LevelOutcome::Lost.phase();
        return Some(LevelOutcome::Lost);
    }

    None
}

/// Apply held directions, clamp to the field and record the path.
///
/// Diagonals are not normalized: holding two axes moves `speed` on each.
pub fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let speed = player.speed;

    if input.up {
        player.pos.y -= speed;
    }
    if input.down {
        player.pos.y += speed;
    }
    if input.left {
        player.pos.x -= speed;
    }
    if input.right {
        player.pos.x += speed;
    }

    player.clamp_to(state.field);

    let pos = player.pos;
    if input.any() && state.path.last() != Some(&pos) {
        state.path.push(pos);
    }
}

/// Drift and spin every rock, then cull those past the left edge
pub fn update_rocks(state: &mut GameState) {
    for rock in &mut state.rocks {
        rock.pos.x -= rock.speed;
        rock.rotation = wrap_degrees(rock.rotation + rock.rotation_speed);
    }
    state.rocks.retain(|rock| rock.pos.x > ROCK_DESPAWN_X);
}

/// Spin the planet, count down its wander timer and step toward the wander point
pub fn update_planet(planet: &mut Planet, field: Field, rng: &mut impl Rng) {
    planet.rotation = wrap_degrees(planet.rotation + planet.rotation_speed);

    if planet.retarget_timer <= 0.0 {
        planet.pick_target(field, rng);
    } else {
        planet.retarget_timer -= 1.0;
    }

    let delta = planet.target - planet.pos;
    let angle = delta.y.atan2(delta.x);
    // Never step past the wander point
    let step = planet.move_speed.min(delta.length());
    planet.pos += Vec2::new(angle.cos(), angle.sin()) * step;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Rock};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state(seed: u64) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(Field::new(800.0, 600.0), &GameConfig::default(), &mut rng);
        state.start_level(&mut rng);
        (state, rng)
    }

    /// Park the live planet far from the player so a tick cannot win
    fn park_planet(state: &mut GameState) {
        let planet = state.current_planet_mut();
        planet.pos = Vec2::new(700.0, 80.0);
        planet.target = planet.pos;
        planet.retarget_timer = 1000.0;
    }

    #[test]
    fn test_idle_tick_keeps_playing() {
        let (mut state, mut rng) = new_state(1);
        park_planet(&mut state);
        let outcome = tick(&mut state, &TickInput::default(), &GameConfig::default(), &mut rng);
        assert_eq!(outcome, None);
        assert!(!state.phase.is_over());
        assert!(state.path.is_empty());
    }

    #[test]
    fn test_diagonal_moves_full_speed_on_both_axes() {
        let (mut state, _) = new_state(1);
        let start = state.player.pos;
        let speed = state.player.speed;
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        assert_eq!(state.player.pos, start + Vec2::new(speed, speed));
        assert_eq!(state.path, vec![state.player.pos]);
    }

    #[test]
    fn test_opposite_directions_cancel_without_recording() {
        let (mut state, _) = new_state(1);
        state.player.speed = 2.0;
        let start = state.player.pos;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        assert_eq!(state.player.pos, start);
        // Moved flag is set, but the path was empty so the point is recorded once
        assert_eq!(state.path.len(), 1);
        update_player(&mut state, &input);
        assert_eq!(state.path.len(), 1);
    }

    #[test]
    fn test_blocked_direction_adds_no_duplicate() {
        let (mut state, _) = new_state(1);
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            update_player(&mut state, &input);
        }
        assert_eq!(state.player.pos.y, state.player.radius);
        let len = state.path.len();
        update_player(&mut state, &input);
        assert_eq!(state.path.len(), len);
        // Every recorded point differs from its predecessor
        assert!(state.path.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_rocks_culled_at_despawn_edge() {
        let (mut state, _) = new_state(1);
        state.rocks = vec![
            Rock::new(Vec2::new(-15.0, 10.0), 5.0, 0.0, 0.0, 1.0),
            Rock::new(Vec2::new(-14.0, 10.0), 5.0, 0.0, 0.0, 1.0),
            Rock::new(Vec2::new(400.0, 10.0), 5.0, 0.0, 0.0, 1.0),
        ];
        update_rocks(&mut state);
        // -15 - 5 = -20 is culled, -19 survives
        assert_eq!(state.rocks.len(), 2);
        assert_eq!(state.rocks[0].pos.x, -19.0);
        assert!(state.rocks.iter().all(|r| r.pos.x > ROCK_DESPAWN_X));
    }

    #[test]
    fn test_rock_rotation_wraps() {
        let (mut state, _) = new_state(1);
        state.rocks = vec![
            Rock::new(Vec2::new(400.0, 10.0), 1.0, 358.0, 3.0, 1.0),
            Rock::new(Vec2::new(400.0, 10.0), 1.0, 1.0, -3.0, 1.0),
        ];
        update_rocks(&mut state);
        assert!((state.rocks[0].rotation - 1.0).abs() < 1e-4);
        assert!((state.rocks[1].rotation - 358.0).abs() < 1e-4);
    }

    #[test]
    fn test_rock_on_player_loses_level() {
        let (mut state, mut rng) = new_state(2);
        park_planet(&mut state);
        let pos = state.player.pos;
        state.rocks.push(Rock::new(pos, 0.0, 0.0, 0.0, 1.0));

        let outcome = tick(&mut state, &TickInput::default(), &GameConfig::default(), &mut rng);
        assert_eq!(outcome, Some(LevelOutcome::Lost));
        assert_eq!(state.phase, GamePhase::LevelLost);
        assert!(state.planets_reached.is_empty());

        // Terminal: further ticks change nothing
        let before = state.player.pos;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input, &GameConfig::default(), &mut rng), None);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_reaching_planet_wins_level() {
        let (mut state, mut rng) = new_state(3);
        let planet_pos = state.current_planet().pos;
        state.player.pos = planet_pos;

        let outcome = tick(&mut state, &TickInput::default(), &GameConfig::default(), &mut rng);
        assert_eq!(outcome, Some(LevelOutcome::Won));
        assert_eq!(state.phase, GamePhase::LevelWon);
        assert_eq!(state.planets_reached, vec![1]);
        assert!(state.planets[0].reached);
        assert_eq!(state.flash.map(|f| f.frames), Some(FLASH_FRAMES));
    }

    #[test]
    fn test_reaching_planet_beats_same_frame_hit() {
        let (mut state, mut rng) = new_state(4);
        let planet_pos = state.current_planet().pos;
        state.player.pos = planet_pos;
        state.rocks.push(Rock::new(planet_pos, 0.0, 0.0, 0.0, 1.0));

        let outcome = tick(&mut state, &TickInput::default(), &GameConfig::default(), &mut rng);
        assert_eq!(outcome, Some(LevelOutcome::Won));
        assert_eq!(state.phase, GamePhase::LevelWon);
        assert_eq!(state.planets_reached, vec![1]);
        assert!(state.planets[0].reached);
        assert!(state.flash.is_some());
    }

    #[test]
    fn test_planet_retargets_when_timer_expires() {
        let (mut state, mut rng) = new_state(5);
        let field = state.field;
        let planet = state.current_planet_mut();
        planet.retarget_timer = 0.0;
        let old_target = planet.target;
        update_planet(planet, field, &mut rng);
        assert_ne!(planet.target, old_target);
        assert!(planet.retarget_timer >= RETARGET_MIN_FRAMES);

        let timer = planet.retarget_timer;
        let target = planet.target;
        update_planet(planet, field, &mut rng);
        assert_eq!(planet.retarget_timer, timer - 1.0);
        assert_eq!(planet.target, target);
    }

    #[test]
    fn test_planet_rests_on_target() {
        let (mut state, mut rng) = new_state(6);
        let field = state.field;
        let planet = state.current_planet_mut();
        planet.pos = Vec2::new(300.0, 300.0);
        planet.target = Vec2::new(300.0, 300.0);
        planet.retarget_timer = 50.0;
        update_planet(planet, field, &mut rng);
        assert_eq!(planet.pos, Vec2::new(300.0, 300.0));
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            x in 32.0f32..=768.0,
            y in 32.0f32..=568.0,
            up in any::<bool>(),
            down in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
            frames in 1usize..400,
        ) {
            let (mut state, _) = new_state(9);
            state.player.pos = Vec2::new(x, y);
            let input = TickInput { up, down, left, right };
            for _ in 0..frames {
                update_player(&mut state, &input);
                let p = state.player.pos;
                let r = state.player.radius;
                prop_assert!(p.x >= r && p.x <= state.field.width - r);
                prop_assert!(p.y >= r && p.y <= state.field.height - r);
            }
            prop_assert!(state.path.windows(2).all(|w| w[0] != w[1]));
        }

        #[test]
        fn prop_rock_moves_exactly_its_speed(
            x in 0.0f32..800.0,
            speed in 1.0f32..8.0,
            frames in 1usize..200,
        ) {
            let (mut state, _) = new_state(10);
            state.rocks.push(Rock::new(Vec2::new(x, 100.0), speed, 0.0, 1.0, 1.0));
            let mut expected = x;
            for _ in 0..frames {
                update_rocks(&mut state);
                expected -= speed;
                match state.rocks.first() {
                    Some(rock) => {
                        prop_assert!(expected > ROCK_DESPAWN_X);
                        prop_assert_eq!(rock.pos.x, expected);
                    }
                    None => {
                        prop_assert!(expected <= ROCK_DESPAWN_X);
                        break;
                    }
                }
            }
        }

        #[test]
        fn prop_planet_never_overshoots(
            px in 50.0f32..750.0, py in 50.0f32..550.0,
            tx in 50.0f32..750.0, ty in 50.0f32..550.0,
            speed in 0.1f32..2.0,
        ) {
            let (mut state, mut rng) = new_state(11);
            let field = state.field;
            let planet = state.current_planet_mut();
            planet.pos = Vec2::new(px, py);
            planet.target = Vec2::new(tx, ty);
            planet.move_speed = speed;
            planet.retarget_timer = 10.0;

            let before = planet.pos.distance(planet.target);
            update_planet(planet, field, &mut rng);
            let after = planet.pos.distance(planet.target);
            prop_assert!((after - (before - speed).max(0.0)).abs() < 1e-3);
        }
    }
}
