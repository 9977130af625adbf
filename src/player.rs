// Player sprite with 8px step movement, clamped to the canvas.
use bevy::prelude::*;

use crate::canvas::{ACTOR_Z, CANVAS_HEIGHT, CANVAS_WIDTH, CanvasRect, Visual, spawn_visual};
use crate::controls::{Action, ActionState};
use crate::sections::{GameSet, Sections};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Room1), |mut commands: Commands| {
            spawn_player(&mut commands, Sections::Room1)
        })
        .add_systems(OnEnter(Sections::Room2), |mut commands: Commands| {
            spawn_player(&mut commands, Sections::Room2)
        })
        .add_systems(
            Update,
            player_movement
                .in_set(GameSet::Movement)
                .run_if(in_state(Sections::Room1).or(in_state(Sections::Room2))),
        );
    }
}

pub const PLAYER_SIZE: f32 = 32.0;
pub const MOVE_STEP: f32 = 8.0;
pub const PLAYER_SPAWN: Vec2 = Vec2::new(400.0, 300.0);

const PLAYER_COLOR: Color = Color::srgb(0.95, 0.75, 0.55);

#[derive(Component)]
pub struct Player;

fn spawn_player(commands: &mut Commands, section: Sections) {
    let rect = CanvasRect::square(PLAYER_SPAWN.x, PLAYER_SPAWN.y, PLAYER_SIZE);
    spawn_visual(commands, section, Visual::fill(rect, PLAYER_COLOR, ACTOR_Z)).insert(Player);
}

/// One movement tick: a fixed step per held direction, diagonals summed
/// without normalising, then clamped so the sprite stays on the canvas.
pub fn step(rect: CanvasRect, actions: &ActionState) -> CanvasRect {
    let mut delta = Vec2::ZERO;
    if actions.held(Action::Up) {
        delta.y -= MOVE_STEP;
    }
    if actions.held(Action::Down) {
        delta.y += MOVE_STEP;
    }
    if actions.held(Action::Left) {
        delta.x -= MOVE_STEP;
    }
    if actions.held(Action::Right) {
        delta.x += MOVE_STEP;
    }

    CanvasRect {
        x: (rect.x + delta.x).clamp(0.0, CANVAS_WIDTH - rect.w),
        y: (rect.y + delta.y).clamp(0.0, CANVAS_HEIGHT - rect.h),
        ..rect
    }
}

fn player_movement(actions: Res<ActionState>, mut query: Query<&mut CanvasRect, With<Player>>) {
    let Ok(mut rect) = query.single_mut() else {
        return;
    };
    let next = step(*rect, &actions);
    // Only touch the component when it moved, so change detection stays quiet.
    rect.set_if_neq(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{enter, hold_key, run_frames, test_app};

    const DIRECTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    fn every_combination() -> impl Iterator<Item = ActionState> {
        (0u8..16).map(|mask| {
            let mut actions = ActionState::default();
            for (bit, action) in DIRECTIONS.into_iter().enumerate() {
                actions.set(action, mask & (1 << bit) != 0);
            }
            actions
        })
    }

    #[test]
    fn diagonal_input_sums_both_axes() {
        let start = CanvasRect::square(PLAYER_SPAWN.x, PLAYER_SPAWN.y, PLAYER_SIZE);
        let actions = ActionState::default().with(Action::Up).with(Action::Right);
        let moved = step(start, &actions);
        assert_eq!((moved.x, moved.y), (408.0, 292.0));
    }

    #[test]
    fn opposite_directions_cancel() {
        let start = CanvasRect::square(PLAYER_SPAWN.x, PLAYER_SPAWN.y, PLAYER_SIZE);
        let actions = ActionState::default().with(Action::Left).with(Action::Right);
        assert_eq!(step(start, &actions), start);
    }

    #[test]
    fn every_combination_stays_on_canvas() {
        let max_x = CANVAS_WIDTH - PLAYER_SIZE;
        let max_y = CANVAS_HEIGHT - PLAYER_SIZE;
        let starts = [
            (0.0, 0.0),
            (max_x, 0.0),
            (0.0, max_y),
            (max_x, max_y),
            (4.0, 596.0 - PLAYER_SIZE),
            (PLAYER_SPAWN.x, PLAYER_SPAWN.y),
        ];
        for (x, y) in starts {
            for actions in every_combination() {
                let mut rect = CanvasRect::square(x, y, PLAYER_SIZE);
                for _ in 0..200 {
                    rect = step(rect, &actions);
                    assert!((0.0..=max_x).contains(&rect.x), "x out of bounds: {rect:?}");
                    assert!((0.0..=max_y).contains(&rect.y), "y out of bounds: {rect:?}");
                }
            }
        }
    }

    #[test]
    fn held_key_moves_one_step_per_tick() {
        let mut app = test_app();
        enter(&mut app, Sections::Room2);
        hold_key(&mut app, KeyCode::ArrowDown);
        run_frames(&mut app, 2);

        let mut query = app
            .world_mut()
            .query_filtered::<&CanvasRect, With<Player>>();
        let rect = query.single(app.world()).unwrap();
        assert_eq!((rect.x, rect.y), (PLAYER_SPAWN.x, PLAYER_SPAWN.y + 3.0 * MOVE_STEP));
    }
}
