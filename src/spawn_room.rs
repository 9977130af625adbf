// Room 1: walk onto the glowing tile.

use bevy::prelude::*;

use crate::canvas::{
    CanvasRect, GRID_SIZE, PROP_Z, ROOM_BACKGROUND, Visual, overlaps, room_floor, spawn_visual,
    spawn_visuals,
};
use crate::player::Player;
use crate::sections::{GameSet, Sections};

pub struct SpawnRoomPlugin;

impl Plugin for SpawnRoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Room1), setup_spawn_room)
            .add_systems(
                Update,
                (
                    reach_glowing_tile.in_set(GameSet::Rules),
                    pulse_glowing_tile.in_set(GameSet::Present),
                )
                    .run_if(in_state(Sections::Room1)),
            );
    }
}

pub const GLOWING_TILE: CanvasRect = CanvasRect::square(320.0, 256.0, GRID_SIZE);

const GLOW_COLOR: Color = Color::srgb(1.0, 0.85, 0.3);
/// Glow cycle speed, radians per second.
const GLOW_SPEED: f32 = 4.0;

#[derive(Component)]
struct GlowingTile;

fn setup_spawn_room(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = ROOM_BACKGROUND;

    spawn_visuals(&mut commands, Sections::Room1, room_floor());
    spawn_visual(
        &mut commands,
        Sections::Room1,
        Visual::fill(GLOWING_TILE, GLOW_COLOR, PROP_Z),
    )
    .insert(GlowingTile);
    spawn_visuals(
        &mut commands,
        Sections::Room1,
        [Visual::caption("FIND THE GLOWING TILE")],
    );
}

fn reach_glowing_tile(
    player: Query<&CanvasRect, With<Player>>,
    mut next_section: ResMut<NextState<Sections>>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    if overlaps(player, &GLOWING_TILE) {
        next_section.set(Sections::Room2);
    }
}

fn pulse_glowing_tile(time: Res<Time>, mut tile: Query<&mut Sprite, With<GlowingTile>>) {
    let Ok(mut sprite) = tile.single_mut() else {
        return;
    };
    let glow = 0.75 + 0.25 * (time.elapsed_secs() * GLOW_SPEED).sin();
    sprite.color = GLOW_COLOR.with_alpha(glow);
}
