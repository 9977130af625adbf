// Room 2: touch every memory crystal, then move on after a pause.

use bevy::prelude::*;

use crate::canvas::{CanvasRect, PROP_Z, Visual, overlaps, room_floor, spawn_visual, spawn_visuals};
use crate::dialogue::ShowDialogue;
use crate::player::Player;
use crate::sections::{GameSet, Sections};

pub struct CrystalsPlugin;

impl Plugin for CrystalsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Room2), setup_crystal_room)
            .add_systems(OnExit(Sections::Room2), exit_crystal_room)
            .add_systems(
                Update,
                (
                    (leave_crystal_room, collect_crystals)
                        .chain()
                        .in_set(GameSet::Rules),
                    spin_crystals.in_set(GameSet::Present),
                )
                    .run_if(in_state(Sections::Room2)),
            );
    }
}

pub const CRYSTAL_SIZE: f32 = 32.0;
/// Pause between the last crystal and the countdown.
const EXIT_DELAY: f32 = 5.0;

const CRYSTAL_COLOR: Color = Color::srgb(0.45, 0.85, 1.0);

/// Crystal positions (top-left, canvas pixels) and the memory each one holds.
pub const CRYSTALS: [(Vec2, &str); 4] = [
    (
        Vec2::new(128.0, 128.0),
        "MEMORY: The wall Painting uk where it all Started",
    ),
    (
        Vec2::new(320.0, 192.0),
        "MEMORY: Scooty ride with you on your bday",
    ),
    (
        Vec2::new(512.0, 256.0),
        "MEMORY: All those eye Contact in School",
    ),
    (
        Vec2::new(256.0, 384.0),
        "MEMORY: The time you told me your feelings",
    ),
];

#[derive(Component)]
pub struct Crystal {
    message: &'static str,
}

/// Progress through the room; replaced every time the room is entered.
#[derive(Resource, Debug)]
pub struct CrystalRoom {
    collected: u32,
    exit: Option<Timer>,
}

impl CrystalRoom {
    fn new() -> Self {
        Self {
            collected: 0,
            exit: None,
        }
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Count one crystal; the exit delay starts once, with the last one.
    fn record(&mut self) {
        self.collected += 1;
        if self.collected >= CRYSTALS.len() as u32 && self.exit.is_none() {
            self.exit = Some(Timer::from_seconds(EXIT_DELAY, TimerMode::Once));
        }
    }
}

fn setup_crystal_room(mut commands: Commands) {
    commands.insert_resource(CrystalRoom::new());

    spawn_visuals(&mut commands, Sections::Room2, room_floor());
    for (position, message) in CRYSTALS {
        let rect = CanvasRect::square(position.x, position.y, CRYSTAL_SIZE);
        spawn_visual(
            &mut commands,
            Sections::Room2,
            Visual::fill(rect, CRYSTAL_COLOR, PROP_Z),
        )
        .insert(Crystal { message });
    }
    spawn_visuals(
        &mut commands,
        Sections::Room2,
        [Visual::caption("TOUCH THE CRYSTALS")],
    );
}

fn collect_crystals(
    mut commands: Commands,
    player: Query<&CanvasRect, With<Player>>,
    crystals: Query<(Entity, &CanvasRect, &Crystal)>,
    mut room: ResMut<CrystalRoom>,
    mut dialogue: MessageWriter<ShowDialogue>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    for (entity, rect, crystal) in &crystals {
        if !overlaps(player, rect) {
            continue;
        }
        dialogue.write(ShowDialogue(crystal.message.to_string()));
        commands.entity(entity).despawn();
        room.record();
        info!("crystal collected ({}/{})", room.collected(), CRYSTALS.len());
    }
}

fn leave_crystal_room(
    time: Res<Time>,
    mut room: ResMut<CrystalRoom>,
    mut next_section: ResMut<NextState<Sections>>,
) {
    let Some(exit) = room.exit.as_mut() else {
        return;
    };
    exit.tick(time.delta());
    if exit.just_finished() {
        next_section.set(Sections::Countdown);
    }
}

fn spin_crystals(time: Res<Time>, mut crystals: Query<&mut Transform, With<Crystal>>) {
    let angle = time.elapsed_secs() * 1.5;
    for mut transform in &mut crystals {
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

fn exit_crystal_room(mut commands: Commands) {
    commands.remove_resource::<CrystalRoom>();
}
