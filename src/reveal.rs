// Reveal section: birthday greeting, fireworks and a shaking screen.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Stopwatch;
use rand::Rng;

use crate::canvas::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CanvasRect, EFFECT_Z, Visual, spawn_visual, spawn_visuals,
};
use crate::sections::{GameSet, Sections};

pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Reveal), setup_reveal)
            .add_systems(OnExit(Sections::Reveal), exit_reveal)
            .add_systems(
                Update,
                (
                    (launch_fireworks, expire_fireworks, finish_reveal)
                        .chain()
                        .in_set(GameSet::Rules),
                    shake_screen.in_set(GameSet::Present),
                )
                    .run_if(in_state(Sections::Reveal)),
            );
    }
}

const REVEAL_BACKGROUND: Color = Color::srgb(0.35, 0.1, 0.4);
const GREETING_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

const FIREWORK_COUNT: u32 = 20;
/// Gap between consecutive launches.
const FIREWORK_INTERVAL: Duration = Duration::from_millis(100);
const FIREWORK_LIFETIME: f32 = 2.0;
const FIREWORK_SIZE: f32 = 12.0;
const REVEAL_DURATION: f32 = 4.0;
/// Largest camera offset in pixels while shaking.
const SHAKE_AMPLITUDE: f32 = 4.0;

/// Clocks for the reveal, owned by the section and polled each tick.
#[derive(Resource, Debug)]
pub struct RevealShow {
    clock: Stopwatch,
    launched: u32,
    exit: Timer,
}

impl RevealShow {
    fn new() -> Self {
        Self {
            clock: Stopwatch::new(),
            launched: 0,
            exit: Timer::from_seconds(REVEAL_DURATION, TimerMode::Once),
        }
    }

    /// Fireworks that should have launched by now: the first at once, then
    /// one per interval up to the total.
    fn due(&self) -> u32 {
        let intervals = self.clock.elapsed().as_millis() / FIREWORK_INTERVAL.as_millis();
        (intervals as u32).saturating_add(1).min(FIREWORK_COUNT)
    }

    pub fn launched(&self) -> u32 {
        self.launched
    }
}

#[derive(Component)]
struct Firework {
    fade: Timer,
}

fn setup_reveal(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = REVEAL_BACKGROUND;
    commands.insert_resource(RevealShow::new());

    let greeting = CanvasRect::centered(
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
        CANVAS_WIDTH,
        48.0,
    );
    spawn_visuals(
        &mut commands,
        Sections::Reveal,
        [Visual::text(greeting, "HAPPY BIRTHDAY!", 24.0, GREETING_COLOR)],
    );
}

fn launch_fireworks(time: Res<Time>, mut show: ResMut<RevealShow>, mut commands: Commands) {
    // Launch times count from the start of this frame, so only the first
    // firework goes up on entry.
    let due = show.due();
    show.clock.tick(time.delta());
    if show.launched >= due {
        return;
    }

    let mut rng = rand::rng();
    while show.launched < due {
        let rect = CanvasRect::square(
            rng.random_range(0.0..CANVAS_WIDTH - FIREWORK_SIZE),
            rng.random_range(0.0..CANVAS_HEIGHT - FIREWORK_SIZE),
            FIREWORK_SIZE,
        );
        let color = Color::hsl(rng.random_range(0.0..360.0), 1.0, 0.6);
        spawn_visual(
            &mut commands,
            Sections::Reveal,
            Visual::fill(rect, color, EFFECT_Z),
        )
        .insert(Firework {
            fade: Timer::from_seconds(FIREWORK_LIFETIME, TimerMode::Once),
        });
        show.launched += 1;
        debug!("firework {} of {FIREWORK_COUNT} launched", show.launched());
    }
}

fn expire_fireworks(
    time: Res<Time>,
    mut commands: Commands,
    mut fireworks: Query<(Entity, &mut Firework, &mut Sprite, &mut Transform)>,
) {
    for (entity, mut firework, mut sprite, mut transform) in &mut fireworks {
        firework.fade.tick(time.delta());
        if firework.fade.just_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        // Burst outwards while fading.
        let t = firework.fade.fraction();
        transform.scale = Vec3::splat(1.0 + t * 3.0);
        sprite.color.set_alpha(1.0 - t);
    }
}

fn finish_reveal(
    time: Res<Time>,
    mut show: ResMut<RevealShow>,
    mut next_section: ResMut<NextState<Sections>>,
) {
    show.exit.tick(time.delta());
    if show.exit.just_finished() {
        next_section.set(Sections::Epilogue);
    }
}

fn shake_screen(mut camera: Query<&mut Transform, With<Camera2d>>) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let mut rng = rand::rng();
    transform.translation.x = rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE);
    transform.translation.y = rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE);
}

fn exit_reveal(mut commands: Commands, mut camera: Query<&mut Transform, With<Camera2d>>) {
    commands.remove_resource::<RevealShow>();
    if let Ok(mut transform) = camera.single_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
    }
}
