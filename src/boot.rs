// Boot screen: a blinking prompt that waits for any input.

use std::time::Duration;

use bevy::prelude::*;

use crate::canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasRect, Visual, spawn_visual};
use crate::controls::ActionState;
use crate::sections::{GameSet, Sections};

pub struct BootPlugin;

impl Plugin for BootPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Boot), setup_boot).add_systems(
            Update,
            (
                press_start.in_set(GameSet::Rules),
                blink_prompt.in_set(GameSet::Present),
            )
                .run_if(in_state(Sections::Boot)),
        );
    }
}

const BLINK_PERIOD_MS: u128 = 500;

#[derive(Component)]
struct StartPrompt;

fn setup_boot(mut commands: Commands) {
    let rect = CanvasRect::centered(
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
        CANVAS_WIDTH,
        48.0,
    );
    spawn_visual(
        &mut commands,
        Sections::Boot,
        Visual::text(rect, "PRESS START", 24.0, Color::WHITE),
    )
    .insert(StartPrompt);
}

fn press_start(actions: Res<ActionState>, mut next_section: ResMut<NextState<Sections>>) {
    if actions.start_triggered() {
        next_section.set(Sections::Room1);
    }
}

/// The prompt alternates between shown and hidden every half second.
fn prompt_lit(elapsed: Duration) -> bool {
    (elapsed.as_millis() / BLINK_PERIOD_MS) % 2 == 1
}

fn blink_prompt(time: Res<Time>, mut prompt: Query<&mut TextColor, With<StartPrompt>>) {
    let Ok(mut color) = prompt.single_mut() else {
        return;
    };
    color.0 = if prompt_lit(time.elapsed()) {
        Color::WHITE
    } else {
        Color::BLACK
    };
}
