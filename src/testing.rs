// Headless app harness shared by the section tests.

use std::time::Duration;

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::sections::Sections;

/// Simulated frame length. Stays under the virtual clock's default max delta.
pub const FRAME: Duration = Duration::from_millis(100);

/// Every game plugin on top of `MinimalPlugins`, with input resources that
/// tests drive by hand and a fixed frame time. Startup has already run.
pub fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Touches>()
        .add_plugins(crate::game_plugins);
    app.update();
    app
}

pub fn section(app: &App) -> Sections {
    *app.world().resource::<State<Sections>>().get()
}

/// Jump straight to `section` and run the frame that enters it.
pub fn enter(app: &mut App, section: Sections) {
    app.world_mut()
        .resource_mut::<NextState<Sections>>()
        .set(section);
    app.update();
}

pub fn run_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.update();
    }
}

/// Press `key`, run one frame, then drop the just-pressed flag while keeping
/// the key held.
pub fn hold_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

pub fn release_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

pub fn tap_key(app: &mut App, key: KeyCode) {
    hold_key(app, key);
    release_key(app, key);
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}
