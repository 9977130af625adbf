// Main
mod boot;
mod canvas;
mod controls;
mod countdown;
mod crystals;
mod dialogue;
mod epilogue;
mod hud;
mod player;
mod reveal;
mod sections;
mod spawn_room;
#[cfg(test)]
mod testing;

use bevy::camera::ScalingMode;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use boot::BootPlugin;
use canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasPlugin};
use controls::ControlsPlugin;
use countdown::CountdownPlugin;
use crystals::CrystalsPlugin;
use dialogue::DialoguePlugin;
use epilogue::EpiloguePlugin;
use hud::HudPlugin;
use player::PlayerPlugin;
use reveal::RevealPlugin;
use sections::SectionsPlugin;
use spawn_room::SpawnRoomPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Memory Crystals".into(),
                        resolution: WindowResolution::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
                        // Web builds fill the page container instead of a fixed size.
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,memory_crystals=info".into(),
                    ..default()
                }),
        )
        .add_systems(Startup, spawn_camera)
        .add_plugins(game_plugins)
        .run();
}

/// Everything that makes up the game, minus windowing and rendering.
fn game_plugins(app: &mut App) {
    app.add_plugins((
        SectionsPlugin,
        CanvasPlugin,
        ControlsPlugin,
        DialoguePlugin,
        HudPlugin,
        PlayerPlugin,
        BootPlugin,
        SpawnRoomPlugin,
        CrystalsPlugin,
        CountdownPlugin,
        RevealPlugin,
        EpiloguePlugin,
    ));
}

fn spawn_camera(mut commands: Commands) {
    // Always show the whole canvas, letterboxed if the window aspect differs.
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: CANVAS_WIDTH,
                min_height: CANVAS_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}
