// Canvas space and the generic scene renderer.
//
// Gameplay works in canvas pixels (origin top-left, y down) like the page the
// game was laid out on. Sections describe their content as lists of `Visual`s
// and this module turns them into sprites and text in Bevy's world space.

use bevy::prelude::*;
use bevy::text::{Justify, TextBounds};

use crate::sections::{GameSet, Sections};

pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(ROOM_BACKGROUND))
            .add_systems(Update, sync_canvas_transforms.in_set(GameSet::Present));
    }
}

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const GRID_SIZE: f32 = 64.0;

pub const ROOM_BACKGROUND: Color = Color::srgb(0.05, 0.05, 0.1);
const TILE_LIGHT: Color = Color::srgb(0.16, 0.14, 0.22);
const TILE_DARK: Color = Color::srgb(0.12, 0.1, 0.17);

/// Axis-aligned rectangle in canvas pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CanvasRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Rectangle of the given size centred on a canvas point.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Centre of the rectangle in world space (origin at canvas centre, y up).
    pub fn world_center(&self) -> Vec2 {
        Vec2::new(
            self.x + self.w / 2.0 - CANVAS_WIDTH / 2.0,
            CANVAS_HEIGHT / 2.0 - self.y - self.h / 2.0,
        )
    }
}

/// Strict overlap test; rectangles that only share an edge do not overlap.
pub fn overlaps(a: &CanvasRect, b: &CanvasRect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// How a visual is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Look {
    Fill(Color),
    /// Text centred in the rect, wrapped to the rect width.
    Text {
        text: String,
        size: f32,
        color: Color,
    },
}

/// One entry of a declarative scene description.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub rect: CanvasRect,
    pub look: Look,
    pub z: f32,
}

impl Visual {
    pub fn fill(rect: CanvasRect, color: Color, z: f32) -> Self {
        Self {
            rect,
            look: Look::Fill(color),
            z,
        }
    }

    pub fn text(rect: CanvasRect, text: impl Into<String>, size: f32, color: Color) -> Self {
        Self {
            rect,
            look: Look::Text {
                text: text.into(),
                size,
                color,
            },
            z: TEXT_Z,
        }
    }

    /// Full-width caption near the top of the canvas.
    pub fn caption(text: impl Into<String>) -> Self {
        Self::text(
            CanvasRect::new(0.0, 14.0, CANVAS_WIDTH, 24.0),
            text,
            12.0,
            Color::WHITE,
        )
    }
}

pub const FLOOR_Z: f32 = 0.0;
pub const PROP_Z: f32 = 1.0;
pub const ACTOR_Z: f32 = 2.0;
pub const EFFECT_Z: f32 = 5.0;
pub const TEXT_Z: f32 = 10.0;

/// Checkerboard of grid tiles covering the canvas.
pub fn room_floor() -> Vec<Visual> {
    let cols = (CANVAS_WIDTH / GRID_SIZE).ceil() as u32;
    let rows = (CANVAS_HEIGHT / GRID_SIZE).ceil() as u32;
    let mut tiles = Vec::with_capacity((cols * rows) as usize);
    for col in 0..cols {
        for row in 0..rows {
            let color = if (col + row) % 2 == 0 {
                TILE_LIGHT
            } else {
                TILE_DARK
            };
            tiles.push(Visual::fill(
                CanvasRect::square(col as f32 * GRID_SIZE, row as f32 * GRID_SIZE, GRID_SIZE),
                color,
                FLOOR_Z,
            ));
        }
    }
    tiles
}

/// Spawn one visual, scoped to `section`. Callers attach their own markers.
pub fn spawn_visual<'a>(
    commands: &'a mut Commands,
    section: Sections,
    visual: Visual,
) -> EntityCommands<'a> {
    let Visual { rect, look, z } = visual;
    let transform = Transform::from_translation(rect.world_center().extend(z));
    let size = Vec2::new(rect.w, rect.h);
    match look {
        Look::Fill(color) => commands.spawn((
            rect,
            Sprite::from_color(color, size),
            transform,
            DespawnOnExit(section),
        )),
        Look::Text { text, size: font_size, color } => commands.spawn((
            rect,
            Text2d::new(text),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color),
            TextLayout::new_with_justify(Justify::Center),
            TextBounds::new_horizontal(size.x),
            transform,
            DespawnOnExit(section),
        )),
    }
}

/// Spawn a whole scene description with no markers attached.
pub fn spawn_visuals(
    commands: &mut Commands,
    section: Sections,
    visuals: impl IntoIterator<Item = Visual>,
) {
    for visual in visuals {
        spawn_visual(commands, section, visual);
    }
}

fn sync_canvas_transforms(mut query: Query<(&CanvasRect, &mut Transform), Changed<CanvasRect>>) {
    for (rect, mut transform) in &mut query {
        let center = rect.world_center();
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}
