// Keyboard, pointer and touch input folded into logical actions.

use bevy::input::touch::Touches;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::sections::GameSet;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionState>()
            .add_systems(Startup, spawn_touch_pad)
            .add_systems(
                Update,
                (collect_actions, show_touch_pad, touch_pad_visuals).in_set(GameSet::Input),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    fn keys(self) -> &'static [KeyCode] {
        match self {
            Action::Up => &[KeyCode::ArrowUp, KeyCode::KeyW],
            Action::Down => &[KeyCode::ArrowDown, KeyCode::KeyS],
            Action::Left => &[KeyCode::ArrowLeft, KeyCode::KeyA],
            Action::Right => &[KeyCode::ArrowRight, KeyCode::KeyD],
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Action::Up => "^",
            Action::Down => "v",
            Action::Left => "<",
            Action::Right => ">",
        }
    }
}

/// Directions held this tick, rebuilt from every input source each frame,
/// plus the one-tick start trigger.
#[derive(Resource, Debug, Default, Clone)]
pub struct ActionState {
    held: HashSet<Action>,
    start_triggered: bool,
}

impl ActionState {
    pub fn held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.held.insert(action);
        } else {
            self.held.remove(&action);
        }
    }

    #[cfg(test)]
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    /// True on the tick a key went down, the mouse was clicked or a touch
    /// ended. Any of these starts the game from the boot screen.
    pub fn start_triggered(&self) -> bool {
        self.start_triggered
    }
}

fn collect_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    pad: Query<(&Interaction, &TouchButton)>,
    mut actions: ResMut<ActionState>,
) {
    for action in Action::iter() {
        actions.set(action, keyboard.any_pressed(action.keys().iter().copied()));
    }
    for (interaction, button) in &pad {
        if *interaction == Interaction::Pressed {
            actions.set(button.0, true);
        }
    }

    actions.start_triggered = keyboard.get_just_pressed().next().is_some()
        || mouse.just_pressed(MouseButton::Left)
        || touches.any_just_released();
}

const PAD_BUTTON: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const PAD_BUTTON_PRESSED: Color = Color::srgba(1.0, 1.0, 1.0, 0.4);
const PAD_SIZE: f32 = 56.0;

#[derive(Component)]
struct TouchPad;

#[derive(Component)]
struct TouchButton(Action);

fn spawn_touch_pad(mut commands: Commands) {
    commands
        .spawn((
            TouchPad,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                right: Val::Px(16.0),
                display: Display::Grid,
                grid_template_columns: RepeatedGridTrack::px(3u16, PAD_SIZE),
                grid_template_rows: RepeatedGridTrack::px(3u16, PAD_SIZE),
                ..default()
            },
            Visibility::Hidden,
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            // Row and column on the 3x3 grid.
            let layout: [(Action, i16, i16); 4] = [
                (Action::Up, 1, 2),
                (Action::Left, 2, 1),
                (Action::Right, 2, 3),
                (Action::Down, 3, 2),
            ];
            for (action, row, column) in layout {
                parent
                    .spawn((
                        TouchButton(action),
                        Button,
                        Node {
                            grid_row: GridPlacement::start(row),
                            grid_column: GridPlacement::start(column),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                        BackgroundColor(PAD_BUTTON),
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new(action.arrow()),
                            TextFont {
                                font_size: 24.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

/// The pad stays hidden until the first touch, so desktop players never see it.
fn show_touch_pad(touches: Res<Touches>, mut pad: Query<&mut Visibility, With<TouchPad>>) {
    if !touches.any_just_pressed() {
        return;
    }
    let Ok(mut visibility) = pad.single_mut() else {
        return;
    };
    *visibility = Visibility::Inherited;
}

fn touch_pad_visuals(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<TouchButton>)>,
) {
    for (interaction, mut bg) in &mut query {
        *bg = match *interaction {
            Interaction::Pressed => PAD_BUTTON_PRESSED.into(),
            _ => PAD_BUTTON.into(),
        };
    }
}
