// Dialogue box along the bottom of the screen.
//
// Any section can show a line with `ShowDialogue`; the box hides itself a few
// seconds after the latest line.

use bevy::prelude::*;

use crate::sections::GameSet;

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ShowDialogue>()
            .init_resource::<Dialogue>()
            .add_systems(Startup, spawn_dialogue_box)
            .add_systems(
                Update,
                (receive_dialogue, expire_dialogue, draw_dialogue)
                    .chain()
                    .in_set(GameSet::Present),
            );
    }
}

const SHOW_FOR: f32 = 3.0;

#[derive(Message, Debug, Clone)]
pub struct ShowDialogue(pub String);

/// The line currently on screen and how long it has left.
#[derive(Resource, Debug)]
pub struct Dialogue {
    line: Option<String>,
    hide: Timer,
}

impl Default for Dialogue {
    fn default() -> Self {
        Self {
            line: None,
            hide: Timer::from_seconds(SHOW_FOR, TimerMode::Once),
        }
    }
}

impl Dialogue {
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }
}

#[derive(Component)]
struct DialogueBox;

#[derive(Component)]
struct DialogueText;

fn spawn_dialogue_box(mut commands: Commands) {
    commands
        .spawn((
            DialogueBox,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(10.0),
                right: Val::Percent(10.0),
                bottom: Val::Px(24.0),
                padding: UiRect::all(Val::Px(12.0)),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            BorderColor::all(Color::WHITE),
            Visibility::Hidden,
            GlobalZIndex(60),
        ))
        .with_children(|parent| {
            parent.spawn((
                DialogueText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn receive_dialogue(mut messages: MessageReader<ShowDialogue>, mut dialogue: ResMut<Dialogue>) {
    // Only the newest line matters if several arrive in one tick.
    let Some(ShowDialogue(line)) = messages.read().last() else {
        return;
    };
    dialogue.line = Some(line.clone());
    dialogue.hide.reset();
}

fn expire_dialogue(time: Res<Time>, mut dialogue: ResMut<Dialogue>) {
    if dialogue.line.is_none() {
        return;
    }
    dialogue.hide.tick(time.delta());
    if dialogue.hide.just_finished() {
        dialogue.line = None;
    }
}

fn draw_dialogue(
    dialogue: Res<Dialogue>,
    mut boxes: Query<&mut Visibility, With<DialogueBox>>,
    mut texts: Query<&mut Text, With<DialogueText>>,
) {
    if !dialogue.is_changed() {
        return;
    }
    let Ok(mut visibility) = boxes.single_mut() else {
        return;
    };
    match dialogue.line() {
        Some(line) => {
            *visibility = Visibility::Inherited;
            if let Ok(mut text) = texts.single_mut() {
                text.0 = line.to_string();
            }
        }
        None => *visibility = Visibility::Hidden,
    }
}
