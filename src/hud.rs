// Level indicator in the top-left corner, relabelled on every section change.

use bevy::prelude::*;

use crate::sections::{GameSet, Sections};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level_indicator).add_systems(
            Update,
            update_level_indicator
                .in_set(GameSet::Present)
                .run_if(state_changed::<Sections>),
        );
    }
}

#[derive(Component)]
pub struct LevelIndicator;

fn spawn_level_indicator(mut commands: Commands) {
    commands.spawn((
        LevelIndicator,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.85, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(12.0),
            ..default()
        },
        GlobalZIndex(40),
    ));
}

fn update_level_indicator(
    section: Res<State<Sections>>,
    mut indicator: Query<&mut Text, With<LevelIndicator>>,
) {
    let Ok(mut text) = indicator.single_mut() else {
        return;
    };
    text.0 = section.get().indicator().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{enter, tap_key, test_app};

    fn indicator(app: &mut App) -> String {
        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<LevelIndicator>>();
        query.single(app.world()).unwrap().0.clone()
    }

    #[test]
    fn follows_the_current_section() {
        let mut app = test_app();
        assert_eq!(indicator(&mut app), "");

        tap_key(&mut app, KeyCode::Space);
        assert_eq!(indicator(&mut app), "LEVEL: 1");

        enter(&mut app, Sections::Countdown);
        assert_eq!(indicator(&mut app), "LEVEL: 3");

        enter(&mut app, Sections::Epilogue);
        assert_eq!(indicator(&mut app), "EPILOGUE");
    }
}
