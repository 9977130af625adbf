// Epilogue: the closing message under a twinkling sky. Nothing leaves here.

use bevy::prelude::*;
use rand::Rng;

use crate::canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasRect, PROP_Z, Visual, spawn_visual, spawn_visuals};
use crate::sections::{GameSet, Sections};

pub struct EpiloguePlugin;

impl Plugin for EpiloguePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Epilogue), setup_epilogue)
            .add_systems(
                Update,
                twinkle_stars
                    .in_set(GameSet::Present)
                    .run_if(in_state(Sections::Epilogue)),
            );
    }
}

const EPILOGUE_BACKGROUND: Color = Color::srgb(0.04, 0.03, 0.12);
const STAR_COUNT: usize = 50;
const STAR_SIZE: f32 = 4.0;
/// Longest random delay before a star starts its cycle, in seconds.
const MAX_STAR_DELAY: f32 = 3.0;
/// Twinkle speed, radians per second.
const TWINKLE_SPEED: f32 = 2.0;
const MESSAGE_WIDTH: f32 = 600.0;

const CLOSING_MESSAGE: &str = "Hey there Kanishka, Sry For the late wish but why not make it a little special so this was something for you.Happiest Birthday to you! May your year be filled with joy, adventure, and amazing memories. You are loved and appreciated, I will be always there for you <3 - Pavitra";

#[derive(Component)]
struct Star {
    delay: f32,
}

fn setup_epilogue(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = EPILOGUE_BACKGROUND;

    let mut rng = rand::rng();
    for _ in 0..STAR_COUNT {
        let rect = CanvasRect::square(
            rng.random_range(0.0..CANVAS_WIDTH - STAR_SIZE),
            rng.random_range(0.0..CANVAS_HEIGHT - STAR_SIZE),
            STAR_SIZE,
        );
        spawn_visual(
            &mut commands,
            Sections::Epilogue,
            Visual::fill(rect, Color::WHITE, PROP_Z),
        )
        .insert(Star {
            delay: rng.random_range(0.0..MAX_STAR_DELAY),
        });
    }

    // Upper edge at 30% of the canvas height, like a page paragraph.
    let message = CanvasRect::new(
        (CANVAS_WIDTH - MESSAGE_WIDTH) / 2.0,
        CANVAS_HEIGHT * 0.3,
        MESSAGE_WIDTH,
        160.0,
    );
    spawn_visuals(
        &mut commands,
        Sections::Epilogue,
        [Visual::text(message, CLOSING_MESSAGE, 10.0, Color::WHITE)],
    );
}

/// Star brightness in [0.2, 1]; stars stay dim until their delay has passed.
fn star_alpha(elapsed: f32, delay: f32) -> f32 {
    let t = elapsed - delay;
    if t < 0.0 {
        return 0.2;
    }
    0.6 + 0.4 * (t * TWINKLE_SPEED).cos()
}

fn twinkle_stars(time: Res<Time>, mut stars: Query<(&Star, &mut Sprite)>) {
    let elapsed = time.elapsed_secs();
    for (star, mut sprite) in &mut stars {
        sprite.color.set_alpha(star_alpha(elapsed, star.delay));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{count, enter, hold_key, run_frames, section, tap_key, test_app};

    #[test]
    fn star_brightness_stays_in_range() {
        for step in 0..400 {
            let elapsed = step as f32 * 0.05;
            for delay in [0.0, 1.2, 2.9] {
                let alpha = star_alpha(elapsed, delay);
                assert!((0.199..=1.001).contains(&alpha), "alpha {alpha}");
            }
        }
        assert_eq!(star_alpha(0.5, 1.0), 0.2);
        assert!((star_alpha(1.0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn builds_sky_and_message() {
        let mut app = test_app();
        enter(&mut app, Sections::Epilogue);
        assert_eq!(count::<Star>(&mut app), STAR_COUNT);
        assert_eq!(app.world().resource::<ClearColor>().0, EPILOGUE_BACKGROUND);
    }

    #[test]
    fn epilogue_is_terminal() {
        let mut app = test_app();
        enter(&mut app, Sections::Epilogue);

        tap_key(&mut app, KeyCode::Enter);
        hold_key(&mut app, KeyCode::ArrowLeft);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        run_frames(&mut app, 150);

        assert_eq!(section(&app), Sections::Epilogue);
        assert_eq!(count::<Star>(&mut app), STAR_COUNT);
    }
}
