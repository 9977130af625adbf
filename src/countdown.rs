// Countdown section: the boss pulses while a ten second clock runs out.

use std::time::Duration;

use bevy::prelude::*;

use crate::canvas::{ACTOR_Z, CANVAS_WIDTH, CanvasRect, Visual, room_floor, spawn_visual, spawn_visuals};
use crate::sections::{GameSet, Sections};

pub struct CountdownPlugin;

impl Plugin for CountdownPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Countdown), setup_countdown)
            .add_systems(OnExit(Sections::Countdown), exit_countdown)
            .add_systems(
                Update,
                (
                    tick_countdown.in_set(GameSet::Rules),
                    (show_remaining, pulse_boss).in_set(GameSet::Present),
                )
                    .run_if(in_state(Sections::Countdown)),
            );
    }
}

pub const COUNTDOWN_START: u32 = 10;
const BOSS_RECT: CanvasRect = CanvasRect::square(336.0, 236.0, 128.0);
const BOSS_COLOR: Color = Color::srgb(0.8, 0.2, 0.35);
/// Pulse speed, radians per millisecond.
const PULSE_RATE: f32 = 0.005;
const PULSE_DEPTH: f32 = 0.1;

/// Whole seconds left before the reveal. Never goes below zero.
#[derive(Resource, Debug)]
pub struct BossCountdown {
    remaining: u32,
    second: Timer,
}

impl BossCountdown {
    pub fn new(start: u32) -> Self {
        Self {
            remaining: start,
            second: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance the clock; takes one off per whole second elapsed, including
    /// several at once after a long frame. Returns true once it reads zero.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if self.remaining > 0 {
            self.second.tick(delta);
            let seconds = self.second.times_finished_this_tick();
            self.remaining = self.remaining.saturating_sub(seconds);
            if seconds > 0 {
                debug!("countdown at {}", self.remaining);
            }
        }
        self.remaining == 0
    }

    fn label(&self) -> String {
        format!("TIME: {}", self.remaining())
    }
}

#[derive(Component)]
struct Boss;

#[derive(Component)]
struct TimerDisplay;

fn setup_countdown(mut commands: Commands) {
    let countdown = BossCountdown::new(COUNTDOWN_START);
    let label = countdown.label();
    commands.insert_resource(countdown);

    spawn_visuals(&mut commands, Sections::Countdown, room_floor());
    spawn_visual(
        &mut commands,
        Sections::Countdown,
        Visual::fill(BOSS_RECT, BOSS_COLOR, ACTOR_Z),
    )
    .insert(Boss);
    spawn_visual(
        &mut commands,
        Sections::Countdown,
        Visual::text(
            CanvasRect::new(0.0, 14.0, CANVAS_WIDTH, 24.0),
            label,
            12.0,
            Color::WHITE,
        ),
    )
    .insert(TimerDisplay);
}

fn tick_countdown(
    time: Res<Time>,
    mut countdown: ResMut<BossCountdown>,
    mut next_section: ResMut<NextState<Sections>>,
) {
    if countdown.advance(time.delta()) {
        next_section.set(Sections::Reveal);
    }
}

fn show_remaining(
    countdown: Res<BossCountdown>,
    mut display: Query<&mut Text2d, With<TimerDisplay>>,
) {
    if !countdown.is_changed() {
        return;
    }
    let Ok(mut text) = display.single_mut() else {
        return;
    };
    text.0 = countdown.label();
}

/// Boss scale oscillates by ±10% around its resting size.
fn pulse_scale(elapsed: Duration) -> f32 {
    1.0 + (elapsed.as_millis() as f32 * PULSE_RATE).sin() * PULSE_DEPTH
}

fn pulse_boss(time: Res<Time>, mut boss: Query<&mut Transform, With<Boss>>) {
    let Ok(mut transform) = boss.single_mut() else {
        return;
    };
    transform.scale = Vec3::splat(pulse_scale(time.elapsed()));
}

fn exit_countdown(mut commands: Commands) {
    commands.remove_resource::<BossCountdown>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{count, enter, run_frames, section, test_app};

    #[test]
    fn takes_one_per_whole_second() {
        let mut countdown = BossCountdown::new(COUNTDOWN_START);
        assert!(!countdown.advance(Duration::from_millis(999)));
        assert_eq!(countdown.remaining(), 10);
        assert!(!countdown.advance(Duration::from_millis(1)));
        assert_eq!(countdown.remaining(), 9);
        for _ in 0..4 {
            countdown.advance(Duration::from_millis(250));
        }
        assert_eq!(countdown.remaining(), 8);
    }

    #[test]
    fn long_frame_counts_every_second_but_stops_at_zero() {
        let mut countdown = BossCountdown::new(COUNTDOWN_START);
        assert!(!countdown.advance(Duration::from_secs(3)));
        assert_eq!(countdown.remaining(), 7);
        assert!(countdown.advance(Duration::from_secs(60)));
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.advance(Duration::from_secs(1)));
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn pulse_stays_within_ten_percent() {
        for ms in (0..10_000).step_by(37) {
            let scale = pulse_scale(Duration::from_millis(ms));
            assert!((0.9..=1.1).contains(&scale), "scale {scale} at {ms}ms");
        }
        assert_eq!(pulse_scale(Duration::ZERO), 1.0);
    }

    #[test]
    fn label_tracks_remaining() {
        let mut countdown = BossCountdown::new(COUNTDOWN_START);
        assert_eq!(countdown.label(), "TIME: 10");
        countdown.advance(Duration::from_secs(4));
        assert_eq!(countdown.label(), "TIME: 6");
    }

    #[test]
    fn runs_down_to_reveal() {
        let mut app = test_app();
        enter(&mut app, Sections::Countdown);
        assert_eq!(count::<Boss>(&mut app), 1);
        assert_eq!(
            app.world().resource::<BossCountdown>().remaining(),
            COUNTDOWN_START
        );

        run_frames(&mut app, 15);
        assert_eq!(app.world().resource::<BossCountdown>().remaining(), 9);
        assert_eq!(section(&app), Sections::Countdown);

        run_frames(&mut app, 90);
        assert_eq!(section(&app), Sections::Reveal);
        assert_eq!(count::<Boss>(&mut app), 0);
    }
}
