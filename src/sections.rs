/// Game sections, played strictly in declaration order.
use bevy::prelude::*;

pub struct SectionsPlugin;

impl Plugin for SectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Sections>()
            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Movement,
                    GameSet::Rules,
                    GameSet::Present,
                )
                    .chain(),
            )
            .add_systems(Update, log_section.run_if(state_changed::<Sections>));
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Sections {
    #[default]
    Boot,
    /// Spawn room with the glowing tile.
    Room1,
    /// Memory crystal room.
    Room2,
    Countdown,
    Reveal,
    /// Terminal: nothing leaves this section.
    Epilogue,
}

impl Sections {
    /// Label shown by the level indicator while the section is active.
    pub fn indicator(self) -> &'static str {
        match self {
            Sections::Boot => "",
            Sections::Room1 => "LEVEL: 1",
            Sections::Room2 => "LEVEL: 2",
            Sections::Countdown => "LEVEL: 3",
            Sections::Reveal => "FINAL",
            Sections::Epilogue => "EPILOGUE",
        }
    }
}

/// Per-tick ordering shared by every section: read input, move, apply
/// section rules (collisions, timers, transitions), then draw.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Movement,
    Rules,
    Present,
}

fn log_section(section: Res<State<Sections>>) {
    info!("entered section {:?}", section.get());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_labels_follow_play_order() {
        let labels: Vec<_> = [
            Sections::Room1,
            Sections::Room2,
            Sections::Countdown,
            Sections::Reveal,
            Sections::Epilogue,
        ]
        .into_iter()
        .map(Sections::indicator)
        .collect();
        assert_eq!(
            labels,
            ["LEVEL: 1", "LEVEL: 2", "LEVEL: 3", "FINAL", "EPILOGUE"]
        );
        assert!(Sections::Boot.indicator().is_empty());
    }

    #[test]
    fn starts_in_boot() {
        let app = crate::testing::test_app();
        assert_eq!(crate::testing::section(&app), Sections::Boot);
    }
}
