//! Player input
//!
//! Maps keys to actions and turns actions into commands addressed to the
//! player's aircraft. Movement and the gun follow held keys every tick; the
//! missile launcher reacts to key presses only.

use std::collections::BTreeMap;

use airstrike_engine::command::{Command, CommandQueue};
use airstrike_engine::foundation::math::Vec2;
use airstrike_engine::input::{InputEvent, InputState, KeyCode};
use airstrike_engine::scene::Category;
use serde::{Deserialize, Serialize};

use crate::entities::Aircraft;

/// Something the player can ask the aircraft to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Steer left
    MoveLeft,
    /// Steer right
    MoveRight,
    /// Steer up
    MoveUp,
    /// Steer down
    MoveDown,
    /// Fire the gun
    FireBullet,
    /// Launch a guided missile
    LaunchMissile,
}

impl PlayerAction {
    /// Every action
    pub const ALL: [Self; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveUp,
        Self::MoveDown,
        Self::FireBullet,
        Self::LaunchMissile,
    ];

    /// Whether the action repeats every tick while its key is held
    pub fn is_realtime(self) -> bool {
        !matches!(self, Self::LaunchMissile)
    }
}

/// Outcome of the current mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissionStatus {
    /// Still flying
    #[default]
    Running,
    /// Reached the end of the world
    Success,
    /// Player's aircraft was destroyed
    Failure,
}

/// Key bindings and the commands they produce
#[derive(Debug, Clone)]
pub struct PlayerControl {
    key_binding: BTreeMap<KeyCode, PlayerAction>,
    player_speed: f32,
    mission_status: MissionStatus,
}

impl PlayerControl {
    /// Default bindings: arrows steer, space fires, M launches a missile
    pub fn new(player_speed: f32) -> Self {
        let key_binding = BTreeMap::from([
            (KeyCode::Left, PlayerAction::MoveLeft),
            (KeyCode::Right, PlayerAction::MoveRight),
            (KeyCode::Up, PlayerAction::MoveUp),
            (KeyCode::Down, PlayerAction::MoveDown),
            (KeyCode::Space, PlayerAction::FireBullet),
            (KeyCode::M, PlayerAction::LaunchMissile),
        ]);

        Self {
            key_binding,
            player_speed,
            mission_status: MissionStatus::Running,
        }
    }

    /// Bind `key` to `action`, dropping any previous key of that action
    pub fn assign_key(&mut self, action: PlayerAction, key: KeyCode) {
        self.key_binding.retain(|_, bound| *bound != action);
        self.key_binding.insert(key, action);
    }

    /// Key bound to `action`
    pub fn assigned_key(&self, action: PlayerAction) -> Option<KeyCode> {
        self.key_binding
            .iter()
            .find_map(|(&key, &bound)| (bound == action).then_some(key))
    }

    /// Queue the command for a one-shot action on key press
    pub fn handle_event(&self, event: InputEvent, commands: &mut CommandQueue) {
        if let InputEvent::KeyPressed(key) = event {
            if let Some(&action) = self.key_binding.get(&key) {
                if !action.is_realtime() {
                    commands.push(self.command(action));
                }
            }
        }
    }

    /// Queue the commands for every held realtime action
    pub fn handle_realtime_input(&self, input: &InputState, commands: &mut CommandQueue) {
        for (&key, &action) in &self.key_binding {
            if input.is_pressed(key) && action.is_realtime() {
                commands.push(self.command(action));
            }
        }
    }

    /// Current mission outcome
    pub fn mission_status(&self) -> MissionStatus {
        self.mission_status
    }

    /// Record the mission outcome
    pub fn set_mission_status(&mut self, status: MissionStatus) {
        if status != self.mission_status {
            log::info!("Mission status: {:?} -> {:?}", self.mission_status, status);
        }
        self.mission_status = status;
    }

    fn command(&self, action: PlayerAction) -> Command {
        let speed = self.player_speed;
        let mover = move |direction: Vec2| {
            Command::for_behavior(Category::PLAYER_AIRCRAFT, move |aircraft: &mut Aircraft, _dt| {
                aircraft.accelerate(direction * speed);
            })
        };

        match action {
            PlayerAction::MoveLeft => mover(Vec2::new(-1.0, 0.0)),
            PlayerAction::MoveRight => mover(Vec2::new(1.0, 0.0)),
            PlayerAction::MoveUp => mover(Vec2::new(0.0, -1.0)),
            PlayerAction::MoveDown => mover(Vec2::new(0.0, 1.0)),
            PlayerAction::FireBullet => {
                Command::for_behavior(Category::PLAYER_AIRCRAFT, |aircraft: &mut Aircraft, _dt| aircraft.fire())
            }
            PlayerAction::LaunchMissile => Command::for_behavior(Category::PLAYER_AIRCRAFT, |aircraft: &mut Aircraft, _dt| {
                aircraft.launch_missile();
            }),
        }
    }
}
