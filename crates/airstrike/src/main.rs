//! Headless Airstrike runner
//!
//! Flies the mission with a scripted pilot at a fixed update rate, recording
//! each frame into a draw list, and logs frame statistics and the outcome.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use airstrike::assets::{load_textures, placeholder_textures};
use airstrike::config::GameConfig;
use airstrike::player_control::{MissionStatus, PlayerControl};
use airstrike::world::World;
use airstrike::GameError;
use airstrike_engine::config::Config;
use airstrike_engine::foundation::logging;
use airstrike_engine::foundation::time::{FixedTimestep, FrameStatistics, Timer};
use airstrike_engine::input::{InputEvent, InputState, KeyCode};
use airstrike_engine::render::DrawList;
use clap::{Arg, Command};

/// Scripted pilot: keeps the trigger down, weaves sideways and fires a
/// missile every few seconds
struct Autopilot {
    elapsed: f32,
    steering: KeyCode,
}

impl Autopilot {
    const WEAVE_PERIOD: f32 = 2.0;
    const MISSILE_PERIOD: f32 = 5.0;

    fn new() -> Self {
        Self {
            elapsed: 0.0,
            steering: KeyCode::Left,
        }
    }

    fn events(&mut self, dt: f32) -> Vec<InputEvent> {
        let before = self.elapsed;
        self.elapsed += dt;
        let crossed = |period: f32| (before / period).floor() != (self.elapsed / period).floor();

        let mut events = Vec::new();
        if before == 0.0 {
            events.push(InputEvent::KeyPressed(KeyCode::Space));
            events.push(InputEvent::KeyPressed(self.steering));
        }
        if crossed(Self::WEAVE_PERIOD) {
            events.push(InputEvent::KeyReleased(self.steering));
            self.steering = if self.steering == KeyCode::Left {
                KeyCode::Right
            } else {
                KeyCode::Left
            };
            events.push(InputEvent::KeyPressed(self.steering));
        }
        if crossed(Self::MISSILE_PERIOD) {
            events.push(InputEvent::KeyPressed(KeyCode::M));
            events.push(InputEvent::KeyReleased(KeyCode::M));
        }
        events
    }
}

fn main() -> Result<(), GameError> {
    logging::init();

    let matches = Command::new("airstrike")
        .about("Runs an Airstrike mission headless with a scripted pilot")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("RON or TOML game configuration"),
        )
        .arg(
            Arg::new("media")
                .short('m')
                .long("media")
                .value_name("DIR")
                .help("Directory holding the texture files (placeholders are used otherwise)"),
        )
        .arg(
            Arg::new("seconds")
                .short('s')
                .long("seconds")
                .value_name("SECONDS")
                .help("Longest mission time to simulate")
                .value_parser(clap::value_parser!(f32))
                .default_value("30"),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    let mut textures = match matches.get_one::<String>("media") {
        Some(dir) => load_textures(PathBuf::from(dir))?,
        None => placeholder_textures(),
    };
    let max_seconds = matches.get_one::<f32>("seconds").copied().unwrap_or(30.0);

    let mut world = World::new(&config, &mut textures)?;
    let mut control = PlayerControl::new(config.world.player_speed);
    let mut input = InputState::new();
    let mut pilot = Autopilot::new();

    let mut timestep = FixedTimestep::from_rate(config.world.updates_per_second);
    let dt = timestep.delta().as_secs_f32();
    let mut timer = Timer::new();
    let mut statistics = FrameStatistics::new();
    let mut frame = DrawList::new();
    let mut simulated = 0.0;

    while control.mission_status() == MissionStatus::Running && simulated < max_seconds {
        let elapsed = timer.restart();
        timestep.accumulate(elapsed);

        while timestep.step() {
            for event in pilot.events(dt) {
                input.handle_event(event);
                control.handle_event(event, world.command_queue());
            }
            control.handle_realtime_input(&input, world.command_queue());

            world.update(dt);
            simulated += dt;

            if !world.has_alive_player() {
                control.set_mission_status(MissionStatus::Failure);
                break;
            }
            if world.has_player_reached_end() {
                control.set_mission_status(MissionStatus::Success);
                break;
            }
        }

        frame.clear();
        world.draw(&mut frame);

        if statistics.record(elapsed) {
            log::info!(
                "FPS: {} | time/update: {:?} | draw calls: {} | nodes: {}",
                statistics.frames_per_second(),
                statistics.time_per_update(),
                frame.len(),
                world.graph().len()
            );
        }

        thread::sleep(Duration::from_millis(1));
    }

    log::info!(
        "Mission ended after {simulated:.1}s: {:?}",
        control.mission_status()
    );
    Ok(())
}
