mod frame_input;
mod ui_render;
mod ui_text;
mod window_config;

use std::env;
use std::process::ExitCode;

use app::app_loop::AppState;
use app::config_file;
use app::launch_args::{SeedChoice, generate_runtime_seed, parse_launch_args};
use crawler_core::LevelState;
use macroquad::Window;
use macroquad::prelude::{BLACK, clear_background, next_frame};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let launch = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(launch) => launch,
        Err(message) => {
            eprintln!("crawler: {message}");
            return ExitCode::FAILURE;
        }
    };
    let logger = TermLogger::init(
        launch.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(err) = logger {
        eprintln!("crawler: logging unavailable: {err}");
    }

    let config_path = config_file::resolve_path(env::var_os(config_file::CONFIG_PATH_ENV));
    let config = match config_file::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("cannot load config {config_path:?}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let seed = launch.seed.value();
    if let SeedChoice::Generated(seed) = launch.seed {
        log::info!("no --seed given, using {seed}");
    }
    let level = match LevelState::with_seed(config.clone(), seed) {
        Ok(level) => level,
        Err(err) => {
            log::error!("cannot start a run: {err}");
            return ExitCode::FAILURE;
        }
    };

    Window::from_config(window_config::build_window_conf(&config.map), run(level, seed));
    ExitCode::SUCCESS
}

async fn run(mut level: LevelState, seed: u64) {
    let mut app_state = AppState::new();
    loop {
        app_state.tick(&mut level, &frame_input::capture_keys_pressed());
        if app_state.quit_requested {
            log::info!("quit on level {}", level.level_number());
            break;
        }

        clear_background(BLACK);
        ui_render::draw_frame(&level, &app_state, seed);
        next_frame().await;
    }
}
