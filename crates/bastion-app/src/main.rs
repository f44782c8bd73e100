use tracing::info;

use bastion_app::config::AppConfig;
use bastion_app::game_loop::spawn_game_loop;
use bastion_app::opening::opening_build;
use bastion_app::state::{new_latest_snapshot, GameLoopCommand};
use bastion_core::commands::PlayerCommand;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    info!(
        seed = config.seed,
        map = config.map,
        time_scale = config.time_scale,
        run_secs = config.run_for.as_secs(),
        "starting bastion"
    );

    let sim_config = config.sim_config();
    let opening = opening_build(&sim_config.map, 3);
    let latest = new_latest_snapshot();
    let (tx, handle) = spawn_game_loop(sim_config, latest.clone());

    let commands = std::iter::once(PlayerCommand::StartMatch).chain(opening);
    for command in commands {
        if tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
            break;
        }
    }

    std::thread::sleep(config.run_for);
    let _ = tx.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        tracing::error!("game loop thread panicked");
    }

    if let Ok(lock) = latest.lock() {
        if let Some(snapshot) = lock.as_ref() {
            info!(
                status = ?snapshot.status,
                wave = snapshot.player.wave,
                money = snapshot.player.money,
                lives = snapshot.player.lives,
                enemies = snapshot.enemies.len(),
                towers = snapshot.towers.len(),
                "final state"
            );
        }
    };
}
