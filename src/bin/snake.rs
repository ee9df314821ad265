use std::{convert::Infallible, sync::Arc, time::Duration};

use color_eyre::Result;
use itertools::Itertools;
use log::{debug, info};
use snake_royale::{
    pit::models::{MatchEvent, Status},
    referee::{Match, MatchConfig},
};
use tokio::{
    sync::Mutex,
    time::{self, MissedTickBehavior},
};
use warp::{http::Method, Filter};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

type SharedMatch = Arc<Mutex<Match>>;

async fn drive(arena: SharedMatch, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let events = arena.lock().await.tick();
        for event in events {
            match event {
                MatchEvent::FoodEaten { snake_id } => {
                    debug!("snake {snake_id} ate");
                },
                MatchEvent::MatchOver {
                    winner,
                    winner_alive,
                    scores,
                } => {
                    info!(
                        "snake {winner} ({}) wins! final scores: {}",
                        if winner_alive { "alive" } else { "dead" },
                        scores.iter().join(", ")
                    );
                },
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    #[cfg(debug_assertions)]
    info!("running in debug mode");

    #[cfg(not(debug_assertions))]
    info!("running in release mode");

    let config = MatchConfig::default();
    let period = Duration::from_secs(1) / u32::try_from(config.frame_rate)?;
    let arena: SharedMatch = Arc::new(Mutex::new(Match::from_entropy(config)?));

    tokio::spawn(drive(arena.clone(), period));

    let with_arena = warp::any().map(move || arena.clone());

    let cors = warp::cors()
        .allow_method(Method::GET)
        .allow_method(Method::POST)
        .allow_header("content-type")
        .allow_any_origin();

    let logging = warp::log(NAME);

    let healthz = warp::get()
        .and(warp::path::end())
        .and(with_arena.clone())
        .and_then(|arena: SharedMatch| async move {
            let phase = arena.lock().await.phase();
            Ok::<_, Infallible>(warp::reply::json(&Status {
                name: NAME.to_owned(),
                author: AUTHOR.to_owned(),
                version: VERSION.to_owned(),
                phase,
            }))
        });

    let snapshot = warp::get()
        .and(warp::path("snapshot"))
        .and(warp::path::end())
        .and(with_arena.clone())
        .and_then(|arena: SharedMatch| async move {
            let snapshot = arena.lock().await.snapshot();
            Ok::<_, Infallible>(warp::reply::json(&snapshot))
        });

    let command = warp::post()
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_arena)
        .and_then(|command: String, arena: SharedMatch| async move {
            let mut arena = arena.lock().await;
            match command.as_str() {
                "pause" => arena.pause(),
                "resume" => arena.resume(),
                "toggle" => arena.toggle_pause(),
                "reset" => arena.reset(),
                _ => return Err(warp::reject::not_found()),
            }
            info!("{command} -> {:?}", arena.phase());
            Ok(warp::reply::json(&arena.snapshot()))
        });

    let api = healthz.or(snapshot).or(command).with(cors).with(logging);

    warp::serve(api).run(([0, 0, 0, 0], 6502)).await;

    Ok(())
}
