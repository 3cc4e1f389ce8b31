use actix_web::{
    body::BoxBody,
    error, get,
    http::{header::ContentType, StatusCode},
    post, web, App, HttpResponse, HttpServer,
};
use blackjack_engine::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A struct for handling the configuration of a new game. Meant to be
/// deserialized from JSON; omitted fields take the reference defaults.
#[derive(Debug, Deserialize)]
struct NewGameConfig {
    bankroll: Option<i64>,
    bet: Option<i64>,
    seed: Option<u64>,
}

impl From<NewGameConfig> for EngineConfig {
    fn from(value: NewGameConfig) -> Self {
        let mut builder = EngineConfig::new();
        if let Some(bankroll) = value.bankroll {
            builder.starting_bankroll(bankroll);
        }
        if let Some(bet) = value.bet {
            builder.bet(bet);
        }
        if let Some(seed) = value.seed {
            builder.shoe_seed(seed);
        }
        builder.build()
    }
}

/// An enum that will handle user facing errors
#[derive(Debug)]
enum UserError {
    InternalError,
    GameNotCreated,
    InvalidCommand(String),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::InternalError => write!(f, "an internal error occured"),
            UserError::GameNotCreated => {
                write!(f, "no game has been created, POST /game first")
            }
            UserError::InvalidCommand(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for UserError {}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::GameNotCreated => StatusCode::BAD_REQUEST,
            UserError::InvalidCommand(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// The current table state serialized for clients.
#[derive(Serialize)]
struct GameStateJson {
    round: RoundSnapshot,
    bankroll: i64,
    bet: i64,
    reshuffles: u32,
}

struct AppState {
    engine: Mutex<Option<RoundEngine>>,
}

fn state_json(engine: &RoundEngine) -> GameStateJson {
    GameStateJson {
        round: engine.snapshot(),
        bankroll: engine.bankroll(),
        bet: engine.bet(),
        reshuffles: engine.reshuffle_count(),
    }
}

/// Creates a fresh game from the posted configuration, replacing any game in
/// progress, and deals the first round.
#[post("/game")]
async fn new_game(
    data: web::Data<AppState>,
    config: web::Json<NewGameConfig>,
) -> Result<HttpResponse, UserError> {
    let mut engine = RoundEngine::new(config.into_inner().into());
    engine
        .start_round()
        .map_err(|e| UserError::InvalidCommand(e.to_string()))?;
    let body = state_json(&engine);
    let mut guard = data
        .engine
        .lock()
        .map_err(|_| UserError::InternalError)?;
    *guard = Some(engine);
    Ok(HttpResponse::Ok().json(body))
}

/// Deals one card to the player's hand.
#[post("/game/hit")]
async fn hit(data: web::Data<AppState>) -> Result<HttpResponse, UserError> {
    let mut guard = data
        .engine
        .lock()
        .map_err(|_| UserError::InternalError)?;
    let engine = guard.as_mut().ok_or(UserError::GameNotCreated)?;
    let report = engine
        .hit()
        .map_err(|e| UserError::InvalidCommand(e.to_string()))?;
    Ok(HttpResponse::Ok().json(report))
}

/// Stops the player's turn and lets the dealer play out.
#[post("/game/stand")]
async fn stand(data: web::Data<AppState>) -> Result<HttpResponse, UserError> {
    let mut guard = data
        .engine
        .lock()
        .map_err(|_| UserError::InternalError)?;
    let engine = guard.as_mut().ok_or(UserError::GameNotCreated)?;
    let report = engine
        .stand()
        .map_err(|e| UserError::InvalidCommand(e.to_string()))?;
    Ok(HttpResponse::Ok().json(report))
}

/// Returns the current round, bankroll and reshuffle count.
#[get("/game")]
async fn game_state(data: web::Data<AppState>) -> Result<HttpResponse, UserError> {
    let guard = data
        .engine
        .lock()
        .map_err(|_| UserError::InternalError)?;
    let engine = guard.as_ref().ok_or(UserError::GameNotCreated)?;
    Ok(HttpResponse::Ok().json(state_json(engine)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let data = web::Data::new(AppState {
        engine: Mutex::new(None),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(new_game)
            .service(hit)
            .service(stand)
            .service(game_state)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
