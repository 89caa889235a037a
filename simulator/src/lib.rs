use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use crown_anchor_execution::{crown::GameSession, Store};
use crown_anchor_types::{
    api::Intent,
    crown::{encode_receipt, AchievementId, AchievementInfo, RoundSummary, SessionSnapshot},
};
use serde::Serialize;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

pub mod config;

/// Session served by the simulator, backed by whichever store was configured.
pub type Session = GameSession<Box<dyn Store + Send>>;

pub struct Simulator {
    session: Mutex<Session>,
    revealing: AtomicBool,
    reveal_delay: Duration,
}

/// Held while a roll is pending reveal. Dropping it reopens the table.
pub struct Reveal<'a> {
    flag: &'a AtomicBool,
}

impl Drop for Reveal<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Simulator {
    pub fn new(session: Session, reveal_delay: Duration) -> Self {
        Self {
            session: Mutex::new(session),
            revealing: AtomicBool::new(false),
            reveal_delay,
        }
    }

    /// Claim the table for a roll. Returns `None` if another roll is still
    /// being revealed.
    pub fn begin_reveal(&self) -> Option<Reveal<'_>> {
        self.revealing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Reveal {
                flag: &self.revealing,
            })
    }

    pub fn is_revealing(&self) -> bool {
        self.revealing.load(Ordering::Acquire)
    }

    /// Run `f` against the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        match self.session.lock() {
            Ok(mut session) => Some(f(&mut session)),
            Err(e) => {
                error!("Failed to acquire session lock: {}", e);
                None
            }
        }
    }
}

/// Session state as exposed over HTTP. The seed stays private until the
/// session ends; only its commitment is published.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub commitment: String,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub summary: RoundSummary,
    pub receipt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementView {
    pub id: AchievementId,
    #[serde(flatten)]
    pub info: AchievementInfo,
    pub unlocked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub commitment: String,
    pub round: u64,
}

pub struct Api {
    simulator: Arc<Simulator>,
}

impl Api {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/intent", post(submit_intent))
            .route("/state", get(query_state))
            .route("/history", get(query_history))
            .route("/achievements", get(query_achievements))
            .route("/commitment", get(query_commitment))
            .layer(cors)
            .with_state(self.simulator.clone())
    }
}

fn conflict() -> Response {
    (StatusCode::CONFLICT, "a roll is being revealed").into_response()
}

async fn submit_intent(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    body: Bytes,
) -> Response {
    let intent: Intent = match serde_json::from_slice(&body) {
        Ok(intent) => intent,
        Err(e) => {
            debug!("rejected malformed intent: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    // Nothing may touch the table while a roll is pending.
    let reveal = match intent {
        Intent::Roll => match simulator.begin_reveal() {
            Some(reveal) => Some(reveal),
            None => return conflict(),
        },
        ref intent if intent.mutates() && simulator.is_revealing() => return conflict(),
        _ => None,
    };
    // The roll settles before the pause, so a dropped request still completes it.
    let response = simulator.with_session(|session| session.dispatch(intent));
    if reveal.is_some() && !simulator.reveal_delay.is_zero() {
        tokio::time::sleep(simulator.reveal_delay).await;
    }
    drop(reveal);
    match response {
        Some(response) => Json(response).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn query_state(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    let view = simulator.with_session(|session| {
        let mut snapshot = session.snapshot();
        snapshot.seed = None;
        StateView {
            commitment: session.commitment(),
            snapshot,
        }
    });
    match view {
        Some(view) => Json(view).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn query_history(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    let entries = simulator.with_session(|session| {
        session
            .progression()
            .history
            .iter()
            .map(|summary| HistoryEntry {
                receipt: encode_receipt(summary),
                summary: summary.clone(),
            })
            .collect::<Vec<_>>()
    });
    match entries {
        Some(entries) => Json(entries).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn query_achievements(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    let views = simulator.with_session(|session| {
        AchievementId::ALL
            .iter()
            .map(|&id| AchievementView {
                id,
                info: id.info(),
                unlocked: session.achievements().is_unlocked(id),
            })
            .collect::<Vec<_>>()
    });
    match views {
        Some(views) => Json(views).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn query_commitment(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    let commitment = simulator.with_session(|session| Commitment {
        commitment: session.commitment(),
        round: session.round(),
    });
    match commitment {
        Some(commitment) => Json(commitment).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
