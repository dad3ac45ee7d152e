use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::Claims;

#[derive(Debug, Serialize)]
pub struct Joke {
    pub id: &'static str,
    pub joke: &'static str,
}

const JOKES: [Joke; 3] = [
    Joke {
        id: "0189hNRf2g",
        joke: "I'm tired of following my dreams. I'm just going to ask them where they are going and meet up with them later.",
    },
    Joke {
        id: "08EQZ8EQukb",
        joke: "Did you hear about the guy whose whole left side was cut off? He's all right now.",
    },
    Joke {
        id: "08xHQCdx5Ed",
        joke: "Why didn't the skeleton cross the road? Because he had no guts.",
    },
];

/// GET /api/jokes
///
/// Requires a valid token; claims are injected by `TokenGuard`.
pub async fn get_jokes(claims: web::ReqData<Claims>) -> HttpResponse {
    tracing::debug!(user_id = claims.subject, "Serving jokes");
    HttpResponse::Ok().json(&JOKES)
}
