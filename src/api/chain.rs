use actix_web::{HttpResponse, Responder, get, post, put, web};
use log::{debug, info, warn};
use serde_json::Value;

use super::models::{
    AppState, BlockResponse, ChainResponse, ErrorResponse, ModifyRequest, ValidateResponse,
};
use crate::blockchain::{ChainError, MINED_BLOCK_LABEL};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.chain();
    let resp = ChainResponse {
        length: bc.len(),
        difficulty: bc.difficulty(),
        chain: bc.blocks(),
    };
    HttpResponse::Ok().json(resp)
}

/// Get a single block by its 1-based index.
#[get("/blocks/{index}/")]
pub async fn get_block(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let index = path.into_inner();
    let bc = state.chain();
    match bc.get(index) {
        Ok(block) => HttpResponse::Ok().json(block),
        Err(e) => error_response(&e),
    }
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.chain();
    let resp = ValidateResponse {
        valid: bc.is_valid_chain(),
        length: bc.len(),
        difficulty: bc.difficulty(),
    };
    debug!("VALIDATE - length={} valid={}", resp.length, resp.valid);
    HttpResponse::Ok().json(resp)
}

/// Mine a new block against the current head.
///
/// The search runs on the blocking pool; the chain stays readable meanwhile.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker_state = state.clone();
    let result = web::block(move || worker_state.mine(Value::from(MINED_BLOCK_LABEL))).await;

    match result {
        Ok(Ok(block)) => {
            info!(
                "MINER - sealed block #{} (hash={}, pow={:?})",
                block.index, block.hash, block.proof_of_work
            );
            HttpResponse::Ok().json(BlockResponse {
                message: "New block has been mined!".to_string(),
                block,
            })
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            warn!("MINER - blocking task failed: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "mining task failed".to_string(),
            })
        }
    }
}

/// Overwrite a block's payload in place (dev tool: breaks later links).
#[put("/blocks/{index}/")]
pub async fn modify_block(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<ModifyRequest>,
) -> impl Responder {
    let index = path.into_inner();
    let mut bc = state.chain();
    match bc.modify_block(index, body.into_inner().data) {
        Ok(block) => HttpResponse::Ok().json(BlockResponse {
            message: format!("Block #{index} modified successfully"),
            block: block.clone(),
        }),
        Err(e) => error_response(&e),
    }
}

/* -------------------- Helpers -------------------- */

fn error_response(err: &ChainError) -> HttpResponse {
    warn!("API - request failed: {err}");
    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        ChainError::InvalidIndex { .. } => HttpResponse::NotFound().json(body),
        ChainError::SearchOverflow { .. } | ChainError::SearchExhausted { .. } => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        ChainError::EmptyChain => HttpResponse::InternalServerError().json(body),
    }
}
