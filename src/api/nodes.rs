use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, rt, web};
use log::{debug, info, warn};

use super::models::{
    AppState, ErrorResponse, NodesResponse, RegisterNodesRequest, RegisterNodesResponse,
    ResolveResponse,
};
use crate::consensus::Resolution;

/// Register one or more peers. The whole request is rejected if any
/// address is unusable.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Please supply a valid list of nodes".to_string(),
        });
    }

    if let Err(e) = state.node.register_peers(&body.nodes) {
        warn!("POST /nodes/register/ - {e}");
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: e.to_string(),
        });
    }

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: state.node.peers(),
    })
}

/// List known peers.
#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(NodesResponse {
        nodes: state.node.peers(),
    })
}

/// Run consensus against every known peer.
#[get("/nodes/resolve/")]
pub async fn resolve_nodes(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let result = web::block(move || worker.resolve_conflicts()).await;

    let replaced = match result {
        Ok(Ok(resolution)) => resolution.replaced(),
        Ok(Err(e)) => {
            warn!("GET /nodes/resolve/ - cannot build peer client: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "peer client unavailable".to_string(),
            });
        }
        Err(e) => {
            warn!("GET /nodes/resolve/ - worker failed: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "consensus worker failed".to_string(),
            });
        }
    };

    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };

    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        chain: state.node.chain_snapshot().chain,
    })
}

/// Run consensus on a fixed interval for the lifetime of the server.
pub fn spawn_periodic_resolve(state: web::Data<AppState>, every: Duration) {
    rt::spawn(async move {
        let mut ticker = rt::time::interval(every);
        // The first tick fires immediately; let peers come up first.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let worker = state.clone();
            match web::block(move || worker.resolve_conflicts()).await {
                Ok(Ok(Resolution::Replaced(chain))) => {
                    info!("CONSENSUS - periodic round adopted {} blocks", chain.len())
                }
                Ok(Ok(Resolution::Kept)) => debug!("CONSENSUS - periodic round kept chain"),
                Ok(Err(e)) => warn!("CONSENSUS - cannot build peer client: {e}"),
                Err(e) => warn!("CONSENSUS - periodic worker failed: {e}"),
            }
        }
    });
}
