use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use actix_web::rt::task::JoinHandle;
use actix_web::{HttpResponse, Responder, post, rt, web};
use log::{info, warn};

use super::models::{AppState, ErrorResponse, MineResponse};

/// Mine a new block from the pending pool:
/// - Solve the puzzle against the current last block (off the async runtime)
/// - Credit the mining reward to this node
/// - Seal and append the block
///
/// With a mining timeout configured the search is cancelled once it runs
/// out, and the request fails with 503.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let cancel = Arc::new(AtomicBool::new(false));
    let deadline = state
        .mining_timeout
        .map(|timeout| arm_deadline(timeout, Arc::clone(&cancel)));

    let worker = state.clone();
    let worker_cancel = Arc::clone(&cancel);
    let result = web::block(move || worker.node.mine(&worker_cancel)).await;

    if let Some(timer) = deadline {
        timer.abort();
    }

    match result {
        Ok(Ok(block)) => {
            info!("POST /mine/ - forged block #{}", block.index);
            HttpResponse::Ok().json(MineResponse::from(block))
        }
        Ok(Err(e)) => {
            warn!("POST /mine/ - {e}");
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: e.to_string(),
            })
        }
        Err(e) => {
            warn!("POST /mine/ - worker failed: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "mining worker failed".to_string(),
            })
        }
    }
}

/// Raise `cancel` once `timeout` has elapsed.
fn arm_deadline(timeout: Duration, cancel: Arc<AtomicBool>) -> JoinHandle<()> {
    rt::spawn(async move {
        rt::time::sleep(timeout).await;
        cancel.store(true, Ordering::Relaxed);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn deadline_raises_flag() {
        let cancel = Arc::new(AtomicBool::new(false));
        let timer = arm_deadline(Duration::from_millis(10), Arc::clone(&cancel));
        timer.await.expect("timer task");
        assert!(cancel.load(Ordering::Relaxed));
    }

    #[actix_web::test]
    async fn aborted_deadline_stays_quiet() {
        let cancel = Arc::new(AtomicBool::new(false));
        let timer = arm_deadline(Duration::from_millis(20), Arc::clone(&cancel));
        timer.abort();
        rt::time::sleep(Duration::from_millis(60)).await;
        assert!(!cancel.load(Ordering::Relaxed));
    }
}
