//! Per-schedule capacity fetch.

use dioxus::prelude::*;

use way_shared::capacity::CapacityBoard;

use crate::api_client::ApiClient;
use crate::log_warn;

/// Fetch the capacity snapshot for one schedule on mount.
///
/// Failures fall back to an empty board, which reads as "not full"
/// everywhere; the server's own conflict check still protects a genuinely
/// full session.
pub fn use_capacity(schedule_id: String) -> Resource<CapacityBoard> {
    use_resource(move || {
        let schedule_id = schedule_id.clone();
        async move {
            match ApiClient::new().schedule_capacity(&schedule_id).await {
                Ok(report) => CapacityBoard::from_report(&report),
                Err(err) => {
                    log_warn!("capacity fetch failed for {schedule_id}: {err}");
                    CapacityBoard::default()
                }
            }
        }
    })
}
