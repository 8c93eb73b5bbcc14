use futures_util::future::join_all;
use tracing::{debug, warn};

use reletter_types::models::DiaryEntry;

use crate::api::DiaryApi;

/// Settlement counts for one mark-read fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Mark every entry read, already-read ones included.
///
/// Requests run concurrently and are joined only once all of them have
/// settled; a failed request is logged and counted but never stops its
/// siblings.
pub async fn mark_all_read<A>(api: &A, diaries: &[DiaryEntry], token: &str) -> MarkReport
where
    A: DiaryApi + ?Sized,
{
    let settled = join_all(diaries.iter().map(|diary| async move {
        match api.mark_read(&diary.id, token).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to mark diary '{}' as read: {}", diary.id, e);
                false
            }
        }
    }))
    .await;

    let succeeded = settled.iter().filter(|ok| **ok).count();
    let report = MarkReport {
        succeeded,
        failed: settled.len() - succeeded,
    };
    debug!("Mark-read settled: {} ok, {} failed", report.succeeded, report.failed);
    report
}
