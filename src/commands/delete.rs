//! Delete command handler.

use crate::api::{self, Mode};
use crate::commands::Out;
use crate::history::{DeleteOutcome, HistoryReport, HistoryView};
use crate::model::TransactionId;
use crate::prompt::Prompt;
use crate::{Config, Result};
use anyhow::Context;

/// Deletes one transaction by ID after asking `prompt` for confirmation, then re-renders the
/// history.
///
/// The ID is sent to the server even if it is not in the history the server just returned. If
/// the initial load fails the delete is still attempted.
pub async fn delete(
    config: Config,
    mode: Mode,
    id: TransactionId,
    prompt: &mut (dyn Prompt + Send),
) -> Result<Out<HistoryReport>> {
    let mut view = HistoryView::new(api::wallet(&config, mode), config.session().clone());
    // A failed load is logged by the view and does not block the delete
    let _ = view.mount().await;

    match view.delete(&id, prompt).await {
        DeleteOutcome::Declined => Ok(Out::new("Nothing was deleted", view.render())),
        DeleteOutcome::Deleted { remaining } => {
            let _ = view.sync().await;
            let report = view.render();
            let message = format!(
                "Deleted transaction {id}, {remaining} transaction{} left\n{report}",
                if remaining == 1 { "" } else { "s" }
            );
            Ok(Out::new(message, report))
        }
        DeleteOutcome::Failed(e) => {
            Err(e).with_context(|| format!("Unable to delete transaction {id}"))
        }
    }
}
