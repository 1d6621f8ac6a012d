use crate::api::{self, Mode};
use crate::commands::Out;
use crate::history::{HistoryReport, HistoryView};
use crate::{Config, Result};
use anyhow::Context;

/// Loads the signed-in user's transactions and renders the history screen.
pub async fn history(config: Config, mode: Mode) -> Result<Out<HistoryReport>> {
    let mut view = HistoryView::new(api::wallet(&config, mode), config.session().clone());
    view.mount()
        .await
        .context("Unable to load the transaction history")?;
    let report = view.render();
    Ok(Out::new(report.to_string(), report))
}
