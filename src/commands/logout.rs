use crate::api::{self, Mode};
use crate::commands::Out;
use crate::history::HistoryView;
use crate::prompt::Prompt;
use crate::{Config, Result};

/// Asks for confirmation, then forgets the stored session. No request is sent to the server.
pub async fn logout(
    mut config: Config,
    mode: Mode,
    prompt: &mut (dyn Prompt + Send),
) -> Result<Out<()>> {
    if config.session().is_signed_out() {
        return Ok("You are not signed in".into());
    }
    let mut view = HistoryView::new(api::wallet(&config, mode), config.session().clone());
    if !view.logout(prompt).await? {
        return Ok("You are still signed in".into());
    }
    config.save_session(view.session().clone()).await?;
    Ok("Signed out".into())
}
