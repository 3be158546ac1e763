use lexi_core::profile::ProfileChange;
use lexi_types::{CefrLevel, Skill};

use crate::events::Reader;
use crate::events::catalog::handle_show_home;

pub async fn handle_level_update(
    reader: &mut Reader,
    skill: Option<Skill>,
    level: Option<CefrLevel>,
) -> anyhow::Result<()> {
    let change = match (skill, level) {
        (None, Some(level)) => ProfileChange::GeneralLevel(level),
        (Some(skill), level) => ProfileChange::SkillLevel(skill, level),
        (None, None) => return reader.status("The general level can't be cleared").await,
    };

    match reader.state.update_profile(&[change]).await {
        Ok(profile) => {
            tracing::info!("Profile updated, general level {}", profile.general_level);
            if reader.lesson.is_none() {
                handle_show_home(reader).await?;
            }
            reader.status("Profile saved").await
        }
        Err(e) => {
            tracing::error!("Failed to save profile: {}", e);
            reader.status(format!("Could not save profile: {e}")).await
        }
    }
}
