use lexi_core::Resolution;
use lexi_types::LookupResult;

use crate::events::Reader;
use crate::events::activate_word::show_popover;

pub async fn handle_lookup_resolved(
    reader: &mut Reader,
    generation: u64,
    instance: usize,
    result: LookupResult,
) -> anyhow::Result<()> {
    let Some(lesson) = reader.lesson.as_mut() else {
        tracing::debug!("Lookup for {} resolved after the lesson closed", instance);
        return Ok(());
    };

    match lesson.session.resolve(generation, instance, result) {
        Resolution::Stale => {
            tracing::debug!("Ignoring stale lookup for {}", instance);
            Ok(())
        }
        Resolution::Applied { reposition: false } => {
            tracing::debug!("Cached lookup for closed popover {}", instance);
            Ok(())
        }
        Resolution::Applied { reposition: true } => show_popover(reader, instance).await,
    }
}
