use lexi_core::lookup::run_lookup;
use lexi_core::{Activation, LookupRequest, PopoverLayout};
use lexi_types::AppEvent;

use crate::events::Reader;
use crate::events::open_lesson::render_open_lesson;
use crate::ui::{TextGrid, ViewUpdate, popover_lines, popover_size, render_popover};

pub async fn handle_word_activation(reader: &mut Reader, instance: usize) -> anyhow::Result<()> {
    let Some(lesson) = reader.lesson.as_mut() else {
        return reader.status("No lesson open").await;
    };

    match lesson.session.activate(instance) {
        Activation::Ignored => {
            reader
                .status(format!("Word {instance} has nothing to look up"))
                .await
        }
        Activation::Closed => {
            tracing::debug!("Closed popover {}", instance);
            render_open_lesson(reader).await
        }
        Activation::Opened { fetch } => {
            if let Some(request) = fetch {
                spawn_lookup(reader, request);
            }
            show_popover(reader, instance).await
        }
    }
}

/// Run the lookup in its own task; the result comes back as
/// [`AppEvent::LookupResolved`]
pub fn spawn_lookup(reader: &Reader, request: LookupRequest) {
    let lookup = reader.state.lookup.clone();
    let events_tx = reader.events_tx.clone();

    tracing::debug!("Looking up {:?} ({:?})", request.term, request.kind);
    tokio::spawn(async move {
        let result = run_lookup(lookup.as_ref(), request.kind, &request.term).await;
        let event = AppEvent::LookupResolved {
            session: request.generation,
            instance: request.instance,
            result,
        };
        if let Err(e) = events_tx.send(event).await {
            tracing::debug!("Lookup result for {} dropped: {}", request.term, e);
        }
    });
}

/// Place the popover of an open word against its anchor and print it
pub async fn show_popover(reader: &mut Reader, instance: usize) -> anyhow::Result<()> {
    let viewport = reader.viewport;
    let ui = reader.state.config.read().await.ui.clone();
    let Some(lesson) = reader.lesson.as_mut() else {
        return Ok(());
    };

    let layout = lesson.layout(&TextGrid::new(&ui, viewport));
    let (Some(anchor), Some(word), Some(state)) = (
        layout.anchors.get(&instance).copied(),
        lesson.session.word(instance).cloned(),
        lesson.session.state(instance).cloned(),
    ) else {
        return Ok(());
    };

    let lines = popover_lines(&word, &state, lesson.session.mode());
    let size = popover_size(&lines, &ui, viewport);
    let Some(position) =
        lesson
            .session
            .place(instance, &PopoverLayout::from(&ui), anchor, size, viewport)
    else {
        return Ok(());
    };

    reader
        .view_tx
        .send(ViewUpdate::Popover(render_popover(instance, &lines, position)))
        .await?;
    Ok(())
}
