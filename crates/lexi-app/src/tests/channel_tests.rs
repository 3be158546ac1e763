use std::sync::Arc;
use std::time::Duration;

use lexi_types::{AppEvent, LookupResult, Mode, WordTranslation};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::{GatedLookup, app_state};
use crate::events::event_loop;
use crate::ui::ViewUpdate;

#[tokio::test]
async fn test_lookup_result_from_spawned_task() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    tokio::spawn(async move {
        tracing::debug!("Lookup task: sending result");
        tx.send(AppEvent::LookupResolved {
            session: 7,
            instance: 3,
            result: LookupResult::Translation(Some(WordTranslation {
                text: "konteks".into(),
                is_link: false,
            })),
        })
        .await
        .expect("send failed");
    });

    let result = timeout(Duration::from_secs(2), rx.recv()).await;

    match result {
        Ok(Ok(AppEvent::LookupResolved {
            session,
            instance,
            result,
        })) => {
            assert_eq!(session, 7);
            assert_eq!(instance, 3);
            assert!(result.is_found());
        }
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - lookup result never arrived!"),
    }
}

#[tokio::test]
async fn test_many_lookups_share_one_channel() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(4);

    for instance in 0..16 {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::LookupResolved {
                session: 1,
                instance,
                result: LookupResult::Definition(None),
            })
            .await
            .expect("send failed");
        });
    }
    drop(tx);

    let mut seen = Vec::new();
    while let Ok(Ok(event)) = timeout(Duration::from_secs(2), rx.recv()).await {
        if let AppEvent::LookupResolved { instance, .. } = event {
            seen.push(instance);
        }
    }
    seen.sort_unstable();
    assert_eq!(seen, (0..16).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_event_loop_stops_on_shutdown() {
    let state = app_state(Arc::new(GatedLookup::new()));
    let (events_tx, events_rx) = kanal::bounded_async(8);
    let (view_tx, view_rx) = kanal::bounded_async(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(event_loop(
        state,
        Mode::Support,
        events_rx,
        events_tx.clone(),
        view_tx,
        cancel.clone(),
    ));

    match timeout(Duration::from_secs(2), view_rx.recv()).await {
        Ok(Ok(ViewUpdate::Screen(screen))) => assert!(screen.contains("Welcome, Alex Doe")),
        other => panic!("Expected home screen, got {:?}", other),
    }

    events_tx.send(AppEvent::Shutdown).await.expect("send failed");
    let finished = timeout(Duration::from_secs(2), handle)
        .await
        .expect("event loop did not stop");
    assert!(finished.expect("event loop panicked").is_ok());
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn test_event_loop_stops_on_cancel() {
    let state = app_state(Arc::new(GatedLookup::new()));
    let (events_tx, events_rx) = kanal::bounded_async(8);
    let (view_tx, _view_rx) = kanal::bounded_async(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(event_loop(
        state,
        Mode::Challenge,
        events_rx,
        events_tx,
        view_tx,
        cancel.clone(),
    ));

    cancel.cancel();
    let finished = timeout(Duration::from_secs(2), handle)
        .await
        .expect("event loop ignored cancellation");
    assert!(finished.expect("event loop panicked").is_ok());
}
