use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_core::LessonSession;
use lexi_types::{AppEvent, Mode, Size};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::ui::{GridLayout, TextGrid, ViewUpdate, lesson_header};

pub mod activate_word;
pub mod catalog;
pub mod lookup_resolved;
pub mod open_lesson;
pub mod update_level;

use activate_word::handle_word_activation;
use catalog::{handle_discover, handle_show_home, handle_show_hub, handle_show_path};
use lookup_resolved::handle_lookup_resolved;
use open_lesson::{handle_open_article, handle_open_lesson, render_open_lesson};
use update_level::handle_level_update;

/// Lesson or article currently on screen
pub struct OpenLesson {
    /// `<course>/<lesson>` or `article/<id>`
    pub source: String,
    pub title: String,
    pub session: LessonSession,
}

impl OpenLesson {
    /// Grid layout of the text as printed under its header
    pub fn layout(&self, grid: &TextGrid) -> GridLayout {
        grid.layout(&self.session, lesson_header(&self.title, &self.session).len())
    }
}

/// State owned by the event loop. Only this task touches the lesson
/// session; lookups run in spawned tasks and report back as events.
pub struct Reader {
    pub state: Arc<AppState>,
    pub lesson: Option<OpenLesson>,
    pub mode: Mode,
    pub viewport: Size,
    /// Loopback for lookup results
    pub events_tx: AsyncSender<AppEvent>,
    pub view_tx: AsyncSender<ViewUpdate>,
}

impl Reader {
    pub async fn new(
        state: Arc<AppState>,
        mode: Mode,
        events_tx: AsyncSender<AppEvent>,
        view_tx: AsyncSender<ViewUpdate>,
    ) -> Self {
        let viewport = {
            let config = state.config.read().await;
            Size::new(config.ui.viewport_width, config.ui.viewport_height)
        };

        Self {
            state,
            lesson: None,
            mode,
            viewport,
            events_tx,
            view_tx,
        }
    }

    pub async fn status(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.view_tx.send(ViewUpdate::Status(message.into())).await?;
        Ok(())
    }

    /// Handle one event; returns false once the loop should stop
    pub async fn handle_event(&mut self, event: AppEvent) -> anyhow::Result<bool> {
        tracing::debug!("Handling event: {:?}", std::mem::discriminant(&event));
        match event {
            AppEvent::ShowHome => handle_show_home(self).await?,
            AppEvent::ShowHub(hub_id) => handle_show_hub(self, &hub_id).await?,
            AppEvent::ShowPath(path_id) => handle_show_path(self, &path_id).await?,
            AppEvent::Discover(query) => handle_discover(self, &query).await?,
            AppEvent::OpenLesson {
                course_id,
                lesson_id,
            } => handle_open_lesson(self, &course_id, &lesson_id).await?,
            AppEvent::OpenArticle(article_id) => handle_open_article(self, &article_id).await?,
            AppEvent::CloseLesson => {
                if let Some(lesson) = self.lesson.take() {
                    tracing::info!("Closed {}", lesson.source);
                }
                handle_show_home(self).await?;
            }
            AppEvent::ActivateWord(instance) => handle_word_activation(self, instance).await?,
            AppEvent::SetMode(mode) => self.set_mode(mode).await?,
            AppEvent::Scrolled => {
                if let Some(lesson) = self.lesson.as_mut() {
                    let closed = lesson.session.dismiss_all();
                    tracing::debug!("Scroll dismissed {} popovers", closed);
                    render_open_lesson(self).await?;
                }
            }
            AppEvent::ViewportResized(size) => {
                self.viewport = size;
                self.reposition_open().await?;
            }
            AppEvent::LookupResolved {
                session,
                instance,
                result,
            } => handle_lookup_resolved(self, session, instance, result).await?,
            AppEvent::UpdateLevel { skill, level } => handle_level_update(self, skill, level).await?,
            AppEvent::Shutdown => {
                tracing::info!("Shutdown requested");
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn set_mode(&mut self, mode: Mode) -> anyhow::Result<()> {
        self.mode = mode;
        if let Some(lesson) = self.lesson.as_mut() {
            let closed = lesson.session.set_mode(mode);
            tracing::debug!("Mode {} closed {} popovers", mode, closed);
            render_open_lesson(self).await?;
        }
        self.status(format!("Mode: {mode}")).await
    }

    async fn reposition_open(&mut self) -> anyhow::Result<()> {
        let open = match &self.lesson {
            Some(lesson) => lesson.session.open_instances(),
            None => return Ok(()),
        };
        for instance in open {
            activate_word::show_popover(self, instance).await?;
        }
        Ok(())
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    mode: Mode,
    events_rx: AsyncReceiver<AppEvent>,
    events_tx: AsyncSender<AppEvent>,
    view_tx: AsyncSender<ViewUpdate>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut reader = Reader::new(state, mode, events_tx, view_tx).await;
    handle_show_home(&mut reader).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events_rx.recv() => event?,
        };

        if !reader.handle_event(event).await? {
            cancel.cancel();
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}
