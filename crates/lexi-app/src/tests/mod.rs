use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_config::Config;
use lexi_content::{Catalog, ContentError, ContentSource};
use lexi_core::{DefinitionLookup, MemoryStore};
use lexi_types::{
    AppEvent, CefrLevel, Course, IconId, Lesson, Meaning, Mode, Module, Quiz, Sense,
    WordDefinition, WordTranslation,
};
use tokio::sync::Semaphore;

use crate::events::Reader;
use crate::state::AppState;
use crate::ui::ViewUpdate;

mod channel_tests;

pub const LESSON: &str = "The **context** helps you guess.";

/// Lookup that counts calls and holds each answer until a permit is added
pub struct GatedLookup {
    pub definitions: AtomicUsize,
    pub translations: AtomicUsize,
    pub gate: Semaphore,
    /// Words the fake dictionary knows
    pub known: Vec<&'static str>,
}

impl GatedLookup {
    pub fn new() -> Self {
        Self {
            definitions: AtomicUsize::new(0),
            translations: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            known: vec!["context"],
        }
    }

    pub fn open_gate(&self, permits: usize) {
        self.gate.add_permits(permits);
    }

    pub fn calls(&self) -> usize {
        self.definitions.load(Ordering::SeqCst) + self.translations.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}

#[async_trait::async_trait]
impl DefinitionLookup for GatedLookup {
    async fn definition(&self, word: &str) -> Option<WordDefinition> {
        self.definitions.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.known.iter().any(|known| *known == word).then(|| WordDefinition {
            word: word.to_string(),
            phonetic: None,
            meanings: vec![Meaning {
                part_of_speech: "noun".into(),
                definitions: vec![Sense {
                    definition: "The circumstances that form the setting for an event.".into(),
                    example: None,
                }],
            }],
        })
    }

    async fn translation(&self, word: &str) -> Option<WordTranslation> {
        self.translations.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.known.iter().any(|known| *known == word).then(|| WordTranslation {
            text: "konteks".into(),
            is_link: false,
        })
    }
}

/// Content tree held in memory
pub struct MemoryContent(pub HashMap<String, String>);

#[async_trait::async_trait]
impl ContentSource for MemoryContent {
    async fn fetch_text(&self, path: &str) -> Result<String, ContentError> {
        self.0.get(path).cloned().ok_or_else(|| ContentError::Io {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory"),
        })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

fn lesson(id: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: format!("Lesson {id}"),
        content: format!("vocabulary-essentials/{id}.md"),
        quiz: Quiz::default(),
        activity_type: None,
    }
}

pub fn course() -> Course {
    Course {
        id: "vocabulary-essentials".into(),
        title: "Vocabulary Essentials".into(),
        description: "Unlocking the power of words".into(),
        icon: IconId::Lightbulb,
        duration: "4 hours".into(),
        level: CefrLevel::A2,
        details: String::new(),
        prerequisites: String::new(),
        modules: vec![Module {
            id: "m1".into(),
            title: "Context clues".into(),
            // l2 has no content file
            lessons: vec![lesson("l1"), lesson("l2")],
        }],
        info: String::new(),
        tags: vec!["vocabulary".into()],
    }
}

/// App state over the in-memory course and profile store
pub fn app_state(lookup: Arc<GatedLookup>) -> Arc<AppState> {
    let content = MemoryContent(HashMap::from([(
        "vocabulary-essentials/l1.md".to_string(),
        LESSON.to_string(),
    )]));
    let catalog = Catalog::assemble(vec![course()], &["vocabulary-essentials".to_string()]);

    Arc::new(AppState::new(
        Config::default(),
        catalog,
        Arc::new(content),
        lexi_lang_english::builtin_index(),
        lookup,
        Arc::new(MemoryStore::new()),
    ))
}

pub struct Harness {
    pub reader: Reader,
    pub lookup: Arc<GatedLookup>,
    pub events_rx: AsyncReceiver<AppEvent>,
    pub view_rx: AsyncReceiver<ViewUpdate>,
    _events_tx: AsyncSender<AppEvent>,
}

impl Harness {
    pub async fn new(mode: Mode) -> Self {
        let lookup = Arc::new(GatedLookup::new());
        let state = app_state(lookup.clone());

        let (events_tx, events_rx) = kanal::unbounded_async();
        let (view_tx, view_rx) = kanal::unbounded_async();
        let reader = Reader::new(state, mode, events_tx.clone(), view_tx).await;

        Self {
            reader,
            lookup,
            events_rx,
            view_rx,
            _events_tx: events_tx,
        }
    }

    pub async fn send(&mut self, event: AppEvent) {
        let running = self.reader.handle_event(event).await.expect("event failed");
        assert!(running);
    }

    pub async fn open_lesson(&mut self) {
        self.send(AppEvent::OpenLesson {
            course_id: "vocabulary-essentials".into(),
            lesson_id: "l1".into(),
        })
        .await;
    }

    /// Instance id of the first word whose token is `token`
    pub fn instance(&self, token: &str) -> usize {
        self.reader
            .lesson
            .as_ref()
            .expect("no lesson open")
            .session
            .words()
            .iter()
            .find(|word| word.token == token)
            .map(|word| word.instance)
            .expect("token not in lesson")
    }

    /// Next lookup result sent back by a spawned lookup task
    pub async fn next_resolution(&self) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(2), self.events_rx.recv())
            .await
            .expect("timed out waiting for lookup")
            .expect("channel closed")
    }

    /// Every view update emitted so far
    pub fn drain_view(&self) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();
        while let Ok(Some(update)) = self.view_rx.try_recv() {
            updates.push(update);
        }
        updates
    }
}
