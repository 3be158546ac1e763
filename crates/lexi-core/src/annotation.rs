//! Inline word annotations for one open lesson.
//!
//! A [`LessonSession`] owns every word unit of the lesson and the ephemeral
//! popover state of each one. It is driven from a single task: activations,
//! mode switches, scrolls and lookup results all come in as method calls,
//! and lookups themselves run elsewhere. Each request carries the session
//! generation it was issued under, so results for a replaced session or a
//! previous mode are dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use lexi_types::{CefrLevel, LookupKind, LookupResult, Mode, Position, Rect, Size};

use crate::levels::{DifficultyTier, difficulty_gap};
use crate::overlay::PopoverLayout;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::prose::{BlockKind, prose_blocks};
use crate::vocabulary::extract_word_bank;
use crate::word_index::WordLevelIndex;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Piece of a text run: a word or the whitespace between words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Word(&'a str),
    Space(&'a str),
}

impl<'a> Piece<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Piece::Word(s) | Piece::Space(s) => s,
        }
    }
}

/// Split on whitespace runs, keeping the runs. Concatenating the pieces
/// gives back `text` exactly.
pub fn split_words(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                pieces.push(piece(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(space) = in_space {
        pieces.push(piece(&text[start..], space));
    }

    pieces
}

fn piece(s: &str, space: bool) -> Piece<'_> {
    if space { Piece::Space(s) } else { Piece::Word(s) }
}

/// One annotated word instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordUnit {
    pub instance: usize,
    /// Token as it appears in the text, punctuation included
    pub token: String,
    /// Cleaned form sent to the lookup services
    pub term: String,
    pub level: CefrLevel,
    pub gap: i32,
    pub tier: DifficultyTier,
    /// Short tokens are displayed but never open a popover
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Annotated word, by instance id
    Word(usize),
    Space(String),
    /// Text of a block that isn't annotated
    Plain(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedBlock {
    pub kind: BlockKind,
    pub segments: Vec<Segment>,
}

/// Fetch progress of one word instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Found(LookupResult),
    /// Terminal miss; opening the word again retries
    NotFound,
}

/// Ephemeral popover state of a word instance, created on first activation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationState {
    pub open: bool,
    pub fetch: FetchState,
    pub position: Option<Position>,
}

impl AnnotationState {
    pub fn is_loading(&self) -> bool {
        self.fetch == FetchState::Loading
    }
}

/// Lookup the caller has to run on behalf of a word instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub instance: usize,
    pub kind: LookupKind,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Unknown or non-interactive word
    Ignored,
    /// Popover was open and is now closed
    Closed,
    /// Popover opened; `fetch` is set when a lookup must be started
    Opened { fetch: Option<LookupRequest> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Result belongs to a previous generation or an unknown word
    Stale,
    /// Result stored; `reposition` asks for a new placement since the
    /// popover content changed size
    Applied { reposition: bool },
}

/// Annotated view of one lesson
#[derive(Debug)]
pub struct LessonSession {
    generation: u64,
    mode: Mode,
    user_level: CefrLevel,
    word_bank: Vec<String>,
    blocks: Vec<AnnotatedBlock>,
    words: Vec<WordUnit>,
    states: HashMap<usize, AnnotationState>,
}

impl LessonSession {
    /// Build the session for `markdown`, classifying every prose word
    /// against `user_level`. Cleaned terms shorter than `min_lookup_len`
    /// characters are not interactive.
    pub fn new(
        markdown: &str,
        mode: Mode,
        user_level: CefrLevel,
        index: &WordLevelIndex,
        min_lookup_len: usize,
    ) -> Self {
        let mut words = Vec::new();
        let blocks = prose_blocks(markdown)
            .into_iter()
            .map(|block| {
                let segments = if block.kind.is_annotated() {
                    split_words(&block.text)
                        .into_iter()
                        .map(|piece| match piece {
                            Piece::Space(space) => Segment::Space(space.to_string()),
                            Piece::Word(token) => {
                                let instance = words.len();
                                words.push(classify(
                                    instance,
                                    token,
                                    user_level,
                                    index,
                                    min_lookup_len,
                                ));
                                Segment::Word(instance)
                            }
                        })
                        .collect()
                } else {
                    vec![Segment::Plain(block.text)]
                };
                AnnotatedBlock {
                    kind: block.kind,
                    segments,
                }
            })
            .collect();

        Self {
            generation: next_generation(),
            mode,
            user_level,
            word_bank: extract_word_bank(markdown),
            blocks,
            words,
            states: HashMap::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn user_level(&self) -> CefrLevel {
        self.user_level
    }

    pub fn word_bank(&self) -> &[String] {
        &self.word_bank
    }

    pub fn blocks(&self) -> &[AnnotatedBlock] {
        &self.blocks
    }

    pub fn words(&self) -> &[WordUnit] {
        &self.words
    }

    pub fn word(&self, instance: usize) -> Option<&WordUnit> {
        self.words.get(instance)
    }

    pub fn state(&self, instance: usize) -> Option<&AnnotationState> {
        self.states.get(&instance)
    }

    /// Instances whose popover is currently open
    pub fn open_instances(&self) -> Vec<usize> {
        let mut open: Vec<usize> = self
            .states
            .iter()
            .filter(|(_, state)| state.open)
            .map(|(instance, _)| *instance)
            .collect();
        open.sort_unstable();
        open
    }

    /// Text of `block` with words in place, identical to its source text
    pub fn block_text(&self, block: &AnnotatedBlock) -> String {
        block
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Word(instance) => self.words[*instance].token.as_str(),
                Segment::Space(space) => space.as_str(),
                Segment::Plain(text) => text.as_str(),
            })
            .collect()
    }

    /// Click/tap on a word: toggles its popover and asks for a lookup when
    /// nothing is cached or in flight for it.
    pub fn activate(&mut self, instance: usize) -> Activation {
        let Some(word) = self.words.get(instance) else {
            return Activation::Ignored;
        };
        if !word.interactive {
            return Activation::Ignored;
        }
        let term = word.term.clone();
        let kind = self.mode.lookup_kind();
        let generation = self.generation;

        let state = self.states.entry(instance).or_default();
        if state.open {
            state.open = false;
            state.position = None;
            return Activation::Closed;
        }

        state.open = true;
        let fetch = match state.fetch {
            FetchState::Idle | FetchState::NotFound => {
                state.fetch = FetchState::Loading;
                Some(LookupRequest {
                    generation,
                    instance,
                    kind,
                    term,
                })
            }
            FetchState::Loading | FetchState::Found(_) => None,
        };

        Activation::Opened { fetch }
    }

    /// Store a finished lookup. Results from another generation, for a
    /// word that isn't waiting, or of the wrong kind are ignored.
    pub fn resolve(&mut self, generation: u64, instance: usize, result: LookupResult) -> Resolution {
        if generation != self.generation || result.kind() != self.mode.lookup_kind() {
            return Resolution::Stale;
        }
        let Some(state) = self.states.get_mut(&instance) else {
            return Resolution::Stale;
        };
        if !state.is_loading() {
            return Resolution::Stale;
        }

        state.fetch = if result.is_found() {
            FetchState::Found(result)
        } else {
            FetchState::NotFound
        };

        Resolution::Applied {
            reposition: state.open,
        }
    }

    /// Switch presentation mode. All annotation state is discarded, which
    /// closes every popover and orphans in-flight lookups.
    pub fn set_mode(&mut self, mode: Mode) -> usize {
        if mode == self.mode {
            return 0;
        }
        let closed = self.states.values().filter(|state| state.open).count();
        self.states.clear();
        self.generation = next_generation();
        self.mode = mode;
        closed
    }

    /// Close every popover (page scrolled). Pending positions are abandoned;
    /// in-flight lookups still land in the cache.
    pub fn dismiss_all(&mut self) -> usize {
        let mut closed = 0;
        for state in self.states.values_mut() {
            if state.open {
                closed += 1;
            }
            state.open = false;
            state.position = None;
        }
        closed
    }

    /// Compute and store the popover position of an open word. Closed
    /// words get no position.
    pub fn place(
        &mut self,
        instance: usize,
        layout: &PopoverLayout,
        anchor: Rect,
        popover: Size,
        viewport: Size,
    ) -> Option<Position> {
        let state = self.states.get_mut(&instance)?;
        if !state.open {
            return None;
        }
        let position = layout.place(anchor, popover, viewport);
        state.position = Some(position);
        Some(position)
    }
}

fn classify(
    instance: usize,
    token: &str,
    user_level: CefrLevel,
    index: &WordLevelIndex,
    min_lookup_len: usize,
) -> WordUnit {
    let level = index.level_of(token);
    let gap = difficulty_gap(level, user_level);
    let term = DefaultPreprocessor.lookup_term(token);
    let interactive = term.chars().count() >= min_lookup_len;

    WordUnit {
        instance,
        token: token.to_string(),
        term,
        level,
        gap,
        tier: DifficultyTier::from_gap(gap),
        interactive,
    }
}
