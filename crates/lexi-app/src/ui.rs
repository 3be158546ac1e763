//! Terminal view: lays lesson text out on a monospace grid and prints
//! screens, popovers and status lines.

use std::collections::HashMap;
use std::fmt::Write as _;

use kanal::AsyncReceiver;
use lexi_config::ui::UiConfig;
use lexi_content::Catalog;
use lexi_core::annotation::{AnnotatedBlock, Segment, WordUnit};
use lexi_core::gate::{CourseListing, LevelGroup, featured_course};
use lexi_core::levels::effective_level;
use lexi_core::{AnnotationState, FetchState, LessonSession};
use lexi_types::{Article, Course, Hub, LearningPath, LookupKind, LookupResult, Mode, Position, Rect, Size, UserProfile};
use tokio_util::sync::CancellationToken;

/// Meanings shown in a definition popover
const MAX_MEANINGS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Screen(String),
    Popover(String),
    Status(String),
}

pub async fn view_loop(
    view_rx: AsyncReceiver<ViewUpdate>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let update = tokio::select! {
            _ = cancel.cancelled() => break,
            update = view_rx.recv() => update?,
        };

        match update {
            ViewUpdate::Screen(screen) => println!("\n{screen}"),
            ViewUpdate::Popover(popover) => println!("{popover}"),
            ViewUpdate::Status(status) => println!("-- {status}"),
        }
    }

    tracing::info!("View loop stopping");
    Ok(())
}

/// Monospace layout of lesson blocks. Produces the wrapped lines and the
/// viewport rectangle of every word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGrid {
    pub char_width: f32,
    pub line_height: f32,
    pub margin: f32,
    pub columns: usize,
}

#[derive(Debug, Default)]
pub struct GridLayout {
    /// Rows printed above the first lesson line
    pub header_rows: usize,
    pub lines: Vec<String>,
    pub anchors: HashMap<usize, Rect>,
}

impl TextGrid {
    pub fn new(config: &UiConfig, viewport: Size) -> Self {
        let usable = (viewport.width - 2.0 * config.viewport_margin).max(config.char_width);
        let columns = ((usable / config.char_width).floor() as usize).max(20);
        Self {
            char_width: config.char_width,
            line_height: config.line_height,
            margin: config.viewport_margin,
            columns,
        }
    }

    fn rect(&self, line: usize, column: usize, len: usize) -> Rect {
        Rect::new(
            self.margin + column as f32 * self.char_width,
            self.margin + line as f32 * self.line_height,
            len as f32 * self.char_width,
            self.line_height,
        )
    }

    /// Lay the lesson out below `header_rows` printed lines
    pub fn layout(&self, session: &LessonSession, header_rows: usize) -> GridLayout {
        let mut out = GridLayout {
            header_rows,
            ..GridLayout::default()
        };
        for (i, block) in session.blocks().iter().enumerate() {
            if i > 0 {
                out.lines.push(String::new());
            }
            self.layout_block(session, block, &mut out);
        }
        out
    }

    fn layout_block(&self, session: &LessonSession, block: &AnnotatedBlock, out: &mut GridLayout) {
        let mut line = String::new();
        let mut column = 0;

        for segment in &block.segments {
            match segment {
                Segment::Word(instance) => {
                    let Some(word) = session.word(*instance) else {
                        continue;
                    };
                    let len = word.token.chars().count();
                    if column > 0 && column + len > self.columns {
                        flush(&mut line, out);
                        column = 0;
                    }
                    out.anchors.insert(
                        *instance,
                        self.rect(out.header_rows + out.lines.len(), column, len),
                    );
                    line.push_str(&word.token);
                    column += len;
                }
                Segment::Space(space) => {
                    for c in space.chars() {
                        if c == '\n' {
                            flush(&mut line, out);
                            column = 0;
                        } else if column > 0 && column < self.columns {
                            line.push(' ');
                            column += 1;
                        }
                    }
                }
                Segment::Plain(text) => {
                    for chunk in wrap(text, self.columns) {
                        out.lines.push(chunk);
                    }
                }
            }
        }

        if !line.is_empty() {
            flush(&mut line, out);
        }
    }
}

fn flush(line: &mut String, out: &mut GridLayout) {
    out.lines.push(std::mem::take(line).trim_end().to_string());
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut line = String::new();
        for word in source_line.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > columns {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Popover body lines for an open word
pub fn popover_lines(word: &WordUnit, state: &AnnotationState, mode: Mode) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", word.term, word.level)];
    match &state.fetch {
        FetchState::Idle | FetchState::Loading => lines.push("Loading...".to_string()),
        FetchState::NotFound => lines.push(match mode.lookup_kind() {
            LookupKind::Definition => "No definition found.".to_string(),
            LookupKind::Translation => "No translation found.".to_string(),
        }),
        FetchState::Found(LookupResult::Definition(Some(definition))) => {
            if let Some(phonetic) = &definition.phonetic {
                lines[0] = format!("{} {} ({})", word.term, phonetic, word.level);
            }
            for meaning in definition.meanings.iter().take(MAX_MEANINGS) {
                if let Some(sense) = meaning.definitions.first() {
                    lines.push(format!("{}: {}", meaning.part_of_speech, sense.definition));
                    if let Some(example) = &sense.example {
                        lines.push(format!("  \"{example}\""));
                    }
                }
            }
        }
        FetchState::Found(LookupResult::Translation(Some(translation))) => {
            if translation.is_link {
                lines.push(format!("Translate: {}", translation.text));
            } else {
                lines.push(format!("Indonesian: {}", translation.text));
            }
        }
        FetchState::Found(_) => lines.push("Nothing found.".to_string()),
    }
    lines
}

/// Rendered size of a popover: configured width capped to the viewport,
/// height from the wrapped body plus one line of padding
pub fn popover_size(lines: &[String], config: &UiConfig, viewport: Size) -> Size {
    let width = config
        .popover_width
        .min(viewport.width - 2.0 * config.viewport_margin)
        .max(config.char_width);
    let columns = ((width / config.char_width).floor() as usize).max(1);
    let rows: usize = lines
        .iter()
        .map(|line| line.chars().count().div_ceil(columns).max(1))
        .sum();
    Size::new(width, (rows + 1) as f32 * config.line_height)
}

pub fn render_popover(instance: usize, lines: &[String], position: Position) -> String {
    let mut out = format!(
        "[{instance}] popover at top={:.0} left={:.0}",
        position.top, position.left
    );
    for line in lines {
        let _ = write!(out, "\n  | {line}");
    }
    out
}

fn word_marker(word: &WordUnit) -> String {
    format!(
        "[{}] {} {} {}",
        word.instance,
        word.term,
        word.level,
        word.tier.as_str()
    )
}

/// Lines printed above the lesson text
pub fn lesson_header(title: &str, session: &LessonSession) -> Vec<String> {
    let mut header = vec![
        format!("== {title} =="),
        format!("mode: {}  level: {}", session.mode(), session.user_level()),
    ];
    if !session.word_bank().is_empty() {
        header.push(format!("word bank: {}", session.word_bank().join(", ")));
    }
    header.push(String::new());
    header
}

pub fn render_lesson(title: &str, session: &LessonSession, layout: &GridLayout) -> String {
    let mut out = String::new();
    for line in lesson_header(title, session).iter().chain(&layout.lines) {
        let _ = writeln!(out, "{line}");
    }

    let flagged: Vec<String> = session
        .words()
        .iter()
        .filter(|word| word.interactive && word.gap > 0)
        .map(word_marker)
        .collect();
    if !flagged.is_empty() {
        out.push_str("\nabove your level:\n");
        for marker in flagged {
            let _ = writeln!(out, "  {marker}");
        }
    }
    out
}

fn course_line(course: &Course, locked: bool) -> String {
    format!(
        "{} {} [{}] {}{}",
        course.icon.glyph(),
        course.title,
        course.level,
        course.duration,
        if locked { " (locked)" } else { "" }
    )
}

pub fn render_home(catalog: &Catalog, profile: &UserProfile, error: Option<&str>) -> String {
    let mut out = format!(
        "Welcome, {}. General level {} ({})\n",
        profile.name,
        profile.general_level,
        profile.general_level.description()
    );
    if let Some(error) = error {
        let _ = writeln!(out, "Could not load courses: {error}");
    }

    if let Some(featured) = featured_course(&catalog.courses, profile) {
        let _ = writeln!(
            out,
            "\nRecommended: {}",
            course_line(featured.course, featured.locked)
        );
    }

    if !catalog.enrolled.is_empty() {
        out.push_str("\nYour courses:\n");
        for course in &catalog.enrolled {
            let _ = writeln!(out, "  {} ({})", course.title, course.id);
        }
    }

    out.push_str("\nHubs:\n");
    for hub in &catalog.hubs {
        let level = effective_level(profile, hub.skill());
        let _ = writeln!(
            out,
            "  {} {} ({}): {} courses, your level {}",
            hub.icon.glyph(),
            hub.title,
            hub.id,
            hub.course_ids.len(),
            level
        );
    }

    out.push_str("\nLearning paths:\n");
    for path in &catalog.learning_paths {
        let _ = writeln!(out, "  {} ({})", path.title, path.id);
    }
    out
}

pub fn render_hub(hub: &Hub, groups: &[LevelGroup<'_>]) -> String {
    let mut out = format!("{} {}\n{}\n", hub.icon.glyph(), hub.title, hub.description);
    if groups.is_empty() {
        out.push_str("\nNo courses yet.\n");
    }
    for group in groups {
        let _ = writeln!(
            out,
            "\n{} {}{}",
            group.level,
            group.level.description(),
            if group.locked { " (locked)" } else { "" }
        );
        for course in &group.courses {
            let _ = writeln!(out, "  {}", course_line(course, group.locked));
        }
    }
    out
}

pub fn render_path(path: &LearningPath, courses: &[(&Course, bool)]) -> String {
    let mut out = format!("{}\n{}\n\n", path.title, path.description);
    for (i, (course, locked)) in courses.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, course_line(course, *locked));
    }
    out
}

pub fn render_discovery(listings: &[CourseListing<'_>], articles: &[&Article]) -> String {
    if listings.is_empty() && articles.is_empty() {
        return "No courses or articles match.".to_string();
    }
    let mut out = format!("{} courses\n", listings.len());
    for listing in listings {
        let _ = writeln!(out, "  {}", course_line(listing.course, listing.locked));
    }
    if !articles.is_empty() {
        out.push_str("\nArticles:\n");
        for article in articles {
            let _ = writeln!(
                out,
                "  {} ({}) by {}, {}",
                article.title, article.id, article.author, article.read_time
            );
        }
    }
    out
}

/// Title line of an opened article
pub fn article_title(article: &Article) -> String {
    format!(
        "{} | by {} | {} | {}",
        article.title, article.author, article.published_date, article.read_time
    )
}
