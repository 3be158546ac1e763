use lexi_content::fetch_lesson;
use lexi_core::LessonSession;
use lexi_core::levels::effective_level;

use crate::events::{OpenLesson, Reader};
use crate::ui::{TextGrid, ViewUpdate, article_title, render_lesson};

pub async fn handle_open_lesson(
    reader: &mut Reader,
    course_id: &str,
    lesson_id: &str,
) -> anyhow::Result<()> {
    let (course, lesson) = match reader.state.catalog.lesson(course_id, lesson_id) {
        Ok(found) => found,
        Err(e) => return reader.status(format!("Could not load lesson: {e}")).await,
    };

    let markdown = match fetch_lesson(reader.state.content.as_ref(), lesson).await {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!("Lesson content unavailable: {}", e);
            return reader
                .status(format!("Could not load lesson content for {}", lesson.title))
                .await;
        }
    };

    let profile = reader.state.profile().await;
    let user_level = effective_level(&profile, lesson.activity_type);
    let min_lookup_len = reader.state.config.read().await.ui.min_lookup_len;

    let session = LessonSession::new(
        &markdown,
        reader.mode,
        user_level,
        &reader.state.index,
        min_lookup_len,
    );
    tracing::info!(
        "Opened lesson {}/{}: {} words, word bank {:?}",
        course.id,
        lesson.id,
        session.words().len(),
        session.word_bank()
    );

    reader.lesson = Some(OpenLesson {
        source: format!("{}/{}", course.id, lesson.id),
        title: format!("{}: {}", course.title, lesson.title),
        session,
    });
    render_open_lesson(reader).await
}

/// Open an article as an annotated reading at the general level
pub async fn handle_open_article(reader: &mut Reader, article_id: &str) -> anyhow::Result<()> {
    let Some(article) = reader.state.catalog.article(article_id) else {
        return reader.status(format!("Unknown article: {article_id}")).await;
    };

    let profile = reader.state.profile().await;
    let min_lookup_len = reader.state.config.read().await.ui.min_lookup_len;
    let session = LessonSession::new(
        &article.content,
        reader.mode,
        effective_level(&profile, None),
        &reader.state.index,
        min_lookup_len,
    );
    tracing::info!(
        "Opened article {}: {} words, word bank {:?}",
        article.id,
        session.words().len(),
        session.word_bank()
    );

    reader.lesson = Some(OpenLesson {
        source: format!("article/{}", article.id),
        title: article_title(article),
        session,
    });
    render_open_lesson(reader).await
}

pub async fn render_open_lesson(reader: &Reader) -> anyhow::Result<()> {
    let Some(lesson) = &reader.lesson else {
        return Ok(());
    };
    let grid = {
        let config = reader.state.config.read().await;
        TextGrid::new(&config.ui, reader.viewport)
    };
    let layout = lesson.layout(&grid);
    let screen = render_lesson(&lesson.title, &lesson.session, &layout);
    reader.view_tx.send(ViewUpdate::Screen(screen)).await?;
    Ok(())
}
