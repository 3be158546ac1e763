use std::sync::Arc;

use lexi_config::content::ContentConfig;
use lexi_types::{Article, Course, Hub, IconId, LearningPath, Lesson};
use tokio::task::JoinSet;

use crate::error::ContentError;
use crate::source::{ContentSource, fetch_json};

/// Everything the catalog views need, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Courses in manifest order
    pub courses: Vec<Course>,
    pub hubs: Vec<Hub>,
    pub learning_paths: Vec<LearningPath>,
    pub articles: Vec<Article>,
    pub enrolled: Vec<Course>,
}

impl Catalog {
    /// Assemble hubs and enrollment around already loaded courses
    pub fn assemble(courses: Vec<Course>, enrolled_ids: &[String]) -> Self {
        let mut hubs = default_hubs();
        for course in &courses {
            for tag in &course.tags {
                if let Some(hub) = hubs.iter_mut().find(|hub| &hub.id == tag) {
                    hub.course_ids.push(course.id.clone());
                }
            }
        }

        let enrolled = courses
            .iter()
            .filter(|course| enrolled_ids.contains(&course.id))
            .cloned()
            .collect();

        Self {
            courses,
            hubs,
            learning_paths: learning_paths(),
            articles: builtin_articles(),
            enrolled,
        }
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn hub(&self, id: &str) -> Option<&Hub> {
        self.hubs.iter().find(|hub| hub.id == id)
    }

    pub fn learning_path(&self, id: &str) -> Option<&LearningPath> {
        self.learning_paths.iter().find(|path| path.id == id)
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    /// Courses of a learning path that are actually in the catalog
    pub fn path_courses(&self, path: &LearningPath) -> Vec<&Course> {
        path.course_ids
            .iter()
            .filter_map(|id| self.course(id))
            .collect()
    }

    pub fn lesson(&self, course_id: &str, lesson_id: &str) -> Result<(&Course, &Lesson), ContentError> {
        let course = self
            .course(course_id)
            .ok_or_else(|| ContentError::UnknownCourse(course_id.to_string()))?;
        let lesson = course
            .find_lesson(lesson_id)
            .ok_or_else(|| ContentError::UnknownLesson {
                course: course_id.to_string(),
                lesson: lesson_id.to_string(),
            })?;
        Ok((course, lesson))
    }
}

fn hub(id: &str, title: &str, description: &str, icon: IconId) -> Hub {
    Hub {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon,
        course_ids: Vec::new(),
    }
}

/// Skill hubs, empty until courses are assigned by tag
pub fn default_hubs() -> Vec<Hub> {
    vec![
        hub("reading", "Reading", "Improve your comprehension and speed.", IconId::BookOpen),
        hub("listening", "Listening", "Sharpen your listening skills.", IconId::Headphones),
        hub("speaking", "Speaking", "Practice your pronunciation and fluency.", IconId::Microphone),
        hub("writing", "Writing", "Enhance your writing skills.", IconId::Pencil),
        hub("vocabulary", "Vocabulary", "Expand your word power.", IconId::Lightbulb),
        hub("grammar", "Grammar", "Master the rules of English grammar.", IconId::AcademicCap),
    ]
}

fn path(id: &str, title: &str, description: &str, course_ids: &[&str]) -> LearningPath {
    LearningPath {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        course_ids: course_ids.iter().map(|id| id.to_string()).collect(),
    }
}

pub fn learning_paths() -> Vec<LearningPath> {
    vec![
        path(
            "foundations",
            "English Foundations",
            "Build a strong base in vocabulary and grammar, starting with the absolute essentials for confident communication.",
            &["vocabulary-essentials", "phrasal-verbs-in-use"],
        ),
        path(
            "conversational-english",
            "Conversational English",
            "Learn the phrases, idioms, and phrasal verbs you need to sound natural and confident in everyday conversations.",
            &["phrasal-verbs-in-use", "idioms-for-daily-conversation"],
        ),
        path(
            "comprehensive-vocabulary",
            "Comprehensive Vocabulary",
            "A complete path to mastering English vocabulary, from fundamental techniques to advanced idiomatic expressions.",
            &[
                "vocabulary-essentials",
                "phrasal-verbs-in-use",
                "idioms-for-daily-conversation",
            ],
        ),
    ]
}

fn article(
    id: &str,
    title: &str,
    snippet: &str,
    (author, published_date, read_time): (&str, &str, &str),
    tags: &[&str],
    content: &str,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        snippet: snippet.to_string(),
        author: author.to_string(),
        published_date: published_date.to_string(),
        read_time: read_time.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        content: content.to_string(),
    }
}

const MISTAKES: &str = "\
Making mistakes is part of learning a language, but knowing the usual ones saves time.

## Translating word for word

Thinking in your first language and converting each word leads to sentences that sound **unnatural**. \
Say \"I am 25 years old\", not \"I have 25 years\".

## Being afraid of mistakes

**Fluency** comes from practice, not perfection. Speak as often as you can.

## Ignoring pronunciation

Clear sounds matter as much as grammar. Record yourself and compare.

## Learning words without context

A word list is easy to forget. Learn each **expression** inside a sentence.

## Not listening enough

Listen to podcasts, films and music to absorb **rhythm** and natural phrasing.
";

const PHRASAL_VERBS: &str = "\
A **phrasal verb** is a verb plus a particle whose meaning is often **idiomatic**.

- *Look up* a word in the dictionary.
- *Give up* a bad habit.
- *Run into* an old friend.

Learn them in groups by particle and practise them in short sentences. \
Some are **separable**: you can say \"turn the light off\" or \"turn off the light\".
";

const SMALL_TALK: &str = "\
Small talk builds **rapport** before a real conversation starts.

Good openers are light and **open-ended**:

- How was your weekend?
- Have you been to this place before?
- What are you working on at the moment?

Listen to the answer and ask a **follow-up** question instead of changing topic.
";

/// Articles shown on the discovery view
pub fn builtin_articles() -> Vec<Article> {
    vec![
        article(
            "article-1",
            "5 Common Mistakes to Avoid When Learning English",
            "Are you making these common errors? This guide will help you identify and correct frequent mistakes in grammar and vocabulary, accelerating your learning progress.",
            ("Jane Doe", "Oct 26, 2023", "5 min read"),
            &["Grammar", "Tips"],
            MISTAKES,
        ),
        article(
            "article-2",
            "How to Use Phrasal Verbs Like a Native Speaker",
            "Phrasal verbs can be tricky. Learn how they work and pick up the most useful ones for everyday English.",
            ("John Smith", "Oct 22, 2023", "8 min read"),
            &["Vocabulary", "Speaking"],
            PHRASAL_VERBS,
        ),
        article(
            "article-3",
            "The Art of Small Talk: Conversation Starters",
            "Break the ice with confidence. These conversation starters help you get talking in any situation.",
            ("Emily White", "Oct 15, 2023", "6 min read"),
            &["Speaking", "Culture"],
            SMALL_TALK,
        ),
    ]
}

/// Point lesson content at `<course id>/<file>` and report icon names that
/// didn't resolve
fn prepare_course(mut course: Course) -> Course {
    if !course.icon.is_recognized() {
        tracing::warn!(
            "Course {} has unrecognized icon {:?}",
            course.id,
            course.icon.name()
        );
    }

    for module in &mut course.modules {
        for lesson in &mut module.lessons {
            lesson.content = format!("{}/{}", course.id, lesson.content);
        }
    }
    course
}

/// Load the manifest and every course it lists.
///
/// Descriptors are fetched concurrently; one that fails is logged and left
/// out. Only an unreadable manifest fails the whole load.
pub async fn load_catalog(
    source: Arc<dyn ContentSource>,
    config: &ContentConfig,
) -> Result<Catalog, ContentError> {
    tracing::info!("Loading catalog from {}", source.describe());
    let course_ids: Vec<String> = fetch_json(source.as_ref(), &config.manifest).await?;

    let mut tasks = JoinSet::new();
    for (index, id) in course_ids.iter().cloned().enumerate() {
        let source = source.clone();
        tasks.spawn(async move {
            let path = format!("{id}/course.json");
            let result = fetch_json::<Course>(source.as_ref(), &path).await;
            (index, id, result)
        });
    }

    let mut slots: Vec<Option<Course>> = vec![None; course_ids.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, _, Ok(course))) => slots[index] = Some(prepare_course(course)),
            Ok((_, id, Err(e))) => {
                tracing::warn!("Failed to load course config for '{}': {}", id, e)
            }
            Err(e) => tracing::error!("Course loading task failed: {}", e),
        }
    }

    let courses: Vec<Course> = slots.into_iter().flatten().collect();
    tracing::info!("Loaded {} of {} courses", courses.len(), course_ids.len());

    Ok(Catalog::assemble(courses, &config.enrolled_course_ids))
}

/// Raw markdown of a lesson. Failures surface as "content unavailable",
/// never as partial text.
pub async fn fetch_lesson(source: &dyn ContentSource, lesson: &Lesson) -> Result<String, ContentError> {
    tracing::debug!("Fetching lesson {} from {}", lesson.id, lesson.content);
    source.fetch_text(&lesson.content).await
}
