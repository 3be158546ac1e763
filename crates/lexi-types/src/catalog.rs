use serde::{Deserialize, Serialize};

use crate::level::{CefrLevel, Skill};

/// Icon referenced by name from course and hub descriptors
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconId {
    BookOpen,
    Headphones,
    Microphone,
    Pencil,
    Lightbulb,
    AcademicCap,
    Briefcase,
    /// Name not in the known set, kept verbatim so the data error stays visible
    Unrecognized(String),
}

impl IconId {
    pub fn from_name(name: &str) -> Self {
        match name {
            "BookOpenIcon" => IconId::BookOpen,
            "HeadphonesIcon" => IconId::Headphones,
            "MicrophoneIcon" => IconId::Microphone,
            "PencilIcon" => IconId::Pencil,
            "LightbulbIcon" => IconId::Lightbulb,
            "AcademicCapIcon" => IconId::AcademicCap,
            "BriefcaseIcon" => IconId::Briefcase,
            other => IconId::Unrecognized(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            IconId::BookOpen => "BookOpenIcon",
            IconId::Headphones => "HeadphonesIcon",
            IconId::Microphone => "MicrophoneIcon",
            IconId::Pencil => "PencilIcon",
            IconId::Lightbulb => "LightbulbIcon",
            IconId::AcademicCap => "AcademicCapIcon",
            IconId::Briefcase => "BriefcaseIcon",
            IconId::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, IconId::Unrecognized(_))
    }

    /// Short glyph for terminal output
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::BookOpen => "[book]",
            IconId::Headphones => "[listen]",
            IconId::Microphone => "[mic]",
            IconId::Pencil => "[pencil]",
            IconId::Lightbulb => "[idea]",
            IconId::AcademicCap => "[cap]",
            IconId::Briefcase => "[work]",
            IconId::Unrecognized(_) => "[?]",
        }
    }
}

/// A descriptor without an icon name is a data error as well
impl Default for IconId {
    fn default() -> Self {
        IconId::Unrecognized(String::new())
    }
}

impl From<String> for IconId {
    fn from(name: String) -> Self {
        IconId::from_name(&name)
    }
}

impl From<IconId> for String {
    fn from(icon: IconId) -> Self {
        icon.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_feedback: String,
    pub incorrect_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Content reference of the lesson markdown
    pub content: String,
    #[serde(default)]
    pub quiz: Quiz,
    #[serde(default)]
    pub activity_type: Option<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Course descriptor as read from `<id>/course.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "iconName", default)]
    pub icon: IconId,
    #[serde(default)]
    pub duration: String,
    /// Authoritative level used for gating
    pub level: CefrLevel,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub prerequisites: String,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Course {
    pub fn find_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.modules
            .iter()
            .flat_map(|module| module.lessons.iter())
            .find(|lesson| lesson.id == lesson_id)
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|module| module.lessons.len()).sum()
    }
}

/// Skill hub grouping courses by tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "iconName")]
    pub icon: IconId,
    #[serde(default)]
    pub course_ids: Vec<String>,
}

impl Hub {
    /// Skill whose level override applies inside this hub
    pub fn skill(&self) -> Option<Skill> {
        Skill::parse(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course_ids: Vec<String>,
}

/// Free-standing reading piece listed next to courses on the discovery view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub author: String,
    pub published_date: String,
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Markdown body
    pub content: String,
}

impl Article {
    /// Case-insensitive match of a lowercased `query` against title,
    /// snippet and tags
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty()
            || self.title.to_lowercase().contains(query)
            || self.snippet.to_lowercase().contains(query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(query))
    }
}
