pub mod catalog;
pub mod level;
pub mod lookup;
pub mod types;

pub use catalog::{Article, Course, Hub, IconId, LearningPath, Lesson, Module, Quiz, QuizOption};
pub use level::{CefrLevel, DEFAULT_LEVEL, Skill, SkillLevels, UserProfile};
pub use lookup::{LookupKind, LookupResult, Meaning, Sense, WordDefinition, WordTranslation};
pub use types::{AppEvent, Mode, Position, Rect, Size};
