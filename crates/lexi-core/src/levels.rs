//! Level comparisons, effective level resolution and lock decisions.
//!
//! Everything here is total: any well-typed input yields an answer.

use lexi_types::{CefrLevel, Course, Skill, UserProfile};

/// Position of `level` on the scale, 0 (A1) to 5 (C2)
pub fn level_index(level: CefrLevel) -> usize {
    level.index()
}

/// True when `content` sits above `user` on the scale
pub fn is_harder_than(content: CefrLevel, user: CefrLevel) -> bool {
    level_index(content) > level_index(user)
}

/// Level that applies to `user` in `context`: the skill override when one
/// is set, the general level otherwise
pub fn effective_level(user: &UserProfile, context: Option<Skill>) -> CefrLevel {
    context
        .and_then(|skill| user.skill_levels.get(skill))
        .unwrap_or(user.general_level)
}

/// Same as [`effective_level`] for a free-form context name such as a hub id.
/// Names that aren't skills resolve to the general level.
pub fn effective_level_for(user: &UserProfile, context: Option<&str>) -> CefrLevel {
    effective_level(user, context.and_then(Skill::parse))
}

/// Content more than one level above the user is locked; the current level
/// and one level up stay open
pub fn is_level_locked(content: CefrLevel, user: CefrLevel) -> bool {
    level_index(content) > level_index(user) + 1
}

pub fn is_course_locked(course: &Course, user_level: CefrLevel) -> bool {
    is_level_locked(course.level, user_level)
}

/// Signed distance from the user's level to the word's level
pub fn difficulty_gap(word_level: CefrLevel, user_level: CefrLevel) -> i32 {
    level_index(word_level) as i32 - level_index(user_level) as i32
}

/// Visual tier of an annotated word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    /// At or below the user's level
    Comfortable,
    /// One level above: the challenge zone
    Target,
    /// Two or more levels above
    TooHard,
}

impl DifficultyTier {
    pub fn from_gap(gap: i32) -> Self {
        match gap {
            g if g >= 2 => DifficultyTier::TooHard,
            1 => DifficultyTier::Target,
            _ => DifficultyTier::Comfortable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Comfortable => "default",
            DifficultyTier::Target => "target",
            DifficultyTier::TooHard => "too-hard",
        }
    }
}
