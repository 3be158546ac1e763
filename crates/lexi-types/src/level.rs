use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Level assumed whenever a stored level is missing or unreadable.
pub const DEFAULT_LEVEL: CefrLevel = CefrLevel::A1;

/// CEFR proficiency level, A1 (lowest) to C2 (highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// All levels from easiest to hardest
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// Position on the scale, 0 (A1) to 5 (C2)
    pub fn index(self) -> usize {
        match self {
            CefrLevel::A1 => 0,
            CefrLevel::A2 => 1,
            CefrLevel::B1 => 2,
            CefrLevel::B2 => 3,
            CefrLevel::C1 => 4,
            CefrLevel::C2 => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse level from string, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1 - Beginner",
            CefrLevel::A2 => "A2 - Elementary",
            CefrLevel::B1 => "B1 - Intermediate",
            CefrLevel::B2 => "B2 - Upper Intermediate",
            CefrLevel::C1 => "C1 - Advanced",
            CefrLevel::C2 => "C2 - Mastery",
        }
    }
}

// Ordering goes through the index, never through the label.
impl Ord for CefrLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for CefrLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill a user can carry a separate level for. Hub ids and lesson
/// activity types use the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Reading,
    Listening,
    Speaking,
    Writing,
    Grammar,
    Vocabulary,
}

impl Skill {
    pub const ALL: [Skill; 6] = [
        Skill::Reading,
        Skill::Listening,
        Skill::Speaking,
        Skill::Writing,
        Skill::Grammar,
        Skill::Vocabulary,
    ];

    /// Resolve a context name (hub id, activity type) to a skill
    pub fn parse(context: &str) -> Option<Self> {
        match context.trim().to_lowercase().as_str() {
            "reading" => Some(Skill::Reading),
            "listening" => Some(Skill::Listening),
            "speaking" => Some(Skill::Speaking),
            "writing" => Some(Skill::Writing),
            "grammar" => Some(Skill::Grammar),
            "vocabulary" => Some(Skill::Vocabulary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Reading => "reading",
            Skill::Listening => "listening",
            Skill::Speaking => "speaking",
            Skill::Writing => "writing",
            Skill::Grammar => "grammar",
            Skill::Vocabulary => "vocabulary",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial per-skill overrides of the general level.
///
/// Unknown skill names and unreadable levels are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillLevels(BTreeMap<Skill, CefrLevel>);

impl SkillLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> Option<CefrLevel> {
        self.0.get(&skill).copied()
    }

    /// Copy with `skill` pinned to `level`
    pub fn with(&self, skill: Skill, level: CefrLevel) -> Self {
        let mut levels = self.0.clone();
        levels.insert(skill, level);
        Self(levels)
    }

    /// Copy with the override for `skill` removed
    pub fn without(&self, skill: Skill) -> Self {
        let mut levels = self.0.clone();
        levels.remove(&skill);
        Self(levels)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, CefrLevel)> + '_ {
        self.0.iter().map(|(skill, level)| (*skill, *level))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Skill, CefrLevel)> for SkillLevels {
    fn from_iter<T: IntoIterator<Item = (Skill, CefrLevel)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for SkillLevels {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, RawLevel>> = Option::deserialize(deserializer)?;
        let levels = raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(skill, level)| Some((Skill::parse(&skill)?, level.parse()?)))
            .collect();
        Ok(Self(levels))
    }
}

/// Persisted learner profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_level", deserialize_with = "lenient_level")]
    pub general_level: CefrLevel,
    #[serde(default)]
    pub skill_levels: SkillLevels,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>, general_level: CefrLevel) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            general_level,
            skill_levels: SkillLevels::new(),
        }
    }
}

/// Profile used when nothing has been stored yet
impl Default for UserProfile {
    fn default() -> Self {
        Self::new("Alex Doe", "alex.doe@example.com", CefrLevel::B1)
    }
}

fn default_level() -> CefrLevel {
    DEFAULT_LEVEL
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawLevel {
    fn parse(&self) -> Option<CefrLevel> {
        match self {
            RawLevel::Text(text) => CefrLevel::parse(text),
            RawLevel::Other(_) => None,
        }
    }
}

/// Accept any JSON value, falling back to [`DEFAULT_LEVEL`] when it isn't a level
fn lenient_level<'de, D>(deserializer: D) -> Result<CefrLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawLevel::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or(DEFAULT_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_scale_not_label() {
        for (i, level) in CefrLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(CefrLevel::from_index(i), Some(*level));
        }
        assert!(CefrLevel::B1 < CefrLevel::B2);
        assert!(CefrLevel::A2 < CefrLevel::B1);
        assert_eq!(CefrLevel::from_index(6), None);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(CefrLevel::parse("b2"), Some(CefrLevel::B2));
        assert_eq!(CefrLevel::parse(" C1 "), Some(CefrLevel::C1));
        assert_eq!(CefrLevel::parse("D1"), None);
        assert_eq!(Skill::parse("Speaking"), Some(Skill::Speaking));
        assert_eq!(Skill::parse("cooking"), None);
    }

    #[test]
    fn corrupt_general_level_falls_back_to_default() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"name":"Sam","email":"s@x","generalLevel":"Z9"}"#).unwrap();
        assert_eq!(profile.general_level, DEFAULT_LEVEL);

        let profile: UserProfile =
            serde_json::from_str(r#"{"name":"Sam","generalLevel":42}"#).unwrap();
        assert_eq!(profile.general_level, DEFAULT_LEVEL);

        let profile: UserProfile = serde_json::from_str(r#"{"name":"Sam"}"#).unwrap();
        assert_eq!(profile.general_level, DEFAULT_LEVEL);
    }

    #[test]
    fn skill_levels_drop_unreadable_entries() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"generalLevel":"B1","skillLevels":{"speaking":"A2","cooking":"C1","writing":null}}"#,
        )
        .unwrap();
        assert_eq!(profile.general_level, CefrLevel::B1);
        assert_eq!(profile.skill_levels.get(Skill::Speaking), Some(CefrLevel::A2));
        assert_eq!(profile.skill_levels.get(Skill::Writing), None);
        assert_eq!(profile.skill_levels.iter().count(), 1);
    }

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let profile = UserProfile {
            skill_levels: SkillLevels::new().with(Skill::Reading, CefrLevel::C1),
            ..UserProfile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["generalLevel"], "B1");
        assert_eq!(json["skillLevels"]["reading"], "C1");

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn with_and_without_return_new_profiles() {
        let base = SkillLevels::new().with(Skill::Grammar, CefrLevel::A2);
        let cleared = base.without(Skill::Grammar);
        assert_eq!(base.get(Skill::Grammar), Some(CefrLevel::A2));
        assert!(cleared.is_empty());
    }
}
