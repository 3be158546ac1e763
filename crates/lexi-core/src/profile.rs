//! Persisted user profile.
//!
//! The profile is an immutable value. Changes go through [`update_profile`],
//! which persists the new profile and hands it back to the caller.

use std::collections::HashMap;
use std::sync::Mutex;

use lexi_types::{CefrLevel, Skill, UserProfile};

use crate::error::ProfileError;

/// Key-value storage for serialized profiles
pub trait ProfileStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ProfileError>;
}

/// In-process store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ProfileError::Store(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ProfileError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ProfileError::Store(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the stored profile. A missing, unreadable or corrupt entry yields
/// the default profile; invalid level fields fall back to A1.
pub fn load_profile(store: &dyn ProfileStore, key: &str) -> UserProfile {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Stored profile {key} is corrupt, using default: {e}");
                UserProfile::default()
            }
        },
        Ok(None) => {
            tracing::info!("No stored profile {key}, using default");
            UserProfile::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read profile {key}, using default: {e}");
            UserProfile::default()
        }
    }
}

pub fn save_profile(
    store: &dyn ProfileStore,
    key: &str,
    profile: &UserProfile,
) -> Result<(), ProfileError> {
    let raw = serde_json::to_string(profile)?;
    store.set(key, &raw)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChange {
    GeneralLevel(CefrLevel),
    /// `None` clears the override so the general level applies again
    SkillLevel(Skill, Option<CefrLevel>),
    Rename { name: String, email: String },
}

impl ProfileChange {
    /// New profile with this change applied
    pub fn apply(&self, profile: &UserProfile) -> UserProfile {
        let mut next = profile.clone();
        match self {
            ProfileChange::GeneralLevel(level) => next.general_level = *level,
            ProfileChange::SkillLevel(skill, Some(level)) => {
                next.skill_levels = profile.skill_levels.with(*skill, *level)
            }
            ProfileChange::SkillLevel(skill, None) => {
                next.skill_levels = profile.skill_levels.without(*skill)
            }
            ProfileChange::Rename { name, email } => {
                next.name = name.clone();
                next.email = email.clone();
            }
        }
        next
    }
}

/// Apply `changes`, persist, and return the new profile. Nothing is stored
/// when saving fails.
pub fn update_profile(
    store: &dyn ProfileStore,
    key: &str,
    profile: &UserProfile,
    changes: &[ProfileChange],
) -> Result<UserProfile, ProfileError> {
    let next = changes
        .iter()
        .fold(profile.clone(), |current, change| change.apply(&current));
    save_profile(store, key, &next)?;
    tracing::info!(
        "Saved profile {key}: general level {}",
        next.general_level
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use lexi_types::SkillLevels;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::levels::effective_level;

    struct BrokenStore;

    impl ProfileStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, ProfileError> {
            Err(ProfileError::Store("offline".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), ProfileError> {
            Err(ProfileError::Store("offline".into()))
        }
    }

    #[test]
    fn missing_profile_is_default() {
        let store = MemoryStore::new();
        let profile = load_profile(&store, "user_profile");
        assert_eq!(profile.name, "Alex Doe");
        assert_eq!(profile.email, "alex.doe@example.com");
        assert_eq!(profile.general_level, CefrLevel::B1);
        assert!(profile.skill_levels.is_empty());
        assert_eq!(load_profile(&BrokenStore, "user_profile"), profile);
    }

    #[test]
    fn corrupt_level_falls_back_to_a1() {
        let store = MemoryStore::new();
        store
            .set(
                "user_profile",
                r#"{"name":"Sam","email":"s@x.io","generalLevel":"Z9","skillLevels":{"reading":"C1","cooking":"B2"}}"#,
            )
            .unwrap();

        let profile = load_profile(&store, "user_profile");
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.general_level, CefrLevel::A1);
        assert_eq!(profile.skill_levels.get(Skill::Reading), Some(CefrLevel::C1));
        assert_eq!(effective_level(&profile, Some(Skill::Writing)), CefrLevel::A1);
    }

    #[test]
    fn unparseable_profile_is_default() {
        let store = MemoryStore::new();
        store.set("user_profile", "{not json").unwrap();
        assert_eq!(load_profile(&store, "user_profile"), UserProfile::default());
    }

    #[test]
    fn update_returns_new_value_and_persists() {
        let store = MemoryStore::new();
        let before = UserProfile::default();

        let after = update_profile(
            &store,
            "user_profile",
            &before,
            &[
                ProfileChange::GeneralLevel(CefrLevel::B2),
                ProfileChange::SkillLevel(Skill::Speaking, Some(CefrLevel::A2)),
                ProfileChange::SkillLevel(Skill::Reading, Some(CefrLevel::C1)),
                ProfileChange::SkillLevel(Skill::Reading, None),
            ],
        )
        .unwrap();

        assert_eq!(before.general_level, CefrLevel::B1);
        assert_eq!(after.general_level, CefrLevel::B2);
        assert_eq!(
            after.skill_levels,
            SkillLevels::new().with(Skill::Speaking, CefrLevel::A2)
        );
        assert_eq!(load_profile(&store, "user_profile"), after);
    }

    #[test]
    fn failed_save_is_reported() {
        let result = update_profile(
            &BrokenStore,
            "user_profile",
            &UserProfile::default(),
            &[ProfileChange::Rename {
                name: "Kim".into(),
                email: "kim@example.com".into(),
            }],
        );
        assert!(matches!(result, Err(ProfileError::Store(_))));
    }
}
