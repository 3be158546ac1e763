//! Course gating and the catalog views built on it.

use lexi_types::{Article, CefrLevel, Course, Hub, Skill, UserProfile};

use crate::levels::{effective_level, is_course_locked};

/// Whether `course` is locked for `user` in `context`
pub fn is_locked(course: &Course, user: &UserProfile, context: Option<Skill>) -> bool {
    is_course_locked(course, effective_level(user, context))
}

pub fn is_visible(course: &Course, user: &UserProfile, context: Option<Skill>) -> bool {
    !is_locked(course, user, context)
}

/// Course recommended on the home view: the first one at the user's level
/// or one above, falling back to the first course, which may be locked
pub fn featured_course<'a>(
    courses: &'a [Course],
    user: &UserProfile,
) -> Option<CourseListing<'a>> {
    let user_index = effective_level(user, None).index();
    courses
        .iter()
        .find(|course| {
            let index = course.level.index();
            index == user_index || index == user_index + 1
        })
        .or_else(|| courses.first())
        .map(|course| CourseListing {
            course,
            locked: is_locked(course, user, None),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGroup<'a> {
    pub level: CefrLevel,
    pub locked: bool,
    pub courses: Vec<&'a Course>,
}

/// Bucket the hub's courses by level, A1 first. Empty levels are left out.
pub fn group_by_level<'a>(
    hub: &Hub,
    courses: &'a [Course],
    user: &UserProfile,
) -> Vec<LevelGroup<'a>> {
    let user_level = effective_level(user, hub.skill());

    CefrLevel::ALL
        .into_iter()
        .filter_map(|level| {
            let members: Vec<&Course> = courses
                .iter()
                .filter(|course| course.level == level && hub.course_ids.contains(&course.id))
                .collect();
            // members all share `level`
            let locked = is_course_locked(members.first()?, user_level);
            Some(LevelGroup {
                level,
                locked,
                courses: members,
            })
        })
        .collect()
}

/// Duration bucket on the discovery view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationFilter {
    #[default]
    Any,
    /// Under 4 hours
    Short,
    /// 4 to 5 hours
    Medium,
    /// Over 5 hours
    Long,
}

impl DurationFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "any" => Some(DurationFilter::Any),
            "short" => Some(DurationFilter::Short),
            "medium" => Some(DurationFilter::Medium),
            "long" => Some(DurationFilter::Long),
            _ => None,
        }
    }

    /// Durations without a leading number only pass `Any`
    pub fn matches(&self, duration: &str) -> bool {
        let Some(hours) = leading_hours(duration) else {
            return *self == DurationFilter::Any;
        };
        match self {
            DurationFilter::Any => true,
            DurationFilter::Short => hours < 4,
            DurationFilter::Medium => (4..=5).contains(&hours),
            DurationFilter::Long => hours > 5,
        }
    }
}

/// Integer at the start of a duration text such as "4 hours"
fn leading_hours(duration: &str) -> Option<u32> {
    let digits: String = duration
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryFilter {
    pub query: String,
    pub hub: Option<String>,
    pub level: Option<CefrLevel>,
    pub duration: DurationFilter,
}

impl DiscoveryFilter {
    /// Articles carry no hub, level or duration, so any of those filters
    /// hides them
    pub fn shows_articles(&self) -> bool {
        self.hub.is_none() && self.level.is_none() && self.duration == DurationFilter::Any
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListing<'a> {
    pub course: &'a Course,
    pub locked: bool,
}

/// Courses matching `filter`, in catalog order. Lock flags use the
/// context-free effective level.
pub fn discover<'a>(
    courses: &'a [Course],
    hubs: &[Hub],
    filter: &DiscoveryFilter,
    user: &UserProfile,
) -> Vec<CourseListing<'a>> {
    let query = filter.query.trim().to_lowercase();
    let hub = filter
        .hub
        .as_deref()
        .and_then(|id| hubs.iter().find(|hub| hub.id == id));
    if filter.hub.is_some() && hub.is_none() {
        tracing::debug!("Unknown hub filter {:?}", filter.hub);
        return Vec::new();
    }

    courses
        .iter()
        .filter(|course| hub.is_none_or(|hub| hub.course_ids.contains(&course.id)))
        .filter(|course| {
            query.is_empty()
                || course.title.to_lowercase().contains(&query)
                || course.description.to_lowercase().contains(&query)
        })
        .filter(|course| filter.level.is_none_or(|level| course.level == level))
        .filter(|course| filter.duration.matches(&course.duration))
        .map(|course| CourseListing {
            course,
            locked: is_locked(course, user, None),
        })
        .collect()
}

/// Articles matching the search text, in catalog order. Empty whenever a
/// course-only filter is set.
pub fn discover_articles<'a>(
    articles: &'a [Article],
    filter: &DiscoveryFilter,
) -> Vec<&'a Article> {
    if !filter.shows_articles() {
        return Vec::new();
    }
    let query = filter.query.trim().to_lowercase();
    articles
        .iter()
        .filter(|article| article.matches(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use lexi_types::{IconId, SkillLevels};
    use pretty_assertions::assert_eq;

    use super::*;

    fn course(id: &str, level: CefrLevel, duration: &str) -> Course {
        Course {
            id: id.into(),
            title: format!("{id} course"),
            description: format!("Learn about {id}"),
            icon: IconId::BookOpen,
            duration: duration.into(),
            level,
            details: String::new(),
            prerequisites: String::new(),
            modules: vec![],
            info: String::new(),
            tags: vec![],
        }
    }

    fn hub(id: &str, course_ids: &[&str]) -> Hub {
        Hub {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            icon: IconId::BookOpen,
            course_ids: course_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalog() -> Vec<Course> {
        vec![
            course("basics", CefrLevel::A1, "3 hours"),
            course("idioms", CefrLevel::B2, "5 hours"),
            course("debate", CefrLevel::C1, "8 hours"),
            course("phrasal", CefrLevel::B1, "4 hours"),
        ]
    }

    fn user(level: CefrLevel) -> UserProfile {
        UserProfile {
            general_level: level,
            ..UserProfile::default()
        }
    }

    fn ids(listings: &[CourseListing<'_>]) -> Vec<String> {
        listings.iter().map(|l| l.course.id.clone()).collect()
    }

    #[test]
    fn gate_uses_skill_override() {
        let debate = course("debate", CefrLevel::C1, "8 hours");
        let profile = UserProfile {
            general_level: CefrLevel::B2,
            skill_levels: SkillLevels::new().with(Skill::Speaking, CefrLevel::A2),
            ..UserProfile::default()
        };
        assert!(is_visible(&debate, &profile, None));
        assert!(is_locked(&debate, &profile, Some(Skill::Speaking)));
    }

    #[test]
    fn featured_prefers_current_or_next_level() {
        let courses = catalog();
        assert_eq!(featured_course(&courses, &user(CefrLevel::A2)).unwrap().course.id, "phrasal");
        assert_eq!(featured_course(&courses, &user(CefrLevel::B2)).unwrap().course.id, "idioms");
        assert_eq!(featured_course(&courses, &user(CefrLevel::C2)).unwrap().course.id, "basics");
        assert!(featured_course(&[], &user(CefrLevel::B1)).is_none());
    }

    #[test]
    fn featured_fallback_keeps_lock() {
        let courses = vec![course("debate", CefrLevel::C1, "8 hours")];
        let featured = featured_course(&courses, &user(CefrLevel::A1)).unwrap();
        assert_eq!(featured.course.id, "debate");
        assert!(featured.locked);

        let featured = featured_course(&courses, &user(CefrLevel::B2)).unwrap();
        assert!(!featured.locked);
    }

    #[test]
    fn hub_groups_by_level_with_lock_flags() {
        let courses = catalog();
        let speaking = hub("speaking", &["basics", "debate", "idioms"]);
        let profile = UserProfile {
            general_level: CefrLevel::C1,
            skill_levels: SkillLevels::new().with(Skill::Speaking, CefrLevel::A2),
            ..UserProfile::default()
        };

        let groups = group_by_level(&speaking, &courses, &profile);
        let summary: Vec<(CefrLevel, bool, usize)> = groups
            .iter()
            .map(|g| (g.level, g.locked, g.courses.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (CefrLevel::A1, false, 1),
                (CefrLevel::B2, true, 1),
                (CefrLevel::C1, true, 1),
            ]
        );
        for group in &groups {
            for course in &group.courses {
                assert_eq!(group.locked, is_locked(course, &profile, speaking.skill()));
            }
        }
    }

    #[test]
    fn duration_buckets() {
        assert!(DurationFilter::Short.matches("3 hours"));
        assert!(!DurationFilter::Short.matches("4 hours"));
        assert!(DurationFilter::Medium.matches("4 hours"));
        assert!(DurationFilter::Medium.matches("5h"));
        assert!(DurationFilter::Long.matches("12 hours"));
        assert!(!DurationFilter::Long.matches("self-paced"));
        assert!(DurationFilter::Any.matches("self-paced"));
        assert_eq!(DurationFilter::parse("LONG"), Some(DurationFilter::Long));
        assert_eq!(DurationFilter::parse("forever"), None);
    }

    #[test]
    fn discovery_combines_filters() {
        let courses = catalog();
        let hubs = vec![hub("vocabulary", &["basics", "idioms", "phrasal"])];
        let profile = user(CefrLevel::A2);

        let all = discover(&courses, &hubs, &DiscoveryFilter::default(), &profile);
        assert_eq!(ids(&all), vec!["basics", "idioms", "debate", "phrasal"]);
        let locked: Vec<bool> = all.iter().map(|l| l.locked).collect();
        assert_eq!(locked, vec![false, true, true, false]);

        let filter = DiscoveryFilter {
            hub: Some("vocabulary".into()),
            duration: DurationFilter::Medium,
            ..DiscoveryFilter::default()
        };
        assert_eq!(ids(&discover(&courses, &hubs, &filter, &profile)), vec!["idioms", "phrasal"]);

        let filter = DiscoveryFilter {
            query: "  LEARN about PHR ".into(),
            ..DiscoveryFilter::default()
        };
        assert_eq!(ids(&discover(&courses, &hubs, &filter, &profile)), vec!["phrasal"]);

        let filter = DiscoveryFilter {
            level: Some(CefrLevel::C1),
            ..DiscoveryFilter::default()
        };
        assert_eq!(ids(&discover(&courses, &hubs, &filter, &profile)), vec!["debate"]);

        let filter = DiscoveryFilter {
            hub: Some("cooking".into()),
            ..DiscoveryFilter::default()
        };
        assert!(discover(&courses, &hubs, &filter, &profile).is_empty());
    }

    fn article(id: &str, title: &str, tags: &[&str]) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            snippet: String::new(),
            author: "Jane Doe".into(),
            published_date: "Oct 26, 2023".into(),
            read_time: "5 min read".into(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            content: String::new(),
        }
    }

    #[test]
    fn articles_only_without_course_filters() {
        let articles = vec![
            article("article-1", "Common Mistakes", &["Grammar"]),
            article("article-2", "Phrasal Verbs", &["Vocabulary", "Speaking"]),
        ];
        let article_ids = |found: Vec<&Article>| -> Vec<String> {
            found.iter().map(|a| a.id.clone()).collect()
        };

        assert_eq!(
            article_ids(discover_articles(&articles, &DiscoveryFilter::default())),
            vec!["article-1", "article-2"]
        );

        let filter = DiscoveryFilter {
            query: "speak".into(),
            ..DiscoveryFilter::default()
        };
        assert_eq!(article_ids(discover_articles(&articles, &filter)), vec!["article-2"]);

        for filter in [
            DiscoveryFilter {
                hub: Some("vocabulary".into()),
                ..DiscoveryFilter::default()
            },
            DiscoveryFilter {
                level: Some(CefrLevel::B1),
                ..DiscoveryFilter::default()
            },
            DiscoveryFilter {
                duration: DurationFilter::Short,
                ..DiscoveryFilter::default()
            },
        ] {
            assert!(!filter.shows_articles());
            assert!(discover_articles(&articles, &filter).is_empty());
        }
    }
}
