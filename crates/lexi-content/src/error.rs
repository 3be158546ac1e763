/// Content that could not be loaded. Views show these as a "could not
/// load" message; nothing here is fatal to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to fetch {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    #[error("Unknown lesson {lesson} in course {course}")]
    UnknownLesson { course: String, lesson: String },
}
