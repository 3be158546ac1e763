pub mod annotation;
pub mod error;
pub mod gate;
pub mod levels;
pub mod lookup;
pub mod overlay;
pub mod preprocess;
pub mod profile;
pub mod prose;
pub mod vocabulary;
pub mod word_index;

pub use annotation::{Activation, AnnotationState, FetchState, LessonSession, LookupRequest, Resolution};
pub use error::{IndexLoadError, ProfileError};
pub use levels::DifficultyTier;
pub use lookup::DefinitionLookup;
pub use overlay::PopoverLayout;
pub use profile::{MemoryStore, ProfileChange, ProfileStore};
pub use word_index::WordLevelIndex;
