pub mod cefr;
pub mod dictionary;
pub mod error;
pub mod lookup;
pub mod translator;

pub use cefr::{builtin_index, load_index};
pub use dictionary::FreeDictionaryClient;
pub use error::LookupError;
pub use lookup::EnglishLookup;
pub use translator::IndonesianTranslator;
