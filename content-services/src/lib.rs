//! Translation and inference clients consumed by the prompt selector and the bot.

pub mod deepl;
pub mod errors;
pub mod hugging_face;

pub use deepl::{DeepLConfig, DeepLService};
pub use errors::{ContentError, ContentResult, Service};
pub use hugging_face::{GeneratedImage, HuggingFaceConfig, HuggingFaceService, LabelScore};
