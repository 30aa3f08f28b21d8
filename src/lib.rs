//! Best-effort audio playback for games
//!
//! This crate provides:
//! - One-shot sound effects through a bounded LRU cache of handles
//! - A single replaceable background-music slot with infinite looping
//! - A decryption seam for packaged (encrypted) asset files
//! - A backend trait over rodio so playback logic is testable headless
//!
//! Audio feedback is non-essential to the surrounding game, so every
//! operation degrades silently to a no-op on failure while still returning
//! an observable outcome value.

pub mod backend;
pub mod cache;
pub mod decrypt;
pub mod manager;
pub mod settings;
pub mod sound;

// Re-exports for convenience
pub use rodio;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::backend::{Backend, BackendError, ChannelId, RodioBackend, SoundId};
    pub use crate::cache::SoundCache;
    pub use crate::decrypt::{AssetError, Decryptor};
    pub use crate::manager::{AudioManager, PlayOutcome};
    pub use crate::settings::AudioSettings;
    pub use crate::sound::Sound;
}
