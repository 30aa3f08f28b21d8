//! Audio backend abstraction
//!
//! The facade talks to the underlying audio engine exclusively through the
//! [`Backend`] trait, so playback logic can be tested against a scripted
//! backend without an output device.

mod rodio;

pub use self::rodio::RodioBackend;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

/// Opaque identifier for a loaded sound resource owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub(crate) u64);

/// Opaque identifier for a playback channel owned by the backend.
///
/// Channels are reclaimed by the backend when playback finishes; holding a
/// `ChannelId` does not keep the channel alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub(crate) u64);

/// Interface to the underlying audio engine.
///
/// All playback state lives behind this boundary: the backend is the single
/// source of truth for channel lifetime, and callers must re-query rather
/// than cache playing-state.
pub trait Backend: Sized {
    /// Open the engine context (output device and mixer).
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available.
    fn create() -> Result<Self, BackendError>;

    /// Register encoded audio bytes as a one-shot playable sound.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded.
    fn load_sound(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError>;

    /// Register encoded audio bytes as an infinitely looping stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded.
    fn load_stream(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError>;

    /// Free a loaded sound resource. Unknown ids are ignored.
    fn release_sound(&mut self, id: SoundId);

    /// Start playback of a loaded sound on a free channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the sound is unknown or playback is rejected.
    fn play_sound(&mut self, id: SoundId) -> Result<ChannelId, BackendError>;

    /// Set the volume of a channel. Returns false if the channel is gone.
    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> bool;

    /// Stop a channel. Returns false if the channel is gone.
    fn stop_channel(&mut self, channel: ChannelId) -> bool;

    /// Live query of a channel's playing state.
    fn channel_playing(&self, channel: ChannelId) -> bool;

    /// Enumerate every channel that is currently sounding.
    fn active_channels(&self) -> Vec<ChannelId>;

    /// Synchronous flush: reclaim channels that have finished playing.
    fn update(&mut self);

    /// Fixed version string for diagnostic display.
    fn version() -> &'static str;
}

/// Errors that can occur during backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// No audio output device available
    NoDevice,
    /// IO error reading audio data
    Io(String),
    /// Error decoding audio data
    Decode(String),
    /// Error starting playback
    Play(String),
    /// The sound id is not registered with the backend
    UnknownSound,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDevice => write!(f, "No audio output device available"),
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Decode(e) => write!(f, "Decode error: {e}"),
            Self::Play(e) => write!(f, "Playback error: {e}"),
            Self::UnknownSound => write!(f, "Sound is not loaded"),
        }
    }
}

impl std::error::Error for BackendError {}
