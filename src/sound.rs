//! Sound handle wrapping one loaded asset
//!
//! A handle owns at most one backend sound resource and remembers the last
//! channel it played on. Loading never fails loudly: a handle whose load
//! failed simply holds no resource and every operation becomes a no-op.

use std::path::Path;

use crate::backend::{Backend, ChannelId, SoundId};
use crate::decrypt::{self, Decryptor};
use crate::manager::PlayOutcome;

/// One loaded sound asset and its most recent playback channel.
///
/// The channel reference is weak: the backend owns channel lifetime and may
/// reclaim a channel at any time, so playing-state is always a live query.
pub struct Sound {
    /// Source filename, for diagnostics
    name: String,
    /// Backend resource, owned exclusively and released exactly once
    resource: Option<SoundId>,
    /// Last channel this sound was assigned to
    channel: Option<ChannelId>,
}

impl Sound {
    /// Load a sound file, routing encrypted containers through the decryptor.
    ///
    /// On any read, decrypt, or decode failure the handle holds a null
    /// resource; the failure is logged, never surfaced.
    pub fn load<B: Backend>(
        backend: &mut B,
        decryptor: Option<&dyn Decryptor>,
        path: impl AsRef<Path>,
    ) -> Self {
        let path = path.as_ref();
        let name = path.display().to_string();

        let resource = match decrypt::read_asset(path, decryptor) {
            Ok(bytes) => match backend.load_sound(bytes, &name) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("Failed to load sound {name}: {e}");
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read sound {name}: {e}");
                None
            }
        };

        Self {
            name,
            resource,
            channel: None,
        }
    }

    /// Play this sound on a free channel at the given volume.
    ///
    /// On success the new channel is remembered and the backend flushed.
    /// A rejected play records no channel.
    pub fn play<B: Backend>(&mut self, backend: &mut B, volume: f32) -> PlayOutcome {
        let Some(resource) = self.resource else {
            return PlayOutcome::LoadFailed;
        };

        match backend.play_sound(resource) {
            Ok(channel) => {
                backend.set_channel_volume(channel, volume);
                self.channel = Some(channel);
                backend.update();
                PlayOutcome::Started
            }
            Err(e) => {
                log::warn!("Playback rejected for {}: {e}", self.name);
                PlayOutcome::Rejected
            }
        }
    }

    /// Live query of the last assigned channel's playing state.
    ///
    /// False until the sound has been assigned a channel at least once.
    #[must_use]
    pub fn is_playing<B: Backend>(&self, backend: &B) -> bool {
        self.channel
            .is_some_and(|channel| backend.channel_playing(channel))
    }

    /// Release the backend resource. Safe to call more than once.
    pub fn release<B: Backend>(&mut self, backend: &mut B) {
        if let Some(id) = self.resource.take() {
            backend.release_sound(id);
        }
    }

    /// Whether the load produced a playable resource.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.resource.is_some()
    }

    /// The source filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub(crate) fn unloaded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resource: None,
            channel: None,
        }
    }
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("name", &self.name)
            .field("loaded", &self.resource.is_some())
            .field("channel", &self.channel)
            .finish()
    }
}
