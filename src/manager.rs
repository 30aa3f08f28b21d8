//! Audio facade: engine lifecycle, one-shot playback, background music
//!
//! Owns the engine context explicitly instead of keeping it in ambient
//! globals. Every operation silently degrades to a no-op when the context
//! is absent or a resource failed to load, but returns an outcome value so
//! callers (and tests) can still observe what happened.
//!
//! Single-threaded by design: all methods are expected to be called from
//! one control thread, and each flushes the backend before returning.

use std::path::Path;

use crate::backend::{Backend, ChannelId, RodioBackend, SoundId};
use crate::cache::SoundCache;
use crate::decrypt::{self, Decryptor};
use crate::settings::AudioSettings;
use crate::sound::Sound;

/// Result of a playback request.
///
/// The facade is fire-and-forget: no variant is an error to handle, but
/// tests can assert on the exact outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started on a free channel
    Started,
    /// The sound is still sounding; the request was dropped to avoid an
    /// overlapping retrigger
    AlreadyPlaying,
    /// No engine context; the call was a no-op
    EngineAbsent,
    /// The asset could not be read, decrypted, or decoded
    LoadFailed,
    /// The backend rejected the play request
    Rejected,
}

/// The single background-music stream and its channel.
struct BgmSlot {
    resource: SoundId,
    channel: ChannelId,
}

/// Best-effort audio playback facade.
///
/// One-shot effects go through a bounded LRU cache of [`Sound`] handles;
/// background music occupies a single slot that each [`play_bgm`] call
/// replaces, releasing the previous stream.
///
/// [`play_bgm`]: AudioManager::play_bgm
pub struct AudioManager<B: Backend = RodioBackend> {
    /// Engine context; `None` before `init` and after `quit`
    backend: Option<B>,
    /// One-shot sound handles by filename
    cache: SoundCache,
    /// Background music slot
    bgm: Option<BgmSlot>,
    /// Volume settings consulted on each playback
    settings: AudioSettings,
    /// Provider for encrypted asset containers
    decryptor: Option<Box<dyn Decryptor>>,
}

impl<B: Backend> AudioManager<B> {
    /// Create a facade with no engine context. Call [`init`] before use.
    ///
    /// [`init`]: AudioManager::init
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: None,
            cache: SoundCache::new(),
            bgm: None,
            settings: AudioSettings::default(),
            decryptor: None,
        }
    }

    /// Create a facade around a prebuilt engine context.
    #[must_use]
    pub fn from_backend(backend: B) -> Self {
        Self {
            backend: Some(backend),
            ..Self::new()
        }
    }

    /// Bound the one-shot sound cache at `capacity` entries.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = SoundCache::with_capacity(capacity);
        self
    }

    /// Install a decryption provider for encrypted asset containers.
    #[must_use]
    pub fn with_decryptor(mut self, decryptor: impl Decryptor + 'static) -> Self {
        self.decryptor = Some(Box::new(decryptor));
        self
    }

    /// Replace the volume settings.
    #[must_use]
    pub fn with_settings(mut self, settings: AudioSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Create the engine context. Repeated calls are no-ops.
    ///
    /// A creation failure is logged and leaves the facade engine-less; every
    /// subsequent operation degrades to a no-op.
    pub fn init(&mut self) {
        if self.backend.is_some() {
            return;
        }
        match B::create() {
            Ok(backend) => {
                log::info!("Audio engine initialized ({})", B::version());
                self.backend = Some(backend);
            }
            Err(e) => {
                log::warn!("Audio engine unavailable: {e}");
            }
        }
    }

    /// Tear down the engine context, releasing every cached handle and the
    /// background-music resource first. Safe to call more than once.
    pub fn quit(&mut self) {
        let Some(mut backend) = self.backend.take() else {
            return;
        };
        for mut sound in self.cache.drain() {
            sound.release(&mut backend);
        }
        if let Some(slot) = self.bgm.take() {
            backend.stop_channel(slot.channel);
            backend.release_sound(slot.resource);
        }
        log::info!("Audio engine shut down");
    }

    /// Whether an engine context is live.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    /// Play a one-shot sound effect at the current effect volume.
    ///
    /// The file is loaded on first request and cached; a cache hit that is
    /// still sounding is left alone instead of retriggered. Inserting past
    /// cache capacity evicts the least-recently-used handle and releases
    /// its resource.
    pub fn play(&mut self, filename: &str) -> PlayOutcome {
        let Some(backend) = self.backend.as_mut() else {
            return PlayOutcome::EngineAbsent;
        };

        if self.cache.contains(filename) {
            if let Some(sound) = self.cache.get_mut(filename)
                && sound.is_playing(backend)
            {
                return PlayOutcome::AlreadyPlaying;
            }
        } else {
            let sound = Sound::load(backend, self.decryptor.as_deref(), Path::new(filename));
            if let Some(mut evicted) = self.cache.insert(filename.to_string(), sound) {
                evicted.release(backend);
            }
        }

        match self.cache.get_mut(filename) {
            Some(sound) => sound.play(backend, self.settings.effect_volume),
            None => PlayOutcome::LoadFailed,
        }
    }

    /// Live query: is this filename's last playback still sounding?
    #[must_use]
    pub fn is_playing(&self, filename: &str) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };
        self.cache
            .get(filename)
            .is_some_and(|sound| sound.is_playing(backend))
    }

    /// Hard global stop: silence every active channel, then the
    /// background-music channel, then flush the backend.
    pub fn stop(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        for channel in backend.active_channels() {
            backend.stop_channel(channel);
        }
        if let Some(slot) = &self.bgm {
            backend.stop_channel(slot.channel);
        }
        backend.update();
    }

    /// Start `filename` as infinitely looping background music, replacing
    /// (and releasing) whatever was previously in the slot.
    ///
    /// A load failure leaves the previous music untouched.
    pub fn play_bgm(&mut self, filename: &str) -> PlayOutcome {
        let Some(backend) = self.backend.as_mut() else {
            return PlayOutcome::EngineAbsent;
        };

        let bytes = match decrypt::read_asset(Path::new(filename), self.decryptor.as_deref()) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read music {filename}: {e}");
                return PlayOutcome::LoadFailed;
            }
        };
        let resource = match backend.load_stream(bytes, filename) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Failed to load music {filename}: {e}");
                return PlayOutcome::LoadFailed;
            }
        };

        // The previous stream is stopped and released before the slot is
        // reassigned, so replacement never leaks a resource.
        if let Some(prev) = self.bgm.take() {
            backend.stop_channel(prev.channel);
            backend.release_sound(prev.resource);
        }

        match backend.play_sound(resource) {
            Ok(channel) => {
                self.bgm = Some(BgmSlot { resource, channel });
                backend.update();
                PlayOutcome::Started
            }
            Err(e) => {
                log::warn!("Music playback rejected for {filename}: {e}");
                backend.release_sound(resource);
                PlayOutcome::Rejected
            }
        }
    }

    /// Set the background-music volume.
    ///
    /// Recorded in the settings; applied only while a background-music
    /// channel is currently sounding. Returns whether it was applied.
    pub fn set_bgm_volume(&mut self, volume: f32) -> bool {
        self.settings.bgm_volume = volume.max(0.0);
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        match &self.bgm {
            Some(slot) if backend.channel_playing(slot.channel) => {
                backend.set_channel_volume(slot.channel, self.settings.bgm_volume)
            }
            _ => false,
        }
    }

    /// Set the volume applied to subsequently played one-shot effects.
    pub fn set_effect_volume(&mut self, volume: f32) {
        self.settings.effect_volume = volume.max(0.0);
    }

    /// Stop the background music, if any. The stream's resource stays owned
    /// until it is replaced or the facade shuts down.
    pub fn stop_bgm(&mut self) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        match &self.bgm {
            Some(slot) => backend.stop_channel(slot.channel),
            None => false,
        }
    }

    /// The volume settings consulted on each playback.
    #[must_use]
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Mutable access to the volume settings.
    pub fn settings_mut(&mut self) -> &mut AudioSettings {
        &mut self.settings
    }

    /// Number of cached one-shot handles.
    #[must_use]
    pub fn sound_count(&self) -> usize {
        self.cache.len()
    }

    /// Backend version string for diagnostic display.
    #[must_use]
    pub fn version(&self) -> &'static str {
        B::version()
    }

    /// The live engine context, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Mutable access to the live engine context, if any.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }
}

impl<B: Backend> Default for AudioManager<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> std::fmt::Debug for AudioManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("initialized", &self.backend.is_some())
            .field("cached_sounds", &self.cache.len())
            .field("bgm_active", &self.bgm.is_some())
            .finish()
    }
}
