//! Production backend built on the rodio audio library
//!
//! Supports WAV, MP3, OGG, and FLAC formats.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, mixer::Mixer};
use rustc_hash::FxHashMap;

use super::{Backend, BackendError, ChannelId, SoundId};

/// A loaded sound, kept as its encoded bytes and decoded fresh on each play.
struct SoundData {
    /// Encoded file contents
    bytes: Arc<[u8]>,
    /// Whether playback loops forever (background music)
    looping: bool,
    /// Source name for diagnostics
    name: String,
}

/// [`Backend`] implementation on top of rodio.
///
/// Each playback channel is a dedicated `Sink` connected to the shared
/// mixer; `update` reclaims sinks that have drained.
pub struct RodioBackend {
    /// The output stream (must be kept alive)
    _stream: OutputStream,
    /// The mixer for creating sinks
    mixer: Mixer,
    /// Loaded sounds by id
    sounds: FxHashMap<u64, SoundData>,
    /// Live playback channels by id
    channels: FxHashMap<u64, Sink>,
    next_sound: u64,
    next_channel: u64,
}

impl RodioBackend {
    fn insert_sound(
        &mut self,
        bytes: Arc<[u8]>,
        name: &str,
        looping: bool,
    ) -> Result<SoundId, BackendError> {
        // Validate up front so a bad file yields a load error, not a
        // silently dead channel later.
        Decoder::new(Cursor::new(Arc::clone(&bytes)))
            .map_err(|e| BackendError::Decode(format!("{name}: {e}")))?;

        let id = self.next_sound;
        self.next_sound += 1;
        self.sounds.insert(
            id,
            SoundData {
                bytes,
                looping,
                name: name.to_string(),
            },
        );
        Ok(SoundId(id))
    }
}

impl Backend for RodioBackend {
    fn create() -> Result<Self, BackendError> {
        let stream = OutputStreamBuilder::from_default_device()
            .map_err(|_| BackendError::NoDevice)?
            .open_stream()
            .map_err(|_| BackendError::NoDevice)?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer,
            sounds: FxHashMap::default(),
            channels: FxHashMap::default(),
            next_sound: 1,
            next_channel: 1,
        })
    }

    fn load_sound(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError> {
        self.insert_sound(bytes, name, false)
    }

    fn load_stream(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError> {
        self.insert_sound(bytes, name, true)
    }

    fn release_sound(&mut self, id: SoundId) {
        self.sounds.remove(&id.0);
    }

    fn play_sound(&mut self, id: SoundId) -> Result<ChannelId, BackendError> {
        let data = self.sounds.get(&id.0).ok_or(BackendError::UnknownSound)?;

        let source = Decoder::new(Cursor::new(Arc::clone(&data.bytes)))
            .map_err(|e| BackendError::Decode(format!("{}: {e}", data.name)))?;

        let sink = Sink::connect_new(&self.mixer);
        if data.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        let channel = self.next_channel;
        self.next_channel += 1;
        self.channels.insert(channel, sink);
        Ok(ChannelId(channel))
    }

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> bool {
        if let Some(sink) = self.channels.get(&channel.0) {
            sink.set_volume(volume.max(0.0));
            true
        } else {
            false
        }
    }

    fn stop_channel(&mut self, channel: ChannelId) -> bool {
        if let Some(sink) = self.channels.get(&channel.0) {
            sink.stop();
            true
        } else {
            false
        }
    }

    fn channel_playing(&self, channel: ChannelId) -> bool {
        self.channels
            .get(&channel.0)
            .is_some_and(|sink| !sink.empty() && !sink.is_paused())
    }

    fn active_channels(&self) -> Vec<ChannelId> {
        self.channels
            .iter()
            .filter(|(_, sink)| !sink.empty())
            .map(|(&id, _)| ChannelId(id))
            .collect()
    }

    fn update(&mut self) {
        // Stopped and finished sinks drain to empty; reclaim them.
        self.channels.retain(|_, sink| !sink.empty());
    }

    fn version() -> &'static str {
        "rodio 0.21.1"
    }
}

impl std::fmt::Debug for RodioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioBackend")
            .field("sound_count", &self.sounds.len())
            .field("channel_count", &self.channels.len())
            .finish()
    }
}
