//! Scripted backend for tests
//!
//! Records every load, play, release, stop, and volume write so tests can
//! observe failures the facade deliberately swallows. State lives behind an
//! `Rc` so a test keeps a handle after moving the backend into the facade.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use super::{Backend, BackendError, ChannelId, SoundId};

pub(crate) struct MockSound {
    pub name: String,
    pub bytes: Vec<u8>,
    pub looping: bool,
}

pub(crate) struct MockChannel {
    pub sound: SoundId,
    pub playing: bool,
    pub volume: Option<f32>,
}

#[derive(Default)]
pub(crate) struct MockState {
    pub sounds: HashMap<u64, MockSound>,
    pub channels: HashMap<u64, MockChannel>,
    pub released: Vec<SoundId>,
    pub load_counts: HashMap<String, u32>,
    pub update_count: u32,
    pub fail_load: bool,
    pub fail_play: bool,
    next_sound: u64,
    next_channel: u64,
}

impl MockState {
    pub fn loads(&self, name: &str) -> u32 {
        self.load_counts.get(name).copied().unwrap_or(0)
    }

    /// Simulate the backend finishing a channel on its own.
    pub fn finish_channel(&mut self, channel: ChannelId) {
        if let Some(ch) = self.channels.get_mut(&channel.0) {
            ch.playing = false;
        }
    }
}

pub(crate) struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn new() -> (Self, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState::default()));
        let backend = Self {
            state: Rc::clone(&state),
        };
        (backend, state)
    }
}

impl Backend for MockBackend {
    fn create() -> Result<Self, BackendError> {
        Ok(Self::new().0)
    }

    fn load_sound(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError> {
        let mut state = self.state.borrow_mut();
        *state.load_counts.entry(name.to_string()).or_default() += 1;
        if state.fail_load {
            return Err(BackendError::Decode(format!("{name}: scripted failure")));
        }
        let id = state.next_sound;
        state.next_sound += 1;
        state.sounds.insert(
            id,
            MockSound {
                name: name.to_string(),
                bytes: bytes.to_vec(),
                looping: false,
            },
        );
        Ok(SoundId(id))
    }

    fn load_stream(&mut self, bytes: Arc<[u8]>, name: &str) -> Result<SoundId, BackendError> {
        let id = self.load_sound(bytes, name)?;
        if let Some(sound) = self.state.borrow_mut().sounds.get_mut(&id.0) {
            sound.looping = true;
        }
        Ok(id)
    }

    fn release_sound(&mut self, id: SoundId) {
        let mut state = self.state.borrow_mut();
        state.sounds.remove(&id.0);
        state.released.push(id);
    }

    fn play_sound(&mut self, id: SoundId) -> Result<ChannelId, BackendError> {
        let mut state = self.state.borrow_mut();
        if state.fail_play {
            return Err(BackendError::Play("scripted rejection".to_string()));
        }
        if !state.sounds.contains_key(&id.0) {
            return Err(BackendError::UnknownSound);
        }
        let channel = state.next_channel;
        state.next_channel += 1;
        state.channels.insert(
            channel,
            MockChannel {
                sound: id,
                playing: true,
                volume: None,
            },
        );
        Ok(ChannelId(channel))
    }

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> bool {
        match self.state.borrow_mut().channels.get_mut(&channel.0) {
            Some(ch) => {
                ch.volume = Some(volume);
                true
            }
            None => false,
        }
    }

    fn stop_channel(&mut self, channel: ChannelId) -> bool {
        match self.state.borrow_mut().channels.get_mut(&channel.0) {
            Some(ch) => {
                ch.playing = false;
                true
            }
            None => false,
        }
    }

    fn channel_playing(&self, channel: ChannelId) -> bool {
        self.state
            .borrow()
            .channels
            .get(&channel.0)
            .is_some_and(|ch| ch.playing)
    }

    fn active_channels(&self) -> Vec<ChannelId> {
        self.state
            .borrow()
            .channels
            .iter()
            .filter(|(_, ch)| ch.playing)
            .map(|(&id, _)| ChannelId(id))
            .collect()
    }

    fn update(&mut self) {
        let mut state = self.state.borrow_mut();
        state.update_count += 1;
        state.channels.retain(|_, ch| ch.playing);
    }

    fn version() -> &'static str {
        "mock 0.0"
    }
}
