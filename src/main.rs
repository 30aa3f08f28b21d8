//! Example command-line player demonstrating the audio facade

use std::time::Duration;

use game_audio::prelude::*;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: game-audio [--bgm FILE] EFFECT...");
        std::process::exit(1);
    }

    let mut bgm = None;
    let mut effects = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--bgm" {
            bgm = iter.next();
        } else {
            effects.push(arg);
        }
    }

    let mut audio: AudioManager = AudioManager::new();
    audio.init();
    log::info!("Audio backend: {}", audio.version());

    if let Some(file) = &bgm {
        let outcome = audio.play_bgm(file);
        log::info!("BGM {file}: {outcome:?}");
    }
    for file in &effects {
        let outcome = audio.play(file);
        log::info!("Effect {file}: {outcome:?}");
    }

    // Let one-shots run to completion; give looping music a short audition.
    if bgm.is_some() {
        std::thread::sleep(Duration::from_secs(10));
    } else {
        while effects.iter().any(|file| audio.is_playing(file)) {
            std::thread::sleep(Duration::from_millis(100));
        }
    }

    audio.stop();
    audio.quit();
}
