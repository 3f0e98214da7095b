//! Best-effort audio.
//!
//! Backends may fail; [`SoundBoard`] logs and drops every failure so audio can
//! never interrupt the simulation.

use std::io::{self, Write};

use thiserror::Error;

use crate::assets::SoundHandle;

/// Failure reported by an audio backend.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device error: {0}")]
    Device(#[from] io::Error),
    #[error("audio output is unavailable")]
    Unavailable,
}

/// Playback backend.
pub trait Audio {
    /// Starts a background track that repeats until [`Audio::stop`].
    fn play_loop(&mut self, track: &SoundHandle) -> Result<(), AudioError>;
    /// Stops the background track.
    fn stop(&mut self) -> Result<(), AudioError>;
    /// Plays a one-shot cue without blocking.
    fn play_once(&mut self, cue: &SoundHandle) -> Result<(), AudioError>;
}

/// Rings the terminal bell for cues. Background tracks are silent.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Audio for TerminalBell<W> {
    fn play_loop(&mut self, track: &SoundHandle) -> Result<(), AudioError> {
        log::debug!("background track `{}` has no terminal rendition", track.name);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_once(&mut self, cue: &SoundHandle) -> Result<(), AudioError> {
        for _ in 0..cue.bells {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Backend for `--mute`.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play_loop(&mut self, _track: &SoundHandle) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_once(&mut self, _cue: &SoundHandle) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Named cues the game plays.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cue {
    FoodConsumed,
    Crash,
}

/// Session-scoped audio state over a fire-and-forget backend.
pub struct SoundBoard {
    backend: Box<dyn Audio>,
    music: Option<SoundHandle>,
    food_cue: Option<SoundHandle>,
    crash_cue: Option<SoundHandle>,
    audio_active: bool,
}

impl SoundBoard {
    pub fn new(
        backend: Box<dyn Audio>,
        music: Option<SoundHandle>,
        food_cue: Option<SoundHandle>,
        crash_cue: Option<SoundHandle>,
    ) -> Self {
        Self {
            backend,
            music,
            food_cue,
            crash_cue,
            audio_active: false,
        }
    }

    /// Starts background music unless it is already playing.
    pub fn start_music(&mut self) {
        if self.audio_active {
            return;
        }

        let Some(track) = self.music.as_ref() else {
            return;
        };

        match self.backend.play_loop(track) {
            Ok(()) => self.audio_active = true,
            Err(error) => log::warn!("could not start `{}`: {error}", track.name),
        }
    }

    pub fn stop_music(&mut self) {
        if let Err(error) = self.backend.stop() {
            log::warn!("could not stop background music: {error}");
        }
        self.audio_active = false;
    }

    pub fn play(&mut self, cue: Cue) {
        let handle = match cue {
            Cue::FoodConsumed => self.food_cue.as_ref(),
            Cue::Crash => self.crash_cue.as_ref(),
        };

        let Some(handle) = handle else {
            return;
        };

        if let Err(error) = self.backend.play_once(handle) {
            log::warn!("could not play `{}`: {error}", handle.name);
        }
    }

    /// Whether background music is currently running.
    #[must_use]
    pub fn audio_active(&self) -> bool {
        self.audio_active
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Audio, AudioError, Cue, SoundBoard, TerminalBell};
    use crate::assets::SoundHandle;

    #[derive(Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Recorder {
        fn record(&mut self, call: String) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(call);
            if self.fail {
                return Err(AudioError::Unavailable);
            }
            Ok(())
        }
    }

    impl Audio for Recorder {
        fn play_loop(&mut self, track: &SoundHandle) -> Result<(), AudioError> {
            self.record(format!("loop:{}", track.name))
        }

        fn stop(&mut self) -> Result<(), AudioError> {
            self.record("stop".to_owned())
        }

        fn play_once(&mut self, cue: &SoundHandle) -> Result<(), AudioError> {
            self.record(format!("once:{}", cue.name))
        }
    }

    fn handle(name: &str, bells: u8) -> Option<SoundHandle> {
        Some(SoundHandle {
            name: name.to_owned(),
            bells,
        })
    }

    fn board(fail: bool) -> (SoundBoard, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            calls: Rc::clone(&calls),
            fail,
        };
        let board = SoundBoard::new(
            Box::new(backend),
            handle("music", 0),
            handle("ding", 1),
            handle("crash", 2),
        );
        (board, calls)
    }

    #[test]
    fn music_is_not_restarted_while_active() {
        let (mut board, calls) = board(false);

        board.start_music();
        board.start_music();
        assert!(board.audio_active());

        board.stop_music();
        assert!(!board.audio_active());
        board.start_music();

        assert_eq!(*calls.borrow(), vec!["loop:music", "stop", "loop:music"]);
    }

    #[test]
    fn backend_failures_are_swallowed() {
        let (mut board, calls) = board(true);

        board.start_music();
        board.play(Cue::FoodConsumed);
        board.play(Cue::Crash);
        board.stop_music();

        assert!(!board.audio_active());
        assert_eq!(calls.borrow().len(), 4);
    }

    #[test]
    fn missing_cue_is_a_noop() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            calls: Rc::clone(&calls),
            fail: false,
        };
        let mut board = SoundBoard::new(Box::new(backend), None, None, handle("crash", 2));

        board.start_music();
        board.play(Cue::FoodConsumed);
        board.play(Cue::Crash);

        assert!(!board.audio_active());
        assert_eq!(*calls.borrow(), vec!["once:crash"]);
    }

    #[test]
    fn terminal_bell_rings_once_per_bell() {
        let mut bell = TerminalBell::new(Vec::new());
        let cue = handle("crash", 2).expect("handle is present");

        bell.play_once(&cue).expect("writing to a vec cannot fail");

        assert_eq!(bell.out, b"\x07\x07");
    }
}
