use crate::domain::SoundCue;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Plays phase-completion cues. Implementations must not block the caller.
pub trait SoundPlayer {
    fn play(&self, cue: SoundCue);
}

/// Player used with `--mute`
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, cue: SoundCue) {
        debug!(?cue, "sound muted");
    }
}

/// Plays cue files from a sounds directory through the platform's command-line
/// audio player, on a detached thread.
#[derive(Debug, Clone)]
pub struct SystemSoundPlayer {
    sounds_dir: PathBuf,
}

impl SystemSoundPlayer {
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
        }
    }

    pub fn cue_path(&self, cue: SoundCue) -> PathBuf {
        self.sounds_dir.join(cue.file_name())
    }
}

impl SoundPlayer for SystemSoundPlayer {
    fn play(&self, cue: SoundCue) {
        let path = self.cue_path(cue);
        if !path.exists() {
            debug!(path = %path.display(), "sound file not found, skipping cue");
            return;
        }

        // Fire and forget: the handle is dropped, nobody joins this thread.
        let spawned = thread::Builder::new()
            .name("sound-cue".to_string())
            .spawn(move || {
                if let Err(e) = play_file(&path) {
                    warn!(path = %path.display(), error = %e, "sound playback failed");
                }
            });
        if let Err(e) = spawned {
            warn!(error = %e, "could not start sound thread");
        }
    }
}

/// Candidate players tried in order until one runs
fn player_commands() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        vec![("afplay", vec![])]
    } else {
        vec![
            ("paplay", vec![]),
            ("mpg123", vec!["-q"]),
            ("ffplay", vec!["-nodisp", "-autoexit", "-loglevel", "quiet"]),
        ]
    }
}

/// Blocking playback; runs on the sound thread only
fn play_file(path: &Path) -> std::io::Result<()> {
    let mut last_error = None;

    for (program, args) in player_commands() {
        let status = Command::new(program)
            .args(&args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => {
                debug!(program, path = %path.display(), "sound played");
                return Ok(());
            }
            Ok(status) => {
                last_error = Some(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("{} exited with {}", program, status),
                ));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Unsupported, "no audio player available")
    }))
}
