use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const ARROW_VOLUME: f32 = 0.05;

/// Audio manager for playing sound effects
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    /// Pre-loaded and buffered arrow sound
    arrow_sound: Buffered<Decoder<BufReader<File>>>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the arrow sound
    pub fn new(arrow_sound: &Path) -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("no audio output device")?;

        let file = File::open(arrow_sound)
            .wrap_err_with(|| format!("cannot open {}", arrow_sound.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .wrap_err_with(|| format!("cannot decode {}", arrow_sound.display()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            arrow_sound: source.buffered(),
        })
    }

    /// Audio if it can be had, `None` when muted or the device/file is unusable
    pub fn try_new(arrow_sound: &Path, mute: bool) -> Option<Self> {
        if mute {
            info!("Sound muted");
            return None;
        }
        match Self::new(arrow_sound) {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!("Continuing without audio: {err:#}");
                None
            }
        }
    }

    pub fn play_arrow_sound(&self) {
        self.play_arrow_sound_volume(ARROW_VOLUME);
    }

    fn play_arrow_sound_volume(&self, volume: f32) {
        // Playback errors are not worth stopping the game for
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(volume);
            // Clone the buffered source (fast - just clones references)
            sink.append(self.arrow_sound.clone());
            sink.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_audio_is_none() {
        assert!(AudioManager::try_new(Path::new("assets/sounds/arrow.wav"), true).is_none());
    }

    #[test]
    fn test_missing_sound_is_an_error() {
        assert!(AudioManager::new(Path::new("does/not/exist.wav")).is_err());
        assert!(AudioManager::try_new(Path::new("does/not/exist.wav"), false).is_none());
    }
}
