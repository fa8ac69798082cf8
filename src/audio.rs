//! Background music
//!
//! A looping 16-bit PCM track streamed to a playback device in small chunks,
//! one chunk per frame. Decoding and output sit behind traits so the host can
//! run headless.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Bytes pulled from the track per pump
pub const CHUNK_BYTES: usize = 3000;

/// Audio failures
#[derive(Debug)]
pub enum AudioError {
    /// The music track could not be opened (fatal at startup)
    TrackUnavailable { path: PathBuf, source: io::Error },
    /// No playback device (fatal at startup)
    DeviceUnavailable(String),
    /// Device could not take this chunk in time; the chunk is dropped
    Underrun,
    /// Chunk does not match the device sample format; the chunk is dropped
    FormatMismatch { len: usize },
    /// Any other read or write failure
    Io(io::Error),
}

impl AudioError {
    /// Whether playback can continue with the next chunk
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AudioError::Underrun | AudioError::FormatMismatch { .. })
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::TrackUnavailable { path, source } => {
                write!(f, "cannot open music track {}: {}", path.display(), source)
            }
            AudioError::DeviceUnavailable(reason) => {
                write!(f, "no audio device: {}", reason)
            }
            AudioError::Underrun => write!(f, "audio underrun"),
            AudioError::FormatMismatch { len } => {
                write!(f, "chunk of {} bytes is not whole 16-bit samples", len)
            }
            AudioError::Io(e) => write!(f, "audio I/O error: {}", e),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::TrackUnavailable { source, .. } => Some(source),
            AudioError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AudioError {
    fn from(e: io::Error) -> Self {
        AudioError::Io(e)
    }
}

/// Source of PCM bytes
pub trait TrackDecoder {
    /// Fill `buf` as far as possible. Returns 0 at end of track.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, AudioError>;
    /// Go back to the start of the track
    fn rewind(&mut self) -> Result<(), AudioError>;
}

/// Sink for PCM bytes
pub trait PlaybackDevice {
    fn play(&mut self, samples: &[u8]) -> Result<(), AudioError>;
}

impl<T: TrackDecoder + ?Sized> TrackDecoder for Box<T> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, AudioError> {
        (**self).read_chunk(buf)
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        (**self).rewind()
    }
}

impl<D: PlaybackDevice + ?Sized> PlaybackDevice for Box<D> {
    fn play(&mut self, samples: &[u8]) -> Result<(), AudioError> {
        (**self).play(samples)
    }
}

/// Raw little-endian 16-bit PCM file
pub struct PcmFileTrack {
    reader: BufReader<File>,
}

impl PcmFileTrack {
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::TrackUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Opened music track {}", path.display());
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl TrackDecoder for PcmFileTrack {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, AudioError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

/// Endless silence, used when no track is configured
#[derive(Debug, Default)]
pub struct SilentTrack;

impl TrackDecoder for SilentTrack {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, AudioError> {
        buf.fill(0);
        Ok(buf.len())
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Device that discards samples and counts them
#[derive(Debug)]
pub struct NullDevice {
    sample_rate: u32,
    bytes_played: u64,
}

impl NullDevice {
    pub fn open(sample_rate: u32) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::DeviceUnavailable(
                "cannot open output at 0 Hz".to_string(),
            ));
        }
        log::debug!("Null audio output at {} Hz", sample_rate);
        Ok(Self {
            sample_rate,
            bytes_played: 0,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bytes_played(&self) -> u64 {
        self.bytes_played
    }
}

impl PlaybackDevice for NullDevice {
    fn play(&mut self, samples: &[u8]) -> Result<(), AudioError> {
        if samples.len() % 2 != 0 {
            return Err(AudioError::FormatMismatch { len: samples.len() });
        }
        self.bytes_played += samples.len() as u64;
        Ok(())
    }
}

/// Scale little-endian i16 samples in place
pub fn scale_samples(bytes: &mut [u8], gain: f32) {
    for sample in bytes.chunks_exact_mut(2) {
        let s = i16::from_le_bytes([sample[0], sample[1]]);
        let scaled = (s as f32 * gain)
            .round()
            .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        sample.copy_from_slice(&scaled.to_le_bytes());
    }
}

/// Looping music player
pub struct BackgroundMusic<T, D> {
    track: T,
    device: D,
    buffer: Vec<u8>,
    master_volume: f32,
    music_volume: f32,
    muted: bool,
    enabled: bool,
}

impl<T: TrackDecoder, D: PlaybackDevice> BackgroundMusic<T, D> {
    pub fn new(track: T, device: D) -> Self {
        Self {
            track,
            device,
            buffer: vec![0; CHUNK_BYTES],
            master_volume: 0.8,
            music_volume: 0.7,
            muted: false,
            enabled: true,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Stream one chunk. Recoverable faults drop the chunk; anything else
    /// turns music off for the rest of the session.
    pub fn pump(&mut self) {
        if !self.enabled {
            return;
        }
        match self.play_chunk() {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => log::warn!("Skipping audio chunk: {}", e),
            Err(e) => {
                log::error!("Music disabled: {}", e);
                self.enabled = false;
            }
        }
    }

    fn play_chunk(&mut self) -> Result<(), AudioError> {
        let read = self.track.read_chunk(&mut self.buffer)?;
        if read == 0 {
            // Loop: start over next frame
            self.track.rewind()?;
            return Ok(());
        }
        let gain = self.effective_volume();
        let chunk = &mut self.buffer[..read];
        scale_samples(chunk, gain);
        self.device.play(chunk)
    }

    /// Stop playback and hand back the collaborators
    pub fn shutdown(self) -> (T, D) {
        log::info!("Background music stopped");
        (self.track, self.device)
    }
}
