//! Audio feedback, synthesized on a dedicated output thread.
//!
//! The UI thread only ever sends commands over a channel; the audio
//! thread owns the cpal stream and initializes it lazily on first use.
//! A machine with no output device degrades silently (logged once).

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait as _, HostTrait as _, StreamTrait as _};
use tracing::warn;

use crate::input::dispatcher::Feedback;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Hover,
    Click,
    Success,
    Shutdown,
    Error,
}

impl Cue {
    /// Notes played in order: (frequency Hz, duration ms).
    fn notes(self) -> &'static [(f32, u64)] {
        match self {
            Cue::Hover => &[(660.0, 40)],
            Cue::Click => &[(880.0, 55)],
            Cue::Success => &[(523.25, 90), (659.25, 90), (783.99, 90), (1046.5, 180)],
            Cue::Shutdown => &[(783.99, 120), (587.33, 120), (392.0, 260)],
            Cue::Error => &[(220.0, 130), (164.81, 220)],
        }
    }
}

enum Cmd {
    Play(Cue),
    Volume(f32),
}

#[derive(Clone)]
pub struct Audio {
    tx: mpsc::Sender<Cmd>,
    loaded: Arc<AtomicBool>,
}

impl Audio {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Cmd>();
        let loaded = Arc::new(AtomicBool::new(false));
        thread::spawn({
            let loaded = loaded.clone();
            move || audio_thread(rx, loaded)
        });
        Self { tx, loaded }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Relaxed)
    }
}

impl Feedback for Audio {
    fn play(&mut self, cue: Cue) {
        let _ = self.tx.send(Cmd::Play(cue));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(Cmd::Volume(volume.clamp(0.0, 1.0)));
    }
}

struct SharedState {
    freq_bits: AtomicU32,
    volume_bits: AtomicU32,
}

fn audio_thread(rx: mpsc::Receiver<Cmd>, loaded: Arc<AtomicBool>) {
    let shared = Arc::new(SharedState {
        freq_bits: AtomicU32::new(0.0f32.to_bits()),
        volume_bits: AtomicU32::new(0.8f32.to_bits()),
    });

    let mut stream: Option<cpal::Stream> = None;
    let mut init_failed = false;

    while let Ok(cmd) = rx.recv() {
        if stream.is_none() && !init_failed {
            match try_init_stream(shared.clone()) {
                Ok(s) => match s.play() {
                    Ok(()) => {
                        loaded.store(true, Ordering::Relaxed);
                        stream = Some(s);
                    }
                    Err(err) => {
                        init_failed = true;
                        warn!(%err, "audio: failed to start stream");
                    }
                },
                Err(err) => {
                    init_failed = true;
                    warn!(%err, "audio: unavailable");
                }
            }
        }

        match cmd {
            Cmd::Volume(volume) => {
                shared.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
            }
            Cmd::Play(cue) => {
                // The command thread owns note timing; a silent machine
                // still sleeps through the cue, which keeps queued cue
                // pacing identical with and without a device.
                for &(freq, ms) in cue.notes() {
                    shared.freq_bits.store(freq.to_bits(), Ordering::Relaxed);
                    thread::sleep(Duration::from_millis(ms));
                }
                shared.freq_bits.store(0.0f32.to_bits(), Ordering::Relaxed);
            }
        }
    }
}

fn try_init_stream(shared: Arc<SharedState>) -> Result<cpal::Stream, String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no default output device".to_string())?;

    let supported = device
        .default_output_config()
        .map_err(|err| format!("default_output_config: {err}"))?;
    let config = supported.config();

    let channels = config.channels as usize;
    let sample_rate = config.sample_rate.0 as f32;

    let err_fn = |err| {
        warn!(%err, "audio: stream error");
    };

    let stream = match supported.sample_format() {
        cpal::SampleFormat::F32 => {
            let shared = shared.clone();
            let mut phase = 0.0f32;
            device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _| {
                        fill_tone(data, channels, sample_rate, &shared, &mut phase)
                    },
                    err_fn,
                    None,
                )
                .map_err(|err| format!("build_output_stream(f32): {err}"))?
        }
        cpal::SampleFormat::I16 => {
            let shared = shared.clone();
            let mut phase = 0.0f32;
            device
                .build_output_stream(
                    &config,
                    move |data: &mut [i16], _| {
                        fill_tone(data, channels, sample_rate, &shared, &mut phase)
                    },
                    err_fn,
                    None,
                )
                .map_err(|err| format!("build_output_stream(i16): {err}"))?
        }
        other => return Err(format!("unsupported sample format: {other:?}")),
    };

    Ok(stream)
}

fn fill_tone<T: cpal::Sample + cpal::FromSample<f32>>(
    output: &mut [T],
    channels: usize,
    sample_rate: f32,
    shared: &SharedState,
    phase: &mut f32,
) {
    let freq = f32::from_bits(shared.freq_bits.load(Ordering::Relaxed));
    let volume = f32::from_bits(shared.volume_bits.load(Ordering::Relaxed));
    let amp = if freq <= 0.0 { 0.0 } else { 0.25 * volume };

    let step = if amp == 0.0 {
        0.0
    } else {
        TAU * freq / sample_rate
    };

    for frame in output.chunks_mut(channels) {
        let value_f32 = if amp == 0.0 { 0.0 } else { (*phase).sin() * amp };
        if amp != 0.0 {
            *phase += step;
            if *phase >= TAU {
                *phase -= TAU;
            }
        }

        let value: T = <T as cpal::FromSample<f32>>::from_sample_(value_f32);
        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
