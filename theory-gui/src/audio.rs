//! # Audio Playback Module
//!
//! This module renders playback plans from `theory_core::playback` through the
//! default output device using CPAL. A dedicated thread owns the output stream;
//! the GUI talks to it over crossbeam channels.
//!
//! ## Features
//! - Automatic output device and f32 format selection
//! - Plain sine voices with a short linear attack and release
//! - Play/stop commands delivered to the audio callback without locking
//! - Graceful shutdown of the stream thread

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SupportedStreamConfigRange;
use crossbeam_channel::{Receiver, Sender};
use std::f32::consts::TAU;
use std::thread::{self, JoinHandle};
use theory_core::playback::PlaybackPlan;
use tracing::{debug, error, info, warn};

/// Preferred output sample rate in Hz.
const TARGET_SAMPLE_RATE: u32 = 44100;
/// Attack and release ramps, in milliseconds.
const ATTACK_MS: f32 = 5.0;
const RELEASE_MS: f32 = 40.0;
/// Voices summed at full volume before the mix would clip.
const HEADROOM_VOICES: f32 = 4.0;

/// Commands accepted by the playback thread.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Replace whatever is playing with this plan.
    Play(PlaybackPlan),
    Stop,
}

/// One scheduled sine tone, in samples relative to the start of the plan.
#[derive(Debug, Clone)]
struct Voice {
    frequency: f32,
    start: u64,
    end: u64,
    phase: f32,
}

/// Turns playback plans into samples. Lives inside the audio callback.
#[derive(Debug)]
pub struct Sequencer {
    sample_rate: f32,
    volume: f32,
    clock: u64,
    voices: Vec<Voice>,
}

impl Sequencer {
    pub fn new(sample_rate: u32, volume: f32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            volume: volume.clamp(0.0, 1.0),
            clock: 0,
            voices: Vec::new(),
        }
    }

    fn ms_to_samples(&self, ms: u32) -> u64 {
        (ms as f32 * self.sample_rate / 1000.0).round() as u64
    }

    pub fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Play(plan) => self.play(&plan),
            AudioCommand::Stop => self.voices.clear(),
        }
    }

    /// Starts `plan` from its beginning, dropping any previous voices.
    pub fn play(&mut self, plan: &PlaybackPlan) {
        self.clock = 0;
        self.voices = plan
            .events
            .iter()
            .map(|event| Voice {
                frequency: event.frequency(),
                start: self.ms_to_samples(event.start_ms),
                end: self.ms_to_samples(event.end_ms()),
                phase: 0.0,
            })
            .collect();
    }

    pub fn is_idle(&self) -> bool {
        self.voices.is_empty()
    }

    fn envelope(&self, voice: &Voice) -> f32 {
        let attack = (ATTACK_MS * self.sample_rate / 1000.0).max(1.0);
        let release = (RELEASE_MS * self.sample_rate / 1000.0).max(1.0);
        let since_start = (self.clock - voice.start) as f32;
        let until_end = (voice.end - self.clock) as f32;
        (since_start / attack).min(until_end / release).min(1.0)
    }

    /// Fills an interleaved buffer, writing the same mono signal to every
    /// channel.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let gain = self.volume / HEADROOM_VOICES;

        for frame in out.chunks_mut(channels) {
            let mut sample = 0.0;
            for i in 0..self.voices.len() {
                let voice = &self.voices[i];
                if self.clock < voice.start || self.clock >= voice.end {
                    continue;
                }
                let level = self.envelope(voice);
                let voice = &mut self.voices[i];
                sample += voice.phase.sin() * level;
                voice.phase = (voice.phase + TAU * voice.frequency / self.sample_rate) % TAU;
            }
            frame.fill((sample * gain).clamp(-1.0, 1.0));
            self.clock += 1;
        }

        let clock = self.clock;
        self.voices.retain(|voice| voice.end > clock);
    }
}

/// Playback thread handle.
///
/// Dropping the worker without calling [`AudioWorker::shutdown`] leaves the
/// thread running until the process exits.
#[derive(Debug)]
pub struct AudioWorker {
    command_tx: Sender<AudioCommand>,
    shutdown_tx: Sender<()>,
    thread_handle: Option<JoinHandle<()>>,
}

impl AudioWorker {
    /// Spawns the playback thread. Failing to open an output device is
    /// logged by the thread; commands sent afterwards are simply dropped.
    pub fn start(volume: f32) -> Self {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);

        let thread_handle = thread::spawn(move || {
            info!("audio thread starting");
            let stream = match start_output_stream(command_rx, volume) {
                Ok(stream) => stream,
                Err(e) => {
                    error!("could not start audio output: {e:#}");
                    return;
                }
            };

            let _ = shutdown_rx.recv();
            debug!("audio thread received shutdown signal");
            if let Err(e) = stream.pause() {
                warn!("error pausing output stream: {e}");
            }
            drop(stream);
            info!("audio thread finished");
        });

        Self {
            command_tx,
            shutdown_tx,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn play(&self, plan: PlaybackPlan) {
        if plan.is_empty() {
            return;
        }
        debug!(events = plan.events.len(), total_ms = plan.total_ms(), "queueing plan");
        self.send(AudioCommand::Play(plan));
    }

    pub fn stop(&self) {
        self.send(AudioCommand::Stop);
    }

    /// Hands a command to the playback thread. Returns false, after logging,
    /// when the thread has gone away.
    fn send(&self, command: AudioCommand) -> bool {
        let what = match &command {
            AudioCommand::Play(_) => "plan",
            AudioCommand::Stop => "stop",
        };
        if self.command_tx.send(command).is_err() {
            warn!("audio thread is gone, {what} dropped");
            return false;
        }
        true
    }

    /// Signals the thread to close the stream and waits for it.
    pub fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                error!("audio thread panicked");
            }
        }
    }
}

/// Opens the default output device and starts a stream that pulls commands
/// from `commands` at the top of every callback.
fn start_output_stream(commands: Receiver<AudioCommand>, volume: f32) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    info!("using audio output device: {}", device.name()?);

    let configs = device.supported_output_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, TARGET_SAMPLE_RATE)
        .ok_or_else(|| anyhow!("No suitable f32 output format found"))?;

    let rate = TARGET_SAMPLE_RATE.clamp(
        supported_config.min_sample_rate().0,
        supported_config.max_sample_rate().0,
    );
    let config = supported_config.with_sample_rate(cpal::SampleRate(rate));
    let sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    let config: cpal::StreamConfig = config.into();

    info!(sample_rate, channels, "selected output format");

    let mut sequencer = Sequencer::new(sample_rate, volume);
    let err_fn = |err| error!("an error occurred on the output stream: {err}");

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            while let Ok(command) = commands.try_recv() {
                sequencer.apply(command);
            }
            sequencer.render(data, channels);
        },
        err_fn,
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Picks the f32 configuration whose rate range lies closest to
/// `target_rate`, preferring stereo or mono.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.channels() <= 2 && c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let min_diff = (c.min_sample_rate().0 as i64 - target_rate as i64).abs();
            let max_diff = (c.max_sample_rate().0 as i64 - target_rate as i64).abs();
            let contains = c.min_sample_rate().0 <= target_rate && target_rate <= c.max_sample_rate().0;
            if contains { 0 } else { min_diff.min(max_diff) }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use theory_core::playback::NoteEvent;

    fn plan(events: &[(u32, u32)]) -> PlaybackPlan {
        PlaybackPlan {
            events: events
                .iter()
                .map(|&(start_ms, duration_ms)| NoteEvent {
                    midi: 69,
                    start_ms,
                    duration_ms,
                })
                .collect(),
        }
    }

    #[test]
    fn renders_sound_then_goes_idle() {
        let mut sequencer = Sequencer::new(1000, 1.0);
        sequencer.play(&plan(&[(0, 100)]));

        let mut buffer = vec![0.0; 100];
        sequencer.render(&mut buffer, 1);
        assert!(buffer.iter().any(|s| s.abs() > 0.0));
        assert!(buffer.iter().all(|s| s.abs() <= 1.0 / HEADROOM_VOICES + 1e-6));
        assert!(sequencer.is_idle());
    }

    #[test]
    fn later_events_wait_for_their_start() {
        let mut sequencer = Sequencer::new(1000, 1.0);
        sequencer.play(&plan(&[(50, 50)]));

        let mut buffer = vec![0.0; 50];
        sequencer.render(&mut buffer, 1);
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!sequencer.is_idle());
    }

    #[test]
    fn channels_carry_the_same_signal() {
        let mut sequencer = Sequencer::new(1000, 1.0);
        sequencer.play(&plan(&[(0, 100)]));

        let mut buffer = vec![0.0; 40];
        sequencer.render(&mut buffer, 2);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn stop_silences_immediately() {
        let mut sequencer = Sequencer::new(1000, 1.0);
        sequencer.apply(AudioCommand::Play(plan(&[(0, 500)])));
        sequencer.apply(AudioCommand::Stop);
        assert!(sequencer.is_idle());

        let mut buffer = vec![1.0; 10];
        sequencer.render(&mut buffer, 1);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn commands_to_a_dead_thread_are_reported() {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (shutdown_tx, _shutdown_rx) = crossbeam_channel::bounded(1);
        let worker = AudioWorker {
            command_tx,
            shutdown_tx,
            thread_handle: None,
        };

        assert!(worker.send(AudioCommand::Stop));
        assert!(matches!(command_rx.try_recv(), Ok(AudioCommand::Stop)));

        drop(command_rx);
        assert!(!worker.send(AudioCommand::Stop));
        assert!(!worker.send(AudioCommand::Play(plan(&[(0, 100)]))));
        worker.stop();
    }
}
