//! Output device setup and the audio callback

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use grainer::{
    control::{message::CONTROL_QUEUE_SIZE, ControlHandle},
    io::AudioOutput,
    store::MemoryStore,
    Player, MAX_BLOCK_SIZE,
};

/// How often the main thread wakes up to send control input.
const CONTROL_TICK: Duration = Duration::from_millis(50);

/// Longest accepted run time.
const MAX_SECONDS: f32 = 24.0 * 60.0 * 60.0;

/// The default output device and its preferred config.
pub struct Output {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl Output {
    pub fn open() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    /// Play `player` for `seconds`, calling `drive` from this thread every
    /// control tick with the time elapsed since playback started.
    ///
    /// The player moves into the audio callback and is only reached through
    /// the control queue from here on.
    pub fn play<P, F>(
        self,
        mut player: P,
        store: Arc<MemoryStore>,
        seconds: f32,
        mut drive: F,
    ) -> EyreResult<()>
    where
        P: Player + 'static,
        F: FnMut(&mut ControlHandle, Duration),
    {
        let device_channels = self.config.channels() as usize;
        let (mut handle, mut rx) = ControlHandle::new(CONTROL_QUEUE_SIZE);

        info!(
            sample_rate = self.sample_rate(),
            channels = device_channels,
            seconds,
            "Starting playback"
        );

        let out_channels = player.output_channels();
        let mut out = AudioOutput::new(out_channels, MAX_BLOCK_SIZE);

        let stream = self.device.build_output_stream(
            &self.config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / device_channels;
                let mut written = 0;

                while written < total_frames {
                    let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
                    // Never grows past MAX_BLOCK_SIZE, so this does not allocate.
                    out.resize(out_channels, frames);
                    player.process(&*store, &mut rx, &mut out);

                    let range = written * device_channels..(written + frames) * device_channels;
                    out.interleave_into(&mut data[range], device_channels);
                    written += frames;
                }
            },
            |err| error!(%err, "Audio stream error"),
            None,
        )?;

        stream.play()?;

        let started = Instant::now();
        let total = Duration::from_secs_f32(seconds.max(0.0).min(MAX_SECONDS));
        while started.elapsed() < total {
            drive(&mut handle, started.elapsed());
            thread::sleep(CONTROL_TICK);
        }

        info!("Playback finished");
        Ok(())
    }
}
