use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

use crate::Error;

const TONE_HZ: f32 = 440.0;
const BEEP_MS: u32 = 150;

/// Audio sink for the beep signal. The output stream stays open and plays
/// silence until [`Sound::beep`] arms a short tone.
pub struct Sound {
    _stream: cpal::Stream,
    remaining: Arc<AtomicU32>,
    burst: u32,
}

impl Sound {
    pub fn new() -> Result<Self, Error> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no output device available".into()))?;
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(e.to_string()))?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();
        let remaining = Arc::new(AtomicU32::new(0));

        let stream = match sample_format {
            cpal::SampleFormat::I8 => Self::run::<i8>(&device, &config, remaining.clone()),
            cpal::SampleFormat::I16 => Self::run::<i16>(&device, &config, remaining.clone()),
            cpal::SampleFormat::I32 => Self::run::<i32>(&device, &config, remaining.clone()),
            cpal::SampleFormat::I64 => Self::run::<i64>(&device, &config, remaining.clone()),
            cpal::SampleFormat::U8 => Self::run::<u8>(&device, &config, remaining.clone()),
            cpal::SampleFormat::U16 => Self::run::<u16>(&device, &config, remaining.clone()),
            cpal::SampleFormat::U32 => Self::run::<u32>(&device, &config, remaining.clone()),
            cpal::SampleFormat::U64 => Self::run::<u64>(&device, &config, remaining.clone()),
            cpal::SampleFormat::F32 => Self::run::<f32>(&device, &config, remaining.clone()),
            cpal::SampleFormat::F64 => Self::run::<f64>(&device, &config, remaining.clone()),
            sample_format => {
                return Err(Error::Audio(format!(
                    "unsupported sample format '{sample_format}'"
                )))
            }
        }?;

        Ok(Self {
            _stream: stream,
            remaining,
            burst: config.sample_rate.0 * BEEP_MS / 1000,
        })
    }

    /// Starts (or restarts) the tone without blocking.
    pub fn beep(&self) {
        self.remaining.store(self.burst, Ordering::Relaxed);
    }

    fn run<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        remaining: Arc<AtomicU32>,
    ) -> Result<cpal::Stream, Error>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;

        let mut sample_clock = 0f32;
        let mut next_value = move || {
            if remaining
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
                .is_err()
            {
                sample_clock = 0.0;
                return 0.0;
            }
            sample_clock = (sample_clock + 1.0) % sample_rate;
            (sample_clock * TONE_HZ * 2.0 * std::f32::consts::PI / sample_rate).sin() * 0.25
        };

        let err_fn =
            |err: cpal::StreamError| log::error!("an error occurred on the audio stream: {}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    write_data(data, channels, &mut next_value)
                },
                err_fn,
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;
        Ok(stream)
    }
}

fn write_data<T>(output: &mut [T], channels: usize, next_sample: &mut dyn FnMut() -> f32)
where
    T: Sample + FromSample<f32>,
{
    for frame in output.chunks_mut(channels) {
        let value: T = T::from_sample(next_sample());
        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
