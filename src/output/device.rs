use std::time::Duration;

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    FromSample, Sample, SampleFormat, SizedSample,
};

use crate::{
    error::AudioUnavailable,
    graph::node::GraphNode,
    output::{AudioBackend, AudioContext, Playhead},
};

/// Opens the host's output device for every playback.
///
/// A cpal stream can't cross threads on every platform, so a context must be
/// opened, played and closed on the same thread.
#[derive(Debug, Clone, Default)]
pub struct CpalBackend {
    device_name: Option<String>,
}

impl CpalBackend {
    /// Play through the host's default output device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Play through the output device with this exact name.
    pub fn with_device(name: impl Into<String>) -> Self {
        Self {
            device_name: Some(name.into()),
        }
    }

    fn find_device(&self) -> Result<cpal::Device, AudioUnavailable> {
        let host = cpal::default_host();

        match &self.device_name {
            None => host.default_output_device().ok_or(AudioUnavailable::NoDevice),
            Some(wanted) => host
                .output_devices()
                .map_err(|e| AudioUnavailable::Config(e.to_string()))?
                .find(|device| device.name().map(|name| &name == wanted).unwrap_or(false))
                .ok_or(AudioUnavailable::NoDevice),
        }
    }
}

impl AudioBackend for CpalBackend {
    type Context = CpalContext;

    fn open(&self) -> Result<CpalContext, AudioUnavailable> {
        let device = self.find_device()?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioUnavailable::Config(e.to_string()))?;

        let sample_format = config.sample_format();
        if !is_rendered(sample_format) {
            return Err(AudioUnavailable::UnsupportedFormat(format!(
                "{:?}",
                sample_format
            )));
        }

        let config: cpal::StreamConfig = config.into();
        tracing::debug!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            format = ?sample_format,
            "opened audio context"
        );

        Ok(CpalContext {
            device,
            config,
            sample_format,
            stream: None,
            closed: false,
        })
    }
}

/// Device sample formats the playhead can be converted into.
fn is_rendered(format: SampleFormat) -> bool {
    matches!(
        format,
        SampleFormat::F32
            | SampleFormat::F64
            | SampleFormat::I8
            | SampleFormat::I16
            | SampleFormat::I32
            | SampleFormat::U8
            | SampleFormat::U16
            | SampleFormat::U32
    )
}

/// Fill one device buffer from the playhead, converting from f32.
fn write_block<T>(
    playhead: &mut Playhead,
    scratch: &mut Vec<f32>,
    data: &mut [T],
    channels: usize,
) where
    T: Sample + FromSample<f32>,
{
    if playhead.is_finished() {
        data.fill(T::EQUILIBRIUM);
        return;
    }

    // Grows once, to the device's callback size.
    scratch.resize(data.len(), 0.0);
    playhead.render_interleaved(scratch, channels);
    for (out, &sample) in data.iter_mut().zip(scratch.iter()) {
        *out = T::from_sample(sample);
    }
}

/// One output stream on a cpal device.
pub struct CpalContext {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: SampleFormat,
    stream: Option<cpal::Stream>,
    closed: bool,
}

impl CpalContext {
    pub fn channels(&self) -> usize {
        self.config.channels as usize
    }

    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    fn build_stream<T>(&self, mut playhead: Playhead) -> Result<cpal::Stream, AudioUnavailable>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = self.channels();
        let mut scratch = Vec::new();

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    write_block(&mut playhead, &mut scratch, data, channels);
                },
                |_err| {},
                None,
            )
            .map_err(|e| AudioUnavailable::Stream(e.to_string()))
    }
}

impl AudioContext for CpalContext {
    fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    fn start(
        &mut self,
        graph: Box<dyn GraphNode>,
        duration: Duration,
    ) -> Result<(), AudioUnavailable> {
        if self.closed {
            return Err(AudioUnavailable::Closed);
        }

        let playhead = Playhead::new(graph, self.sample_rate(), duration);

        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(playhead)?,
            SampleFormat::F64 => self.build_stream::<f64>(playhead)?,
            SampleFormat::I8 => self.build_stream::<i8>(playhead)?,
            SampleFormat::I16 => self.build_stream::<i16>(playhead)?,
            SampleFormat::I32 => self.build_stream::<i32>(playhead)?,
            SampleFormat::U8 => self.build_stream::<u8>(playhead)?,
            SampleFormat::U16 => self.build_stream::<u16>(playhead)?,
            SampleFormat::U32 => self.build_stream::<u32>(playhead)?,
            other => return Err(AudioUnavailable::UnsupportedFormat(format!("{:?}", other))),
        };

        stream
            .play()
            .map_err(|e| AudioUnavailable::Stream(e.to_string()))?;

        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the stream stops it and releases the device.
        self.stream.take();
        self.closed = true;
    }
}
