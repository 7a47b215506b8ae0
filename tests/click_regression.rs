use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clickfx::{
    output::OfflineBackend,
    prefs::{MemoryStore, ENABLED_KEY, VOLUME_KEY},
    ClickConfig, ClickOutcome, ClickSynth, SoundPreferences,
};
use rustfft::{num_complex::Complex, FftPlanner};

fn synth_with(backend: &OfflineBackend, store: MemoryStore) -> ClickSynth<OfflineBackend> {
    ClickSynth::new(backend.clone(), Arc::new(SoundPreferences::load(store)))
}

fn wait_for(mut done: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    done()
}

/// Energy in each half of the spectrum, split at `split_hz`.
fn band_energy(samples: &[f32], sample_rate: f32, split_hz: f32) -> (f32, f32) {
    let mut buffer: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    FftPlanner::new()
        .plan_fft_forward(buffer.len())
        .process(&mut buffer);

    let bin_hz = sample_rate / buffer.len() as f32;
    let split_bin = (split_hz / bin_hz) as usize;
    let half = buffer.len() / 2;

    let low = buffer[1..split_bin].iter().map(|c| c.norm_sqr()).sum();
    let high = buffer[split_bin..half].iter().map(|c| c.norm_sqr()).sum();
    (low, high)
}

#[test]
fn trigger_releases_its_context_in_the_background() {
    let backend = OfflineBackend::new(48_000.0);
    let synth = synth_with(&backend, MemoryStore::new());

    let started = Instant::now();
    synth.trigger();
    assert!(
        started.elapsed() < Duration::from_millis(50),
        "trigger must not wait for playback"
    );

    assert!(wait_for(|| backend.closed() == 1, Duration::from_secs(2)));
    assert_eq!(backend.opened(), 1);
    assert_eq!(backend.live(), 0);
}

#[test]
fn trigger_is_silent_when_disabled_or_muted() {
    let backend = OfflineBackend::new(48_000.0);

    let disabled = synth_with(&backend, MemoryStore::with_entries([(ENABLED_KEY, "false")]));
    disabled.trigger();

    let muted = synth_with(&backend, MemoryStore::with_entries([(VOLUME_KEY, "0")]));
    muted.trigger();

    thread::sleep(Duration::from_millis(50));
    assert_eq!(backend.opened(), 0);
}

#[test]
fn trigger_swallows_audio_failures() {
    let backend = OfflineBackend::new(48_000.0)
        .failing_start(clickfx::AudioUnavailable::Stream("denied".into()));
    let synth = synth_with(&backend, MemoryStore::new());

    synth.trigger();

    assert!(wait_for(|| backend.closed() == 1, Duration::from_secs(2)));
    assert!(backend.renders().is_empty());
}

#[test]
fn rapid_triggers_each_get_their_own_context() {
    let backend = OfflineBackend::new(44_100.0);
    let synth = synth_with(&backend, MemoryStore::new());

    for _ in 0..5 {
        synth.trigger();
    }

    assert!(wait_for(|| backend.closed() == 5, Duration::from_secs(2)));
    assert_eq!(backend.opened(), 5);
    assert!(backend.renders().iter().all(|r| r.len() == 3_528));
}

#[test]
fn volume_is_captured_at_trigger_time() {
    let backend = OfflineBackend::new(48_000.0);
    let synth = synth_with(&backend, MemoryStore::new());

    synth.trigger();
    synth.prefs().set_volume(0.0).unwrap();
    synth.trigger();

    assert!(wait_for(|| backend.closed() == 1, Duration::from_secs(2)));
    assert_eq!(backend.opened(), 1);
}

#[test]
fn click_energy_sits_above_the_cutoff() {
    let backend = OfflineBackend::new(48_000.0);
    let synth = synth_with(&backend, MemoryStore::new()).with_config(ClickConfig {
        release_delay: Duration::ZERO,
        ..ClickConfig::default()
    });

    let outcome = synth.fire().unwrap();
    assert_eq!(
        outcome,
        ClickOutcome::Played {
            sample_rate: 48_000.0,
            frames: 3_840
        }
    );

    let render = backend.last_render().unwrap();
    assert_eq!(render.len(), 3_840);
    assert!(render.iter().all(|s| s.abs() <= 1.0));

    let (low, high) = band_energy(&render, 48_000.0, 1_000.0);
    assert!(high > low * 10.0, "low={low}, high={high}");
}

#[test]
fn half_volume_is_quieter() {
    let backend = OfflineBackend::new(48_000.0);
    let synth = synth_with(&backend, MemoryStore::new()).with_config(ClickConfig {
        release_delay: Duration::ZERO,
        ..ClickConfig::default()
    });

    let energy = |render: &[f32]| render.iter().map(|s| s * s).sum::<f32>();

    let mut loud = 0.0;
    let mut soft = 0.0;
    for _ in 0..8 {
        synth.play(1.0).unwrap();
        loud += energy(&backend.last_render().unwrap());
        synth.play(0.5).unwrap();
        soft += energy(&backend.last_render().unwrap());
    }

    // Half the gain is a quarter of the energy; noise varies from click to click.
    let ratio = soft / loud;
    assert!(ratio > 0.15 && ratio < 0.35, "ratio={ratio}");
}
