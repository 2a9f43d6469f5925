//! Integration tests for bitdauer-synth.
//!
//! Tests cover full oscillator renders, noise coloring, filter composition,
//! envelope timing and the buffer driver working together.

use bitdauer_synth::{
    CompositeFilter, Easing, Envelope, EnvelopePhase, Filter, FilterChain, FunctionGenerator,
    Generator, GeneratorKind, HighPassIir, Lfo, LowPassIir, NoiseColor, NoiseGenerator, Note,
    NoteTable, NotchIir, Oscillator, PeakingIir, TAU, Waveform, fill, generate, sample_length,
};

fn rms(samples: &[f64]) -> f64 {
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

fn sine_samples(freq: f64, sample_rate: u32, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (TAU * freq * i as f64 / f64::from(sample_rate)).sin())
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Oscillator renders
// ---------------------------------------------------------------------------

#[test]
fn sine_oscillator_one_second_at_8k() {
    let mut osc = Oscillator::new(8000);
    osc.wave_mut().set_waveform(Waveform::Sine);
    osc.set_frequency(440.0);
    osc.set_volume(1.0);

    let buffer = generate(1000, &mut osc);
    assert_eq!(buffer.len(), 8000);
    assert!(buffer[0].abs() < 1e-9);

    let quarter = (8000.0_f64 / (4.0 * 440.0)).round() as usize;
    assert!(
        (buffer[quarter] - 1.0).abs() < 0.05,
        "quarter-period sample {} = {}",
        quarter,
        buffer[quarter]
    );
}

#[test]
fn sine_oscillator_matches_reference_sine() {
    let mut osc = Oscillator::new(44100);
    osc.wave_mut().set_waveform(Waveform::Sine);
    osc.set_frequency(1000.0);

    let buffer = generate(10, &mut osc);
    let reference = sine_samples(1000.0, 44100, buffer.len());
    for (i, (got, want)) in buffer.iter().zip(&reference).enumerate() {
        assert!((got - want).abs() < 1e-9, "sample {i}: {got} vs {want}");
    }
}

#[test]
fn rendering_twice_is_identical() {
    let mut osc = Oscillator::new(22050);
    osc.wave_mut().set_waveform(Waveform::Sawtooth);
    osc.set_frequency(330.0);
    osc.set_frequency_modulator(Lfo::new(22050, Waveform::Sine, 5.0, 10.0));
    osc.set_volume_modulator(Lfo::new(22050, Waveform::Triangle, 2.0, 0.2));
    osc.set_delay_ms(20);

    let first = generate(250, &mut osc);
    let second = generate(250, &mut osc);
    assert_eq!(first, second);
}

#[test]
fn delayed_enveloped_note() {
    let sr = 1000;
    let mut osc = Oscillator::new(sr);
    osc.wave_mut().set_waveform(Waveform::Square);
    osc.set_frequency(0.0);
    osc.set_delay_ms(10);

    let env = osc.envelope_mut();
    env.set_attack_ms(10);
    env.set_decay_ms(10);
    env.set_sustain(0.5);
    env.set_sustain_ms(20);
    env.set_release_ms(10);
    osc.set_envelope_enabled(true);

    let buffer = generate(70, &mut osc);
    assert!(buffer[..10].iter().all(|&s| s == 0.0), "delay not silent");
    assert_eq!(buffer[10], 0.0, "attack starts at zero");
    assert_eq!(buffer[20], 1.0, "peak at decay start");
    assert!(buffer[30..50].iter().all(|&s| s == 0.5), "sustain level");
    assert!(buffer[60..].iter().all(|&s| s == 0.0), "silent after release");
}

#[test]
fn noise_oscillator_is_reproducible_per_seed() {
    let render = |seed| {
        let mut osc = Oscillator::new(44100);
        osc.switch_generator(GeneratorKind::Noise);
        osc.noise_mut().set_seed(seed);
        osc.noise_mut().set_noise_color(NoiseColor::Pink);
        generate(50, &mut osc)
    };
    assert_eq!(render(11), render(11));
    assert_ne!(render(11), render(12));
}

#[test]
fn switching_generator_keeps_state() {
    let mut osc = Oscillator::new(8000);
    osc.wave_mut().set_waveform(Waveform::Sine);
    osc.set_frequency(100.0);
    for _ in 0..10 {
        osc.next_sample();
    }
    let angle = osc.wave().angle();

    osc.switch_generator(GeneratorKind::Noise);
    osc.next_sample();
    assert_eq!(osc.wave().angle(), angle, "inactive wave generator advanced");
}

// ---------------------------------------------------------------------------
// 2. Noise colors
// ---------------------------------------------------------------------------

#[test]
fn white_noise_statistics() {
    let mut noise = NoiseGenerator::new(44100);
    noise.set_seed(2024);
    let samples: Vec<f64> = (0..100_000).map(|_| noise.next_sample()).collect();

    assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    assert!(mean.abs() < 0.05);
    // uniform on [-1, 1] has RMS 1/sqrt(3)
    assert!((rms(&samples) - 1.0 / 3.0_f64.sqrt()).abs() < 0.01);
}

#[test]
fn red_noise_is_darker_than_blue() {
    // crude brightness: energy of the first difference relative to total
    let brightness = |color| {
        let mut noise = NoiseGenerator::new(44100);
        noise.set_seed(3);
        noise.set_noise_color(color);
        let samples: Vec<f64> = (0..44100).map(|_| noise.next_sample()).collect();
        let diff: Vec<f64> = samples.windows(2).map(|w| w[1] - w[0]).collect();
        rms(&diff) / rms(&samples)
    };
    let red = brightness(NoiseColor::Red);
    let blue = brightness(NoiseColor::Blue);
    assert!(red < blue, "red {red} should be darker than blue {blue}");
}

// ---------------------------------------------------------------------------
// 3. Filter composition
// ---------------------------------------------------------------------------

#[test]
fn band_limited_chain_passes_mid_band() {
    let sr = 44100;
    let mut chain = FilterChain::new();
    chain.push(HighPassIir::with_cutoff(sr, 100.0));
    chain.push(LowPassIir::with_cutoff(sr, 5000.0));

    let input = sine_samples(30.0, sr, sr as usize);
    let low: Vec<f64> = input.iter().map(|&x| chain.process(x)).collect();
    chain.reset();
    let input = sine_samples(1000.0, sr, sr as usize);
    let mid: Vec<f64> = input.iter().map(|&x| chain.process(x)).collect();

    let half = sr as usize / 2;
    assert!(rms(&mid[half..]) > rms(&low[half..]));
}

#[test]
fn notch_inside_chain_removes_hum() {
    let sr = 44100;
    let mut notch = NotchIir::new(sr);
    notch.set_center(60.0);
    notch.set_quality_factor(2.0);

    let mut chain = FilterChain::new();
    chain.push(notch);

    let hum = sine_samples(60.0, sr, 2 * sr as usize);
    let out: Vec<f64> = hum.iter().map(|&x| chain.process(x)).collect();
    assert!(rms(&out[sr as usize..]) < 0.05);
}

#[test]
fn composite_halves_each_step() {
    let sr = 48000;
    let mut flat_a = FilterChain::new();
    flat_a.push(PeakingIir::with_q_db(sr, 1000.0, 1.0, 0.0));
    let flat_b = FilterChain::new();

    let mut composite = CompositeFilter::new();
    composite.push(flat_a, 1.0);
    composite.push(flat_b, 1.0);

    // both chains are transparent: ((x/2) + x) / 2
    for x in [0.0, 0.5, -0.8] {
        let out = composite.process(x);
        assert!((out - 0.75 * x).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// 4. Envelope timing
// ---------------------------------------------------------------------------

#[test]
fn envelope_total_length_at_audio_rate() {
    let sr = 44100;
    let mut env = Envelope::new(sr);
    env.set_attack_ms(5);
    env.set_decay_ms(20);
    env.set_sustain(0.7);
    env.set_sustain_ms(100);
    env.set_release_ms(50);
    env.set_decay_curve(Easing::exponential());
    env.set_release_curve(Easing::ease_in_out());

    let expected = sample_length(sr, 5)
        + sample_length(sr, 20)
        + sample_length(sr, 100)
        + sample_length(sr, 50);
    assert_eq!(env.total_len(), expected as u64);

    let mut audible = 0;
    loop {
        env.next_sample();
        audible += 1;
        if env.is_finished() {
            break;
        }
    }
    assert_eq!(audible, expected);
}

#[test]
fn envelope_as_modulator() {
    let mut env = Envelope::new(1000);
    env.set_attack_ms(10);
    env.set_sustain_ms(100);

    let mut osc = Oscillator::new(1000);
    osc.wave_mut().set_waveform(Waveform::Square);
    osc.set_volume(0.0);
    osc.set_volume_modulator(env);

    let out = generate(20, &mut osc);
    assert_eq!(out[0], 0.0);
    assert!((out[5] - 0.5).abs() < 1e-12);
    assert_eq!(out[15], 1.0);
}

#[test]
fn envelope_phase_sequence() {
    let mut env = Envelope::new(1000);
    env.set_attack_ms(1);
    env.set_decay_ms(1);
    env.set_sustain_ms(1);
    env.set_release_ms(1);

    let phases: Vec<EnvelopePhase> = (0..4)
        .map(|_| {
            env.next_sample();
            env.phase()
        })
        .collect();
    assert_eq!(
        phases,
        [
            EnvelopePhase::Attack,
            EnvelopePhase::Decay,
            EnvelopePhase::Sustain,
            EnvelopePhase::Release
        ]
    );
}

// ---------------------------------------------------------------------------
// 5. Buffer driver and notes
// ---------------------------------------------------------------------------

#[test]
fn fill_reuses_caller_buffer() {
    let mut r#gen = FunctionGenerator::with_waveform(48000, Waveform::Triangle, 480.0);
    let mut block = [0.0; 100];
    fill(&mut block, &mut r#gen);
    let first = block;
    fill(&mut block, &mut r#gen);
    assert_eq!(block, first);
    // one full period at 100 samples: the block wraps back near the start
    assert!((block[0] - 1.0).abs() < 1e-12);
}

#[test]
fn note_table_drives_oscillator() {
    let table = NoteTable::default();
    let Some(freq) = table.frequency(4, Note::A) else {
        panic!("A4 missing from table");
    };
    let mut osc = Oscillator::new(44100);
    osc.wave_mut().set_waveform(Waveform::Square);
    osc.set_frequency(freq);

    // count rising edges over one second
    let buffer = generate(1000, &mut osc);
    let edges = buffer.windows(2).filter(|w| w[0] < 0.0 && w[1] > 0.0).count();
    assert!((439..=441).contains(&edges), "edges = {edges}");
}
