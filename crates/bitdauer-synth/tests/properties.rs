//! Property-based tests for bitdauer-synth.
//!
//! Tests waveform bounds, filter reset and stability, phase periodicity,
//! easing sentinels, envelope length conservation and render determinism
//! using proptest.

use bitdauer_synth::{
    BandPassIir, Easing, Envelope, Filter, FilterChain, FunctionGenerator, Generator, HighPassIir,
    LowPassIir, NoiseColor, NoiseGenerator, NotchIir, Oscillator, PeakingIir, TAU, Waveform,
    generate, sample_length,
};
use proptest::prelude::*;

fn waveform(index: usize) -> Waveform {
    Waveform::ALL[index % Waveform::ALL.len()]
}

fn filter(index: usize, sample_rate: u32, center: f64, q: f64) -> Box<dyn Filter> {
    match index % 5 {
        0 => Box::new(HighPassIir::with_cutoff(sample_rate, center)),
        1 => Box::new(LowPassIir::with_cutoff(sample_rate, center)),
        2 => Box::new(BandPassIir::with_cutoff(sample_rate, center)),
        3 => {
            let mut notch = NotchIir::new(sample_rate);
            notch.set_center(center);
            notch.set_quality_factor(q);
            Box::new(notch)
        }
        _ => Box::new(PeakingIir::with_q_db(sample_rate, center, q, 6.0)),
    }
}

fn easing(index: usize, param: f64) -> Easing {
    match index % 9 {
        0 => Easing::Linear,
        1 => Easing::EaseIn { power: param },
        2 => Easing::EaseOut { power: param },
        3 => Easing::EaseInOut { power: param },
        4 => Easing::Exponential { factor: param },
        5 => Easing::InverseExponential { factor: param },
        6 => Easing::Logarithmic { base: param + 1.0 },
        7 => Easing::InverseLogarithmic { base: param + 1.0 },
        _ => Easing::SCurve {
            sharpness: param,
            midpoint: 0.5,
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every built-in wave stays inside [-1, 1] for any frequency below
    /// Nyquist and any phase shift.
    #[test]
    fn function_generator_bounded(
        shape in 0usize..6,
        freq in 0.0f64..22050.0,
        shift in -720.0f64..720.0,
    ) {
        let mut generator = FunctionGenerator::with_waveform(44100, waveform(shape), freq);
        generator.shift_phase(shift);
        generator.reset();
        for _ in 0..1024 {
            let s = generator.next_sample();
            prop_assert!((-1.0..=1.0).contains(&s), "{:?} produced {}", waveform(shape), s);
            prop_assert!(generator.angle() >= 0.0 && generator.angle() < TAU);
        }
    }

    /// After `reset`, any filter answers a zero input exactly like a freshly
    /// built one with the same coefficients.
    #[test]
    fn filter_reset_is_idempotent(
        kind in 0usize..5,
        center in 20.0f64..20000.0,
        q in 0.1f64..10.0,
        input in prop::collection::vec(-1.0f64..=1.0, 1..256),
    ) {
        let mut used = filter(kind, 44100, center, q);
        let mut fresh = filter(kind, 44100, center, q);
        for &x in &input {
            used.process(x);
        }
        used.reset();
        prop_assert_eq!(used.process(0.0), fresh.process(0.0));
        used.reset();
        used.reset();
        fresh.reset();
        prop_assert_eq!(used.process(0.0), fresh.process(0.0));
    }

    /// A chain holding one filter is indistinguishable from that filter.
    #[test]
    fn single_filter_chain_is_transparent(
        kind in 0usize..5,
        center in 20.0f64..20000.0,
        q in 0.1f64..10.0,
        input in prop::collection::vec(-1.0f64..=1.0, 256),
    ) {
        let mut direct = filter(kind, 48000, center, q);
        let mut chain = FilterChain::new();
        chain.push_boxed(filter(kind, 48000, center, q));
        for &x in &input {
            prop_assert_eq!(chain.process(x), direct.process(x));
        }
    }

    /// With an integer number of samples per period the accumulator is back
    /// at its starting angle after exactly that many calls.
    #[test]
    fn phase_returns_after_one_period(
        sample_rate in prop::sample::select(vec![8000u32, 22050, 44100, 48000]),
        period in 2u32..400,
    ) {
        let freq = f64::from(sample_rate) / f64::from(period);
        let mut generator = FunctionGenerator::with_waveform(sample_rate, Waveform::Sine, freq);
        for _ in 0..period {
            generator.next_sample();
        }
        let angle = generator.angle();
        let tolerance = 1e-9 * f64::from(period);
        prop_assert!(angle < tolerance || TAU - angle < tolerance, "angle = {}", angle);
    }

    /// First-order sections never leave [-1, 1] for any cutoff and input.
    #[test]
    fn one_pole_outputs_clamped(
        cutoff in 0.0f64..22050.0,
        input in prop::collection::vec(-10.0f64..10.0, 256),
    ) {
        let mut hp = HighPassIir::with_cutoff(44100, cutoff);
        let mut lp = LowPassIir::with_cutoff(44100, cutoff);
        for &x in &input {
            let h = hp.process(x);
            let l = lp.process(x);
            prop_assert!((-1.0..=1.0).contains(&h));
            prop_assert!((-1.0..=1.0).contains(&l));
        }
    }

    /// Second-order filters stay finite for any in-band center and Q.
    #[test]
    fn second_order_stability(
        center in 20.0f64..20000.0,
        q in 0.1f64..10.0,
        gain_db in -24.0f64..24.0,
        input in prop::collection::vec(-1.0f64..=1.0, 512),
    ) {
        let mut notch = NotchIir::new(44100);
        notch.set_center(center);
        notch.set_quality_factor(q);
        let mut peak = PeakingIir::with_q_db(44100, center, q, gain_db);

        for &x in &input {
            prop_assert!(notch.process(x).is_finite());
            prop_assert!(peak.process(x).is_finite());
        }
    }

    /// Easing curves return finite values for every position, including
    /// empty ranges and positions outside the range.
    #[test]
    fn easing_never_nan(
        curve in 0usize..9,
        param in 0.1f64..10.0,
        start in 0u32..1000,
        span in 0u32..1000,
        curr in 0u32..3000,
    ) {
        let v = easing(curve, param).value(start, start + span, curr);
        prop_assert!(v.is_finite(), "{:?} gave {}", easing(curve, param), v);
    }

    /// With manual sustain off, the envelope is audible for exactly the sum
    /// of its phase lengths, then silent.
    #[test]
    fn envelope_length_conservation(
        attack in 0u32..50,
        decay in 0u32..50,
        sustain_ms in 0u32..50,
        release in 1u32..50,
        level in 0.0f64..=1.0,
        sample_rate in 1000u32..48000,
    ) {
        let mut env = Envelope::new(sample_rate);
        env.set_attack_ms(attack);
        env.set_decay_ms(decay);
        env.set_sustain(level);
        env.set_sustain_ms(sustain_ms);
        env.set_release_ms(release);

        let expected = sample_length(sample_rate, attack)
            + sample_length(sample_rate, decay)
            + sample_length(sample_rate, sustain_ms)
            + sample_length(sample_rate, release);

        for i in 0..expected {
            let v = env.next_sample();
            prop_assert!(v.is_finite());
            if i + 1 < expected {
                prop_assert!(!env.is_finished(), "finished early at {} of {}", i, expected);
            }
        }
        prop_assert!(env.is_finished());
        for _ in 0..16 {
            prop_assert_eq!(env.next_sample(), 0.0);
        }
    }

    /// Buffer length is ceil(sr · ms / 1000) for any rate and duration.
    #[test]
    fn generate_length(sample_rate in 1u32..96000, duration in 0u32..200) {
        let mut osc = Oscillator::new(sample_rate);
        let buffer = generate(duration, &mut osc);
        let exact = f64::from(sample_rate) * f64::from(duration) / 1000.0;
        prop_assert_eq!(buffer.len(), exact.ceil() as usize);
    }

    /// Reseeding restarts the white noise sequence exactly.
    #[test]
    fn noise_reset_replays(seed in any::<u64>(), n in 1usize..512) {
        let mut noise = NoiseGenerator::new(44100);
        noise.set_seed(seed);
        noise.set_noise_color(NoiseColor::White);
        let first: Vec<f64> = (0..n).map(|_| noise.next_sample()).collect();
        noise.reset();
        let second: Vec<f64> = (0..n).map(|_| noise.next_sample()).collect();
        prop_assert_eq!(first, second);
    }

    /// Numeric noise selectors map to a color exactly for 0..=4.
    #[test]
    fn noise_selector_domain(selector in any::<u8>()) {
        prop_assert_eq!(NoiseColor::try_from(selector).is_ok(), selector <= 4);
    }
}
