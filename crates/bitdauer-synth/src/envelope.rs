//! ADSR envelope with per-phase easing curves.
//!
//! The envelope walks Attack → Decay → Sustain → Release, emitting one level
//! per call. Each phase runs for its configured length in samples, counted by
//! a per-phase position that restarts at 0 on phase entry:
//!
//! | Phase   | Level at position `n`                                  |
//! |---------|--------------------------------------------------------|
//! | Attack  | `attack(0, len, n)`                                    |
//! | Decay   | `sustain + (1 - sustain) · (1 - decay(0, len, n))`     |
//! | Sustain | `sustain`                                              |
//! | Release | `sustain · (1 - release(0, len, n))` for `n < len`     |
//!
//! Phase ends are exclusive: the position `n == len` is never emitted by the
//! phase itself, it is already the first sample of the next phase. There is
//! no extra endpoint sample per boundary, and a phase with zero length is
//! skipped. With manual sustain disabled the envelope therefore spends
//! exactly `attack + decay + sustain + release` samples in its phases.
//!
//! Past the end of release the level holds at the curve's end value
//! `sustain · (1 - release(0, len, len))`. That is `0` for curves that reach 1
//! (linear, the ease and logarithmic families) and a small residue for
//! [`Easing::Exponential`]. A zero-length release holds `0`.
//!
//! [`trigger_release`](Envelope::trigger_release) does not move the envelope
//! out of Sustain. Instead Sustain starts emitting the release formula,
//! evaluated at its own running position. Release timing is measured from
//! the start of Sustain, not from the trigger.

use crate::buffer::sample_length;
use crate::{Easing, Generator};

/// Current segment of an [`Envelope`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopePhase {
    /// Rising from 0 toward 1.
    #[default]
    Attack,
    /// Falling from 1 toward the sustain level.
    Decay,
    /// Holding the sustain level.
    Sustain,
    /// Falling from the sustain level toward 0.
    Release,
}

/// ADSR envelope generator.
///
/// Lengths are set in milliseconds and stored in samples, rounded up.
/// All curves default to [`Easing::Linear`] and the sustain level to 1.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Envelope, EnvelopePhase, Generator};
///
/// let mut env = Envelope::new(1000);
/// env.set_attack_ms(2);
/// env.set_release_ms(2);
///
/// let levels: Vec<f64> = (0..5).map(|_| env.next_sample()).collect();
/// assert_eq!(levels, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
/// assert_eq!(env.phase(), EnvelopePhase::Release);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    sample_rate: u32,
    attack_len: u32,
    decay_len: u32,
    sustain_len: u32,
    release_len: u32,
    sustain: f64,
    attack_curve: Easing,
    decay_curve: Easing,
    release_curve: Easing,
    manual_sustain: bool,
    release_triggered: bool,
    phase: EnvelopePhase,
    /// Position inside the current phase
    curr: u32,
}

fn ms_to_samples(sample_rate: u32, ms: u32) -> u32 {
    u32::try_from(sample_length(sample_rate, ms)).unwrap_or(u32::MAX)
}

impl Envelope {
    /// Create an envelope with all lengths at zero and sustain level 1.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            attack_len: 0,
            decay_len: 0,
            sustain_len: 0,
            release_len: 0,
            sustain: 1.0,
            attack_curve: Easing::Linear,
            decay_curve: Easing::Linear,
            release_curve: Easing::Linear,
            manual_sustain: false,
            release_triggered: false,
            phase: EnvelopePhase::Attack,
            curr: 0,
        }
    }

    /// Set the attack length in milliseconds.
    pub fn set_attack_ms(&mut self, ms: u32) {
        self.attack_len = ms_to_samples(self.sample_rate, ms);
        #[cfg(feature = "tracing")]
        tracing::debug!("envelope_attack: {ms} ms = {} samples", self.attack_len);
    }

    /// Set the decay length in milliseconds.
    pub fn set_decay_ms(&mut self, ms: u32) {
        self.decay_len = ms_to_samples(self.sample_rate, ms);
        #[cfg(feature = "tracing")]
        tracing::debug!("envelope_decay: {ms} ms = {} samples", self.decay_len);
    }

    /// Set the sustain length in milliseconds. Ignored while manual sustain
    /// is enabled.
    pub fn set_sustain_ms(&mut self, ms: u32) {
        self.sustain_len = ms_to_samples(self.sample_rate, ms);
        #[cfg(feature = "tracing")]
        tracing::debug!("envelope_sustain: {ms} ms = {} samples", self.sustain_len);
    }

    /// Set the release length in milliseconds.
    pub fn set_release_ms(&mut self, ms: u32) {
        self.release_len = ms_to_samples(self.sample_rate, ms);
        #[cfg(feature = "tracing")]
        tracing::debug!("envelope_release: {ms} ms = {} samples", self.release_len);
    }

    /// Set the sustain level.
    pub fn set_sustain(&mut self, level: f64) {
        self.sustain = level;
    }

    /// Hold Sustain indefinitely until [`trigger_release`](Self::trigger_release).
    pub fn set_manual_sustain(&mut self, manual: bool) {
        self.manual_sustain = manual;
    }

    /// Start releasing while in Sustain (a MIDI note-off, for example).
    pub fn trigger_release(&mut self) {
        self.release_triggered = true;
    }

    /// Curve of the attack ramp.
    pub fn set_attack_curve(&mut self, curve: Easing) {
        self.attack_curve = curve;
    }

    /// Curve of the decay ramp.
    pub fn set_decay_curve(&mut self, curve: Easing) {
        self.decay_curve = curve;
    }

    /// Curve of the release ramp.
    pub fn set_release_curve(&mut self, curve: Easing) {
        self.release_curve = curve;
    }

    /// Re-arm for a new note: back to the start of Attack with the release
    /// flag cleared. Lengths, levels and curves are kept.
    pub fn retrigger(&mut self) {
        self.phase = EnvelopePhase::Attack;
        self.curr = 0;
        self.release_triggered = false;
    }

    /// Current phase.
    pub fn phase(&self) -> EnvelopePhase {
        self.phase
    }

    /// Sustain level.
    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    /// Whether manual sustain is enabled.
    pub fn manual_sustain(&self) -> bool {
        self.manual_sustain
    }

    /// Whether a release has been triggered since the last reset.
    pub fn release_triggered(&self) -> bool {
        self.release_triggered
    }

    /// `[attack, decay, sustain, release]` lengths in samples.
    pub fn lengths(&self) -> [u32; 4] {
        [
            self.attack_len,
            self.decay_len,
            self.sustain_len,
            self.release_len,
        ]
    }

    /// Samples from Attack entry until silence, with manual sustain off.
    pub fn total_len(&self) -> u64 {
        self.lengths().iter().map(|&len| u64::from(len)).sum()
    }

    /// True once the envelope has run past the end of its release.
    pub fn is_finished(&self) -> bool {
        self.phase == EnvelopePhase::Release && self.curr >= self.release_len
    }

    /// Move past every phase whose length is used up.
    fn advance_phase(&mut self) {
        loop {
            let next = match self.phase {
                EnvelopePhase::Attack if self.curr >= self.attack_len => EnvelopePhase::Decay,
                EnvelopePhase::Decay if self.curr >= self.decay_len => EnvelopePhase::Sustain,
                EnvelopePhase::Sustain
                    if !self.release_triggered
                        && !self.manual_sustain
                        && self.curr >= self.sustain_len =>
                {
                    EnvelopePhase::Release
                }
                _ => return,
            };
            self.phase = next;
            self.curr = 0;
        }
    }

    #[inline]
    fn release_level(&self) -> f64 {
        if self.release_len == 0 {
            return 0.0;
        }
        let pos = self.curr.min(self.release_len);
        self.sustain * (1.0 - self.release_curve.value(0, self.release_len, pos))
    }
}

impl Generator for Envelope {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_sample(&mut self) -> f64 {
        self.advance_phase();

        let level = match self.phase {
            EnvelopePhase::Attack => self.attack_curve.value(0, self.attack_len, self.curr),
            EnvelopePhase::Decay => {
                self.sustain
                    + (1.0 - self.sustain)
                        * (1.0 - self.decay_curve.value(0, self.decay_len, self.curr))
            }
            EnvelopePhase::Sustain if !self.release_triggered => self.sustain,
            EnvelopePhase::Sustain | EnvelopePhase::Release => self.release_level(),
        };

        self.curr = self.curr.saturating_add(1);
        level
    }

    /// Clear the release flag only. Phase and position are kept; use
    /// [`Envelope::retrigger`] to start a new note.
    fn reset(&mut self) {
        self.release_triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// One sample per millisecond keeps lengths readable.
    const SR: u32 = 1000;

    fn run(env: &mut Envelope, n: usize) -> Vec<f64> {
        (0..n).map(|_| env.next_sample()).collect()
    }

    fn adsr(a: u32, d: u32, s: u32, r: u32, level: f64) -> Envelope {
        let mut env = Envelope::new(SR);
        env.set_attack_ms(a);
        env.set_decay_ms(d);
        env.set_sustain_ms(s);
        env.set_release_ms(r);
        env.set_sustain(level);
        env
    }

    #[test]
    fn lengths_round_up_to_whole_samples() {
        let mut env = Envelope::new(44100);
        env.set_attack_ms(1);
        env.set_release_ms(10);
        assert_eq!(env.lengths(), [45, 0, 0, 441]);
    }

    #[test]
    fn linear_phases_follow_formulas() {
        let mut env = adsr(4, 4, 2, 4, 0.5);
        let levels = run(&mut env, 14);
        let expected = [
            0.0, 0.25, 0.5, 0.75, // attack
            1.0, 0.875, 0.75, 0.625, // decay
            0.5, 0.5, // sustain
            0.5, 0.375, 0.25, 0.125, // release
        ];
        for (i, (got, want)) in levels.iter().zip(expected).enumerate() {
            assert!((got - want).abs() < 1e-12, "sample {i}: {got} != {want}");
        }
        assert_eq!(env.next_sample(), 0.0);
        assert!(env.is_finished());
    }

    #[test]
    fn phases_last_exactly_their_length() {
        let mut env = adsr(30, 20, 50, 40, 0.7);
        let mut phases = Vec::new();
        for _ in 0..env.total_len() {
            env.next_sample();
            phases.push(env.phase());
        }
        let count = |p| phases.iter().filter(|&&q| q == p).count();
        assert_eq!(count(EnvelopePhase::Attack), 30);
        assert_eq!(count(EnvelopePhase::Decay), 20);
        assert_eq!(count(EnvelopePhase::Sustain), 50);
        assert_eq!(count(EnvelopePhase::Release), 40);
        assert!(env.is_finished());
    }

    #[test]
    fn zero_length_phases_are_skipped() {
        let mut env = adsr(0, 0, 3, 2, 0.8);
        assert_eq!(run(&mut env, 6), vec![0.8, 0.8, 0.8, 0.8, 0.4, 0.0]);

        let mut silent = Envelope::new(SR);
        assert!(run(&mut silent, 10).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn manual_sustain_holds_until_triggered() {
        let mut env = adsr(1, 0, 0, 10, 0.6);
        env.set_manual_sustain(true);
        let held = run(&mut env, 200);
        assert!(held[1..].iter().all(|&v| v == 0.6));
        assert_eq!(env.phase(), EnvelopePhase::Sustain);
    }

    #[test]
    fn triggered_release_counts_from_sustain_start() {
        let mut env = adsr(0, 0, 0, 10, 1.0);
        env.set_manual_sustain(true);
        // sustain position 0..=3 at the held level
        run(&mut env, 4);
        env.trigger_release();

        // the release ramp picks up at position 4, not 0
        let level = env.next_sample();
        assert!((level - 0.6).abs() < 1e-12);
        assert_eq!(env.phase(), EnvelopePhase::Sustain);

        let rest = run(&mut env, 10);
        assert!((rest[0] - 0.5).abs() < 1e-12);
        assert!(rest[5..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn reset_only_clears_release_flag() {
        let mut env = adsr(5, 5, 5, 5, 0.5);
        env.trigger_release();
        run(&mut env, 7);
        env.reset();
        assert!(!env.release_triggered());
        assert_eq!(env.phase(), EnvelopePhase::Decay);
    }

    #[test]
    fn retrigger_restarts_attack() {
        let mut env = adsr(3, 3, 3, 3, 0.5);
        let first = run(&mut env, 12);
        assert!(env.is_finished());
        env.retrigger();
        assert_eq!(env.phase(), EnvelopePhase::Attack);
        assert_eq!(run(&mut env, 12), first);
    }

    #[test]
    fn release_holds_curve_end_value() {
        let mut env = adsr(0, 0, 0, 4, 0.8);
        env.set_release_curve(Easing::Exponential { factor: 2.0 });
        let levels = run(&mut env, 12);

        let tail = 0.8 * libm::exp(-2.0);
        assert!((levels[3] - 0.8 * libm::exp(-1.5)).abs() < 1e-12);
        assert!(env.is_finished());
        for &level in &levels[4..] {
            assert!((level - tail).abs() < 1e-12, "expected {tail}, got {level}");
        }

        // curves reaching 1 end in silence
        let mut linear = adsr(0, 0, 0, 4, 0.8);
        assert_eq!(run(&mut linear, 8)[4..], [0.0; 4]);
    }

    #[test]
    fn phase_boundaries_are_exclusive() {
        let mut env = adsr(2, 0, 0, 2, 1.0);
        // the attack never emits its endpoint value 1.0 at position 2;
        // that sample is already the first of release
        assert_eq!(run(&mut env, 4), vec![0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn curved_attack_uses_easing() {
        let mut env = adsr(4, 0, 1, 0, 1.0);
        env.set_attack_curve(Easing::EaseIn { power: 2.0 });
        let levels = run(&mut env, 4);
        assert_eq!(levels, vec![0.0, 0.0625, 0.25, 0.5625]);
    }
}
