use std::time::Duration;

/// Oscillator shape of a synthesized tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure sine wave.
    Sine,
    /// Square wave.
    Square,
    /// Sawtooth wave.
    Sawtooth,
}

/// Short synthesized tone with an exponential decay envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Frequency when the tone starts, in hertz.
    pub start_hz: f32,
    /// Frequency the tone sweeps towards, in hertz. Equal to `start_hz` for a
    /// steady pitch.
    pub end_hz: f32,
    /// Peak gain in the range 0.0..=1.0.
    pub gain: f32,
    /// Time for the envelope to decay to silence.
    pub decay: Duration,
    /// Delay before the tone starts.
    pub delay: Duration,
}

impl Tone {
    /// Rising blip played when a jump fires.
    pub const JUMP: Self = Self::sweep(Waveform::Square, 400.0, 600.0, 0.1, 150);
    /// Chime played when a power-up activates.
    pub const POWER: Self = Self::sweep(Waveform::Sine, 760.0, 760.0, 0.15, 180);
    /// Falling buzz played when the run ends.
    pub const DEATH: Self = Self::sweep(Waveform::Sawtooth, 300.0, 100.0, 0.2, 300);
    /// Ping played when the shield absorbs an obstacle.
    pub const SHIELD: Self = Self::sweep(Waveform::Sine, 900.0, 1_200.0, 0.15, 100);

    const fn sweep(waveform: Waveform, start_hz: f32, end_hz: f32, gain: f32, decay_ms: u64) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            gain,
            decay: Duration::from_millis(decay_ms),
            delay: Duration::ZERO,
        }
    }

    /// Ascending major chord announcing a new biome, one note every 50 ms.
    #[must_use]
    pub fn biome_chord() -> [Self; 3] {
        let mut notes = [440.0, 554.0, 659.0].map(|hz| Self::sweep(Waveform::Sine, hz, hz, 0.1, 300));
        for (index, note) in notes.iter_mut().enumerate() {
            note.delay = Duration::from_millis(50 * index as u64);
        }
        notes
    }
}

/// Fire-and-forget sound output.
pub trait ToneGenerator {
    /// Plays `tone` without blocking.
    fn play(&mut self, tone: Tone);
}

/// Tone generator that discards every tone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Silent;

impl ToneGenerator for Silent {
    fn play(&mut self, _tone: Tone) {}
}

/// A missing generator stays silent.
impl<T: ToneGenerator> ToneGenerator for Option<T> {
    fn play(&mut self, tone: Tone) {
        if let Some(generator) = self {
            generator.play(tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_notes_are_staggered() {
        let chord = Tone::biome_chord();
        let delays: Vec<u64> = chord.iter().map(|note| note.delay.as_millis() as u64).collect();
        assert_eq!(delays, vec![0, 50, 100]);
        assert!(chord.iter().all(|note| note.start_hz == note.end_hz));
    }

    #[test]
    fn missing_generator_is_silent() {
        let mut generator: Option<Silent> = None;
        generator.play(Tone::JUMP);
        assert!(generator.is_none());
    }
}
