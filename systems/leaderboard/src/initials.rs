use bike_runner_core::{Initials, Key, RawInput};

/// Number of letters captured.
const SLOTS: usize = 3;

/// Input understood by the initials capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialsInput {
    /// Writes a letter into the current slot.
    Letter(char),
    /// Steps back one slot and resets it.
    Backspace,
    /// Submits the current initials.
    Confirm,
    /// Cycles the letter in the current slot forward.
    CycleLetter,
    /// Moves to the next slot, or submits from the last one.
    Advance,
}

impl InitialsInput {
    /// Interprets raw input while capture owns the input stream.
    ///
    /// Pointer presses on the left half of a viewport `viewport_width` wide
    /// cycle the current letter; presses on the right half advance.
    #[must_use]
    pub fn from_raw(input: RawInput, viewport_width: f32) -> Option<Self> {
        match input {
            RawInput::KeyDown(Key::Backspace) => Some(Self::Backspace),
            RawInput::KeyDown(Key::Enter | Key::Jump) => Some(Self::Confirm),
            RawInput::KeyDown(Key::Char(' ')) => Some(Self::Confirm),
            RawInput::KeyDown(Key::Char(letter)) if letter.is_ascii_alphabetic() => {
                Some(Self::Letter(letter.to_ascii_uppercase()))
            }
            RawInput::PointerDown { x, .. } if x < viewport_width / 2.0 => {
                Some(Self::CycleLetter)
            }
            RawInput::PointerDown { .. } => Some(Self::Advance),
            _ => None,
        }
    }
}

/// Result of feeding one input to the capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Capture continues.
    Editing,
    /// The player submitted these initials.
    Submitted(Initials),
}

/// Three-slot initials editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitialsEntry {
    letters: [u8; SLOTS],
    cursor: usize,
}

impl Default for InitialsEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl InitialsEntry {
    /// Starts a capture showing the default initials with the cursor on the first slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            letters: *b"AAA",
            cursor: 0,
        }
    }

    /// Initials currently shown.
    #[must_use]
    pub fn initials(&self) -> Initials {
        Initials::from_letters(self.letters)
    }

    /// Index of the slot being edited.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies one input.
    pub fn apply(&mut self, input: InitialsInput) -> CaptureStatus {
        match input {
            InitialsInput::Letter(letter) => {
                if letter.is_ascii_alphabetic() {
                    self.letters[self.cursor] = letter.to_ascii_uppercase() as u8;
                    self.cursor = (self.cursor + 1).min(SLOTS - 1);
                }
                CaptureStatus::Editing
            }
            InitialsInput::Backspace => {
                self.cursor = self.cursor.saturating_sub(1);
                self.letters[self.cursor] = b'A';
                CaptureStatus::Editing
            }
            InitialsInput::Confirm => CaptureStatus::Submitted(self.initials()),
            InitialsInput::CycleLetter => {
                let offset = self.letters[self.cursor].saturating_sub(b'A');
                self.letters[self.cursor] = b'A' + (offset + 1) % 26;
                CaptureStatus::Editing
            }
            InitialsInput::Advance => {
                if self.cursor + 1 < SLOTS {
                    self.cursor += 1;
                    CaptureStatus::Editing
                } else {
                    CaptureStatus::Submitted(self.initials())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_fill_slots_and_stick_on_last() {
        let mut entry = InitialsEntry::new();
        for letter in ['j', 'o', 'e', 'x'] {
            assert_eq!(entry.apply(InitialsInput::Letter(letter)), CaptureStatus::Editing);
        }
        assert_eq!(entry.initials().as_str(), "JOX");
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn backspace_steps_back_and_resets_slot() {
        let mut entry = InitialsEntry::new();
        let _ = entry.apply(InitialsInput::Letter('Z'));
        let _ = entry.apply(InitialsInput::Letter('Y'));
        let _ = entry.apply(InitialsInput::Backspace);
        assert_eq!(entry.initials().as_str(), "ZAA");
        assert_eq!(entry.cursor(), 1);

        let _ = entry.apply(InitialsInput::Backspace);
        let _ = entry.apply(InitialsInput::Backspace);
        assert_eq!(entry.initials().as_str(), "AAA");
        assert_eq!(entry.cursor(), 0);
    }

    #[test]
    fn cycling_wraps_from_z_to_a() {
        let mut entry = InitialsEntry::new();
        for _ in 0..25 {
            let _ = entry.apply(InitialsInput::CycleLetter);
        }
        assert_eq!(entry.initials().as_str(), "ZAA");
        let _ = entry.apply(InitialsInput::CycleLetter);
        assert_eq!(entry.initials().as_str(), "AAA");
    }

    #[test]
    fn advancing_past_last_slot_submits() {
        let mut entry = InitialsEntry::new();
        let _ = entry.apply(InitialsInput::CycleLetter);
        assert_eq!(entry.apply(InitialsInput::Advance), CaptureStatus::Editing);
        assert_eq!(entry.apply(InitialsInput::Advance), CaptureStatus::Editing);
        assert_eq!(
            entry.apply(InitialsInput::Advance),
            CaptureStatus::Submitted(Initials::from_letters(*b"BAA"))
        );
    }

    #[test]
    fn raw_input_mapping() {
        assert_eq!(
            InitialsInput::from_raw(RawInput::KeyDown(Key::Char('q')), 800.0),
            Some(InitialsInput::Letter('Q'))
        );
        assert_eq!(
            InitialsInput::from_raw(RawInput::KeyDown(Key::Jump), 800.0),
            Some(InitialsInput::Confirm)
        );
        assert_eq!(
            InitialsInput::from_raw(RawInput::PointerDown { x: 100.0, y: 5.0 }, 800.0),
            Some(InitialsInput::CycleLetter)
        );
        assert_eq!(
            InitialsInput::from_raw(RawInput::PointerDown { x: 400.0, y: 5.0 }, 800.0),
            Some(InitialsInput::Advance)
        );
        assert_eq!(
            InitialsInput::from_raw(RawInput::KeyDown(Key::Char('7')), 800.0),
            None
        );
        assert_eq!(InitialsInput::from_raw(RawInput::KeyUp(Key::Enter), 800.0), None);
    }
}
