use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::KEY_COUNT;
use crate::error::InputError;

/// # Keypad
/// The pressed status of the 16 hexadecimal keys.
///
/// Each key is its own atomic flag, so a host may press and release keys from an input
/// thread while another thread owns the engine and steps it. The engine only ever reads it.
#[derive(Debug, Default)]
pub struct Keypad {
    keys: [AtomicBool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the index of the key, 0x0..=0xF
    /// * `pressed` whether it is held down
    pub fn set(&self, key: usize, pressed: bool) -> Result<(), InputError> {
        self.keys
            .get(key)
            .ok_or(InputError::KeyOutOfRange(key))?
            .store(pressed, Ordering::Release);
        Ok(())
    }

    /// Keys outside the keypad are never pressed
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys
            .get(key)
            .map_or(false, |k| k.load(Ordering::Acquire))
    }

    /// The highest-indexed key currently held
    pub fn last_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT).rev().find(|&k| self.is_pressed(k)).map(|k| k as u8)
    }

    /// The lowest-indexed key currently held
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT).find(|&k| self.is_pressed(k)).map(|k| k as u8)
    }

    pub fn release_all(&self) {
        for key in &self.keys {
            key.store(false, Ordering::Release);
        }
    }

    /// A copy of every key's status
    pub fn snapshot(&self) -> [bool; KEY_COUNT] {
        std::array::from_fn(|k| self.is_pressed(k))
    }
}
