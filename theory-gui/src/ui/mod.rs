//! # UI Module
//!
//! This module contains all UI components for the music theory trainer.

pub mod circle_of_fifths;
pub mod main_display;
pub mod piano_keyboard;
