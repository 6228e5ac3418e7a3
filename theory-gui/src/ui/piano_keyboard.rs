//! # Piano Keyboard Widget
//!
//! This module provides an interactive piano keyboard widget that shows
//! the notes of the current lesson. It starts at middle C and spans a
//! configurable number of octaves.
//!
//! ## Features
//! - Multi-octave keyboard visualization starting at C4
//! - Highlighting of every key whose pitch class belongs to the lesson
//! - Lesson spellings ("Bb" rather than "A#") drawn on highlighted keys
//! - Click-to-play functionality

use iced::alignment;
use iced::widget::canvas::{self, event, Event, Fill, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Color, Element, Pixels, Point, Rectangle, Renderer, Size, Theme};
use theory_core::PitchClass;

use crate::Message;

/// MIDI number of the leftmost key (middle C).
const FIRST_MIDI: i32 = 60;
/// Keyboard height in logical pixels.
const KEYBOARD_HEIGHT: f32 = 140.0;

const HIGHLIGHT: Color = Color::from_rgb(0.2, 0.86, 0.6);
const PRESSED: Color = Color::from_rgb(1.0, 0.2, 0.2);

/// Interactive piano keyboard for lesson visualization.
#[derive(Debug, Clone)]
pub struct PianoKeyboard {
    octaves: u8,
    /// Pitch classes of the lesson with the spelling to print on them.
    highlighted: Vec<(PitchClass, String)>,
    /// Key last clicked by the user (MIDI number)
    pressed: Option<i32>,
}

impl PianoKeyboard {
    pub fn new(octaves: u8, highlighted: Vec<(PitchClass, String)>, pressed: Option<i32>) -> Self {
        Self {
            octaves: octaves.max(1),
            highlighted,
            pressed,
        }
    }

    pub fn view(self) -> Element<'static, Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(KEYBOARD_HEIGHT)),
        )
        .into()
    }

    fn key_count(&self) -> i32 {
        self.octaves as i32 * 12
    }

    fn white_key_count(&self) -> usize {
        self.octaves as usize * 7
    }

    fn label_for(&self, midi: i32) -> Option<&str> {
        let pc = PitchClass::from_index(midi);
        self.highlighted
            .iter()
            .find(|(p, _)| *p == pc)
            .map(|(_, name)| name.as_str())
    }

    fn key_color(&self, midi: i32, base: Color) -> Color {
        if self.pressed == Some(midi) {
            PRESSED
        } else if self.label_for(midi).is_some() {
            HIGHLIGHT
        } else {
            base
        }
    }

    /// Left edge of each black key, paired with its MIDI number.
    fn black_keys(&self, white_key_width: f32) -> Vec<(f32, i32)> {
        let black_key_width = white_key_width * 0.6;
        let mut white_key_idx = 0.0;
        let mut keys = Vec::new();
        for offset in 0..self.key_count() {
            let midi = FIRST_MIDI + offset;
            if PitchClass::from_index(midi).is_black() {
                keys.push((white_key_idx * white_key_width - black_key_width / 2.0, midi));
            } else {
                white_key_idx += 1.0;
            }
        }
        keys
    }

    fn key_from_pos(&self, bounds: Size, pos: Point) -> Option<i32> {
        let white_key_width = bounds.width / self.white_key_count() as f32;
        let black_key_width = white_key_width * 0.6;
        let black_key_height = bounds.height * 0.6;

        // Black keys are drawn on top, so they win.
        for (x, midi) in self.black_keys(white_key_width) {
            let rect = Rectangle {
                x,
                y: 0.0,
                width: black_key_width,
                height: black_key_height,
            };
            if rect.contains(pos) {
                return Some(midi);
            }
        }

        let clicked_white_key = (pos.x / white_key_width).floor() as usize;
        (0..self.key_count())
            .map(|offset| FIRST_MIDI + offset)
            .filter(|&midi| !PitchClass::from_index(midi).is_black())
            .nth(clicked_white_key)
    }
}

impl canvas::Program<Message> for PianoKeyboard {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let Some(position) = cursor.position_in(bounds) {
            if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
                if let Some(midi) = self.key_from_pos(bounds.size(), position) {
                    return (event::Status::Captured, Some(Message::KeyPressed(midi)));
                }
            }
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let white_key_width = bounds.width / self.white_key_count() as f32;
        let black_key_width = white_key_width * 0.6;
        let black_key_height = bounds.height * 0.6;

        // Draw white keys
        let mut white_key_x = 0.0;
        for offset in 0..self.key_count() {
            let midi = FIRST_MIDI + offset;
            if PitchClass::from_index(midi).is_black() {
                continue;
            }

            frame.fill_rectangle(
                Point::new(white_key_x, 0.0),
                Size::new(white_key_width, bounds.height),
                Fill::from(self.key_color(midi, Color::WHITE)),
            );
            frame.stroke(
                &Path::rectangle(
                    Point::new(white_key_x, 0.0),
                    Size::new(white_key_width, bounds.height),
                ),
                Stroke::default().with_color(Color::BLACK),
            );
            if let Some(label) = self.label_for(midi) {
                frame.fill_text(canvas::Text {
                    content: label.to_string(),
                    position: Point::new(white_key_x + white_key_width / 2.0, bounds.height - 14.0),
                    color: Color::BLACK,
                    size: Pixels(12.0),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..canvas::Text::default()
                });
            }
            white_key_x += white_key_width;
        }

        // Draw black keys
        for (key_x, midi) in self.black_keys(white_key_width) {
            frame.fill_rectangle(
                Point::new(key_x, 0.0),
                Size::new(black_key_width, black_key_height),
                Fill::from(self.key_color(midi, Color::BLACK)),
            );
            if let Some(label) = self.label_for(midi) {
                frame.fill_text(canvas::Text {
                    content: label.to_string(),
                    position: Point::new(key_x + black_key_width / 2.0, black_key_height - 12.0),
                    color: Color::BLACK,
                    size: Pixels(10.0),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..canvas::Text::default()
                });
            }
        }

        vec![frame.into_geometry()]
    }
}
