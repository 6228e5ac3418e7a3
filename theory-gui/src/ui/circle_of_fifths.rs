//! # Circle of Fifths Widget
//!
//! Draws the twelve major keys around a circle with their relative minors on
//! an inner ring. The selected root is highlighted; clicking a key makes it
//! the root.

use iced::alignment;
use iced::widget::canvas::{self, event, Event, Fill, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Color, Element, Pixels, Point, Rectangle, Renderer, Theme, Vector};
use std::f32::consts::{FRAC_PI_2, TAU};
use theory_core::circle;
use theory_core::PitchClass;

use crate::Message;

const WIDGET_SIZE: f32 = 260.0;
const STEP: f32 = TAU / 12.0;

const SELECTED: Color = Color::from_rgb(0.2, 0.86, 0.6);
const MAJOR_FILL: Color = Color::from_rgb(0.22, 0.25, 0.30);
const MINOR_FILL: Color = Color::from_rgb(0.16, 0.18, 0.22);

#[derive(Debug, Clone)]
pub struct CircleOfFifths {
    selected: PitchClass,
}

impl CircleOfFifths {
    pub fn new(selected: PitchClass) -> Self {
        Self { selected }
    }

    pub fn view(self) -> Element<'static, Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fixed(WIDGET_SIZE))
                .height(iced::Length::Fixed(WIDGET_SIZE)),
        )
        .into()
    }
}

/// Angle of a circle position, C at the top, clockwise.
fn angle_of(position: usize) -> f32 {
    position as f32 * STEP - FRAC_PI_2
}

fn point_on(center: Point, radius: f32, position: usize) -> Point {
    let angle = angle_of(position);
    center + Vector::new(radius * angle.cos(), radius * angle.sin())
}

/// Key under `pos`, if it lands on either ring.
fn key_at(center: Point, radius: f32, pos: Point) -> Option<PitchClass> {
    let offset = pos - center;
    let distance = (offset.x * offset.x + offset.y * offset.y).sqrt();
    if distance < radius * 0.3 || distance > radius {
        return None;
    }
    let angle = offset.y.atan2(offset.x) + FRAC_PI_2;
    let position = (angle / STEP).round().rem_euclid(12.0) as usize % 12;
    Some(circle::circle_of_fifths()[position])
}

impl canvas::Program<Message> for CircleOfFifths {
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
                let size = bounds.size();
                let center = Point::new(size.width / 2.0, size.height / 2.0);
                let radius = size.width.min(size.height) / 2.0;
                if let Some(key) = key_at(center, radius, position) {
                    return (event::Status::Captured, Some(Message::CircleKeySelected(key)));
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
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0;

        frame.fill(&Path::circle(center, radius), Fill::from(MAJOR_FILL));
        frame.fill(&Path::circle(center, radius * 0.62), Fill::from(MINOR_FILL));
        frame.stroke(
            &Path::circle(center, radius * 0.62),
            Stroke::default().with_color(Color::from_rgb(0.4, 0.4, 0.4)),
        );

        for (position, key) in circle::circle_of_fifths().into_iter().enumerate() {
            let is_selected = key == self.selected;
            let major_point = point_on(center, radius * 0.8, position);
            let minor_point = point_on(center, radius * 0.45, position);

            if is_selected {
                frame.fill(&Path::circle(major_point, radius * 0.14), Fill::from(SELECTED));
            }

            frame.fill_text(canvas::Text {
                content: key.name().to_string(),
                position: major_point,
                color: if is_selected { Color::BLACK } else { Color::WHITE },
                size: Pixels(16.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
            frame.fill_text(canvas::Text {
                content: circle::relative_minor_name(key),
                position: minor_point,
                color: Color::from_rgb(0.75, 0.75, 0.75),
                size: Pixels(12.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
