//! # Control Surface Module
//!
//! Draws the trace and the drag anchor, and turns raw mouse and touch
//! events on the surface into drag messages.
//!
//! Chart coordinates are trace coordinates: x runs from `-half_width` to
//! `half_width` with the anchor on `x = 0`. Plotters puts y = 0 at the
//! bottom, so screen y values are flipped on the way in.

use crate::app::Message;
use crate::state::{ControlState, SURFACE_SIZE};
use iced::event::Status;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::Event;
use iced::{touch, Rectangle};
use plotters::chart::ChartBuilder;
use plotters::element::Circle;
use plotters::series::LineSeries;
use plotters::style::{Color, RGBColor, ShapeStyle, RED, WHITE};
use plotters_iced::{Chart, DrawingBackend};

const TRACE_COLOR: RGBColor = RGBColor(255, 192, 203);
const TRACE_WIDTH: u32 = 2;
const ANCHOR_RADIUS: i32 = 5;

pub struct TraceChart<'a> {
    pub state: &'a ControlState,
}

impl TraceChart<'_> {
    fn flip(y: f32) -> f32 {
        SURFACE_SIZE - y
    }

    /// `finger` is the touch driving the drag; other fingers are ignored
    fn drag_message(
        &self,
        finger: &mut Option<touch::Finger>,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<Message> {
        let dragging = self.state.dragging;

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.is_over(bounds).then_some(Message::DragStarted)
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if dragging => {
                Some(Message::DragEnded)
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if dragging => {
                match cursor.position_in(bounds) {
                    Some(position) => Some(Message::DragMoved(position.y)),
                    // Leaving the surface counts as a release
                    None => Some(Message::DragEnded),
                }
            }
            Event::Mouse(mouse::Event::CursorLeft) if dragging => Some(Message::DragEnded),
            Event::Touch(touch::Event::FingerPressed { id, position })
                if finger.is_none() && bounds.contains(position) =>
            {
                *finger = Some(id);
                Some(Message::DragStarted)
            }
            Event::Touch(touch::Event::FingerMoved { id, position })
                if dragging && *finger == Some(id) =>
            {
                if bounds.contains(position) {
                    Some(Message::DragMoved(position.y - bounds.y))
                } else {
                    *finger = None;
                    Some(Message::DragEnded)
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
            ) if *finger == Some(id) => {
                *finger = None;
                Some(Message::DragEnded)
            }
            _ => None,
        }
    }
}

impl Chart<Message> for TraceChart<'_> {
    /// Finger that started the current touch drag
    type State = Option<touch::Finger>;

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let half_width = self.state.trace.half_width();

        let mut chart = match builder
            .margin(0)
            .x_label_area_size(0)
            .y_label_area_size(0)
            .build_cartesian_2d(-half_width..half_width, 0f32..SURFACE_SIZE)
        {
            Ok(chart) => chart,
            Err(e) => {
                log::error!("Failed to build control surface: {:?}", e);
                return;
            }
        };

        if let Err(e) = chart.plotting_area().fill(&WHITE) {
            log::error!("Failed to clear control surface: {:?}", e);
            return;
        }

        let anchor = Circle::new((0f32, Self::flip(self.state.offset)), ANCHOR_RADIUS, RED.filled());
        if let Err(e) = chart.draw_series(std::iter::once(anchor)) {
            log::error!("Failed to draw anchor: {:?}", e);
        }

        let style = ShapeStyle {
            color: TRACE_COLOR.to_rgba(),
            filled: false,
            stroke_width: TRACE_WIDTH,
        };
        let points = self.state.trace.points().map(|p| (p.x, Self::flip(p.y)));
        if let Err(e) = chart.draw_series(LineSeries::new(points, style)) {
            log::error!("Failed to draw trace: {:?}", e);
        }
    }

    fn update(
        &self,
        finger: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (Status, Option<Message>) {
        match self.drag_message(finger, event, bounds, cursor) {
            Some(message) => (Status::Captured, Some(message)),
            None => (Status::Ignored, None),
        }
    }
}
