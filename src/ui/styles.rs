//! # UI Styling Module
//!
//! Button and container styles shared by the main view and the device dialog.

use iced::widget::{button, container};
use iced::{Background, Border, Color};

fn solid(background: Color, border: Color, width: f32, text_color: Color) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border,
            width,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Style for device list entries based on selection state
pub fn device_button_style(is_selected: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme: &iced::Theme, status: button::Status| {
        // Selected entries are teal, others neutral gray
        let (base, border, width) = if is_selected {
            ((0.2, 0.6, 0.7), (0.3, 0.7, 0.8), 2.0)
        } else {
            ((0.4, 0.4, 0.4), (0.5, 0.5, 0.5), 1.0)
        };
        let shade = match status {
            button::Status::Active => 0.0,
            button::Status::Hovered => 0.1,
            button::Status::Pressed => -0.05,
            button::Status::Disabled => {
                return solid(
                    Color::from_rgb(0.3, 0.3, 0.3),
                    Color::from_rgb(0.4, 0.4, 0.4),
                    1.0,
                    Color::from_rgb(0.6, 0.6, 0.6),
                );
            }
        };

        solid(
            Color::from_rgb(base.0 + shade, base.1 + shade, base.2 + shade),
            Color::from_rgb(border.0 + shade, border.1 + shade, border.2 + shade),
            width,
            Color::WHITE,
        )
    }
}

/// Style for the scan button (green theme)
pub fn scan_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    |theme: &iced::Theme, status: button::Status| match status {
        button::Status::Active => solid(
            Color::from_rgb(0.2, 0.7, 0.2),
            Color::from_rgb(0.3, 0.8, 0.3),
            1.0,
            Color::WHITE,
        ),
        button::Status::Hovered => solid(
            Color::from_rgb(0.3, 0.8, 0.3),
            Color::from_rgb(0.4, 0.9, 0.4),
            1.0,
            Color::WHITE,
        ),
        button::Status::Pressed => solid(
            Color::from_rgb(0.15, 0.6, 0.15),
            Color::from_rgb(0.2, 0.7, 0.2),
            1.0,
            Color::WHITE,
        ),
        button::Status::Disabled => button::secondary(theme, status),
    }
}

/// Dimmed backdrop behind the device dialog
pub fn backdrop_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.75,
            ..Color::BLACK
        })),
        ..container::Style::default()
    }
}
