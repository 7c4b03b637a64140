use crate::canvas::TraceChart;
use crate::config::Config;
use crate::device_scanner::{DeviceDiscovery, DeviceHandle};
use crate::error::DiscoveryError;
use crate::state::{Action, ControlState, SURFACE_SIZE};
use crate::ui::styles;
use iced::widget::{button, center, column, container, mouse_area, opaque, row, scrollable, stack, text};
use iced::keyboard;
use iced::{Element, Length, Subscription, Task};
use plotters_iced::ChartWidget;
use std::sync::Arc;
use std::time::Duration;

// Iced Application State
pub struct VibratorControl {
    pub state: ControlState,
    discovery: Arc<dyn DeviceDiscovery>,
    tick_interval: Duration,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    DragStarted,
    DragMoved(f32),
    DragEnded,
    ScanDevices,
    DevicesScanned(Result<Vec<DeviceHandle>, DiscoveryError>),
    SelectDevice(usize),
    OpenDialog,
    CloseDialog,
}

impl VibratorControl {
    /// Builds the application and issues the start-up discovery request
    pub fn new(config: Config, discovery: Arc<dyn DeviceDiscovery>) -> (Self, Task<Message>) {
        let mut app = VibratorControl {
            state: ControlState::new(config.deduplicate_devices),
            discovery,
            tick_interval: config.tick_interval(),
        };
        let task = app.start_scan();
        (app, task)
    }

    fn start_scan(&mut self) -> Task<Message> {
        self.state.apply(Action::ScanStarted);
        Task::perform(self.discovery.discover(), Message::DevicesScanned)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let action = match message {
            Message::Tick => Action::Tick,
            Message::DragStarted => Action::DragStarted,
            Message::DragMoved(y) => Action::DragMoved(y),
            Message::DragEnded => Action::DragEnded,
            Message::ScanDevices => {
                if self.state.scanning {
                    log::debug!("Scan already in progress");
                    return Task::none();
                }
                return self.start_scan();
            }
            Message::DevicesScanned(result) => Action::ScanFinished(result),
            Message::SelectDevice(position) => Action::SelectDevice(position),
            Message::OpenDialog => Action::OpenDialog,
            Message::CloseDialog => Action::CloseDialog,
        };
        self.state.apply(action);
        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let tick = iced::time::every(self.tick_interval).map(|_| Message::Tick);

        if self.state.dialog_open {
            Subscription::batch([tick, keyboard::on_key_press(close_on_escape)])
        } else {
            tick
        }
    }

    pub fn view(&'_ self) -> Element<'_, Message> {
        let base = self.create_main_view();

        if self.state.dialog_open {
            modal(base, self.create_device_dialog(), Message::CloseDialog)
        } else {
            base
        }
    }

    fn create_main_view(&self) -> Element<'_, Message> {
        let status = match &self.state.selected_device {
            Some(device) => format!("Connected to: {}", device.display_name()),
            None => "No device selected".to_string(),
        };

        let header = row![
            text(status).size(16).width(Length::Fill),
            button(text("Devices")).on_press(Message::OpenDialog).padding(8),
        ]
        .spacing(10)
        .align_y(iced::alignment::Vertical::Center);

        let surface = ChartWidget::new(TraceChart { state: &self.state })
            .width(Length::Fixed(SURFACE_SIZE))
            .height(Length::Fixed(SURFACE_SIZE));

        let content = column![header, container(surface).style(container::bordered_box)]
            .spacing(15)
            .padding(20)
            .width(Length::Fixed(SURFACE_SIZE + 40.0));

        center(content).into()
    }

    fn create_device_dialog(&self) -> Element<'_, Message> {
        let title = text("Available Bluetooth Devices").size(20);

        let device_list: Element<'_, Message> = if self.state.devices.is_empty() {
            text(if self.state.scanning {
                "Searching for devices..."
            } else {
                "No devices found."
            })
            .into()
        } else {
            let devices = self.state.devices.iter().enumerate().map(|(position, device)| {
                let is_selected = self.state.selected_device.as_ref() == Some(device);

                button(text(device.list_label(position)).size(14))
                    .on_press(Message::SelectDevice(position))
                    .width(Length::Fill)
                    .padding(10)
                    .style(styles::device_button_style(is_selected))
                    .into()
            });

            scrollable(column(devices).spacing(5)).into()
        };

        let mut body = column![title, device_list].spacing(12);

        if let Some(device) = &self.state.selected_device {
            body = body.push(text(format!("Connected to: {}", device.display_name())));
        }

        let scan_button = button(text(if self.state.scanning {
            "Scanning..."
        } else {
            "Scan again"
        }))
        .on_press_maybe((!self.state.scanning).then_some(Message::ScanDevices))
        .padding(10)
        .style(styles::scan_button_style());

        let close_button = button(text("Close"))
            .on_press(Message::CloseDialog)
            .padding(10);

        body = body.push(row![scan_button, close_button].spacing(10));

        container(body)
            .width(Length::Fixed(320.0))
            .padding(20)
            .style(container::bordered_box)
            .into()
    }
}

/// Escape dismisses the device dialog, like clicking the backdrop
fn close_on_escape(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDialog),
        _ => None,
    }
}

/// Layers `content` over `base` with a dimmed backdrop that emits `on_blur` when clicked
fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(styles::backdrop_style))
                .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_scanner::fake::FakeDiscovery;

    fn app_with(result: Result<Vec<DeviceHandle>, DiscoveryError>) -> VibratorControl {
        let discovery = Arc::new(FakeDiscovery { result });
        let (app, _task) = VibratorControl::new(Config::default(), discovery);
        app
    }

    #[test]
    fn test_startup_scans_with_dialog_open() {
        let app = app_with(Ok(Vec::new()));

        assert!(app.state.scanning);
        assert!(app.state.dialog_open);
        assert!(app.state.devices.is_empty());
        assert_eq!(app.state.offset, 200.0);
    }

    #[test]
    fn test_failed_scan_keeps_dialog_open() {
        let mut app = app_with(Err(DiscoveryError::NoAdapter));
        let _ = app.update(Message::DevicesScanned(Err(DiscoveryError::NoAdapter)));

        assert!(app.state.devices.is_empty());
        assert!(app.state.dialog_open);
        assert!(!app.state.scanning);
    }

    #[test]
    fn test_escape_closes_dialog() {
        let mut app = app_with(Ok(Vec::new()));
        let escape = keyboard::Key::Named(keyboard::key::Named::Escape);

        let message = close_on_escape(escape, keyboard::Modifiers::default());
        assert!(matches!(message, Some(Message::CloseDialog)));

        if let Some(message) = message {
            let _ = app.update(message);
        }
        assert!(!app.state.dialog_open);
    }

    #[test]
    fn test_other_keys_leave_dialog_open() {
        let enter = keyboard::Key::Named(keyboard::key::Named::Enter);
        let letter = keyboard::Key::Character("q".into());

        assert!(close_on_escape(enter, keyboard::Modifiers::default()).is_none());
        assert!(close_on_escape(letter, keyboard::Modifiers::SHIFT).is_none());
    }

    #[test]
    fn test_failed_rescan_keeps_devices_and_selection() {
        let found = vec![
            DeviceHandle::new("AA:BB", Some("Pulse".to_string())),
            DeviceHandle::new("CC:DD", None),
        ];
        let mut app = app_with(Ok(found.clone()));
        let _ = app.update(Message::DevicesScanned(Ok(found.clone())));
        let _ = app.update(Message::SelectDevice(0));
        let _ = app.update(Message::OpenDialog);
        let _ = app.update(Message::ScanDevices);
        let _ = app.update(Message::DevicesScanned(Err(DiscoveryError::ScanFailed(
            "timeout".to_string(),
        ))));

        assert_eq!(app.state.devices, found);
        assert_eq!(app.state.selected_device, Some(found[0].clone()));
        assert!(app.state.dialog_open);
    }

    #[test]
    fn test_select_after_scan() {
        let found = vec![DeviceHandle::new("AA:BB", Some("Pulse".to_string()))];
        let mut app = app_with(Ok(found.clone()));
        let _ = app.update(Message::DevicesScanned(Ok(found)));
        let _ = app.update(Message::SelectDevice(0));

        assert!(!app.state.dialog_open);
        assert_eq!(app.state.selected_device.as_ref().map(|d| d.id.as_str()), Some("AA:BB"));
    }

    #[test]
    fn test_rescan_ignored_while_scanning() {
        let mut app = app_with(Ok(Vec::new()));
        let _ = app.update(Message::ScanDevices);
        assert!(app.state.scanning);

        let _ = app.update(Message::DevicesScanned(Ok(Vec::new())));
        assert!(!app.state.scanning);
        let _ = app.update(Message::ScanDevices);
        assert!(app.state.scanning);
    }

    #[test]
    fn test_drag_messages_drive_trace() {
        let mut app = app_with(Ok(Vec::new()));
        let _ = app.update(Message::DragStarted);
        let _ = app.update(Message::DragMoved(42.0));
        let _ = app.update(Message::DragEnded);
        let _ = app.update(Message::Tick);

        assert_eq!(app.state.trace.points().next().map(|p| p.y), Some(42.0));
    }
}
