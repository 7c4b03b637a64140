//! # Control State Module
//!
//! The view-model behind the control surface and the device dialog.
//!
//! All mutation goes through [`ControlState::apply`], one [`Action`] at a
//! time. Nothing here reads a clock or talks to Bluetooth: ticks and
//! discovery results arrive as actions, which keeps every behaviour
//! reproducible in tests.

use crate::device_scanner::DeviceHandle;
use crate::error::DiscoveryError;
use crate::trace::Trace;

/// Edge length of the square drawing surface in pixels
pub const SURFACE_SIZE: f32 = 400.0;

/// Offset before the first drag: the vertical midpoint of the surface
pub const DEFAULT_OFFSET: f32 = SURFACE_SIZE / 2.0;

#[derive(Debug, Clone)]
pub enum Action {
    Tick,
    DragStarted,
    /// Pointer position relative to the surface's top edge
    DragMoved(f32),
    DragEnded,
    ScanStarted,
    ScanFinished(Result<Vec<DeviceHandle>, DiscoveryError>),
    /// Zero-based position in the device list
    SelectDevice(usize),
    OpenDialog,
    CloseDialog,
}

#[derive(Debug, Clone)]
pub struct ControlState {
    pub trace: Trace,
    pub offset: f32,
    pub dragging: bool,
    pub devices: Vec<DeviceHandle>,
    pub selected_device: Option<DeviceHandle>,
    pub dialog_open: bool,
    pub scanning: bool,
    deduplicate_devices: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ControlState {
    pub fn new(deduplicate_devices: bool) -> Self {
        Self {
            trace: Trace::new(SURFACE_SIZE),
            offset: DEFAULT_OFFSET,
            dragging: false,
            devices: Vec::new(),
            selected_device: None,
            dialog_open: true,
            scanning: false,
            deduplicate_devices,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Tick => self.trace.advance(self.offset),
            Action::DragStarted => self.dragging = true,
            Action::DragMoved(y) => {
                if self.dragging {
                    self.offset = y;
                }
            }
            Action::DragEnded => self.dragging = false,
            Action::ScanStarted => self.scanning = true,
            Action::ScanFinished(result) => {
                self.scanning = false;
                match result {
                    Ok(found) => self.append_devices(found),
                    Err(e) => log::error!("Error accessing Bluetooth devices: {}", e),
                }
            }
            Action::SelectDevice(position) => match self.devices.get(position) {
                Some(device) => {
                    log::info!("Selected device {} ({})", device.display_name(), device.id);
                    self.selected_device = Some(device.clone());
                    self.dialog_open = false;
                }
                None => log::warn!("Ignoring selection of unknown device #{}", position),
            },
            Action::OpenDialog => self.dialog_open = true,
            Action::CloseDialog => self.dialog_open = false,
        }
    }

    fn append_devices(&mut self, found: Vec<DeviceHandle>) {
        if !self.deduplicate_devices {
            self.devices.extend(found);
            return;
        }

        for device in found {
            if self.devices.iter().any(|known| known.id == device.id) {
                log::debug!("Skipping already listed device {}", device.id);
                continue;
            }
            self.devices.push(device);
        }
    }
}
