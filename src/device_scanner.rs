use crate::error::DiscoveryError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Opaque reference to a discovered Bluetooth peripheral
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub id: String,
    pub name: Option<String>,
}

impl DeviceHandle {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Label for the device list; `position` is the zero-based list index
    pub fn list_label(&self, position: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Device {}", position + 1),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Device")
    }
}

pub type DiscoveryFuture =
    Pin<Box<dyn Future<Output = Result<Vec<DeviceHandle>, DiscoveryError>> + Send>>;

/// Capability for finding nearby pairing-capable devices.
///
/// Every request accepts all devices; no filtering by name or service.
pub trait DeviceDiscovery: Send + Sync {
    fn discover(&self) -> DiscoveryFuture;
}

/// Discovery backed by the platform Bluetooth LE stack
pub struct BtleplugDiscovery {
    scan_duration: Duration,
}

impl BtleplugDiscovery {
    pub fn new(scan_duration: Duration) -> Self {
        Self { scan_duration }
    }
}

impl DeviceDiscovery for BtleplugDiscovery {
    fn discover(&self) -> DiscoveryFuture {
        Box::pin(scan_with_btleplug(self.scan_duration))
    }
}

async fn scan_with_btleplug(scan_duration: Duration) -> Result<Vec<DeviceHandle>, DiscoveryError> {
    use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
    use btleplug::platform::Manager;

    let manager = Manager::new()
        .await
        .map_err(|e| DiscoveryError::ManagerInit(e.to_string()))?;

    let adapters = manager
        .adapters()
        .await
        .map_err(|e| DiscoveryError::ManagerInit(e.to_string()))?;

    let central = adapters
        .into_iter()
        .next()
        .ok_or(DiscoveryError::NoAdapter)?;

    log::info!("Scanning for Bluetooth devices for {:?}", scan_duration);
    central
        .start_scan(ScanFilter::default())
        .await
        .map_err(|e| DiscoveryError::ScanFailed(format!("start: {}", e)))?;

    tokio::time::sleep(scan_duration).await;

    let peripherals = stop_then_collect(central.stop_scan(), central.peripherals()).await?;

    let mut devices = Vec::with_capacity(peripherals.len());
    for peripheral in peripherals {
        let name = match peripheral.properties().await {
            Ok(Some(props)) => props.local_name,
            Ok(None) => None,
            Err(e) => {
                log::debug!("No properties for {}: {}", peripheral.address(), e);
                None
            }
        };
        devices.push(DeviceHandle::new(peripheral.address().to_string(), name));
    }

    log::info!("Scan finished, {} device(s) found", devices.len());
    Ok(devices)
}

/// Runs `stop` then `collect`. A failed stop is only logged: whatever the
/// adapter heard before it is still a valid result.
async fn stop_then_collect<T, E, S, C>(stop: S, collect: C) -> Result<T, DiscoveryError>
where
    E: std::fmt::Display,
    S: Future<Output = Result<(), E>>,
    C: Future<Output = Result<T, E>>,
{
    if let Err(e) = stop.await {
        log::warn!("Failed to stop scan: {}", e);
    }

    collect
        .await
        .map_err(|e| DiscoveryError::ScanFailed(format!("list peripherals: {}", e)))
}
