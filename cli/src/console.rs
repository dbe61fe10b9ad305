//! Stdin / stdout adapters for the kiosk.

use async_trait::async_trait;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use parkit::application::{InputSource, NotificationSink, Notice};
use parkit::domain::{DomainResult, VehicleCategory};
use parkit::{DomainError, SharedEventBus};

/// Line-oriented operator input shared by the menu and the services.
pub struct ConsoleInput {
    reader: Mutex<BufReader<Stdin>>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self {
            reader: Mutex::new(BufReader::new(stdin())),
        }
    }

    /// Next trimmed line, `None` at end of input.
    pub async fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn answer(&self) -> DomainResult<String> {
        match self.read_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(DomainError::InvalidInput("input closed".to_string())),
            Err(e) => Err(DomainError::InvalidInput(e.to_string())),
        }
    }
}

#[async_trait]
impl InputSource for ConsoleInput {
    async fn read_vehicle_category(&self) -> DomainResult<VehicleCategory> {
        println!("Please select vehicle type to park:");
        println!("1 CAR");
        println!("2 BIKE");
        let line = self.answer().await?;
        let selection: u32 = line
            .parse()
            .map_err(|_| DomainError::InvalidInput(format!("'{}' is not a menu number", line)))?;
        VehicleCategory::from_selection(selection)
    }

    async fn read_vehicle_registration_number(&self) -> DomainResult<String> {
        println!("Please type the vehicle registration number and press enter key");
        self.answer().await
    }
}

/// Prints notices for the driver and mirrors them onto the event bus.
pub struct ConsoleSink {
    event_bus: SharedEventBus,
}

impl ConsoleSink {
    pub fn new(event_bus: SharedEventBus) -> Self {
        Self { event_bus }
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: &Notice) {
        println!("{}", notice);
        self.event_bus.notify(notice);
    }
}
