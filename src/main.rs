//! ScrollPilot Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HidAdapter<Uart>  LogEventSink   Esp32Time   ButtonDriver     │
//! │  (ActuatorPort)    (EventSink)    (Clock)     (TapSource)      │
//! │  ConsoleCommandSource (CommandSource, JSON lines on stdin)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Dispatch · Toggle guard · Scroll simulation           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, SyncSender};

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use log::info;

use scrollpilot::adapters::device_id::{device_id, hardware_id, read_mac};
use scrollpilot::adapters::hid::{HidAdapter, UartHidTransport};
use scrollpilot::adapters::json_commands::decode_command;
use scrollpilot::adapters::log_sink::LogEventSink;
use scrollpilot::adapters::time::Esp32TimeAdapter;
use scrollpilot::app::commands::Command;
use scrollpilot::app::ports::{Clock, CommandSource, TapSource};
use scrollpilot::app::service::AppService;
use scrollpilot::config::DeviceConfig;
use scrollpilot::drivers::button::ButtonDriver;
use scrollpilot::error::Error;
use scrollpilot::queue::{CommandQueue, COMMAND_QUEUE_CAP};

const HID_BRIDGE_BAUD: u32 = 115_200;
const CONSOLE_TASK_STACK: usize = 8 * 1024;

// ── Console command source ────────────────────────────────────
//
// A reader thread decodes JSON lines from the serial console and hands
// them to the control loop through a bounded channel. The network
// transport feeds the same channel.

struct ConsoleCommandSource {
    rx: Receiver<Command>,
}

impl ConsoleCommandSource {
    fn spawn() -> Result<Self> {
        let (tx, rx) = mpsc::sync_channel(COMMAND_QUEUE_CAP);
        std::thread::Builder::new()
            .name("console".into())
            .stack_size(CONSOLE_TASK_STACK)
            .spawn(move || read_console(&tx))?;
        Ok(Self { rx })
    }
}

fn read_console(tx: &SyncSender<Command>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { continue };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Decode failures are already logged by the adapter.
        if let Ok(cmd) = decode_command(line) {
            if tx.send(cmd).is_err() {
                return;
            }
        }
    }
}

impl CommandSource for ConsoleCommandSource {
    fn poll(&mut self, queue: &mut CommandQueue) {
        // Leave surplus in the channel; the reader blocks until there is room.
        while queue.len() < COMMAND_QUEUE_CAP {
            let Ok(cmd) = self.rx.try_recv() else { break };
            queue.push(cmd);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let mac = read_mac();
    info!("╔══════════════════════════════════════╗");
    info!("║  ScrollPilot v{}  {}          ║", env!("CARGO_PKG_VERSION"), device_id(&mac));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let mut button_pin =
        PinDriver::input(peripherals.pins.gpio0).map_err(|_| Error::Init("button gpio0"))?;
    button_pin
        .set_pull(Pull::Up)
        .map_err(|_| Error::Init("button pull-up"))?;
    let mut button = ButtonDriver::new(button_pin);

    let uart_config = uart::config::Config::new().baudrate(Hertz(HID_BRIDGE_BAUD));
    let hid_uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )
    .map_err(|_| Error::Init("hid uart1"))?;
    let mut hid = HidAdapter::new(UartHidTransport::new(hid_uart), FreeRtos);

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut log_sink = LogEventSink::new();
    let mut commands = ConsoleCommandSource::spawn()?;
    let mut queue = CommandQueue::new();

    // ── 4. Application core ───────────────────────────────────
    // Settings persistence is handled outside the firmware; boot uses defaults.
    let mut app = AppService::new(DeviceConfig::default(), hardware_id(&mac));
    app.start(&mut log_sink);

    // ── 5. Control loop ───────────────────────────────────────
    info!("Entering control loop");
    loop {
        commands.poll(&mut queue);
        queue.drain(|cmd| app.dispatch(cmd, &clock, &mut hid, &mut log_sink));

        if button.poll_tap(clock.now_ms()) {
            app.on_button_tap(&clock, &mut log_sink);
        }

        app.tick(&clock, &mut hid, &mut log_sink);

        FreeRtos::delay_ms(app.settings().loop_interval_ms);
    }
}
