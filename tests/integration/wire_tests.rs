//! End to end: JSON text → service → HID reports.

use crate::mock_hw::{MockClock, LogSink};

use embedded_hal::delay::DelayNs;
use scrollpilot::adapters::hid::{HidAdapter, HidTransport, KeyboardReport, MouseReport};
use scrollpilot::adapters::json_commands::{decode_command, snapshot_json};
use scrollpilot::app::events::AppEvent;
use scrollpilot::app::service::AppService;
use scrollpilot::config::DeviceConfig;
use scrollpilot::error::HidError;
use scrollpilot::queue::CommandQueue;

#[derive(Default)]
struct Capture {
    mouse: Vec<[u8; 4]>,
    keyboard: Vec<[u8; 8]>,
}

impl HidTransport for Capture {
    fn send_mouse(&mut self, report: &MouseReport) -> Result<(), HidError> {
        self.mouse.push(report.to_bytes());
        Ok(())
    }

    fn send_keyboard(&mut self, report: &KeyboardReport) -> Result<(), HidError> {
        self.keyboard.push(report.to_bytes());
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn run(messages: &[&str]) -> (HidAdapter<Capture, NoDelay>, LogSink) {
    let clock = MockClock::at(0);
    let mut hid = HidAdapter::new(Capture::default(), NoDelay);
    let mut sink = LogSink::new();
    let mut app = AppService::new(DeviceConfig::default(), 7);
    let mut queue = CommandQueue::new();

    for msg in messages {
        if let Ok(cmd) = decode_command(msg) {
            queue.push(cmd);
        }
    }
    queue.drain(|cmd| app.dispatch(cmd, &clock, &mut hid, &mut sink));
    (hid, sink)
}

#[test]
fn scroll_and_click_become_mouse_reports() {
    let (hid, _) = run(&[
        r#"{"type":"scroll","steps":-1}"#,
        r#"{"type":"click","button":2}"#,
    ]);
    assert_eq!(
        hid.transport().mouse,
        vec![[0, 0, 0, 0xFF], [2, 0, 0, 0], [0, 0, 0, 0]]
    );
}

#[test]
fn shifted_key_becomes_keyboard_reports() {
    let (hid, _) = run(&[r#"{"type":"key","key":"1","shift":true}"#]);
    assert_eq!(
        hid.transport().keyboard,
        vec![
            [0x02, 0, 0, 0, 0, 0, 0, 0],
            [0x02, 0, 0x1E, 0, 0, 0, 0, 0],
            [0x02, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
        ]
    );
}

#[test]
fn malformed_messages_are_dropped_in_order() {
    let (hid, sink) = run(&[
        "garbage",
        r#"{"type":"simulation","active":true,"speed":3}"#,
        r#"{"type":"warp"}"#,
        r#"{"type":"simulation","cmd":"get"}"#,
    ]);
    assert!(hid.transport().mouse.is_empty());
    let Some(AppEvent::SnapshotRequested(snapshot)) = sink.last() else {
        panic!("expected snapshot reply");
    };
    assert_eq!(
        snapshot_json(*snapshot),
        r#"{"type":"simulation","active":true,"speed":3}"#
    );
}
