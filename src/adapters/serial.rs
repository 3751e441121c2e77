use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, WordleError};
use serialport::{SerialPort, SerialPortType};
use std::time::Duration;

/// ESP32-C3 內建 USB-serial 的 VID/PID
pub const DEFAULT_VID: u16 = 0x303a;
pub const DEFAULT_PID: u16 = 0x1001;
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCandidate {
    pub port_name: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
}

impl From<serialport::SerialPortInfo> for PortCandidate {
    fn from(info: serialport::SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                port_name: info.port_name,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
            },
            _ => Self {
                port_name: info.port_name,
                vid: None,
                pid: None,
            },
        }
    }
}

/// First USB port with a matching VID/PID. No match is an error, never a
/// fallback to some other port.
pub fn select_port(candidates: &[PortCandidate], vid: u16, pid: u16) -> Result<&PortCandidate> {
    candidates
        .iter()
        .find(|c| c.vid == Some(vid) && c.pid == Some(pid))
        .ok_or(WordleError::DeviceNotFound { vid, pid })
}

pub fn discover_port(vid: u16, pid: u16) -> Result<String> {
    let candidates: Vec<PortCandidate> = serialport::available_ports()?
        .into_iter()
        .map(PortCandidate::from)
        .collect();

    tracing::debug!("Found {} serial ports: {:?}", candidates.len(), candidates);

    let port = select_port(&candidates, vid, pid)?;
    Ok(port.port_name.clone())
}

/// 開啟 LED 矩陣的序列埠；沒有指定 port 時依 VID/PID 自動尋找
pub fn open_matrix<C: ConfigProvider>(config: &C) -> Result<Box<dyn SerialPort>> {
    let port_name = match config.device_port() {
        Some(port) => port.to_string(),
        None => discover_port(config.device_vid(), config.device_pid())?,
    };

    tracing::info!(
        "🔌 Opening LED matrix on {} at {} baud",
        port_name,
        config.baud_rate()
    );

    let port = serialport::new(&port_name, config.baud_rate())
        .timeout(WRITE_TIMEOUT)
        .open()?;

    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, ids: Option<(u16, u16)>) -> PortCandidate {
        PortCandidate {
            port_name: name.to_string(),
            vid: ids.map(|(vid, _)| vid),
            pid: ids.map(|(_, pid)| pid),
        }
    }

    #[test]
    fn test_select_port_matches_vid_and_pid() {
        let candidates = vec![
            candidate("/dev/ttyS0", None),
            candidate("/dev/ttyUSB0", Some((0x10c4, 0xea60))),
            candidate("/dev/ttyACM0", Some((DEFAULT_VID, DEFAULT_PID))),
        ];

        let port = select_port(&candidates, DEFAULT_VID, DEFAULT_PID).unwrap();
        assert_eq!(port.port_name, "/dev/ttyACM0");
    }

    #[test]
    fn test_select_port_without_match_is_error() {
        let candidates = vec![
            candidate("/dev/ttyUSB0", Some((0x10c4, 0xea60))),
            // 只有 VID 相同不算
            candidate("/dev/ttyACM1", Some((DEFAULT_VID, 0x0002))),
        ];

        assert!(matches!(
            select_port(&candidates, DEFAULT_VID, DEFAULT_PID),
            Err(WordleError::DeviceNotFound { vid: 0x303a, pid: 0x1001 })
        ));
        assert!(select_port(&[], DEFAULT_VID, DEFAULT_PID).is_err());
    }
}
