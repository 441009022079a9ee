//! Outbound OSC: label sync for the joint-name display and the matrix-name
//! announcement consumers bind to.

use anyhow::Result;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::UdpSocket;

use crate::registry::LabelUpdate;

/// Default UI/consumer endpoint.
pub const UI_DEFAULT_ADDR: &str = "127.0.0.1:7001";

/// Label sync. Args: column (always 0), row, "index: name" label.
pub const LABEL_ADDR: &str = "/kinect/label";
/// Matrix handle announcement. Args: matrix name.
pub const MATRIX_ADDR: &str = "/kinect/matrix";

pub fn build_label_message(update: &LabelUpdate) -> OscMessage {
    OscMessage {
        addr: LABEL_ADDR.to_string(),
        args: vec![
            OscType::Int(0), // column
            OscType::Int(update.row as i32),
            OscType::String(update.label.clone()),
        ],
    }
}

pub fn build_matrix_message(name: &str) -> OscMessage {
    OscMessage {
        addr: MATRIX_ADDR.to_string(),
        args: vec![OscType::String(name.to_string())],
    }
}

pub fn encode_message(msg: &OscMessage) -> Result<Vec<u8>> {
    let packet = OscPacket::Message(msg.clone());
    let encoded = encoder::encode(&packet)?;
    Ok(encoded)
}

/// UDP client for the display/consumer side.
pub struct UiClient {
    socket: UdpSocket,
    target_addr: String,
}

impl UiClient {
    pub fn new(target_addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            socket,
            target_addr: target_addr.to_string(),
        })
    }

    /// Default endpoint (127.0.0.1:7001).
    pub fn default() -> Result<Self> {
        Self::new(UI_DEFAULT_ADDR)
    }

    pub fn send_label(&self, update: &LabelUpdate) -> Result<()> {
        self.send(&build_label_message(update))
    }

    pub fn send_matrix_name(&self, name: &str) -> Result<()> {
        self.send(&build_matrix_message(name))
    }

    fn send(&self, msg: &OscMessage) -> Result<()> {
        let data = encode_message(msg)?;
        self.socket.send_to(&data, &self.target_addr)?;
        Ok(())
    }
}
