use anyhow::Result;
use rosc::{OscBundle, OscMessage, OscPacket};
use std::net::UdpSocket;

use kinect2_receiver::config::Config;
use kinect2_receiver::protocol::{decode_message, InboundMessage};
use kinect2_receiver::receiver::SkeletonReceiver;
use kinect2_receiver::registry::JointRegistry;
use kinect2_receiver::ui::UiClient;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!(
        "Kinect2 Receiver v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_VERSION")
    );
    println!("Listen: {}", config.osc.listen_addr);
    println!("UI target: {}", config.osc.ui_addr);
    if config.receiver.override_user_id >= 0 {
        println!("Override user id: {}", config.receiver.override_user_id);
    }
    println!();

    let socket = UdpSocket::bind(&config.osc.listen_addr)?;
    let ui = UiClient::new(&config.osc.ui_addr)?;
    let mut registry = JointRegistry::new();
    let mut receiver = SkeletonReceiver::from_config(&config.receiver);
    log_shape(&receiver);

    let mut buf = [0u8; rosc::decoder::MTU];
    loop {
        let len = match socket.recv_from(&mut buf) {
            Ok((len, _peer)) => len,
            Err(e) => {
                eprintln!("recv: {}", e);
                continue;
            }
        };
        match rosc::decoder::decode_udp(&buf[..len]) {
            Ok((_rest, packet)) => handle_packet(packet, &mut registry, &mut receiver, &ui),
            Err(e) => eprintln!("osc decode: {:?}", e),
        }
    }
}

fn handle_packet(
    packet: OscPacket,
    registry: &mut JointRegistry,
    receiver: &mut SkeletonReceiver,
    ui: &UiClient,
) {
    match packet {
        OscPacket::Message(msg) => handle_message(&msg, registry, receiver, ui),
        OscPacket::Bundle(OscBundle { content, .. }) => {
            for inner in content {
                handle_packet(inner, registry, receiver, ui);
            }
        }
    }
}

// One message fully handled before the next; every error path drops the
// message and keeps the stream alive.
fn handle_message(
    msg: &OscMessage,
    registry: &mut JointRegistry,
    receiver: &mut SkeletonReceiver,
    ui: &UiClient,
) {
    if receiver.verbose() {
        println!("recv {} {:?}", msg.addr, msg.args);
    }

    let decoded = match decode_message(msg) {
        Ok(Some(decoded)) => decoded,
        Ok(None) => return, // not ours
        Err(e) => {
            eprintln!("{}: {}", msg.addr, e);
            return;
        }
    };

    match decoded {
        InboundMessage::Skeleton(sample) => {
            if let Err(e) = receiver.ingest(registry, &sample) {
                eprintln!("skel: {}", e);
            }
        }
        InboundMessage::JointName { name, index } => {
            println!("joint {} -> {}", name, index);
            if index < 0 {
                eprintln!("joint_name: negative index {} for {}", index, name);
                return;
            }
            let update = registry.register(&name, index as usize);
            if let Err(e) = ui.send_label(&update) {
                eprintln!("label send: {}", e);
            }
        }
        InboundMessage::NumUsers(n) => {
            receiver.set_num_users(n);
            if receiver.verbose() {
                log_shape(receiver);
            }
        }
        InboundMessage::NumJoints(n) => {
            receiver.set_num_joints(n);
            if receiver.verbose() {
                log_shape(receiver);
            }
        }
        InboundMessage::NumFeatures(n) => {
            receiver.set_num_features(n);
            if receiver.verbose() {
                log_shape(receiver);
            }
        }
        InboundMessage::OverrideUserId(id) => {
            receiver.set_override_user_id(id);
            if receiver.verbose() {
                println!("override_user_id = {}", id);
            }
        }
        InboundMessage::Verbose(v) => {
            receiver.set_verbose(v);
            println!("verbose = {}", v);
        }
        InboundMessage::Announce => {
            if let Err(e) = ui.send_matrix_name(receiver.matrix().name()) {
                eprintln!("announce: {}", e);
            }
        }
    }
}

fn log_shape(receiver: &SkeletonReceiver) {
    let m = receiver.matrix();
    println!(
        "matrix {}: {} users x {} joints x {} features",
        m.name(),
        m.num_users(),
        m.num_joints(),
        m.num_features()
    );
}
