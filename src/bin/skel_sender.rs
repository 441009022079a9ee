//! Interactive sender for exercising the receiver daemon by hand.
//! Stands in for a real tracking source: registers joint names, emits
//! skeleton samples and config changes, triggers the announce.

use anyhow::Result;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::io::{self, Write};
use std::net::UdpSocket;

use kinect2_receiver::protocol::{
    ANNOUNCE_ADDR, JOINT_NAME_ADDR, NUM_JOINTS_ADDR, NUM_USERS_ADDR, OVERRIDE_USER_ADDR,
    SKELETON_ADDR, VERBOSE_ADDR,
};

const DEFAULT_TARGET: &str = "127.0.0.1:7000";

fn main() -> Result<()> {
    let target = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_TARGET.to_string());
    let socket = UdpSocket::bind("0.0.0.0:0")?;

    println!("=== Skeleton Sender ===");
    println!("Target: {}", target);
    println!();
    println!("Commands:");
    println!("  j name index              - register a joint name");
    println!("  s user name x y z         - sample, identity rotation, confidence 1");
    println!("  f user name x y z c qx qy qz qw - full sample");
    println!("  u n                       - set num_users");
    println!("  n n                       - set num_joints");
    println!("  o id                      - override user id (negative disables)");
    println!("  v 0|1                     - verbose");
    println!("  a                         - announce matrix");
    println!("  q                         - quit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        let result = match parts[0] {
            "j" if parts.len() == 3 => send(
                &socket,
                &target,
                JOINT_NAME_ADDR,
                vec![
                    OscType::String(parts[1].to_string()),
                    OscType::Int(parts[2].parse()?),
                ],
            ),
            "s" if parts.len() == 6 => {
                let mut args = sample_args(parts[1].parse()?, parts[2], [
                    parts[3].parse()?,
                    parts[4].parse()?,
                    parts[5].parse()?,
                ]);
                args.extend([
                    OscType::Float(1.0), // confidence
                    OscType::Float(0.0),
                    OscType::Float(0.0),
                    OscType::Float(0.0),
                    OscType::Float(1.0),
                ]);
                send(&socket, &target, SKELETON_ADDR, args)
            }
            "f" if parts.len() == 11 => {
                let mut args = sample_args(parts[1].parse()?, parts[2], [
                    parts[3].parse()?,
                    parts[4].parse()?,
                    parts[5].parse()?,
                ]);
                for p in &parts[6..11] {
                    args.push(OscType::Float(p.parse()?));
                }
                send(&socket, &target, SKELETON_ADDR, args)
            }
            "u" if parts.len() == 2 => send(
                &socket,
                &target,
                NUM_USERS_ADDR,
                vec![OscType::Int(parts[1].parse()?)],
            ),
            "n" if parts.len() == 2 => send(
                &socket,
                &target,
                NUM_JOINTS_ADDR,
                vec![OscType::Int(parts[1].parse()?)],
            ),
            "o" if parts.len() == 2 => send(
                &socket,
                &target,
                OVERRIDE_USER_ADDR,
                vec![OscType::Int(parts[1].parse()?)],
            ),
            "v" if parts.len() == 2 => send(
                &socket,
                &target,
                VERBOSE_ADDR,
                vec![OscType::Int(parts[1].parse()?)],
            ),
            "a" => send(&socket, &target, ANNOUNCE_ADDR, vec![]),
            "q" => break,
            _ => {
                println!("unknown command: {}", parts[0]);
                continue;
            }
        };

        match result {
            Ok(()) => println!("sent"),
            Err(e) => eprintln!("send failed: {}", e),
        }
    }

    Ok(())
}

/// The leading userId/name/position args shared by both sample commands.
fn sample_args(user: i32, name: &str, pos: [f32; 3]) -> Vec<OscType> {
    vec![
        OscType::Int(user),
        OscType::String(name.to_string()),
        OscType::Float(pos[0]),
        OscType::Float(pos[1]),
        OscType::Float(pos[2]),
    ]
}

fn send(socket: &UdpSocket, target: &str, addr: &str, args: Vec<OscType>) -> Result<()> {
    let msg = OscMessage {
        addr: addr.to_string(),
        args,
    };
    let data = encoder::encode(&OscPacket::Message(msg))?;
    socket.send_to(&data, target)?;
    Ok(())
}
