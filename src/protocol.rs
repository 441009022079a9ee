//! Inbound OSC protocol: address space, sample record, message decoding.
//!
//! Everything a sender can say is decoded here, once, into `InboundMessage`;
//! the daemon only ever switches over the enum.

use anyhow::{bail, Result};
use rosc::{OscMessage, OscType};

/// Skeleton sample:
/// userId jointName posX posY posZ confidence quatX quatY quatZ quatW
pub const SKELETON_ADDR: &str = "/kinect/skel";
/// Joint registration: jointName jointIndex
pub const JOINT_NAME_ADDR: &str = "/kinect/joint_name";
pub const NUM_USERS_ADDR: &str = "/kinect/num_users";
pub const NUM_JOINTS_ADDR: &str = "/kinect/num_joints";
pub const NUM_FEATURES_ADDR: &str = "/kinect/num_features";
pub const OVERRIDE_USER_ADDR: &str = "/kinect/override_user_id";
pub const VERBOSE_ADDR: &str = "/kinect/verbose";
/// No payload; asks the daemon to announce the matrix name.
pub const ANNOUNCE_ADDR: &str = "/kinect/announce";

/// One raw skeleton-tracking record, exactly as it arrives on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonSample {
    pub user_id: i32,
    pub joint_name: String,
    pub position: [f32; 3],
    pub confidence: f32,
    /// Orientation quaternion (x, y, z, w)
    pub rotation: [f32; 4],
}

/// Closed set of messages the receiver understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Skeleton(SkeletonSample),
    JointName { name: String, index: i32 },
    NumUsers(usize),
    NumJoints(usize),
    NumFeatures(usize),
    OverrideUserId(i32),
    Verbose(bool),
    Announce,
}

/// Decode one OSC message. `Ok(None)` means the address is not ours and the
/// message should be ignored; malformed args on a known address are an error.
pub fn decode_message(msg: &OscMessage) -> Result<Option<InboundMessage>> {
    let decoded = match msg.addr.as_str() {
        SKELETON_ADDR => InboundMessage::Skeleton(decode_skeleton(&msg.args)?),
        JOINT_NAME_ADDR => InboundMessage::JointName {
            name: string_arg(&msg.args, 0)?,
            index: int_arg(&msg.args, 1)?,
        },
        NUM_USERS_ADDR => InboundMessage::NumUsers(extent_arg(&msg.args)?),
        NUM_JOINTS_ADDR => InboundMessage::NumJoints(extent_arg(&msg.args)?),
        NUM_FEATURES_ADDR => InboundMessage::NumFeatures(extent_arg(&msg.args)?),
        OVERRIDE_USER_ADDR => InboundMessage::OverrideUserId(int_arg(&msg.args, 0)?),
        VERBOSE_ADDR => InboundMessage::Verbose(bool_arg(&msg.args, 0)?),
        ANNOUNCE_ADDR => InboundMessage::Announce,
        _ => return Ok(None),
    };
    Ok(Some(decoded))
}

fn decode_skeleton(args: &[OscType]) -> Result<SkeletonSample> {
    if args.len() < 10 {
        bail!("skeleton message needs 10 args, got {}", args.len());
    }
    Ok(SkeletonSample {
        user_id: int_arg(args, 0)?,
        joint_name: string_arg(args, 1)?,
        position: [
            float_arg(args, 2)?,
            float_arg(args, 3)?,
            float_arg(args, 4)?,
        ],
        confidence: float_arg(args, 5)?,
        rotation: [
            float_arg(args, 6)?,
            float_arg(args, 7)?,
            float_arg(args, 8)?,
            float_arg(args, 9)?,
        ],
    })
}

// Numeric args coerce between the OSC number types: senders routinely emit
// floats where ints are expected and the other way around.

fn int_arg(args: &[OscType], index: usize) -> Result<i32> {
    match args.get(index) {
        Some(OscType::Int(v)) => Ok(*v),
        Some(OscType::Long(v)) => Ok(*v as i32),
        Some(OscType::Float(v)) => Ok(*v as i32),
        Some(OscType::Double(v)) => Ok(*v as i32),
        other => bail!("arg {}: expected int, got {:?}", index, other),
    }
}

fn float_arg(args: &[OscType], index: usize) -> Result<f32> {
    match args.get(index) {
        Some(OscType::Float(v)) => Ok(*v),
        Some(OscType::Double(v)) => Ok(*v as f32),
        Some(OscType::Int(v)) => Ok(*v as f32),
        Some(OscType::Long(v)) => Ok(*v as f32),
        other => bail!("arg {}: expected float, got {:?}", index, other),
    }
}

fn string_arg(args: &[OscType], index: usize) -> Result<String> {
    match args.get(index) {
        Some(OscType::String(s)) => Ok(s.clone()),
        other => bail!("arg {}: expected string, got {:?}", index, other),
    }
}

fn bool_arg(args: &[OscType], index: usize) -> Result<bool> {
    match args.get(index) {
        Some(OscType::Bool(b)) => Ok(*b),
        _ => Ok(int_arg(args, index)? != 0),
    }
}

/// Matrix extents come in as ints but live as usize; negatives are refused.
fn extent_arg(args: &[OscType]) -> Result<usize> {
    let v = int_arg(args, 0)?;
    if v < 0 {
        bail!("extent must be non-negative, got {}", v);
    }
    Ok(v as usize)
}
