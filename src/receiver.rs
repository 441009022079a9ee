use std::fmt;

use crate::config::ReceiverConfig;
use crate::euler::quat_to_euler;
use crate::matrix::UserMatrix;
use crate::protocol::SkeletonSample;
use crate::registry::JointRegistry;

/// Feature columns per joint row:
/// confidence, posX, posY, posZ, quatX, quatY, quatZ, quatW,
/// yawDeg, pitchDeg, rollDeg.
pub const FEATURE_COUNT: usize = 11;

/// Per-sample failures. All recoverable: the sample is dropped with a
/// diagnostic and the stream goes on.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    UnknownJoint(String),
    UserIdOutOfRange(i32),
    JointIndexOutOfRange { joint: String, index: usize },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownJoint(name) => write!(f, "unknown joint {}", name),
            Self::UserIdOutOfRange(id) => write!(f, "user id out of range: {}", id),
            Self::JointIndexOutOfRange { joint, index } => {
                write!(f, "joint {} index {} exceeds matrix rows", joint, index)
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Packs skeleton samples into the user matrix.
///
/// Owns the matrix and its shape; the joint registry is a borrowed
/// dependency of `ingest`, not owned. Single-writer by design: one sample is
/// fully processed before the next, and a shape change never races a write.
#[derive(Debug)]
pub struct SkeletonReceiver {
    num_users: usize,
    num_joints: usize,
    num_features: usize,
    matrix: UserMatrix,
    override_user_id: i32,
    verbose: bool,
}

impl SkeletonReceiver {
    pub fn new(matrix_name: &str, num_users: usize, num_joints: usize, num_features: usize) -> Self {
        Self {
            num_users,
            num_joints,
            num_features,
            matrix: UserMatrix::new(matrix_name, num_users, num_joints, num_features),
            override_user_id: -1,
            verbose: false,
        }
    }

    pub fn from_config(config: &ReceiverConfig) -> Self {
        let mut receiver = Self::new(
            &config.matrix_name,
            config.num_users,
            config.num_joints,
            config.num_features,
        );
        receiver.override_user_id = config.override_user_id;
        receiver.verbose = config.verbose;
        receiver
    }

    pub fn matrix(&self) -> &UserMatrix {
        &self.matrix
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn override_user_id(&self) -> i32 {
        self.override_user_id
    }

    /// Non-negative forces every sample onto that user plane; negative uses
    /// the id carried in each message.
    pub fn set_override_user_id(&mut self, id: i32) {
        self.override_user_id = id;
    }

    pub fn set_num_users(&mut self, n: usize) {
        self.num_users = n;
        self.rebuild_matrix();
    }

    pub fn set_num_joints(&mut self, n: usize) {
        self.num_joints = n;
        self.rebuild_matrix();
    }

    pub fn set_num_features(&mut self, n: usize) {
        self.num_features = n;
        self.rebuild_matrix();
    }

    // Shape changes discard everything: partial data across a reshape is
    // never meaningful.
    fn rebuild_matrix(&mut self) {
        self.matrix = UserMatrix::new(
            self.matrix.name(),
            self.num_users,
            self.num_joints,
            self.num_features,
        );
    }

    /// Resolve, convert and pack one sample into its (user, joint) row.
    /// Nothing is written on any error path.
    pub fn ingest(
        &mut self,
        registry: &JointRegistry,
        sample: &SkeletonSample,
    ) -> Result<(), IngestError> {
        let user_id = if self.override_user_id >= 0 {
            self.override_user_id
        } else {
            sample.user_id
        };
        if user_id < 0 || user_id as usize >= self.num_users {
            return Err(IngestError::UserIdOutOfRange(user_id));
        }

        let joint = registry
            .resolve(&sample.joint_name)
            .ok_or_else(|| IngestError::UnknownJoint(sample.joint_name.clone()))?;
        if joint >= self.num_joints {
            return Err(IngestError::JointIndexOutOfRange {
                joint: sample.joint_name.clone(),
                index: joint,
            });
        }

        let euler = quat_to_euler(&sample.rotation);
        let features: [f32; FEATURE_COUNT] = [
            sample.confidence,
            sample.position[0],
            sample.position[1],
            sample.position[2],
            sample.rotation[0],
            sample.rotation[1],
            sample.rotation[2],
            sample.rotation[3],
            euler.heading.to_degrees(),
            euler.bank.to_degrees(),
            euler.attitude.to_degrees(),
        ];
        self.matrix.write_row(user_id as usize, joint, &features);
        Ok(())
    }
}
