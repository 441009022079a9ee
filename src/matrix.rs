use ndarray::{s, Array3, ArrayView1, ArrayView3};

/// Handle consumers bind to when the matrix is announced.
pub const DEFAULT_MATRIX_NAME: &str = "usersMatrix";

/// Named three-dimensional store for packed joint features, indexed
/// [user][joint][feature]. Freshly allocated cells read as zero.
#[derive(Debug)]
pub struct UserMatrix {
    name: String,
    data: Array3<f32>,
}

impl UserMatrix {
    pub fn new(name: &str, num_users: usize, num_joints: usize, num_features: usize) -> Self {
        Self {
            name: name.to_string(),
            data: Array3::zeros((num_users, num_joints, num_features)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_users(&self) -> usize {
        self.data.dim().0
    }

    pub fn num_joints(&self) -> usize {
        self.data.dim().1
    }

    pub fn num_features(&self) -> usize {
        self.data.dim().2
    }

    /// Write one joint row. `user` and `joint` must be in range (the
    /// receiver bounds-checks before calling). The feature dimension is
    /// zipped: a row narrower than `features` truncates, a wider one keeps
    /// its tail at zero.
    pub fn write_row(&mut self, user: usize, joint: usize, features: &[f32]) {
        let mut row = self.data.slice_mut(s![user, joint, ..]);
        for (cell, value) in row.iter_mut().zip(features) {
            *cell = *value;
        }
    }

    pub fn row(&self, user: usize, joint: usize) -> ArrayView1<'_, f32> {
        self.data.slice(s![user, joint, ..])
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    /// True when every cell still reads as zero.
    pub fn is_zeroed(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }
}
