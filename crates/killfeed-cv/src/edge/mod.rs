//! Vertical edge validation of killfeed rows

pub mod validator;

pub use validator::EdgeValidator;

/// Per-column flags: `true` where an icon's left border may start.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeMask {
    columns: Vec<bool>,
}

impl EdgeMask {
    pub fn from_vec(columns: Vec<bool>) -> Self {
        Self { columns }
    }

    /// Mask with every column marked invalid
    pub fn empty(len: usize) -> Self {
        Self::from_vec(vec![false; len])
    }

    /// Out-of-range columns are never valid.
    pub fn is_valid(&self, x: u32) -> bool {
        self.columns.get(x as usize).copied().unwrap_or(false)
    }

    pub fn valid_count(&self) -> usize {
        self.columns.iter().filter(|&&valid| valid).count()
    }

    pub fn valid_columns(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, valid)| **valid)
            .map(|(x, _)| x as u32)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.columns
    }
}

impl FromIterator<bool> for EdgeMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
