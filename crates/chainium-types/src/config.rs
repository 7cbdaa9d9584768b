//! Keystore configuration with documented defaults.

use serde::{Deserialize, Serialize};

use crate::{ChainiumError, Result};

/// Argon2id cost parameters used when a new keystore is written.
///
/// Each keystore embeds the parameters it was created with, so changing
/// these values never breaks decryption of older blobs.
///
/// | Field    | Default | Meaning |
/// |----------|---------|---------|
/// | `m_cost` | 65 536  | Memory in KiB (64 MiB) |
/// | `t_cost` | 3       | Passes |
/// | `p_cost` | 1       | Lanes |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeystoreConfig {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            m_cost: 65_536,
            t_cost: 3,
            p_cost: 1,
        }
    }
}

impl KeystoreConfig {
    /// Argon2 requires at least 8 KiB of memory per lane.
    const MIN_M_COST_PER_LANE: u32 = 8;

    /// Largest accepted memory cost: 1 GiB.
    pub const MAX_M_COST: u32 = 1_048_576;
    /// Largest accepted number of passes.
    pub const MAX_T_COST: u32 = 10;
    /// Largest accepted number of lanes.
    pub const MAX_P_COST: u32 = 16;

    /// Checks the parameters against Argon2's lower bounds and the upper
    /// bounds above. Keystore headers are checked against the same bounds
    /// before any key stretching.
    pub fn validate(&self) -> Result<()> {
        if self.t_cost == 0 || self.t_cost > Self::MAX_T_COST {
            return Err(ChainiumError::Config {
                reason: format!(
                    "t_cost must be in 1..={}, got {}",
                    Self::MAX_T_COST,
                    self.t_cost
                ),
            });
        }
        if self.p_cost == 0 || self.p_cost > Self::MAX_P_COST {
            return Err(ChainiumError::Config {
                reason: format!(
                    "p_cost must be in 1..={}, got {}",
                    Self::MAX_P_COST,
                    self.p_cost
                ),
            });
        }
        if self.m_cost > Self::MAX_M_COST {
            return Err(ChainiumError::Config {
                reason: format!(
                    "m_cost must be at most {} KiB, got {}",
                    Self::MAX_M_COST,
                    self.m_cost
                ),
            });
        }
        let min_memory = self.p_cost.saturating_mul(Self::MIN_M_COST_PER_LANE);
        if self.m_cost < min_memory {
            return Err(ChainiumError::Config {
                reason: format!(
                    "m_cost must be at least {min_memory} KiB for {} lane(s), got {}",
                    self.p_cost, self.m_cost
                ),
            });
        }
        Ok(())
    }
}
