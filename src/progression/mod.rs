pub mod evolution;
pub mod rewards;
pub mod unlocks;

pub use evolution::{EvolutionRecord, PendingEvolution};
pub use rewards::RewardCalculator;
pub use unlocks::{UnlockCondition, UnlockProgress, UnlockRule};
