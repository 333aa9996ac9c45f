//! Concrete record kinds.

mod effect;
mod graphic;
mod sound;
mod tech;
mod unit;

pub use effect::{Effect, EffectCommand};
pub use graphic::Graphic;
pub use sound::{Sound, SoundFile};
pub use tech::Tech;
pub use unit::{BuildingInfo, CombatInfo, CreationInfo, Unit};

#[cfg(test)]
mod tests;
