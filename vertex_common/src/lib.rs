mod money;
mod secret;

pub mod helpers;

pub use money::{Rub, Usdt};
pub use secret::Secret;
