#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod errors;
pub mod router;
pub mod state;

#[cfg(test)]
mod test;
