//! Client side of the learning roadmap app: auth flow, session store, intake
//! stepper, the roadmap generation call and terminal rendering.

pub mod auth;
pub mod display;
pub mod error;
pub mod intake;
pub mod provider;
pub mod roadmap;
pub mod session;

#[cfg(test)]
mod test_support;
