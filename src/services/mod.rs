//! Services.
//!
//! Most of the business logic is split up into services. A service is a cheaply cloneable
//! struct with a constructor and `async fn(&self, ...) -> Result<T, E>` methods.
//!
//! If a service maps to an HTTP endpoint, it will also export an `http` module with a `router`
//! function returning an [`axum::Router`].

pub mod umami;
pub use umami::UmamiService;

pub mod badges;
pub use badges::BadgeService;

pub mod meta;
pub use meta::MetaService;
