//! 订单域 (Orders domain)
//!
//! ```text
//!  HTTP handler ──► service (write flow) ──► repository (conditional SQL)
//!                      │
//!                      ├──► money        exact decimal arithmetic
//!                      └──► transitions  role-gated status table
//! ```
//!
//! Money never touches floating point, and every status write is a
//! conditional UPDATE; the submodules document the contract each one owns.

pub mod money;
pub mod service;
pub mod transitions;
