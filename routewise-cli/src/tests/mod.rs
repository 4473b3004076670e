//! Shared test harness modules for the routewise CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::optimize::*;

mod helpers;
