//! # Habits Core Library
//!
//! This library provides the core business logic for the Habits tracker.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary; any GUI would be a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Entry Ledger**: day-granular completion set owned by each habit,
//!   with normalization so same-day timestamps are equivalent
//! - **Score Engine**: derived trailing-window activity score, always
//!   recomputed from the ledger
//! - **Notification Reconciler**: state machine keeping at most one
//!   scheduled reminder per habit consistent with preference and
//!   platform permission
//! - **Storage**: JSON habit store and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Habit`]: entity with ledger and reminder preference
//! - [`Reconciler`]: preference/permission reconciliation
//! - [`NotificationService`]: injected platform seam
//! - [`HabitStore`] / [`Config`]: persistence

pub mod date_util;
pub mod error;
pub mod habit;
pub mod notify;
pub mod score;
pub mod storage;

pub use date_util::Period;
pub use error::CoreError;
pub use habit::{Color, Habit};
pub use notify::{AuthorizationStatus, NotificationService, NotifyError, Reconciler, SyncOutcome};
pub use score::{ScoreError, DEFAULT_WINDOW_DAYS};
pub use storage::{Config, HabitStore, StorageError};
