//! Game configuration.
//!
//! Each game has a plain settings struct with classic defaults and a fluent
//! builder. `build()` validates with Stillwater's `Validation`, so a broken
//! configuration reports every problem at once instead of the first one.
//!
//! # Example
//!
//! ```rust
//! use mindgames::config::TaskSwitchingConfig;
//! use std::time::Duration;
//!
//! let config = TaskSwitchingConfig::builder()
//!     .trial_count(20)
//!     .response_window(Duration::from_millis(2000))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.trial_count, 20);
//! ```

pub mod math_memory;
pub mod task_switching;
pub mod violations;

pub use math_memory::{
    ItemType, LevelConfig, MathMemoryConfig, MathMemoryConfigBuilder, MathType, LEVELS,
};
pub use task_switching::{TaskSwitchingConfig, TaskSwitchingConfigBuilder};
pub use violations::{ConfigError, ConfigViolation};
