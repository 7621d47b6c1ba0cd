//! To-do list component with due dates and overdue tracking.
//!
//! The whole component is one [`TodoState`] value driven by a [`TodoReducer`]:
//!
//! - Add, edit and remove items through a single input field
//! - Toggle items between pending and completed
//! - Attach or clear a due date; past-due unfinished items show as overdue
//! - Filter the list (All / Pending / Completed) and clear completed items
//!
//! What the screen shows is a pure [`projection`] of the state at a given
//! instant. Due dates are stored in UTC and typed and shown in a [`DueZone`].
//! The `tasklist` binary hosts the component in a
//! [`Store`](tasklist_runtime::Store) behind a line-oriented shell.
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist::{TodoAction, TodoEnvironment, TodoReducer, TodoState, project};
//! use tasklist_core::environment::{Clock, SystemClock, TimeOrderedIds};
//! use tasklist_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(TimeOrderedIds));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::SetInput { text: "Buy milk".to_string() }).await?;
//! store.send(TodoAction::AddOrSave).await?;
//!
//! let rows = store.state(|s| project(s, SystemClock.now())).await;
//! println!("{} ({})", rows[0].text, rows[0].status);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod projection;
pub mod reducer;
pub mod render;
pub mod session;
pub mod types;
pub mod zone;

// Re-export commonly used types
pub use command::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use projection::{TodoView, display_status, project, visible_items};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use render::render;
pub use session::{Outcome, Session, SessionError, TodoStore};
pub use types::{Filter, Status, TodoAction, TodoId, TodoItem, TodoState};
pub use zone::DueZone;
