//! Domain types for the to-do list.
//!
//! The whole component is one [`TodoState`] value: the item list, the text
//! currently in the input field, the item being edited and the active filter.
//! Every user gesture is a [`TodoAction`] reduced against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a to-do item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an item
///
/// `Overdue` is a cached flag written by the overdue sweep. The view derives
/// a fresh status from the due date on every projection, see
/// [`crate::projection::display_status`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not done yet
    #[default]
    Pending,
    /// Done
    Completed,
    /// Due date had passed at the last sweep
    Overdue,
}

impl Status {
    /// Label shown next to each item
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which items the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Everything
    #[default]
    All,
    /// Everything not completed, overdue items included
    Pending,
    /// Completed items only
    Completed,
}

impl Filter {
    /// All filters in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// Whether an item with the given stored status passes this filter
    #[must_use]
    pub const fn admits(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !matches!(status, Status::Completed),
            Self::Completed => matches!(status, Status::Completed),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing; never empty, always trimmed
    pub text: String,
    /// Current lifecycle status
    pub status: Status,
    /// Deadline, if any
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a new pending item without a deadline
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            status: Status::Pending,
            due_date: None,
        }
    }

    /// Builder-style due date, mostly for seeding state
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder-style status, mostly for seeding state
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Whether the item is done
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, Status::Completed)
    }

    /// Whether the deadline lies strictly before `now`
    #[must_use]
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}

/// State of the to-do component
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order
    pub items: Vec<TodoItem>,
    /// Current contents of the input field
    pub input: String,
    /// Item whose text the input field is editing, if any
    pub editing: Option<TodoId>,
    /// Active view filter
    pub filter: Filter,
}

impl TodoState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding the given items
    #[must_use]
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }

    /// Returns an item by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Returns a mutable item by ID
    pub fn get_mut(&mut self, id: &TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Label of the commit button: `Save` while editing, `Add` otherwise
    #[must_use]
    pub const fn commit_label(&self) -> &'static str {
        if self.editing.is_some() { "Save" } else { "Add" }
    }
}

/// Everything that can happen to the to-do component
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// The input field changed
    SetInput {
        /// New contents, stored verbatim
        text: String,
    },

    /// The Add/Save button was pressed
    AddOrSave,

    /// Edit was pressed on an item
    BeginEdit {
        /// Item to edit
        id: TodoId,
    },

    /// Complete/Undo was pressed on an item
    ToggleComplete {
        /// Item to toggle
        id: TodoId,
    },

    /// Remove was pressed on an item
    Remove {
        /// Item to remove
        id: TodoId,
    },

    /// Clear Completed was pressed
    ClearCompleted,

    /// The due-date picker of an item changed
    SetDueDate {
        /// Item to update
        id: TodoId,
        /// New deadline; `None` clears it
        due: Option<DateTime<Utc>>,
    },

    /// Flag every past-due item as overdue, completed ones included
    RecomputeOverdue,

    /// A filter button was pressed
    SetFilter {
        /// Filter to activate
        filter: Filter,
    },

    /// The component was mounted: sweep once and, when configured, start the
    /// periodic sweep
    Mount,

    /// Periodic sweep timer fired
    SweepTick,
}
