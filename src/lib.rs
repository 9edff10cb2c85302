//! Domain model shared by the Bord social client: user, post, comment,
//! message, conversation and notification records, the response envelopes
//! that wrap them, and the forms and session state at the client boundary.

pub mod config;
pub mod core;
pub mod envelope;
pub mod follow;
pub mod forms;
pub mod models;
pub mod posts;
pub mod search;
pub mod state;
pub mod threads;

pub use crate::config::Policy;
pub use crate::core::errors::{ModelError, Result};
pub use crate::core::validation::Validate;
pub use crate::envelope::{paginate, ApiResponse, PageRequest, PaginatedResponse, Pagination};
pub use crate::follow::Directory;
pub use crate::forms::{CreatePostForm, LoginForm, ProfileForm, RegisterForm, SearchForm};
pub use crate::models::{
    Comment, Conversation, Message, MessageType, Notification, NotificationType, Post, SearchScope,
    SortOrder, User,
};
pub use crate::state::AppState;
pub use crate::threads::CommentThread;
