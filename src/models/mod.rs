pub mod comment;
pub mod messaging;
pub mod notification;
pub mod post;
pub mod tags;
pub mod user;

pub use comment::Comment;
pub use messaging::{Conversation, Message};
pub use notification::Notification;
pub use post::Post;
pub use tags::{MessageType, NotificationType, SearchScope, SortOrder};
pub use user::User;
