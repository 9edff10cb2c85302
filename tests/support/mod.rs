#![allow(dead_code)]

use bord_model::{Comment, Post, User};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}

pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().simple().to_string()[..8])
}

pub fn user(id: &str, username: &str) -> User {
    serde_json::from_value(json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "firstName": "Test",
        "lastName": "User",
        "followers": [],
        "following": [],
        "isVerified": false,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    }))
    .expect("user fixture")
}

pub fn post(id: &str, author_id: &str, content: &str) -> Post {
    let mut post = Post::new(author_id, content);
    post.id = id.to_string();
    post
}

pub fn comment(id: &str, post_id: &str, parent: Option<&str>) -> Comment {
    let mut comment = Comment::new(post_id, "author-1", format!("comment {}", id));
    comment.id = id.to_string();
    comment.parent_id = parent.map(str::to_string);
    comment
}

pub fn aged(mut post: Post, hours: i64) -> Post {
    post.created_at -= Duration::hours(hours);
    post.updated_at = post.created_at;
    post
}
