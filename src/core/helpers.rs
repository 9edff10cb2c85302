use ammonia::Builder;
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Current instant truncated to whole seconds, the precision records carry.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Plain text only: every tag is stripped, entities are kept escaped.
pub fn sanitize_text(text: &str) -> String {
    Builder::default()
        .tags(HashSet::new())
        .clean(text)
        .to_string()
}

/// Rich content: keeps ammonia's safe tag set, drops scripts and handlers.
pub fn sanitize_rich_text(content: &str) -> String {
    Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(content)
        .to_string()
}

/// Pushes `id` unless already present. Returns whether the list changed.
pub fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

/// Removes every occurrence of `id`. Returns whether the list changed.
pub fn remove_id(list: &mut Vec<String>, id: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != id);
    before != list.len()
}
