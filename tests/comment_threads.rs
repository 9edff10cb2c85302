mod support;

use bord_model::{Comment, CommentThread, ModelError, Validate};
use support::{comment, post};

#[test]
fn replies_form_a_tree() {
    let mut post = post("p-1", "u-1", "root post");
    post.comments = vec![
        comment("c-1", "p-1", None),
        comment("c-2", "p-1", Some("c-1")),
        comment("c-3", "p-1", Some("c-2")),
        comment("c-4", "p-1", Some("c-1")),
        comment("c-5", "p-1", None),
    ];
    let thread = CommentThread::new(&post);

    assert!(thread.validate().is_ok());
    assert!(post.validate().is_ok());

    let roots: Vec<&str> = thread.roots().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(roots, vec!["c-1", "c-5"]);

    let replies: Vec<&str> = thread.replies("c-1").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(replies, vec!["c-2", "c-4"]);

    let ancestors: Vec<&str> =
        thread.ancestors("c-3").unwrap().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ancestors, vec!["c-2", "c-1"]);
    assert_eq!(thread.depth("c-3").unwrap(), 2);
    assert_eq!(thread.depth("c-5").unwrap(), 0);
}

#[test]
fn a_comment_cannot_be_its_own_ancestor() {
    let comments = vec![
        comment("c-1", "p-1", Some("c-3")),
        comment("c-2", "p-1", Some("c-1")),
        comment("c-3", "p-1", Some("c-2")),
    ];
    let thread = CommentThread::from_comments("p-1", &comments);
    assert!(matches!(thread.ancestors("c-2"), Err(ModelError::CycleDetected(_))));
    assert!(matches!(thread.validate(), Err(ModelError::CycleDetected(_))));
}

#[test]
fn loop_not_through_the_start_still_terminates() {
    let comments = vec![
        comment("c-1", "p-1", Some("c-2")),
        comment("c-2", "p-1", Some("c-3")),
        comment("c-3", "p-1", Some("c-2")),
    ];
    let thread = CommentThread::from_comments("p-1", &comments);
    assert!(matches!(thread.ancestors("c-1"), Err(ModelError::CycleDetected(_))));
}

#[test]
fn self_parent_is_rejected() {
    let own = comment("c-1", "p-1", Some("c-1"));
    assert!(matches!(own.validate(), Err(ModelError::SelfReference { .. })));

    let comments = vec![own];
    assert!(CommentThread::from_comments("p-1", &comments).validate().is_err());
}

#[test]
fn parents_must_live_on_the_same_post() {
    let comments = vec![comment("c-1", "p-1", None), comment("c-2", "p-2", Some("c-1"))];
    assert!(CommentThread::from_comments("p-1", &comments).validate().is_err());

    let orphan = vec![comment("c-1", "p-1", Some("c-404"))];
    assert!(matches!(
        CommentThread::from_comments("p-1", &orphan).validate(),
        Err(ModelError::NotFound { .. })
    ));
}

#[test]
fn duplicate_comment_ids_are_rejected() {
    let comments = vec![comment("c-1", "p-1", None), comment("c-1", "p-1", None)];
    assert!(matches!(
        CommentThread::from_comments("p-1", &comments).validate(),
        Err(ModelError::DuplicateId { kind: "comment", .. })
    ));
}

#[test]
fn add_comment_checks_post_and_parent() {
    let mut post = post("p-1", "u-1", "hello");
    let first = Comment::new("p-1", "u-2", "first!");
    let first_id = first.id.clone();
    post.add_comment(first.clone()).unwrap();

    assert!(matches!(
        post.add_comment(first),
        Err(ModelError::DuplicateId { .. })
    ));
    assert!(post.add_comment(Comment::new("p-2", "u-2", "wrong post")).is_err());
    assert!(post
        .add_comment(Comment::new("p-1", "u-2", "orphan").reply_to("c-404"))
        .is_err());

    post.add_comment(Comment::new("p-1", "u-3", "reply").reply_to(&first_id))
        .unwrap();
    assert_eq!(post.comment_count(), 2);
    assert_eq!(post.engagement(), 2);
    assert!(post.validate().is_ok());
}

#[test]
fn removing_a_comment_takes_its_replies() {
    let mut post = post("p-1", "u-1", "hello");
    post.comments = vec![
        comment("c-1", "p-1", None),
        comment("c-2", "p-1", Some("c-1")),
        comment("c-3", "p-1", Some("c-2")),
        comment("c-4", "p-1", None),
    ];

    let removed: Vec<String> = post
        .remove_comment("c-1")
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(removed, vec!["c-1", "c-2", "c-3"]);
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].id, "c-4");

    assert!(post.remove_comment("c-404").is_err());
}

#[test]
fn comment_likes_are_unique() {
    let mut c = comment("c-1", "p-1", None);
    assert!(c.like("u-2"));
    assert!(!c.like("u-2"));
    assert!(c.unlike("u-2"));
    assert!(c.likes.is_empty());
}
