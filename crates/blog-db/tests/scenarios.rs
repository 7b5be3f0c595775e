//! End-to-end behavior of the article engine against an in-memory store.

use std::sync::Arc;

use blog_config::BlogSettings;
use blog_core::enums::ArticleState;
use blog_core::render::render;
use blog_db::error::ServiceError;
use blog_db::inputs::{ArticleInput, CommentInput, ListParams, TermInput};
use blog_db::service::BlogService;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn service() -> BlogService {
    BlogService::new_local(":memory:", BlogSettings::default())
        .await
        .unwrap()
}

fn article(title: &str, content: &str, state: i64) -> ArticleInput {
    ArticleInput {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        state: Some(json!(state)),
        ..ArticleInput::default()
    }
}

fn comment(page_id: &str) -> CommentInput {
    CommentInput {
        page_id: Some(page_id.to_string()),
        content: Some("nice".to_string()),
        ..CommentInput::default()
    }
}

#[tokio::test]
async fn created_article_caches_rendered_content() {
    let svc = service().await;
    let view = svc
        .create_article(&ArticleInput {
            title: Some("A".into()),
            content: Some("# Hi".into()),
            ..ArticleInput::default()
        })
        .await
        .unwrap();
    let stored = svc.get_article(&view.id).await.unwrap();
    assert_eq!(stored.rendered_content, render("# Hi"));
    assert!(stored.rendered_content.contains("<h1>Hi</h1>"));
    assert_eq!(stored.state, ArticleState::Draft);
}

#[tokio::test]
async fn readers_only_ever_see_published_articles() {
    let svc = service().await;
    svc.create_article(&article("live", "x", 1)).await.unwrap();
    for (title, state) in [("draft-1", 0), ("draft-2", 0), ("trash", -1)] {
        let created = svc.create_article(&article(title, "x", 0)).await.unwrap();
        if state == -1 {
            svc.bulk_update_state(&[created.id], Some(&json!(-1)))
                .await
                .unwrap();
        }
    }

    for state in [None, Some(json!(0)), Some(json!("0")), Some(json!(-1))] {
        let params = ListParams {
            state,
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, false).await.unwrap();
        assert_eq!(page.list.len(), 1);
        let only = &page.list[0];
        assert_eq!(only.title.as_deref(), Some("live"));
        assert!(only.content.is_none());
        assert!(only.rendered_content.is_none());
        assert!(only.state.is_none());
    }

    let editor = svc.list_articles(&ListParams::default(), true).await.unwrap();
    assert_eq!(editor.pagination.total_count, 4);
    let drafts = svc
        .list_articles(
            &ListParams {
                state: Some(json!("0")),
                ..ListParams::default()
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(drafts.list.len(), 2);
}

#[tokio::test]
async fn unknown_category_name_matches_nothing() {
    let svc = service().await;
    svc.create_article(&article("a", "x", 1)).await.unwrap();
    svc.create_article(&article("b", "x", 1)).await.unwrap();

    for authorized in [false, true] {
        let params = ListParams {
            category: Some("nonexistent-name".into()),
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, authorized).await.unwrap();
        assert!(page.list.is_empty());
        assert_eq!(page.pagination.total_count, 0);
    }

    let params = ListParams {
        tag: Some("nonexistent-tag".into()),
        ..ListParams::default()
    };
    assert!(svc.list_articles(&params, true).await.unwrap().list.is_empty());
}

#[tokio::test]
async fn category_filter_accepts_name_or_id() {
    let svc = service().await;
    let life = svc
        .create_category(&TermInput {
            name: Some("life".into()),
            ..TermInput::default()
        })
        .await
        .unwrap();
    svc.create_article(&ArticleInput {
        category: Some("life".into()),
        ..article("filed", "x", 1)
    })
    .await
    .unwrap();
    svc.create_article(&article("loose", "x", 1)).await.unwrap();

    for key in ["life".to_string(), life.id.clone()] {
        let page = svc
            .list_articles(
                &ListParams {
                    category: Some(key),
                    ..ListParams::default()
                },
                false,
            )
            .await
            .unwrap();
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].category.as_ref().map(|c| c.name.as_str()), Some("life"));
    }
}

#[tokio::test]
async fn bulk_delete_with_missing_id_removes_existing_and_its_comments() {
    let svc = service().await;
    let x = svc.create_article(&article("x", "x", 1)).await.unwrap();
    let keep = svc.create_article(&article("keep", "x", 1)).await.unwrap();
    svc.create_comment(&comment(&x.id)).await.unwrap();
    svc.create_comment(&comment(&x.id)).await.unwrap();
    svc.create_comment(&comment(&keep.id)).await.unwrap();

    let y = "5a1f9c2e4b0d3a7f8e6c1b2d".to_string();
    let deleted = svc.delete_articles(&[x.id.clone(), y]).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(matches!(
        svc.get_article(&x.id).await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert!(svc.list_comments(&x.id).await.unwrap().is_empty());
    assert_eq!(svc.list_comments(&keep.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn comment_sweep_failure_does_not_undo_delete() {
    let svc = service().await;
    let x = svc.create_article(&article("x", "x", 1)).await.unwrap();
    svc.db()
        .conn()
        .execute("DROP TABLE comments", ())
        .await
        .unwrap();
    assert_eq!(svc.delete_articles(&[x.id.clone()]).await.unwrap(), 1);
    assert!(svc.get_article(&x.id).await.is_err());
}

#[tokio::test]
async fn state_stays_in_range_through_the_lifecycle() {
    let svc = service().await;
    let a = svc.create_article(&article("a", "x", 0)).await.unwrap();
    let ids = vec![a.id.clone()];

    svc.patch_article_state(&a.id, Some(&json!(1))).await.unwrap();
    svc.bulk_update_state(&ids, Some(&json!("-1"))).await.unwrap();
    svc.bulk_update_state(&ids, Some(&json!(0))).await.unwrap();
    assert!(svc.bulk_update_state(&ids, Some(&json!(3))).await.is_err());
    assert!(svc.patch_article_state(&a.id, Some(&json!(-1))).await.is_err());

    let stored = svc.get_article(&a.id).await.unwrap();
    assert_eq!(stored.state, ArticleState::Draft);
}

#[tokio::test]
async fn detail_carries_related_and_sibling() {
    let svc = service().await;
    svc.create_tag(&TermInput {
        name: Some("rust".into()),
        ..TermInput::default()
    })
    .await
    .unwrap();
    let tagged = |title: &str| ArticleInput {
        tag: Some(vec!["rust".into()]),
        ..article(title, "x", 1)
    };
    let first = svc.create_article(&tagged("first")).await.unwrap();
    let second = svc.create_article(&tagged("second")).await.unwrap();

    let detail = svc.get_article_detail(&second.id, false).await.unwrap();
    assert_eq!(detail.related.len(), 1);
    assert_eq!(detail.related[0].id, first.id);

    let body = serde_json::to_value(&detail).unwrap();
    assert_eq!(body["title"], "second");
    assert!(body.get("content").is_none());
    assert!(body["sibling"].get("prev").is_some());
    assert_eq!(body["tag"][0]["name"], "rust");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_and_comments_are_independent() {
    let svc = Arc::new(service().await);
    let target = svc.create_article(&article("target", "x", 1)).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..40 {
        let svc = Arc::clone(&svc);
        let target = target.id.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                svc.create_article(&article(&format!("a{i}"), "x", 0))
                    .await
                    .map(|_| ())
            } else {
                svc.create_comment(&comment(&target)).await.map(|_| ())
            }
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(svc.statistics(true).await.unwrap().article, 21);
    assert_eq!(svc.list_comments(&target.id).await.unwrap().len(), 20);
    assert_eq!(svc.get_article(&target.id).await.unwrap().meta.comments, 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_count_every_visit_alongside_writes() {
    let svc = Arc::new(service().await);
    let target = svc.create_article(&article("target", "x", 1)).await.unwrap();
    let other = svc.create_article(&article("other", "x", 0)).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..60 {
        let svc = Arc::clone(&svc);
        let target = target.id.clone();
        let other = other.id.clone();
        tasks.push(tokio::spawn(async move {
            match i % 4 {
                0 | 1 => svc.get_article_detail(&target, false).await.map(|_| ()),
                2 => svc.like_article(&target).await.map(|_| ()),
                _ => {
                    let state = if i % 8 == 3 { 1 } else { 0 };
                    svc.create_article(&article(&format!("n{i}"), "x", 0))
                        .await
                        .map(|_| ())?;
                    svc.bulk_update_state(&[other], Some(&json!(state)))
                        .await
                        .map(|_| ())
                }
            }
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = svc.get_article(&target.id).await.unwrap();
    assert_eq!(stored.meta.visits, 30);
    assert_eq!(stored.meta.likes, 15);
    assert_eq!(svc.statistics(true).await.unwrap().article, 17);
}
