/// Database-backed integration tests for follow uniqueness, comment
/// scoping, follow listing, and post group filtering.
///
/// These need a running PostgreSQL instance: set DATABASE_URL to run
/// them, they skip otherwise.
mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use blog_service::{routes, security::jwt};
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::common::fixtures;

    fn init_jwt() {
        jwt::initialize("integration-test-secret", 3600, 2592000).unwrap();
    }

    async fn setup_test_app(
        pool: PgPool,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .configure(routes::configure),
        )
        .await
    }

    fn bearer(user_id: Uuid, username: &str) -> String {
        format!(
            "Bearer {}",
            jwt::generate_access_token(user_id, username).unwrap()
        )
    }

    // ============================================
    // Follow uniqueness
    // ============================================

    #[actix_web::test]
    async fn test_duplicate_follow_is_400_and_single_row() {
        let Some(pool) = fixtures::create_test_pool().await else {
            eprintln!("[tests] DATABASE_URL not set, skipping");
            return;
        };
        init_jwt();

        let alice = fixtures::create_test_user(&pool).await;
        let bob = fixtures::create_test_user(&pool).await;
        let app = setup_test_app(pool.clone()).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/follow")
            .insert_header(("Authorization", bearer(alice.id, &alice.username)))
            .set_json(serde_json::json!({ "following": bob.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/follow")
            .insert_header(("Authorization", bearer(alice.id, &alice.username)))
            .set_json(serde_json::json!({ "following": bob.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM follows WHERE user_id = $1 AND following_id = $2",
        )
        .bind(alice.id)
        .bind(bob.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);

        fixtures::cleanup_users(&pool, &[alice.id, bob.id]).await;
    }

    // ============================================
    // Comment scoping
    // ============================================

    #[actix_web::test]
    async fn test_comment_under_missing_post_is_404_and_persists_nothing() {
        let Some(pool) = fixtures::create_test_pool().await else {
            eprintln!("[tests] DATABASE_URL not set, skipping");
            return;
        };
        init_jwt();

        let user = fixtures::create_test_user(&pool).await;
        let missing_post_id = Uuid::new_v4();
        let app = setup_test_app(pool.clone()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{}/comments", missing_post_id))
            .insert_header(("Authorization", bearer(user.id, &user.username)))
            .set_json(serde_json::json!({ "text": "hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(missing_post_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        fixtures::cleanup_users(&pool, &[user.id]).await;
    }

    // ============================================
    // Follow listing scope
    // ============================================

    #[actix_web::test]
    async fn test_follow_listing_returns_only_edges_pointing_at_requester() {
        let Some(pool) = fixtures::create_test_pool().await else {
            eprintln!("[tests] DATABASE_URL not set, skipping");
            return;
        };
        init_jwt();

        let alice = fixtures::create_test_user(&pool).await;
        let bob = fixtures::create_test_user(&pool).await;
        let carol = fixtures::create_test_user(&pool).await;
        let app = setup_test_app(pool.clone()).await;

        // bob -> alice and alice -> carol; only the first may show up
        // when alice lists her followers
        let req = test::TestRequest::post()
            .uri("/api/v1/follow")
            .insert_header(("Authorization", bearer(bob.id, &bob.username)))
            .set_json(serde_json::json!({ "following": alice.id }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/follow")
            .insert_header(("Authorization", bearer(alice.id, &alice.username)))
            .set_json(serde_json::json!({ "following": carol.id }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/follow")
            .insert_header(("Authorization", bearer(alice.id, &alice.username)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let edges: Vec<serde_json::Value> = test::read_body_json(resp).await;
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["user"], serde_json::json!(bob.username));
        assert_eq!(edges[0]["following"], serde_json::json!(alice.username));

        fixtures::cleanup_users(&pool, &[alice.id, bob.id, carol.id]).await;
    }

    // ============================================
    // Post group filter
    // ============================================

    #[actix_web::test]
    async fn test_group_filter_excludes_other_and_ungrouped_posts() {
        let Some(pool) = fixtures::create_test_pool().await else {
            eprintln!("[tests] DATABASE_URL not set, skipping");
            return;
        };
        init_jwt();

        let author = fixtures::create_test_user(&pool).await;
        let group_a = fixtures::create_test_group(&pool).await;
        let group_b = fixtures::create_test_group(&pool).await;

        let in_a = fixtures::create_test_post(&pool, author.id, Some(group_a.id), "in a").await;
        fixtures::create_test_post(&pool, author.id, Some(group_b.id), "in b").await;
        fixtures::create_test_post(&pool, author.id, None, "ungrouped").await;

        let app = setup_test_app(pool.clone()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/posts?group={}", group_a.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let posts: Vec<serde_json::Value> = test::read_body_json(resp).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["id"], serde_json::json!(in_a.id));
        assert_eq!(posts[0]["group"], serde_json::json!(group_a.id));

        fixtures::cleanup_users(&pool, &[author.id]).await;
        fixtures::cleanup_groups(&pool, &[group_a.id, group_b.id]).await;
    }

    // ============================================
    // Ownership enforcement
    // ============================================

    #[actix_web::test]
    async fn test_non_owner_update_is_403_and_post_unchanged() {
        let Some(pool) = fixtures::create_test_pool().await else {
            eprintln!("[tests] DATABASE_URL not set, skipping");
            return;
        };
        init_jwt();

        let author = fixtures::create_test_user(&pool).await;
        let intruder = fixtures::create_test_user(&pool).await;
        let post = fixtures::create_test_post(&pool, author.id, None, "original text").await;

        let app = setup_test_app(pool.clone()).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/posts/{}", post.id))
            .insert_header(("Authorization", bearer(intruder.id, &intruder.username)))
            .set_json(serde_json::json!({ "text": "hijacked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let text: String = sqlx::query_scalar("SELECT text FROM posts WHERE id = $1")
            .bind(post.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(text, "original text");

        fixtures::cleanup_users(&pool, &[author.id, intruder.id]).await;
    }
}
