mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{TestApp, ALICE, BOB};
use serde_json::json;

#[tokio::test]
async fn health_check_needs_no_session() {
    let app = TestApp::spawn();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn operations_without_a_session_user_are_unauthorized() {
    let app = TestApp::spawn();

    let (status, body) = app
        .call("createDocument", None, json!({ "title": "Chapter 1" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.call("listDocuments", Some("   "), json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn document_page_highlight_scenario() {
    let app = TestApp::spawn();

    // 1. Create the document
    let (status, doc) = app
        .call("createDocument", Some(ALICE), json!({ "title": "Chapter 2" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["sourceType"], "image_set");
    assert_eq!(doc["ownerId"], ALICE);
    let document_id = doc["id"].as_i64().expect("document id");

    // 2. Add a page
    let (status, page) = app
        .call(
            "savePage",
            Some(ALICE),
            json!({ "documentId": document_id, "ocrText": "Newton's laws" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pageNumber"], 1);
    let page_id = page["id"].as_i64().expect("page id");

    // 3. Highlight a formula on that page
    let (status, highlight) = app
        .call(
            "saveHighlight",
            Some(ALICE),
            json!({
                "documentId": document_id,
                "pageId": page_id,
                "content": "F=ma",
                "highlightType": "formula"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(highlight["documentId"], document_id);
    assert_eq!(highlight["pageId"], page_id);
    assert_eq!(highlight["highlightType"], "formula");

    // 4. Read it all back
    let (status, loaded) = app
        .call("getDocumentWithPages", Some(ALICE), json!({ "id": document_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded["document"]["id"], document_id);
    assert_eq!(loaded["pages"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn scan_job_scenario() {
    let app = TestApp::spawn();
    let (_, doc) = app
        .call("createDocument", Some(ALICE), json!({ "title": "Chapter 5" }))
        .await;

    let (status, job) = app
        .call(
            "createScanJob",
            Some(ALICE),
            json!({ "documentId": doc["id"], "jobType": "ocr" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["status"], "pending");
    assert_eq!(job["userId"], ALICE);

    let (_, pending) = app
        .call("listScanJobs", Some(ALICE), json!({ "status": "pending" }))
        .await;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
    assert_eq!(pending[0]["id"], job["id"]);

    let (_, completed) = app
        .call("listScanJobs", Some(ALICE), json!({ "status": "completed" }))
        .await;
    assert_eq!(completed, json!([]));

    let (_, theirs) = app.call("listScanJobs", Some(BOB), json!({})).await;
    assert_eq!(theirs, json!([]));
}

#[tokio::test]
async fn foreign_and_missing_documents_get_identical_responses() {
    let app = TestApp::spawn();
    let (_, doc) = app
        .call("createDocument", Some(ALICE), json!({ "title": "Private notes" }))
        .await;

    let foreign = app
        .call(
            "updateDocument",
            Some(BOB),
            json!({ "id": doc["id"], "title": "Mine now" }),
        )
        .await;
    let missing = app
        .call(
            "updateDocument",
            Some(BOB),
            json!({ "id": 9999, "title": "Mine now" }),
        )
        .await;

    assert_eq!(foreign.0, StatusCode::NOT_FOUND);
    assert_eq!(foreign, missing);
    assert_eq!(foreign.1["code"], "NOT_FOUND");
    assert_eq!(foreign.1["message"], "Document not found");

    let (_, listed) = app.call("listDocuments", Some(BOB), json!({})).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn update_with_only_id_returns_the_stored_document() {
    let app = TestApp::spawn();
    let (_, doc) = app
        .call(
            "createDocument",
            Some(ALICE),
            json!({ "title": "Geometry", "subject": "Maths", "sourceMeta": { "scanner": "v2" } }),
        )
        .await;

    let (status, same) = app
        .call("updateDocument", Some(ALICE), json!({ "id": doc["id"] }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(same, doc);
}

#[tokio::test]
async fn invalid_input_is_a_validation_error() {
    let app = TestApp::spawn();

    let (status, body) = app
        .call("createDocument", Some(ALICE), json!({ "title": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let (status, body) = app
        .call("createDocument", Some(ALICE), json!({ "title": 42 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let (status, body) = app
        .call(
            "saveHighlight",
            Some(ALICE),
            json!({ "documentId": 1, "content": "x", "highlightType": "summary" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn empty_body_reads_as_an_empty_input() {
    let app = TestApp::spawn();
    app.call("createDocument", Some(ALICE), json!({ "title": "Optics" }))
        .await;

    let bare = |operation: &str| {
        Request::builder()
            .method("POST")
            .uri(format!("/rpc/{operation}"))
            .header("x-user-id", ALICE)
            .body(Body::empty())
            .unwrap()
    };

    let (status, docs) = app.send(bare("listDocuments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(docs.as_array().map(Vec::len), Some(1));

    let (status, jobs) = app.send(bare("listScanJobs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(jobs, json!([]));

    // Required fields are still required.
    let (status, body) = app.send(bare("savePage")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn non_empty_body_without_json_content_type_is_rejected() {
    let app = TestApp::spawn();
    let request = Request::builder()
        .method("POST")
        .uri("/rpc/createDocument")
        .header("x-user-id", ALICE)
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"title":"Optics"}"#))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let app = TestApp::spawn();
    let (_, doc) = app
        .call("createDocument", Some(ALICE), json!({ "title": "Waves" }))
        .await;
    let (_, page) = app
        .call("savePage", Some(ALICE), json!({ "documentId": doc["id"] }))
        .await;
    let (_, highlight) = app
        .call(
            "saveHighlight",
            Some(ALICE),
            json!({ "documentId": doc["id"], "content": "λ = v / f" }),
        )
        .await;

    let delete_page = json!({ "id": page["id"], "documentId": doc["id"] });
    let (status, _) = app.call("deletePage", Some(ALICE), delete_page.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.call("deletePage", Some(ALICE), delete_page).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page not found");

    let delete_highlight = json!({ "id": highlight["id"], "documentId": doc["id"] });
    let (status, deleted) = app
        .call("deleteHighlight", Some(ALICE), delete_highlight.clone())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, highlight);
    let (status, _) = app.call("deleteHighlight", Some(ALICE), delete_highlight).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_saved_under_the_wrong_document_is_not_found() {
    let app = TestApp::spawn();
    let (_, first) = app
        .call("createDocument", Some(ALICE), json!({ "title": "One" }))
        .await;
    let (_, second) = app
        .call("createDocument", Some(ALICE), json!({ "title": "Two" }))
        .await;
    let (_, page) = app
        .call("savePage", Some(ALICE), json!({ "documentId": first["id"] }))
        .await;

    let (status, body) = app
        .call(
            "savePage",
            Some(ALICE),
            json!({ "id": page["id"], "documentId": second["id"], "pageNumber": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page not found");

    let (status, body) = app
        .call(
            "saveHighlight",
            Some(ALICE),
            json!({ "documentId": second["id"], "pageId": page["id"], "content": "stray" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page not found");
}

#[tokio::test]
async fn openapi_document_lists_every_operation() {
    let app = TestApp::spawn();
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let (status, doc) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    for operation in [
        "createDocument",
        "updateDocument",
        "listDocuments",
        "getDocumentWithPages",
        "savePage",
        "deletePage",
        "saveHighlight",
        "deleteHighlight",
        "createScanJob",
        "listScanJobs",
    ] {
        let path = format!("/rpc/{operation}");
        assert!(doc["paths"].get(&path).is_some(), "missing {path}");
    }
}
