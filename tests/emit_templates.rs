use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use contentful_ingest::config::{ContentTypeSpec, TemplateSpec};
use contentful_ingest::contract::{BuildArtifact, MockArtifactSink, MockTemplateRenderer};
use contentful_ingest::emit;
use contentful_ingest::error::Error;
use serde_json::{json, Value};

fn post_template() -> TemplateSpec {
    TemplateSpec {
        path: PathBuf::from("views/post.sgr"),
        output: Arc::new(|entry| {
            let title = entry.get("title").and_then(Value::as_str).unwrap_or("untitled");
            format!("blog_posts/{title}.html")
        }),
    }
}

fn collecting_sink() -> (MockArtifactSink, Arc<Mutex<Vec<BuildArtifact>>>) {
    let collected: Arc<Mutex<Vec<BuildArtifact>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_collected = Arc::clone(&collected);
    let mut sink = MockArtifactSink::new();
    sink.expect_add_artifact().returning(move |artifact| {
        sink_collected.lock().unwrap().push(artifact);
        Ok(())
    });
    (sink, collected)
}

#[tokio::test]
async fn emits_one_artifact_per_entry_at_the_computed_path() {
    let entries = vec![json!({ "title": "first" }), json!({ "title": "second" })];

    let mut renderer = MockTemplateRenderer::new();
    renderer.expect_render().times(2).returning(|path, entry| {
        assert_eq!(path, PathBuf::from("views/post.sgr"));
        let title = entry.get("title").and_then(Value::as_str).unwrap_or("");
        Ok(format!("<h1>{title}</h1>"))
    });
    let (sink, collected) = collecting_sink();

    let spec = ContentTypeSpec::new("posts", "post");
    let template = post_template();

    let emitted = emit::emit_all(&renderer, &sink, &spec, &template, &entries)
        .await
        .expect("emission should succeed");
    assert_eq!(emitted, 2);

    let artifacts = collected.lock().unwrap();
    assert_eq!(artifacts.len(), 2, "one artifact per entry");
    assert_eq!(artifacts[0].path, "blog_posts/first.html");
    assert_eq!(artifacts[0].contents, b"<h1>first</h1>".to_vec());
    assert_eq!(artifacts[1].path, "blog_posts/second.html");
    assert_eq!(artifacts[1].contents, b"<h1>second</h1>".to_vec());
}

#[tokio::test]
async fn render_failure_aborts_remaining_entries_without_rollback() {
    let entries = vec![
        json!({ "title": "first" }),
        json!({ "title": "second" }),
        json!({ "title": "third" }),
    ];

    let mut renderer = MockTemplateRenderer::new();
    renderer.expect_render().returning(|_, entry| {
        match entry.get("title").and_then(Value::as_str) {
            Some("second") => Err("undefined template variable".into()),
            title => Ok(format!("<h1>{}</h1>", title.unwrap_or(""))),
        }
    });
    let (sink, collected) = collecting_sink();

    let spec = ContentTypeSpec::new("posts", "post");
    let template = post_template();

    let err = emit::emit_all(&renderer, &sink, &spec, &template, &entries)
        .await
        .err()
        .expect("emission should fail on the second entry");
    match err {
        Error::Template {
            content_type,
            reason,
        } => {
            assert_eq!(content_type, "posts");
            assert!(reason.contains("undefined template variable"));
        }
        other => panic!("expected a template error, got {other:?}"),
    }

    let artifacts = collected.lock().unwrap();
    assert_eq!(
        artifacts.len(),
        1,
        "the artifact registered before the failure should stay registered"
    );
    assert_eq!(artifacts[0].path, "blog_posts/first.html");
}

#[tokio::test]
async fn sink_failure_is_reported_as_a_template_error() {
    let entries = vec![json!({ "title": "first" })];

    let mut renderer = MockTemplateRenderer::new();
    renderer
        .expect_render()
        .returning(|_, _| Ok("<h1>first</h1>".to_string()));

    let mut sink = MockArtifactSink::new();
    sink.expect_add_artifact()
        .returning(|_| Err("output tree is sealed".into()));

    let spec = ContentTypeSpec::new("posts", "post");
    let template = post_template();

    let err = emit::emit_all(&renderer, &sink, &spec, &template, &entries)
        .await
        .err()
        .expect("emission should fail when registration fails");
    match err {
        Error::Template { reason, .. } => assert!(reason.contains("output tree is sealed")),
        other => panic!("expected a template error, got {other:?}"),
    }
}
