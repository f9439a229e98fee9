use std::path::{Path, PathBuf};

use specwalk_core::merge_documents;
use specwalk_core::transform::Conventions;

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

#[test]
fn merge_widgets_then_billing() {
    let docs = [fixture("widgets/openapi.yaml"), fixture("billing/openapi.yaml")];
    let api = merge_documents(&docs, &Conventions::default()).unwrap();

    // first document wins the metadata
    assert_eq!(api.title, "Widget Service");
    assert_eq!(api.version, "2.1.0");
    assert_eq!(api.servers.len(), 3);

    let ids: Vec<&str> = api.methods.iter().map(|m| m.api_name.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "ListGadgets",
            "GetGadget",
            "GetWidget",
            "UpdateWidget",
            "CreateWidget",
            "ListInvoices",
        ]
    );

    let consts: Vec<&str> = api.consts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(consts, vec!["Kind", "Color", "Status"]);

    assert_eq!(api.schemas.last().unwrap().name, "ListInvoicesInput");
    assert_eq!(api.ref_docs.len(), 1);

    let billing = api.methods.last().unwrap();
    assert!(billing.source.ends_with("billing/openapi.yaml"));
}

#[test]
fn merge_concatenates_servers() {
    let docs = [fixture("widgets/openapi.yaml"), fixture("billing/openapi.yaml")];
    let api = merge_documents(&docs, &Conventions::default()).unwrap();

    let urls: Vec<&str> = api.servers.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.widgets.example.com",
            "http://localhost:8080",
            "https://billing.example.com",
        ]
    );
}

#[test]
fn merge_manifest_sorted_by_dir() {
    let docs = [fixture("widgets/openapi.yaml"), fixture("billing/openapi.yaml")];
    let api = merge_documents(&docs, &Conventions::default()).unwrap();

    let dirs: Vec<&str> = api.specs.iter().map(|s| s.dir.as_str()).collect();
    assert_eq!(dirs, vec!["billing", "widgets"]);
    assert_eq!(api.specs[0].title, "Billing Service");
    assert_eq!(api.specs[0].names["go"], "BillingService");
    assert_eq!(api.specs[1].title, "Widget Service");
    assert!(api.specs[1].doc.ends_with("widgets/openapi.yaml"));
}

#[test]
fn merge_order_follows_input() {
    let docs = [fixture("billing/openapi.yaml"), fixture("widgets/openapi.yaml")];
    let api = merge_documents(&docs, &Conventions::default()).unwrap();

    assert_eq!(api.title, "Billing Service");
    assert_eq!(api.servers.len(), 3);
    assert_eq!(api.servers[0].url, "https://billing.example.com");
    assert_eq!(api.methods[0].api_name, "ListInvoices");
    assert_eq!(api.consts[0].name, "Status");

    // manifest order does not depend on input order
    let dirs: Vec<&str> = api.specs.iter().map(|s| s.dir.as_str()).collect();
    assert_eq!(dirs, vec!["billing", "widgets"]);
}

#[test]
fn merge_fails_on_any_bad_document() {
    let docs = [fixture("billing/openapi.yaml"), fixture("missing/openapi.yaml")];
    let err = merge_documents(&docs, &Conventions::default()).unwrap_err();
    assert!(err.to_string().contains("missing/openapi.yaml"));
}
