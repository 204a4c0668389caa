#![allow(clippy::unwrap_used)]
// End-to-end tests of the list core: stores, filters, edit sessions and
// the remote load, driven the way the TUI drives them.

use std::collections::HashSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crmdash_api::{DemoClient, Endpoints, TransportConfig};
use crmdash_core::{
    CategoryFilter, CoreError, DeleteOutcome, Draft, EditMode, Lead, LeadDraft, LeadSearch,
    LeadSource, LeadsView, ListStore, LoadState, Product, ProductSource, ProductsView, Record,
    RecordId, spawn_load,
};

// ── Fixtures ────────────────────────────────────────────────────────

fn lead(id: u64, name: &str, company: &str, city: &str) -> Lead {
    Lead {
        id: RecordId::new(id),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        company: company.into(),
        city: city.into(),
    }
}

fn product(id: u64, category: &str) -> Product {
    Product {
        id: RecordId::new(id),
        title: format!("Item {id}"),
        price: 10.0,
        category: category.into(),
        image: String::new(),
        description: "Thing".into(),
        rating: None,
    }
}

fn ids<R: Record>(records: &[Arc<R>]) -> Vec<u64> {
    records.iter().map(|r| r.id().get()).collect()
}

fn leads_view() -> LeadsView {
    let mut view = LeadsView::new();
    view.on_load_finished(Ok(vec![
        lead(1, "Ann", "Acme", "Boston"),
        lead(2, "Raj", "Globex", "Denver"),
        lead(3, "Lee", "Initech", "Austin"),
    ]));
    view
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn scenario_a_search_after_load() {
    let mut view = LeadsView::new();
    view.on_load_finished(Ok(vec![lead(1, "Ann", "Acme", "Boston")]));

    view.on_search_change("ann");
    assert_eq!(ids(view.store().filtered()), vec![1]);

    view.on_search_change("zz");
    assert!(view.store().filtered().is_empty());
    assert_eq!(view.summary(), (0, 1));
}

#[test]
fn scenario_b_create_prepends_fresh_record() {
    let mut view = leads_view();
    let before: HashSet<RecordId> = view.store().all().iter().map(|l| l.id).collect();

    view.on_form_open().unwrap();
    let created = view
        .on_form_submit(LeadDraft {
            name: "Bob".into(),
            email: "b@x.com".into(),
            company: "Co".into(),
            city: "NY".into(),
        })
        .unwrap();

    assert_eq!(view.store().len(), 4);
    assert_eq!(view.store().all()[0].id, created.id);
    assert!(!before.contains(&created.id));
    assert_eq!(view.session().mode(), EditMode::Idle);
}

#[test]
fn scenario_c_edit_changes_only_the_edited_field() {
    let mut view = leads_view();
    let original = view.store().get(RecordId::new(1)).unwrap();

    view.on_form_edit_request(RecordId::new(1)).unwrap();
    let mut draft = view.session().draft().clone();
    assert_eq!(draft, original.to_draft());

    draft.city = "LA".into();
    view.on_form_submit(draft).unwrap();

    let edited = view.store().get(RecordId::new(1)).unwrap();
    assert_eq!(
        *edited,
        Lead {
            city: "LA".into(),
            ..(*original).clone()
        }
    );
    assert_eq!(ids(view.store().all()), vec![1, 2, 3]);
    assert_eq!(view.session().mode(), EditMode::Idle);
}

#[test]
fn scenario_d_delete_confirmed_and_absent() {
    let mut view = leads_view();

    let outcome = view.on_delete_request(RecordId::new(1), |_| true).unwrap();
    assert!(matches!(outcome, DeleteOutcome::Removed(ref l) if l.name == "Ann"));
    assert!(!view.store().contains(RecordId::new(1)));

    let before = ids(view.store().all());
    let err = view
        .on_delete_request(RecordId::new(999), |_| true)
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(ids(view.store().all()), before);
}

#[test]
fn scenario_e_category_selection() {
    let mut view = ProductsView::new();
    view.on_load_finished(Ok(vec![
        product(1, "electronics"),
        product(2, "jewelery"),
        product(3, "electronics"),
        product(4, "men's clothing"),
    ]));
    assert_eq!(view.categories().len(), 4);

    view.on_category_change("all");
    assert_eq!(ids(view.store().filtered()), vec![1, 2, 3, 4]);

    view.on_category_change("electronics");
    assert_eq!(ids(view.store().filtered()), vec![1, 3]);
    assert!(view.store().filtered_len() <= view.store().len());
    assert_eq!(
        view.store().criteria(),
        &CategoryFilter::Category("electronics".into())
    );
}

#[test]
fn declined_delete_changes_nothing() {
    let mut view = leads_view();
    let version = view.store().version();

    let outcome = view.on_delete_request(RecordId::new(2), |_| false).unwrap();

    assert!(matches!(outcome, DeleteOutcome::Declined));
    assert_eq!(view.store().len(), 3);
    assert_eq!(view.store().version(), version);
}

#[test]
fn cancel_from_idle_twice_is_a_no_op() {
    let mut view = leads_view();
    let version = view.store().version();

    view.on_form_cancel();
    view.on_form_cancel();

    assert_eq!(view.session().mode(), EditMode::Idle);
    assert_eq!(view.store().version(), version);
}

#[test]
fn rejected_submit_keeps_form_open_with_input() {
    let mut view = leads_view();
    view.on_form_open().unwrap();

    let draft = LeadDraft {
        name: "   ".into(),
        email: "b@x.com".into(),
        company: "Co".into(),
        city: "NY".into(),
    };
    let err = view.on_form_submit(draft.clone()).unwrap_err();

    assert!(matches!(err, CoreError::Validation(ref v) if v.fields == ["name"]));
    assert_eq!(view.session().mode(), EditMode::Creating);
    assert_eq!(view.session().draft(), &draft);
    assert_eq!(view.store().len(), 3);
}

// ── Properties ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Create(String, String),
    Edit(u64, String),
    Delete(u64),
    Search(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        ("[a-c]{1,4}", "[a-c]{1,4}").prop_map(|(name, company)| Op::Create(name, company)),
        (0u64..8, "[a-c]{1,4}").prop_map(|(idx, company)| Op::Edit(idx, company)),
        (0u64..8).prop_map(Op::Delete),
        "[a-cA-C]{0,2}".prop_map(Op::Search),
    ]
}

/// Pick an existing id by position, or an id that is surely absent.
fn nth_id(store: &ListStore<Lead, LeadSearch>, idx: u64) -> RecordId {
    usize::try_from(idx)
        .ok()
        .and_then(|i| store.all().get(i))
        .map_or(RecordId::new(u64::MAX), |l| l.id)
}

proptest! {
    #[test]
    fn store_invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..40)) {
        let mut view = leads_view();

        for op in ops {
            match op {
                Op::Create(name, company) => {
                    let before = view.store().len();
                    view.on_form_open().unwrap();
                    let created = view
                        .on_form_submit(LeadDraft {
                            name,
                            email: "x@y.z".into(),
                            company,
                            city: "Town".into(),
                        })
                        .unwrap();
                    prop_assert_eq!(view.store().all()[0].id, created.id);
                    prop_assert_eq!(view.store().len(), before + 1);
                }
                Op::Edit(idx, company) => {
                    let id = nth_id(view.store(), idx);
                    if view.on_form_edit_request(id).is_ok() {
                        let position = view.store().all().iter().position(|l| l.id == id);
                        let mut draft = view.session().draft().clone();
                        draft.company = company;
                        view.on_form_submit(draft).unwrap();
                        prop_assert_eq!(
                            view.store().all().iter().position(|l| l.id == id),
                            position
                        );
                    }
                }
                Op::Delete(idx) => {
                    let id = nth_id(view.store(), idx);
                    let existed = view.store().contains(id);
                    let result = view.on_delete_request(id, |_| true);
                    prop_assert_eq!(result.is_ok(), existed);
                    prop_assert!(!view.store().contains(id));
                }
                Op::Search(text) => view.on_search_change(&text),
            }

            // Uniqueness.
            let unique: HashSet<RecordId> = view.store().all().iter().map(|l| l.id).collect();
            prop_assert_eq!(unique.len(), view.store().len());

            // Filter consistency and order preservation, against a plain scan.
            let needle = view.store().criteria().text().to_lowercase();
            let expected: Vec<u64> = view
                .store()
                .all()
                .iter()
                .filter(|l| {
                    l.name.to_lowercase().contains(&needle)
                        || l.company.to_lowercase().contains(&needle)
                })
                .map(|l| l.id.get())
                .collect();
            prop_assert_eq!(ids(view.store().filtered()), expected);
            prop_assert!(view.session().mode() == EditMode::Idle);
        }
    }

    #[test]
    fn category_filter_never_grows_the_list(
        categories in prop::collection::vec("[a-d]", 0..20),
        pick in "[a-e]|all",
    ) {
        let mut view = ProductsView::new();
        let products = categories
            .iter()
            .zip(1u64..)
            .map(|(c, id)| product(id, c))
            .collect();
        view.on_load_finished(Ok(products));
        view.on_category_change(&pick);

        prop_assert!(view.store().filtered_len() <= view.store().len());
        if pick == "all" {
            prop_assert_eq!(view.store().filtered_len(), view.store().len());
        } else {
            prop_assert!(view.store().filtered().iter().all(|p| p.category == pick));
        }
    }
}

// ── Remote load ─────────────────────────────────────────────────────

async fn client_for(server: &MockServer) -> Arc<DemoClient> {
    let endpoints = Endpoints::from_base(&server.uri()).unwrap();
    Arc::new(DemoClient::new(endpoints, &TransportConfig::default()).unwrap())
}

#[tokio::test]
async fn leads_load_through_the_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz",
              "address": { "city": "Gwenborough" }, "company": { "name": "Romaguera-Crona" } },
            { "id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv",
              "address": { "city": "Wisokyburgh" }, "company": { "name": "Deckow-Crist" } }
        ])))
        .mount(&server)
        .await;

    let source = Arc::new(LeadSource::new(client_for(&server).await));
    let mut view = LeadsView::new();

    view.on_load_started();
    let result = spawn_load(source, CancellationToken::new()).wait().await;
    view.on_load_finished(result);

    assert!(matches!(view.load_state(), LoadState::Loaded { count: 2, .. }));
    view.on_search_change("deckow");
    assert_eq!(view.store().filtered()[0].name, "Ervin Howell");
}

#[tokio::test]
async fn failed_leads_load_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = Arc::new(LeadSource::new(client_for(&server).await));
    let mut view = LeadsView::new();

    view.on_load_started();
    view.on_load_finished(spawn_load(source, CancellationToken::new()).wait().await);

    let message = view.load_state().error().unwrap();
    assert!(message.starts_with("Failed to load leads"), "{message}");
    assert!(view.store().is_empty());
}

#[tokio::test]
async fn products_load_and_retry_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing",
              "description": "Pack", "image": "", "rating": { "rate": 3.9, "count": 120 } },
            { "id": 2, "title": "Ring", "price": 695, "category": "jewelery",
              "description": "Shiny", "image": "" }
        ])))
        .mount(&server)
        .await;

    let source = Arc::new(ProductSource::new(client_for(&server).await));
    let mut view = ProductsView::new();

    view.on_load_started();
    view.on_load_finished(spawn_load(Arc::clone(&source), CancellationToken::new()).wait().await);
    assert!(matches!(view.load_state(), LoadState::Failed { retryable: true, .. }));

    view.on_load_started();
    view.on_load_finished(spawn_load(source, CancellationToken::new()).wait().await);
    assert!(matches!(view.load_state(), LoadState::Loaded { count: 2, .. }));
    assert_eq!(
        view.categories(),
        vec![
            CategoryFilter::All,
            CategoryFilter::Category("men's clothing".into()),
            CategoryFilter::Category("jewelery".into()),
        ]
    );
    assert_eq!(view.store().get(RecordId::new(1)).unwrap().rating.unwrap().count, 120);
}

#[test]
fn draft_fields_are_listed_in_form_order() {
    let labels: Vec<&str> = LeadDraft::FIELDS.iter().map(|f| LeadDraft::label(*f)).collect();
    assert_eq!(labels, vec!["Name", "Email", "Company", "City"]);
}
