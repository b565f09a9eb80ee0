//! What generated functions send, checked through the call-plan model.

use clientgen::{ClientConfig, CollectionFormat, FunctionSpec, GeneratorConfig, ValidationError, generate_specs};
use clientgen_schema::{HttpMethod, SchemaDocument};
use serde_json::{Map, Value, json};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/membership.json");

fn setup(config: &GeneratorConfig) -> (ClientConfig, Vec<FunctionSpec>) {
    let doc = SchemaDocument::load(FIXTURE.as_ref()).expect("fixture loads");
    let (_, functions) = generate_specs(&doc, config).expect("fixture generates");
    (ClientConfig::for_document(&doc), functions)
}

fn function<'a>(functions: &'a [FunctionSpec], name: &str) -> &'a FunctionSpec {
    functions.iter().find(|f| f.name == name).expect("function exists")
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object arguments")
}

#[test]
fn get_card_fills_the_route() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let request = function(&functions, "getCard")
        .prepare(&args(json!({"id": "c-42"})), &client, &config)
        .unwrap();

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "/api/admin/cards/c-42");
    assert_eq!(request.body, None);
}

#[test]
fn missing_required_parameter_names_it() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let err = function(&functions, "adminListCards")
        .prepare(&Map::new(), &client, &config)
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError {
            parameter: "memberId".to_string(),
            operation: "adminListCards".to_string(),
        }
    );
}

#[test]
fn first_missing_path_parameter_is_reported() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let err = function(&functions, "getMembersByMemberIdTransactionsById")
        .prepare(&args(json!({"id": "t-1"})), &client, &config)
        .unwrap_err();
    assert_eq!(err.parameter, "memberId");
}

#[test]
fn multiple_path_parameters_are_substituted() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let request = function(&functions, "getMembersByMemberIdTransactionsById")
        .prepare(&args(json!({"memberId": "m-1", "id": "t-9"})), &client, &config)
        .unwrap();
    assert_eq!(request.url, "/api/members/m-1/transactions/t-9");
}

#[test]
fn path_values_are_substituted_verbatim() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let request = function(&functions, "getMembersByMemberIdTransactionsById")
        .prepare(&args(json!({"memberId": "{id}", "id": "t-9"})), &client, &config)
        .unwrap();
    assert_eq!(request.url, "/api/members/{id}/transactions/t-9");
}

#[test]
fn array_queries_follow_the_run_format() {
    let cases = [
        (CollectionFormat::Multi, "/api/admin/billing/plans?pageNum=2&types=membership&types=rental"),
        (CollectionFormat::Csv, "/api/admin/billing/plans?pageNum=2&types=membership%2Crental"),
        (
            CollectionFormat::Brackets,
            "/api/admin/billing/plans?pageNum=2&types%5B%5D=membership&types%5B%5D=rental",
        ),
    ];

    for (format, expected) in cases {
        let config = GeneratorConfig::default().with_collection_format(format);
        let (client, functions) = setup(&config);
        let request = function(&functions, "adminListBillingPlans")
            .prepare(
                &args(json!({"pageNum": 2, "orderBy": null, "types": ["membership", "rental"]})),
                &client,
                &config,
            )
            .unwrap();
        assert_eq!(request.url, expected, "format {format}");
    }
}

#[test]
fn optional_queries_can_be_omitted_entirely() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let request = function(&functions, "adminListBillingPlans")
        .prepare(&args(json!({"types": []})), &client, &config)
        .unwrap();
    assert_eq!(request.url, "/api/admin/billing/plans");
}

#[test]
fn create_card_wraps_the_body() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);

    let request = function(&functions, "adminCreateCard")
        .prepare(
            &args(json!({"createAccessCardDetails": {"memberId": "m-1", "uid": "04A2"}})),
            &client,
            &config,
        )
        .unwrap();

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "/api/admin/cards");
    assert_eq!(request.body, Some(json!({"card": {"memberId": "m-1", "uid": "04A2"}})));
}

#[test]
fn client_config_overrides_the_base_path() {
    let config = GeneratorConfig::default();
    let (client, functions) = setup(&config);
    let client = client.with_base_url("https://members.example.com").with_base_path("/v2");

    let request = function(&functions, "adminDeleteCard")
        .prepare(&args(json!({"id": "c-1"})), &client, &config)
        .unwrap();
    assert_eq!(request.url, "https://members.example.com/v2/admin/cards/c-1");
    assert_eq!(request.method, HttpMethod::Delete);
}

#[test]
fn responses_are_unwrapped_by_envelope_key() {
    let config = GeneratorConfig::default();
    let (_, functions) = setup(&config);

    let card = json!({"id": "c-1", "holder": "Ada", "expiry": 1, "validity": "lost", "uid": "04"});
    let list = function(&functions, "adminListCards");
    assert_eq!(list.extract_data(json!({"cards": [card.clone()]})), json!([card]));

    let transaction = function(&functions, "getMembersByMemberIdTransactionsById");
    assert_eq!(transaction.extract_data(json!({"id": "t-1"})), json!({"id": "t-1"}));
}
