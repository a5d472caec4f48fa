/// Integration tests for the application layer
mod test_utilities;

use si_usage_report::prelude::*;
use std::time::{Duration, Instant};
use test_utilities::mocks::*;

fn inline(guid: &str, offering: &str, plan: &str) -> ServiceInstanceRecord {
    ServiceInstanceRecord::managed(guid, format!("{}-db", guid))
        .with_plan(Some(format!("{}-{}", offering, plan)), Some(plan.to_string()))
        .with_offering(Some(offering.to_string()), Some(offering.to_string()))
}

fn small_mixed_set() -> Vec<ServiceInstanceRecord> {
    vec![
        inline("si-1", "p.mysql", "10mb"),
        inline("si-2", "p.rabbit", "lemur"),
        inline("si-3", "p.mysql", "100mb"),
        inline("si-4", "p.redis", "medium"),
        inline("si-5", "p.mysql", "10mb"),
        inline("si-6", "p.pcc", "small"),
        inline("si-7", "p.rabbit", "lemur"),
        inline("si-8", "p.mysql", "10mb"),
    ]
}

fn use_case(
    records: Vec<ServiceInstanceRecord>,
    catalog: MockServiceCatalog,
) -> GenerateUsageReportUseCase<
    MockSession,
    MockServiceInstanceRepository,
    MockServiceCatalog,
    MockProgressReporter,
> {
    GenerateUsageReportUseCase::new(
        MockSession::logged_in(),
        MockServiceInstanceRepository::new(records),
        catalog,
        MockProgressReporter::new(),
    )
}

#[tokio::test]
async fn test_small_mixed_set_json_output() {
    let response = use_case(small_mixed_set(), MockServiceCatalog::new())
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    let json = JsonReportFormatter::new().format(&response.report).unwrap();
    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();
    let expected = serde_json::json!({
        "products": [
            {"name": "p.mysql", "plans": [
                {"planName": "10mb", "instanceCount": 3},
                {"planName": "100mb", "instanceCount": 1}
            ]},
            {"name": "p.pcc", "plans": [{"planName": "small", "instanceCount": 1}]},
            {"name": "p.rabbit", "plans": [{"planName": "lemur", "instanceCount": 2}]},
            {"name": "p.redis", "plans": [{"planName": "medium", "instanceCount": 1}]}
        ]
    });

    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_small_mixed_set_lexicographic_order() {
    let request = UsageReportRequest::new(PlanOrdering::Lexicographic, Duration::from_secs(10));
    let response = use_case(small_mixed_set(), MockServiceCatalog::new())
        .execute(request)
        .await
        .unwrap();

    let mysql = response.report.product("p.mysql").unwrap();
    assert_eq!(
        mysql.plans(),
        &[Plan::new("100mb", 1), Plan::new("10mb", 3)]
    );
}

#[tokio::test]
async fn test_default_keeps_plans_in_first_seen_order() {
    let mut records = Vec::new();
    for (plan, count) in [("panda", 3), ("turtle", 2), ("hippo", 1)] {
        records.extend((0..count).map(|i| inline(&format!("{}-{}", plan, i), "p.mysql", plan)));
    }

    let response = use_case(records, MockServiceCatalog::new())
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    let names: Vec<&str> = response
        .report
        .product("p.mysql")
        .unwrap()
        .plans()
        .iter()
        .map(|plan| plan.plan_name())
        .collect();
    assert_eq!(names, ["panda", "turtle", "hippo"]);
}

#[tokio::test]
async fn test_unmanaged_offerings_are_invisible() {
    let mut records = small_mixed_set();
    records.extend((0..50).map(|i| inline(&format!("x-{}", i), "elephantsql", "turtle")));
    records.push(ServiceInstanceRecord::new(
        "ups-1",
        "creds",
        InstanceKind::UserProvided,
    ));

    let response = use_case(records, MockServiceCatalog::new())
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    assert!(response.report.product("elephantsql").is_none());
    assert_eq!(response.report.total_instances(), 8);
    assert_eq!(response.instances_fetched, 59);
    assert!(response.unresolved.is_empty());
}

#[tokio::test]
async fn test_unauthenticated_session_makes_no_calls() {
    let repository = MockServiceInstanceRepository::new(small_mixed_set());
    let calls = repository.calls.clone();
    let use_case = GenerateUsageReportUseCase::new(
        MockSession::logged_out(),
        repository,
        MockServiceCatalog::new(),
        MockProgressReporter::new(),
    );

    let err = use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<UsageReportError>(),
        Some(UsageReportError::NotAuthenticated)
    ));
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_emptiness_differs_from_empty_list() {
    let use_case = GenerateUsageReportUseCase::new(
        MockSession::logged_in(),
        MockServiceInstanceRepository::with_empty_response(),
        MockServiceCatalog::new(),
        MockProgressReporter::new(),
    );
    let err = use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<UsageReportError>(),
        Some(UsageReportError::EmptyUpstreamResponse { .. })
    ));

    let response = use_case_for_empty_list()
        .execute(UsageReportRequest::default())
        .await
        .unwrap();
    assert!(response.report.is_empty());
    assert_eq!(
        JsonReportFormatter::new().format(&response.report).unwrap(),
        "{\n  \"products\": []\n}\n"
    );
}

fn use_case_for_empty_list() -> GenerateUsageReportUseCase<
    MockSession,
    MockServiceInstanceRepository,
    MockServiceCatalog,
    MockProgressReporter,
> {
    use_case(vec![], MockServiceCatalog::new())
}

#[tokio::test]
async fn test_secondary_lookups_resolve_and_cache() {
    let records: Vec<ServiceInstanceRecord> = (0..40)
        .map(|i| {
            let plan = if i % 4 == 0 { "plan-large" } else { "plan-small" };
            ServiceInstanceRecord::managed(format!("si-{}", i), format!("cache-{}", i))
                .with_plan(Some(plan.to_string()), None)
        })
        .collect();
    let catalog = CachingServiceCatalog::new(
        MockServiceCatalog::new()
            .with_plan("plan-large", "large", "off-redis")
            .with_plan("plan-small", "small", "off-redis")
            .with_offering("off-redis", "p.redis"),
    );

    let use_case = GenerateUsageReportUseCase::new(
        MockSession::logged_in(),
        MockServiceInstanceRepository::new(records),
        catalog,
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    assert_eq!(
        response.report,
        Report::new(vec![Product::new(
            "p.redis",
            vec![Plan::new("large", 10), Plan::new("small", 30)]
        )])
    );
}

#[tokio::test]
async fn test_unresolved_instance_is_reported_not_fatal() {
    let records = vec![
        inline("si-1", "p.mysql", "10mb"),
        ServiceInstanceRecord::managed("si-2", "ghost").with_plan(Some("plan-gone".to_string()), None),
    ];
    let progress = MockProgressReporter::new();
    let use_case = GenerateUsageReportUseCase::new(
        MockSession::logged_in(),
        MockServiceInstanceRepository::new(records),
        MockServiceCatalog::new(),
        progress.clone(),
    );

    let response = use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    assert_eq!(response.report.total_instances(), 1);
    assert_eq!(response.unresolved.len(), 1);
    assert_eq!(response.unresolved[0].instance_name, "ghost");
    assert!(progress
        .get_messages()
        .iter()
        .any(|m| m.contains("ghost")));
}

#[tokio::test]
async fn test_scale_fixture_exact_counts_in_bounded_time() {
    let counts = [("panda", 1654usize), ("turtle", 6616), ("hippo", 827)];
    let mut records = Vec::with_capacity(9097);
    for (plan, count) in counts {
        for i in 0..count {
            records.push(
                ServiceInstanceRecord::managed(format!("{}-{}", plan, i), format!("db-{}-{}", plan, i))
                    .with_plan(Some(format!("plan-{}", plan)), None),
            );
        }
    }
    assert_eq!(records.len(), 9097);

    let catalog = MockServiceCatalog::new()
        .with_plan("plan-panda", "panda", "off-mysql")
        .with_plan("plan-turtle", "turtle", "off-mysql")
        .with_plan("plan-hippo", "hippo", "off-mysql")
        .with_offering("off-mysql", "p.mysql");

    let use_case = use_case(records, catalog);

    let started = Instant::now();
    let response = use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
    assert_eq!(
        response.report,
        Report::new(vec![Product::new(
            "p.mysql",
            vec![
                Plan::new("panda", 1654),
                Plan::new("turtle", 6616),
                Plan::new("hippo", 827)
            ]
        )])
    );
    assert_eq!(response.instances_fetched, 9097);
    assert!(response.unresolved.is_empty());
}

#[tokio::test]
async fn test_progress_reports_every_page() {
    let records: Vec<ServiceInstanceRecord> = (0..1200)
        .map(|i| inline(&format!("si-{}", i), "p.pcc", "small"))
        .collect();
    let progress = MockProgressReporter::new();
    let use_case = GenerateUsageReportUseCase::new(
        MockSession::logged_in(),
        MockServiceInstanceRepository::new(records),
        MockServiceCatalog::new(),
        progress.clone(),
    );

    use_case
        .execute(UsageReportRequest::default())
        .await
        .unwrap();

    let messages = progress.get_messages();
    assert!(messages.iter().any(|m| m.starts_with("Progress: 3/3")));
    assert!(messages.iter().any(|m| m.starts_with("Completed:")));
}
