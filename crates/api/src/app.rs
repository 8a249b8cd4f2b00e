use crate::handlers::{
    audit_configuration::{available_fields, get_audit_configuration, update_audit_configuration},
    audit_history::audit_history,
    company::{get_company, update_company},
    health::health_check,
    invitations::{cancel_invitation, create_invitation, list_invitations},
    manage_employee::{approve_employee, list_employees, pending_approvals, update_employee},
    manual_time_log::{manual_check_in, manual_check_out},
    register_employee::register_employee,
    register_manager::register_manager,
    time_log::{check_in, check_out, list_time_logs},
    time_log_approval::{approve_time_log, pending_time_logs, reject_time_log},
    update_profile::update_profile,
};
use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use chronos_core::{AppState, SecurityConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    let public_router = create_public_routers(metric_handle);
    let protected_router = create_secured_routers(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .layer(axum::extract::DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(https_redirect_middleware))
        .layer(metric_layer)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    // peer-ip keying needs a real socket, which test servers lack
    if state.config.app_env != "test" {
        let governor = GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(20)
            .finish();

        match governor {
            Some(conf) => router = router.layer(GovernorLayer::new(Arc::new(conf))),
            None => warn!("Rate limiter configuration invalid, continuing without it"),
        }
    }

    router.with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/audit/history", get(audit_history))
        .route(
            "/api/audit/configuration",
            get(get_audit_configuration).put(update_audit_configuration),
        )
        .route("/api/audit/available-fields", get(available_fields))
        .route("/api/timelog", get(list_time_logs))
        .route("/api/timelog/checkin", post(check_in))
        .route("/api/timelog/checkout", post(check_out))
        .route("/api/timelog/manual-checkin", post(manual_check_in))
        .route("/api/timelog/manual-checkout", post(manual_check_out))
        .route("/api/timelog/approve", post(approve_time_log))
        .route("/api/timelog/reject", post(reject_time_log))
        .route("/api/timelog/pending", get(pending_time_logs))
        .route("/api/users/me", put(update_profile))
        .route("/api/manager/company", get(get_company).put(update_company))
        .route(
            "/api/manager/invitations",
            get(list_invitations).post(create_invitation),
        )
        .route(
            "/api/manager/invitations/{invitation_id}",
            delete(cancel_invitation),
        )
        .route("/api/manager/employees", get(list_employees))
        .route("/api/manager/employees/pending", get(pending_approvals))
        .route("/api/manager/employees/approve", post(approve_employee))
        .route("/api/manager/employees/{user_id}", put(update_employee))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_public_routers(metric_handle: PrometheusHandle) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/manager/register", post(register_manager))
        .route("/api/employee/register", post(register_employee))
        .route(
            "/metrics",
            get(move || std::future::ready(metric_handle.render())),
        )
}

async fn https_redirect_middleware(
    req: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let production = std::env::var("APP_ENV").is_ok_and(|env| env == "production");

    if production {
        let headers = req.headers();
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok());

        if proto == Some("http") {
            let host = headers
                .get(http::header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");
            let path_and_query = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("");

            let redirect_url = format!("https://{}{}", host, path_and_query);
            return axum::response::Redirect::permanent(&redirect_url).into_response();
        }
    }

    next.run(req).await
}
