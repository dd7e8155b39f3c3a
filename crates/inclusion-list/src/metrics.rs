use crate::error::ValidationError;

pub(crate) const VALIDATOR: &str = "validator";
pub(crate) const RECONCILER: &str = "reconciler";

pub(crate) fn record_accepted(component: &'static str) {
    metrics::counter!("inclusion_list_accepted_total", "component" => component).increment(1);
}

pub(crate) fn record_rejection(component: &'static str, err: &ValidationError) {
    metrics::counter!(
        "inclusion_list_rejections_total",
        "component" => component,
        "reason" => err.reason()
    )
    .increment(1);
}

pub(crate) fn record_nonce_lookup_failure() {
    metrics::counter!("inclusion_list_nonce_lookup_failures_total").increment(1);
}
