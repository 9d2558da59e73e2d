/// Liveness probe used by other shop services.
pub async fn ping() -> &'static str {
    "user-test"
}
