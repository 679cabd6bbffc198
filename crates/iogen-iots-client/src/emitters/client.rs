/// Emit `client/client.ts`: the request envelope, the injected client
/// capability and the response validation error shared by all controllers.
pub fn emit_client() -> &'static str {
    include_str!("../../templates/client.ts")
}
