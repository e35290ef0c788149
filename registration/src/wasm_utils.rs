//! The two places the core touches its host: spawning a request future and
//! reading the wall clock. Native builds use tokio and chrono, the browser
//! build uses the JS event loop and `Date`.

/// Spawns onto the ambient tokio runtime. Callers must be inside one
/// (`#[tokio::main]` in both binaries).
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_async<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_async<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// RFC 3339 timestamp used for completion and mock vote records.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_iso_string() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(target_arch = "wasm32")]
pub fn now_iso_string() -> String {
    js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_rfc3339() {
        let stamp = now_iso_string();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok(), "{stamp}");
    }
}
