//! Injected configuration.
//!
//! The API and image hosts are deployment details, overridable at build
//! time (`WAY_API_URL`, `WAY_IMAGE_URL`); the defaults are same-origin
//! paths behind the site's reverse proxy.

/// Base URL every API path is joined onto.
pub fn api_base_url() -> String {
    option_env!("WAY_API_URL")
        .unwrap_or("/api")
        .trim_end_matches('/')
        .to_string()
}

/// Absolute URL for a server-hosted image reference.
pub fn image_url(path: &str) -> String {
    let base = option_env!("WAY_IMAGE_URL").unwrap_or("/uploads");
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_join_cleanly() {
        assert_eq!(image_url("pots/bowl.jpg"), "/uploads/pots/bowl.jpg");
        assert_eq!(image_url("/pots/bowl.jpg"), "/uploads/pots/bowl.jpg");
    }
}
