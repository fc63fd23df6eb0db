use axum::{
    body::Body,
    http::{header::CONTENT_SECURITY_POLICY, HeaderValue, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

const DIRECTIVES: &[(&str, &[&str])] = &[
    (
        "script-src",
        &[
            "'self'",
            "https://www.google-analytics.com",
            "https://www.googletagmanager.com",
            "https://widget.userkit.io",
            "https://api.userkit.io",
            "https://www.google.com/recaptcha/",
            "https://www.gstatic.com/recaptcha/",
            "https://apis.google.com",
        ],
    ),
    (
        "style-src",
        &[
            "'self'",
            "https://widget.userkit.io/css/",
            "https://fonts.googleapis.com",
            "https://fonts.gstatic.com",
            // Google sign-in injects inline styles.
            "'unsafe-inline'",
        ],
    ),
    (
        "frame-src",
        &["https://www.google.com/recaptcha/", "https://accounts.google.com"],
    ),
    (
        "img-src",
        &[
            "'self'",
            "data:",
            "https://www.google-analytics.com",
            "https://*.googleusercontent.com",
        ],
    ),
];

/// Render the policy as `directive source source; directive ...`.
pub fn content_security_policy() -> String {
    DIRECTIVES
        .iter()
        .map(|(directive, sources)| format!("{} {}", directive, sources.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

type MakePolicy = fn(&Response<Body>) -> Option<HeaderValue>;

/// Layer that stamps the policy onto every response.
pub fn csp_layer() -> SetResponseHeaderLayer<MakePolicy> {
    SetResponseHeaderLayer::overriding(CONTENT_SECURITY_POLICY, policy_header as MakePolicy)
}

fn policy_header(_: &Response<Body>) -> Option<HeaderValue> {
    HeaderValue::from_str(&content_security_policy()).ok()
}
