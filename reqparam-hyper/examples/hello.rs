use reqparam::extract::{ResolverConfig, DEFAULT_TIP};
use reqparam::http::StatusCode;
use reqparam::{App, Params};
use reqparam_hyper::Serve;
use tracing_subscriber::EnvFilter;

/// Checks the name by hand.
#[derive(Params)]
struct SayHiV1 {
    name: Option<String>,
}

async fn say_hi_v1(cx: SayHiV1) -> (StatusCode, String) {
    match cx.name {
        Some(name) if !name.trim().is_empty() => (StatusCode::OK, format!("hello,{}", name)),
        _ => (StatusCode::BAD_REQUEST, format!("name{}", DEFAULT_TIP)),
    }
}

/// Leaves the check to the resolver.
#[derive(Params)]
struct SayHiV2 {
    #[param(not_empty)]
    name: String,
}

async fn say_hi_v2(cx: SayHiV2) -> String {
    format!("hello,{}", cx.name)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,reqparam=debug")),
        )
        .init();

    App::with_config(ResolverConfig::new())
        .get("/hello/sayHiv1", say_hi_v1)
        .get("/hello/sayHiv2", say_hi_v2)
        .serve("127.0.0.1:3000")?
        .await?;

    Ok(())
}
