use crate::hostdir::HostDir;
use crate::http::encoding;
use crate::http::method::Method;
use crate::http::request::RequestContext;
use crate::http::router::Router;
use crate::http::status::Status;
use crate::http::{self, Response};
use std::sync::Arc;
use tracing::warn;

/// Registers the rule set in decision order. The order is semantic: an
/// existing host file shadows an echo target, and a User-Agent header
/// shadows the bare `/` response. File rules only exist when a host
/// directory was configured; without one, file requests fall through to 404.
pub fn register(router: &mut Router, store: Option<Arc<HostDir>>) {
    if let Some(store) = &store {
        let store = Arc::clone(store);
        router.add_handler(
            Method::GET,
            "/.*",
            Box::new(move |ctx| serve_file(ctx, &store)),
        );
    }

    router.add_handler(Method::GET, "/echo/<s>", Box::new(echo));
    router.add_handler(Method::GET, "/.*", Box::new(user_agent));
    router.add_handler(Method::GET, "/", Box::new(index));

    if let Some(store) = store {
        router.add_handler(
            Method::POST,
            "/.*",
            Box::new(move |ctx| store_file(ctx, &store)),
        );
    }
}

fn index(_ctx: &RequestContext) -> Option<Response> {
    Some(http::ok())
}

fn echo(ctx: &RequestContext) -> Option<Response> {
    let text = ctx.get_var("s")?;

    let mut headers = vec![("Content-Type".to_string(), "text/plain".to_string())];

    let accepted = ctx
        .get_header("accept-encoding")
        .map(encoding::parse_accept_encoding)
        .unwrap_or_default();
    let negotiated = encoding::negotiate(&accepted);

    // Only an encoding we can actually produce is applied and advertised;
    // a client accepting only deflate/br gets an identity body.
    let body = match negotiated.into_iter().find(|e| e.is_producible()) {
        Some(enc) => match encoding::gzip(text.as_bytes()) {
            Ok(compressed) => {
                headers.insert(0, ("Content-Encoding".to_string(), enc.to_string()));
                compressed
            }
            Err(error) => {
                warn!(%error, "compressing echo body failed");
                return Some(http::internal_error());
            }
        },
        None => text.as_bytes().to_vec(),
    };

    Some(Response::from_parts(Status::OK, headers, Some(body)))
}

fn user_agent(ctx: &RequestContext) -> Option<Response> {
    let agent = ctx.get_header("user-agent")?;

    Some(Response::from_parts(
        Status::OK,
        vec![("Content-Type".to_string(), "text/plain".to_string())],
        Some(agent.as_bytes().to_vec()),
    ))
}

fn serve_file(ctx: &RequestContext, store: &HostDir) -> Option<Response> {
    let target = ctx.request().url.as_str();
    if !store.exists(target) {
        return None;
    }

    match store.read(target) {
        Ok(content) => Some(Response::from_parts(
            Status::OK,
            vec![(
                "Content-Type".to_string(),
                "application/octet-stream".to_string(),
            )],
            Some(content),
        )),
        Err(error) => {
            // Listed a moment ago but unreadable now; treat it as a miss.
            warn!(path = target, %error, "host file unreadable after listing");
            None
        }
    }
}

fn store_file(ctx: &RequestContext, store: &HostDir) -> Option<Response> {
    if !store.dir_exists() {
        return Some(http::not_found());
    }

    let request = ctx.request();
    if store.write(&request.url, &request.content) {
        Some(http::created())
    } else {
        Some(http::internal_error())
    }
}
