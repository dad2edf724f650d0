//! JSON bodies for errors raised by the framework itself.
//!
//! Unknown routes, unsupported methods and extractor failures never reach a
//! handler, so salvo would answer them with its HTML error page. The catcher
//! re-renders them as [`ApiError`].

use salvo::{
    catcher::Catcher,
    http::{Method, ResBody},
    prelude::*,
};

use crate::errors::ApiError;

pub(crate) fn json_catcher() -> Catcher {
    Catcher::default().hoop(render_api_error)
}

#[handler]
async fn render_api_error(req: &mut Request, res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    let brief = match res.take_body() {
        ResBody::None => None,
        ResBody::Error(status_error) => Some(status_error.brief),
        rendered => {
            // Already rendered by a handler; keep it.
            res.replace_body(rendered);
            ctrl.skip_rest();

            return;
        }
    };

    res.render(classify(status, req.method(), brief));
    ctrl.skip_rest();
}

fn classify(status: StatusCode, method: &Method, brief: Option<String>) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::METHOD_NOT_ALLOWED => ApiError::MethodNotAllowed(method.clone()),
        StatusCode::BAD_REQUEST => ApiError::BadRequest(describe(status, brief)),
        status if status.is_server_error() => ApiError::ServerError,
        status => ApiError::Rejected {
            status,
            message: describe(status, brief),
        },
    }
}

fn describe(status: StatusCode, brief: Option<String>) -> String {
    brief
        .map(|brief| brief.trim().trim_end_matches('.').to_lowercase())
        .filter(|brief| !brief.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_lowercase))
        .unwrap_or_else(|| "the request could not be processed".to_string())
}
