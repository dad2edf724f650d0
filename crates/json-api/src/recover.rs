//! Panic recovery middleware.

use std::{any::Any, panic::AssertUnwindSafe};

use futures::FutureExt as _;
use salvo::{
    http::{
        ResBody,
        header::{CONNECTION, HeaderValue},
    },
    prelude::*,
};
use tracing::error;

use crate::errors::ApiError;

/// Turn a panic anywhere downstream into a `500` and close the connection.
#[handler]
pub(crate) async fn recover_panic(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let outcome = AssertUnwindSafe(ctrl.call_next(req, depot, res))
        .catch_unwind()
        .await;

    if let Err(payload) = outcome {
        error!(
            method = %req.method(),
            path = %req.uri().path(),
            "request handler panicked: {}",
            panic_message(payload.as_ref())
        );

        res.headers_mut()
            .insert(CONNECTION, HeaderValue::from_static("close"));
        res.replace_body(ResBody::None);
        res.render(ApiError::ServerError);
        ctrl.skip_rest();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
