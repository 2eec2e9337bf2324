use serde::Serialize;

/// Message shown for any storage-level failure. The real cause stays
/// in the logs; callers may safely retry since nothing was committed.
pub const ERR_UNAVAILABLE: &str = "Service temporarily unavailable. Please try again.";

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

/// Generates an actix POST handler per `(name, url, request, response)`
/// tuple, delegating to `name_impl`. A failed `_impl` is logged with
/// its full error chain; the caller only ever receives the outermost
/// message on the response's `err` field.
#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    ctx: web::Data<AppContext>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](ctx, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            log::warn!(concat!(stringify!($func_name), " rejected: {:#}"), err);
                            $response::err(err.to_string())
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}
