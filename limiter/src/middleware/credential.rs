use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use governor::{
    Quota, RateLimiter, clock::QuantaClock, state::keyed::DashMapStateStore,
};
use std::{future::Future, num::NonZeroU32, pin::Pin, rc::Rc, sync::Arc};

type ClientStateStore = DashMapStateStore<String>;

/// Keyed limiter for the credential endpoints. Slows down password and
/// OTP guessing from a single address without affecting other clients.
pub struct CredentialLimiter {
    limiter: Arc<RateLimiter<String, ClientStateStore, QuantaClock>>,
}

impl CredentialLimiter {
    pub fn new(permits_per_minute: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(permits_per_minute).unwrap());
        let limiter = Arc::new(RateLimiter::keyed(quota));
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CredentialLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = CredentialLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(CredentialLimiterService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct CredentialLimiterService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter<String, ClientStateStore, QuantaClock>>,
}

impl<S, B> Service<ServiceRequest> for CredentialLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client_key = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let srv = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        Box::pin(async move {
            if limiter.check_key(&client_key).is_ok() {
                srv.call(req).await.map(|res| res.map_into_boxed_body())
            } else {
                log::warn!("credential rate limit hit for {}", client_key);
                Ok(req.error_response(AppError::TooManyRequests(
                    "Too many attempts. Please try again later.".to_string(),
                )))
            }
        })
    }
}
