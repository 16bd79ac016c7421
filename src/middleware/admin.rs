use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::middleware::auth::{load_session, session_pool, validate_jwt_from_request};
use crate::services::error::ServiceError;

pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let (claims, pool) = match validate_jwt_from_request(&req).and_then(|claims| Ok((claims, session_pool(&req)?))) {
            Ok(found) => found,
            Err(e) => return Box::pin(async move { Err(e) }),
        };

        Box::pin(async move {
            // The stored role decides, not the one baked into the token
            let claims = load_session(&pool, claims).await?;
            if !claims.is_admin() {
                tracing::warn!("Non-admin user attempted admin access: {} (role: {})", claims.username, claims.role);
                return Err(ServiceError::Forbidden("Admin access required".into()).into());
            }

            req.extensions_mut().insert(claims);
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
