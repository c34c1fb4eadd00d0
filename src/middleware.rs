use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, FromRequest, HttpRequest};
use log::{error, info, warn};
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::models::RoleName;
use crate::services::AuthService;

/// The authenticated caller, extracted from the bearer token on the request.
/// Handlers take this as a parameter; routes without it stay public.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub roles: Vec<RoleName>,
}

impl AuthUser {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    pub fn require_role(&self, role: RoleName) -> Result<(), ApiError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(ApiError::ForbiddenError(format!(
                "Requires the '{}' role",
                role
            )))
        }
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, ApiError> {
        let config = req
            .app_data::<web::Data<AppConfig>>()
            .ok_or_else(|| {
                ApiError::InternalError("Application config is not registered".to_string())
            })?;

        // Expected format: "Bearer TOKEN"
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::AuthError("Authentication token required".to_string()))?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::AuthError("Authentication token required".to_string()))?;

        let claims = AuthService::decode_token(token, config.get_ref())?;
        Ok(AuthUser {
            id: claims.user_id,
            roles: claims.roles,
        })
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(AuthUser::from_http_request(req))
    }
}

// Logger middleware: one line per completed request with status and latency
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + 'static>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let client_ip = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_owned())
            .unwrap_or_else(|| String::from("unknown"));

        let service = self.service.clone();

        Box::pin(async move {
            let start = std::time::Instant::now();
            let res = service.call(req).await?;
            let elapsed = start.elapsed();
            let status = res.status();

            if status.is_server_error() {
                error!(
                    "{} {} -> \x1B[1;31m{}\x1B[0m in {:.2?} from {}",
                    method, path, status, elapsed, client_ip
                );
            } else if status.is_client_error() {
                warn!(
                    "{} {} -> \x1B[1;33m{}\x1B[0m in {:.2?} from {}",
                    method, path, status, elapsed, client_ip
                );
            } else {
                info!(
                    "{} {} -> \x1B[1;32m{}\x1B[0m in {:.2?} from {}",
                    method, path, status, elapsed, client_ip
                );
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_role_accepts_held_role() {
        let user = AuthUser {
            id: 1,
            roles: vec![RoleName::Mentor, RoleName::Student],
        };
        assert!(user.require_role(RoleName::Mentor).is_ok());
        assert!(user.require_role(RoleName::Student).is_ok());
    }

    #[test]
    fn require_role_refuses_missing_role() {
        let user = AuthUser {
            id: 1,
            roles: vec![RoleName::Mentee],
        };
        assert!(matches!(
            user.require_role(RoleName::Mentor),
            Err(ApiError::ForbiddenError(_))
        ));
    }
}
