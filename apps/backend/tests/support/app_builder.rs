use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use minutes::{AppState, RequestTrace, StructuredLogger, TraceSpan};

type RouteConfig = Box<dyn Fn(&mut web::ServiceConfig)>;

/// Builder for an in-process service wired like production: the same
/// middleware stack around whichever routes the test selects.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfig>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Mount every production route.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(minutes::routes::configure) as RouteConfig);
        self
    }

    /// Mount custom routes instead of the production ones.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfig);
        self
    }

    pub async fn build(
        self,
    ) -> Result<
        impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
        Box<dyn std::error::Error>,
    > {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
